//! Which entity an error code belongs to

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Coarse grouping by the thousands digit of a code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Author,
    Course,
    Module,
    Student,
    Purchase,
    /// 9xxx, plus any range not assigned to an entity
    System,
}

impl From<u16> for ErrorCategory {
    fn from(code: u16) -> Self {
        match code / 1000 {
            0 => Self::General,
            1 => Self::Author,
            2 => Self::Course,
            3 => Self::Module,
            4 => Self::Student,
            5 => Self::Purchase,
            _ => Self::System,
        }
    }
}

impl ErrorCode {
    pub fn category(&self) -> ErrorCategory {
        self.code().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thousands_digit_picks_category() {
        assert_eq!(ErrorCategory::from(2), ErrorCategory::General);
        assert_eq!(ErrorCategory::from(1001), ErrorCategory::Author);
        assert_eq!(ErrorCategory::from(3001), ErrorCategory::Module);
        assert_eq!(ErrorCategory::from(7000), ErrorCategory::System);
        assert_eq!(ErrorCode::PurchaseDuplicate.category(), ErrorCategory::Purchase);
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(serde_json::to_string(&ErrorCategory::Student).unwrap(), "\"student\"");
    }
}

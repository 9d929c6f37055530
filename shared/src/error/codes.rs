//! Numeric error codes
//!
//! Ranges by entity: 0xxx general, 1xxx author, 2xxx course, 3xxx module,
//! 4xxx student, 5xxx purchase, 9xxx system.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric code carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    AlreadyExists = 4,

    AuthorNotFound = 1001,
    AuthorEmailExists = 1002,

    CourseNotFound = 2001,
    CourseTitleExists = 2002,
    /// Course still referenced by a purchase
    CourseHasPurchases = 2003,

    ModuleNotFound = 3001,

    StudentNotFound = 4001,
    StudentEmailExists = 4002,
    /// Student still referenced by a purchase
    StudentHasPurchases = 4003,

    PurchaseNotFound = 5001,
    /// (student, course) pair already recorded
    PurchaseDuplicate = 5002,

    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 17] = [
        Self::Success,
        Self::ValidationFailed,
        Self::NotFound,
        Self::AlreadyExists,
        Self::AuthorNotFound,
        Self::AuthorEmailExists,
        Self::CourseNotFound,
        Self::CourseTitleExists,
        Self::CourseHasPurchases,
        Self::ModuleNotFound,
        Self::StudentNotFound,
        Self::StudentEmailExists,
        Self::StudentHasPurchases,
        Self::PurchaseNotFound,
        Self::PurchaseDuplicate,
        Self::InternalError,
        Self::DatabaseError,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Generic message, safe to show to any client
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::AuthorNotFound => "Author not found",
            Self::AuthorEmailExists => "Author email already exists",
            Self::CourseNotFound => "Course not found",
            Self::CourseTitleExists => "Course title already exists",
            Self::CourseHasPurchases => "Course has purchase records",
            Self::ModuleNotFound => "Module not found",
            Self::StudentNotFound => "Student not found",
            Self::StudentEmailExists => "Student email already exists",
            Self::StudentHasPurchases => "Student has purchase records",
            Self::PurchaseNotFound => "Purchased course not found",
            Self::PurchaseDuplicate => "Student has already purchased this course",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A number that is not one of the [`ErrorCode`] values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown error code {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|c| c.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_code_parses_back() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::try_from(code.code()), Ok(code));
        }
        assert_eq!(ErrorCode::try_from(1234), Err(InvalidErrorCode(1234)));
        assert_eq!(ErrorCode::try_from(9005), Err(InvalidErrorCode(9005)));
    }

    #[test]
    fn serializes_as_number() {
        assert_eq!(serde_json::to_string(&ErrorCode::StudentEmailExists).unwrap(), "4002");
        assert!(serde_json::from_str::<ErrorCode>("999").is_err());
        assert_eq!(ErrorCode::ModuleNotFound.to_string(), "3001");
    }

    #[test]
    fn only_success_is_success() {
        assert!(ErrorCode::Success.is_success());
        assert!(!ErrorCode::PurchaseDuplicate.is_success());
    }
}

//! Error code → HTTP status
//!
//! Conflicts and business-rule rejections are 400, not 409: a client only
//! distinguishes "fix the request" from "it does not exist".

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        use ErrorCode::*;
        match self {
            Success => StatusCode::OK,
            NotFound | AuthorNotFound | CourseNotFound | ModuleNotFound | StudentNotFound
            | PurchaseNotFound => StatusCode::NOT_FOUND,
            _ if self.category() == ErrorCategory::System => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_per_code() {
        let expected = |code: ErrorCode| match code {
            ErrorCode::Success => StatusCode::OK,
            ErrorCode::InternalError | ErrorCode::DatabaseError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            c if c.message().ends_with("not found") => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        };
        for code in ErrorCode::ALL {
            assert_eq!(code.http_status(), expected(code), "{code:?}");
        }
    }

    #[test]
    fn conflicts_are_bad_request() {
        assert_eq!(ErrorCode::AuthorEmailExists.http_status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::StudentHasPurchases.http_status(), StatusCode::BAD_REQUEST);
    }
}

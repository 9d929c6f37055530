//! Author Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// Author entity (row of `authors`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Author {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
}

/// Author transfer object, used for both create and full-replace update.
///
/// `id` is ignored on input and always present on output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "not_blank")
    )]
    pub firstname: String,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "not_blank")
    )]
    pub lastname: String,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 254)
    )]
    pub email: String,
}

impl From<Author> for AuthorDto {
    fn from(a: Author) -> Self {
        Self {
            id: Some(a.id),
            firstname: a.firstname,
            lastname: a.lastname,
            email: a.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ada() -> AuthorDto {
        AuthorDto {
            id: None,
            firstname: "Ada".into(),
            lastname: "Lovelace".into(),
            email: "ada@x.com".into(),
        }
    }

    #[test]
    fn test_valid_author() {
        assert!(ada().validate().is_ok());
    }

    #[test]
    fn test_blank_firstname_rejected() {
        let dto = AuthorDto {
            firstname: "   ".into(),
            ..ada()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("firstname"));
    }

    #[test]
    fn test_malformed_email_rejected() {
        let dto = AuthorDto {
            email: "ada-at-x".into(),
            ..ada()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_deserialize_without_id() {
        let dto: AuthorDto = serde_json::from_str(
            r#"{"firstname":"Ada","lastname":"Lovelace","email":"ada@x.com"}"#,
        )
        .unwrap();
        assert_eq!(dto, ada());
    }
}

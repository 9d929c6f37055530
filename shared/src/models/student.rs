//! Student Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// Student entity (row of `students`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Student {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Student transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(
        email(message = "must be a valid email address"),
        length(max = 254)
    )]
    pub email: String,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "not_blank")
    )]
    pub first_name: String,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "not_blank")
    )]
    pub last_name: String,
}

impl From<Student> for StudentDto {
    fn from(s: Student) -> Self {
        Self {
            id: Some(s.id),
            email: s.email,
            first_name: s.first_name,
            last_name: s.last_name,
        }
    }
}

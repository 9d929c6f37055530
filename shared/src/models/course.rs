//! Course Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// Course entity (row of `courses`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub price: i64,
    /// Owning author, if any
    pub author_id: Option<i64>,
}

/// Course transfer object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 5000))]
    pub description: Option<String>,
    #[validate(range(min = 0, message = "must not be negative"))]
    pub price: i64,
    #[serde(default)]
    pub author_id: Option<i64>,
}

impl From<Course> for CourseDto {
    fn from(c: Course) -> Self {
        Self {
            id: Some(c.id),
            title: c.title,
            description: c.description,
            price: c.price,
            author_id: c.author_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_case_author_id() {
        let dto: CourseDto =
            serde_json::from_str(r#"{"title":"Algebra","price":10,"authorId":3}"#).unwrap();
        assert_eq!(dto.author_id, Some(3));
        assert_eq!(dto.description, None);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["authorId"], 3);
    }

    #[test]
    fn test_negative_price_rejected() {
        let dto = CourseDto {
            id: None,
            title: "Algebra".into(),
            description: None,
            price: -1,
            author_id: None,
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_missing_price_is_a_shape_error() {
        let result: Result<CourseDto, _> = serde_json::from_str(r#"{"title":"Algebra"}"#);
        assert!(result.is_err());
    }
}

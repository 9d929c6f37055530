//! Course Module Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::not_blank;

/// Module entity (row of `modules`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CourseModule {
    pub id: i64,
    pub title: String,
    pub content: Option<String>,
    pub course_id: i64,
}

/// Module transfer object; `courseId` is mandatory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDto {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "not_blank")
    )]
    pub title: String,
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub content: Option<String>,
    pub course_id: i64,
}

impl From<CourseModule> for ModuleDto {
    fn from(m: CourseModule) -> Self {
        Self {
            id: Some(m.id),
            title: m.title,
            content: m.content,
            course_id: m.course_id,
        }
    }
}

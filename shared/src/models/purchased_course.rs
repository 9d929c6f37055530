//! Purchased Course Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::util::millis_to_datetime;

/// Purchase record (row of `purchased_courses`)
///
/// At most one row exists per (student, course) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PurchasedCourse {
    pub id: i64,
    pub student_id: i64,
    pub course_id: i64,
    /// Purchase time, Unix millis
    pub purchase_date: i64,
    pub completed: bool,
}

/// Purchased course transfer object
///
/// On create, a missing `purchaseDate` means "now" and a missing `completed`
/// means `false`. On update, missing fields keep their stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchasedCourseDto {
    #[serde(default)]
    pub id: Option<i64>,
    pub student_id: i64,
    pub course_id: i64,
    #[serde(default)]
    pub purchase_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<PurchasedCourse> for PurchasedCourseDto {
    fn from(p: PurchasedCourse) -> Self {
        Self {
            id: Some(p.id),
            student_id: p.student_id,
            course_id: p.course_id,
            purchase_date: millis_to_datetime(p.purchase_date),
            completed: Some(p.completed),
        }
    }
}

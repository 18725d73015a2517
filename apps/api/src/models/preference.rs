use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An employer's stated matching preferences. At most one per employer.
///
/// Stored and served as-is: the matching flow does not consult it, and no
/// ordering between `salary_min` and `salary_max` is enforced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PreferenceRow {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub min_experience: i32,
    pub preferred_skills: Vec<String>,
    pub education_level: Option<String>,
    pub location: Option<String>,
    pub remote_ok: bool,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable preference fields, as accepted by `PUT /api/v1/employers/:id/preferences`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferenceInput {
    #[serde(default)]
    pub min_experience: i32,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    pub education_level: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub remote_ok: bool,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
}

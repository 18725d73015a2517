use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A person seeking employment. Owned by the surrounding application; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub skills: Vec<String>,
    pub experience_years: i32,
    pub education: Option<String>,
    pub location: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployerRow {
    pub id: Uuid,
    pub company_name: String,
    pub created_at: DateTime<Utc>,
}

/// An employer's job listing. Owned by the surrounding application; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub employer_id: Uuid,
    pub title: String,
    pub required_skills: Vec<String>,
    pub required_experience: i32,
    pub required_education: Option<String>,
    pub location: Option<String>,
    pub remote: bool,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub created_at: DateTime<Utc>,
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lifecycle tag on a match record. Changed only by an explicit status update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Pending => "pending",
            MatchStatus::Accepted => "accepted",
            MatchStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(MatchStatus::Pending),
            "accepted" => Ok(MatchStatus::Accepted),
            "rejected" => Ok(MatchStatus::Rejected),
            other => Err(format!(
                "unknown match status '{other}' (expected pending, accepted or rejected)"
            )),
        }
    }
}

/// One scored (candidate, job posting) pair, joined with the display names
/// of the entities it references.
///
/// `analysis` is the oracle's JSON reply serialized to a string and is
/// returned exactly as stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MatchRecord {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub employer_id: Uuid,
    pub job_posting_id: Uuid,
    pub score: i32,
    pub analysis: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub candidate_name: String,
    pub job_title: String,
    pub employer_name: String,
}

/// Parameters for writing a freshly scored pair.
#[derive(Debug, Clone)]
pub struct MatchUpsert {
    pub candidate_id: Uuid,
    pub job_posting_id: Uuid,
    pub employer_id: Uuid,
    pub score: i32,
    pub analysis: String,
}

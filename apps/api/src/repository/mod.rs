//! Persistence seam for the matching service.
//!
//! Handlers and the orchestrator only see `Arc<dyn Repository>`; production wires
//! in `PgRepository`, tests use the in-memory implementation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::job_match::{MatchRecord, MatchStatus, MatchUpsert};
use crate::models::preference::{PreferenceInput, PreferenceRow};
use crate::models::profile::{CandidateRow, EmployerRow, JobPostingRow};

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub use postgres::PgRepository;

/// Number of records returned by the top-matches queries when no limit is given.
pub const DEFAULT_TOP_LIMIT: u32 = 10;

#[async_trait]
pub trait Repository: Send + Sync {
    async fn find_candidate(&self, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error>;

    async fn list_candidates(&self) -> Result<Vec<CandidateRow>, sqlx::Error>;

    async fn find_job_posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, sqlx::Error>;

    async fn list_job_postings(&self) -> Result<Vec<JobPostingRow>, sqlx::Error>;

    async fn find_employer(&self, id: Uuid) -> Result<Option<EmployerRow>, sqlx::Error>;

    /// Writes a scored pair. Inserts a pending record the first time a pair is
    /// seen; afterwards overwrites score, analysis and `updated_at` in place,
    /// keeping the record id, status and `created_at`.
    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<MatchRecord, sqlx::Error>;

    async fn find_match(&self, id: Uuid) -> Result<Option<MatchRecord>, sqlx::Error>;

    /// Pending matches for a posting, best score first, at most `limit` rows.
    async fn top_matches_for_job_posting(
        &self,
        job_posting_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error>;

    /// Pending matches for a candidate, best score first, at most `limit` rows.
    async fn top_matches_for_candidate(
        &self,
        candidate_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error>;

    /// Unconditional status overwrite. Returns `None` if the record does not exist.
    async fn set_match_status(
        &self,
        id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<MatchRecord>, sqlx::Error>;

    async fn find_preferences(
        &self,
        employer_id: Uuid,
    ) -> Result<Option<PreferenceRow>, sqlx::Error>;

    async fn upsert_preferences(
        &self,
        employer_id: Uuid,
        input: &PreferenceInput,
    ) -> Result<PreferenceRow, sqlx::Error>;
}

//! Axum route handlers for the Matching API.

use std::collections::HashSet;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::matching::orchestrator::{calculate_match, process_all};
use crate::models::job_match::{MatchRecord, MatchStatus};
use crate::models::profile::{CandidateRow, JobPostingRow};
use crate::repository::{Repository, DEFAULT_TOP_LIMIT};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CalculateMatchRequest {
    pub candidate_id: Uuid,
    pub job_posting_id: Uuid,
}

/// Omitted id lists mean "every candidate" / "every posting".
#[derive(Debug, Default, Deserialize)]
pub struct BatchMatchRequest {
    pub candidate_ids: Option<Vec<Uuid>>,
    pub job_posting_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
pub struct BatchMatchResponse {
    pub matches: Vec<MatchRecord>,
}

#[derive(Debug, Deserialize)]
pub struct TopMatchesQuery {
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/matches/calculate
///
/// Scores one candidate against one posting and stores the result.
pub async fn handle_calculate_match(
    State(state): State<AppState>,
    AppJson(request): AppJson<CalculateMatchRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let candidate = load_candidate(state.repo.as_ref(), request.candidate_id).await?;
    let posting = load_job_posting(state.repo.as_ref(), request.job_posting_id).await?;

    let record =
        calculate_match(state.repo.as_ref(), &state.requester, &candidate, &posting).await?;

    Ok(Json(record))
}

/// POST /api/v1/matches/batch
///
/// Scores the cross product of the requested candidates and postings.
/// Repeated ids are scored once. Only successfully scored pairs appear in the
/// response.
pub async fn handle_batch_match(
    State(state): State<AppState>,
    AppJson(request): AppJson<BatchMatchRequest>,
) -> Result<Json<BatchMatchResponse>, AppError> {
    let repo = state.repo.as_ref();

    let candidates = match request.candidate_ids {
        Some(ids) => {
            let ids = unique_ids(ids);
            let mut rows = Vec::with_capacity(ids.len());
            for id in ids {
                rows.push(load_candidate(repo, id).await?);
            }
            rows
        }
        None => repo.list_candidates().await?,
    };

    let postings = match request.job_posting_ids {
        Some(ids) => {
            let ids = unique_ids(ids);
            let mut rows = Vec::with_capacity(ids.len());
            for id in ids {
                rows.push(load_job_posting(repo, id).await?);
            }
            rows
        }
        None => repo.list_job_postings().await?,
    };

    let matches = process_all(repo, &state.requester, &candidates, &postings).await;

    Ok(Json(BatchMatchResponse { matches }))
}

/// GET /api/v1/matches/:id
pub async fn handle_get_match(
    State(state): State<AppState>,
    AppPath(match_id): AppPath<Uuid>,
) -> Result<Json<MatchRecord>, AppError> {
    let record = state
        .repo
        .find_match(match_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;
    Ok(Json(record))
}

/// GET /api/v1/job-postings/:id/matches?limit=N
///
/// Best pending matches for a posting. Unknown posting ids yield an empty list.
pub async fn handle_top_matches_for_job_posting(
    State(state): State<AppState>,
    AppPath(job_posting_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<TopMatchesQuery>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let records = state
        .repo
        .top_matches_for_job_posting(job_posting_id, limit)
        .await?;
    Ok(Json(records))
}

/// GET /api/v1/candidates/:id/matches?limit=N
///
/// Best pending matches for a candidate. Unknown candidate ids yield an empty list.
pub async fn handle_top_matches_for_candidate(
    State(state): State<AppState>,
    AppPath(candidate_id): AppPath<Uuid>,
    AppQuery(query): AppQuery<TopMatchesQuery>,
) -> Result<Json<Vec<MatchRecord>>, AppError> {
    let limit = query.limit.unwrap_or(DEFAULT_TOP_LIMIT);
    let records = state
        .repo
        .top_matches_for_candidate(candidate_id, limit)
        .await?;
    Ok(Json(records))
}

/// PATCH /api/v1/matches/:id/status
///
/// Overwrites the lifecycle status. Any transition is allowed.
pub async fn handle_update_status(
    State(state): State<AppState>,
    AppPath(match_id): AppPath<Uuid>,
    AppJson(request): AppJson<UpdateStatusRequest>,
) -> Result<Json<MatchRecord>, AppError> {
    let status: MatchStatus = request.status.parse().map_err(AppError::Validation)?;

    let record = state
        .repo
        .set_match_status(match_id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))?;

    Ok(Json(record))
}

/// Drops repeated ids, keeping first-seen order.
fn unique_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

async fn load_candidate(repo: &dyn Repository, id: Uuid) -> Result<CandidateRow, AppError> {
    repo.find_candidate(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))
}

async fn load_job_posting(repo: &dyn Repository, id: Uuid) -> Result<JobPostingRow, AppError> {
    repo.find_job_posting(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job posting {id} not found")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_ids_keeps_first_seen_order() {
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        assert_eq!(unique_ids(vec![b, a, b, c, a]), vec![b, a, c]);
        assert!(unique_ids(Vec::new()).is_empty());
    }
}

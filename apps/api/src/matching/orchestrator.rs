//! Scoring pipeline: one pair (`calculate_match`) or a full cross product
//! (`process_all`).
//!
//! Flow per pair: Match Requester → Match Store upsert. Pairs are processed one
//! at a time; there is no fan-out, no dedup of already-scored pairs and no retry.

use tracing::{info, warn};

use crate::errors::AppError;
use crate::matching::requester::MatchRequester;
use crate::models::job_match::{MatchRecord, MatchUpsert};
use crate::models::profile::{CandidateRow, JobPostingRow};
use crate::repository::Repository;

/// Scores one pair and stores the result, re-scoring it if it already exists.
pub async fn calculate_match(
    repo: &dyn Repository,
    requester: &MatchRequester,
    candidate: &CandidateRow,
    posting: &JobPostingRow,
) -> Result<MatchRecord, AppError> {
    let result = requester.score(candidate, posting).await?;

    let record = repo
        .upsert_match(&MatchUpsert {
            candidate_id: candidate.id,
            job_posting_id: posting.id,
            employer_id: posting.employer_id,
            score: result.score,
            analysis: result.analysis,
        })
        .await?;

    Ok(record)
}

/// Scores every candidate against every posting (candidates outer, postings
/// inner) and returns the records that were stored.
///
/// A pair that fails, whether at the oracle or at the store, is logged and
/// skipped; the remaining pairs still run.
pub async fn process_all(
    repo: &dyn Repository,
    requester: &MatchRequester,
    candidates: &[CandidateRow],
    postings: &[JobPostingRow],
) -> Vec<MatchRecord> {
    let total = candidates.len() * postings.len();
    info!(
        "Batch scoring {} candidates x {} postings ({total} pairs)",
        candidates.len(),
        postings.len()
    );

    let mut stored = Vec::new();

    for candidate in candidates {
        for posting in postings {
            match calculate_match(repo, requester, candidate, posting).await {
                Ok(record) => stored.push(record),
                Err(e) => warn!(
                    "Skipping candidate {} / posting {}: {e}",
                    candidate.id, posting.id
                ),
            }
        }
    }

    info!(
        "Batch scoring finished: {} stored, {} skipped",
        stored.len(),
        total - stored.len()
    );

    stored
}

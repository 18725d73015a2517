//! Match Requester: asks the scoring oracle about one pair and validates the reply.
//!
//! `MatchRequester` holds an `Arc<dyn ScoringOracle>`; production passes the
//! `LlmClient`, tests pass a deterministic stub.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::LlmError;
use crate::matching::prompts::{build_match_prompt, match_system_prompt};
use crate::models::profile::{CandidateRow, JobPostingRow};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Remote text-generation service that scores a prompt and answers with JSON.
#[async_trait]
pub trait ScoringOracle: Send + Sync {
    async fn score_pair(&self, system: &str, prompt: &str) -> Result<Value, LlmError>;
}

/// Why a pair could not be scored.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("scoring oracle unavailable: {0}")]
    Transport(LlmError),

    #[error("scoring oracle returned a malformed reply: {0}")]
    MalformedResponse(String),

    #[error("scoring oracle returned score {0}, outside 0..=100")]
    ScoreOutOfRange(f64),
}

impl MatchError {
    /// Stable machine-readable code used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::Transport(_) => "ORACLE_UNAVAILABLE",
            MatchError::MalformedResponse(_) => "MALFORMED_RESPONSE",
            MatchError::ScoreOutOfRange(_) => "SCORE_OUT_OF_RANGE",
        }
    }
}

impl From<LlmError> for MatchError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Parse(e) => MatchError::MalformedResponse(e.to_string()),
            LlmError::EmptyContent => {
                MatchError::MalformedResponse("reply had no text content".to_string())
            }
            other => MatchError::Transport(other),
        }
    }
}

/// Typed view of the oracle's reply. Only `score` and `analysis` are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReply {
    pub score: f64,
    pub analysis: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub key_matches: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub gaps: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// A validated score plus the reply it came from.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub score: i32,
    /// The full reply object serialized to a string; persisted verbatim.
    pub analysis: String,
    pub reply: MatchReply,
}

#[derive(Clone)]
pub struct MatchRequester {
    oracle: Arc<dyn ScoringOracle>,
}

impl MatchRequester {
    pub fn new(oracle: Arc<dyn ScoringOracle>) -> Self {
        Self { oracle }
    }

    /// Scores one pair. Failures are logged here and returned to the caller;
    /// nothing is retried.
    pub async fn score(
        &self,
        candidate: &CandidateRow,
        posting: &JobPostingRow,
    ) -> Result<MatchResult, MatchError> {
        let prompt = build_match_prompt(candidate, posting);
        let system = match_system_prompt();

        let outcome = match self.oracle.score_pair(&system, &prompt).await {
            Ok(reply) => validate_reply(reply),
            Err(e) => Err(MatchError::from(e)),
        };

        match &outcome {
            Ok(result) => debug!(
                "Scored candidate {} / posting {}: {} ({} key matches, {} gaps)",
                candidate.id,
                posting.id,
                result.score,
                result.reply.key_matches.len(),
                result.reply.gaps.len()
            ),
            Err(e) => warn!(
                "Scoring failed for candidate {} / posting {}: {e}",
                candidate.id, posting.id
            ),
        }

        outcome
    }
}

/// Checks the raw reply and turns it into a `MatchResult`.
pub fn validate_reply(reply: Value) -> Result<MatchResult, MatchError> {
    if !reply.is_object() {
        return Err(MatchError::MalformedResponse(
            "reply is not a JSON object".to_string(),
        ));
    }

    let parsed: MatchReply = serde_json::from_value(reply.clone())
        .map_err(|e| MatchError::MalformedResponse(e.to_string()))?;

    if !parsed.score.is_finite() || !(MIN_SCORE..=MAX_SCORE).contains(&parsed.score) {
        return Err(MatchError::ScoreOutOfRange(parsed.score));
    }

    let analysis = serde_json::to_string(&reply)
        .map_err(|e| MatchError::MalformedResponse(e.to_string()))?;

    Ok(MatchResult {
        score: parsed.score.round() as i32,
        analysis,
        reply: parsed,
    })
}

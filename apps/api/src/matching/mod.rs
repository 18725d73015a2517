// Candidate/job matching: prompt building, oracle scoring, persistence orchestration.
// All model calls go through the `ScoringOracle` seam in requester.rs.

pub mod handlers;
pub mod orchestrator;
pub mod prompts;
pub mod requester;

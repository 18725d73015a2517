pub mod job_match;
pub mod preference;
pub mod profile;

//! In-memory `Repository` used by unit and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::job_match::{MatchRecord, MatchStatus, MatchUpsert};
use crate::models::preference::{PreferenceInput, PreferenceRow};
use crate::models::profile::{CandidateRow, EmployerRow, JobPostingRow};
use crate::repository::Repository;

#[derive(Debug, Clone)]
struct StoredMatch {
    id: Uuid,
    candidate_id: Uuid,
    employer_id: Uuid,
    job_posting_id: Uuid,
    score: i32,
    analysis: String,
    status: MatchStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct Tables {
    candidates: Vec<CandidateRow>,
    employers: Vec<EmployerRow>,
    job_postings: Vec<JobPostingRow>,
    matches: Vec<StoredMatch>,
    preferences: HashMap<Uuid, PreferenceRow>,
}

impl Tables {
    fn to_record(&self, stored: &StoredMatch) -> MatchRecord {
        let candidate_name = self
            .candidates
            .iter()
            .find(|c| c.id == stored.candidate_id)
            .map(|c| c.name.clone())
            .unwrap_or_default();
        let job_title = self
            .job_postings
            .iter()
            .find(|j| j.id == stored.job_posting_id)
            .map(|j| j.title.clone())
            .unwrap_or_default();
        let employer_name = self
            .employers
            .iter()
            .find(|e| e.id == stored.employer_id)
            .map(|e| e.company_name.clone())
            .unwrap_or_default();

        MatchRecord {
            id: stored.id,
            candidate_id: stored.candidate_id,
            employer_id: stored.employer_id,
            job_posting_id: stored.job_posting_id,
            score: stored.score,
            analysis: stored.analysis.clone(),
            status: stored.status.as_str().to_string(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
            candidate_name,
            job_title,
            employer_name,
        }
    }

    fn top_pending<F>(&self, filter: F, limit: u32) -> Vec<MatchRecord>
    where
        F: Fn(&StoredMatch) -> bool,
    {
        let mut pending: Vec<&StoredMatch> = self
            .matches
            .iter()
            .filter(|m| m.status == MatchStatus::Pending && filter(m))
            .collect();
        pending.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        pending
            .into_iter()
            .take(limit as usize)
            .map(|m| self.to_record(m))
            .collect()
    }
}

#[derive(Default)]
pub struct MemoryRepository {
    tables: Mutex<Tables>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_employer(&self, company_name: &str) -> EmployerRow {
        let row = EmployerRow {
            id: Uuid::new_v4(),
            company_name: company_name.to_string(),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().employers.push(row.clone());
        row
    }

    pub fn add_candidate(
        &self,
        name: &str,
        skills: &[&str],
        experience_years: i32,
    ) -> CandidateRow {
        let row = CandidateRow {
            id: Uuid::new_v4(),
            name: name.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience_years,
            education: Some("BSc Computer Science".to_string()),
            location: Some("Berlin".to_string()),
            bio: Some(format!("{name} builds backend services.")),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().candidates.push(row.clone());
        row
    }

    pub fn add_job_posting(
        &self,
        employer: &EmployerRow,
        title: &str,
        required_skills: &[&str],
        required_experience: i32,
    ) -> JobPostingRow {
        let row = JobPostingRow {
            id: Uuid::new_v4(),
            employer_id: employer.id,
            title: title.to_string(),
            required_skills: required_skills.iter().map(|s| s.to_string()).collect(),
            required_experience,
            required_education: None,
            location: Some("Remote".to_string()),
            remote: true,
            salary_min: Some(60_000),
            salary_max: Some(90_000),
            created_at: Utc::now(),
        };
        self.tables.lock().unwrap().job_postings.push(row.clone());
        row
    }

    pub fn match_count(&self) -> usize {
        self.tables.lock().unwrap().matches.len()
    }
}

#[async_trait]
impl Repository for MemoryRepository {
    async fn find_candidate(&self, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.candidates.iter().find(|c| c.id == id).cloned())
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRow>, sqlx::Error> {
        Ok(self.tables.lock().unwrap().candidates.clone())
    }

    async fn find_job_posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.job_postings.iter().find(|j| j.id == id).cloned())
    }

    async fn list_job_postings(&self) -> Result<Vec<JobPostingRow>, sqlx::Error> {
        Ok(self.tables.lock().unwrap().job_postings.clone())
    }

    async fn find_employer(&self, id: Uuid) -> Result<Option<EmployerRow>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.employers.iter().find(|e| e.id == id).cloned())
    }

    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<MatchRecord, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();

        let position = tables.matches.iter().position(|m| {
            m.candidate_id == upsert.candidate_id && m.job_posting_id == upsert.job_posting_id
        });

        let index = match position {
            Some(index) => {
                let existing = &mut tables.matches[index];
                existing.score = upsert.score;
                existing.analysis = upsert.analysis.clone();
                existing.updated_at = now;
                index
            }
            None => {
                tables.matches.push(StoredMatch {
                    id: Uuid::new_v4(),
                    candidate_id: upsert.candidate_id,
                    employer_id: upsert.employer_id,
                    job_posting_id: upsert.job_posting_id,
                    score: upsert.score,
                    analysis: upsert.analysis.clone(),
                    status: MatchStatus::Pending,
                    created_at: now,
                    updated_at: now,
                });
                tables.matches.len() - 1
            }
        };

        Ok(tables.to_record(&tables.matches[index]))
    }

    async fn find_match(&self, id: Uuid) -> Result<Option<MatchRecord>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .matches
            .iter()
            .find(|m| m.id == id)
            .map(|m| tables.to_record(m)))
    }

    async fn top_matches_for_job_posting(
        &self,
        job_posting_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.top_pending(|m| m.job_posting_id == job_posting_id, limit))
    }

    async fn top_matches_for_candidate(
        &self,
        candidate_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.top_pending(|m| m.candidate_id == candidate_id, limit))
    }

    async fn set_match_status(
        &self,
        id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<MatchRecord>, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let Some(index) = tables.matches.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        tables.matches[index].status = status;
        tables.matches[index].updated_at = Utc::now();
        Ok(Some(tables.to_record(&tables.matches[index])))
    }

    async fn find_preferences(
        &self,
        employer_id: Uuid,
    ) -> Result<Option<PreferenceRow>, sqlx::Error> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .preferences
            .get(&employer_id)
            .cloned())
    }

    async fn upsert_preferences(
        &self,
        employer_id: Uuid,
        input: &PreferenceInput,
    ) -> Result<PreferenceRow, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let (id, created_at) = tables
            .preferences
            .get(&employer_id)
            .map(|p| (p.id, p.created_at))
            .unwrap_or_else(|| (Uuid::new_v4(), now));

        let row = PreferenceRow {
            id,
            employer_id,
            min_experience: input.min_experience,
            preferred_skills: input.preferred_skills.clone(),
            education_level: input.education_level.clone(),
            location: input.location.clone(),
            remote_ok: input.remote_ok,
            salary_min: input.salary_min,
            salary_max: input.salary_max,
            created_at,
            updated_at: now,
        };
        tables.preferences.insert(employer_id, row.clone());
        Ok(row)
    }
}

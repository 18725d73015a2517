use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::job_match::{MatchRecord, MatchStatus, MatchUpsert};
use crate::models::preference::{PreferenceInput, PreferenceRow};
use crate::models::profile::{CandidateRow, EmployerRow, JobPostingRow};
use crate::repository::Repository;

/// Joined projection shared by every match read.
const MATCH_SELECT: &str = r#"
    SELECT m.id, m.candidate_id, m.employer_id, m.job_posting_id,
           m.score, m.analysis, m.status, m.created_at, m.updated_at,
           c.name AS candidate_name,
           j.title AS job_title,
           e.company_name AS employer_name
    FROM job_matches m
    JOIN candidates c ON c.id = m.candidate_id
    JOIN job_postings j ON j.id = m.job_posting_id
    JOIN employers e ON e.id = m.employer_id
"#;

#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_match(&self, id: Uuid) -> Result<Option<MatchRecord>, sqlx::Error> {
        let sql = format!("{MATCH_SELECT} WHERE m.id = $1");
        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn find_candidate(&self, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_candidates(&self) -> Result<Vec<CandidateRow>, sqlx::Error> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
    }

    async fn find_job_posting(&self, id: Uuid) -> Result<Option<JobPostingRow>, sqlx::Error> {
        sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_job_postings(&self) -> Result<Vec<JobPostingRow>, sqlx::Error> {
        sqlx::query_as::<_, JobPostingRow>("SELECT * FROM job_postings ORDER BY created_at, id")
            .fetch_all(&self.pool)
            .await
    }

    async fn find_employer(&self, id: Uuid) -> Result<Option<EmployerRow>, sqlx::Error> {
        sqlx::query_as::<_, EmployerRow>("SELECT * FROM employers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn upsert_match(&self, upsert: &MatchUpsert) -> Result<MatchRecord, sqlx::Error> {
        // Keyed on the pair: status and created_at survive a re-score.
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO job_matches
                (id, candidate_id, employer_id, job_posting_id, score, analysis, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (candidate_id, job_posting_id) DO UPDATE
            SET score = EXCLUDED.score,
                analysis = EXCLUDED.analysis,
                updated_at = NOW()
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(upsert.candidate_id)
        .bind(upsert.employer_id)
        .bind(upsert.job_posting_id)
        .bind(upsert.score)
        .bind(&upsert.analysis)
        .bind(MatchStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Stored match {id} for candidate {} / posting {} (score {})",
            upsert.candidate_id, upsert.job_posting_id, upsert.score
        );

        self.fetch_match(id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    async fn find_match(&self, id: Uuid) -> Result<Option<MatchRecord>, sqlx::Error> {
        self.fetch_match(id).await
    }

    async fn top_matches_for_job_posting(
        &self,
        job_posting_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error> {
        let sql = format!(
            "{MATCH_SELECT} WHERE m.job_posting_id = $1 AND m.status = $2 \
             ORDER BY m.score DESC, m.updated_at DESC LIMIT $3"
        );
        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(job_posting_id)
            .bind(MatchStatus::Pending.as_str())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
    }

    async fn top_matches_for_candidate(
        &self,
        candidate_id: Uuid,
        limit: u32,
    ) -> Result<Vec<MatchRecord>, sqlx::Error> {
        let sql = format!(
            "{MATCH_SELECT} WHERE m.candidate_id = $1 AND m.status = $2 \
             ORDER BY m.score DESC, m.updated_at DESC LIMIT $3"
        );
        sqlx::query_as::<_, MatchRecord>(&sql)
            .bind(candidate_id)
            .bind(MatchStatus::Pending.as_str())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
    }

    async fn set_match_status(
        &self,
        id: Uuid,
        status: MatchStatus,
    ) -> Result<Option<MatchRecord>, sqlx::Error> {
        let updated: Option<Uuid> = sqlx::query_scalar(
            "UPDATE job_matches SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING id",
        )
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(id) => {
                info!("Match {id} status set to {status}");
                self.fetch_match(id).await
            }
            None => Ok(None),
        }
    }

    async fn find_preferences(
        &self,
        employer_id: Uuid,
    ) -> Result<Option<PreferenceRow>, sqlx::Error> {
        sqlx::query_as::<_, PreferenceRow>(
            "SELECT * FROM employer_preferences WHERE employer_id = $1",
        )
        .bind(employer_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn upsert_preferences(
        &self,
        employer_id: Uuid,
        input: &PreferenceInput,
    ) -> Result<PreferenceRow, sqlx::Error> {
        sqlx::query_as::<_, PreferenceRow>(
            r#"
            INSERT INTO employer_preferences
                (id, employer_id, min_experience, preferred_skills, education_level,
                 location, remote_ok, salary_min, salary_max)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (employer_id) DO UPDATE
            SET min_experience = EXCLUDED.min_experience,
                preferred_skills = EXCLUDED.preferred_skills,
                education_level = EXCLUDED.education_level,
                location = EXCLUDED.location,
                remote_ok = EXCLUDED.remote_ok,
                salary_min = EXCLUDED.salary_min,
                salary_max = EXCLUDED.salary_max,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employer_id)
        .bind(input.min_experience)
        .bind(&input.preferred_skills)
        .bind(&input.education_level)
        .bind(&input.location)
        .bind(input.remote_ok)
        .bind(input.salary_min)
        .bind(input.salary_max)
        .fetch_one(&self.pool)
        .await
    }
}

//! PostgreSQL repository for the `members` table.

use async_trait::async_trait;
use chapel_core::error::CoreError;
use chapel_core::pagination::{Page, Pagination};
use chapel_core::types::Timestamp;

use super::MemberRepository;
use crate::models::member::{CreateMember, Member, MemberStats};
use crate::{DbPool, RepoResult};

const COLUMNS: &str = "\
    id, user_id, first_name, last_name, email, phone, address, city, state, zip, \
    birth_date, bio, created_at, updated_at";

/// Member repository over a PostgreSQL pool.
pub struct PgMemberRepository {
    pool: DbPool,
}

impl PgMemberRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    async fn register(&self, user_id: &str, input: &CreateMember) -> RepoResult<Member> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM members WHERE user_id = $1 OR lower(email) = lower($2))",
        )
        .bind(user_id)
        .bind(&input.email)
        .fetch_one(&self.pool)
        .await?;
        if exists {
            return Err(CoreError::Conflict("Member already exists".into()).into());
        }

        // The unique constraints still catch a concurrent insert; the API maps
        // that violation to 409 as well.
        let query = format!(
            "INSERT INTO members (
                user_id, first_name, last_name, email, phone, address, city, state, zip,
                birth_date, bio
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .bind(input.first_name.trim())
            .bind(input.last_name.trim())
            .bind(input.email.trim())
            .bind(&input.phone)
            .bind(&input.address)
            .bind(&input.city)
            .bind(&input.state)
            .bind(&input.zip)
            .bind(input.birth_date)
            .bind(&input.bio)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_by_user_id(&self, user_id: &str) -> RepoResult<Option<Member>> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE user_id = $1");
        let row = sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, pagination: Pagination) -> RepoResult<Page<Member>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM members
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, Member>(&query)
            .bind(pagination.per_page)
            .bind(pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, total, pagination))
    }

    async fn stats(&self, since: Timestamp) -> RepoResult<MemberStats> {
        let stats = sqlx::query_as::<_, MemberStats>(
            "SELECT COUNT(*) AS total_members,
                    COUNT(*) FILTER (WHERE created_at >= $1) AS new_members
             FROM members",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}

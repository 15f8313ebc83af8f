//! PostgreSQL repository for the `sermons` table.

use async_trait::async_trait;
use chapel_core::content::STATUS_PUBLISHED;
use chapel_core::pagination::Page;
use chapel_core::sermon_query::{SermonQuery, SermonSort, SortOrder};
use chapel_core::types::{DbId, Timestamp};

use super::SermonRepository;
use crate::models::sermon::{CreateSermon, FilterOption, Sermon, SermonStats, UpdateSermon};
use crate::{DbPool, RepoResult};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, slug, description, content, scripture_reference, speaker, date, \
    video_url, audio_url, image_url, series, tags, status, view_count, download_count, \
    created_at, updated_at";

/// Optional filters as nullable binds: `$1` include drafts, `$2` search
/// pattern, `$3` speaker, `$4` series, `$5` topic.
const LIST_FILTER: &str = "\
    WHERE ($1::BOOLEAN OR status = 'published') \
      AND ($2::TEXT IS NULL OR title ILIKE $2 OR description ILIKE $2) \
      AND ($3::TEXT IS NULL OR speaker = $3) \
      AND ($4::TEXT IS NULL OR series = $4) \
      AND ($5::TEXT IS NULL OR $5 = ANY(tags))";

/// Whitelisted `ORDER BY` clause for a sort request. Never interpolates user input.
fn order_by(sort: SermonSort, order: SortOrder) -> &'static str {
    match (sort, order) {
        (SermonSort::Date, SortOrder::Asc) => "date ASC, id ASC",
        (SermonSort::Date, SortOrder::Desc) => "date DESC, id DESC",
        (SermonSort::Title, SortOrder::Asc) => r#"lower(title) COLLATE "C" ASC, id ASC"#,
        (SermonSort::Title, SortOrder::Desc) => r#"lower(title) COLLATE "C" DESC, id DESC"#,
        (SermonSort::Views, SortOrder::Asc) => "view_count ASC, id ASC",
        (SermonSort::Views, SortOrder::Desc) => "view_count DESC, id DESC",
    }
}

/// Sermon repository over a PostgreSQL pool.
pub struct PgSermonRepository {
    pool: DbPool,
}

impl PgSermonRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SermonRepository for PgSermonRepository {
    async fn list(&self, query: &SermonQuery) -> RepoResult<Page<Sermon>> {
        let pattern = query.search_pattern();

        let count_sql = format!("SELECT COUNT(*) FROM sermons {LIST_FILTER}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(query.include_drafts)
            .bind(&pattern)
            .bind(&query.speaker)
            .bind(&query.series)
            .bind(&query.topic)
            .fetch_one(&self.pool)
            .await?;

        let list_sql = format!(
            "SELECT {COLUMNS} FROM sermons {LIST_FILTER} ORDER BY {} LIMIT $6 OFFSET $7",
            order_by(query.sort, query.order)
        );
        let rows = sqlx::query_as::<_, Sermon>(&list_sql)
            .bind(query.include_drafts)
            .bind(&pattern)
            .bind(&query.speaker)
            .bind(&query.series)
            .bind(&query.topic)
            .bind(query.pagination.per_page)
            .bind(query.pagination.offset())
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(rows, total, query.pagination))
    }

    async fn find_by_id(&self, id: DbId) -> RepoResult<Option<Sermon>> {
        let query = format!("SELECT {COLUMNS} FROM sermons WHERE id = $1");
        let row = sqlx::query_as::<_, Sermon>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn view_by_slug(&self, slug: &str) -> RepoResult<Option<Sermon>> {
        let query = format!(
            "UPDATE sermons SET view_count = view_count + 1
             WHERE slug = $1 AND status = $2
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Sermon>(&query)
            .bind(slug)
            .bind(STATUS_PUBLISHED)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn related(
        &self,
        id: DbId,
        series: Option<&str>,
        limit: i64,
    ) -> RepoResult<Vec<Sermon>> {
        let query = format!(
            "SELECT {COLUMNS} FROM sermons
             WHERE id <> $1 AND status = $2 AND ($3::TEXT IS NULL OR series = $3)
             ORDER BY date DESC, id DESC
             LIMIT $4"
        );
        let rows = sqlx::query_as::<_, Sermon>(&query)
            .bind(id)
            .bind(STATUS_PUBLISHED)
            .bind(series)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn latest(&self, limit: i64) -> RepoResult<Vec<Sermon>> {
        let query = format!(
            "SELECT {COLUMNS} FROM sermons
             WHERE status = $1
             ORDER BY date DESC, id DESC
             LIMIT $2"
        );
        let rows = sqlx::query_as::<_, Sermon>(&query)
            .bind(STATUS_PUBLISHED)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn speakers(&self) -> RepoResult<Vec<FilterOption>> {
        let rows = sqlx::query_as::<_, FilterOption>(
            "SELECT DISTINCT speaker AS id, speaker AS name FROM sermons
             WHERE status = $1
             ORDER BY name",
        )
        .bind(STATUS_PUBLISHED)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn series(&self) -> RepoResult<Vec<FilterOption>> {
        let rows = sqlx::query_as::<_, FilterOption>(
            "SELECT DISTINCT series AS id, series AS name FROM sermons
             WHERE status = $1 AND series IS NOT NULL AND series <> ''
             ORDER BY name",
        )
        .bind(STATUS_PUBLISHED)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn topics(&self) -> RepoResult<Vec<FilterOption>> {
        let rows = sqlx::query_as::<_, FilterOption>(
            "SELECT DISTINCT t AS id, t AS name FROM sermons, unnest(tags) AS t
             WHERE status = $1
             ORDER BY name",
        )
        .bind(STATUS_PUBLISHED)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, input: &CreateSermon) -> RepoResult<Sermon> {
        let query = format!(
            "INSERT INTO sermons (
                title, slug, description, content, scripture_reference, speaker, date,
                video_url, audio_url, image_url, series, tags, status
             ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, COALESCE($13, 'published'))
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Sermon>(&query)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.scripture_reference)
            .bind(&input.speaker)
            .bind(input.date)
            .bind(&input.video_url)
            .bind(&input.audio_url)
            .bind(&input.image_url)
            .bind(&input.series)
            .bind(&input.tags)
            .bind(&input.status)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: DbId, input: &UpdateSermon) -> RepoResult<Option<Sermon>> {
        let query = format!(
            "UPDATE sermons SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                description = COALESCE($4, description),
                content = COALESCE($5, content),
                scripture_reference = COALESCE($6, scripture_reference),
                speaker = COALESCE($7, speaker),
                date = COALESCE($8, date),
                video_url = COALESCE($9, video_url),
                audio_url = COALESCE($10, audio_url),
                image_url = COALESCE($11, image_url),
                series = COALESCE($12, series),
                tags = COALESCE($13, tags),
                status = COALESCE($14, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, Sermon>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.slug)
            .bind(&input.description)
            .bind(&input.content)
            .bind(&input.scripture_reference)
            .bind(&input.speaker)
            .bind(input.date)
            .bind(&input.video_url)
            .bind(&input.audio_url)
            .bind(&input.image_url)
            .bind(&input.series)
            .bind(&input.tags)
            .bind(&input.status)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: DbId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM sermons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_downloads(&self, id: DbId) -> RepoResult<bool> {
        let result =
            sqlx::query("UPDATE sermons SET download_count = download_count + 1 WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn stats(&self, since: Timestamp) -> RepoResult<SermonStats> {
        let stats = sqlx::query_as::<_, SermonStats>(
            "SELECT COUNT(*) FILTER (WHERE date >= $1) AS recent_sermons,
                    COALESCE(SUM(view_count), 0)::BIGINT AS total_views
             FROM sermons",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(stats)
    }
}

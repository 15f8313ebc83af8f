use async_trait::async_trait;

use super::HealthProbe;
use crate::{DbPool, RepoResult};

/// Pings PostgreSQL with `SELECT 1`.
pub struct PgHealthProbe {
    pool: DbPool,
}

impl PgHealthProbe {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HealthProbe for PgHealthProbe {
    async fn health_check(&self) -> RepoResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

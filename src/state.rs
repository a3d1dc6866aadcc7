use crate::auth::repo::{MemoryUserStore, PgUserStore, UserStore};
use crate::config::AppConfig;
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match &config.database_url {
            Some(url) => {
                let db = PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                sqlx::migrate!("./migrations")
                    .run(&db)
                    .await
                    .context("run migrations")?;

                Arc::new(PgUserStore::new(db)) as Arc<dyn UserStore>
            }
            None => {
                tracing::warn!("DATABASE_URL not set; users are kept in memory and lost on restart");
                Arc::new(MemoryUserStore::new()) as Arc<dyn UserStore>
            }
        };

        Ok(Self { store, config })
    }

    #[cfg(test)]
    pub fn fake(store: Arc<dyn UserStore>) -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            db_max_connections: 1,
            bind_addr: ([127, 0, 0, 1], 0).into(),
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test".into(),
                audience: "test".into(),
                ttl_minutes: 5,
            },
        });
        Self { store, config }
    }
}

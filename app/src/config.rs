use std::{ops::Deref, str::FromStr, sync::Arc, time::Duration};

use crate::sync::ImportPolicy;

/// Period between two sync passes. Fixed, not read from the environment.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(300);

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BROADCAST_API_URL: &str = "https://lichess.org";

pub struct ConfigInner {
    pub db_url: String,
    pub host: String,
    pub port: u16,
    pub broadcast_api_url: String,
    pub import_policy: ImportPolicy,
}

#[derive(Clone)]
pub struct Config(Arc<ConfigInner>);

impl Config {
    pub fn new(inner: ConfigInner) -> Self {
        Self(Arc::new(inner))
    }

    pub fn from_env() -> Config {
        let v = ConfigInner {
            db_url: std::env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file"),
            host: std::env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: std::env::var("PORT")
                .map(|p| p.parse().expect("PORT is not a number"))
                .unwrap_or(DEFAULT_PORT),
            broadcast_api_url: std::env::var("BROADCAST_API_URL")
                .unwrap_or_else(|_| DEFAULT_BROADCAST_API_URL.to_string()),
            import_policy: std::env::var("GAME_IMPORT_POLICY")
                .map(|p| {
                    ImportPolicy::from_str(&p)
                        .expect("GAME_IMPORT_POLICY must be `at-most-once` or `until-complete`")
                })
                .unwrap_or_default(),
        };

        Self(Arc::new(v))
    }

    pub fn get_server_url(&self) -> String {
        format!("{}:{}", self.0.host, self.0.port)
    }
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

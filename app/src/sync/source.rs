use async_trait::async_trait;
use models::schemas::broadcast::{ActiveBroadcasts, BroadcastTour, TournamentDetail};

use crate::error::SyncError;

/// Read side of the upstream broadcast service.
#[async_trait]
pub trait BroadcastSource {
    /// Tournaments currently being broadcast.
    async fn active_tournaments(&self) -> Result<Vec<BroadcastTour>, SyncError>;

    /// A tournament together with its full round list.
    async fn tournament_detail(&self, tournament_id: &str) -> Result<TournamentDetail, SyncError>;

    /// Every game record of a round, concatenated as one PGN export.
    async fn round_pgn(&self, round_id: &str) -> Result<String, SyncError>;
}

/// `BroadcastSource` over the public lichess broadcast endpoints.
pub struct LichessClient {
    client: reqwest::Client,
    base_url: String,
}

impl LichessClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("broadcast-sync/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response, SyncError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response)
    }
}

#[async_trait]
impl BroadcastSource for LichessClient {
    async fn active_tournaments(&self) -> Result<Vec<BroadcastTour>, SyncError> {
        let top: ActiveBroadcasts = self.get("/api/broadcast/top").await?.json().await?;
        Ok(top.active.into_iter().map(|entry| entry.tour).collect())
    }

    async fn tournament_detail(&self, tournament_id: &str) -> Result<TournamentDetail, SyncError> {
        let detail = self
            .get(&format!("/api/broadcast/{tournament_id}"))
            .await?
            .json()
            .await?;
        Ok(detail)
    }

    async fn round_pgn(&self, round_id: &str) -> Result<String, SyncError> {
        let pgn = self
            .get(&format!("/api/broadcast/round/{round_id}.pgn"))
            .await?
            .text()
            .await?;
        Ok(pgn)
    }
}

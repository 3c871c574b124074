use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{error, info};

use crate::dto::player_dto::PlayerView;
use crate::error::GatewayError;

/// Upper bound on a single Players service call, body included.
pub const PLAYERS_TIMEOUT: Duration = Duration::from_secs(5);

#[async_trait]
pub trait PlayersGateway: Send + Sync {
    async fn players_by_team_id(&self, team_id: i64) -> Result<Vec<PlayerView>, GatewayError>;

    async fn players_by_team_name(&self, team_name: &str) -> Result<Vec<PlayerView>, GatewayError>;
}

/**
 * Talks to the Players service over HTTP. One call per request, no retries,
 * nothing cached.
 */
#[derive(Debug, Clone)]
pub struct HttpPlayersGateway {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpPlayersGateway {
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, PLAYERS_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let parsed = Url::parse(base_url).map_err(|_| GatewayError::InvalidBaseUrl(base_url.to_string()))?;
        if parsed.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: parsed,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded segments to the configured base path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<Vec<PlayerView>, GatewayError> {
        info!("Fetching players from {}", url);

        let response = self.client.get(url.clone()).send().await.map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            error!("Players service answered {} for {}", status, url);
            return Err(GatewayError::Status(status.as_u16()));
        }

        response.json::<Vec<PlayerView>>().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else if e.is_decode() {
            GatewayError::Decode(e.to_string())
        } else {
            GatewayError::Transport(e.to_string())
        }
    }
}

#[async_trait]
impl PlayersGateway for HttpPlayersGateway {
    async fn players_by_team_id(&self, team_id: i64) -> Result<Vec<PlayerView>, GatewayError> {
        let id = team_id.to_string();
        let url = self.endpoint(&["players", "team", &id])?;
        self.fetch(url).await
    }

    async fn players_by_team_name(&self, team_name: &str) -> Result<Vec<PlayerView>, GatewayError> {
        let url = self.endpoint(&["players", "team-name", team_name])?;
        self.fetch(url).await
    }
}

use async_trait::async_trait;
use partograf_core::PartografRecord;

use crate::error::ApiError;
use crate::models::BidanInfo;

/// The two fetches behind the main dashboard.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn bidan(&self, token: &str, pasien_id: &str) -> Result<BidanInfo, ApiError>;

    async fn partograf_history(
        &self,
        token: &str,
        pasien_id: &str,
    ) -> Result<Vec<PartografRecord>, ApiError>;
}

/// Where the login token is kept (device storage on the phone).
pub trait TokenStore {
    fn token(&self) -> Option<String>;
}

/// Token held in memory, e.g. from a CLI flag.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl TokenStore for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}

use partograf_core::{DashboardSnapshot, PartografConfig, PartografRecord};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::claims::decode_claims;
use crate::error::ApiError;
use crate::models::BIDAN_ERROR;
use crate::source::{DashboardSource, TokenStore};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Dismissible notification shown after a refresh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardRefresh {
    pub snapshot: DashboardSnapshot,
    pub notices: Vec<Notice>,
}

/// Reload the main dashboard.
///
/// A missing token is the only hard failure besides an unreadable token; the
/// caller sends the user back to login. The midwife and partograph requests
/// run concurrently and each falls back on its own, so one failing never
/// blocks the other.
pub async fn refresh<S>(
    source: &S,
    tokens: &dyn TokenStore,
    config: &PartografConfig,
) -> Result<DashboardRefresh, ApiError>
where
    S: DashboardSource + ?Sized,
{
    let token = tokens
        .token()
        .filter(|token| !token.trim().is_empty())
        .ok_or(ApiError::MissingToken)?;
    let claims = decode_claims(&token)?;

    let (bidan, history) = futures::join!(
        load_bidan(source, &token, &claims.pasien_id),
        load_history(source, &token, &claims.pasien_id),
    );
    let (bidan_name, bidan_notice) = bidan;
    let (records, history_notice) = history;

    let snapshot = DashboardSnapshot::from_history(&records, config)
        .with_pasien(claims.pasien_name)
        .with_bidan(bidan_name);

    Ok(DashboardRefresh {
        snapshot,
        notices: bidan_notice.into_iter().chain(history_notice).collect(),
    })
}

async fn load_bidan<S>(source: &S, token: &str, pasien_id: &str) -> (String, Option<Notice>)
where
    S: DashboardSource + ?Sized,
{
    match source.bidan(token, pasien_id).await {
        Ok(info) => (info.display_name(), None),
        Err(err) => {
            warn!(error = %err, pasien_id, "Failed to load assigned midwife");
            (
                BIDAN_ERROR.to_string(),
                Some(Notice::error("Gagal memuat data bidan.")),
            )
        }
    }
}

async fn load_history<S>(
    source: &S,
    token: &str,
    pasien_id: &str,
) -> (Vec<PartografRecord>, Option<Notice>)
where
    S: DashboardSource + ?Sized,
{
    match source.partograf_history(token, pasien_id).await {
        Ok(records) if records.is_empty() => {
            info!(pasien_id, "Partograph history is empty");
            (
                Vec::new(),
                Some(Notice::info("Data partograf belum tersedia.")),
            )
        }
        Ok(records) => {
            info!(pasien_id, count = records.len(), "Loaded partograph history");
            (records, None)
        }
        Err(err) if err.is_no_partograf() => {
            info!(pasien_id, "No partograph recorded yet");
            (
                Vec::new(),
                Some(Notice::info("Bidan belum mencatat partograf.")),
            )
        }
        Err(err) => {
            warn!(error = %err, pasien_id, "Failed to load partograph history");
            (
                Vec::new(),
                Some(Notice::error(format!("Gagal memuat data partograf: {err}"))),
            )
        }
    }
}

//! Ruang Bunda patient API: response decoding, request validation, and the
//! dashboard refresh routine built on `partograf-core`.

mod claims;
mod config;
mod dashboard;
mod edukasi;
mod envelope;
mod error;
#[cfg(feature = "http")]
mod http;
mod models;
mod source;

use partograf_core::{DashboardSnapshot, PartografConfig, PartografError, PartografRecord};
use serde::Deserialize;
use serde_json::Value;

pub use claims::{decode_claims, TokenClaims, DEFAULT_PASIEN_NAME};
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use dashboard::{refresh, DashboardRefresh, Notice, NoticeLevel};
pub use edukasi::{format_content, Paragraph, Span};
pub use envelope::ApiEnvelope;
pub use error::{ApiError, NO_PARTOGRAF_MARKER};
#[cfg(feature = "http")]
pub use http::HttpClient;
pub use models::{
    BidanInfo, EdukasiContent, KirimPesanRequest, PatientProfile, Pesan, ProfileView,
    UbahPasswordRequest, UbahUsernameRequest, BIDAN_DEFAULT, BIDAN_ERROR, BIDAN_NOT_FOUND,
    MIN_PASSWORD_LEN,
};
pub use source::{DashboardSource, StaticToken, TokenStore};

/// Summarize a partograph history response from a JSON string.
pub fn summarize_history_str(
    history_json: &str,
    config: &PartografConfig,
) -> Result<DashboardSnapshot, PartografError> {
    let value: Value =
        serde_json::from_str(history_json).map_err(|err| PartografError::Parse(err.to_string()))?;
    summarize_history_value(&value, config)
}

/// Summarize a partograph history response from a `serde_json::Value`.
pub fn summarize_history_value(
    history: &Value,
    config: &PartografConfig,
) -> Result<DashboardSnapshot, PartografError> {
    let records = parse_history_value(history)?;
    Ok(DashboardSnapshot::from_history(&records, config))
}

/// Accepts either the bare record array or the `{ "data": [...] }` envelope.
/// A `null` data field is an empty history.
pub fn parse_history_value(history: &Value) -> Result<Vec<PartografRecord>, PartografError> {
    let records = match history {
        Value::Array(_) => history,
        Value::Object(object) => match object.get("data") {
            Some(Value::Null) => return Ok(Vec::new()),
            Some(data) => data,
            None => return Err(PartografError::MissingData),
        },
        other => {
            return Err(PartografError::Parse(format!(
                "Expected an array of partograph records, received {other}"
            )))
        }
    };

    Vec::<PartografRecord>::deserialize(records).map_err(|err| PartografError::Parse(err.to_string()))
}

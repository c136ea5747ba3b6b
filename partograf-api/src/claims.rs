use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ApiError;

/// Greeting name used when the token carries no patient name.
pub const DEFAULT_PASIEN_NAME: &str = "Bunda";

const PASIEN_ID_KEYS: [&str; 5] = ["pasienId", "pasien_id", "id_pasien", "id", "sub"];
const PASIEN_NAME_KEYS: [&str; 6] = [
    "pasienName",
    "pasien_name",
    "nama_pasien",
    "nama",
    "name",
    "username",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    pub pasien_id: String,
    pub pasien_name: String,
}

/// Read the patient id and name from the JWT payload. The signature is not
/// checked; the server does that on every request.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ApiError> {
    let payload = token
        .trim()
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| ApiError::InvalidToken("format JWT tidak dikenali".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| ApiError::InvalidToken(err.to_string()))?;
    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|err| ApiError::InvalidToken(err.to_string()))?;

    let pasien_id = first_claim(&claims, &PASIEN_ID_KEYS)
        .ok_or_else(|| ApiError::InvalidToken("token tidak memuat id pasien".to_string()))?;
    let pasien_name =
        first_claim(&claims, &PASIEN_NAME_KEYS).unwrap_or_else(|| DEFAULT_PASIEN_NAME.to_string());

    Ok(TokenClaims {
        pasien_id,
        pasien_name,
    })
}

fn first_claim(claims: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match claims.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    })
}

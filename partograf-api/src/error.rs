/// Message the server returns when a patient has no partograph yet.
pub const NO_PARTOGRAF_MARKER: &str = "Belum ada catatan partograf";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Token login tidak ditemukan")]
    MissingToken,
    #[error("Token tidak valid: {0}")]
    InvalidToken(String),
    #[error("{0}")]
    Validation(String),
    #[error("Permintaan gagal ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Gagal terhubung ke server: {0}")]
    Transport(String),
    #[error("Format data API tidak sesuai: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A 404, or the server's "no partograph yet" message.
    pub fn is_no_partograf(&self) -> bool {
        match self {
            ApiError::Http { status, message } => {
                *status == 404 || message.contains(NO_PARTOGRAF_MARKER)
            }
            _ => false,
        }
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

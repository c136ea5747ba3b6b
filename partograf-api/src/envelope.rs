use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Common `{ status, message, data }` wrapper used by most endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    pub status: Option<String>,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }

    /// Require `status == "success"` and a `data` payload.
    pub fn into_success_data(self) -> Result<T, ApiError> {
        if !self.is_success() {
            return Err(ApiError::Decode(
                self.message
                    .unwrap_or_else(|| "status respons bukan success".to_string()),
            ));
        }
        self.data
            .ok_or_else(|| ApiError::Decode("respons tidak memuat data".to_string()))
    }
}

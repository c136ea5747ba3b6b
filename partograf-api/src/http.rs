use async_trait::async_trait;
use partograf_core::{PartografError, PartografRecord};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::envelope::ApiEnvelope;
use crate::error::ApiError;
use crate::models::{
    BidanInfo, EdukasiContent, KirimPesanRequest, PatientProfile, Pesan, UbahPasswordRequest,
    UbahUsernameRequest,
};
use crate::parse_history_value;
use crate::source::DashboardSource;

/// Bearer-authenticated client for the patient API.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    config: ClientConfig,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let client = Client::builder().user_agent(&config.user_agent).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Education articles. This endpoint needs no token.
    pub async fn edukasi(&self) -> Result<Vec<EdukasiContent>, ApiError> {
        let request = self
            .client
            .get(self.config.url(&["konten-edukasi"]));
        let envelope: ApiEnvelope<Vec<EdukasiContent>> = self.execute(request).await?;
        envelope.into_success_data()
    }

    pub async fn pesan(&self, token: &str, no_reg: &str, bulan: u32) -> Result<Vec<Pesan>, ApiError> {
        let bulan = bulan.to_string();
        let request = self.authorized(Method::GET, &["pesan", no_reg, bulan.as_str()], token);
        let envelope: ApiEnvelope<Vec<Pesan>> = self.execute(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Returns the server's confirmation message.
    pub async fn kirim_pesan(
        &self,
        token: &str,
        request: &KirimPesanRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(Method::POST, &["pesan", "kirim"], token, request, "Pesan terkirim.")
            .await
    }

    pub async fn profile(&self, token: &str) -> Result<PatientProfile, ApiError> {
        let request = self.authorized(Method::GET, &["profile"], token);
        let envelope: ApiEnvelope<PatientProfile> = self.execute(request).await?;
        envelope.into_success_data()
    }

    pub async fn ubah_username(
        &self,
        token: &str,
        request: &UbahUsernameRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            Method::PUT,
            &["profile"],
            token,
            request,
            "Username berhasil diubah.",
        )
        .await
    }

    pub async fn ubah_password(
        &self,
        token: &str,
        request: &UbahPasswordRequest,
    ) -> Result<String, ApiError> {
        self.send_for_message(
            Method::PUT,
            &["profile", "ubah-password"],
            token,
            request,
            "Password berhasil diubah.",
        )
        .await
    }

    fn authorized(&self, method: Method, segments: &[&str], token: &str) -> RequestBuilder {
        let url = self.config.url(segments);
        debug!(%method, %url, "Calling patient API");
        self.client
            .request(method, url)
            .bearer_auth(token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn send_for_message<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        token: &str,
        body: &B,
        fallback: &str,
    ) -> Result<String, ApiError> {
        let request = self.authorized(method, segments, token).json(body);
        let envelope: ApiEnvelope<Value> = self.execute(request).await?;
        Ok(envelope.message.unwrap_or_else(|| fallback.to_string()))
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        read_body(response).await
    }
}

async fn read_body<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = serde_json::from_str::<ApiEnvelope<Value>>(&text)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });
        warn!(status = status.as_u16(), %message, "Patient API returned an error");
        return Err(ApiError::Http {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))
}

#[async_trait]
impl DashboardSource for HttpClient {
    async fn bidan(&self, token: &str, pasien_id: &str) -> Result<BidanInfo, ApiError> {
        let response = self
            .authorized(Method::GET, &["pasien", pasien_id, "bidanId"], token)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            debug!(status = status.as_u16(), "Midwife lookup returned an error status");
        }
        BidanInfo::from_response(&text)
    }

    async fn partograf_history(
        &self,
        token: &str,
        pasien_id: &str,
    ) -> Result<Vec<PartografRecord>, ApiError> {
        let request = self.authorized(
            Method::GET,
            &["pasien", pasien_id, "progres-persalinan"],
            token,
        );
        let body: Value = self.execute(request).await?;

        match parse_history_value(&body) {
            Ok(records) => Ok(records),
            Err(PartografError::MissingData) => Ok(Vec::new()),
            Err(err) => Err(ApiError::Decode(err.to_string())),
        }
    }
}

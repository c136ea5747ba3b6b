use partograf_core::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::edukasi::{format_content, Paragraph};
use crate::error::ApiError;

pub const BIDAN_DEFAULT: &str = "Bidan";
pub const BIDAN_NOT_FOUND: &str = "Bidan Tidak Ditemukan";
pub const BIDAN_ERROR: &str = "Error Memuat Bidan";

pub const MIN_PASSWORD_LEN: usize = 6;

const NOT_AVAILABLE: &str = "N/A";
const ALAMAT_SHORT_LEN: usize = 20;

/// Response of `pasien/{id}/bidanId`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BidanInfo {
    pub bidan_nama: Option<String>,
}

impl BidanInfo {
    /// Decode the lookup body whatever the HTTP status. An error body such
    /// as a 404 without `bidan_nama` means no midwife is assigned; only a
    /// body that is not JSON is an error.
    pub fn from_response(body: &str) -> Result<Self, ApiError> {
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(object)) => Ok(Self {
                bidan_nama: match object.get("bidan_nama") {
                    Some(Value::String(name)) => Some(name.clone()),
                    _ => None,
                },
            }),
            Ok(_) => Ok(Self::default()),
            Err(err) => Err(ApiError::Decode(err.to_string())),
        }
    }

    /// Name shown on the midwife card. A blank name falls back to a generic
    /// label; an absent or empty one means no midwife is assigned.
    pub fn display_name(&self) -> String {
        match self.bidan_nama.as_deref() {
            None | Some("") => BIDAN_NOT_FOUND.to_string(),
            Some(name) => match name.trim() {
                "" => BIDAN_DEFAULT.to_string(),
                trimmed => trimmed.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    pub username: Option<String>,
    pub no_reg: Option<FieldValue>,
    pub alamat: Option<String>,
    pub umur: Option<FieldValue>,
}

impl PatientProfile {
    pub fn view(&self) -> ProfileView {
        ProfileView {
            username: non_empty(self.username.clone()),
            no_reg: non_empty(self.no_reg.as_ref().map(ToString::to_string)),
            alamat: non_empty(self.alamat.clone()),
            umur: match &self.umur {
                Some(FieldValue::Number(age)) if *age != 0.0 && !age.is_nan() => age.to_string(),
                Some(FieldValue::Text(age)) if !age.is_empty() => age.clone(),
                _ => NOT_AVAILABLE.to_string(),
            },
        }
    }
}

fn non_empty(value: Option<String>) -> String {
    value
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Profile values ready for display, `"N/A"` where missing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProfileView {
    pub username: String,
    pub no_reg: String,
    pub alamat: String,
    pub umur: String,
}

impl ProfileView {
    pub fn umur_text(&self) -> String {
        if self.umur == NOT_AVAILABLE {
            NOT_AVAILABLE.to_string()
        } else {
            format!("{} Tahun", self.umur)
        }
    }

    /// Address cut to fit the two-column layout.
    pub fn alamat_short(&self) -> String {
        if self.alamat.chars().count() > ALAMAT_SHORT_LEN {
            let head: String = self.alamat.chars().take(ALAMAT_SHORT_LEN).collect();
            format!("{head}...")
        } else {
            self.alamat.clone()
        }
    }
}

/// One item from `konten-edukasi`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct EdukasiContent {
    #[serde(default)]
    pub judul_konten: String,
    #[serde(default)]
    pub isi_konten: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdukasiContent {
    pub fn formatted(&self) -> Vec<Paragraph> {
        format_content(&self.isi_konten)
    }
}

/// One message from `pesan/{no_reg}/{bulan}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Pesan {
    #[serde(default)]
    pub isi: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KirimPesanRequest {
    pub no_reg: String,
    pub isi: String,
}

impl KirimPesanRequest {
    pub fn new(no_reg: impl Into<String>, isi: &str) -> Result<Self, ApiError> {
        let isi = isi.trim();
        if isi.is_empty() {
            return Err(ApiError::validation("Pesan tidak boleh kosong."));
        }
        Ok(Self {
            no_reg: no_reg.into(),
            isi: isi.to_string(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UbahUsernameRequest {
    pub username: String,
}

impl UbahUsernameRequest {
    /// `Ok(None)` when the new name equals the current one and nothing needs
    /// to be sent.
    pub fn new(username: &str, current: &str) -> Result<Option<Self>, ApiError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::validation("Username tidak boleh kosong."));
        }
        if username == current {
            return Ok(None);
        }
        Ok(Some(Self {
            username: username.to_string(),
        }))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UbahPasswordRequest {
    pub password_lama: String,
    pub password_baru: String,
    pub password_baru_confirmation: String,
}

impl UbahPasswordRequest {
    pub fn new(lama: &str, baru: &str, konfirmasi: &str) -> Result<Self, ApiError> {
        if lama.is_empty() || baru.is_empty() || konfirmasi.is_empty() {
            return Err(ApiError::validation("Harap isi semua field password."));
        }
        if baru != konfirmasi {
            return Err(ApiError::validation(
                "Password baru dan konfirmasi tidak cocok.",
            ));
        }
        if baru.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::validation(format!(
                "Password baru minimal {MIN_PASSWORD_LEN} karakter."
            )));
        }
        Ok(Self {
            password_lama: lama.to_string(),
            password_baru: baru.to_string(),
            password_baru_confirmation: konfirmasi.to_string(),
        })
    }
}

//! Logika inti dashboard partograf: normalisasi nilai, reduksi catatan terbaru,
//! dan klasifikasi status klinis ibu dan janin.

mod dilation;
mod record;
mod reduce;
mod sanitize;
mod status;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use dilation::{
    dilation_metaphor, dilation_phase, dilation_progress, DilationMetaphor, DilationView,
    DILATION_METAPHORS, FASE_AKTIF, FASE_KALA_II, FASE_LATEN,
};
pub use record::{FieldValue, PartografField, PartografRecord};
pub use reduce::{latest_filled, latest_filled_with};
pub use sanitize::{clean_number_string, extract_time, format_one_decimal, parse_float, MISSING};
pub use status::{
    djj_status, ibu_status, DjjStatus, IbuDetail, IbuIssue, IbuStatus, VitalFlag, DJJ_GAWAT,
    DJJ_NA, DJJ_NORMAL, IBU_BELUM_LENGKAP, IBU_NORMAL, IBU_PERLU_PERHATIAN, IBU_PERLU_WASPADA,
};

/// Aturan pengisian yang berbeda di antara revisi layar lama. Nilai bawaan
/// memakai varian paling ketat.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PartografConfig {
    /// Terima `djj`/`pembukaan_servik` bernilai 0 sebagai terisi.
    pub accept_zero_vitals: bool,
    /// Suhu (°C) di bawah atau sama dengan batas ini dianggap bacaan rusak.
    pub min_valid_suhu: f64,
}

impl Default for PartografConfig {
    fn default() -> Self {
        Self {
            accept_zero_vitals: false,
            min_valid_suhu: 30.0,
        }
    }
}

/// Kategori status, terpisah dari warna tampilan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    Critical,
    Warning,
    Normal,
    Unknown,
}

impl StatusTag {
    /// Warna tampilan bawaan untuk kategori ini.
    pub fn color(self) -> &'static str {
        match self {
            StatusTag::Critical => palette::ACCENT_ERROR,
            StatusTag::Warning => palette::ACCENT_WARNING,
            StatusTag::Normal => palette::ACCENT_SUCCESS,
            StatusTag::Unknown => palette::TEXT_SECONDARY,
        }
    }
}

/// Palet warna aplikasi Ruang Bunda.
pub mod palette {
    pub const PRIMARY_BLUE: &str = "#2196F3";
    pub const ACCENT_SUCCESS: &str = "#4CAF50";
    pub const ACCENT_WARNING: &str = "#FF9800";
    pub const ACCENT_ERROR: &str = "#F44336";
    pub const TEXT_SECONDARY: &str = "#607D8B";
}

/// Nilai tanda vital yang sudah siap tampil.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VitalReadout {
    pub sistolik: String,
    pub diastolik: String,
    pub nadi: String,
    pub suhu: String,
}

impl Default for VitalReadout {
    fn default() -> Self {
        Self {
            sistolik: MISSING.to_string(),
            diastolik: MISSING.to_string(),
            nadi: MISSING.to_string(),
            suhu: MISSING.to_string(),
        }
    }
}

impl VitalReadout {
    fn from_record(record: &PartografRecord) -> Self {
        Self {
            sistolik: clean_number_string(record.sistolik.as_ref(), false),
            diastolik: clean_number_string(record.diastolik.as_ref(), false),
            nadi: clean_number_string(record.nadi_ibu.as_ref(), false),
            suhu: clean_number_string(record.suhu_ibu.as_ref(), true),
        }
    }

    pub fn tensi_text(&self) -> String {
        format!("{}/{} mmHg", self.sistolik, self.diastolik)
    }

    pub fn nadi_text(&self) -> String {
        format!("{} bpm", self.nadi)
    }

    pub fn suhu_text(&self) -> String {
        format!("{} °C", self.suhu)
    }
}

/// Seluruh isi layar utama dalam satu nilai.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardSnapshot {
    pub generated_at: DateTime<Utc>,
    pub pasien_name: Option<String>,
    pub bidan_name: Option<String>,
    pub latest: Option<PartografRecord>,
    pub pembukaan_cm: f64,
    pub djj_bpm: f64,
    pub vitals: VitalReadout,
    pub waktu_catat: String,
    pub jam_catat: String,
    pub djj_status: DjjStatus,
    pub ibu_status: IbuStatus,
    pub dilatasi: DilationView,
}

impl DashboardSnapshot {
    /// Bangun snapshot dari riwayat partograf dengan urutan apa pun.
    pub fn from_history(records: &[PartografRecord], config: &PartografConfig) -> Self {
        Self::from_latest(latest_filled_with(records, config))
    }

    /// Bangun snapshot dari hasil reduksi. `None` menghasilkan keadaan kosong.
    pub fn from_latest(latest: Option<PartografRecord>) -> Self {
        let Some(latest) = latest else {
            return Self::empty();
        };

        let pembukaan_cm = number_or_zero(record::numeric(latest.pembukaan_servik.as_ref()));
        let djj_bpm = number_or_zero(record::numeric(latest.djj.as_ref()));
        let waktu_catat = latest
            .waktu_catat
            .clone()
            .unwrap_or_else(|| MISSING.to_string());

        Self {
            generated_at: Utc::now(),
            pasien_name: None,
            bidan_name: None,
            pembukaan_cm,
            djj_bpm,
            vitals: VitalReadout::from_record(&latest),
            jam_catat: extract_time(Some(waktu_catat.as_str())),
            waktu_catat,
            djj_status: djj_status(Some(djj_bpm)),
            ibu_status: IbuStatus::from_record(&latest),
            dilatasi: DilationView::new(Some(pembukaan_cm)),
            latest: Some(latest),
        }
    }

    /// Keadaan awal ketika belum ada catatan partograf.
    pub fn empty() -> Self {
        Self {
            generated_at: Utc::now(),
            pasien_name: None,
            bidan_name: None,
            latest: None,
            pembukaan_cm: 0.0,
            djj_bpm: 0.0,
            vitals: VitalReadout::default(),
            waktu_catat: MISSING.to_string(),
            jam_catat: MISSING.to_string(),
            djj_status: djj_status(Some(0.0)),
            ibu_status: ibu_status(None, None, None, None),
            dilatasi: DilationView::new(Some(0.0)),
        }
    }

    pub fn with_pasien(mut self, name: impl Into<String>) -> Self {
        self.pasien_name = Some(name.into());
        self
    }

    pub fn with_bidan(mut self, name: impl Into<String>) -> Self {
        self.bidan_name = Some(name.into());
        self
    }

    /// Label fase persalinan untuk kartu bidan.
    pub fn fase(&self) -> &str {
        &self.dilatasi.fase
    }

    pub fn has_data(&self) -> bool {
        self.latest.is_some()
    }
}

// NaN dan nilai kosong menjadi nol.
fn number_or_zero(value: Option<f64>) -> f64 {
    value.filter(|v| !v.is_nan()).unwrap_or(0.0)
}

/// Kesalahan umum saat membaca data partograf.
#[derive(Debug, thiserror::Error)]
pub enum PartografError {
    #[error("Data masukan tidak memuat riwayat partograf")]
    MissingData,
    #[error("Data tidak dapat dibaca: {0}")]
    Parse(String),
}

//! Bentuk catatan partograf seperti yang dikirim API.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::sanitize::parse_float;
use crate::PartografConfig;

/// Nilai mentah satu kolom. API kadang mengirim angka, kadang string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// Konversi longgar dari JSON; `null` berarti tidak dicatat.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Number(number) => number.as_f64().map(FieldValue::Number),
            Value::String(text) => Some(FieldValue::Text(text)),
            other => Some(FieldValue::Text(other.to_string())),
        }
    }

    /// Nilai numerik dengan aturan awalan angka: `"36.5 C"` menjadi `36.5`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            FieldValue::Text(text) => parse_float(text),
        }
    }

    /// `false` untuk string kosong dan penanda `"-"`.
    pub fn is_recorded(&self) -> bool {
        match self {
            FieldValue::Number(number) => !number.is_nan(),
            FieldValue::Text(text) => {
                let trimmed = text.trim();
                !trimmed.is_empty() && trimmed != "-"
            }
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

pub(crate) fn numeric(value: Option<&FieldValue>) -> Option<f64> {
    value.and_then(FieldValue::as_number)
}

/// Kolom yang diisi ulang dari catatan terbaru yang valid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PartografField {
    Djj,
    PembukaanServik,
    PenurunanKepala,
    NadiIbu,
    SuhuIbu,
    Sistolik,
    Diastolik,
    Aseton,
    Protein,
    VolumeUrine,
    AirKetuban,
    Molase,
    ObatCairan,
}

impl PartografField {
    pub const TRACKED: [PartografField; 13] = [
        PartografField::Djj,
        PartografField::PembukaanServik,
        PartografField::PenurunanKepala,
        PartografField::NadiIbu,
        PartografField::SuhuIbu,
        PartografField::Sistolik,
        PartografField::Diastolik,
        PartografField::Aseton,
        PartografField::Protein,
        PartografField::VolumeUrine,
        PartografField::AirKetuban,
        PartografField::Molase,
        PartografField::ObatCairan,
    ];

    /// Nama kolom di JSON API.
    pub fn key(self) -> &'static str {
        match self {
            PartografField::Djj => "djj",
            PartografField::PembukaanServik => "pembukaan_servik",
            PartografField::PenurunanKepala => "penurunan_kepala",
            PartografField::NadiIbu => "nadi_ibu",
            PartografField::SuhuIbu => "suhu_ibu",
            PartografField::Sistolik => "sistolik",
            PartografField::Diastolik => "diastolik",
            PartografField::Aseton => "aseton",
            PartografField::Protein => "protein",
            PartografField::VolumeUrine => "volume_urine",
            PartografField::AirKetuban => "air_ketuban",
            PartografField::Molase => "molase",
            PartografField::ObatCairan => "obat_cairan",
        }
    }

    /// Apakah nilai ini boleh mengisi kolom pada catatan gabungan.
    pub fn accepts(self, value: &FieldValue, config: &PartografConfig) -> bool {
        if !value.is_recorded() {
            return false;
        }

        match self {
            PartografField::Djj | PartografField::PembukaanServik => {
                value.as_number().is_some_and(|number| {
                    if config.accept_zero_vitals {
                        number >= 0.0
                    } else {
                        number > 0.0
                    }
                })
            }
            PartografField::SuhuIbu => value
                .as_number()
                .is_some_and(|number| number > config.min_valid_suhu),
            _ => true,
        }
    }
}

/// Satu baris riwayat partograf. Semua kolom opsional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartografRecord {
    #[serde(default, deserialize_with = "lenient_field")]
    pub partograf_id: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub waktu_catat: Option<String>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub djj: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub pembukaan_servik: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub penurunan_kepala: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub nadi_ibu: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub suhu_ibu: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub sistolik: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub diastolik: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub aseton: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub protein: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub volume_urine: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub air_ketuban: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub molase: Option<FieldValue>,
    #[serde(default, deserialize_with = "lenient_field")]
    pub obat_cairan: Option<FieldValue>,
}

impl PartografRecord {
    pub fn field(&self, field: PartografField) -> Option<&FieldValue> {
        self.slot(field).as_ref()
    }

    pub fn field_mut(&mut self, field: PartografField) -> &mut Option<FieldValue> {
        match field {
            PartografField::Djj => &mut self.djj,
            PartografField::PembukaanServik => &mut self.pembukaan_servik,
            PartografField::PenurunanKepala => &mut self.penurunan_kepala,
            PartografField::NadiIbu => &mut self.nadi_ibu,
            PartografField::SuhuIbu => &mut self.suhu_ibu,
            PartografField::Sistolik => &mut self.sistolik,
            PartografField::Diastolik => &mut self.diastolik,
            PartografField::Aseton => &mut self.aseton,
            PartografField::Protein => &mut self.protein,
            PartografField::VolumeUrine => &mut self.volume_urine,
            PartografField::AirKetuban => &mut self.air_ketuban,
            PartografField::Molase => &mut self.molase,
            PartografField::ObatCairan => &mut self.obat_cairan,
        }
    }

    fn slot(&self, field: PartografField) -> &Option<FieldValue> {
        match field {
            PartografField::Djj => &self.djj,
            PartografField::PembukaanServik => &self.pembukaan_servik,
            PartografField::PenurunanKepala => &self.penurunan_kepala,
            PartografField::NadiIbu => &self.nadi_ibu,
            PartografField::SuhuIbu => &self.suhu_ibu,
            PartografField::Sistolik => &self.sistolik,
            PartografField::Diastolik => &self.diastolik,
            PartografField::Aseton => &self.aseton,
            PartografField::Protein => &self.protein,
            PartografField::VolumeUrine => &self.volume_urine,
            PartografField::AirKetuban => &self.air_ketuban,
            PartografField::Molase => &self.molase,
            PartografField::ObatCairan => &self.obat_cairan,
        }
    }

    /// Waktu pencatatan yang sudah diurai, `None` jika tidak dikenali.
    ///
    /// Semua format dibandingkan sebagai jam dinding yang tertulis. Offset
    /// RFC 3339 dibuang, bukan dikonversi ke UTC, agar catatan berformat
    /// campuran tetap terurut sama seperti jam yang ditampilkan.
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        self.waktu_catat.as_deref().and_then(parse_waktu_catat)
    }
}

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

fn parse_waktu_catat(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn lenient_field<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(FieldValue::from_json))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(FieldValue::from_json).map(|v| v.to_string()))
}

//! Klasifikasi status detak jantung janin (DJJ) dan kondisi ibu.

use serde::{Deserialize, Serialize};

use crate::record::{numeric, PartografRecord};
use crate::sanitize::format_one_decimal;
use crate::StatusTag;

pub const DJJ_NA: &str = "N/A";
pub const DJJ_NORMAL: &str = "Normal";
pub const DJJ_GAWAT: &str = "Gawat Janin";

pub const IBU_BELUM_LENGKAP: &str = "DATA BELUM LENGKAP";
pub const IBU_NORMAL: &str = "NORMAL";
pub const IBU_PERLU_PERHATIAN: &str = "PERLU PERHATIAN";
pub const IBU_PERLU_WASPADA: &str = "PERLU WASPADA";

const DJJ_MIN_NORMAL: f64 = 110.0;
const DJJ_MAX_NORMAL: f64 = 160.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DjjStatus {
    pub text: String,
    pub tag: StatusTag,
    pub color: String,
    pub message: String,
}

impl DjjStatus {
    fn new(text: &str, tag: StatusTag, message: &str) -> Self {
        Self {
            text: text.to_string(),
            tag,
            color: tag.color().to_string(),
            message: message.to_string(),
        }
    }
}

/// Klasifikasi DJJ (bpm). Nilai kosong, NaN, atau 0 berarti belum dicatat.
pub fn djj_status(djj: Option<f64>) -> DjjStatus {
    match djj {
        None => not_recorded(),
        Some(value) if value.is_nan() || value == 0.0 => not_recorded(),
        Some(value) if (DJJ_MIN_NORMAL..=DJJ_MAX_NORMAL).contains(&value) => DjjStatus::new(
            DJJ_NORMAL,
            StatusTag::Normal,
            "Detak jantung janin dalam batas normal (110-160 bpm). Bayi dalam kondisi baik.",
        ),
        Some(_) => DjjStatus::new(
            DJJ_GAWAT,
            StatusTag::Critical,
            "Detak jantung janin di luar batas normal! Segera hubungi bidan atau dokter yang menangani.",
        ),
    }
}

fn not_recorded() -> DjjStatus {
    DjjStatus::new(
        DJJ_NA,
        StatusTag::Unknown,
        "Data detak jantung janin belum tersedia atau belum dicatat oleh bidan.",
    )
}

/// Temuan pada tanda vital ibu.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IbuIssue {
    Fever,
    Hypothermia,
    Hypertension,
    Hypotension,
    Tachycardia,
    Bradycardia,
}

impl IbuIssue {
    pub fn label(self) -> &'static str {
        match self {
            IbuIssue::Fever => "Suhu tubuh tinggi (demam)",
            IbuIssue::Hypothermia => "Suhu tubuh rendah (kemungkinan hipotermia)",
            IbuIssue::Hypertension => "Tekanan darah tinggi (risiko hipertensi/preeklamsia)",
            IbuIssue::Hypotension => "Tekanan darah rendah (hipotensi)",
            IbuIssue::Tachycardia => "Denyut nadi terlalu cepat (takikardia)",
            IbuIssue::Bradycardia => "Denyut nadi terlalu lambat (bradikardia)",
        }
    }

    /// Temuan yang menaikkan status menjadi "PERLU WASPADA".
    pub fn is_urgent(self) -> bool {
        matches!(
            self,
            IbuIssue::Fever | IbuIssue::Hypertension | IbuIssue::Hypotension | IbuIssue::Tachycardia
        )
    }

    pub fn tag(self) -> StatusTag {
        if self.is_urgent() {
            StatusTag::Critical
        } else {
            StatusTag::Warning
        }
    }
}

/// Penanda satu tanda vital yang bermasalah.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VitalFlag {
    pub icon: String,
    pub color: String,
    pub text: String,
}

impl VitalFlag {
    fn new(icon: &str, issue: IbuIssue, text: String) -> Self {
        Self {
            icon: icon.to_string(),
            color: issue.tag().color().to_string(),
            text,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IbuDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensi: Option<VitalFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nadi: Option<VitalFlag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suhu: Option<VitalFlag>,
}

impl IbuDetail {
    pub fn is_empty(&self) -> bool {
        self.tensi.is_none() && self.nadi.is_none() && self.suhu.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IbuStatus {
    pub status: String,
    pub tag: StatusTag,
    pub color: String,
    pub message: String,
    pub issues: Vec<String>,
    #[serde(default)]
    pub findings: Vec<IbuIssue>,
    #[serde(default)]
    pub detail: IbuDetail,
}

impl IbuStatus {
    /// Klasifikasi langsung dari catatan partograf gabungan.
    pub fn from_record(record: &PartografRecord) -> Self {
        ibu_status(
            numeric(record.sistolik.as_ref()),
            numeric(record.diastolik.as_ref()),
            numeric(record.nadi_ibu.as_ref()),
            numeric(record.suhu_ibu.as_ref()),
        )
    }

    pub fn is_complete(&self) -> bool {
        self.tag != StatusTag::Unknown
    }
}

/// Klasifikasi kondisi ibu dari tensi (mmHg), nadi (bpm), dan suhu (°C).
///
/// Setiap pemeriksaan berjalan sendiri, sehingga beberapa temuan dapat
/// muncul bersamaan. Urutan temuan: suhu, tensi, nadi.
pub fn ibu_status(
    sistolik: Option<f64>,
    diastolik: Option<f64>,
    nadi: Option<f64>,
    suhu: Option<f64>,
) -> IbuStatus {
    let known = |value: Option<f64>| value.filter(|v| !v.is_nan());
    let (Some(sistolik), Some(diastolik), Some(nadi), Some(suhu)) =
        (known(sistolik), known(diastolik), known(nadi), known(suhu))
    else {
        return IbuStatus {
            status: IBU_BELUM_LENGKAP.to_string(),
            tag: StatusTag::Unknown,
            color: StatusTag::Unknown.color().to_string(),
            message: "Data tanda-tanda vital ibu belum lengkap. Menunggu pemeriksaan dari bidan."
                .to_string(),
            issues: vec![
                "Tensi, nadi, atau suhu belum dicatat lengkap oleh bidan.".to_string(),
            ],
            findings: Vec::new(),
            detail: IbuDetail::default(),
        };
    };

    let mut findings = Vec::new();
    let mut detail = IbuDetail::default();

    if suhu > 37.5 {
        findings.push(IbuIssue::Fever);
        detail.suhu = Some(VitalFlag::new(
            "thermometer-half",
            IbuIssue::Fever,
            format!("Suhu {} °C, di atas normal (demam)", format_one_decimal(suhu)),
        ));
    } else if suhu < 35.0 {
        findings.push(IbuIssue::Hypothermia);
        detail.suhu = Some(VitalFlag::new(
            "thermometer-half",
            IbuIssue::Hypothermia,
            format!("Suhu {} °C, di bawah normal", format_one_decimal(suhu)),
        ));
    }

    if sistolik > 140.0 || diastolik > 90.0 {
        findings.push(IbuIssue::Hypertension);
        detail.tensi = Some(VitalFlag::new(
            "activity",
            IbuIssue::Hypertension,
            format!("Tensi {sistolik:.0}/{diastolik:.0} mmHg, terlalu tinggi"),
        ));
    } else if sistolik < 90.0 || diastolik < 60.0 {
        findings.push(IbuIssue::Hypotension);
        detail.tensi = Some(VitalFlag::new(
            "activity",
            IbuIssue::Hypotension,
            format!("Tensi {sistolik:.0}/{diastolik:.0} mmHg, terlalu rendah"),
        ));
    }

    if nadi > 120.0 {
        findings.push(IbuIssue::Tachycardia);
        detail.nadi = Some(VitalFlag::new(
            "pulse-outline",
            IbuIssue::Tachycardia,
            format!("Nadi {nadi:.0} bpm, terlalu cepat"),
        ));
    } else if nadi < 50.0 {
        findings.push(IbuIssue::Bradycardia);
        detail.nadi = Some(VitalFlag::new(
            "pulse-outline",
            IbuIssue::Bradycardia,
            format!("Nadi {nadi:.0} bpm, terlalu lambat"),
        ));
    }

    if findings.is_empty() {
        return IbuStatus {
            status: IBU_NORMAL.to_string(),
            tag: StatusTag::Normal,
            color: StatusTag::Normal.color().to_string(),
            message: "Kondisi ibu stabil. Tensi, nadi, dan suhu dalam batas normal.".to_string(),
            issues: Vec::new(),
            findings,
            detail,
        };
    }

    let issues: Vec<String> = findings.iter().map(|issue| issue.label().to_string()).collect();
    let urgent = findings.iter().any(|issue| issue.is_urgent());
    let (status, tag, advice) = if urgent {
        (
            IBU_PERLU_WASPADA,
            StatusTag::Critical,
            "Segera hubungi bidan Anda.",
        )
    } else {
        (
            IBU_PERLU_PERHATIAN,
            StatusTag::Warning,
            "Sampaikan kepada bidan Anda saat pemeriksaan.",
        )
    };

    IbuStatus {
        status: status.to_string(),
        tag,
        color: tag.color().to_string(),
        message: format!(
            "Terdapat {} hal yang perlu diperhatikan: {}. {advice}",
            issues.len(),
            issues.join(", ")
        ),
        issues,
        findings,
        detail,
    }
}

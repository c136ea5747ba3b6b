//! Fase persalinan dan visualisasi pembukaan serviks.

use serde::{Deserialize, Serialize};

pub const FASE_LATEN: &str = "Fase Laten (0-3 cm)";
pub const FASE_AKTIF: &str = "Fase Aktif (4-10 cm)";
pub const FASE_KALA_II: &str = "Kala II (Lengkap)";

/// Fase persalinan dari pembukaan (cm).
///
/// Pembukaan 10 cm tepat masih "Fase Aktif"; tabel metafora memperlakukan
/// 10 cm sebagai Kala II. Keduanya sengaja tidak diturunkan satu dari lainnya.
pub fn dilation_phase(cm: Option<f64>) -> &'static str {
    match cm {
        Some(value) if (4.0..=10.0).contains(&value) => FASE_AKTIF,
        Some(value) if value > 10.0 => FASE_KALA_II,
        _ => FASE_LATEN,
    }
}

/// Satu baris tabel perbandingan ukuran pembukaan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DilationMetaphor {
    pub cm: u8,
    pub phase: &'static str,
    pub metaphor: &'static str,
    pub caption: &'static str,
    pub progress: f64,
}

pub const DILATION_METAPHORS: [DilationMetaphor; 8] = [
    DilationMetaphor {
        cm: 0,
        phase: "Fase Laten",
        metaphor: "Seukuran ujung jari",
        caption: "Tubuh Ibu sedang bersiap. Tetap tenang dan atur napas perlahan.",
        progress: 0.0,
    },
    DilationMetaphor {
        cm: 4,
        phase: "Fase Aktif",
        metaphor: "Seukuran biskuit",
        caption: "Fase aktif sudah dimulai. Tetap bergerak dan cukupi minum.",
        progress: 0.4,
    },
    DilationMetaphor {
        cm: 5,
        phase: "Fase Aktif",
        metaphor: "Seukuran jeruk nipis",
        caption: "Setengah perjalanan sudah dilalui. Terus semangat, Bunda!",
        progress: 0.5,
    },
    DilationMetaphor {
        cm: 6,
        phase: "Fase Aktif",
        metaphor: "Seukuran kue kering",
        caption: "Kontraksi makin teratur, tanda persalinan berjalan baik.",
        progress: 0.6,
    },
    DilationMetaphor {
        cm: 7,
        phase: "Fase Aktif",
        metaphor: "Seukuran tutup kaleng minuman",
        caption: "Sedikit lagi. Ikuti arahan bidan dan atur napas.",
        progress: 0.7,
    },
    DilationMetaphor {
        cm: 8,
        phase: "Fase Aktif",
        metaphor: "Seukuran tomat",
        caption: "Masa transisi. Bunda sangat kuat, si kecil makin dekat.",
        progress: 0.8,
    },
    DilationMetaphor {
        cm: 9,
        phase: "Fase Aktif",
        metaphor: "Seukuran donat",
        caption: "Hampir lengkap. Tahan dorongan mengejan sampai bidan memberi aba-aba.",
        progress: 0.9,
    },
    DilationMetaphor {
        cm: 10,
        phase: "Kala II (Lengkap)",
        metaphor: "Seukuran kepala bayi",
        caption: "Pembukaan lengkap! Saatnya bertemu si kecil bersama bidan.",
        progress: 1.0,
    },
];

/// Pilih baris metafora untuk pembukaan `d` cm.
pub fn dilation_metaphor(d: Option<f64>) -> &'static DilationMetaphor {
    let first = &DILATION_METAPHORS[0];
    let last = &DILATION_METAPHORS[DILATION_METAPHORS.len() - 1];

    let Some(d) = d.filter(|value| !value.is_nan() && *value > 0.0) else {
        return first;
    };
    if d >= 10.0 {
        return last;
    }
    if d < 4.0 {
        return first;
    }

    DILATION_METAPHORS
        .iter()
        .rev()
        .filter(|entry| entry.cm >= 4)
        .find(|entry| f64::from(entry.cm) <= d)
        .unwrap_or(first)
}

/// Nilai cincin progres, `min(d / 10, 1)`.
pub fn dilation_progress(d: Option<f64>) -> f64 {
    match d {
        Some(value) if value > 0.0 => (value / 10.0).min(1.0),
        _ => 0.0,
    }
}

/// Ringkasan siap tampil untuk kartu pembukaan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DilationView {
    pub pembukaan_cm: f64,
    pub fase: String,
    pub threshold_cm: u8,
    pub label: String,
    pub metaphor: String,
    pub caption: String,
    pub progress: f64,
}

impl DilationView {
    pub fn new(cm: Option<f64>) -> Self {
        let entry = dilation_metaphor(cm);
        Self {
            pembukaan_cm: cm.filter(|value| !value.is_nan()).unwrap_or(0.0),
            fase: dilation_phase(cm).to_string(),
            threshold_cm: entry.cm,
            label: entry.phase.to_string(),
            metaphor: entry.metaphor.to_string(),
            caption: entry.caption.to_string(),
            progress: dilation_progress(cm),
        }
    }
}

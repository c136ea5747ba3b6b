//! Gabungkan riwayat partograf menjadi satu catatan "terbaru yang terisi".

use std::cmp::Reverse;

use crate::record::{PartografField, PartografRecord};
use crate::sanitize::MISSING;
use crate::PartografConfig;

/// [`latest_filled_with`] dengan aturan bawaan.
pub fn latest_filled(records: &[PartografRecord]) -> Option<PartografRecord> {
    latest_filled_with(records, &PartografConfig::default())
}

/// Bentuk catatan sintetis dari nilai valid terbaru tiap kolom.
///
/// Catatan diurutkan dari yang terbaru; waktu yang sama mempertahankan urutan
/// asal, dan waktu yang tidak terbaca ditaruh paling akhir. `waktu_catat`
/// hasil selalu milik catatan terbaru, terlepas dari kolom mana yang terisi.
/// Mengembalikan `None` untuk riwayat kosong.
pub fn latest_filled_with(
    records: &[PartografRecord],
    config: &PartografConfig,
) -> Option<PartografRecord> {
    let mut sorted: Vec<&PartografRecord> = records.iter().collect();
    sorted.sort_by_key(|record| Reverse(record.recorded_at()));

    let newest = *sorted.first()?;
    let mut latest = PartografRecord {
        partograf_id: newest.partograf_id.clone(),
        ..PartografRecord::default()
    };

    let mut pending: Vec<PartografField> = PartografField::TRACKED.to_vec();
    for record in &sorted {
        pending.retain(|&field| {
            match record
                .field(field)
                .filter(|value| field.accepts(value, config))
            {
                Some(value) => {
                    *latest.field_mut(field) = Some(value.clone());
                    false
                }
                None => true,
            }
        });

        if pending.is_empty() {
            break;
        }
    }

    latest.waktu_catat = Some(
        newest
            .waktu_catat
            .clone()
            .unwrap_or_else(|| MISSING.to_string()),
    );

    Some(latest)
}

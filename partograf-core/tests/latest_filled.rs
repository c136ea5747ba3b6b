use partograf_core::{
    latest_filled, latest_filled_with, DashboardSnapshot, FieldValue, PartografConfig,
    PartografRecord, DJJ_NA, DJJ_NORMAL, FASE_AKTIF, FASE_LATEN, IBU_BELUM_LENGKAP, IBU_NORMAL,
};
use serde_json::json;

fn record(value: serde_json::Value) -> PartografRecord {
    serde_json::from_value(value).expect("Catatan uji tidak valid")
}

fn text(value: &str) -> Option<FieldValue> {
    Some(FieldValue::from(value))
}

#[test]
fn empty_history_has_no_latest_record() {
    assert_eq!(latest_filled(&[]), None);
}

#[test]
fn falls_back_to_older_valid_value() {
    let records = vec![
        record(json!({ "partograf_id": 1, "waktu_catat": "2025-01-02 08:00:00", "djj": "140" })),
        record(json!({ "partograf_id": 2, "waktu_catat": "2025-01-02 09:30:00", "djj": "" })),
    ];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.djj, text("140"));
    assert_eq!(latest.waktu_catat.as_deref(), Some("2025-01-02 09:30:00"));
    assert_eq!(latest.partograf_id, Some(FieldValue::Number(2.0)));
}

#[test]
fn newest_valid_value_wins_regardless_of_input_order() {
    let records = vec![
        record(json!({ "waktu_catat": "2025-01-02 10:00:00", "nadi_ibu": "88", "sistolik": "-" })),
        record(json!({ "waktu_catat": "2025-01-02 06:00:00", "nadi_ibu": "80", "sistolik": "110" })),
        record(json!({ "waktu_catat": "2025-01-02 12:00:00", "nadi_ibu": null, "sistolik": " " })),
    ];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.nadi_ibu, text("88"));
    assert_eq!(latest.sistolik, text("110"));
    assert_eq!(latest.waktu_catat.as_deref(), Some("2025-01-02 12:00:00"));
}

#[test]
fn zero_dilation_and_low_temperature_are_not_filled() {
    let records = vec![
        record(json!({ "waktu_catat": "2025-01-02 08:00:00", "pembukaan_servik": "5", "suhu_ibu": "36.8", "djj": 138 })),
        record(json!({ "waktu_catat": "2025-01-02 09:00:00", "pembukaan_servik": "0", "suhu_ibu": "3.6", "djj": 0 })),
    ];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.pembukaan_servik, text("5"));
    assert_eq!(latest.suhu_ibu, text("36.8"));
    assert_eq!(latest.djj, Some(FieldValue::Number(138.0)));
}

#[test]
fn config_can_accept_zero_dilation() {
    let records = vec![
        record(json!({ "waktu_catat": "2025-01-02 08:00:00", "pembukaan_servik": "5" })),
        record(json!({ "waktu_catat": "2025-01-02 09:00:00", "pembukaan_servik": "0" })),
    ];
    let config = PartografConfig {
        accept_zero_vitals: true,
        ..PartografConfig::default()
    };

    let latest = latest_filled_with(&records, &config).expect("Harus ada hasil");
    assert_eq!(latest.pembukaan_servik, text("0"));
}

#[test]
fn equal_timestamps_keep_input_order() {
    let records = vec![
        record(json!({ "partograf_id": "a", "waktu_catat": "2025-01-02 08:00:00", "molase": "0" })),
        record(json!({ "partograf_id": "b", "waktu_catat": "2025-01-02 08:00:00", "molase": "1" })),
    ];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.partograf_id, text("a"));
    assert_eq!(latest.molase, text("0"));
}

#[test]
fn unreadable_timestamps_sort_last() {
    let records = vec![
        record(json!({ "waktu_catat": "kemarin", "djj": "150" })),
        record(json!({ "waktu_catat": "2025-01-02T07:00:00", "djj": "130" })),
    ];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.djj, text("130"));
    assert_eq!(latest.waktu_catat.as_deref(), Some("2025-01-02T07:00:00"));
}

#[test]
fn offset_timestamps_compare_by_written_clock() {
    let records = vec![
        record(json!({ "waktu_catat": "2025-01-02 10:00:00", "djj": "130" })),
        record(json!({ "waktu_catat": "2025-01-02T12:00:00+07:00", "djj": "145" })),
    ];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.djj, text("145"));
    assert_eq!(latest.waktu_catat.as_deref(), Some("2025-01-02T12:00:00+07:00"));
    assert_eq!(
        records[1].recorded_at().map(|at| at.to_string()),
        Some("2025-01-02 12:00:00".to_string())
    );
}

#[test]
fn missing_timestamp_falls_back_to_placeholder() {
    let records = vec![record(json!({ "djj": "130" }))];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.waktu_catat.as_deref(), Some("---"));
    assert_eq!(latest.partograf_id, None);
}

#[test]
fn unrecorded_fields_stay_empty() {
    let records = vec![record(json!({ "waktu_catat": "2025-01-02 08:00:00", "aseton": "-" }))];

    let latest = latest_filled(&records).expect("Harus ada hasil");
    assert_eq!(latest.aseton, None);
    assert_eq!(latest.djj, None);
}

#[test]
fn snapshot_from_history() {
    let records = vec![
        record(json!({
            "waktu_catat": "2025-01-02 08:00:00",
            "djj": "142",
            "pembukaan_servik": "6",
            "sistolik": "118",
            "diastolik": "76",
            "nadi_ibu": "84",
            "suhu_ibu": "36.7"
        })),
        record(json!({ "waktu_catat": "2025-01-02 09:15:00", "djj": "-" })),
    ];

    let snapshot = DashboardSnapshot::from_history(&records, &PartografConfig::default());
    assert!(snapshot.has_data());
    assert_eq!(snapshot.djj_bpm, 142.0);
    assert_eq!(snapshot.djj_status.text, DJJ_NORMAL);
    assert_eq!(snapshot.pembukaan_cm, 6.0);
    assert_eq!(snapshot.fase(), FASE_AKTIF);
    assert_eq!(snapshot.dilatasi.threshold_cm, 6);
    assert_eq!(snapshot.vitals.tensi_text(), "118/76 mmHg");
    assert_eq!(snapshot.vitals.suhu_text(), "36.7 °C");
    assert_eq!(snapshot.ibu_status.status, IBU_NORMAL);
    assert_eq!(snapshot.waktu_catat, "2025-01-02 09:15:00");
    assert_eq!(snapshot.jam_catat, "09:15");
}

#[test]
fn empty_snapshot_is_reset_state() {
    let snapshot = DashboardSnapshot::from_history(&[], &PartografConfig::default())
        .with_bidan("Bidan Sari");

    assert!(!snapshot.has_data());
    assert_eq!(snapshot.pembukaan_cm, 0.0);
    assert_eq!(snapshot.djj_bpm, 0.0);
    assert_eq!(snapshot.djj_status.text, DJJ_NA);
    assert_eq!(snapshot.vitals.nadi_text(), "--- bpm");
    assert_eq!(snapshot.waktu_catat, "---");
    assert_eq!(snapshot.jam_catat, "---");
    assert_eq!(snapshot.ibu_status.status, IBU_BELUM_LENGKAP);
    assert_eq!(snapshot.fase(), FASE_LATEN);
    assert_eq!(snapshot.bidan_name.as_deref(), Some("Bidan Sari"));
}

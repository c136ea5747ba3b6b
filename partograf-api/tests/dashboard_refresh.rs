use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use partograf_api::{
    refresh, ApiError, BidanInfo, DashboardSource, NoticeLevel, StaticToken, BIDAN_ERROR,
    BIDAN_NOT_FOUND, DEFAULT_PASIEN_NAME, NO_PARTOGRAF_MARKER,
};
use partograf_core::{PartografConfig, PartografRecord, DJJ_NA, DJJ_NORMAL, FASE_LATEN};
use serde_json::json;

enum Bidan {
    Name(Option<&'static str>),
    Body(&'static str),
    Fail(u16),
}

enum History {
    Records(Vec<PartografRecord>),
    Fail(u16, &'static str),
}

struct FakeSource {
    bidan: Bidan,
    history: History,
    expected_pasien: &'static str,
}

#[async_trait]
impl DashboardSource for FakeSource {
    async fn bidan(&self, token: &str, pasien_id: &str) -> Result<BidanInfo, ApiError> {
        assert!(!token.is_empty());
        assert_eq!(pasien_id, self.expected_pasien);
        match self.bidan {
            Bidan::Name(name) => Ok(BidanInfo {
                bidan_nama: name.map(str::to_string),
            }),
            Bidan::Body(body) => BidanInfo::from_response(body),
            Bidan::Fail(status) => Err(ApiError::Http {
                status,
                message: "Server error".to_string(),
            }),
        }
    }

    async fn partograf_history(
        &self,
        _token: &str,
        pasien_id: &str,
    ) -> Result<Vec<PartografRecord>, ApiError> {
        assert_eq!(pasien_id, self.expected_pasien);
        match &self.history {
            History::Records(records) => Ok(records.clone()),
            History::Fail(status, message) => Err(ApiError::Http {
                status: *status,
                message: message.to_string(),
            }),
        }
    }
}

fn jwt(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

fn records() -> Vec<PartografRecord> {
    serde_json::from_value(json!([
        { "waktu_catat": "2025-01-10 08:00:00", "djj": 138, "pembukaan_servik": "3",
          "nadi_ibu": 84, "suhu_ibu": "36.7", "sistolik": 118, "diastolik": 76 },
        { "waktu_catat": "2025-01-10 09:00:00", "djj": "" }
    ]))
    .expect("Catatan uji tidak valid")
}

fn source(bidan: Bidan, history: History) -> FakeSource {
    FakeSource {
        bidan,
        history,
        expected_pasien: "42",
    }
}

#[tokio::test]
async fn builds_snapshot_from_both_sources() {
    let token = StaticToken::new(jwt(json!({ "pasienId": 42, "nama": "Siti" })));
    let source = source(Bidan::Name(Some("  Bidan Rina  ")), History::Records(records()));

    let result = refresh(&source, &token, &PartografConfig::default())
        .await
        .expect("Refresh harus berhasil");

    assert!(result.notices.is_empty());
    let snapshot = result.snapshot;
    assert_eq!(snapshot.pasien_name.as_deref(), Some("Siti"));
    assert_eq!(snapshot.bidan_name.as_deref(), Some("Bidan Rina"));
    assert_eq!(snapshot.djj_status.text, DJJ_NORMAL);
    assert_eq!(snapshot.waktu_catat, "2025-01-10 09:00:00");
    assert_eq!(snapshot.jam_catat, "09:00");
    assert_eq!(snapshot.fase(), FASE_LATEN);
}

#[tokio::test]
async fn missing_or_blank_token_is_rejected() {
    let source = source(Bidan::Name(None), History::Records(Vec::new()));

    for tokens in [StaticToken::none(), StaticToken::new("   ")] {
        let err = refresh(&source, &tokens, &PartografConfig::default())
            .await
            .expect_err("Token kosong harus ditolak");
        assert!(matches!(err, ApiError::MissingToken));
    }
}

#[tokio::test]
async fn malformed_token_is_rejected() {
    let source = source(Bidan::Name(None), History::Records(Vec::new()));
    let err = refresh(&source, &StaticToken::new("bukan-jwt"), &PartografConfig::default())
        .await
        .expect_err("Token rusak harus ditolak");
    assert!(matches!(err, ApiError::InvalidToken(_)));
}

#[tokio::test]
async fn bidan_failure_does_not_block_partograph() {
    let token = StaticToken::new(jwt(json!({ "sub": "42" })));
    let source = source(Bidan::Fail(500), History::Records(records()));

    let result = refresh(&source, &token, &PartografConfig::default())
        .await
        .expect("Refresh harus berhasil");

    assert_eq!(result.snapshot.bidan_name.as_deref(), Some(BIDAN_ERROR));
    assert_eq!(result.snapshot.pasien_name.as_deref(), Some(DEFAULT_PASIEN_NAME));
    assert!(result.snapshot.has_data());
    assert_eq!(result.notices.len(), 1);
    assert_eq!(result.notices[0].level, NoticeLevel::Error);
}

#[tokio::test]
async fn no_partograph_yet_is_informational() {
    let token = StaticToken::new(jwt(json!({ "pasien_id": "42" })));

    for history in [
        History::Fail(404, "Not Found"),
        History::Fail(400, NO_PARTOGRAF_MARKER),
        History::Records(Vec::new()),
    ] {
        let source = source(Bidan::Name(None), history);
        let result = refresh(&source, &token, &PartografConfig::default())
            .await
            .expect("Refresh harus berhasil");

        assert_eq!(result.snapshot.bidan_name.as_deref(), Some(BIDAN_NOT_FOUND));
        assert!(!result.snapshot.has_data());
        assert_eq!(result.snapshot.djj_status.text, DJJ_NA);
        assert_eq!(result.notices.len(), 1);
        assert_eq!(result.notices[0].level, NoticeLevel::Info);
    }
}

#[tokio::test]
async fn other_partograph_failure_resets_to_empty_with_error() {
    let token = StaticToken::new(jwt(json!({ "id": 42 })));
    let source = source(
        Bidan::Name(Some("Bidan Ani")),
        History::Fail(500, "Internal Server Error"),
    );

    let result = refresh(&source, &token, &PartografConfig::default())
        .await
        .expect("Refresh harus berhasil");

    assert!(!result.snapshot.has_data());
    assert_eq!(result.snapshot.pembukaan_cm, 0.0);
    assert_eq!(result.snapshot.vitals.tensi_text(), "---/--- mmHg");
    assert_eq!(result.notices.len(), 1);
    assert_eq!(result.notices[0].level, NoticeLevel::Error);
    assert!(result.notices[0].message.contains("Internal Server Error"));
}

#[tokio::test]
async fn unassigned_midwife_error_body_is_not_found() {
    let token = StaticToken::new(jwt(json!({ "pasienId": "42" })));
    let source = source(
        Bidan::Body(r#"{"status":"error","message":"Bidan belum ditugaskan"}"#),
        History::Records(records()),
    );

    let result = refresh(&source, &token, &PartografConfig::default())
        .await
        .expect("Refresh harus berhasil");

    assert_eq!(result.snapshot.bidan_name.as_deref(), Some(BIDAN_NOT_FOUND));
    assert!(result.notices.is_empty());
}

#[tokio::test]
async fn unreadable_midwife_body_is_an_error() {
    let token = StaticToken::new(jwt(json!({ "pasienId": "42" })));
    let source = source(Bidan::Body("<html>502</html>"), History::Records(records()));

    let result = refresh(&source, &token, &PartografConfig::default())
        .await
        .expect("Refresh harus berhasil");

    assert_eq!(result.snapshot.bidan_name.as_deref(), Some(BIDAN_ERROR));
    assert_eq!(result.notices.len(), 1);
    assert_eq!(result.notices[0].level, NoticeLevel::Error);
}

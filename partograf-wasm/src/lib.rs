//! Jembatan WASM <-> JavaScript untuk layar Ruang Bunda.

use partograf_core::{FieldValue, PartografConfig, PartografError};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
struct JsPartografConfig {
    #[serde(default)]
    accept_zero_vitals: Option<bool>,
    #[serde(default)]
    min_valid_suhu: Option<f64>,
}

impl From<JsPartografConfig> for PartografConfig {
    fn from(cfg: JsPartografConfig) -> Self {
        let mut base = PartografConfig::default();
        if let Some(accept) = cfg.accept_zero_vitals {
            base.accept_zero_vitals = accept;
        }
        if let Some(suhu) = cfg.min_valid_suhu {
            base.min_valid_suhu = suhu;
        }
        base
    }
}

#[wasm_bindgen]
pub fn clean_number_string(value: JsValue, is_decimal: bool) -> Result<String, JsValue> {
    let value = field_arg(value)?;
    Ok(partograf_core::clean_number_string(value.as_ref(), is_decimal))
}

#[wasm_bindgen]
pub fn extract_time(date_time: Option<String>) -> String {
    partograf_core::extract_time(date_time.as_deref())
}

/// Catatan gabungan terbaru, atau `undefined` untuk riwayat kosong.
#[wasm_bindgen]
pub fn latest_filled_partograf(
    records: JsValue,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    init_panic_hook();

    let records = history_arg(records)?;
    let cfg = config_arg(config)?;
    serialize(&partograf_core::latest_filled_with(&records, &cfg))
}

#[wasm_bindgen]
pub fn djj_status(djj: JsValue) -> Result<JsValue, JsValue> {
    serialize(&partograf_core::djj_status(number_arg(djj)?))
}

#[wasm_bindgen]
pub fn ibu_status(
    sistolik: JsValue,
    diastolik: JsValue,
    nadi: JsValue,
    suhu: JsValue,
) -> Result<JsValue, JsValue> {
    serialize(&partograf_core::ibu_status(
        number_arg(sistolik)?,
        number_arg(diastolik)?,
        number_arg(nadi)?,
        number_arg(suhu)?,
    ))
}

#[wasm_bindgen]
pub fn dilation_phase(cm: JsValue) -> Result<String, JsValue> {
    Ok(partograf_core::dilation_phase(number_arg(cm)?).to_string())
}

#[wasm_bindgen]
pub fn dilation_view(cm: JsValue) -> Result<JsValue, JsValue> {
    serialize(&partograf_core::DilationView::new(number_arg(cm)?))
}

/// Snapshot layar utama dari respons riwayat partograf (array atau envelope).
#[wasm_bindgen]
pub fn summarize_history(history: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    init_panic_hook();

    let history_value = from_value::<serde_json::Value>(history)
        .map_err(|err| JsValue::from_str(&format!("JSON riwayat tidak terbaca: {err}")))?;
    let cfg = config_arg(config)?;

    let snapshot = partograf_api::summarize_history_value(&history_value, &cfg)
        .map_err(|err| JsValue::from_str(&format_partograf_error(err)))?;

    serialize(&snapshot)
}

#[wasm_bindgen]
pub fn format_edukasi(body: &str) -> Result<JsValue, JsValue> {
    serialize(&partograf_api::format_content(body))
}

fn init_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

// `null`/`undefined` berarti tidak dicatat.
fn field_arg(value: JsValue) -> Result<Option<FieldValue>, JsValue> {
    let value = from_value::<Option<serde_json::Value>>(value)
        .map_err(|err| JsValue::from_str(&format!("Nilai tidak terbaca: {err}")))?;
    Ok(value.and_then(FieldValue::from_json))
}

fn number_arg(value: JsValue) -> Result<Option<f64>, JsValue> {
    Ok(field_arg(value)?.and_then(|field| field.as_number()))
}

fn history_arg(records: JsValue) -> Result<Vec<partograf_core::PartografRecord>, JsValue> {
    let value = from_value::<serde_json::Value>(records)
        .map_err(|err| JsValue::from_str(&format!("JSON riwayat tidak terbaca: {err}")))?;
    match partograf_api::parse_history_value(&value) {
        Ok(records) => Ok(records),
        Err(PartografError::MissingData) => Ok(Vec::new()),
        Err(err) => Err(JsValue::from_str(&format_partograf_error(err))),
    }
}

fn config_arg(config: Option<JsValue>) -> Result<PartografConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsPartografConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Config tidak terbaca: {err}")))?;
            Ok(PartografConfig::from(cfg))
        }
        _ => Ok(PartografConfig::default()),
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    to_value(value).map_err(|err| JsValue::from_str(&format!("Gagal serialisasi hasil: {err}")))
}

fn format_partograf_error(err: PartografError) -> String {
    format!("Partograf error: {err}")
}

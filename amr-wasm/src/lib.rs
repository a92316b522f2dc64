//! Bridge WASM <-> JavaScript trung lập framework cho dashboard kháng kháng sinh.

use amr_core::{Dashboard, DashboardConfig, DashboardPhase, DashboardView, Figure, PartialConfig};
use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

/// Dữ liệu trả về cho JS sau mỗi lần tính lại.
#[derive(Serialize)]
struct JsDashboardView<'a> {
    #[serde(flatten)]
    view: &'a DashboardView,
    figures: Vec<Figure>,
}

/// Phiên dashboard giữ ở phía WASM; JS chỉ gọi các thao tác lọc.
#[wasm_bindgen]
pub struct DashboardHandle {
    inner: Dashboard,
}

#[wasm_bindgen]
impl DashboardHandle {
    /// Nạp CSV. Lỗi nạp không ném ra mà chuyển dashboard sang trạng thái lỗi.
    #[wasm_bindgen(constructor)]
    pub fn load(csv_text: &str, config: Option<JsValue>) -> Result<DashboardHandle, JsValue> {
        #[cfg(target_arch = "wasm32")]
        console_error_panic_hook::set_once();

        let config = parse_config(config)?;
        let outcome = amr_csv::load_records_str(csv_text, &config);
        let mut inner = Dashboard::new(config);
        inner.complete_load(outcome);
        Ok(DashboardHandle { inner })
    }

    /// Thông báo lỗi cố định nếu nạp thất bại, ngược lại `undefined`.
    #[wasm_bindgen(js_name = errorMessage)]
    pub fn error_message(&self) -> Option<String> {
        match self.inner.phase() {
            DashboardPhase::Error { message, .. } => Some(message.clone()),
            _ => None,
        }
    }

    #[wasm_bindgen(js_name = errorDetail)]
    pub fn error_detail(&self) -> Option<String> {
        match self.inner.phase() {
            DashboardPhase::Error { detail, .. } => Some(detail.clone()),
            _ => None,
        }
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.view())
    }

    #[wasm_bindgen(js_name = setSpecimen)]
    pub fn set_specimen(&mut self, value: Option<String>) -> Result<JsValue, JsValue> {
        to_js(self.inner.set_specimen_dropdown(value.as_deref()))
    }

    #[wasm_bindgen(js_name = setGender)]
    pub fn set_gender(&mut self, value: Option<String>) -> Result<JsValue, JsValue> {
        to_js(self.inner.set_gender(value.as_deref()))
    }

    #[wasm_bindgen(js_name = setOutcome)]
    pub fn set_outcome(&mut self, value: Option<String>) -> Result<JsValue, JsValue> {
        to_js(self.inner.set_outcome(value.as_deref()))
    }

    /// Gọi từ sự kiện `plotly_click` của biểu đồ tròn.
    #[wasm_bindgen(js_name = toggleCrossFilter)]
    pub fn toggle_cross_filter(&mut self, specimen_type: &str) -> Result<JsValue, JsValue> {
        to_js(self.inner.toggle_cross_filter(specimen_type))
    }

    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        to_js(self.inner.reset())
    }
}

/// Đọc cấu hình một phần từ JS; trường thiếu dùng giá trị mặc định.
fn parse_config(config: Option<JsValue>) -> Result<DashboardConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: PartialConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(DashboardConfig::from(cfg))
        }
        _ => Ok(DashboardConfig::default()),
    }
}

fn to_js(view: Option<DashboardView>) -> Result<JsValue, JsValue> {
    let Some(view) = view else {
        return Ok(JsValue::NULL);
    };
    let payload = JsDashboardView {
        figures: view.figures(),
        view: &view,
    };
    payload
        .serialize(&Serializer::json_compatible())
        .map_err(|err| JsValue::from_str(&format!("Không serialize dashboard: {err}")))
}

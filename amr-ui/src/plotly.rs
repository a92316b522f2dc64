#![cfg(target_arch = "wasm32")]

use amr_core::{ChartSurface, DashboardView};
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

const CLICK_EVENT: &str = "plotly_click";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly, js_name = newPlot, catch)]
    fn new_plot(target: &str, data: JsValue, layout: JsValue) -> Result<JsValue, JsValue>;

    /// Phần tử DOM đã được Plotly gắn thêm bộ phát sự kiện.
    type GraphDiv;

    #[wasm_bindgen(method)]
    fn on(this: &GraphDiv, event: &str, handler: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(method, js_name = removeAllListeners)]
    fn remove_all_listeners(this: &GraphDiv, event: &str);
}

#[derive(Deserialize)]
struct ClickEvent {
    #[serde(default)]
    points: Vec<ClickPoint>,
}

#[derive(Deserialize)]
struct ClickPoint {
    #[serde(default)]
    label: Option<String>,
}

/// Vẽ lại cả bốn biểu đồ và gắn sự kiện click cho biểu đồ tròn.
pub fn draw_view(
    document: &Document,
    view: &DashboardView,
    on_pie_click: &Closure<dyn FnMut(JsValue)>,
) -> Result<(), JsValue> {
    let serializer = Serializer::json_compatible();
    let pie_target = ChartSurface::SpecimenPie.element_id();

    for figure in view.figures() {
        let data = figure
            .data
            .serialize(&serializer)
            .map_err(|err| JsValue::from_str(&format!("Không serialize series: {err}")))?;
        let layout = figure
            .layout
            .serialize(&serializer)
            .map_err(|err| JsValue::from_str(&format!("Không serialize layout: {err}")))?;
        new_plot(&figure.target, data, layout)?;

        if figure.target != pie_target {
            continue;
        }
        let Some(element) = document.get_element_by_id(pie_target) else {
            continue;
        };
        let graph: GraphDiv = element.unchecked_into();
        graph.remove_all_listeners(CLICK_EVENT);
        if !figure.is_placeholder() {
            graph.on(CLICK_EVENT, on_pie_click);
        }
    }

    Ok(())
}

/// Nhãn lát bánh được bấm, lấy từ `event.points[0].label`.
pub fn clicked_label(event: JsValue) -> Option<String> {
    let event: ClickEvent = from_value(event).ok()?;
    event.points.into_iter().next()?.label
}

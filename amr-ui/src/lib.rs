//! Thành phần giao diện dashboard kháng kháng sinh cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod plotly;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use amr_core::{
        ChartSurface, Dashboard, DashboardConfig, DashboardError, DashboardPhase, DashboardView,
        FilterOptions, PartialConfig, SelectValues,
    };
    use amr_core::filter::{GENDER_SELECT_ID, OUTCOME_SELECT_ID, SPECIMEN_SELECT_ID};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::{console, Document, Element, HtmlSelectElement, Window};
    use yew::prelude::*;
    use yew::TargetCast;

    use crate::{plotly, styles};

    /// Nguồn dữ liệu do trang chủ cung cấp sau khi fetch file CSV.
    #[derive(Clone, PartialEq)]
    pub enum DataSource {
        Csv(AttrValue),
        /// Fetch thất bại; chuỗi là chi tiết lỗi để ghi ra console.
        Failed(AttrValue),
    }

    #[derive(Properties, PartialEq)]
    pub struct DashboardAppProps {
        pub source: DataSource,
        pub config: DashboardConfig,
    }

    enum FilterAction {
        Specimen(Option<String>),
        Gender(Option<String>),
        Outcome(Option<String>),
        CrossFilter(String),
        Reset,
    }

    #[function_component(DashboardApp)]
    fn dashboard_app(props: &DashboardAppProps) -> Html {
        let dashboard = {
            let source = props.source.clone();
            let config = props.config.clone();
            use_mut_ref(move || {
                let outcome = match &source {
                    DataSource::Csv(text) => amr_csv::load_records_str(text, &config),
                    DataSource::Failed(detail) => Err(DashboardError::Io(
                        std::io::Error::other(detail.to_string()),
                    )),
                };
                let mut dashboard = Dashboard::new(config);
                dashboard.complete_load(outcome);
                dashboard
            })
        };

        let view = {
            let dashboard = dashboard.clone();
            use_state(move || {
                let view = dashboard.borrow().view();
                view
            })
        };
        let phase = dashboard.borrow().phase().clone();

        {
            let phase = phase.clone();
            use_effect_with((), move |_| {
                if let Some(document) = web_sys::window().and_then(|window| window.document()) {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
                if let DashboardPhase::Error { detail, .. } = &phase {
                    console::error_1(&JsValue::from_str(detail));
                }
                || ()
            });
        }

        let apply = {
            let dashboard = dashboard.clone();
            let view = view.clone();
            Callback::from(move |action: FilterAction| {
                let next = {
                    let mut dashboard = dashboard.borrow_mut();
                    match action {
                        FilterAction::Specimen(value) => {
                            dashboard.set_specimen_dropdown(value.as_deref())
                        }
                        FilterAction::Gender(value) => dashboard.set_gender(value.as_deref()),
                        FilterAction::Outcome(value) => dashboard.set_outcome(value.as_deref()),
                        FilterAction::CrossFilter(label) => dashboard.toggle_cross_filter(&label),
                        FilterAction::Reset => dashboard.reset(),
                    }
                };
                if next.is_some() {
                    view.set(next);
                }
            })
        };

        let pie_click = use_mut_ref(|| None::<Closure<dyn FnMut(JsValue)>>);
        {
            let apply = apply.clone();
            use_effect_with((*view).clone(), move |view| {
                if let Some(view) = view {
                    draw_charts(view, &pie_click, apply);
                }
                || ()
            });
        }

        // Thuộc tính `selected` không ghi đè lựa chọn tay, nên gán `value` sau mỗi lần render.
        {
            let values = (*view).as_ref().map(DashboardView::select_values);
            use_effect(move || {
                if let Some(values) = values {
                    sync_selects(&values);
                }
                || ()
            });
        }

        match phase {
            DashboardPhase::Loading => html! {
                <div class="amr-root">
                    <p class="amr-loading">{"Loading isolate data..."}</p>
                </div>
            },
            DashboardPhase::Error { message, .. } => html! {
                <div class="amr-root">
                    <header class="amr-header">
                        <h1 class="amr-error">{ message }</h1>
                    </header>
                </div>
            },
            DashboardPhase::Ready => match (*view).as_ref() {
                Some(view) => render_ready(view, apply),
                None => Html::default(),
            },
        }
    }

    fn draw_charts(
        view: &DashboardView,
        pie_click: &std::rc::Rc<std::cell::RefCell<Option<Closure<dyn FnMut(JsValue)>>>>,
        apply: Callback<FilterAction>,
    ) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };

        let mut slot = pie_click.borrow_mut();
        let handler = slot.get_or_insert_with(|| {
            Closure::wrap(Box::new(move |event: JsValue| {
                if let Some(label) = plotly::clicked_label(event) {
                    apply.emit(FilterAction::CrossFilter(label));
                }
            }) as Box<dyn FnMut(JsValue)>)
        });

        if let Err(err) = plotly::draw_view(&document, view, handler) {
            console::error_1(&err);
        }
    }

    fn sync_selects(values: &SelectValues) {
        let Some(document) = web_sys::window().and_then(|window| window.document()) else {
            return;
        };
        for (id, value) in values.entries() {
            let Some(select) = document
                .get_element_by_id(id)
                .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
            else {
                continue;
            };
            if select.value() != value {
                select.set_value(value);
            }
        }
    }

    fn render_ready(view: &DashboardView, apply: Callback<FilterAction>) -> Html {
        let options = &view.options;
        let selected = view.select_values();
        let on_reset = {
            let apply = apply.clone();
            Callback::from(move |_: MouseEvent| apply.emit(FilterAction::Reset))
        };

        html! {
            <div class="amr-root">
                <header class="amr-header">
                    <h1>{"Antibiotic Resistance Surveillance"}</h1>
                </header>
                <section class="amr-filters" aria-label="Filters">
                    { render_select(
                        SPECIMEN_SELECT_ID,
                        "Specimen type",
                        &options.specimen_types,
                        &selected.specimen,
                        apply.reform(FilterAction::Specimen),
                    ) }
                    { render_select(
                        GENDER_SELECT_ID,
                        "Gender",
                        &options.genders,
                        &selected.gender,
                        apply.reform(FilterAction::Gender),
                    ) }
                    { render_select(
                        OUTCOME_SELECT_ID,
                        "Outcome",
                        &options.outcomes,
                        &selected.outcome,
                        apply.reform(FilterAction::Outcome),
                    ) }
                    <button type="button" class="amr-reset" onclick={on_reset}>{"Reset filters"}</button>
                </section>
                <section class="amr-kpis" aria-live="polite">
                    { render_kpi("kpi-total", "Total isolates", &view.kpi_text.total) }
                    { render_kpi("kpi-resistance-rate", "Average resistance", &view.kpi_text.resistance_rate) }
                    { render_kpi("kpi-mdro-count", "MDRO isolates", &view.kpi_text.mdro_count) }
                </section>
                <section class="amr-charts">
                    { for ChartSurface::ALL.into_iter().map(render_surface) }
                </section>
            </div>
        }
    }

    fn render_select(
        id: &'static str,
        label: &'static str,
        values: &[String],
        selected: &str,
        on_change: Callback<Option<String>>,
    ) -> Html {
        let onchange = Callback::from(move |event: Event| {
            let select: HtmlSelectElement = event.target_unchecked_into();
            let value = select.value();
            on_change.emit((!value.is_empty()).then_some(value));
        });

        html! {
            <label class="amr-filter">
                <span>{ label }</span>
                <select id={id} {onchange}>
                    <option value="" selected={selected.is_empty()}>{ FilterOptions::ALL_LABEL }</option>
                    {
                        for values.iter().map(|value| html! {
                            <option value={value.clone()} selected={value.as_str() == selected}>
                                { value.clone() }
                            </option>
                        })
                    }
                </select>
            </label>
        }
    }

    fn render_kpi(id: &'static str, label: &'static str, value: &str) -> Html {
        html! {
            <div class="amr-kpi">
                <span class="amr-kpi-label">{ label }</span>
                <span class="amr-kpi-value" id={id}>{ value.to_string() }</span>
            </div>
        }
    }

    fn render_surface(surface: ChartSurface) -> Html {
        let wide = surface == ChartSurface::AntibiogramHeatmap;
        html! {
            <div class={classes!("amr-chart", wide.then_some("is-wide"))} id={surface.element_id()}></div>
        }
    }

    fn mount_root(selector: &str) -> Result<Element, JsValue> {
        let window: Window =
            web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("Không truy cập được document"))?;

        document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("Selector lỗi: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("Không tìm thấy element theo selector"))
    }

    fn render(selector: &str, props: DashboardAppProps) -> Result<(), JsValue> {
        let target = mount_root(selector)?;
        yew::Renderer::<DashboardApp>::with_root_and_props(target, props).render();
        Ok(())
    }

    #[wasm_bindgen]
    pub fn mount_dashboard(
        selector: &str,
        csv_text: String,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        let config = match config {
            Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
                let cfg: PartialConfig = from_value(js_cfg)?;
                DashboardConfig::from(cfg)
            }
            _ => DashboardConfig::default(),
        };

        render(
            selector,
            DashboardAppProps {
                source: DataSource::Csv(csv_text.into()),
                config,
            },
        )
    }

    /// Hiển thị thông báo lỗi cố định khi trang chủ không fetch được file CSV.
    #[wasm_bindgen]
    pub fn mount_load_error(selector: &str, detail: String) -> Result<(), JsValue> {
        render(
            selector,
            DashboardAppProps {
                source: DataSource::Failed(detail.into()),
                config: DashboardConfig::default(),
            },
        )
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{mount_dashboard, mount_load_error};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_dashboard(
    _: &str,
    _: String,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(unsupported_target())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_load_error(_: &str, _: String) -> Result<(), wasm_bindgen::JsValue> {
    Err(unsupported_target())
}

#[cfg(not(target_arch = "wasm32"))]
fn unsupported_target() -> wasm_bindgen::JsValue {
    wasm_bindgen::JsValue::from_str("amr-ui chỉ hỗ trợ biên dịch target wasm32")
}

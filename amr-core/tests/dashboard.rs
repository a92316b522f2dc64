use amr_core::filter::{GENDER_SELECT_ID, OUTCOME_SELECT_ID, SPECIMEN_SELECT_ID};
use amr_core::{
    normalize_row, ChartSurface, Dashboard, DashboardConfig, DashboardError, DashboardPhase,
    FilterSelection, IsolateRecord, RawRow, SelectValues, LOAD_ERROR_MESSAGE,
};
use serde_json::json;

fn record(id: &str, specimen: &str, gender: &str, outcome: &str, amoxicillin: &str) -> IsolateRecord {
    let row: RawRow = [
        ("Patient_ID", id),
        ("Age", "55"),
        ("Specimen_Type", specimen),
        ("Gender", gender),
        ("Outcome", outcome),
        ("Amoxicillin", amoxicillin),
    ]
    .into_iter()
    .collect();
    normalize_row(&row, &DashboardConfig::default()).expect("Thiếu Patient_ID")
}

fn ready_dashboard() -> Dashboard {
    Dashboard::with_records(
        DashboardConfig::default(),
        vec![
            record("P1", "Blood", "Male", "Recovered", "Resistant"),
            record("P2", "Urine", "Female", "Deceased", "Susceptible"),
            record("P3", "Wound", "Female", "Recovered", "Intermediate"),
        ],
    )
}

#[test]
fn loading_ignores_interaction() {
    let mut dashboard = Dashboard::new(DashboardConfig::default());
    assert_eq!(dashboard.phase(), &DashboardPhase::Loading);
    assert!(dashboard.set_gender(Some("Male")).is_none());
    assert!(dashboard.view().is_none());
    assert_eq!(dashboard.filters(), &FilterSelection::default());
}

#[test]
fn load_happens_only_once() {
    let mut dashboard = ready_dashboard();
    assert!(dashboard.is_ready());
    assert!(dashboard.complete_load(Ok(Vec::new())).is_none());
    assert_eq!(dashboard.records().len(), 3);
}

#[test]
fn failed_load_is_terminal() {
    let mut dashboard = Dashboard::new(DashboardConfig::default());
    let view = dashboard.complete_load(Err(DashboardError::Parse("bad csv".to_string())));
    assert!(view.is_none());

    match dashboard.phase() {
        DashboardPhase::Error { message, detail } => {
            assert_eq!(message, LOAD_ERROR_MESSAGE);
            assert!(detail.contains("bad csv"));
        }
        other => panic!("Trạng thái không mong đợi: {other:?}"),
    }

    assert!(dashboard.complete_load(Ok(Vec::new())).is_none());
    assert!(dashboard.reset().is_none());
}

#[test]
fn invalid_config_fails_load() {
    let config = DashboardConfig {
        antibiotics: Vec::new(),
        ..DashboardConfig::default()
    };
    let dashboard = Dashboard::with_records(config, Vec::new());
    assert!(matches!(dashboard.phase(), DashboardPhase::Error { .. }));
}

#[test]
fn each_mutation_recomputes_everything() {
    let mut dashboard = ready_dashboard();
    let initial = dashboard.view().expect("Dashboard chưa sẵn sàng");
    assert_eq!(initial.kpis.total, 3);
    assert_eq!(initial.kpi_text.total, "3");
    assert_eq!(initial.options.specimen_types, ["Blood", "Urine", "Wound"]);

    let view = dashboard.set_gender(Some("Female")).expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.kpis.total, 2);
    assert_eq!(view.kpi_text.resistance_rate, "0.00%");
    assert_eq!(view.figures().len(), 4);

    let view = dashboard.set_outcome(Some("Nope")).expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.kpis.total, 0);
    assert!(view.charts.iter().all(|(_, chart)| chart.is_empty()));
    assert!(view.figures().iter().all(|figure| figure.is_placeholder()));
}

#[test]
fn pie_click_cross_filters_and_syncs_dropdown() {
    let mut dashboard = ready_dashboard();
    dashboard.set_specimen_dropdown(Some("Urine"));

    let view = dashboard.toggle_cross_filter("Blood").expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.displayed_specimen, "Blood");
    assert_eq!(view.kpis.total, 1);
    assert_eq!(view.kpi_text.resistance_rate, "20.00%");
    assert_eq!(
        view.charts.get(ChartSurface::AntibiogramHeatmap).title(),
        "Percentage Resistance by Antibiotic (Specimen: Blood)"
    );

    let view = dashboard.toggle_cross_filter("Blood").expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.displayed_specimen, "Urine");
    assert_eq!(view.kpis.total, 1);
}

#[test]
fn reset_restores_full_set() {
    let mut dashboard = ready_dashboard();
    dashboard.set_gender(Some("Male"));
    dashboard.toggle_cross_filter("Wound");

    let view = dashboard.reset().expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.filters, FilterSelection::default());
    assert_eq!(view.displayed_specimen, "");
    assert_eq!(view.kpis.total, 3);
    assert_eq!(dashboard.filtered().len(), dashboard.records().len());
}

#[test]
fn figures_target_their_surfaces() {
    let dashboard = ready_dashboard();
    let view = dashboard.view().expect("Dashboard chưa sẵn sàng");
    let targets: Vec<String> = view.figures().into_iter().map(|f| f.target).collect();
    assert_eq!(
        targets,
        [
            "antibiogram-heatmap",
            "specimen-pie-chart",
            "outcome-stacked-bar-chart",
            "age-box-plot"
        ]
    );

    let pie = &view.figures()[1];
    assert_eq!(pie.data[0]["labels"][0], "Blood");
    assert_eq!(pie.data[0]["type"], "pie");
}

#[test]
fn select_values_follow_effective_filter_after_cross_filter_round_trip() {
    let mut dashboard = ready_dashboard();
    dashboard.set_specimen_dropdown(Some("Blood"));

    let view = dashboard.toggle_cross_filter("Urine").expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.select_values().specimen, "Urine");

    let view = dashboard.toggle_cross_filter("Urine").expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.select_values().specimen, "Blood");
    assert_eq!(view.kpis.total, 1);
    assert!(dashboard.filtered().iter().all(|r| r.specimen_type == "Blood"));
}

#[test]
fn select_values_are_cleared_by_reset() {
    let mut dashboard = ready_dashboard();
    dashboard.set_gender(Some("Female"));
    dashboard.set_outcome(Some("Recovered"));
    let view = dashboard.toggle_cross_filter("Wound").expect("Dashboard chưa sẵn sàng");
    assert_eq!(
        view.select_values().entries(),
        [
            (SPECIMEN_SELECT_ID, "Wound"),
            (GENDER_SELECT_ID, "Female"),
            (OUTCOME_SELECT_ID, "Recovered"),
        ]
    );

    let view = dashboard.reset().expect("Dashboard chưa sẵn sàng");
    assert_eq!(view.select_values(), SelectValues::default());
}

#[test]
fn heatmap_figure_has_one_row_of_rounded_rates() {
    let dashboard = ready_dashboard();
    let figures = dashboard.view().expect("Dashboard chưa sẵn sàng").figures();
    let heatmap = &figures[0];

    assert_eq!(heatmap.data.len(), 1);
    assert_eq!(heatmap.data[0]["type"], "heatmap");
    assert_eq!(heatmap.data[0]["z"], json!([[33.33, 0.0, 0.0, 0.0, 0.0]]));
    assert_eq!(
        heatmap.data[0]["x"],
        json!(["Amoxicillin", "Ciprofloxacin", "Meropenem", "Vancomycin", "Colistin"])
    );
    assert_eq!(heatmap.data[0]["y"], json!(["Overall Resistance"]));
}

#[test]
fn outcome_figure_stacks_two_traces() {
    let dashboard = ready_dashboard();
    let figures = dashboard.view().expect("Dashboard chưa sẵn sàng").figures();
    let bar = &figures[2];

    assert_eq!(bar.layout["barmode"], "stack");
    assert_eq!(bar.data.len(), 2);
    assert_eq!(bar.data[0]["name"], "Resistant / Intermediate");
    assert_eq!(bar.data[0]["x"], json!(["Deceased", "Recovered"]));
    assert_eq!(bar.data[0]["y"], json!([0, 2]));
    assert_eq!(bar.data[1]["name"], "Fully Susceptible");
    assert_eq!(bar.data[1]["y"], json!([1, 0]));
    assert!(bar.data.iter().all(|trace| trace["type"] == "bar"));
}

#[test]
fn age_figure_has_one_box_per_outcome() {
    let dashboard = ready_dashboard();
    let figures = dashboard.view().expect("Dashboard chưa sẵn sàng").figures();
    let boxes = &figures[3];

    let names: Vec<&str> = boxes
        .data
        .iter()
        .filter_map(|trace| trace["name"].as_str())
        .collect();
    assert_eq!(names, ["Deceased", "Recovered"]);
    assert!(boxes.data.iter().all(|trace| trace["type"] == "box"));
    assert_eq!(boxes.data[1]["y"], json!([55.0, 55.0]));
}

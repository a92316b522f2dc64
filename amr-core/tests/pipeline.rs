use amr_core::charts::{
    age_box_plot, antibiogram_heatmap, outcome_bar, specimen_pie, OUTCOME_BAR_TITLE,
};
use amr_core::{
    kpi_totals, normalize_row, normalize_rows, resistance_rates, ChartSpec, DashboardConfig,
    FilterOptions, FilterSelection, IsolateRecord, KpiTotals, RawRow, UNKNOWN,
};

fn row(pairs: &[(&str, &str)]) -> RawRow {
    pairs.iter().map(|(k, v)| (*k, *v)).collect()
}

fn record(pairs: &[(&str, &str)]) -> IsolateRecord {
    normalize_row(&row(pairs), &DashboardConfig::default()).expect("Thiếu Patient_ID")
}

fn sample_records() -> Vec<IsolateRecord> {
    vec![
        record(&[
            ("Patient_ID", "P1"),
            ("Age", "64"),
            ("Specimen_Type", "Blood"),
            ("Gender", "Male"),
            ("Outcome", "Recovered"),
            ("Amoxicillin", "Resistant"),
            ("Resistance_Genes", "KPC"),
        ]),
        record(&[
            ("Patient_ID", "P2"),
            ("Age", "71"),
            ("Specimen_Type", "Urine"),
            ("Gender", "Female"),
            ("Outcome", "Deceased"),
            ("Amoxicillin", "Resistant"),
        ]),
        record(&[
            ("Patient_ID", "P3"),
            ("Age", "abc"),
            ("Specimen_Type", "Blood"),
            ("Gender", "Female"),
            ("Outcome", "Recovered"),
            ("Amoxicillin", "Susceptible"),
        ]),
        record(&[
            ("Patient_ID", "P4"),
            ("Age", "30"),
            ("Specimen_Type", ""),
            ("Gender", "Male"),
            ("Outcome", ""),
        ]),
    ]
}

fn refs(records: &[IsolateRecord]) -> Vec<&IsolateRecord> {
    records.iter().collect()
}

#[test]
fn rows_without_patient_id_are_dropped() {
    let config = DashboardConfig::default();
    let rows = vec![
        row(&[("Patient_ID", "P1"), ("Specimen_Type", "Blood")]),
        row(&[("Patient_ID", ""), ("Specimen_Type", "Blood")]),
        row(&[("Specimen_Type", "Urine")]),
    ];

    let records = normalize_rows(&rows, &config);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].patient_id, "P1");
}

#[test]
fn missing_categories_default_to_unknown() {
    let rec = record(&[("Patient_ID", "P9")]);
    assert_eq!(rec.specimen_type, UNKNOWN);
    assert_eq!(rec.outcome, UNKNOWN);
    assert_eq!(rec.gender, "");
    assert_eq!(rec.age, None);
    assert_eq!(rec.resistance_genes, "None");
    assert!(!rec.is_mdro);
}

#[test]
fn mdro_matches_genes_case_insensitively() {
    let rec = record(&[("Patient_ID", "P1"), ("Resistance_Genes", "ndm-1 positive")]);
    assert!(rec.is_mdro);

    let rec = record(&[("Patient_ID", "P2"), ("Resistance_Genes", "CTX-M-15")]);
    assert!(!rec.is_mdro);
}

#[test]
fn any_resistance_requires_resistant_or_intermediate() {
    let none_tested = record(&[("Patient_ID", "P1")]);
    assert!(!none_tested.has_any_resistance);
    assert!(none_tested.results.is_empty());

    let susceptible = record(&[("Patient_ID", "P2"), ("Meropenem", "Susceptible")]);
    assert!(!susceptible.has_any_resistance);

    let intermediate = record(&[("Patient_ID", "P3"), ("Colistin", "intermediate")]);
    assert!(intermediate.has_any_resistance);
}

#[test]
fn empty_subset_has_no_rates_and_zero_kpis() {
    let config = DashboardConfig::default();
    assert!(resistance_rates(&[], &config.antibiotics).is_empty());
    assert_eq!(
        kpi_totals(&[], &config.antibiotics),
        KpiTotals {
            total: 0,
            average_resistance_rate: 0.0,
            mdro_count: 0,
        }
    );
}

#[test]
fn amoxicillin_rate_counts_only_tested_records() {
    let config = DashboardConfig::default();
    let records = sample_records();
    let rates = resistance_rates(&refs(&records), &config.antibiotics);

    assert_eq!(rates.len(), config.antibiotics.len());
    assert_eq!(rates[0].antibiotic, "Amoxicillin");
    assert!((rates[0].rate - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(rates[1].rate, 0.0);

    let heatmap = antibiogram_heatmap(&refs(&records), &FilterSelection::new(), &config);
    let ChartSpec::Heatmap(heatmap) = heatmap else {
        panic!("Heatmap phải có dữ liệu");
    };
    assert_eq!(heatmap.values[0], 66.67);
    assert_eq!(heatmap.antibiotics, config.antibiotics);
}

#[test]
fn kpis_average_all_antibiotic_rates() {
    let config = DashboardConfig::default();
    let records = sample_records();
    let kpis = kpi_totals(&refs(&records), &config.antibiotics);

    assert_eq!(kpis.total, 4);
    assert_eq!(kpis.mdro_count, 1);
    assert!((kpis.average_resistance_rate - 200.0 / 3.0 / 5.0).abs() < 1e-9);
}

#[test]
fn filtering_is_exact_and_repeatable() {
    let records = sample_records();
    let mut filters = FilterSelection::new();
    assert_eq!(filters.compute_filtered_set(&records).len(), 4);

    filters.set_gender(Some("female"));
    assert!(filters.compute_filtered_set(&records).is_empty());

    filters.set_gender(Some("Female"));
    let first = filters.compute_filtered_set(&records);
    let second = filters.compute_filtered_set(&records);
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);

    filters.set_outcome(Some("Recovered"));
    let subset = filters.compute_filtered_set(&records);
    assert_eq!(subset.len(), 1);
    assert_eq!(subset[0].patient_id, "P3");

    filters.set_gender(Some(""));
    assert_eq!(filters.gender, None);
}

#[test]
fn cross_filter_overrides_dropdown_and_toggles_back() {
    let records = sample_records();
    let mut filters = FilterSelection::new();
    filters.set_specimen_dropdown(Some("Urine"));
    assert_eq!(filters.effective_specimen(), Some("Urine"));

    filters.toggle_cross_filter("Blood");
    assert_eq!(filters.effective_specimen(), Some("Blood"));
    assert_eq!(filters.displayed_specimen(), "Blood");
    assert!(filters
        .compute_filtered_set(&records)
        .iter()
        .all(|r| r.specimen_type == "Blood"));

    filters.toggle_cross_filter("Blood");
    assert_eq!(filters.effective_specimen(), Some("Urine"));
    assert_eq!(filters.cross_filter_specimen, None);
}

#[test]
fn reset_clears_every_selection() {
    let records = sample_records();
    let mut filters = FilterSelection::new();
    filters.set_gender(Some("Male"));
    filters.set_outcome(Some("Recovered"));
    filters.toggle_cross_filter("Blood");

    filters.reset();
    assert_eq!(filters, FilterSelection::default());
    assert_eq!(filters.compute_filtered_set(&records).len(), records.len());
}

#[test]
fn empty_subset_yields_placeholders_everywhere() {
    let config = DashboardConfig::default();
    let filters = FilterSelection::new();
    let subset: Vec<&IsolateRecord> = Vec::new();

    let charts = [
        antibiogram_heatmap(&subset, &filters, &config),
        specimen_pie(&subset, &filters, &config),
        outcome_bar(&subset),
        age_box_plot(&subset, &config),
    ];
    for chart in &charts {
        assert!(chart.is_empty(), "{} phải là placeholder", chart.title());
    }
}

#[test]
fn unknown_only_records_yield_chart_placeholders() {
    let config = DashboardConfig::default();
    let records = vec![record(&[("Patient_ID", "P1"), ("Age", "50")])];
    let subset = refs(&records);

    assert!(specimen_pie(&subset, &FilterSelection::new(), &config).is_empty());
    assert!(outcome_bar(&subset).is_empty());
    assert!(age_box_plot(&subset, &config).is_empty());
    assert!(!antibiogram_heatmap(&subset, &FilterSelection::new(), &config).is_empty());
}

#[test]
fn pie_colors_follow_cross_filter() {
    let config = DashboardConfig::default();
    let records = sample_records();
    let subset = refs(&records);

    let ChartSpec::Pie(pie) = specimen_pie(&subset, &FilterSelection::new(), &config) else {
        panic!("Biểu đồ tròn phải có dữ liệu");
    };
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["Blood", "Urine"]);
    assert_eq!(pie.slices[0].count, 2);
    assert_eq!(pie.slices[0].color, config.palette[0]);
    assert_eq!(pie.slices[1].color, config.palette[1]);

    let mut filters = FilterSelection::new();
    filters.toggle_cross_filter("Urine");
    let ChartSpec::Pie(pie) = specimen_pie(&subset, &filters, &config) else {
        panic!("Biểu đồ tròn phải có dữ liệu");
    };
    assert_eq!(pie.slices[0].color, config.dimmed_color);
    assert_eq!(pie.slices[1].color, config.highlight_color);
    assert!(pie.slices[1].highlighted);
}

#[test]
fn heatmap_title_names_cross_filter() {
    let config = DashboardConfig::default();
    let records = sample_records();
    let mut filters = FilterSelection::new();
    filters.toggle_cross_filter("Blood");
    let subset = filters.compute_filtered_set(&records);

    let chart = antibiogram_heatmap(&subset, &filters, &config);
    assert_eq!(
        chart.title(),
        "Percentage Resistance by Antibiotic (Specimen: Blood)"
    );
}

#[test]
fn outcome_bar_is_sorted_and_split_by_resistance() {
    let records = sample_records();
    let ChartSpec::StackedBar(bar) = outcome_bar(&refs(&records)) else {
        panic!("Biểu đồ cột phải có dữ liệu");
    };

    assert_eq!(bar.title, OUTCOME_BAR_TITLE);
    assert_eq!(bar.categories, ["Deceased", "Recovered"]);
    assert_eq!(bar.series[0].counts, [1, 1]);
    assert_eq!(bar.series[1].counts, [0, 1]);
}

#[test]
fn age_box_skips_missing_ages_and_unknown_outcomes() {
    let config = DashboardConfig::default();
    let records = sample_records();
    let ChartSpec::BoxPlot(plot) = age_box_plot(&refs(&records), &config) else {
        panic!("Biểu đồ hộp phải có dữ liệu");
    };

    let outcomes: Vec<&str> = plot.boxes.iter().map(|b| b.outcome.as_str()).collect();
    assert_eq!(outcomes, ["Deceased", "Recovered"]);
    assert_eq!(plot.boxes[0].ages, [71.0]);
    assert_eq!(plot.boxes[1].ages, [64.0]);
}

#[test]
fn filter_options_are_sorted_without_unknown() {
    let records = sample_records();
    let options = FilterOptions::from_records(&records);

    assert_eq!(options.specimen_types, ["Blood", "Urine"]);
    assert_eq!(options.genders, ["Female", "Male"]);
    assert_eq!(options.outcomes, ["Deceased", "Recovered"]);
}

//! Mô tả biểu đồ dạng khai báo, tính thuần túy từ tập con đã lọc.
//!
//! Mỗi hàm trả về `ChartSpec::Empty` khi dữ liệu riêng của biểu đồ rỗng, để
//! lớp vẽ không bao giờ nhận một biểu đồ không có danh mục nào.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::aggregate::{resistance_rates, round2};
use crate::config::DashboardConfig;
use crate::filter::FilterSelection;
use crate::model::{IsolateRecord, UNKNOWN};

/// Chú thích cố định cho biểu đồ không có dữ liệu.
pub const NO_DATA_MESSAGE: &str = "No data to display based on current filters.";

/// Tiêu đề biểu đồ khi có dữ liệu.
pub const HEATMAP_TITLE: &str = "Percentage Resistance by Antibiotic";
pub const SPECIMEN_PIE_TITLE: &str = "Isolate Count Distribution by Specimen Type";
pub const OUTCOME_BAR_TITLE: &str = "Resistance Status by Patient Outcome";
pub const AGE_BOX_PLOT_TITLE: &str = "Patient Age Distribution Across Outcomes";

pub const HEATMAP_ROW_LABEL: &str = "Overall Resistance";
pub const RESISTANT_SERIES: &str = "Resistant / Intermediate";
pub const SUSCEPTIBLE_SERIES: &str = "Fully Susceptible";
const RESISTANT_COLOR: &str = "#d93025";
const SUSCEPTIBLE_COLOR: &str = "#34a853";

/// Vùng vẽ trên trang, mỗi biểu đồ một vùng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChartSurface {
    AntibiogramHeatmap,
    SpecimenPie,
    OutcomeBar,
    AgeBoxPlot,
}

impl ChartSurface {
    pub const ALL: [ChartSurface; 4] = [
        ChartSurface::AntibiogramHeatmap,
        ChartSurface::SpecimenPie,
        ChartSurface::OutcomeBar,
        ChartSurface::AgeBoxPlot,
    ];

    /// Id phần tử DOM chứa biểu đồ.
    pub fn element_id(self) -> &'static str {
        match self {
            ChartSurface::AntibiogramHeatmap => "antibiogram-heatmap",
            ChartSurface::SpecimenPie => "specimen-pie-chart",
            ChartSurface::OutcomeBar => "outcome-stacked-bar-chart",
            ChartSurface::AgeBoxPlot => "age-box-plot",
        }
    }

    /// Tiêu đề dùng cho placeholder rỗng.
    pub fn empty_title(self) -> &'static str {
        match self {
            ChartSurface::AntibiogramHeatmap => "Antibiogram: Percent Resistance by Drug",
            ChartSurface::SpecimenPie => "Isolate Distribution by Specimen Type",
            ChartSurface::OutcomeBar => OUTCOME_BAR_TITLE,
            ChartSurface::AgeBoxPlot => "Patient Age Distribution by Outcome",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Empty(EmptyChart),
    Heatmap(HeatmapChart),
    Pie(PieChart),
    StackedBar(StackedBarChart),
    BoxPlot(BoxPlotChart),
}

impl ChartSpec {
    fn empty(surface: ChartSurface) -> Self {
        ChartSpec::Empty(EmptyChart {
            title: surface.empty_title().to_string(),
            message: NO_DATA_MESSAGE.to_string(),
        })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ChartSpec::Empty(_))
    }

    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Empty(chart) => &chart.title,
            ChartSpec::Heatmap(chart) => &chart.title,
            ChartSpec::Pie(chart) => &chart.title,
            ChartSpec::StackedBar(chart) => &chart.title,
            ChartSpec::BoxPlot(chart) => &chart.title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmptyChart {
    pub title: String,
    pub message: String,
}

/// Antibiogram một hàng: mỗi cột một kháng sinh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapChart {
    pub title: String,
    pub row_label: String,
    pub antibiotics: Vec<String>,
    /// Tỷ lệ kháng (%) đã làm tròn hai chữ số, cùng thứ tự với `antibiotics`.
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub color: String,
    pub highlighted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StackedBarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BarSeries {
    pub name: String,
    pub color: String,
    pub counts: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxPlotChart {
    pub title: String,
    pub boxes: Vec<AgeBox>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgeBox {
    pub outcome: String,
    pub ages: Vec<f64>,
    pub color: String,
}

/// Bốn biểu đồ của dashboard, tính lại cùng lúc.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardCharts {
    pub heatmap: ChartSpec,
    pub specimen_pie: ChartSpec,
    pub outcome_bar: ChartSpec,
    pub age_box_plot: ChartSpec,
}

impl DashboardCharts {
    pub fn build(
        subset: &[&IsolateRecord],
        filters: &FilterSelection,
        config: &DashboardConfig,
    ) -> Self {
        Self {
            heatmap: antibiogram_heatmap(subset, filters, config),
            specimen_pie: specimen_pie(subset, filters, config),
            outcome_bar: outcome_bar(subset),
            age_box_plot: age_box_plot(subset, config),
        }
    }

    pub fn get(&self, surface: ChartSurface) -> &ChartSpec {
        match surface {
            ChartSurface::AntibiogramHeatmap => &self.heatmap,
            ChartSurface::SpecimenPie => &self.specimen_pie,
            ChartSurface::OutcomeBar => &self.outcome_bar,
            ChartSurface::AgeBoxPlot => &self.age_box_plot,
        }
    }

    /// Các cặp (vùng vẽ, biểu đồ) theo thứ tự vẽ.
    pub fn iter(&self) -> impl Iterator<Item = (ChartSurface, &ChartSpec)> + '_ {
        ChartSurface::ALL
            .into_iter()
            .map(move |surface| (surface, self.get(surface)))
    }
}

pub fn antibiogram_heatmap(
    subset: &[&IsolateRecord],
    filters: &FilterSelection,
    config: &DashboardConfig,
) -> ChartSpec {
    let rates = resistance_rates(subset, &config.antibiotics);
    if rates.is_empty() {
        return ChartSpec::empty(ChartSurface::AntibiogramHeatmap);
    }

    let title = match filters.cross_filter_specimen.as_deref() {
        Some(specimen) => format!("{HEATMAP_TITLE} (Specimen: {specimen})"),
        None => HEATMAP_TITLE.to_string(),
    };

    ChartSpec::Heatmap(HeatmapChart {
        title,
        row_label: HEATMAP_ROW_LABEL.to_string(),
        values: rates.iter().map(|r| round2(r.rate)).collect(),
        antibiotics: rates.into_iter().map(|r| r.antibiotic).collect(),
    })
}

/// Lát bánh theo loại bệnh phẩm, theo thứ tự xuất hiện đầu tiên.
pub fn specimen_pie(
    subset: &[&IsolateRecord],
    filters: &FilterSelection,
    config: &DashboardConfig,
) -> ChartSpec {
    let mut groups: Vec<(&str, usize)> = Vec::new();
    for record in subset.iter().filter(|r| r.specimen_type != UNKNOWN) {
        match groups
            .iter_mut()
            .find(|(label, _)| *label == record.specimen_type)
        {
            Some((_, count)) => *count += 1,
            None => groups.push((record.specimen_type.as_str(), 1)),
        }
    }

    if groups.is_empty() {
        return ChartSpec::empty(ChartSurface::SpecimenPie);
    }

    let active = filters.cross_filter_specimen.as_deref();
    let slices = groups
        .into_iter()
        .enumerate()
        .map(|(index, (label, count))| {
            let highlighted = active == Some(label);
            let color = match active {
                Some(_) if highlighted => config.highlight_color.clone(),
                Some(_) => config.dimmed_color.clone(),
                None => config.palette_color(index).to_string(),
            };
            PieSlice {
                label: label.to_string(),
                count,
                color,
                highlighted,
            }
        })
        .collect();

    ChartSpec::Pie(PieChart {
        title: SPECIMEN_PIE_TITLE.to_string(),
        slices,
    })
}

/// Số mẫu có/không có kháng theo kết cục, xếp chồng.
pub fn outcome_bar(subset: &[&IsolateRecord]) -> ChartSpec {
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for record in subset.iter().filter(|r| r.outcome != UNKNOWN) {
        let entry = counts.entry(record.outcome.as_str()).or_default();
        if record.has_any_resistance {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    if counts.is_empty() {
        return ChartSpec::empty(ChartSurface::OutcomeBar);
    }

    let categories = counts.keys().map(|outcome| outcome.to_string()).collect();
    let series = vec![
        BarSeries {
            name: RESISTANT_SERIES.to_string(),
            color: RESISTANT_COLOR.to_string(),
            counts: counts.values().map(|(resistant, _)| *resistant).collect(),
        },
        BarSeries {
            name: SUSCEPTIBLE_SERIES.to_string(),
            color: SUSCEPTIBLE_COLOR.to_string(),
            counts: counts.values().map(|(_, susceptible)| *susceptible).collect(),
        },
    ];

    ChartSpec::StackedBar(StackedBarChart {
        title: OUTCOME_BAR_TITLE.to_string(),
        categories,
        series,
    })
}

/// Phân bố tuổi theo kết cục; bỏ bản ghi thiếu tuổi hoặc kết cục `Unknown`.
pub fn age_box_plot(subset: &[&IsolateRecord], config: &DashboardConfig) -> ChartSpec {
    let clean: Vec<(&str, f64)> = subset
        .iter()
        .filter(|r| r.outcome != UNKNOWN)
        .filter_map(|r| r.age.map(|age| (r.outcome.as_str(), age)))
        .collect();
    let outcomes: BTreeSet<&str> = clean.iter().map(|(outcome, _)| *outcome).collect();

    let boxes: Vec<AgeBox> = outcomes
        .into_iter()
        .enumerate()
        .filter_map(|(index, outcome)| {
            let ages: Vec<f64> = clean
                .iter()
                .filter(|(o, _)| *o == outcome)
                .map(|(_, age)| *age)
                .collect();
            if ages.is_empty() {
                return None;
            }
            Some(AgeBox {
                outcome: outcome.to_string(),
                ages,
                color: config.palette_color(index).to_string(),
            })
        })
        .collect();

    if boxes.is_empty() {
        return ChartSpec::empty(ChartSurface::AgeBoxPlot);
    }

    ChartSpec::BoxPlot(BoxPlotChart {
        title: AGE_BOX_PLOT_TITLE.to_string(),
        boxes,
    })
}

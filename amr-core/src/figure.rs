//! Chuyển `ChartSpec` thành figure `{data, layout}` cho Plotly.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::charts::{
    BoxPlotChart, ChartSpec, ChartSurface, EmptyChart, HeatmapChart, PieChart, StackedBarChart,
};

/// Tham số của một lần gọi `Plotly.newPlot(target, data, layout)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Figure {
    pub target: String,
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    /// Placeholder "không có dữ liệu": không có series nào.
    pub fn is_placeholder(&self) -> bool {
        self.data.is_empty()
    }
}

impl ChartSpec {
    pub fn to_figure(&self, surface: ChartSurface) -> Figure {
        let (data, layout) = match self {
            ChartSpec::Empty(chart) => empty_figure(chart),
            ChartSpec::Heatmap(chart) => heatmap_figure(chart),
            ChartSpec::Pie(chart) => pie_figure(chart),
            ChartSpec::StackedBar(chart) => bar_figure(chart),
            ChartSpec::BoxPlot(chart) => box_figure(chart),
        };
        Figure {
            target: surface.element_id().to_string(),
            data,
            layout,
        }
    }
}

fn empty_figure(chart: &EmptyChart) -> (Vec<Value>, Value) {
    let layout = json!({
        "title": chart.title,
        "xaxis": { "visible": false },
        "yaxis": { "visible": false },
        "annotations": [{
            "text": chart.message,
            "xref": "paper",
            "yref": "paper",
            "showarrow": false,
            "font": { "size": 16, "color": "#999" }
        }],
        "height": 350
    });
    (Vec::new(), layout)
}

fn heatmap_figure(chart: &HeatmapChart) -> (Vec<Value>, Value) {
    let trace = json!({
        "z": [chart.values],
        "x": chart.antibiotics,
        "y": [chart.row_label],
        "type": "heatmap",
        "hoverongaps": false,
        "colorscale": [
            [0, "rgb(10, 180, 10)"],
            [0.5, "rgb(255, 255, 100)"],
            [1, "rgb(200, 50, 50)"]
        ],
        "colorbar": { "title": "Resistance (%)", "titleside": "right" }
    });
    let layout = json!({
        "title": { "text": chart.title, "font": { "size": 16 } },
        "xaxis": { "title": "Antibiotics", "automargin": true },
        "yaxis": { "automargin": true, "tickangle": -45 },
        "height": 350,
        "margin": { "t": 50, "r": 50, "b": 100, "l": 150 },
        "responsive": true
    });
    (vec![trace], layout)
}

fn pie_figure(chart: &PieChart) -> (Vec<Value>, Value) {
    let labels: Vec<&str> = chart.slices.iter().map(|s| s.label.as_str()).collect();
    let values: Vec<usize> = chart.slices.iter().map(|s| s.count).collect();
    let colors: Vec<&str> = chart.slices.iter().map(|s| s.color.as_str()).collect();

    let trace = json!({
        "labels": labels,
        "values": values,
        "type": "pie",
        "hoverinfo": "label+percent+value",
        "textinfo": "percent",
        "automargin": true,
        "marker": { "colors": colors }
    });
    let layout = json!({
        "title": chart.title,
        "height": 400,
        "margin": { "t": 50, "b": 50, "l": 50, "r": 50 },
        "showlegend": true,
        "responsive": true
    });
    (vec![trace], layout)
}

fn bar_figure(chart: &StackedBarChart) -> (Vec<Value>, Value) {
    let data = chart
        .series
        .iter()
        .map(|series| {
            json!({
                "x": chart.categories,
                "y": series.counts,
                "name": series.name,
                "type": "bar",
                "marker": { "color": series.color }
            })
        })
        .collect();
    let layout = json!({
        "title": chart.title,
        "barmode": "stack",
        "xaxis": { "title": "Patient Outcome", "automargin": true },
        "yaxis": { "title": "Count of Isolates", "automargin": true },
        "height": 400,
        "responsive": true
    });
    (data, layout)
}

fn box_figure(chart: &BoxPlotChart) -> (Vec<Value>, Value) {
    let data = chart
        .boxes
        .iter()
        .map(|age_box| {
            json!({
                "y": age_box.ages,
                "name": age_box.outcome,
                "type": "box",
                "boxpoints": "outliers",
                "jitter": 0.3,
                "pointpos": -1.8,
                "marker": { "color": age_box.color }
            })
        })
        .collect();
    let layout = json!({
        "title": chart.title,
        "xaxis": { "title": "Patient Outcome", "automargin": true },
        "yaxis": { "title": "Age (Years)", "automargin": true },
        "height": 400,
        "responsive": true
    });
    (data, layout)
}

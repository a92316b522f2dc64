//! Bộ điều phối dashboard: nạp dữ liệu một lần, sau đó mỗi thay đổi bộ lọc
//! tính lại tập con, KPI và cả bốn biểu đồ.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::aggregate::{kpi_totals, KpiText, KpiTotals};
use crate::charts::DashboardCharts;
use crate::config::DashboardConfig;
use crate::figure::Figure;
use crate::filter::{FilterOptions, FilterSelection, SelectValues};
use crate::model::IsolateRecord;
use crate::DashboardError;

/// Thông báo hiển thị khi không nạp được dữ liệu.
pub const LOAD_ERROR_MESSAGE: &str = "CRITICAL ERROR: Data failed to load. See console for details.";

/// Vòng đời của dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DashboardPhase {
    Loading,
    Ready,
    /// Trạng thái kết thúc, không nhận tương tác nữa.
    Error { message: String, detail: String },
}

/// Kết quả một lần tính lại toàn bộ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardView {
    pub kpis: KpiTotals,
    pub kpi_text: KpiText,
    pub filters: FilterSelection,
    /// Giá trị dropdown bệnh phẩm sau khi đồng bộ với bộ lọc hiệu lực.
    pub displayed_specimen: String,
    pub options: FilterOptions,
    pub charts: DashboardCharts,
}

impl DashboardView {
    pub fn select_values(&self) -> SelectValues {
        self.filters.select_values()
    }

    /// Bốn figure Plotly theo thứ tự vẽ.
    pub fn figures(&self) -> Vec<Figure> {
        self.charts
            .iter()
            .map(|(surface, spec)| spec.to_figure(surface))
            .collect()
    }
}

/// Phiên làm việc của dashboard. Tập bản ghi đầy đủ không đổi sau khi nạp.
#[derive(Debug, Clone)]
pub struct Dashboard {
    config: DashboardConfig,
    phase: DashboardPhase,
    records: Vec<IsolateRecord>,
    options: FilterOptions,
    filters: FilterSelection,
}

impl Dashboard {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            config,
            phase: DashboardPhase::Loading,
            records: Vec::new(),
            options: FilterOptions::default(),
            filters: FilterSelection::default(),
        }
    }

    /// Tạo dashboard đã sẵn sàng từ tập bản ghi có sẵn.
    pub fn with_records(config: DashboardConfig, records: Vec<IsolateRecord>) -> Self {
        let mut dashboard = Self::new(config);
        dashboard.complete_load(Ok(records));
        dashboard
    }

    /// Chuyển Loading -> Ready hoặc Error. Chỉ có hiệu lực một lần.
    pub fn complete_load(
        &mut self,
        outcome: Result<Vec<IsolateRecord>, DashboardError>,
    ) -> Option<DashboardView> {
        if self.phase != DashboardPhase::Loading {
            debug!("ignoring repeated load completion");
            return None;
        }

        let outcome = self.config.validate().and(outcome);
        match outcome {
            Ok(records) => {
                info!(records = records.len(), "dashboard data loaded");
                self.options = FilterOptions::from_records(&records);
                self.records = records;
                self.phase = DashboardPhase::Ready;
                self.view()
            }
            Err(err) => {
                error!(%err, "dashboard data failed to load");
                self.phase = DashboardPhase::Error {
                    message: LOAD_ERROR_MESSAGE.to_string(),
                    detail: err.to_string(),
                };
                None
            }
        }
    }

    pub fn phase(&self) -> &DashboardPhase {
        &self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == DashboardPhase::Ready
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn records(&self) -> &[IsolateRecord] {
        &self.records
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn set_specimen_dropdown(&mut self, value: Option<&str>) -> Option<DashboardView> {
        self.mutate(|filters| filters.set_specimen_dropdown(value))
    }

    pub fn set_gender(&mut self, value: Option<&str>) -> Option<DashboardView> {
        self.mutate(|filters| filters.set_gender(value))
    }

    pub fn set_outcome(&mut self, value: Option<&str>) -> Option<DashboardView> {
        self.mutate(|filters| filters.set_outcome(value))
    }

    /// Xử lý click vào lát bánh của biểu đồ bệnh phẩm.
    pub fn toggle_cross_filter(&mut self, specimen_type: &str) -> Option<DashboardView> {
        self.mutate(|filters| filters.toggle_cross_filter(specimen_type))
    }

    pub fn reset(&mut self) -> Option<DashboardView> {
        self.mutate(FilterSelection::reset)
    }

    /// Tập con hiện tại, luôn tính lại từ tập đầy đủ.
    pub fn filtered(&self) -> Vec<&IsolateRecord> {
        self.filters.compute_filtered_set(&self.records)
    }

    /// Tính lại tập con, KPI rồi biểu đồ. `None` khi chưa sẵn sàng.
    pub fn view(&self) -> Option<DashboardView> {
        if !self.is_ready() {
            return None;
        }

        let subset = self.filtered();
        let kpis = kpi_totals(&subset, &self.config.antibiotics);
        let charts = DashboardCharts::build(&subset, &self.filters, &self.config);
        debug!(
            filtered = subset.len(),
            total = self.records.len(),
            "dashboard recomputed"
        );

        Some(DashboardView {
            kpi_text: KpiText::from(&kpis),
            kpis,
            filters: self.filters.clone(),
            displayed_specimen: self.filters.displayed_specimen().to_string(),
            options: self.options.clone(),
            charts,
        })
    }

    fn mutate(&mut self, change: impl FnOnce(&mut FilterSelection)) -> Option<DashboardView> {
        if !self.is_ready() {
            return None;
        }
        change(&mut self.filters);
        self.view()
    }
}

//! Logic lõi của dashboard kháng kháng sinh: chuẩn hóa mẫu phân lập, lọc,
//! tổng hợp và mô tả biểu đồ.

pub mod aggregate;
pub mod casefold;
pub mod charts;
pub mod config;
pub mod dashboard;
mod error;
pub mod figure;
pub mod filter;
pub mod model;
pub mod normalize;

pub use aggregate::{format_rate, kpi_totals, resistance_rates, AntibioticRate, KpiText, KpiTotals};
pub use charts::{ChartSpec, ChartSurface, DashboardCharts};
pub use config::{DashboardConfig, PartialConfig};
pub use dashboard::{Dashboard, DashboardPhase, DashboardView, LOAD_ERROR_MESSAGE};
pub use error::DashboardError;
pub use figure::Figure;
pub use filter::{FilterOptions, FilterSelection, SelectValues};
pub use model::{IsolateRecord, RawRow, TestResult, UNKNOWN};
pub use normalize::{normalize_row, normalize_rows};

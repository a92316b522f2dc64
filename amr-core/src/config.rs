//! Cấu hình dashboard: danh sách kháng sinh, gen MDRO, tên cột và bảng màu.

use serde::{Deserialize, Serialize};

use crate::DashboardError;

/// Các cột kháng sinh mặc định, theo thứ tự hiển thị trên antibiogram.
pub const DEFAULT_ANTIBIOTICS: [&str; 5] = [
    "Amoxicillin",
    "Ciprofloxacin",
    "Meropenem",
    "Vancomycin",
    "Colistin",
];

/// Gen đánh dấu vi khuẩn đa kháng (MDRO).
pub const DEFAULT_MDRO_GENES: [&str; 4] = ["KPC", "OXA-48", "NDM-1", "VIM"];

/// Bảng màu phân loại (d3 category10).
pub const CATEGORY10: [&str; 10] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// Cấu hình điều chỉnh các cột dữ liệu và quy tắc suy diễn.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Tên cột kháng sinh, đồng thời là thứ tự cột của heatmap.
    pub antibiotics: Vec<String>,
    /// Gen kháng thuốc xác định MDRO (so khớp không phân biệt hoa thường).
    pub mdro_genes: Vec<String>,
    pub columns: ColumnNames,
    /// Màu lần lượt cho lát bánh và hộp khi không có cross-filter.
    pub palette: Vec<String>,
    pub highlight_color: String,
    pub dimmed_color: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            antibiotics: DEFAULT_ANTIBIOTICS.iter().map(|s| s.to_string()).collect(),
            mdro_genes: DEFAULT_MDRO_GENES.iter().map(|s| s.to_string()).collect(),
            columns: ColumnNames::default(),
            palette: CATEGORY10.iter().map(|s| s.to_string()).collect(),
            highlight_color: "#1a73e8".to_string(),
            dimmed_color: "#e0e0e0".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Kiểm tra cấu hình trước khi nạp dữ liệu.
    pub fn validate(&self) -> Result<(), DashboardError> {
        if self.antibiotics.is_empty() {
            return Err(DashboardError::Config(
                "danh sách kháng sinh không được rỗng".to_string(),
            ));
        }
        if self.antibiotics.iter().any(|name| name.trim().is_empty()) {
            return Err(DashboardError::Config("tên cột kháng sinh rỗng".to_string()));
        }
        if self.mdro_genes.iter().any(|gene| gene.trim().is_empty()) {
            return Err(DashboardError::Config("tên gen MDRO rỗng".to_string()));
        }
        if self.columns.patient_id.trim().is_empty() {
            return Err(DashboardError::Config("thiếu tên cột Patient_ID".to_string()));
        }
        Ok(())
    }

    /// Màu bảng phân loại theo chỉ số, quay vòng khi vượt độ dài.
    pub fn palette_color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return CATEGORY10[index % CATEGORY10.len()];
        }
        &self.palette[index % self.palette.len()]
    }
}

/// Tên các cột trong file CSV đầu vào.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ColumnNames {
    pub patient_id: String,
    pub age: String,
    pub resistance_genes: String,
    pub specimen_type: String,
    pub gender: String,
    pub outcome: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            patient_id: "Patient_ID".to_string(),
            age: "Age".to_string(),
            resistance_genes: "Resistance_Genes".to_string(),
            specimen_type: "Specimen_Type".to_string(),
            gender: "Gender".to_string(),
            outcome: "Outcome".to_string(),
        }
    }
}

/// Cấu hình một phần (từ JS hoặc file TOML); trường thiếu giữ giá trị mặc định.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfig {
    #[serde(default)]
    pub antibiotics: Option<Vec<String>>,
    #[serde(default)]
    pub mdro_genes: Option<Vec<String>>,
    #[serde(default)]
    pub columns: Option<PartialColumns>,
    #[serde(default)]
    pub palette: Option<Vec<String>>,
    #[serde(default)]
    pub highlight_color: Option<String>,
    #[serde(default)]
    pub dimmed_color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialColumns {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub resistance_genes: Option<String>,
    #[serde(default)]
    pub specimen_type: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub outcome: Option<String>,
}

impl From<PartialConfig> for DashboardConfig {
    fn from(cfg: PartialConfig) -> Self {
        let mut base = DashboardConfig::default();
        if let Some(antibiotics) = cfg.antibiotics {
            base.antibiotics = antibiotics;
        }
        if let Some(genes) = cfg.mdro_genes {
            base.mdro_genes = genes;
        }
        if let Some(columns) = cfg.columns {
            base.columns = columns.apply(base.columns);
        }
        if let Some(palette) = cfg.palette {
            base.palette = palette;
        }
        if let Some(color) = cfg.highlight_color {
            base.highlight_color = color;
        }
        if let Some(color) = cfg.dimmed_color {
            base.dimmed_color = color;
        }
        base
    }
}

impl PartialColumns {
    fn apply(self, mut base: ColumnNames) -> ColumnNames {
        if let Some(name) = self.patient_id {
            base.patient_id = name;
        }
        if let Some(name) = self.age {
            base.age = name;
        }
        if let Some(name) = self.resistance_genes {
            base.resistance_genes = name;
        }
        if let Some(name) = self.specimen_type {
            base.specimen_type = name;
        }
        if let Some(name) = self.gender {
            base.gender = name;
        }
        if let Some(name) = self.outcome {
            base.outcome = name;
        }
        base
    }
}

//! Thống kê tổng hợp trên một tập con bản ghi: tỷ lệ kháng và KPI.

use serde::{Deserialize, Serialize};

use crate::model::{IsolateRecord, TestResult};

/// Tỷ lệ kháng (%) của một kháng sinh.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AntibioticRate {
    pub antibiotic: String,
    pub rate: f64,
}

/// Chỉ số tổng quan hiển thị ở đầu dashboard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct KpiTotals {
    pub total: usize,
    pub average_resistance_rate: f64,
    pub mdro_count: usize,
}

/// Chuỗi hiển thị cho ba ô KPI.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KpiText {
    pub total: String,
    pub resistance_rate: String,
    pub mdro_count: String,
}

impl From<&KpiTotals> for KpiText {
    fn from(kpis: &KpiTotals) -> Self {
        Self {
            total: kpis.total.to_string(),
            resistance_rate: format_rate(kpis.average_resistance_rate),
            mdro_count: kpis.mdro_count.to_string(),
        }
    }
}

/// Tỷ lệ kháng theo từng kháng sinh, giữ thứ tự của `antibiotics`.
///
/// Tỷ lệ = số mẫu `Resistant` / số mẫu đã thử nghiệm x 100, bằng 0 khi không
/// có mẫu nào được thử nghiệm. Tập con rỗng trả về danh sách rỗng.
pub fn resistance_rates(subset: &[&IsolateRecord], antibiotics: &[String]) -> Vec<AntibioticRate> {
    if subset.is_empty() {
        return Vec::new();
    }

    antibiotics
        .iter()
        .map(|antibiotic| {
            let mut tested = 0usize;
            let mut resistant = 0usize;
            for result in subset.iter().filter_map(|record| record.result(antibiotic)) {
                tested += 1;
                if result == TestResult::Resistant {
                    resistant += 1;
                }
            }
            let rate = if tested > 0 {
                resistant as f64 / tested as f64 * 100.0
            } else {
                0.0
            };
            AntibioticRate {
                antibiotic: antibiotic.clone(),
                rate,
            }
        })
        .collect()
}

pub fn kpi_totals(subset: &[&IsolateRecord], antibiotics: &[String]) -> KpiTotals {
    let total = subset.len();
    if total == 0 {
        return KpiTotals::default();
    }

    let rates = resistance_rates(subset, antibiotics);
    let average_resistance_rate = if rates.is_empty() {
        0.0
    } else {
        rates.iter().map(|r| r.rate).sum::<f64>() / rates.len() as f64
    };

    KpiTotals {
        total,
        average_resistance_rate,
        mdro_count: subset.iter().filter(|record| record.is_mdro).count(),
    }
}

/// Làm tròn hai chữ số thập phân.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Tỷ lệ dạng `12.34%`.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2}%")
}

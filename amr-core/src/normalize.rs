//! Chuyển dòng CSV thô thành `IsolateRecord` kèm các cờ suy diễn.

use std::collections::BTreeMap;

use tracing::debug;

use crate::casefold;
use crate::config::DashboardConfig;
use crate::model::{IsolateRecord, RawRow, TestResult, UNKNOWN};

/// Giá trị mặc định khi cột gen kháng thuốc trống.
const NO_GENES: &str = "None";

/// Chuẩn hóa một dòng; `None` nếu dòng không có mã bệnh nhân.
pub fn normalize_row(row: &RawRow, config: &DashboardConfig) -> Option<IsolateRecord> {
    let columns = &config.columns;
    let patient_id = row.get(&columns.patient_id)?.to_string();

    let resistance_genes = row
        .get(&columns.resistance_genes)
        .unwrap_or(NO_GENES)
        .to_string();
    let is_mdro = config
        .mdro_genes
        .iter()
        .any(|gene| casefold::contains_ignore_case(&resistance_genes, gene));

    let results: BTreeMap<String, TestResult> = config
        .antibiotics
        .iter()
        .filter_map(|antibiotic| {
            let result = row.get(antibiotic).and_then(TestResult::parse)?;
            Some((antibiotic.clone(), result))
        })
        .collect();
    let has_any_resistance = results.values().any(|result| result.is_non_susceptible());

    Some(IsolateRecord {
        patient_id,
        age: row.get(&columns.age).and_then(parse_age),
        specimen_type: or_unknown(row.get(&columns.specimen_type)),
        gender: row.get(&columns.gender).unwrap_or_default().to_string(),
        outcome: or_unknown(row.get(&columns.outcome)),
        resistance_genes,
        results,
        is_mdro,
        has_any_resistance,
    })
}

/// Chuẩn hóa toàn bộ dữ liệu, bỏ các dòng không có mã bệnh nhân.
pub fn normalize_rows<'a, I>(rows: I, config: &DashboardConfig) -> Vec<IsolateRecord>
where
    I: IntoIterator<Item = &'a RawRow>,
{
    let mut dropped = 0usize;
    let records: Vec<IsolateRecord> = rows
        .into_iter()
        .filter_map(|row| {
            let record = normalize_row(row, config);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();

    if dropped > 0 {
        debug!(dropped, kept = records.len(), "dropped rows without patient id");
    }
    records
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN).to_string()
}

fn parse_age(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|age| age.is_finite())
}

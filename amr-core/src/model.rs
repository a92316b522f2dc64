//! Kiểu dữ liệu cho mẫu phân lập và kết quả kháng sinh đồ.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::casefold;

/// Giá trị thay thế cho loại bệnh phẩm và kết cục bị thiếu.
pub const UNKNOWN: &str = "Unknown";

/// Một dòng CSV chưa định kiểu: tên cột -> giá trị.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow(HashMap<String, String>);

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column.into(), value.into());
    }

    /// Giá trị của cột, bỏ qua ô rỗng.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.0
            .get(column)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(column, value)| (column.into(), value.into()))
                .collect(),
        )
    }
}

/// Kết quả thử nghiệm một kháng sinh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TestResult {
    Resistant,
    Intermediate,
    /// Mọi giá trị khác đã được thử nghiệm.
    Susceptible,
}

impl TestResult {
    /// Phân loại ô kết quả; `None` nếu ô rỗng (chưa thử nghiệm).
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if casefold::eq_ignore_case(raw, "RESISTANT") {
            Some(TestResult::Resistant)
        } else if casefold::eq_ignore_case(raw, "INTERMEDIATE") {
            Some(TestResult::Intermediate)
        } else {
            Some(TestResult::Susceptible)
        }
    }

    /// Kháng hoặc trung gian.
    pub fn is_non_susceptible(self) -> bool {
        matches!(self, TestResult::Resistant | TestResult::Intermediate)
    }
}

/// Mẫu phân lập đã chuẩn hóa. Bất biến sau khi tạo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IsolateRecord {
    pub patient_id: String,
    pub age: Option<f64>,
    pub specimen_type: String,
    pub gender: String,
    pub outcome: String,
    pub resistance_genes: String,
    /// Kết quả theo tên kháng sinh; chỉ chứa kháng sinh đã được thử nghiệm.
    pub results: BTreeMap<String, TestResult>,
    pub is_mdro: bool,
    pub has_any_resistance: bool,
}

impl IsolateRecord {
    pub fn result(&self, antibiotic: &str) -> Option<TestResult> {
        self.results.get(antibiotic).copied()
    }
}

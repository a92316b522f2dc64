//! Trạng thái bộ lọc (dropdown + cross-filter) và danh sách lựa chọn cho dropdown.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{IsolateRecord, UNKNOWN};

/// Lựa chọn lọc hiện tại. `None` nghĩa là không ràng buộc.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSelection {
    pub specimen_dropdown: Option<String>,
    pub gender: Option<String>,
    pub outcome: Option<String>,
    /// Loại bệnh phẩm chọn bằng cách bấm vào biểu đồ tròn.
    pub cross_filter_specimen: Option<String>,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_specimen_dropdown(&mut self, value: Option<&str>) {
        self.specimen_dropdown = selection(value);
    }

    pub fn set_gender(&mut self, value: Option<&str>) {
        self.gender = selection(value);
    }

    pub fn set_outcome(&mut self, value: Option<&str>) {
        self.outcome = selection(value);
    }

    /// Bật/tắt cross-filter. Khi đang bật, giá trị dropdown bệnh phẩm bị bỏ qua.
    pub fn toggle_cross_filter(&mut self, specimen_type: &str) {
        if self.cross_filter_specimen.as_deref() == Some(specimen_type) {
            self.cross_filter_specimen = None;
        } else {
            self.cross_filter_specimen = selection(Some(specimen_type));
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Bộ lọc bệnh phẩm thực sự áp dụng: cross-filter ưu tiên hơn dropdown.
    pub fn effective_specimen(&self) -> Option<&str> {
        self.cross_filter_specimen
            .as_deref()
            .or(self.specimen_dropdown.as_deref())
    }

    /// Giá trị dropdown bệnh phẩm phải hiển thị sau mỗi lần lọc lại.
    pub fn displayed_specimen(&self) -> &str {
        self.effective_specimen().unwrap_or_default()
    }

    /// Giá trị ba dropdown phải hiển thị, kể cả khi người dùng đã chọn tay.
    pub fn select_values(&self) -> SelectValues {
        SelectValues {
            specimen: self.displayed_specimen().to_string(),
            gender: self.gender.clone().unwrap_or_default(),
            outcome: self.outcome.clone().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.effective_specimen().is_none() && self.gender.is_none() && self.outcome.is_none()
    }

    /// Bản ghi có thỏa mọi điều kiện đang đặt hay không (so khớp chính xác).
    pub fn matches(&self, record: &IsolateRecord) -> bool {
        matches_exact(self.effective_specimen(), &record.specimen_type)
            && matches_exact(self.gender.as_deref(), &record.gender)
            && matches_exact(self.outcome.as_deref(), &record.outcome)
    }

    /// Tập con các bản ghi khớp bộ lọc, giữ nguyên thứ tự ban đầu.
    pub fn compute_filtered_set<'a>(&self, full: &'a [IsolateRecord]) -> Vec<&'a IsolateRecord> {
        if self.is_empty() {
            return full.iter().collect();
        }
        full.iter().filter(|record| self.matches(record)).collect()
    }
}

fn selection(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn matches_exact(wanted: Option<&str>, actual: &str) -> bool {
    wanted.map_or(true, |wanted| wanted == actual)
}

/// Id phần tử `<select>` của từng bộ lọc.
pub const SPECIMEN_SELECT_ID: &str = "specimen-filter";
pub const GENDER_SELECT_ID: &str = "gender-filter";
pub const OUTCOME_SELECT_ID: &str = "outcome-filter";

/// Giá trị ghi đè lên ba dropdown sau mỗi lần lọc lại; chuỗi rỗng là "All".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SelectValues {
    pub specimen: String,
    pub gender: String,
    pub outcome: String,
}

impl SelectValues {
    /// Cặp (id phần tử, giá trị) theo thứ tự hiển thị.
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (SPECIMEN_SELECT_ID, self.specimen.as_str()),
            (GENDER_SELECT_ID, self.gender.as_str()),
            (OUTCOME_SELECT_ID, self.outcome.as_str()),
        ]
    }
}

/// Giá trị khả dụng cho ba dropdown, đã sắp xếp và loại trùng.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterOptions {
    pub specimen_types: Vec<String>,
    pub genders: Vec<String>,
    pub outcomes: Vec<String>,
}

impl FilterOptions {
    /// Nhãn của lựa chọn rỗng đứng đầu mỗi dropdown.
    pub const ALL_LABEL: &'static str = "All";

    pub fn from_records(records: &[IsolateRecord]) -> Self {
        Self {
            specimen_types: distinct_sorted(
                records.iter().map(|r| r.specimen_type.as_str()),
                true,
            ),
            genders: distinct_sorted(records.iter().map(|r| r.gender.as_str()), false),
            outcomes: distinct_sorted(records.iter().map(|r| r.outcome.as_str()), true),
        }
    }
}

/// Giá trị không rỗng, loại trùng, theo thứ tự tăng dần.
fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>, skip_unknown: bool) -> Vec<String> {
    values
        .filter(|value| !value.is_empty() && !(skip_unknown && *value == UNKNOWN))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

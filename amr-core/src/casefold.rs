//! So khớp chuỗi không phân biệt hoa thường, dùng chung cho chuẩn hóa và tổng hợp.

/// Chuỗi đã chuyển về dạng so sánh (chữ hoa).
pub fn fold(value: &str) -> String {
    value.to_uppercase()
}

pub fn eq_ignore_case(left: &str, right: &str) -> bool {
    fold(left) == fold(right)
}

/// `haystack` có chứa `needle` khi bỏ qua hoa thường hay không.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

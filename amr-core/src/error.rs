/// Lỗi chung khi nạp dữ liệu dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Dữ liệu đầu vào thiếu thông tin tối thiểu: {0}")]
    MissingData(String),
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
    #[error("Cấu hình không hợp lệ: {0}")]
    Config(String),
    #[error("Lỗi I/O: {0}")]
    Io(#[from] std::io::Error),
}

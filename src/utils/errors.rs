use thiserror::Error;

/// Client-side input problems. These block a submission before any request is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Vui lòng nhập địa chỉ ví cần phân tích.")]
    MissingAddress,

    #[error("Vui lòng chọn tệp CSV giao dịch.")]
    MissingFile,

    #[error("Vui lòng nhập payload JSON hợp lệ.")]
    EmptyPayload,

    #[error("Dữ liệu JSON không hợp lệ. Kiểm tra lại định dạng.")]
    InvalidJson,

    #[error("Vui lòng nhập địa chỉ ví hoặc mã giao dịch.")]
    EmptyInput,

    #[error("Địa chỉ ví không hợp lệ (cần 0x + 40 ký tự hex).")]
    BadAddressFormat,

    #[error("Mã giao dịch không hợp lệ (cần 0x + 64 ký tự hex).")]
    BadHashFormat,
}

#[derive(Error, Debug)]
pub enum RadarError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Non-success status or transport failure, already normalized to a user message
    #[error("{0}")]
    Request(String),

    #[error("Phản hồi từ máy chủ không hợp lệ: {0}")]
    MalformedResponse(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Request superseded by a newer submission")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl RadarError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RadarError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, RadarError>;

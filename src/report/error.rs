// ==========================================
// 手术室需求与产能规划 - 报表层错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV 写入失败: {0}")]
    CsvWriteError(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("文件写入失败: {0}")]
    IoError(#[from] std::io::Error),

    #[error("输出编码错误: {0}")]
    EncodingError(String),
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;

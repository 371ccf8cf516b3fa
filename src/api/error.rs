// ==========================================
// 手术室需求与产能规划 - API层错误类型
// ==========================================
// 职责: 汇总各层错误, 转换为面向用户的错误消息
// ==========================================

use crate::config::error::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::error::ImportError;
use crate::report::error::ReportError;
use thiserror::Error;

/// API层错误类型
/// 任一错误均终止本次测算, 不返回部分结果
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    /// 输入值非法 (负数、比例越界、周数越界等)
    #[error("数据验证失败: field={field}, {reason}")]
    ValidationError { field: String, reason: String },

    /// 退化输入 (空需求表、零时长等导致无法计算)
    #[error("退化输入: {0}")]
    DegenerateInput(String),

    // ==========================================
    // 导入/配置/导出错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("导出失败: {0}")]
    ExportError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 EngineError 转换
// ==========================================
impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation {
                field,
                value,
                reason,
            } => ApiError::ValidationError {
                field,
                reason: format!("{} (value={})", reason, value),
            },
            EngineError::DegenerateInput(msg) => ApiError::DegenerateInput(msg),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        ApiError::ExportError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

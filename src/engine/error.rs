// ==========================================
// 手术室需求与产能规划 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
///
/// 所有数值误用 (负数/越界/零时长) 立即失败, 不产生 NaN 或负人数
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 输入校验失败 (负数、比例越界、非有限数)
    #[error("输入校验失败 (字段 {field}, 值 {value}): {reason}")]
    Validation {
        field: String,
        value: f64,
        reason: String,
    },

    /// 数学上无定义的运算 (除以零、空集合求均值)
    #[error("退化输入: {0}")]
    DegenerateInput(String),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;

impl EngineError {
    pub fn validation(field: &str, value: f64, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.to_string(),
            value,
            reason: reason.into(),
        }
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        EngineError::DegenerateInput(message.into())
    }
}

// ==========================================
// 校验辅助函数
// ==========================================

/// 要求有限且非负
pub fn ensure_non_negative(field: &str, value: f64) -> EngineResult<f64> {
    if !value.is_finite() {
        return Err(EngineError::validation(field, value, "必须为有限数"));
    }
    if value < 0.0 {
        return Err(EngineError::validation(field, value, "不能为负数"));
    }
    Ok(value)
}

/// 要求位于 [0, 1]
pub fn ensure_fraction(field: &str, value: f64) -> EngineResult<f64> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(EngineError::validation(field, value, "必须位于 [0, 1]"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_non_negative() {
        assert_eq!(ensure_non_negative("additions", 0.0), Ok(0.0));
        assert!(matches!(
            ensure_non_negative("additions", -1.0),
            Err(EngineError::Validation { .. })
        ));
        assert!(ensure_non_negative("additions", f64::NAN).is_err());
        assert!(ensure_non_negative("additions", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_fraction() {
        assert!(ensure_fraction("utilisation", 0.0).is_ok());
        assert!(ensure_fraction("utilisation", 1.0).is_ok());
        assert!(ensure_fraction("utilisation", 1.01).is_err());
        assert!(ensure_fraction("utilisation", -0.1).is_err());
    }

    #[test]
    fn test_error_message_contains_field() {
        let err = EngineError::validation("weeks", 60.0, "超出范围");
        assert!(err.to_string().contains("weeks"));
    }
}

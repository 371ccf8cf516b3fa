// ==========================================
// 手术室需求与产能规划 - 字段映射器实现
// ==========================================
// 阶段 1: 原始行 -> ProcedureRecord
// 列名匹配不区分大小写, 首尾空白忽略
// ==========================================

use crate::domain::procedure::ProcedureRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::procedure_importer_trait::FieldMapper;
use std::collections::HashMap;

/// 标准列名
pub mod columns {
    pub const PROCEDURE: &str = "Procedure";
    pub const ANNUAL_DEMAND_CASES: &str = "Annual Demand (Cases)";
    pub const AVERAGE_DURATION_HOURS: &str = "Average Duration (Hours)";

    pub const ALL: [&str; 3] = [PROCEDURE, ANNUAL_DEMAND_CASES, AVERAGE_DURATION_HOURS];
}

pub struct ProcedureFieldMapper;

impl ProcedureFieldMapper {
    /// 检查表头是否包含全部必需列
    pub fn check_required_columns(&self, headers: &[&str]) -> ImportResult<()> {
        for required in columns::ALL {
            let found = headers
                .iter()
                .any(|h| h.trim().eq_ignore_ascii_case(required));
            if !found {
                return Err(ImportError::MissingColumn(required.to_string()));
            }
        }
        Ok(())
    }

    // 辅助函数: 不区分大小写取值
    fn get_value<'a>(&self, row: &'a HashMap<String, String>, column: &str) -> Option<&'a str> {
        row.iter()
            .find(|(k, _)| k.trim().eq_ignore_ascii_case(column))
            .map(|(_, v)| v.trim())
    }

    fn require_value<'a>(
        &self,
        row: &'a HashMap<String, String>,
        column: &str,
        row_number: usize,
    ) -> ImportResult<&'a str> {
        self.get_value(row, column)
            .ok_or_else(|| ImportError::MissingColumn(column.to_string()))
            .and_then(|v| {
                if v.is_empty() {
                    Err(ImportError::FieldMappingError {
                        row: row_number,
                        message: format!("{} 为空", column),
                    })
                } else {
                    Ok(v)
                }
            })
    }

    // 辅助函数: 解析 f64
    fn parse_f64(&self, value: &str, field: &str, row_number: usize) -> ImportResult<f64> {
        let parsed = value
            .parse::<f64>()
            .map_err(|e| ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("无法解析为数字: {} ({})", value, e),
            })?;
        if !parsed.is_finite() {
            return Err(ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("非有限数值: {}", value),
            });
        }
        Ok(parsed)
    }

    // 辅助函数: 解析非负整数病例数
    // Excel 单元格整数常被读为 "120" 或 "120.0", 两者均接受
    fn parse_case_count(&self, value: &str, field: &str, row_number: usize) -> ImportResult<f64> {
        let parsed = self.parse_f64(value, field, row_number)?;
        if parsed < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: field.to_string(),
                value: parsed,
                min: 0.0,
                max: f64::MAX,
            });
        }
        if parsed.fract() != 0.0 {
            return Err(ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("病例数必须为整数: {}", value),
            });
        }
        Ok(parsed)
    }
}

impl FieldMapper for ProcedureFieldMapper {
    fn map_to_procedure(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<ProcedureRecord> {
        let name = self.require_value(row, columns::PROCEDURE, row_number)?;

        let cases_raw = self.require_value(row, columns::ANNUAL_DEMAND_CASES, row_number)?;
        let annual_cases =
            self.parse_case_count(cases_raw, columns::ANNUAL_DEMAND_CASES, row_number)?;

        let duration_raw = self.require_value(row, columns::AVERAGE_DURATION_HOURS, row_number)?;
        let avg_duration_hours =
            self.parse_f64(duration_raw, columns::AVERAGE_DURATION_HOURS, row_number)?;
        if avg_duration_hours < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: columns::AVERAGE_DURATION_HOURS.to_string(),
                value: avg_duration_hours,
                min: 0.0,
                max: f64::MAX,
            });
        }

        Ok(ProcedureRecord::new(name, annual_cases, avg_duration_hours))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, cases: &str, hours: &str) -> HashMap<String, String> {
        let mut row = HashMap::new();
        row.insert("Procedure".to_string(), name.to_string());
        row.insert("Annual Demand (Cases)".to_string(), cases.to_string());
        row.insert("Average Duration (Hours)".to_string(), hours.to_string());
        row
    }

    #[test]
    fn test_map_valid_row() {
        let record = ProcedureFieldMapper
            .map_to_procedure(&row("Hip Replacement", "120", "2.5"), 1)
            .unwrap();
        assert_eq!(record.name, "Hip Replacement");
        assert_eq!(record.annual_cases, 120.0);
        assert_eq!(record.avg_duration_hours, 2.5);
    }

    #[test]
    fn test_headers_case_insensitive() {
        let mut raw = HashMap::new();
        raw.insert("procedure".to_string(), "A".to_string());
        raw.insert("ANNUAL DEMAND (CASES)".to_string(), "10".to_string());
        raw.insert(" average duration (hours) ".to_string(), "1".to_string());

        let record = ProcedureFieldMapper.map_to_procedure(&raw, 1).unwrap();
        assert_eq!(record.annual_cases, 10.0);
    }

    #[test]
    fn test_excel_float_integer_accepted() {
        let record = ProcedureFieldMapper
            .map_to_procedure(&row("A", "120.0", "1"), 1)
            .unwrap();
        assert_eq!(record.annual_cases, 120.0);
    }

    #[test]
    fn test_fractional_cases_rejected() {
        let result = ProcedureFieldMapper.map_to_procedure(&row("A", "12.5", "1"), 3);
        assert!(matches!(
            result,
            Err(ImportError::TypeConversionError { row: 3, .. })
        ));
    }

    #[test]
    fn test_negative_cases_rejected() {
        let result = ProcedureFieldMapper.map_to_procedure(&row("A", "-1", "1"), 2);
        assert!(matches!(result, Err(ImportError::ValueRangeError { row: 2, .. })));
    }

    #[test]
    fn test_non_numeric_duration_rejected() {
        let result = ProcedureFieldMapper.map_to_procedure(&row("A", "5", "abc"), 4);
        match result {
            Err(ImportError::TypeConversionError { row, field, .. }) => {
                assert_eq!(row, 4);
                assert_eq!(field, "Average Duration (Hours)");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = ProcedureFieldMapper.map_to_procedure(&row("", "5", "1"), 1);
        assert!(matches!(result, Err(ImportError::FieldMappingError { .. })));
    }

    #[test]
    fn test_check_required_columns() {
        let mapper = ProcedureFieldMapper;
        assert!(mapper
            .check_required_columns(&["procedure", "Annual Demand (Cases)", "Average Duration (Hours)"])
            .is_ok());
        assert!(matches!(
            mapper.check_required_columns(&["Procedure", "Annual Demand (Cases)"]),
            Err(ImportError::MissingColumn(_))
        ));
    }
}

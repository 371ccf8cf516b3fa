// ==========================================
// 手术室需求与产能规划 - 导入 Trait
// ==========================================
// 职责: 定义文件解析与字段映射接口（不包含实现）
// ==========================================

use crate::domain::procedure::ProcedureRecord;
use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始表: 表头 (已去空白/BOM) + 数据行 (HashMap<列名, 值>, 已跳过空白行)
///
/// 表头与数据行分开保存, 无数据行时仍可校验列名
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<HashMap<String, String>>,
}

impl RawTable {
    pub fn header_refs(&self) -> Vec<&str> {
        self.headers.iter().map(String::as_str).collect()
    }
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 可处理的扩展名 (小写)
    fn extensions(&self) -> &'static [&'static str];

    /// 解析文件为原始表
    ///
    /// # 返回
    /// - Err: 文件读取错误、格式错误
    fn parse_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: ProcedureFieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将原始行记录映射为 ProcedureRecord
    ///
    /// # 参数
    /// - row: 原始行记录（HashMap<列名, 值>）
    /// - row_number: 数据行号（从 1 开始，用于错误定位）
    fn map_to_procedure(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> ImportResult<ProcedureRecord>;
}

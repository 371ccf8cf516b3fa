// ==========================================
// 手术室需求与产能规划 - 手术需求导入器
// ==========================================
// 流程: 文件解析 -> 必需列检查 -> 字段映射 -> 导入汇总
// 任一行失败即整体失败 (不产生部分结果)
// ==========================================

use crate::domain::procedure::ProcedureRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::ProcedureFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::procedure_importer_trait::FieldMapper;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// ImportSummary - 导入汇总
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: Uuid,
    pub file_name: String,
    pub rows_read: usize,
    pub rows_imported: usize,
    pub imported_at: DateTime<Utc>,
}

// ==========================================
// ProcedureImporter
// ==========================================
pub struct ProcedureImporter {
    file_parser: UniversalFileParser,
    field_mapper: ProcedureFieldMapper,
}

impl ProcedureImporter {
    pub fn new() -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper: ProcedureFieldMapper,
        }
    }

    /// 从 CSV/Excel 文件导入手术需求记录
    ///
    /// # 返回
    /// - Ok((records, summary)): 按文件行序排列的记录
    /// - Err(ImportError): 首个失败行的错误 (行号从 1 开始, 不含表头)
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<(Vec<ProcedureRecord>, ImportSummary)> {
        let path = file_path.as_ref();
        let table = self.file_parser.parse(path)?;
        self.field_mapper
            .check_required_columns(&table.header_refs())?;

        let records = table
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| self.field_mapper.map_to_procedure(row, idx + 1))
            .collect::<ImportResult<Vec<_>>>()?;

        let summary = ImportSummary {
            batch_id: Uuid::new_v4(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            rows_read: table.rows.len(),
            rows_imported: records.len(),
            imported_at: Utc::now(),
        };

        info!(
            batch_id = %summary.batch_id,
            rows_imported = summary.rows_imported,
            "手术需求导入完成"
        );

        Ok((records, summary))
    }
}

impl Default for ProcedureImporter {
    fn default() -> Self {
        Self::new()
    }
}

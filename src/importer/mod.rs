// ==========================================
// 手术室需求与产能规划 - 导入层
// ==========================================
// 职责: 外部手术需求表导入, 生成 ProcedureRecord
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod procedure_importer;
pub mod procedure_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, ProcedureFieldMapper};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use procedure_importer::{ImportSummary, ProcedureImporter};

// 重导出 Trait 接口
pub use procedure_importer_trait::{FieldMapper, FileParser, RawTable};

// ==========================================
// 手术室需求与产能规划 - 报表层
// ==========================================
// 职责: 汇总记录, CSV/JSON 导出, 文本报告
// ==========================================

pub mod csv_export;
pub mod error;
pub mod summary;
pub mod text;
pub mod waterfall_export;

pub use csv_export::{summary_to_csv_string, write_summary_csv};
pub use error::{ReportError, ReportResult};
pub use summary::SummaryRecord;
pub use text::render_report;
pub use waterfall_export::{waterfalls_to_json, write_waterfall_json};

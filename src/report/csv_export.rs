// ==========================================
// 手术室需求与产能规划 - 汇总 CSV 导出
// ==========================================
// 格式: 一行表头 + 一行数据
// ==========================================

use crate::report::error::{ReportError, ReportResult};
use crate::report::summary::SummaryRecord;
use csv::Writer;
use std::path::Path;
use tracing::debug;

/// 写入汇总 CSV 文件
pub fn write_summary_csv<P: AsRef<Path>>(summary: &SummaryRecord, path: P) -> ReportResult<()> {
    let path = path.as_ref();
    let mut writer = Writer::from_path(path)?;
    writer.serialize(summary)?;
    writer.flush()?;
    debug!(path = %path.display(), "汇总 CSV 已写入");
    Ok(())
}

/// 汇总记录转 CSV 字符串
pub fn summary_to_csv_string(summary: &SummaryRecord) -> ReportResult<String> {
    let mut writer = Writer::from_writer(Vec::new());
    writer.serialize(summary)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::EncodingError(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReportError::EncodingError(e.to_string()))
}

// ==========================================
// 手术室需求与产能规划 - 瀑布图数据导出
// ==========================================
// 每期一组 FlowStep, 顺序与符号约定即输出契约
// ==========================================

use crate::domain::waiting_list::FlowStep;
use crate::engine::orchestrator::PlanningReport;
use crate::report::error::ReportResult;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
struct WaterfallPeriod<'a> {
    period: usize,
    steps: &'a [FlowStep],
}

fn periods(report: &PlanningReport) -> Vec<WaterfallPeriod<'_>> {
    report
        .waterfalls
        .iter()
        .enumerate()
        .map(|(idx, steps)| WaterfallPeriod {
            period: idx + 1,
            steps,
        })
        .collect()
}

/// 瀑布图数据转 JSON 字符串
pub fn waterfalls_to_json(report: &PlanningReport) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(&periods(report))?)
}

/// 写入瀑布图 JSON 文件
pub fn write_waterfall_json<P: AsRef<Path>>(report: &PlanningReport, path: P) -> ReportResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &periods(report))?;
    Ok(())
}

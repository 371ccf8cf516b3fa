// ==========================================
// 手术室需求与产能规划 - 汇总记录
// ==========================================
// 导出/渲染用的扁平汇总 (CSV 单行)
// ==========================================

use crate::engine::orchestrator::PlanningReport;
use serde::{Deserialize, Serialize};

// ==========================================
// SummaryRecord - 汇总记录
// ==========================================
// 需求取分析年度; 产能取等候名单所选产能来源;
// 期末数据取最后一期流转结果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub total_demand_cases: f64,
    pub total_demand_minutes: f64,
    pub total_capacity_minutes: f64,
    pub required_capacity_minutes: f64,
    pub waiting_list_end: f64,
    pub backlog_end: f64,
}

impl SummaryRecord {
    pub fn from_report(report: &PlanningReport) -> Self {
        let demand = report.demand_for_planning_year();
        let end = report.final_outcome().map(|outcome| outcome.end).unwrap_or_default();

        Self {
            total_demand_cases: demand.total_cases,
            total_demand_minutes: demand.total_minutes,
            total_capacity_minutes: report.waiting_list_capacity_minutes,
            required_capacity_minutes: report.required_capacity_minutes,
            waiting_list_end: end.total(),
            backlog_end: end.backlog,
        }
    }
}

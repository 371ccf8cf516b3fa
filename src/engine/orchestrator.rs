// ==========================================
// 手术室需求与产能规划 - 规划编排器
// ==========================================
// 职责: 串联 需求汇总 → 产能测算 → 填充模拟 → 会话测算 → 等候名单流转
// 输入: 需求表快照 + 规划情景 + 乱序提供者
// 输出: PlanningReport (任一步失败则整体失败, 不返回部分结果)
// ==========================================

use crate::config::scenario::ScenarioConfig;
use crate::domain::capacity::CapacityParameters;
use crate::domain::procedure::{DemandTotals, PackingRecord, ProcedureRecord};
use crate::domain::types::{CapacitySource, PlanningYear};
use crate::domain::waiting_list::{FlowInputs, FlowOutcome, FlowStep, WaitingListState};
use crate::engine::capacity_filler::{CapacityFiller, FillResult};
use crate::engine::demand_aggregator::DemandAggregator;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::session_planner::{
    CasesGap, DemandCapacityComparison, RequiredSessions, SessionPlanner, SessionsGap,
};
use crate::engine::shuffler::CaseShuffler;
use crate::engine::waiting_list_flow::WaitingListFlowEngine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// PlanningReport - 规划测算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,

    // ===== 需求 =====
    pub demand_last_year: DemandTotals,
    pub demand_next_year: DemandTotals,
    pub top_by_cases: Vec<ProcedureRecord>,
    pub top_by_minutes: Vec<ProcedureRecord>,

    // ===== 产能 =====
    pub last_year_capacity: CapacityParameters,
    pub next_year_capacity: CapacityParameters,
    pub last_year_total_sessions: f64,
    pub next_year_total_sessions: f64,
    pub last_year_capacity_minutes: f64,
    pub next_year_capacity_minutes: f64,
    pub last_year_comparison: DemandCapacityComparison,

    // ===== 填充模拟 =====
    pub simulated_last_year: FillResult,
    pub simulated_next_year: FillResult,
    pub actual_cases_treated_last_year: Option<f64>,

    // ===== 会话测算 =====
    pub required_capacity_minutes: f64,
    pub required_sessions: RequiredSessions,
    pub sessions_gap: SessionsGap,
    pub cases_gap: CasesGap,

    // ===== 等候名单 =====
    pub planning_year: PlanningYear,
    pub capacity_source: CapacitySource,
    pub target_weeks: u32,
    pub waiting_list_capacity_minutes: f64,
    pub avg_case_duration_minutes: f64,
    pub waiting_list_periods: Vec<FlowOutcome>,
    pub waterfalls: Vec<Vec<FlowStep>>,
}

impl PlanningReport {
    /// 分析年度对应的需求汇总
    pub fn demand_for_planning_year(&self) -> DemandTotals {
        match self.planning_year {
            PlanningYear::LastYear => self.demand_last_year,
            PlanningYear::NextYear => self.demand_next_year,
        }
    }

    /// 最后一期流转结果
    pub fn final_outcome(&self) -> Option<&FlowOutcome> {
        self.waiting_list_periods.last()
    }
}

// ==========================================
// PlanningOrchestrator - 规划编排器
// ==========================================
pub struct PlanningOrchestrator {
    aggregator: DemandAggregator,
    filler: CapacityFiller,
    planner: SessionPlanner,
    flow_engine: WaitingListFlowEngine,
}

impl PlanningOrchestrator {
    pub fn new() -> Self {
        Self {
            aggregator: DemandAggregator::new(),
            filler: CapacityFiller::new(),
            planner: SessionPlanner::new(),
            flow_engine: WaitingListFlowEngine::new(),
        }
    }

    /// 执行完整测算
    ///
    /// # 参数
    /// - `records`: 需求表快照 (按值传入, 编排器不持有状态)
    /// - `scenario`: 规划情景
    /// - `shuffler`: 填充模拟的乱序提供者 (去年、明年两次模拟共用)
    #[instrument(skip_all, fields(records_count = records.len()))]
    pub fn run(
        &self,
        records: Vec<ProcedureRecord>,
        scenario: &ScenarioConfig,
        shuffler: &mut dyn CaseShuffler,
    ) -> EngineResult<PlanningReport> {
        let wl = &scenario.waiting_list;
        if wl.periods == 0 {
            return Err(EngineError::validation("periods", 0.0, "推演期数至少为 1"));
        }

        // 1. 需求
        let demand_last_year = self.aggregator.aggregate_demand(&records);
        let projected = self
            .aggregator
            .project_next_period(&records, scenario.demand_multiplier)?;
        let demand_next_year = self.aggregator.aggregate_demand(&projected);
        let top_by_cases = self.aggregator.top_procedures_by_cases(&records, scenario.top_n);
        let top_by_minutes = self
            .aggregator
            .top_procedures_by_minutes(&records, scenario.top_n);

        // 2. 产能
        let last_year_capacity = scenario.last_year_capacity;
        let next_year_capacity = scenario.next_year_capacity.resolve(&last_year_capacity);
        let last_year_capacity_minutes =
            self.aggregator.compute_capacity_minutes(&last_year_capacity);
        let next_year_capacity_minutes =
            self.aggregator.compute_capacity_minutes(&next_year_capacity);
        let last_year_comparison = self
            .planner
            .compare_demand_capacity(demand_last_year.total_minutes, last_year_capacity_minutes);

        // 3. 填充模拟 (去年用年病例数, 明年用预测病例数)
        let last_year_packing: Vec<PackingRecord> =
            records.iter().map(PackingRecord::from_procedure).collect();
        let next_year_packing: Vec<PackingRecord> =
            projected.iter().map(PackingRecord::from_procedure).collect();
        let simulated_last_year =
            self.filler
                .simulate_fill(&last_year_packing, last_year_capacity_minutes, shuffler)?;
        let simulated_next_year =
            self.filler
                .simulate_fill(&next_year_packing, next_year_capacity_minutes, shuffler)?;

        // 4. 会话测算
        let required_capacity_minutes = demand_next_year.total_minutes;
        let required_sessions = self.planner.required_sessions(
            required_capacity_minutes,
            next_year_capacity.session_duration_hours,
            next_year_capacity.utilisation,
            next_year_capacity.weeks,
        )?;
        let sessions_gap = self.planner.sessions_gap(
            next_year_capacity.sessions_per_week,
            required_sessions.sessions_per_week,
        );
        let cases_gap = self.planner.cases_gap(
            simulated_next_year.cases_treated() as f64,
            demand_next_year.total_cases,
        );

        // 5. 等候名单
        let (year_table, year_demand) = match wl.planning_year {
            PlanningYear::LastYear => (&records, demand_last_year),
            PlanningYear::NextYear => (&projected, demand_next_year),
        };
        let waiting_list_capacity_minutes = match wl.capacity_source {
            CapacitySource::LastYear => last_year_capacity_minutes,
            CapacitySource::NextYearExpected => next_year_capacity_minutes,
            CapacitySource::NextYearRequired => required_capacity_minutes,
        };
        let avg_case_duration_minutes = self.aggregator.average_duration_minutes(year_table)?;
        let inputs = FlowInputs {
            additions: wl.additions.unwrap_or(year_demand.total_cases),
            capacity_minutes: waiting_list_capacity_minutes,
            backlog_capacity_fraction: wl.backlog_capacity_fraction,
            avg_case_duration_minutes,
        };
        let start = WaitingListState::from_start(wl.waiting_list_start, wl.backlog_fraction);
        let waiting_list_periods = self.flow_engine.project(start, wl.periods, &inputs)?;
        let waterfalls = waiting_list_periods
            .iter()
            .map(|outcome| self.flow_engine.waterfall(outcome))
            .collect();

        let report = PlanningReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            demand_last_year,
            demand_next_year,
            top_by_cases,
            top_by_minutes,
            last_year_capacity,
            next_year_capacity,
            last_year_total_sessions: last_year_capacity.total_sessions(),
            next_year_total_sessions: next_year_capacity.total_sessions(),
            last_year_capacity_minutes,
            next_year_capacity_minutes,
            last_year_comparison,
            simulated_last_year,
            simulated_next_year,
            actual_cases_treated_last_year: scenario
                .actual_cases_treated_last_year
                .filter(|cases| *cases > 0.0),
            required_capacity_minutes,
            required_sessions,
            sessions_gap,
            cases_gap,
            planning_year: wl.planning_year,
            capacity_source: wl.capacity_source,
            target_weeks: wl.target_weeks,
            waiting_list_capacity_minutes,
            avg_case_duration_minutes,
            waiting_list_periods,
            waterfalls,
        };

        info!(
            run_id = %report.run_id,
            demand_next_year_cases = report.demand_next_year.total_cases,
            expected_treated_next_year = report.simulated_next_year.cases_treated(),
            assessment = %report.sessions_gap.assessment,
            "规划测算完成"
        );
        Ok(report)
    }
}

impl Default for PlanningOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::scenario::WaitingListScenario;
    use crate::domain::capacity::CapacityModel;
    use crate::engine::shuffler::SeededShuffler;

    fn scenario() -> ScenarioConfig {
        ScenarioConfig {
            demand_multiplier: 1.0,
            last_year_capacity: CapacityParameters {
                weeks: 48,
                sessions_per_week: 10.0,
                session_duration_hours: 4.0,
                utilisation: 0.8,
            },
            next_year_capacity: CapacityModel::SameAsLastYear,
            actual_cases_treated_last_year: None,
            waiting_list: WaitingListScenario {
                planning_year: PlanningYear::NextYear,
                waiting_list_start: 500.0,
                target_weeks: 18,
                backlog_fraction: 0.2,
                additions: Some(300.0),
                capacity_source: CapacitySource::NextYearExpected,
                backlog_capacity_fraction: 0.3,
                periods: 1,
            },
            rng_seed: Some(7),
            top_n: 10,
        }
    }

    fn records() -> Vec<ProcedureRecord> {
        vec![ProcedureRecord::new("Procedure A", 100.0, 2.0)]
    }

    #[test]
    fn test_run_default_scenario() {
        let orchestrator = PlanningOrchestrator::new();
        let mut shuffler = SeededShuffler::new(Some(7));
        let report = orchestrator.run(records(), &scenario(), &mut shuffler).unwrap();

        assert_eq!(report.demand_last_year.total_minutes, 12_000.0);
        assert!((report.last_year_capacity_minutes - 92_160.0).abs() < 1e-6);
        // 所有 100 例 (12000 分钟) 都能放入 92160 分钟
        assert_eq!(report.simulated_next_year.cases_treated(), 100);
        assert_eq!(report.waiting_list_periods.len(), 1);
        assert_eq!(report.waterfalls[0].len(), 7);
        assert_eq!(report.avg_case_duration_minutes, 120.0);
    }

    #[test]
    fn test_empty_table_aborts_run() {
        let orchestrator = PlanningOrchestrator::new();
        let mut shuffler = SeededShuffler::new(Some(7));
        let result = orchestrator.run(vec![], &scenario(), &mut shuffler);
        assert!(matches!(result, Err(EngineError::DegenerateInput(_))));
    }

    #[test]
    fn test_zero_periods_rejected() {
        let orchestrator = PlanningOrchestrator::new();
        let mut s = scenario();
        s.waiting_list.periods = 0;
        let mut shuffler = SeededShuffler::new(Some(7));
        assert!(matches!(
            orchestrator.run(records(), &s, &mut shuffler),
            Err(EngineError::Validation { .. })
        ));
    }

    #[test]
    fn test_additions_default_to_planning_year_demand() {
        let orchestrator = PlanningOrchestrator::new();
        let mut s = scenario();
        s.demand_multiplier = 1.5;
        s.waiting_list.additions = None;
        let mut shuffler = SeededShuffler::new(Some(7));
        let report = orchestrator.run(records(), &s, &mut shuffler).unwrap();
        assert_eq!(report.waiting_list_periods[0].additions, 150.0);
    }

    #[test]
    fn test_actual_cases_zero_is_omitted() {
        let orchestrator = PlanningOrchestrator::new();
        let mut s = scenario();
        s.actual_cases_treated_last_year = Some(0.0);
        let mut shuffler = SeededShuffler::new(Some(7));
        let report = orchestrator.run(records(), &s, &mut shuffler).unwrap();
        assert_eq!(report.actual_cases_treated_last_year, None);
    }
}

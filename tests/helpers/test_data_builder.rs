// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use std::io::Write;

use tempfile::{Builder, NamedTempFile};
use theatre_capacity::config::{ScenarioConfig, WaitingListScenario};
use theatre_capacity::{
    CapacityModel, CapacityParameters, CapacitySource, PlanningYear, ProcedureRecord,
};

// ==========================================
// 需求表构建器
// ==========================================

pub struct ProcedureTableBuilder {
    records: Vec<ProcedureRecord>,
}

impl ProcedureTableBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn procedure(mut self, name: &str, cases: u64, hours: f64) -> Self {
        self.records
            .push(ProcedureRecord::new(name, cases as f64, hours));
        self
    }

    pub fn build(self) -> Vec<ProcedureRecord> {
        self.records
    }

    /// 写入临时 CSV 文件（标准列名）
    pub fn write_csv(self) -> NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Procedure,Annual Demand (Cases),Average Duration (Hours)").unwrap();
        for record in &self.records {
            writeln!(
                file,
                "{},{},{}",
                record.name, record.annual_cases, record.avg_duration_hours
            )
            .unwrap();
        }
        file.flush().unwrap();
        file
    }
}

/// 常用需求表: 三种手术, 共 220 例
pub fn sample_procedures() -> Vec<ProcedureRecord> {
    ProcedureTableBuilder::new()
        .procedure("Hip Replacement", 60, 2.5)
        .procedure("Cataract", 120, 0.5)
        .procedure("Hernia Repair", 40, 1.5)
        .build()
}

// ==========================================
// 情景构建器
// ==========================================

pub struct ScenarioBuilder {
    scenario: ScenarioConfig,
}

impl ScenarioBuilder {
    pub fn new() -> Self {
        Self {
            scenario: ScenarioConfig {
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
                    additions: None,
                    capacity_source: CapacitySource::NextYearExpected,
                    backlog_capacity_fraction: 0.3,
                    periods: 1,
                },
                rng_seed: Some(42),
                top_n: 10,
            },
        }
    }

    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.scenario.demand_multiplier = multiplier;
        self
    }

    pub fn last_year_capacity(mut self, params: CapacityParameters) -> Self {
        self.scenario.last_year_capacity = params;
        self
    }

    pub fn next_year_model(mut self, model: CapacityModel) -> Self {
        self.scenario.next_year_capacity = model;
        self
    }

    pub fn waiting_list_start(mut self, total: f64, backlog_fraction: f64) -> Self {
        self.scenario.waiting_list.waiting_list_start = total;
        self.scenario.waiting_list.backlog_fraction = backlog_fraction;
        self
    }

    pub fn additions(mut self, additions: f64) -> Self {
        self.scenario.waiting_list.additions = Some(additions);
        self
    }

    pub fn capacity_source(mut self, source: CapacitySource) -> Self {
        self.scenario.waiting_list.capacity_source = source;
        self
    }

    pub fn planning_year(mut self, year: PlanningYear) -> Self {
        self.scenario.waiting_list.planning_year = year;
        self
    }

    pub fn periods(mut self, periods: usize) -> Self {
        self.scenario.waiting_list.periods = periods;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.scenario.rng_seed = seed;
        self
    }

    pub fn build(self) -> ScenarioConfig {
        self.scenario
    }
}

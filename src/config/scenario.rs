use crate::domain::capacity::{CapacityModel, CapacityParameters};
use crate::domain::types::{CapacitySource, PlanningYear};
use serde::{Deserialize, Serialize};

/// 规划情景（一次完整测算的全部输入参数）
///
/// 存储位置：JSON 文件（CLI `--scenario`），缺省值来自 ConfigManager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// 明年需求增长系数（>= 0）
    pub demand_multiplier: f64,

    /// 去年会话产能参数
    pub last_year_capacity: CapacityParameters,

    /// 明年产能模型（默认沿用去年）
    #[serde(default)]
    pub next_year_capacity: CapacityModel,

    /// 去年实际治疗病例数（可选，仅用于对比展示）
    #[serde(default)]
    pub actual_cases_treated_last_year: Option<f64>,

    /// 等候名单分析参数
    pub waiting_list: WaitingListScenario,

    /// 产能填充模拟随机种子（缺省则每次结果不同）
    #[serde(default)]
    pub rng_seed: Option<u64>,

    /// 排行榜条数
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// 等候名单分析参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaitingListScenario {
    /// 分析年度（决定默认新增人数与平均时长所用需求表）
    pub planning_year: PlanningYear,

    /// 期初等候名单人数
    pub waiting_list_start: f64,

    /// 目标等待周数（描述性，不参与计算）
    #[serde(default = "default_target_weeks")]
    pub target_weeks: u32,

    /// 期初超期比例（0~1）
    pub backlog_fraction: f64,

    /// 期内新增人数；缺省取分析年度的需求病例数
    #[serde(default)]
    pub additions: Option<f64>,

    /// 使用哪一种产能
    pub capacity_source: CapacitySource,

    /// 专用于超期病例的产能比例（0~1）
    pub backlog_capacity_fraction: f64,

    /// 串联推演期数（>= 1）
    #[serde(default = "default_periods")]
    pub periods: usize,
}

fn default_top_n() -> usize {
    10
}

fn default_target_weeks() -> u32 {
    18
}

fn default_periods() -> usize {
    1
}

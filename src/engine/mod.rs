// ==========================================
// 手术室需求与产能规划 - 引擎层
// ==========================================
// 职责: 纯计算规则 (无状态, 每次交互基于当前输入快照重新计算)
// ==========================================

pub mod capacity_filler;
pub mod demand_aggregator;
pub mod error;
pub mod orchestrator;
pub mod session_planner;
pub mod shuffler;
pub mod waiting_list_flow;

// 重导出核心类型
pub use capacity_filler::{CapacityFiller, FillResult, MAX_POOL_UNITS};
pub use demand_aggregator::DemandAggregator;
pub use error::{EngineError, EngineResult};
pub use orchestrator::{PlanningOrchestrator, PlanningReport};
pub use session_planner::{
    CasesGap, DemandCapacityComparison, RequiredSessions, SessionPlanner, SessionsGap,
};
pub use shuffler::{CaseShuffler, IdentityShuffler, SeededShuffler};
pub use waiting_list_flow::{running_level, WaitingListFlowEngine};

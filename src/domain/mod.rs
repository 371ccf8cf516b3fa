// ==========================================
// 手术室需求与产能规划 - 领域模型层
// ==========================================
// 职责: 定义手术需求、会话产能、等候名单等实体与类型
// 红线: 不含引擎逻辑,不含文件读写
// ==========================================

pub mod capacity;
pub mod procedure;
pub mod types;
pub mod waiting_list;

// 重导出核心类型
pub use capacity::{CapacityBudget, CapacityConstraint, CapacityModel, CapacityParameters};
pub use procedure::{CaseUnit, DemandTotals, PackingRecord, ProcedureRecord};
pub use types::{CapacityAssessment, CapacitySource, MeasureKind, PlanningYear};
pub use waiting_list::{FlowInputs, FlowOutcome, FlowStep, WaitingListState};

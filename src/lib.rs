// ==========================================
// 手术室需求与产能规划 - 核心库
// ==========================================
// 技术栈: Rust + CSV/Excel 导入 + CLI
// 系统定位: 决策支持工具 (总量核算模型, 非逐例排程)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 需求/产能汇总、等候名单流量、产能填充模拟
pub mod engine;

// 导入层 - 手术需求表
pub mod importer;

// 配置层 - 默认参数与情景配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 宿主界面调用入口
pub mod api;

// 应用层 - 会话状态
pub mod app;

// 报表层 - 汇总导出
pub mod report;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CapacityAssessment, CapacitySource, MeasureKind, PlanningYear};

// 领域实体
pub use domain::{
    CapacityBudget, CapacityModel, CapacityParameters, CaseUnit, DemandTotals, FlowStep,
    PackingRecord, ProcedureRecord, WaitingListState,
};

// 引擎
pub use engine::{
    CapacityFiller, CaseShuffler, DemandAggregator, EngineError, EngineResult,
    PlanningOrchestrator, PlanningReport, SeededShuffler, WaitingListFlowEngine,
};

// API
pub use api::{ApiError, ApiResult, PlanningApi};

// 配置
pub use config::{ConfigManager, ScenarioConfig};

// 报表
pub use report::SummaryRecord;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Theatre Demand and Capacity";

// 每小时分钟数（时长统一按分钟核算）
pub const MINUTES_PER_HOUR: f64 = 60.0;

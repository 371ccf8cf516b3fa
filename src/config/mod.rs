// ==========================================
// 手术室需求与产能规划 - 配置层
// ==========================================
// 职责: 默认参数管理, 情景配置
// 存储: JSON 配置文件 (key-value) + 情景 JSON
// ==========================================

pub mod config_manager;
pub mod error;
pub mod scenario;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use scenario::{ScenarioConfig, WaitingListScenario};

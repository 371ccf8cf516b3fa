// ==========================================
// 手术室需求与产能规划 - 应用层
// ==========================================
// 职责: 会话状态, 连接宿主界面与 API
// ==========================================

pub mod state;

// 重导出
pub use state::{AppState, SessionState};

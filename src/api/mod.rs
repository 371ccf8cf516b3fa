// ==========================================
// 手术室需求与产能规划 - API 层
// ==========================================
// 职责: 对宿主界面暴露的调用入口, 统一错误类型
// ==========================================

pub mod error;
pub mod planning_api;
pub mod validator;

pub use error::{ApiError, ApiResult};
pub use planning_api::PlanningApi;
pub use validator::InputValidator;

// ==========================================
// 手术室需求与产能规划 - 输入校验器
// ==========================================
// 职责: 测算前校验宿主界面提交的参数
// 范围: 周数 1..=52, 非负数值, 比例位于 [0, 1]
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::scenario::{ScenarioConfig, WaitingListScenario};
use crate::domain::capacity::{CapacityModel, CapacityParameters};
use crate::domain::procedure::ProcedureRecord;
use crate::engine::capacity_filler::MAX_POOL_UNITS;
use crate::engine::error::{ensure_fraction, ensure_non_negative};

/// 年运行周数上限
pub const MAX_WEEKS: u32 = 52;

/// 输入校验器（无状态）
pub struct InputValidator;

impl InputValidator {
    /// 校验运行周数
    pub fn validate_weeks(field: &str, weeks: u32) -> ApiResult<()> {
        if weeks == 0 || weeks > MAX_WEEKS {
            return Err(ApiError::ValidationError {
                field: field.to_string(),
                reason: format!("周数必须位于 [1, {}], 实际 {}", MAX_WEEKS, weeks),
            });
        }
        Ok(())
    }

    /// 校验会话产能参数
    pub fn validate_capacity(params: &CapacityParameters) -> ApiResult<()> {
        Self::validate_weeks("weeks", params.weeks)?;
        ensure_non_negative("sessions_per_week", params.sessions_per_week)?;
        ensure_non_negative("session_duration_hours", params.session_duration_hours)?;
        ensure_fraction("utilisation", params.utilisation)?;
        Ok(())
    }

    /// 校验明年产能模型
    pub fn validate_capacity_model(model: &CapacityModel) -> ApiResult<()> {
        if let CapacityModel::NewModel {
            weeks,
            sessions_per_week,
            utilisation,
        } = *model
        {
            Self::validate_weeks("next_year_capacity.weeks", weeks)?;
            ensure_non_negative("next_year_capacity.sessions_per_week", sessions_per_week)?;
            ensure_fraction("next_year_capacity.utilisation", utilisation)?;
        }
        Ok(())
    }

    /// 校验等候名单参数
    pub fn validate_waiting_list(wl: &WaitingListScenario) -> ApiResult<()> {
        ensure_non_negative("waiting_list_start", wl.waiting_list_start)?;
        ensure_fraction("backlog_fraction", wl.backlog_fraction)?;
        ensure_fraction("backlog_capacity_fraction", wl.backlog_capacity_fraction)?;
        if let Some(additions) = wl.additions {
            ensure_non_negative("additions", additions)?;
        }
        if wl.periods == 0 {
            return Err(ApiError::ValidationError {
                field: "periods".to_string(),
                reason: "推演期数至少为 1".to_string(),
            });
        }
        Ok(())
    }

    /// 校验完整情景
    pub fn validate_scenario(scenario: &ScenarioConfig) -> ApiResult<()> {
        ensure_non_negative("demand_multiplier", scenario.demand_multiplier)?;
        Self::validate_capacity(&scenario.last_year_capacity)?;
        Self::validate_capacity_model(&scenario.next_year_capacity)?;
        if let Some(actual) = scenario.actual_cases_treated_last_year {
            ensure_non_negative("actual_cases_treated_last_year", actual)?;
        }
        Self::validate_waiting_list(&scenario.waiting_list)
    }

    /// 校验单条手术需求记录
    pub fn validate_procedure(record: &ProcedureRecord) -> ApiResult<()> {
        if record.name.trim().is_empty() {
            return Err(ApiError::ValidationError {
                field: "Procedure".to_string(),
                reason: "手术名称不能为空".to_string(),
            });
        }
        ensure_non_negative("Annual Demand (Cases)", record.annual_cases)?;
        ensure_non_negative("Average Duration (Hours)", record.avg_duration_hours)?;
        if record.annual_cases > MAX_POOL_UNITS as f64 {
            return Err(ApiError::ValidationError {
                field: "Annual Demand (Cases)".to_string(),
                reason: format!(
                    "年病例数 {} 超出上限 {}",
                    record.annual_cases, MAX_POOL_UNITS
                ),
            });
        }
        Ok(())
    }

    /// 校验需求表
    pub fn validate_procedures(records: &[ProcedureRecord]) -> ApiResult<()> {
        records.iter().try_for_each(Self::validate_procedure)
    }
}

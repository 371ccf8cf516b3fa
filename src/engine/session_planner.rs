// ==========================================
// 手术室需求与产能规划 - 会话需求测算
// ==========================================
// 职责: 满足需求所需会话数、需求/产能对比、计划与所需差距评估
// ==========================================

use crate::domain::types::CapacityAssessment;
use crate::engine::error::{ensure_non_negative, EngineError, EngineResult};
use crate::MINUTES_PER_HOUR;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 满足需求所需会话数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RequiredSessions {
    pub total_sessions: f64,
    pub sessions_per_week: f64,
}

/// 需求与产能对比
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandCapacityComparison {
    pub demand_minutes: f64,
    pub capacity_minutes: f64,
    /// 产能 - 需求 (负数表示缺口)
    pub net_capacity_minutes: f64,
    /// 产能 / 需求 × 100; 需求为 0 时为 0
    pub percentage_demand_met: f64,
}

/// 计划会话数与所需会话数的差距
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionsGap {
    pub planned_per_week: f64,
    pub required_per_week: f64,
    /// (计划 - 所需) / 所需 × 100, 保留两位小数; 所需为 0 时无定义
    pub difference_percentage: Option<f64>,
    /// 所需 - 计划 (正数表示每周还差多少会话)
    pub difference_sessions: f64,
    pub assessment: CapacityAssessment,
}

/// 预计治疗病例数与需求病例数的差距
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CasesGap {
    pub expected_treated: f64,
    pub demand_cases: f64,
    /// (预计治疗 - 需求) / 需求 × 100, 保留两位小数; 需求为 0 时无定义
    pub difference_percentage: Option<f64>,
}

// ==========================================
// SessionPlanner - 会话需求测算
// ==========================================
pub struct SessionPlanner {
    // 无状态引擎，不需要注入依赖
}

impl SessionPlanner {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算满足指定分钟数所需的会话数
    ///
    /// # 错误
    /// - 单次会话有效分钟数为 0 (时长或利用率为 0): `DegenerateInput`
    /// - 周数为 0: `DegenerateInput`
    pub fn required_sessions(
        &self,
        required_minutes: f64,
        session_duration_hours: f64,
        utilisation: f64,
        weeks: u32,
    ) -> EngineResult<RequiredSessions> {
        ensure_non_negative("required_minutes", required_minutes)?;
        let minutes_per_session = session_duration_hours * MINUTES_PER_HOUR * utilisation;
        if !(minutes_per_session > 0.0) {
            warn!(
                session_duration_hours,
                utilisation, "单次会话有效分钟数为 0, 无法测算所需会话数"
            );
            return Err(EngineError::degenerate(
                "会话时长 × 利用率为 0, 无法测算所需会话数",
            ));
        }
        if weeks == 0 {
            return Err(EngineError::degenerate("周数为 0, 无法测算每周会话数"));
        }

        let total_sessions = required_minutes / minutes_per_session;
        Ok(RequiredSessions {
            total_sessions,
            sessions_per_week: total_sessions / f64::from(weeks),
        })
    }

    /// 需求与产能对比
    pub fn compare_demand_capacity(
        &self,
        demand_minutes: f64,
        capacity_minutes: f64,
    ) -> DemandCapacityComparison {
        let percentage_demand_met = if demand_minutes > 0.0 {
            capacity_minutes / demand_minutes * 100.0
        } else {
            0.0
        };
        DemandCapacityComparison {
            demand_minutes,
            capacity_minutes,
            net_capacity_minutes: capacity_minutes - demand_minutes,
            percentage_demand_met,
        }
    }

    /// 计划会话数与所需会话数差距评估
    pub fn sessions_gap(&self, planned_per_week: f64, required_per_week: f64) -> SessionsGap {
        let difference_percentage = if required_per_week > 0.0 {
            Some(round2(
                (planned_per_week - required_per_week) / required_per_week * 100.0,
            ))
        } else {
            None
        };
        let assessment = if planned_per_week >= required_per_week {
            CapacityAssessment::Sufficient
        } else {
            CapacityAssessment::Insufficient
        };
        SessionsGap {
            planned_per_week,
            required_per_week,
            difference_percentage,
            difference_sessions: required_per_week - planned_per_week,
            assessment,
        }
    }

    /// 预计治疗病例数与需求差距
    pub fn cases_gap(&self, expected_treated: f64, demand_cases: f64) -> CasesGap {
        let difference_percentage = if demand_cases > 0.0 {
            Some(round2((expected_treated - demand_cases) / demand_cases * 100.0))
        } else {
            None
        };
        CasesGap {
            expected_treated,
            demand_cases,
            difference_percentage,
        }
    }
}

impl Default for SessionPlanner {
    fn default() -> Self {
        Self::new()
    }
}

/// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

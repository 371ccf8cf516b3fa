// ==========================================
// 手术室需求与产能规划 - 会话产能领域模型
// ==========================================
// 产能 = 周数 × 每周会话数 × 会话时长 × 60 × 利用率
// ==========================================

use crate::MINUTES_PER_HOUR;
use serde::{Deserialize, Serialize};

// ==========================================
// CapacityParameters - 会话产能参数
// ==========================================
// 范围校验由 api::validator 负责, 引擎不重复校验
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityParameters {
    pub weeks: u32,                  // 年运行周数 (1..=52)
    pub sessions_per_week: f64,      // 每周会话数
    pub session_duration_hours: f64, // 单次会话时长 (小时)
    pub utilisation: f64,            // 利用率 [0, 1]
}

impl CapacityParameters {
    /// 年会话总数 = 周数 × 每周会话数
    pub fn total_sessions(&self) -> f64 {
        f64::from(self.weeks) * self.sessions_per_week
    }

    /// 单次会话可用分钟数 (已乘利用率)
    pub fn effective_minutes_per_session(&self) -> f64 {
        self.session_duration_hours * MINUTES_PER_HOUR * self.utilisation
    }
}

// ==========================================
// CapacityModel - 明年产能模型
// ==========================================
// 会话时长在两个年度之间共享
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityModel {
    SameAsLastYear,
    NewModel {
        weeks: u32,
        sessions_per_week: f64,
        utilisation: f64,
    },
}

impl CapacityModel {
    /// 根据去年参数解析出明年的产能参数
    pub fn resolve(&self, last_year: &CapacityParameters) -> CapacityParameters {
        match *self {
            CapacityModel::SameAsLastYear => *last_year,
            CapacityModel::NewModel {
                weeks,
                sessions_per_week,
                utilisation,
            } => CapacityParameters {
                weeks,
                sessions_per_week,
                session_duration_hours: last_year.session_duration_hours,
                utilisation,
            },
        }
    }
}

impl Default for CapacityModel {
    fn default() -> Self {
        CapacityModel::SameAsLastYear
    }
}

// ==========================================
// CapacityBudget - 产能预算 (分钟)
// ==========================================
// 用途: 产能填充模拟中的单一连续产能池
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityBudget {
    pub capacity_minutes: f64, // 可用产能 (分钟)
    pub used_minutes: f64,     // 已占用 (分钟)
}

impl CapacityBudget {
    pub fn new(capacity_minutes: f64) -> Self {
        Self {
            capacity_minutes,
            used_minutes: 0.0,
        }
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: CapacityFiller 约束检查接口
pub trait CapacityConstraint {
    /// 检查是否可接收该病例
    fn can_add_case(&self, duration_minutes: f64) -> bool;

    /// 计算剩余产能
    fn remaining_minutes(&self) -> f64;

    /// 计算产能使用比例
    fn usage_ratio(&self) -> f64;
}

impl CapacityConstraint for CapacityBudget {
    /// # 返回
    /// - `true`: 已用 + 时长 <= 可用产能
    /// - `false`: 会超出可用产能
    fn can_add_case(&self, duration_minutes: f64) -> bool {
        self.used_minutes + duration_minutes <= self.capacity_minutes
    }

    fn remaining_minutes(&self) -> f64 {
        (self.capacity_minutes - self.used_minutes).max(0.0)
    }

    /// # 返回
    /// 使用比例 (0.0 - 1.0); 产能为 0 时返回 0.0
    fn usage_ratio(&self) -> f64 {
        if self.capacity_minutes <= 0.0 {
            return 0.0;
        }
        (self.used_minutes / self.capacity_minutes).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_year() -> CapacityParameters {
        CapacityParameters {
            weeks: 48,
            sessions_per_week: 10.0,
            session_duration_hours: 4.0,
            utilisation: 0.8,
        }
    }

    #[test]
    fn test_total_sessions() {
        assert_eq!(last_year().total_sessions(), 480.0);
    }

    #[test]
    fn test_effective_minutes_per_session() {
        assert!((last_year().effective_minutes_per_session() - 192.0).abs() < 1e-9);
    }

    #[test]
    fn test_same_as_last_year_resolves_to_last_year() {
        let params = CapacityModel::SameAsLastYear.resolve(&last_year());
        assert_eq!(params, last_year());
    }

    #[test]
    fn test_new_model_keeps_session_duration() {
        let model = CapacityModel::NewModel {
            weeks: 50,
            sessions_per_week: 12.0,
            utilisation: 0.85,
        };
        let params = model.resolve(&last_year());
        assert_eq!(params.weeks, 50);
        assert_eq!(params.sessions_per_week, 12.0);
        assert_eq!(params.utilisation, 0.85);
        assert_eq!(params.session_duration_hours, 4.0);
    }

    #[test]
    fn test_capacity_model_serde_tagged() {
        let model: CapacityModel = serde_json::from_str(
            r#"{"model":"NEW_MODEL","weeks":45,"sessions_per_week":8.5,"utilisation":0.9}"#,
        )
        .unwrap();
        assert_eq!(
            model,
            CapacityModel::NewModel {
                weeks: 45,
                sessions_per_week: 8.5,
                utilisation: 0.9
            }
        );
    }

    #[test]
    fn test_budget_constraint() {
        let mut budget = CapacityBudget::new(300.0);
        assert!(budget.can_add_case(300.0));
        budget.used_minutes = 240.0;
        assert!(budget.can_add_case(60.0));
        assert!(!budget.can_add_case(61.0));
        assert_eq!(budget.remaining_minutes(), 60.0);
        assert!((budget.usage_ratio() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_zero_budget_usage_ratio() {
        let budget = CapacityBudget::new(0.0);
        assert_eq!(budget.usage_ratio(), 0.0);
        assert!(budget.can_add_case(0.0));
        assert!(!budget.can_add_case(1.0));
    }
}

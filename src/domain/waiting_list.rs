// ==========================================
// 手术室需求与产能规划 - 等候名单领域模型
// ==========================================
// 等候名单 = 超期 (backlog) + 未超期 (non-backlog) 两个子队列
// 红线: 子队列人数永不为负
// ==========================================

use crate::domain::types::MeasureKind;
use serde::{Deserialize, Serialize};

// ==========================================
// WaitingListState - 等候名单状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WaitingListState {
    pub backlog: f64,     // 已超过目标等待时间的病例
    pub non_backlog: f64, // 仍在目标等待时间内的病例
}

impl WaitingListState {
    pub fn new(backlog: f64, non_backlog: f64) -> Self {
        Self {
            backlog,
            non_backlog,
        }
    }

    /// 由期初总人数和超期比例拆分
    ///
    /// # 参数
    /// - `total`: 期初等候名单总人数
    /// - `backlog_fraction`: 超期比例 [0, 1]
    pub fn from_start(total: f64, backlog_fraction: f64) -> Self {
        let backlog = total * backlog_fraction;
        Self {
            backlog,
            non_backlog: total - backlog,
        }
    }

    pub fn total(&self) -> f64 {
        self.backlog + self.non_backlog
    }
}

// ==========================================
// FlowInputs - 单期流转输入
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowInputs {
    pub additions: f64,                 // 本期新增病例
    pub capacity_minutes: f64,          // 本期产能 (分钟)
    pub backlog_capacity_fraction: f64, // 专用于超期病例的产能比例 [0, 1]
    pub avg_case_duration_minutes: f64, // 平均病例时长 (分钟), 必须 > 0
}

// ==========================================
// FlowOutcome - 单期流转结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowOutcome {
    pub start: WaitingListState,
    pub end: WaitingListState,
    pub additions: f64,
    pub backlog_capacity_minutes: f64,
    pub general_capacity_minutes: f64,
    pub backlog_treated: f64,
    pub non_backlog_pool: f64, // 期初未超期 + 新增
    pub non_backlog_treated: f64,
}

impl FlowOutcome {
    pub fn total_treated(&self) -> f64 {
        self.backlog_treated + self.non_backlog_treated
    }

    /// 等候名单净变化 (期末 - 期初)
    pub fn change_in_waiting_list(&self) -> f64 {
        self.end.total() - self.start.total()
    }
}

// ==========================================
// FlowStep - 瀑布图行
// ==========================================
// 行顺序与符号约定属于输出契约
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowStep {
    pub label: String,
    pub measure: MeasureKind,
    pub delta: f64,
}

impl FlowStep {
    pub fn new(label: impl Into<String>, measure: MeasureKind, delta: f64) -> Self {
        Self {
            label: label.into(),
            measure,
            delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_start_split() {
        let state = WaitingListState::from_start(500.0, 0.2);
        assert!((state.backlog - 100.0).abs() < 1e-9);
        assert!((state.non_backlog - 400.0).abs() < 1e-9);
        assert!((state.total() - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_start_all_backlog() {
        let state = WaitingListState::from_start(80.0, 1.0);
        assert_eq!(state.backlog, 80.0);
        assert_eq!(state.non_backlog, 0.0);
    }
}

// ==========================================
// 手术室需求与产能规划 - 等候名单流量引擎
// ==========================================
// 职责: 单期等候名单流转 (新增进入, 治疗移出, 超期/未超期分队列)
// 输入: 期初状态 S0 + 新增 + 产能分钟 + 超期专用比例 + 平均病例时长
// 输出: 期末状态 S1 + 瀑布图分解
// 红线: 治疗人数不超过队列现有人数; 期末人数不为负
// ==========================================

use crate::domain::types::MeasureKind;
use crate::domain::waiting_list::{FlowInputs, FlowOutcome, FlowStep, WaitingListState};
use crate::engine::error::{ensure_fraction, ensure_non_negative, EngineError, EngineResult};
use tracing::{debug, instrument, warn};

// 瀑布图行标签 (顺序固定)
pub mod step_labels {
    pub const START_BACKLOG: &str = "Start Backlog";
    pub const START_NON_BACKLOG: &str = "Start Non-Backlog";
    pub const ADDITIONS: &str = "Additions";
    pub const BACKLOG_TREATED: &str = "Backlog Treated";
    pub const NON_BACKLOG_TREATED: &str = "Non-Backlog Treated";
    pub const END_BACKLOG: &str = "End Backlog";
    pub const END_NON_BACKLOG: &str = "End Non-Backlog";
}

// ==========================================
// WaitingListFlowEngine - 等候名单流量引擎
// ==========================================
pub struct WaitingListFlowEngine {
    // 无状态引擎，不需要注入依赖
}

impl WaitingListFlowEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 单期流转
    ///
    /// 规则：
    /// 1) 超期产能 = 产能 × 比例; 常规产能 = 产能 × (1 - 比例)
    /// 2) 超期治疗 = min(S0.backlog, 超期产能 / 平均时长)
    /// 3) 未超期池 = S0.non_backlog + 新增; 未超期治疗 = min(池, 常规产能 / 平均时长)
    /// 4) 期末人数 = max(0, 池 - 治疗)
    ///
    /// # 错误
    /// - 负数/非有限输入、比例越界: `Validation`
    /// - 平均时长 <= 0: `DegenerateInput`
    #[instrument(skip(self), fields(
        backlog = start.backlog,
        non_backlog = start.non_backlog,
        capacity_minutes = inputs.capacity_minutes
    ))]
    pub fn transition(
        &self,
        start: WaitingListState,
        inputs: &FlowInputs,
    ) -> EngineResult<FlowOutcome> {
        Self::validate(&start, inputs)?;

        // 1. 产能拆分
        let backlog_capacity_minutes = inputs.capacity_minutes * inputs.backlog_capacity_fraction;
        let general_capacity_minutes =
            inputs.capacity_minutes * (1.0 - inputs.backlog_capacity_fraction);

        // 2. 超期队列
        let backlog_treated =
            start.backlog.min(backlog_capacity_minutes / inputs.avg_case_duration_minutes);

        // 3. 未超期队列 (新增病例进入未超期队列)
        let non_backlog_pool = start.non_backlog + inputs.additions;
        let non_backlog_treated =
            non_backlog_pool.min(general_capacity_minutes / inputs.avg_case_duration_minutes);

        // 4. 期末状态
        let end = WaitingListState {
            backlog: (start.backlog - backlog_treated).max(0.0),
            non_backlog: (non_backlog_pool - non_backlog_treated).max(0.0),
        };

        debug!(
            backlog_treated,
            non_backlog_treated,
            end_backlog = end.backlog,
            end_non_backlog = end.non_backlog,
            "单期流转完成"
        );

        Ok(FlowOutcome {
            start,
            end,
            additions: inputs.additions,
            backlog_capacity_minutes,
            general_capacity_minutes,
            backlog_treated,
            non_backlog_pool,
            non_backlog_treated,
        })
    }

    /// 多期串联 (每期输入相同)
    ///
    /// # 返回
    /// 每一期的流转结果, 第 k 期的期初 = 第 k-1 期的期末
    pub fn project(
        &self,
        start: WaitingListState,
        periods: usize,
        inputs: &FlowInputs,
    ) -> EngineResult<Vec<FlowOutcome>> {
        let mut outcomes = Vec::with_capacity(periods);
        let mut state = start;
        for _ in 0..periods {
            let outcome = self.transition(state, inputs)?;
            state = outcome.end;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    // ==========================================
    // 瀑布图
    // ==========================================

    /// 生成瀑布图行
    ///
    /// 顺序: 期初超期(absolute) → 期初未超期 → 新增 → 超期治疗(负) → 未超期治疗(负)
    ///       → 期末超期(total) → 期末未超期(total)
    pub fn waterfall(&self, outcome: &FlowOutcome) -> Vec<FlowStep> {
        vec![
            FlowStep::new(
                step_labels::START_BACKLOG,
                MeasureKind::Absolute,
                outcome.start.backlog,
            ),
            FlowStep::new(
                step_labels::START_NON_BACKLOG,
                MeasureKind::Relative,
                outcome.start.non_backlog,
            ),
            FlowStep::new(step_labels::ADDITIONS, MeasureKind::Relative, outcome.additions),
            FlowStep::new(
                step_labels::BACKLOG_TREATED,
                MeasureKind::Relative,
                -outcome.backlog_treated,
            ),
            FlowStep::new(
                step_labels::NON_BACKLOG_TREATED,
                MeasureKind::Relative,
                -outcome.non_backlog_treated,
            ),
            FlowStep::new(step_labels::END_BACKLOG, MeasureKind::Total, outcome.end.backlog),
            FlowStep::new(
                step_labels::END_NON_BACKLOG,
                MeasureKind::Total,
                outcome.end.non_backlog,
            ),
        ]
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn validate(start: &WaitingListState, inputs: &FlowInputs) -> EngineResult<()> {
        ensure_non_negative("backlog", start.backlog)?;
        ensure_non_negative("non_backlog", start.non_backlog)?;
        ensure_non_negative("additions", inputs.additions)?;
        ensure_non_negative("capacity_minutes", inputs.capacity_minutes)?;
        ensure_fraction("backlog_capacity_fraction", inputs.backlog_capacity_fraction)?;

        let avg = inputs.avg_case_duration_minutes;
        if !avg.is_finite() {
            return Err(EngineError::validation(
                "avg_case_duration_minutes",
                avg,
                "必须为有限数",
            ));
        }
        if avg <= 0.0 {
            warn!(avg_case_duration_minutes = avg, "平均病例时长不为正");
            return Err(EngineError::degenerate(format!(
                "平均病例时长必须大于 0 (实际 {})",
                avg
            )));
        }
        Ok(())
    }
}

/// 按瀑布图规则推进水位: absolute 重置, relative 累加, total 不推进
///
/// # 返回
/// 最后一行之后的水位
pub fn running_level(steps: &[FlowStep]) -> f64 {
    steps.iter().fold(0.0, |level, step| match step.measure {
        MeasureKind::Absolute => step.delta,
        MeasureKind::Relative => level + step.delta,
        MeasureKind::Total => level,
    })
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for WaitingListFlowEngine {
    fn default() -> Self {
        Self::new()
    }
}

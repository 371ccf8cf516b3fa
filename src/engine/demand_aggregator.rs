// ==========================================
// 手术室需求与产能规划 - 需求/产能汇总引擎
// ==========================================
// 职责: 手术需求表 → 病例数/分钟数汇总; 会话参数 → 产能分钟数
// 输入: 已校验的需求记录 / 产能参数
// 输出: 汇总数值 (纯函数, 无状态)
// ==========================================

use crate::domain::capacity::CapacityParameters;
use crate::domain::procedure::{DemandTotals, ProcedureRecord};
use crate::engine::error::{ensure_non_negative, EngineError, EngineResult};
use crate::MINUTES_PER_HOUR;
use std::cmp::Ordering;
use tracing::{debug, instrument, warn};

// ==========================================
// DemandAggregator - 需求/产能汇总引擎
// ==========================================
pub struct DemandAggregator {
    // 无状态引擎，不需要注入依赖
}

impl DemandAggregator {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 需求汇总
    // ==========================================

    /// 汇总需求
    ///
    /// 空表返回 {0, 0}
    #[instrument(skip(self, records), fields(records_count = records.len()))]
    pub fn aggregate_demand(&self, records: &[ProcedureRecord]) -> DemandTotals {
        let totals = records.iter().fold(DemandTotals::default(), |acc, r| DemandTotals {
            total_cases: acc.total_cases + r.annual_cases,
            total_minutes: acc.total_minutes + r.total_minutes(),
        });

        debug!(
            total_cases = totals.total_cases,
            total_minutes = totals.total_minutes,
            "需求汇总完成"
        );
        totals
    }

    /// 按增长系数预测下一期需求
    ///
    /// # 参数
    /// - `multiplier`: 增长系数 (>= 0, 无上限; 0 表示需求清零)
    ///
    /// # 返回
    /// 病例数按系数缩放后的新记录 (允许出现小数病例数)
    pub fn project_next_period(
        &self,
        records: &[ProcedureRecord],
        multiplier: f64,
    ) -> EngineResult<Vec<ProcedureRecord>> {
        ensure_non_negative("multiplier", multiplier)?;

        Ok(records
            .iter()
            .map(|r| ProcedureRecord {
                name: r.name.clone(),
                annual_cases: r.annual_cases * multiplier,
                avg_duration_hours: r.avg_duration_hours,
            })
            .collect())
    }

    // ==========================================
    // 产能汇总
    // ==========================================

    /// 会话产能 (分钟) = 周数 × 每周会话数 × 时长 × 60 × 利用率
    ///
    /// 不重复校验参数范围 (由调用方负责)
    pub fn compute_capacity_minutes(&self, params: &CapacityParameters) -> f64 {
        f64::from(params.weeks)
            * params.sessions_per_week
            * params.session_duration_hours
            * MINUTES_PER_HOUR
            * params.utilisation
    }

    /// 各记录平均时长 (分钟) 的算术平均
    ///
    /// # 错误
    /// - 空记录集: `DegenerateInput` (不返回 NaN)
    pub fn average_duration_minutes(&self, records: &[ProcedureRecord]) -> EngineResult<f64> {
        if records.is_empty() {
            warn!("空需求表无法计算平均时长");
            return Err(EngineError::degenerate("需求表为空, 无法计算平均病例时长"));
        }

        let sum: f64 = records.iter().map(|r| r.avg_duration_minutes()).sum();
        Ok(sum / records.len() as f64)
    }

    // ==========================================
    // 排行
    // ==========================================

    /// 按病例数降序取前 N (同值保持原顺序)
    pub fn top_procedures_by_cases(
        &self,
        records: &[ProcedureRecord],
        n: usize,
    ) -> Vec<ProcedureRecord> {
        Self::top_by(records, n, |r| r.annual_cases)
    }

    /// 按需求分钟数降序取前 N (同值保持原顺序)
    pub fn top_procedures_by_minutes(
        &self,
        records: &[ProcedureRecord],
        n: usize,
    ) -> Vec<ProcedureRecord> {
        Self::top_by(records, n, |r| r.total_minutes())
    }

    fn top_by<F>(records: &[ProcedureRecord], n: usize, key: F) -> Vec<ProcedureRecord>
    where
        F: Fn(&ProcedureRecord) -> f64,
    {
        let mut sorted: Vec<ProcedureRecord> = records.to_vec();
        // sort_by 为稳定排序
        sorted.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
        sorted.truncate(n);
        sorted
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for DemandAggregator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 手术室需求与产能规划 - 产能填充模拟引擎
// ==========================================
// 职责: 分钟驱动的产能池填充 (随机顺序, 先到先得)
// 输入: 需求表 (手术 → 病例数, 平均时长) + 产能预算 (分钟)
// 输出: 被接收的病例序列 + 已用分钟数
// 红线: 已用分钟数永不超过产能预算
// ==========================================
// 策略: 逐例接收, 第一次放不下即停止 (不跳过, 非最优装箱)
// ==========================================

use crate::domain::capacity::{CapacityBudget, CapacityConstraint};
use crate::domain::procedure::{CaseUnit, PackingRecord};
use crate::engine::error::{ensure_non_negative, EngineError, EngineResult};
use crate::engine::shuffler::{CaseShuffler, SeededShuffler};
use crate::MINUTES_PER_HOUR;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// 单次模拟允许展开的病例单元上限
pub const MAX_POOL_UNITS: u64 = 1_000_000;

// ==========================================
// CapacityFiller - 产能填充模拟引擎
// ==========================================
pub struct CapacityFiller {
    // 无状态引擎，不需要注入依赖
}

/// 填充结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillResult {
    /// 按接收顺序排列的病例
    pub accepted: Vec<CaseUnit>,
    pub total_minutes_used: f64,
    /// 展开后的病例单元总数
    pub pool_size: usize,
    pub budget: CapacityBudget,
}

impl FillResult {
    fn empty(pool_size: usize, capacity_minutes: f64) -> Self {
        Self {
            accepted: Vec::new(),
            total_minutes_used: 0.0,
            pool_size,
            budget: CapacityBudget::new(capacity_minutes),
        }
    }

    pub fn cases_treated(&self) -> usize {
        self.accepted.len()
    }

    /// 按手术汇总接收病例数 (按首次接收顺序)
    pub fn cases_by_procedure(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for unit in &self.accepted {
            match counts.iter_mut().find(|(name, _)| *name == unit.procedure_name) {
                Some((_, count)) => *count += 1,
                None => counts.push((unit.procedure_name.clone(), 1)),
            }
        }
        counts
    }
}

impl CapacityFiller {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 填充产能预算
    ///
    /// 规则：
    /// 1) 每条记录展开为 next_period_cases 个病例单元 (时长 = 平均时长 × 60)
    /// 2) 由 shuffler 生成排列
    /// 3) 按排列逐例接收, 已用 + 时长 <= 预算 则接收; 第一次放不下立即停止
    ///
    /// # 错误
    /// - 预算或时长为负/非有限: `Validation`
    /// - 病例总数超过 `MAX_POOL_UNITS`: `DegenerateInput`
    #[instrument(skip(self, records, shuffler), fields(records_count = records.len()))]
    pub fn simulate_fill(
        &self,
        records: &[PackingRecord],
        capacity_minutes: f64,
        shuffler: &mut dyn CaseShuffler,
    ) -> EngineResult<FillResult> {
        ensure_non_negative("capacity_minutes", capacity_minutes)?;
        for record in records {
            ensure_non_negative("avg_duration_hours", record.avg_duration_hours)?;
        }

        // 1. 展开病例池 (内存与病例总数成正比)
        let mut pool = self.expand_pool(records)?;
        let pool_size = pool.len();

        if capacity_minutes == 0.0 || pool.is_empty() {
            debug!(pool_size, "产能为 0 或病例池为空, 不接收任何病例");
            return Ok(FillResult::empty(pool_size, capacity_minutes));
        }

        // 2. 乱序
        shuffler.shuffle(&mut pool);

        // 3. 逐例接收, 首次放不下即停止
        let mut budget = CapacityBudget::new(capacity_minutes);
        let mut accepted = Vec::new();
        for unit in pool {
            if !budget.can_add_case(unit.duration_minutes) {
                debug!(
                    rejected_duration = unit.duration_minutes,
                    remaining_minutes = budget.remaining_minutes(),
                    "病例超出剩余产能, 停止填充"
                );
                break;
            }
            budget.used_minutes += unit.duration_minutes;
            accepted.push(unit);
        }

        debug!(
            accepted = accepted.len(),
            used_minutes = budget.used_minutes,
            usage_ratio = budget.usage_ratio(),
            "产能填充完成"
        );

        Ok(FillResult {
            accepted,
            total_minutes_used: budget.used_minutes,
            pool_size,
            budget,
        })
    }

    /// 使用可选种子的均匀随机排列填充
    pub fn simulate_fill_seeded(
        &self,
        records: &[PackingRecord],
        capacity_minutes: f64,
        rng_seed: Option<u64>,
    ) -> EngineResult<FillResult> {
        let mut shuffler = SeededShuffler::new(rng_seed);
        self.simulate_fill(records, capacity_minutes, &mut shuffler)
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    fn expand_pool(&self, records: &[PackingRecord]) -> EngineResult<Vec<CaseUnit>> {
        let total_cases = records
            .iter()
            .try_fold(0u64, |acc, r| acc.checked_add(r.next_period_cases))
            .filter(|total| *total <= MAX_POOL_UNITS)
            .and_then(|total| usize::try_from(total).ok())
            .ok_or_else(|| {
                warn!(max_units = MAX_POOL_UNITS, "病例总数超出模拟上限");
                EngineError::degenerate(format!(
                    "病例总数超出模拟上限 {} 例",
                    MAX_POOL_UNITS
                ))
            })?;

        let mut pool = Vec::with_capacity(total_cases);
        for record in records {
            let duration_minutes = record.avg_duration_hours * MINUTES_PER_HOUR;
            for _ in 0..record.next_period_cases {
                pool.push(CaseUnit {
                    procedure_name: record.name.clone(),
                    duration_minutes,
                });
            }
        }
        Ok(pool)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for CapacityFiller {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 手术室需求与产能规划 - 手术需求领域模型
// ==========================================
// 用途: 需求汇总、明年需求预测、产能填充模拟的输入
// ==========================================

use crate::MINUTES_PER_HOUR;
use serde::{Deserialize, Serialize};

// ==========================================
// ProcedureRecord - 手术需求记录
// ==========================================
// 红线: annual_cases >= 0, avg_duration_hours >= 0
// 名称不要求唯一, 汇总时重复名称直接累加
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureRecord {
    #[serde(rename = "Procedure")]
    pub name: String, // 手术名称

    /// 年病例数。导入时为整数; 乘以增长系数后允许出现小数
    #[serde(rename = "Annual Demand (Cases)")]
    pub annual_cases: f64,

    #[serde(rename = "Average Duration (Hours)")]
    pub avg_duration_hours: f64, // 平均手术时长 (小时)
}

impl ProcedureRecord {
    pub fn new(name: impl Into<String>, annual_cases: f64, avg_duration_hours: f64) -> Self {
        Self {
            name: name.into(),
            annual_cases,
            avg_duration_hours,
        }
    }

    /// 平均时长 (分钟)
    pub fn avg_duration_minutes(&self) -> f64 {
        self.avg_duration_hours * MINUTES_PER_HOUR
    }

    /// 总需求分钟数 = 病例数 × 平均时长 × 60
    pub fn total_minutes(&self) -> f64 {
        self.annual_cases * self.avg_duration_minutes()
    }
}

// ==========================================
// DemandTotals - 需求汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DemandTotals {
    pub total_cases: f64,
    pub total_minutes: f64,
}

// ==========================================
// PackingRecord - 产能填充模拟输入
// ==========================================
// 病例数为整数: 预测需求展开为逐例单元时向零截断
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingRecord {
    pub name: String,
    pub next_period_cases: u64,
    pub avg_duration_hours: f64,
}

impl PackingRecord {
    /// 由需求记录构造 (病例数向零截断, 负数/NaN 视为 0)
    pub fn from_procedure(record: &ProcedureRecord) -> Self {
        let cases = if record.annual_cases.is_finite() && record.annual_cases > 0.0 {
            record.annual_cases.trunc() as u64
        } else {
            0
        };
        Self {
            name: record.name.clone(),
            next_period_cases: cases,
            avg_duration_hours: record.avg_duration_hours,
        }
    }
}

// ==========================================
// CaseUnit - 单个病例单元
// ==========================================
// 生命周期: 每次模拟调用时生成一次, 乱序后被贪心接收器消费
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseUnit {
    pub procedure_name: String,
    pub duration_minutes: f64,
}

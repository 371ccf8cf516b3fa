// ==========================================
// 手术室需求与产能规划 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 瀑布图行类型 (Waterfall Measure)
// ==========================================
// 序列化格式: lowercase (与图表渲染端一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasureKind {
    Absolute, // 设定当前水位
    Relative, // 在当前水位上增减
    Total,    // 汇总行,不推进水位
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasureKind::Absolute => write!(f, "absolute"),
            MeasureKind::Relative => write!(f, "relative"),
            MeasureKind::Total => write!(f, "total"),
        }
    }
}

// ==========================================
// 分析年度 (Planning Year)
// ==========================================
// 决定等候名单分析使用哪一年的需求表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanningYear {
    LastYear, // 去年实际需求
    NextYear, // 明年预测需求 (乘以增长系数)
}

impl fmt::Display for PlanningYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanningYear::LastYear => write!(f, "LAST_YEAR"),
            PlanningYear::NextYear => write!(f, "NEXT_YEAR"),
        }
    }
}

// ==========================================
// 等候名单分析使用的产能来源 (Capacity Source)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacitySource {
    LastYear,         // 去年会话产能
    NextYearExpected, // 明年计划会话产能
    NextYearRequired, // 满足明年需求所需产能 (= 明年需求分钟数)
}

impl fmt::Display for CapacitySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacitySource::LastYear => write!(f, "LAST_YEAR"),
            CapacitySource::NextYearExpected => write!(f, "NEXT_YEAR_EXPECTED"),
            CapacitySource::NextYearRequired => write!(f, "NEXT_YEAR_REQUIRED"),
        }
    }
}

// ==========================================
// 产能评估结论 (Capacity Assessment)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityAssessment {
    Sufficient,   // 计划会话数 >= 所需会话数
    Insufficient, // 计划会话数 < 所需会话数
}

impl CapacityAssessment {
    /// 国际化文案 key
    pub fn message_key(&self) -> &'static str {
        match self {
            CapacityAssessment::Sufficient => "assessment.sufficient",
            CapacityAssessment::Insufficient => "assessment.insufficient",
        }
    }
}

impl fmt::Display for CapacityAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityAssessment::Sufficient => write!(f, "SUFFICIENT"),
            CapacityAssessment::Insufficient => write!(f, "INSUFFICIENT"),
        }
    }
}

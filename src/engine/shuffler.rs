// ==========================================
// 手术室需求与产能规划 - 病例乱序提供者
// ==========================================
// 产能填充模拟唯一的随机性来源, 以 trait 注入以便测试替换
// ==========================================

use crate::domain::procedure::CaseUnit;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

// ==========================================
// Trait: CaseShuffler
// ==========================================
pub trait CaseShuffler {
    /// 原地生成病例单元的一个排列
    fn shuffle(&mut self, units: &mut [CaseUnit]);
}

// ==========================================
// SeededShuffler - 均匀随机排列
// ==========================================
// 给定种子时结果可复现; 无种子时每次调用结果不同
pub struct SeededShuffler {
    rng: StdRng,
}

impl SeededShuffler {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl CaseShuffler for SeededShuffler {
    fn shuffle(&mut self, units: &mut [CaseUnit]) {
        units.shuffle(&mut self.rng);
    }
}

// ==========================================
// IdentityShuffler - 保持展开顺序
// ==========================================
pub struct IdentityShuffler;

impl CaseShuffler for IdentityShuffler {
    fn shuffle(&mut self, _units: &mut [CaseUnit]) {}
}

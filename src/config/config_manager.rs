// ==========================================
// 手术室需求与产能规划 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、快照/恢复
// 存储: JSON 文件 (key-value), 缺失项使用默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::scenario::{ScenarioConfig, WaitingListScenario};
use crate::domain::capacity::{CapacityModel, CapacityParameters};
use crate::domain::types::{CapacitySource, PlanningYear};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // ===== 会话产能 =====
    pub const WEEKS_PER_YEAR: &str = "capacity/weeks_per_year";
    pub const SESSIONS_PER_WEEK: &str = "capacity/sessions_per_week";
    pub const SESSION_DURATION_HOURS: &str = "capacity/session_duration_hours";
    pub const UTILISATION: &str = "capacity/utilisation";

    // ===== 需求 =====
    pub const DEMAND_MULTIPLIER: &str = "demand/next_year_multiplier";

    // ===== 等候名单 =====
    pub const WAITING_LIST_START: &str = "waiting_list/start";
    pub const TARGET_WEEKS: &str = "waiting_list/target_weeks";
    pub const BACKLOG_FRACTION: &str = "waiting_list/backlog_fraction";
    pub const BACKLOG_CAPACITY_FRACTION: &str = "waiting_list/backlog_capacity_fraction";

    // ===== 模拟 / 报表 =====
    pub const RNG_SEED: &str = "simulation/rng_seed";
    pub const TOP_N: &str = "report/top_n";
    pub const LOCALE: &str = "report/locale";
}

// 配置目录名
const CONFIG_DIR_NAME: &str = "theatre-capacity";
const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 创建空配置 (全部使用默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载
    ///
    /// 文件格式为扁平对象, 值可以是字符串或数字:
    /// `{"capacity/weeks_per_year": 48, "report/locale": "en"}`
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path)?;
        let parsed: HashMap<String, serde_json::Value> = serde_json::from_str(&raw)?;
        let values = parsed
            .into_iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| {
                let value = match v {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, value)
            })
            .collect::<HashMap<_, _>>();

        info!(path = %path.display(), keys = values.len(), "配置文件已加载");
        Ok(Self {
            values,
            source: Some(path.to_path_buf()),
        })
    }

    /// 从默认路径加载; 文件不存在时返回空配置
    pub fn load_default() -> ConfigResult<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => {
                debug!("未找到默认配置文件, 使用内置默认值");
                Ok(Self::new())
            }
        }
    }

    /// 默认配置文件路径: {config_dir}/theatre-capacity/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// 配置来源文件
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    // ==========================================
    // 通用读写
    // ==========================================

    /// 读取配置值 (公开方法，供其他模块复用)
    pub fn get_global_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// 覆写配置值
    pub fn set_config_value(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取并解析配置值, 不存在时返回默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> ConfigResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get_global_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    // ===== 会话产能配置 =====

    /// 获取年运行周数 (默认 48)
    pub fn get_weeks_per_year(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(config_keys::WEEKS_PER_YEAR, 48)
    }

    /// 获取每周会话数 (默认 10)
    pub fn get_sessions_per_week(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::SESSIONS_PER_WEEK, 10.0)
    }

    /// 获取会话时长 (默认 4 小时)
    pub fn get_session_duration_hours(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::SESSION_DURATION_HOURS, 4.0)
    }

    /// 获取利用率 (默认 0.80)
    pub fn get_utilisation(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::UTILISATION, 0.80)
    }

    // ===== 需求配置 =====

    /// 获取明年需求增长系数 (默认 1.0)
    pub fn get_demand_multiplier(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::DEMAND_MULTIPLIER, 1.0)
    }

    // ===== 等候名单配置 =====

    /// 获取期初等候名单人数 (默认 500)
    pub fn get_waiting_list_start(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::WAITING_LIST_START, 500.0)
    }

    /// 获取目标等待周数 (默认 18)
    pub fn get_target_weeks(&self) -> ConfigResult<u32> {
        self.get_parsed_or_default(config_keys::TARGET_WEEKS, 18)
    }

    /// 获取期初超期比例 (默认 0.20)
    pub fn get_backlog_fraction(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::BACKLOG_FRACTION, 0.20)
    }

    /// 获取超期专用产能比例 (默认 0.30)
    pub fn get_backlog_capacity_fraction(&self) -> ConfigResult<f64> {
        self.get_parsed_or_default(config_keys::BACKLOG_CAPACITY_FRACTION, 0.30)
    }

    // ===== 模拟 / 报表配置 =====

    /// 获取随机种子 (默认无)
    pub fn get_rng_seed(&self) -> ConfigResult<Option<u64>> {
        match self.get_global_config_value(config_keys::RNG_SEED) {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(_) => self.get_parsed_or_default(config_keys::RNG_SEED, 0).map(Some),
        }
    }

    /// 获取排行榜条数 (默认 10)
    pub fn get_top_n(&self) -> ConfigResult<usize> {
        self.get_parsed_or_default(config_keys::TOP_N, 10)
    }

    /// 获取报表语言 (默认 en)
    pub fn get_locale(&self) -> String {
        self.get_global_config_value(config_keys::LOCALE)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| "en".to_string())
    }

    // ==========================================
    // 默认情景
    // ==========================================

    /// 由配置值构造默认规划情景
    ///
    /// 明年产能沿用去年; 分析年度为明年; 产能来源为明年计划产能
    pub fn default_scenario(&self) -> ConfigResult<ScenarioConfig> {
        Ok(ScenarioConfig {
            demand_multiplier: self.get_demand_multiplier()?,
            last_year_capacity: CapacityParameters {
                weeks: self.get_weeks_per_year()?,
                sessions_per_week: self.get_sessions_per_week()?,
                session_duration_hours: self.get_session_duration_hours()?,
                utilisation: self.get_utilisation()?,
            },
            next_year_capacity: CapacityModel::SameAsLastYear,
            actual_cases_treated_last_year: None,
            waiting_list: WaitingListScenario {
                planning_year: PlanningYear::NextYear,
                waiting_list_start: self.get_waiting_list_start()?,
                target_weeks: self.get_target_weeks()?,
                backlog_fraction: self.get_backlog_fraction()?,
                additions: None,
                capacity_source: CapacitySource::NextYearExpected,
                backlog_capacity_fraction: self.get_backlog_capacity_fraction()?,
                periods: 1,
            },
            rng_seed: self.get_rng_seed()?,
            top_n: self.get_top_n()?,
        })
    }

    // ==========================================
    // 快照
    // ==========================================

    /// 获取所有配置的快照（JSON格式, 按 key 排序）
    ///
    /// # 用途
    /// - 随报表一起保存, 保证测算可复现
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let ordered: BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    /// 从配置快照恢复配置
    ///
    /// # 返回
    /// 恢复的配置项数量 (`__meta_` 前缀的元信息不回写)
    pub fn restore_config_from_snapshot(&mut self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: HashMap<String, String> = serde_json::from_str(snapshot_json)?;

        let mut count = 0;
        for (key, value) in config_map {
            if key.starts_with("__meta_") {
                continue;
            }
            self.values.insert(key, value);
            count += 1;
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_without_file() {
        let config = ConfigManager::new();
        assert_eq!(config.get_weeks_per_year().unwrap(), 48);
        assert_eq!(config.get_sessions_per_week().unwrap(), 10.0);
        assert_eq!(config.get_session_duration_hours().unwrap(), 4.0);
        assert_eq!(config.get_utilisation().unwrap(), 0.80);
        assert_eq!(config.get_rng_seed().unwrap(), None);
        assert_eq!(config.get_locale(), "en");
    }

    #[test]
    fn test_from_file_accepts_numbers_and_strings() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"capacity/weeks_per_year": 50, "capacity/utilisation": "0.9", "simulation/rng_seed": 11}}"#
        )
        .unwrap();

        let config = ConfigManager::from_file(file.path()).unwrap();
        assert_eq!(config.get_weeks_per_year().unwrap(), 50);
        assert_eq!(config.get_utilisation().unwrap(), 0.9);
        assert_eq!(config.get_rng_seed().unwrap(), Some(11));
        assert_eq!(config.source(), Some(file.path()));
    }

    #[test]
    fn test_from_file_missing() {
        let result = ConfigManager::from_file("/definitely/not/here/config.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_invalid_value_reports_key() {
        let mut config = ConfigManager::new();
        config.set_config_value(config_keys::WEEKS_PER_YEAR, "many");
        match config.get_weeks_per_year() {
            Err(ConfigError::ConfigValueError { key, value, .. }) => {
                assert_eq!(key, config_keys::WEEKS_PER_YEAR);
                assert_eq!(value, "many");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_default_scenario_reflects_overrides() {
        let mut config = ConfigManager::new();
        config.set_config_value(config_keys::DEMAND_MULTIPLIER, "1.2");
        config.set_config_value(config_keys::BACKLOG_CAPACITY_FRACTION, "0.5");
        let scenario = config.default_scenario().unwrap();
        assert_eq!(scenario.demand_multiplier, 1.2);
        assert_eq!(scenario.waiting_list.backlog_capacity_fraction, 0.5);
        assert_eq!(scenario.last_year_capacity.weeks, 48);
        assert_eq!(scenario.waiting_list.capacity_source, CapacitySource::NextYearExpected);
    }

    #[test]
    fn test_snapshot_roundtrip_skips_meta() {
        let mut config = ConfigManager::new();
        config.set_config_value(config_keys::TOP_N, "5");
        let snapshot = config.get_config_snapshot().unwrap();

        let mut restored = ConfigManager::new();
        let count = restored.restore_config_from_snapshot(&snapshot).unwrap();
        assert_eq!(count, 1);
        assert_eq!(restored.get_top_n().unwrap(), 5);

        let with_meta = r#"{"__meta_run":"x","report/locale":"zh-CN"}"#;
        assert_eq!(restored.restore_config_from_snapshot(with_meta).unwrap(), 1);
        assert_eq!(restored.get_locale(), "zh-CN");
        assert_eq!(restored.get_global_config_value("__meta_run"), None);
    }
}

// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 配置文件 → 默认情景 → 测算
// ==========================================

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use theatre_capacity::config::{config_keys, ConfigManager, ScenarioConfig};
use theatre_capacity::{CapacitySource, PlanningApi, PlanningYear, ProcedureRecord};

fn config_file(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", json).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_default_scenario_from_config_file() {
    let file = config_file(
        r#"{
            "capacity/weeks_per_year": 46,
            "capacity/sessions_per_week": 12,
            "demand/next_year_multiplier": "1.1",
            "waiting_list/start": 800,
            "simulation/rng_seed": 5
        }"#,
    );
    let config = ConfigManager::from_file(file.path()).unwrap();
    let scenario = config.default_scenario().unwrap();

    assert_eq!(scenario.last_year_capacity.weeks, 46);
    assert_eq!(scenario.last_year_capacity.sessions_per_week, 12.0);
    assert_eq!(scenario.last_year_capacity.session_duration_hours, 4.0);
    assert_eq!(scenario.demand_multiplier, 1.1);
    assert_eq!(scenario.waiting_list.waiting_list_start, 800.0);
    assert_eq!(scenario.waiting_list.planning_year, PlanningYear::NextYear);
    assert_eq!(
        scenario.waiting_list.capacity_source,
        CapacitySource::NextYearExpected
    );
    assert_eq!(scenario.rng_seed, Some(5));
}

#[test]
fn test_scenario_template_round_trip() {
    let scenario = ConfigManager::new().default_scenario().unwrap();
    let json = serde_json::to_string_pretty(&scenario).unwrap();
    let parsed: ScenarioConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, scenario);
}

#[test]
fn test_snapshot_restore_between_managers() {
    let mut source = ConfigManager::new();
    source.set_config_value(config_keys::UTILISATION, "0.65");
    source.set_config_value(config_keys::TOP_N, "5");
    let snapshot = source.get_config_snapshot().unwrap();

    let mut target = ConfigManager::new();
    let restored = target.restore_config_from_snapshot(&snapshot).unwrap();

    assert_eq!(restored, 2);
    assert_eq!(target.get_utilisation().unwrap(), 0.65);
    assert_eq!(target.get_top_n().unwrap(), 5);
}

#[test]
fn test_api_runs_with_config_defaults() {
    let file = config_file(r#"{"report/top_n": 1, "simulation/rng_seed": 3}"#);
    let api = PlanningApi::new(Arc::new(ConfigManager::from_file(file.path()).unwrap()));

    let scenario = api.default_scenario().unwrap();
    let records = vec![
        ProcedureRecord::new("Procedure A", 100.0, 2.0),
        ProcedureRecord::new("Procedure B", 300.0, 1.0),
    ];
    let report = api.run_scenario(records, &scenario).unwrap();

    assert_eq!(report.top_by_cases.len(), 1);
    assert_eq!(report.top_by_cases[0].name, "Procedure B");
}

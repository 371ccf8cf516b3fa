// ==========================================
// 报表集成测试
// ==========================================
// 测试目标: 文本报告本地化、汇总 CSV、瀑布图 JSON
// ==========================================

mod helpers;

use std::sync::Arc;

use helpers::test_data_builder::{sample_procedures, ScenarioBuilder};
use theatre_capacity::i18n;
use theatre_capacity::report::{
    render_report, summary_to_csv_string, waterfalls_to_json, SummaryRecord,
};
use theatre_capacity::{CapacitySource, ConfigManager, PlanningApi};

fn report() -> theatre_capacity::PlanningReport {
    let scenario = ScenarioBuilder::new()
        .capacity_source(CapacitySource::NextYearRequired)
        .periods(2)
        .build();
    PlanningApi::new(Arc::new(ConfigManager::new()))
        .run_scenario(sample_procedures(), &scenario)
        .unwrap()
}

// 语言为全局状态, 两种语言在同一个用例中顺序验证
#[test]
fn test_render_report_in_both_locales() {
    let report = report();

    i18n::set_locale("en");
    let text = render_report(&report);
    assert!(text.starts_with("Theatre Demand and Capacity Report"));
    assert!(text.contains("Last year demand: 220.00 cases, 16200.00 minutes"));
    assert!(text.contains("Sufficient"));
    assert!(text.contains("Period 2 end:"));

    i18n::set_locale("zh-CN");
    let text = render_report(&report);
    assert!(text.starts_with("手术室需求与产能报告"));
    assert!(text.contains("去年需求: 220.00 例"));
    assert!(text.contains("充足"));

    i18n::set_locale("en");
}

#[test]
fn test_summary_csv_string_uses_final_period() {
    let report = report();
    let summary = SummaryRecord::from_report(&report);
    let last = report.waiting_list_periods.last().unwrap();

    assert_eq!(summary.waiting_list_end, last.end.total());
    assert_eq!(summary.backlog_end, last.end.backlog);

    let csv = summary_to_csv_string(&summary).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.starts_with("total_demand_cases,"));
}

#[test]
fn test_waterfall_json_has_one_entry_per_period() {
    let report = report();
    let json: serde_json::Value = serde_json::from_str(&waterfalls_to_json(&report).unwrap()).unwrap();

    let periods = json.as_array().unwrap();
    assert_eq!(periods.len(), 2);
    assert_eq!(periods[1]["period"], 2);
    let labels: Vec<&str> = periods[0]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["label"].as_str().unwrap())
        .collect();
    assert_eq!(
        labels,
        vec![
            "Start Backlog",
            "Start Non-Backlog",
            "Additions",
            "Backlog Treated",
            "Non-Backlog Treated",
            "End Backlog",
            "End Non-Backlog",
        ]
    );
}

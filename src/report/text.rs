// ==========================================
// 手术室需求与产能规划 - 文本报告
// ==========================================
// CLI 输出用的本地化纯文本摘要 (语言由 i18n::set_locale 决定)
// ==========================================

use crate::engine::orchestrator::PlanningReport;
use crate::i18n::{t, t_with_args};

fn num(value: f64) -> String {
    format!("{:.2}", value)
}

fn percent(value: Option<f64>) -> String {
    value.map(num).unwrap_or_else(|| t("common.not_available"))
}

fn push_line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

fn section(out: &mut String, key: &str) {
    let title = t(key);
    let rule = "-".repeat(title.chars().count().max(8));
    out.push('\n');
    push_line(out, &title);
    push_line(out, &rule);
}

fn line(out: &mut String, key: &str, args: &[(&str, String)]) {
    let args: Vec<(&str, &str)> = args.iter().map(|(k, v)| (*k, v.as_str())).collect();
    push_line(out, &t_with_args(key, &args));
}

/// 渲染规划测算报告
pub fn render_report(report: &PlanningReport) -> String {
    let mut out = String::new();
    push_line(&mut out, &t("report.title"));
    line(&mut out, "report.run_id", &[("id", report.run_id.to_string())]);

    // ===== 需求 =====
    section(&mut out, "report.section.demand");
    line(
        &mut out,
        "report.demand_last_year",
        &[
            ("cases", num(report.demand_last_year.total_cases)),
            ("minutes", num(report.demand_last_year.total_minutes)),
        ],
    );
    line(
        &mut out,
        "report.demand_next_year",
        &[
            ("cases", num(report.demand_next_year.total_cases)),
            ("minutes", num(report.demand_next_year.total_minutes)),
        ],
    );
    for (idx, record) in report.top_by_cases.iter().enumerate() {
        line(
            &mut out,
            "report.top_procedure",
            &[
                ("rank", (idx + 1).to_string()),
                ("name", record.name.clone()),
                ("cases", num(record.annual_cases)),
            ],
        );
    }

    // ===== 产能 =====
    section(&mut out, "report.section.capacity");
    line(
        &mut out,
        "report.capacity_last_year",
        &[
            ("sessions", num(report.last_year_total_sessions)),
            ("minutes", num(report.last_year_capacity_minutes)),
        ],
    );
    line(
        &mut out,
        "report.capacity_next_year",
        &[
            ("sessions", num(report.next_year_total_sessions)),
            ("minutes", num(report.next_year_capacity_minutes)),
        ],
    );
    line(
        &mut out,
        "report.demand_met",
        &[(
            "percent",
            num(report.last_year_comparison.percentage_demand_met),
        )],
    );

    // ===== 填充模拟 =====
    section(&mut out, "report.section.simulation");
    line(
        &mut out,
        "report.simulated_last_year",
        &[("cases", report.simulated_last_year.cases_treated().to_string())],
    );
    if let Some(actual) = report.actual_cases_treated_last_year {
        line(&mut out, "report.actual_last_year", &[("cases", num(actual))]);
    }
    line(
        &mut out,
        "report.simulated_next_year",
        &[("cases", report.simulated_next_year.cases_treated().to_string())],
    );

    // ===== 会话 =====
    section(&mut out, "report.section.sessions");
    line(
        &mut out,
        "report.required_minutes",
        &[("minutes", num(report.required_capacity_minutes))],
    );
    line(
        &mut out,
        "report.required_sessions",
        &[
            ("sessions", num(report.required_sessions.sessions_per_week)),
            ("planned", num(report.sessions_gap.planned_per_week)),
        ],
    );
    line(
        &mut out,
        "report.sessions_gap",
        &[
            ("percent", percent(report.sessions_gap.difference_percentage)),
            ("assessment", t(report.sessions_gap.assessment.message_key())),
        ],
    );
    line(
        &mut out,
        "report.cases_gap",
        &[("percent", percent(report.cases_gap.difference_percentage))],
    );

    // ===== 等候名单 =====
    section(&mut out, "report.section.waiting_list");
    line(
        &mut out,
        "report.waiting_list_capacity",
        &[
            ("minutes", num(report.waiting_list_capacity_minutes)),
            ("avg", num(report.avg_case_duration_minutes)),
        ],
    );
    if let Some(first) = report.waiting_list_periods.first() {
        line(
            &mut out,
            "report.waiting_list_start",
            &[
                ("total", num(first.start.total())),
                ("backlog", num(first.start.backlog)),
            ],
        );
    }
    for (idx, outcome) in report.waiting_list_periods.iter().enumerate() {
        line(
            &mut out,
            "report.waiting_list_period",
            &[
                ("period", (idx + 1).to_string()),
                ("total", num(outcome.end.total())),
                ("backlog", num(outcome.end.backlog)),
                ("treated", num(outcome.total_treated())),
            ],
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::set_locale;
    use crate::i18n::tests::LOCALE_TEST_LOCK;

    #[test]
    fn test_section_and_line_layout() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");

        let mut out = String::new();
        section(&mut out, "report.section.demand");
        line(&mut out, "report.run_id", &[("id", "abc".to_string())]);

        // 标题下划线至少 8 个字符
        assert_eq!(out, "\nDemand\n--------\nRun: abc\n");
    }

    #[test]
    fn test_percent_falls_back_when_missing() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("en");
        assert_eq!(percent(Some(12.5)), "12.50");
        assert_eq!(percent(None), t("common.not_available"));
    }
}

// ==========================================
// 手术室需求与产能规划 - 规划测算 API
// ==========================================
// 职责: 宿主界面调用入口 (导入 → 校验 → 测算 → 导出)
// 任一步失败即返回 ApiError, 不返回部分结果
// ==========================================

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument};

use crate::api::error::ApiResult;
use crate::api::validator::InputValidator;
use crate::config::scenario::ScenarioConfig;
use crate::config::ConfigManager;
use crate::domain::procedure::ProcedureRecord;
use crate::engine::orchestrator::{PlanningOrchestrator, PlanningReport};
use crate::engine::shuffler::{CaseShuffler, SeededShuffler};
use crate::importer::{ImportSummary, ProcedureImporter};
use crate::report::{write_summary_csv, write_waterfall_json, SummaryRecord};

// ==========================================
// PlanningApi - 规划测算 API
// ==========================================

/// 规划测算API
///
/// 职责：
/// 1. 手术需求表导入
/// 2. 情景参数校验
/// 3. 调用编排器完成测算
/// 4. 汇总记录与瀑布图导出
pub struct PlanningApi {
    config_manager: Arc<ConfigManager>,
    importer: ProcedureImporter,
    orchestrator: PlanningOrchestrator,
}

impl PlanningApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self {
            config_manager,
            importer: ProcedureImporter::new(),
            orchestrator: PlanningOrchestrator::new(),
        }
    }

    /// 由配置缺省值生成情景
    pub fn default_scenario(&self) -> ApiResult<ScenarioConfig> {
        Ok(self.config_manager.default_scenario()?)
    }

    /// 导入手术需求表 (CSV/Excel)
    pub fn import_procedures<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ApiResult<(Vec<ProcedureRecord>, ImportSummary)> {
        let (records, summary) = self.importer.import_file(path)?;
        InputValidator::validate_procedures(&records)?;
        Ok((records, summary))
    }

    /// 执行测算 (按情景随机种子构造乱序器)
    pub fn run_scenario(
        &self,
        records: Vec<ProcedureRecord>,
        scenario: &ScenarioConfig,
    ) -> ApiResult<PlanningReport> {
        let mut shuffler = SeededShuffler::new(scenario.rng_seed);
        self.run_scenario_with_shuffler(records, scenario, &mut shuffler)
    }

    /// 执行测算 (调用方提供乱序器)
    #[instrument(skip_all, fields(records_count = records.len()))]
    pub fn run_scenario_with_shuffler(
        &self,
        records: Vec<ProcedureRecord>,
        scenario: &ScenarioConfig,
        shuffler: &mut dyn CaseShuffler,
    ) -> ApiResult<PlanningReport> {
        InputValidator::validate_procedures(&records)?;
        InputValidator::validate_scenario(scenario)?;

        let report = self.orchestrator.run(records, scenario, shuffler)?;
        info!(run_id = %report.run_id, "测算完成");
        Ok(report)
    }

    /// 导出汇总记录 CSV
    pub fn export_summary<P: AsRef<Path>>(
        &self,
        report: &PlanningReport,
        path: P,
    ) -> ApiResult<SummaryRecord> {
        let summary = SummaryRecord::from_report(report);
        write_summary_csv(&summary, path)?;
        Ok(summary)
    }

    /// 导出瀑布图 JSON
    pub fn export_waterfall<P: AsRef<Path>>(
        &self,
        report: &PlanningReport,
        path: P,
    ) -> ApiResult<()> {
        write_waterfall_json(report, path)?;
        Ok(())
    }
}

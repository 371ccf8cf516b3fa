// ==========================================
// 手术室需求与产能规划 - 应用状态
// ==========================================
// 职责: 会话级需求表 (手工录入累加 / 上传整体替换)
//       与共享 API 实例
// 测算时以快照按值传入核心, 核心不持有会话状态
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::InputValidator;
use crate::api::PlanningApi;
use crate::config::config_manager::ConfigManager;
use crate::domain::procedure::ProcedureRecord;
use crate::importer::ImportSummary;

// ==========================================
// SessionState - 会话需求表
// ==========================================
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    created_at: DateTime<Utc>,
    procedures: Vec<ProcedureRecord>,
}

impl SessionState {
    /// 新会话, 预置一条示例记录 (Procedure A, 100 例, 2.0 小时)
    pub fn new() -> Self {
        let mut session = Self::empty();
        session
            .procedures
            .push(ProcedureRecord::new("Procedure A", 100.0, 2.0));
        session
    }

    /// 空会话
    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            procedures: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn procedures(&self) -> &[ProcedureRecord] {
        &self.procedures
    }

    pub fn len(&self) -> usize {
        self.procedures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.procedures.is_empty()
    }

    /// 手工录入一条记录 (追加到末尾)
    pub fn add_procedure(
        &mut self,
        name: impl Into<String>,
        annual_cases: u64,
        avg_duration_hours: f64,
    ) -> ApiResult<()> {
        let record = ProcedureRecord::new(name, annual_cases as f64, avg_duration_hours);
        InputValidator::validate_procedure(&record)?;
        debug!(session_id = %self.id, procedure = %record.name, "追加手术记录");
        self.procedures.push(record);
        Ok(())
    }

    /// 上传文件后整体替换需求表 (任一记录非法则保持原表不变)
    pub fn replace_with_upload(&mut self, records: Vec<ProcedureRecord>) -> ApiResult<()> {
        InputValidator::validate_procedures(&records)?;
        debug!(session_id = %self.id, records_count = records.len(), "需求表已替换");
        self.procedures = records;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.procedures.clear();
    }

    /// 需求表快照
    pub fn snapshot(&self) -> Vec<ProcedureRecord> {
        self.procedures.clone()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// AppState - 应用状态
// ==========================================

/// 应用状态
///
/// 包含共享的配置、API实例和当前会话
pub struct AppState {
    pub config_manager: Arc<ConfigManager>,
    pub planning_api: Arc<PlanningApi>,
    session: Mutex<SessionState>,
}

impl AppState {
    pub fn new(config_manager: ConfigManager) -> Self {
        let config_manager = Arc::new(config_manager);
        Self {
            planning_api: Arc::new(PlanningApi::new(config_manager.clone())),
            config_manager,
            session: Mutex::new(SessionState::new()),
        }
    }

    /// 获取会话锁
    pub fn session(&self) -> ApiResult<MutexGuard<'_, SessionState>> {
        self.session
            .lock()
            .map_err(|e| ApiError::Other(anyhow::anyhow!("会话状态锁获取失败: {}", e)))
    }

    /// 当前需求表快照
    pub fn snapshot_procedures(&self) -> ApiResult<Vec<ProcedureRecord>> {
        Ok(self.session()?.snapshot())
    }

    /// 上传需求表文件, 导入成功后整体替换会话需求表
    pub fn upload_procedures<P: AsRef<Path>>(&self, path: P) -> ApiResult<ImportSummary> {
        let (records, summary) = self.planning_api.import_procedures(path)?;
        self.session()?.replace_with_upload(records)?;
        Ok(summary)
    }
}

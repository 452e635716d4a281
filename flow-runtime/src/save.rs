//! # Save 模块
//!
//! 存档/读档的数据模型。
//!
//! ## 设计原则
//!
//! - 所有存档数据必须可序列化（JSON）
//! - 必须有版本号，支持向后兼容检测
//! - 存档只包含核心拥有的逻辑状态；进行中的效果不随存档保存，
//!   对应的等待门在恢复后的第一次 tick 按立即完成降级
//!   （见 [`crate::runtime::FlowRuntime::restore_state`]）

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::stage::Stage;
use crate::state::FlowState;

/// 存档格式版本
///
/// 版本号含义：
/// - MAJOR: 不兼容的格式变更
/// - MINOR: 向后兼容的新字段
pub const SAVE_VERSION_MAJOR: u32 = 1;
pub const SAVE_VERSION_MINOR: u32 = 0;

/// 存档版本信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveVersion {
    pub major: u32,
    pub minor: u32,
}

impl SaveVersion {
    /// 当前版本
    pub fn current() -> Self {
        Self {
            major: SAVE_VERSION_MAJOR,
            minor: SAVE_VERSION_MINOR,
        }
    }

    /// 检查是否兼容
    ///
    /// 兼容规则：
    /// - major 必须相同
    /// - minor 可以不同（向后兼容）
    pub fn is_compatible(&self) -> bool {
        self.major == SAVE_VERSION_MAJOR
    }
}

impl Default for SaveVersion {
    fn default() -> Self {
        Self::current()
    }
}

impl std::fmt::Display for SaveVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

/// 存档数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveData {
    /// 存档格式版本
    pub version: SaveVersion,
    /// 序列器状态
    pub state: FlowState,
    /// 精灵注册表快照
    pub stage: Stage,
}

impl SaveData {
    /// 从当前运行状态创建存档
    pub fn new(state: FlowState, stage: Stage) -> Self {
        Self {
            version: SaveVersion::current(),
            state,
            stage,
        }
    }

    /// 序列化为 JSON 文档
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::InvalidDocument {
            message: e.to_string(),
        })
    }

    /// 从 JSON 文档加载存档
    ///
    /// 版本不兼容时拒绝加载。
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let data: SaveData =
            serde_json::from_str(text).map_err(|e| ConfigError::InvalidDocument {
                message: e.to_string(),
            })?;

        if !data.version.is_compatible() {
            return Err(ConfigError::InvalidDocument {
                message: format!("存档版本不兼容: {}", data.version),
            });
        }

        Ok(data)
    }
}

//! # Sequence 模块
//!
//! 命令序列容器：有序命令列表 + 标签查找 + 创作期校验。

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::command::Command;
use crate::error::ConfigError;

/// 命令序列
///
/// 一段脚本的结构化表示。命令顺序执行，`Label` 变体作为
/// `Jump` 的跳转目标。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sequence {
    /// 序列标识符
    pub id: String,
    /// 命令列表
    pub commands: Vec<Command>,
}

impl Sequence {
    /// 创建新序列
    pub fn new(id: impl Into<String>, commands: Vec<Command>) -> Self {
        Self {
            id: id.into(),
            commands,
        }
    }

    /// 从 JSON 文档加载序列
    ///
    /// 加载后立即校验，创作错误在这里尽早暴露。
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let sequence: Sequence =
            serde_json::from_str(text).map_err(|e| ConfigError::InvalidDocument {
                message: e.to_string(),
            })?;
        sequence.validate()?;
        Ok(sequence)
    }

    /// 获取指定位置的命令
    pub fn get(&self, index: usize) -> Option<&Command> {
        self.commands.get(index)
    }

    /// 命令数量
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// 查找标签位置
    pub fn find_label(&self, label: &str) -> Option<usize> {
        self.commands.iter().position(|cmd| {
            matches!(cmd, Command::Label { name } if name == label)
        })
    }

    /// 创作期校验
    ///
    /// 检查项：
    /// - 标签不重复
    /// - 跳转目标已定义
    /// - 时长参数非负
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut labels: HashSet<&str> = HashSet::new();
        for cmd in &self.commands {
            if let Command::Label { name } = cmd {
                if !labels.insert(name) {
                    return Err(ConfigError::DuplicateLabel {
                        label: name.clone(),
                    });
                }
            }
        }

        for (index, cmd) in self.commands.iter().enumerate() {
            if let Command::Jump { label } = cmd {
                if !labels.contains(label.as_str()) {
                    return Err(ConfigError::UnknownLabel {
                        index,
                        label: label.clone(),
                    });
                }
            }

            if let Some(duration) = cmd.duration() {
                if duration < 0.0 {
                    return Err(ConfigError::NegativeDuration {
                        index,
                        value: duration,
                    });
                }
            }
        }

        Ok(())
    }
}

//! # Command 模块
//!
//! 定义脚本中的命令变体。
//!
//! ## 设计原则
//!
//! - 命令是**创作期数据**：由外部创作工具以 JSON 提供，serde 反序列化
//! - 命令本身不执行任何操作，进入逻辑在 [`crate::runtime`] 的执行器中
//! - 不使用继承层次：一个带标签的枚举，每个变体只携带自己的参数

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::effect::Easing;

fn default_wait() -> bool {
    true
}

/// 脚本命令
///
/// 序列中的一个执行单元。生命周期：创作期构造，序列器到达时
/// 进入，经由**恰好一条**继续路径退出（同步立即 / 异步恢复）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// 精灵颜色渐变
    ///
    /// 从精灵当前颜色渐变到 `target_color`。
    /// `wait_until_finished` 为 true 时挂起序列直到渐变结束；
    /// 为 false 时渐变在后台继续，序列立即前进。
    FadeSprite {
        /// 目标精灵别名
        sprite: String,
        /// 目标颜色
        target_color: Color,
        /// 渐变时长（秒）
        duration: f32,
        /// 缓动函数
        #[serde(default)]
        easing: Easing,
        /// 是否等待渐变结束
        #[serde(default = "default_wait")]
        wait_until_finished: bool,
    },

    /// 直接设置精灵颜色（不经过渐变）
    SetSpriteColor {
        /// 目标精灵别名
        sprite: String,
        /// 新颜色
        color: Color,
    },

    /// 显示对话文本
    ///
    /// 挂起序列，等待输入路由器交付的前进信号。
    Say {
        /// 说话者名称（None 表示旁白）
        speaker: Option<String>,
        /// 对话内容
        content: String,
    },

    /// 挂起序列指定时长
    Wait {
        /// 等待时长（秒）
        duration: f32,
    },

    /// 标签定义
    ///
    /// 不产生任何效果，只作为跳转目标。
    Label {
        /// 标签名
        name: String,
    },

    /// 跳转到标签
    Jump {
        /// 目标标签名
        label: String,
    },
}

impl Command {
    /// 命令携带的时长参数（用于创作期校验）
    pub fn duration(&self) -> Option<f32> {
        match self {
            Command::FadeSprite { duration, .. } | Command::Wait { duration } => Some(*duration),
            _ => None,
        }
    }
}

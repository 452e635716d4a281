//! # Event 模块
//!
//! 定义序列器向宿主发出的通知。
//!
//! ## 设计原则
//!
//! - **声明式**：事件描述"发生了什么"，不描述"怎么呈现"
//! - **无副作用**：事件本身不执行任何操作
//! - **引擎无关**：不包含任何渲染引擎的类型；精灵颜色的连续
//!   变化由宿主直接读取 Stage，事件只覆盖离散节点

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::effect::EffectId;
use crate::stage::SpriteId;

/// 序列器向宿主发出的通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEvent {
    /// 显示对话文本
    ShowText {
        /// 说话者名称（None 表示旁白）
        speaker: Option<String>,
        /// 对话内容
        content: String,
    },

    /// 渐变开始
    FadeStarted {
        /// 效果 ID
        effect: EffectId,
        /// 目标精灵
        sprite: SpriteId,
    },

    /// 渐变结束（完成或被跳过）
    FadeFinished {
        /// 效果 ID
        effect: EffectId,
        /// 目标精灵
        sprite: SpriteId,
    },

    /// 精灵颜色被直接写入（不经过渐变）
    SpriteColorSet {
        /// 目标精灵
        sprite: SpriteId,
        /// 新颜色
        color: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = FlowEvent::ShowText {
            speaker: Some("爱丽丝".to_string()),
            content: "你好".to_string(),
        };

        let json = serde_json::to_string(&event).unwrap();
        let deserialized: FlowEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, deserialized);
    }
}

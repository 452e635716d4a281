//! # Flow Runtime
//!
//! 可视化脚本 / 对话序列的核心运行时库。
//!
//! ## 架构概述
//!
//! `flow-runtime` 是纯逻辑核心，不依赖任何 IO 或渲染引擎。
//! 它以**协作式 tick 模型**与宿主层（Host）通信：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │── InputFrame ──► DialogRouter ──► FlowInput
//!   │                                   │ tick(dt, input)
//!   │◄── (Vec<FlowEvent>, WaitReason) ──│
//!   │◄── Stage（精灵颜色，直接读取）──── │
//! ```
//!
//! 命令可以**逻辑挂起**序列：设置等待门并把控制权交还 tick
//! 循环；实际工作（颜色插值）跨后续 tick 继续，效果驱动器的
//! 完成事件恢复序列。每个命令经由恰好一条继续路径退出。
//!
//! ## 核心类型
//!
//! - [`FlowRuntime`]：序列器，驱动命令序列执行
//! - [`Command`] / [`Sequence`]：创作期命令与序列容器
//! - [`EffectDriver`]：定时颜色渐变，完成事件恰好交付一次
//! - [`DialogRouter`]：原始输入 → 前进信号的归一化
//! - [`FlowState`] / [`WaitReason`]：显式传递的序列器状态
//! - [`FlowEvent`]：Runtime 向 Host 发出的通知
//!
//! ## 使用示例
//!
//! ```ignore
//! use flow_runtime::{DialogInput, DialogRouter, FlowRuntime, Sequence, Sprite};
//!
//! let sequence = Sequence::from_json(text)?;
//! let mut runtime = FlowRuntime::new(sequence);
//! runtime.stage_mut().spawn(Sprite::new("hero"));
//!
//! let mut router = DialogRouter::new(DialogInput::default());
//!
//! // 主循环
//! loop {
//!     let frame = host.collect_input();
//!     let signal = router.poll(dt, &frame);
//!     let (events, waiting) = runtime.tick(dt, signal)?;
//!
//!     // Host 呈现 events、按 Stage 渲染精灵……
//!
//!     if runtime.is_finished() {
//!         break;
//!     }
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`color`]：颜色值类型
//! - [`stage`]：精灵句柄注册表
//! - [`effect`]：效果驱动器（渐变、缓动、完成交付）
//! - [`command`] / [`sequence`]：命令定义与序列容器
//! - [`input`]：输入路由器
//! - [`state`]：序列器状态与等待模型
//! - [`event`]：Runtime 向 Host 发出的通知
//! - [`runtime`]：执行引擎
//! - [`save`]：存档数据模型
//! - [`error`]：错误类型定义

pub mod color;
pub mod command;
pub mod effect;
pub mod error;
pub mod event;
pub mod input;
pub mod runtime;
pub mod save;
pub mod sequence;
pub mod stage;
pub mod state;

// 重导出核心类型
pub use color::Color;
pub use command::Command;
pub use effect::{Easing, EffectDriver, EffectEvent, EffectId};
pub use error::{ConfigError, FlowError, FlowResult, RuntimeError};
pub use event::FlowEvent;
pub use input::{
    ClickMode, DialogInput, DialogRouter, FlowInput, InputFrame, KeyCode, KeyPressMode,
    PointerButton, PointerClick,
};
pub use runtime::FlowRuntime;
pub use save::{SaveData, SaveVersion};
pub use sequence::Sequence;
pub use stage::{Sprite, SpriteId, Stage};
pub use state::{FlowState, SequencePosition, WaitReason};

//! # Executor 模块
//!
//! 命令进入逻辑：把单个命令转换为进入结果。
//!
//! ## 职责
//!
//! - 读取 Command，执行其进入副作用（启动渐变、写入颜色）
//! - 决定**恰好一条**继续路径：同步前进 / 挂起等待 / 跳转
//! - 创作错误（无效精灵、负时长）在这里尽早暴露
//!
//! 继续路径的唯一性由 [`EnterOutcome`] 的枚举结构保证：
//! 一次进入不可能既挂起又前进。

use crate::command::Command;
use crate::error::{ConfigError, FlowResult, RuntimeError};
use crate::effect::EffectDriver;
use crate::event::FlowEvent;
use crate::sequence::Sequence;
use crate::stage::{SpriteId, Stage};
use crate::state::WaitReason;

/// 进入后的继续路径
#[derive(Debug, Clone, PartialEq)]
pub enum EnterOutcome {
    /// 同步前进到下一个命令
    Advance,
    /// 挂起序列，等待恢复
    Wait(WaitReason),
    /// 跳转到指定位置
    Jump(usize),
}

/// 进入结果
#[derive(Debug, Clone, PartialEq)]
pub struct EnterResult {
    /// 产生的事件
    pub events: Vec<FlowEvent>,
    /// 继续路径
    pub outcome: EnterOutcome,
}

impl EnterResult {
    /// 创建同步前进结果
    fn advance(events: Vec<FlowEvent>) -> Self {
        Self {
            events,
            outcome: EnterOutcome::Advance,
        }
    }

    /// 创建挂起结果
    fn wait(events: Vec<FlowEvent>, reason: WaitReason) -> Self {
        Self {
            events,
            outcome: EnterOutcome::Wait(reason),
        }
    }

    /// 创建跳转结果
    fn jump(target: usize) -> Self {
        Self {
            events: Vec::new(),
            outcome: EnterOutcome::Jump(target),
        }
    }
}

/// 命令执行器
#[derive(Debug, Default)]
pub struct Executor;

impl Executor {
    /// 创建新的执行器
    pub fn new() -> Self {
        Self
    }

    /// 按别名解析精灵句柄
    fn resolve_sprite(stage: &Stage, name: &str) -> Result<SpriteId, RuntimeError> {
        stage.id_of(name).ok_or_else(|| RuntimeError::SpriteNotFound {
            name: name.to_string(),
        })
    }

    /// 进入单个命令
    ///
    /// # 参数
    /// - `command`: 要进入的命令
    /// - `index`: 命令在序列中的位置（用于错误上报）
    ///
    /// # 返回
    /// `EnterResult` 包含产生的事件和恰好一条继续路径
    pub fn enter(
        &mut self,
        command: &Command,
        index: usize,
        stage: &mut Stage,
        effects: &mut EffectDriver,
        sequence: &Sequence,
    ) -> FlowResult<EnterResult> {
        match command {
            Command::FadeSprite {
                sprite,
                target_color,
                duration,
                easing,
                wait_until_finished,
            } => {
                if *duration < 0.0 {
                    return Err(ConfigError::NegativeDuration {
                        index,
                        value: *duration,
                    }
                    .into());
                }

                let sprite_id = Self::resolve_sprite(stage, sprite)?;
                let effect = effects.fade(stage, sprite_id, *target_color, *duration, *easing)?;

                if *wait_until_finished {
                    Ok(EnterResult::wait(
                        Vec::new(),
                        WaitReason::ForEffect(effect),
                    ))
                } else {
                    // 渐变在后台继续，序列流与之解耦
                    Ok(EnterResult::advance(Vec::new()))
                }
            }

            Command::SetSpriteColor { sprite, color } => {
                let sprite_id = Self::resolve_sprite(stage, sprite)?;
                stage.set_color(sprite_id, *color);

                Ok(EnterResult::advance(vec![FlowEvent::SpriteColorSet {
                    sprite: sprite_id,
                    color: *color,
                }]))
            }

            Command::Say { speaker, content } => Ok(EnterResult::wait(
                vec![FlowEvent::ShowText {
                    speaker: speaker.clone(),
                    content: content.clone(),
                }],
                WaitReason::ForAdvance,
            )),

            Command::Wait { duration } => {
                if *duration < 0.0 {
                    return Err(ConfigError::NegativeDuration {
                        index,
                        value: *duration,
                    }
                    .into());
                }

                if *duration == 0.0 {
                    Ok(EnterResult::advance(Vec::new()))
                } else {
                    Ok(EnterResult::wait(Vec::new(), WaitReason::ForTime(*duration)))
                }
            }

            Command::Label { .. } => {
                // 标签不产生效果，只是跳转目标
                Ok(EnterResult::advance(Vec::new()))
            }

            Command::Jump { label } => {
                let target = sequence.find_label(label).ok_or_else(|| {
                    RuntimeError::LabelNotFound {
                        label: label.clone(),
                    }
                })?;

                Ok(EnterResult::jump(target))
            }
        }
    }
}

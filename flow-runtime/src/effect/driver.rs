//! # Driver 模块
//!
//! 效果驱动器：管理所有进行中的颜色渐变。
//!
//! ## 设计理念
//!
//! 驱动器只负责：
//! 1. 管理时间轴：知道某个精灵的颜色从 A 到 B 需要在 duration 内变化
//! 2. 每次推进时把插值结果写入 Stage
//! 3. 以事件队列交付完成通知，**每个渐变恰好一次**
//!
//! ## 完成语义
//!
//! - 正常结束：先写入最终颜色，再交付 `Completed`
//! - 目标精灵已销毁：立即按完成处理，不再写入任何值
//! - 同一精灵上启动新渐变：旧渐变被取代，交付其完成事件但
//!   **不**写入旧终值（新渐变从当前颜色接管）
//!
//! 无论哪条路径，等待该效果的序列器都不会因事件丢失而死锁。

use crate::color::Color;
use crate::error::RuntimeError;
use crate::stage::{SpriteId, Stage};

use super::fade::Fade;
use super::{Easing, EffectId};

/// 效果事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EffectEvent {
    /// 效果开始
    Started { id: EffectId, sprite: SpriteId },
    /// 效果完成
    Completed { id: EffectId, sprite: SpriteId },
    /// 效果被跳过
    Skipped { id: EffectId, sprite: SpriteId },
}

impl EffectEvent {
    /// 事件对应的效果 ID
    pub fn effect_id(&self) -> EffectId {
        match self {
            EffectEvent::Started { id, .. }
            | EffectEvent::Completed { id, .. }
            | EffectEvent::Skipped { id, .. } => *id,
        }
    }

    /// 是否为完成类事件（完成或跳过）
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            EffectEvent::Completed { .. } | EffectEvent::Skipped { .. }
        )
    }
}

/// 效果驱动器
///
/// 每个精灵同一时刻至多持有一个渐变。
#[derive(Debug, Default)]
pub struct EffectDriver {
    /// 进行中的渐变（SpriteId -> Fade）
    fades: Vec<Fade>,
    /// 下一个效果 ID
    next_id: u64,
    /// 待交付的事件队列
    events: Vec<EffectEvent>,
}

impl EffectDriver {
    /// 创建新的驱动器
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成下一个效果 ID
    fn next_effect_id(&mut self) -> EffectId {
        self.next_id += 1;
        EffectId(self.next_id)
    }

    /// 启动颜色渐变
    ///
    /// 从精灵的**当前颜色**渐变到 `target`。
    ///
    /// # 参数
    /// - `sprite`: 目标精灵，必须存活
    /// - `target`: 目标颜色
    /// - `duration`: 渐变时长（秒），非正值立即完成
    /// - `easing`: 缓动函数
    ///
    /// # 返回
    /// - `Ok(EffectId)`: 渐变已启动；时长为零时完成事件已入队，
    ///   由同一调度轮次内的下一次事件排空交付
    /// - `Err(RuntimeError::InvalidSprite)`: 精灵不存在
    pub fn fade(
        &mut self,
        stage: &mut Stage,
        sprite: SpriteId,
        target: Color,
        duration: f32,
        easing: Easing,
    ) -> Result<EffectId, RuntimeError> {
        let from = stage
            .color_of(sprite)
            .ok_or(RuntimeError::InvalidSprite { id: sprite })?;

        // 同一精灵上的现有渐变被取代：交付完成事件，不写入旧终值
        if let Some(pos) = self.fades.iter().position(|f| f.sprite == sprite) {
            let replaced = self.fades.swap_remove(pos);
            self.events.push(EffectEvent::Completed {
                id: replaced.id,
                sprite: replaced.sprite,
            });
        }

        let id = self.next_effect_id();
        let fade = Fade::new(id, sprite, from, target, duration, easing);
        self.events.push(EffectEvent::Started { id, sprite });

        if fade.is_finished() {
            // 零时长：立即写入终值并交付完成
            stage.set_color(sprite, fade.final_color());
            self.events.push(EffectEvent::Completed { id, sprite });
        } else {
            self.fades.push(fade);
        }

        Ok(id)
    }

    /// 推进所有渐变
    ///
    /// 把插值结果写入 Stage，结束的渐变被移除并交付完成事件。
    ///
    /// # 返回
    /// 本次推进交付的事件列表（含此前入队的待交付事件）
    pub fn update(&mut self, dt: f32, stage: &mut Stage) -> Vec<EffectEvent> {
        let mut finished: Vec<usize> = Vec::new();

        for (index, fade) in self.fades.iter_mut().enumerate() {
            if !stage.contains(fade.sprite) {
                // 目标已销毁：按完成处理，不再写入
                fade.skip();
                self.events.push(EffectEvent::Completed {
                    id: fade.id,
                    sprite: fade.sprite,
                });
                finished.push(index);
                continue;
            }

            if fade.is_finished() {
                // skip_all 标记过的渐变在此交付
                stage.set_color(fade.sprite, fade.final_color());
                self.events.push(EffectEvent::Skipped {
                    id: fade.id,
                    sprite: fade.sprite,
                });
                finished.push(index);
                continue;
            }

            let still_active = fade.update(dt);
            stage.set_color(fade.sprite, fade.current_color());

            if !still_active {
                self.events.push(EffectEvent::Completed {
                    id: fade.id,
                    sprite: fade.sprite,
                });
                finished.push(index);
            }
        }

        // 从后往前移除，避免索引失效
        for index in finished.into_iter().rev() {
            self.fades.swap_remove(index);
        }

        std::mem::take(&mut self.events)
    }

    /// 排空待交付事件
    ///
    /// 用于在两次 `update` 之间取走刚入队的事件
    /// （零时长完成、取代完成）。
    pub fn drain_events(&mut self) -> Vec<EffectEvent> {
        std::mem::take(&mut self.events)
    }

    /// 跳过所有渐变
    ///
    /// 立即把每个渐变的终值写入 Stage；完成事件由下一次
    /// `update` 交付。
    pub fn skip_all(&mut self, stage: &mut Stage) {
        for fade in &mut self.fades {
            if !fade.is_finished() {
                fade.skip();
                stage.set_color(fade.sprite, fade.final_color());
            }
        }
    }

    /// 检查效果是否仍在进行中
    pub fn is_active(&self, id: EffectId) -> bool {
        self.fades.iter().any(|f| f.id == id && !f.is_finished())
    }

    /// 查询精灵上进行中的渐变
    pub fn fade_on(&self, sprite: SpriteId) -> Option<EffectId> {
        self.fades
            .iter()
            .find(|f| f.sprite == sprite && !f.is_finished())
            .map(|f| f.id)
    }

    /// 进行中的渐变数量
    pub fn active_count(&self) -> usize {
        self.fades.iter().filter(|f| !f.is_finished()).count()
    }

    /// 获取渐变的当前进度（0.0 - 1.0）
    pub fn progress(&self, id: EffectId) -> Option<f32> {
        self.fades.iter().find(|f| f.id == id).map(|f| f.progress)
    }

    /// 清空所有渐变和待交付事件
    pub fn clear(&mut self) {
        self.fades.clear();
        self.events.clear();
    }
}

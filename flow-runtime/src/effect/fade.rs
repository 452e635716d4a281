//! # Fade 模块
//!
//! 单个颜色渐变实例定义。
//!
//! 核心设计：渐变只关注颜色值的时间轴变化，不假设目标如何被渲染。

use serde::{Deserialize, Serialize};

use super::Easing;
use crate::color::Color;
use crate::stage::SpriteId;

/// 效果唯一标识符
///
/// 由 `EffectDriver` 在效果启动时分配，进程内不重复。
/// 等待门（`WaitReason::ForEffect`）以此判断完成事件是否针对
/// 当前挂起的命令。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub(crate) u64);

impl EffectId {
    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EffectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EffectId({})", self.0)
    }
}

/// 渐变状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FadeState {
    /// 正在播放
    #[default]
    Playing,
    /// 已完成
    Completed,
    /// 被跳过（快进到终点）
    Skipped,
}

impl FadeState {
    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped)
    }
}

/// 单个颜色渐变实例
///
/// 管理一个精灵的颜色从 `from` 到 `to` 在 `duration` 秒内的变化。
/// 时长为零的渐变在创建时即为完成态。
#[derive(Debug, Clone)]
pub struct Fade {
    /// 效果 ID
    pub id: EffectId,
    /// 目标精灵
    pub sprite: SpriteId,
    /// 起始颜色
    pub from: Color,
    /// 目标颜色
    pub to: Color,
    /// 渐变时长（秒）
    pub duration: f32,
    /// 缓动函数
    pub easing: Easing,
    /// 当前状态
    pub state: FadeState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    pub progress: f32,
    /// 已经过的时间
    elapsed: f32,
}

impl Fade {
    /// 创建新的渐变（仅供 EffectDriver 使用）
    pub(crate) fn new(
        id: EffectId,
        sprite: SpriteId,
        from: Color,
        to: Color,
        duration: f32,
        easing: Easing,
    ) -> Self {
        // 时长非正时立即完成
        let (state, progress) = if duration <= 0.0 {
            (FadeState::Completed, 1.0)
        } else {
            (FadeState::Playing, 0.0)
        };

        Self {
            id,
            sprite,
            from,
            to,
            duration: duration.max(0.0),
            easing,
            state,
            progress,
            elapsed: 0.0,
        }
    }

    /// 推进渐变
    ///
    /// # 返回
    /// - `true`: 渐变仍在进行中
    /// - `false`: 渐变已结束
    pub fn update(&mut self, dt: f32) -> bool {
        if self.state.is_finished() {
            return false;
        }

        self.elapsed += dt;
        let raw_progress = self.elapsed / self.duration;
        if raw_progress >= 1.0 {
            self.progress = 1.0;
            self.state = FadeState::Completed;
            false
        } else {
            self.progress = self.easing.apply(raw_progress);
            true
        }
    }

    /// 跳过渐变（快进到终点）
    pub fn skip(&mut self) {
        if !self.state.is_finished() {
            self.progress = 1.0;
            self.state = FadeState::Skipped;
        }
    }

    /// 获取当前颜色
    ///
    /// 进度为 1.0 时恰好等于目标颜色（端点精确，见 [`Color::lerp`]）。
    pub fn current_color(&self) -> Color {
        self.from.lerp(self.to, self.progress)
    }

    /// 获取最终颜色
    pub fn final_color(&self) -> Color {
        self.to
    }

    /// 是否已结束
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_fade(duration: f32) -> Fade {
        Fade::new(
            EffectId(1),
            SpriteId(1),
            Color::BLACK,
            Color::WHITE,
            duration,
            Easing::Linear,
        )
    }

    #[test]
    fn test_fade_creation() {
        let fade = create_test_fade(1.0);
        assert_eq!(fade.state, FadeState::Playing);
        assert_eq!(fade.progress, 0.0);
        assert_eq!(fade.current_color(), Color::BLACK);
    }

    #[test]
    fn test_fade_update() {
        let mut fade = create_test_fade(1.0);

        // 进行中
        assert!(fade.update(0.5));
        assert!(fade.progress > 0.0);
        assert!(fade.progress < 1.0);

        let mid = fade.current_color();
        assert!(mid.r > 0.0 && mid.r < 1.0);

        // 完成
        assert!(!fade.update(0.6));
        assert_eq!(fade.state, FadeState::Completed);
        assert_eq!(fade.progress, 1.0);
        assert_eq!(fade.current_color(), Color::WHITE);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let fade = create_test_fade(0.0);
        assert_eq!(fade.state, FadeState::Completed);
        assert_eq!(fade.progress, 1.0);
        assert_eq!(fade.current_color(), Color::WHITE);
    }

    #[test]
    fn test_fade_skip() {
        let mut fade = create_test_fade(1.0);
        fade.update(0.2);

        fade.skip();
        assert_eq!(fade.state, FadeState::Skipped);
        assert_eq!(fade.current_color(), Color::WHITE);

        // 结束后推进无效果
        assert!(!fade.update(1.0));
        assert_eq!(fade.state, FadeState::Skipped);
    }

    #[test]
    fn test_finished_fade_stays_finished() {
        let mut fade = create_test_fade(0.5);
        assert!(!fade.update(1.0));
        assert_eq!(fade.state, FadeState::Completed);

        // 完成后再次 update 仍然返回 false，状态不变
        assert!(!fade.update(1.0));
        assert_eq!(fade.state, FadeState::Completed);
    }
}

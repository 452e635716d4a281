//! # Effect 模块
//!
//! 效果驱动器：定时视觉过渡（颜色渐变）及其完成交付。
//!
//! ## 核心概念
//!
//! - [`Fade`]: 单个渐变实例，管理颜色值的时间轴变化
//! - [`EffectDriver`]: 驱动器，持有所有进行中的渐变并写入 Stage
//! - [`EffectEvent`]: 完成通知，以事件队列交付，每个渐变恰好一次
//! - [`Easing`]: 缓动函数
//!
//! ## 使用示例
//!
//! ```ignore
//! let mut driver = EffectDriver::new();
//! let id = driver.fade(&mut stage, sprite, Color::TRANSPARENT, 2.0, Easing::Linear)?;
//!
//! // 每帧推进
//! for event in driver.update(dt, &mut stage) {
//!     if event.is_completion() && event.effect_id() == id {
//!         // 渐变结束，恢复序列
//!     }
//! }
//! ```

mod driver;
mod easing;
mod fade;

pub use driver::{EffectDriver, EffectEvent};
pub use easing::Easing;
pub use fade::{EffectId, Fade, FadeState};

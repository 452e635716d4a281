//! # Color 模块
//!
//! 精灵颜色的值类型定义。
//!
//! ## 设计说明
//!
//! - 颜色是 RGBA 四通道 f32 值，范围约定为 0.0 - 1.0
//! - 插值必须**端点精确**：进度到达 1.0 时结果恰好等于目标值，
//!   不允许残留浮点误差（淡入淡出结束后颜色必须与目标完全一致）

use serde::{Deserialize, Serialize};

/// RGBA 颜色
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// 红色通道
    pub r: f32,
    /// 绿色通道
    pub g: f32,
    /// 蓝色通道
    pub b: f32,
    /// 不透明度
    pub a: f32,
}

impl Color {
    /// 白色（不透明）
    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);

    /// 黑色（不透明）
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// 完全透明
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// 创建 RGBA 颜色
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// 创建不透明的 RGB 颜色
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::rgba(r, g, b, 1.0)
    }

    /// 替换不透明度
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// 线性插值
    ///
    /// # 参数
    /// - `target`: 目标颜色
    /// - `t`: 进度 (0.0 - 1.0)，超出范围会被限制
    ///
    /// # 返回
    /// `t >= 1.0` 时恰好返回 `target`（端点精确）
    pub fn lerp(self, target: Color, t: f32) -> Color {
        if t >= 1.0 {
            return target;
        }
        let t = t.max(0.0);
        Color {
            r: self.r + (target.r - self.r) * t,
            g: self.g + (target.g - self.g) * t,
            b: self.b + (target.b - self.b) * t,
            a: self.a + (target.a - self.a) * t,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

//! # Stage 模块
//!
//! 可渲染精灵句柄的注册表。
//!
//! ## 设计说明
//!
//! - Stage 是效果驱动器写入的**唯一对象集合**：宿主负责渲染，
//!   核心只持有逻辑状态（颜色、可见性）
//! - 精灵通过 `SpriteId` 引用；精灵可随时被销毁，句柄随之失效
//! - 别名（alias）用于脚本层引用，由命令在进入时解析为 `SpriteId`
//! - 所有状态可序列化

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::color::Color;

/// 精灵唯一标识符
///
/// 由 `Stage` 在精灵创建时分配，进程内不重复。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpriteId(pub(crate) u64);

impl SpriteId {
    /// 获取内部 ID 值
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SpriteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SpriteId({})", self.0)
    }
}

/// 精灵逻辑状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    /// 别名（脚本层引用名）
    pub name: String,
    /// 当前颜色
    pub color: Color,
    /// 是否可见
    pub visible: bool,
}

impl Sprite {
    /// 创建新精灵（默认白色、可见）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: Color::WHITE,
            visible: true,
        }
    }

    /// 创建指定颜色的精灵
    pub fn with_color(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            visible: true,
        }
    }
}

/// 精灵注册表
///
/// 持有所有存活的精灵及"别名 → ID"的绑定关系。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    /// 存活的精灵
    sprites: HashMap<SpriteId, Sprite>,
    /// 别名绑定
    aliases: HashMap<String, SpriteId>,
    /// 下一个精灵 ID
    next_id: u64,
}

impl Stage {
    /// 创建空的注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成下一个精灵 ID
    fn next_sprite_id(&mut self) -> SpriteId {
        self.next_id += 1;
        SpriteId(self.next_id)
    }

    /// 创建精灵并绑定别名
    ///
    /// 同名别名重复创建时，旧精灵被销毁并由新精灵取代
    /// （正在进行的效果会在下一次推进时按"目标已销毁"处理）。
    pub fn spawn(&mut self, sprite: Sprite) -> SpriteId {
        if let Some(old_id) = self.aliases.remove(&sprite.name) {
            self.sprites.remove(&old_id);
        }

        let id = self.next_sprite_id();
        self.aliases.insert(sprite.name.clone(), id);
        self.sprites.insert(id, sprite);
        id
    }

    /// 销毁精灵
    ///
    /// # 返回
    /// 被移除的精灵，不存在时返回 `None`
    pub fn despawn(&mut self, id: SpriteId) -> Option<Sprite> {
        let sprite = self.sprites.remove(&id)?;
        self.aliases.remove(&sprite.name);
        Some(sprite)
    }

    /// 检查精灵是否存活
    pub fn contains(&self, id: SpriteId) -> bool {
        self.sprites.contains_key(&id)
    }

    /// 按别名查找精灵 ID
    pub fn id_of(&self, name: &str) -> Option<SpriteId> {
        self.aliases.get(name).copied()
    }

    /// 获取精灵
    pub fn get(&self, id: SpriteId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// 获取精灵（可变）
    pub fn get_mut(&mut self, id: SpriteId) -> Option<&mut Sprite> {
        self.sprites.get_mut(&id)
    }

    /// 读取精灵当前颜色
    pub fn color_of(&self, id: SpriteId) -> Option<Color> {
        self.sprites.get(&id).map(|s| s.color)
    }

    /// 直接写入精灵颜色（不经过效果驱动器）
    ///
    /// # 返回
    /// 精灵存在且写入成功时返回 `true`
    pub fn set_color(&mut self, id: SpriteId, color: Color) -> bool {
        match self.sprites.get_mut(&id) {
            Some(sprite) => {
                sprite.color = color;
                true
            }
            None => false,
        }
    }

    /// 存活精灵数量
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// 遍历所有存活精灵
    pub fn iter(&self) -> impl Iterator<Item = (SpriteId, &Sprite)> {
        self.sprites.iter().map(|(id, sprite)| (*id, sprite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_lookup() {
        let mut stage = Stage::new();
        let id = stage.spawn(Sprite::new("hero"));

        assert!(stage.contains(id));
        assert_eq!(stage.id_of("hero"), Some(id));
        assert_eq!(stage.get(id).unwrap().color, Color::WHITE);
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn test_spawn_assigns_unique_ids() {
        let mut stage = Stage::new();
        let a = stage.spawn(Sprite::new("a"));
        let b = stage.spawn(Sprite::new("b"));

        assert_ne!(a, b);
        assert_eq!(stage.len(), 2);
    }

    #[test]
    fn test_spawn_same_name_replaces() {
        let mut stage = Stage::new();
        let old = stage.spawn(Sprite::with_color("hero", Color::BLACK));
        let new = stage.spawn(Sprite::new("hero"));

        // 旧句柄失效，新句柄接管别名
        assert!(!stage.contains(old));
        assert!(stage.contains(new));
        assert_eq!(stage.id_of("hero"), Some(new));
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn test_despawn_invalidates_handle() {
        let mut stage = Stage::new();
        let id = stage.spawn(Sprite::new("hero"));

        let removed = stage.despawn(id);
        assert!(removed.is_some());
        assert!(!stage.contains(id));
        assert_eq!(stage.id_of("hero"), None);

        // 重复销毁无效果
        assert!(stage.despawn(id).is_none());
    }

    #[test]
    fn test_set_color() {
        let mut stage = Stage::new();
        let id = stage.spawn(Sprite::new("hero"));

        assert!(stage.set_color(id, Color::BLACK));
        assert_eq!(stage.color_of(id), Some(Color::BLACK));

        stage.despawn(id);
        assert!(!stage.set_color(id, Color::WHITE));
    }

    #[test]
    fn test_stage_serialization() {
        let mut stage = Stage::new();
        stage.spawn(Sprite::with_color("hero", Color::rgba(0.1, 0.2, 0.3, 1.0)));

        let json = serde_json::to_string(&stage).unwrap();
        let deserialized: Stage = serde_json::from_str(&json).unwrap();

        let id = deserialized.id_of("hero").unwrap();
        assert_eq!(
            deserialized.color_of(id),
            Some(Color::rgba(0.1, 0.2, 0.3, 1.0))
        );
    }
}

//! # Input 模块
//!
//! 输入路由器：把原始输入设备状态归一化为前进信号。
//!
//! ## 设计说明
//!
//! - 核心不直接处理鼠标/键盘事件：宿主每 tick 提供一份
//!   [`InputFrame`] 快照（边沿触发，只含本 tick 新发生的事件）
//! - 路由器按 [`DialogInput`] 配置评估快照，每 tick 至多交付
//!   一个 [`FlowInput::Advance`]
//! - 两次信号之间有最小间隔（`next_click_delay`），间隔内的
//!   合格事件被丢弃

use serde::{Deserialize, Serialize};

/// 键码
///
/// 引擎无关的按键标识，由宿主定义具体映射。
pub type KeyCode = u32;

/// 指针按键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    /// 左键
    Left,
    /// 右键
    Right,
    /// 中键
    Middle,
}

/// 点击触发模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClickMode {
    /// 不响应点击
    Disabled,
    /// 任意按键点击均触发
    #[default]
    AnyClick,
    /// 仅指定按键触发
    SpecificButton(PointerButton),
}

/// 按键触发模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyPressMode {
    /// 不响应键盘
    #[default]
    Disabled,
    /// 任意按键触发
    AnyKeyPressed,
    /// 仅 `key_list` 中的按键触发
    SpecificKeys,
}

fn default_next_click_delay() -> f32 {
    0.0
}

/// 输入路由配置
///
/// 会话期间只读；由外部创作工具提供，可序列化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogInput {
    /// 点击触发模式
    #[serde(default)]
    pub click_mode: ClickMode,

    /// 按键触发模式
    #[serde(default)]
    pub key_press_mode: KeyPressMode,

    /// 按键触发是否要求按住 Shift
    #[serde(default)]
    pub shift_key_enabled: bool,

    /// 是否忽略落在菜单区域上的点击
    ///
    /// 为 true 时，菜单区域上的点击被**消费**：既不触发前进，
    /// 同一 tick 也不再评估键盘。
    #[serde(default)]
    pub ignore_menu_clicks: bool,

    /// 两次前进信号之间的最小间隔（秒）
    #[serde(default = "default_next_click_delay")]
    pub next_click_delay: f32,

    /// 触发按键列表（仅 `SpecificKeys` 模式下有效）
    ///
    /// `SpecificKeys` 模式下列表为空时退化为"键盘永不触发"，
    /// 不是错误。
    #[serde(default)]
    pub key_list: Vec<KeyCode>,
}

impl Default for DialogInput {
    fn default() -> Self {
        Self {
            click_mode: ClickMode::AnyClick,
            key_press_mode: KeyPressMode::Disabled,
            shift_key_enabled: false,
            ignore_menu_clicks: false,
            next_click_delay: 0.0,
            key_list: Vec::new(),
        }
    }
}

/// 指针点击事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerClick {
    /// 按下的按键
    pub button: PointerButton,
    /// 点击是否落在菜单/UI 区域上（由宿主命中测试判定）
    pub over_menu: bool,
}

/// 单 tick 输入快照
///
/// 所有字段都是**边沿触发**：只包含本 tick 新发生的事件，
/// 持续按住不会重复出现。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    /// 本 tick 的指针点击（至多一个）
    pub click: Option<PointerClick>,
    /// 本 tick 新按下的键
    pub keys_pressed: Vec<KeyCode>,
    /// Shift 修饰键是否按住
    pub shift_held: bool,
}

impl InputFrame {
    /// 无输入的空快照
    pub fn idle() -> Self {
        Self::default()
    }

    /// 普通区域的点击
    pub fn click(button: PointerButton) -> Self {
        Self {
            click: Some(PointerClick {
                button,
                over_menu: false,
            }),
            ..Self::default()
        }
    }

    /// 菜单区域上的点击
    pub fn menu_click(button: PointerButton) -> Self {
        Self {
            click: Some(PointerClick {
                button,
                over_menu: true,
            }),
            ..Self::default()
        }
    }

    /// 单个按键按下
    pub fn key(code: KeyCode) -> Self {
        Self {
            keys_pressed: vec![code],
            ..Self::default()
        }
    }

    /// 附加 Shift 修饰
    pub fn with_shift(mut self) -> Self {
        self.shift_held = true;
        self
    }
}

/// 宿主向序列器传递的语义化输入
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowInput {
    /// 前进信号（解除 `WaitReason::ForAdvance`）
    Advance,
}

/// 输入路由器
///
/// 持有配置和信号间隔计时器。
#[derive(Debug, Clone)]
pub struct DialogRouter {
    /// 路由配置
    config: DialogInput,
    /// 距离下一次可触发的剩余冷却（秒）
    cooldown: f32,
}

impl DialogRouter {
    /// 创建新的路由器
    pub fn new(config: DialogInput) -> Self {
        Self {
            config,
            cooldown: 0.0,
        }
    }

    /// 获取路由配置
    pub fn config(&self) -> &DialogInput {
        &self.config
    }

    /// 评估本 tick 的输入快照
    ///
    /// # 参数
    /// - `dt`: 距上一次评估经过的时间（秒）
    /// - `frame`: 本 tick 的输入快照
    ///
    /// # 返回
    /// 合格且不在冷却间隔内时返回一个前进信号
    pub fn poll(&mut self, dt: f32, frame: &InputFrame) -> Option<FlowInput> {
        self.cooldown = (self.cooldown - dt).max(0.0);

        // 指针评估
        if let Some(click) = &frame.click {
            if self.config.ignore_menu_clicks && click.over_menu {
                // 菜单点击被消费：本 tick 不再评估键盘
                return None;
            }

            let qualifies = match self.config.click_mode {
                ClickMode::Disabled => false,
                ClickMode::AnyClick => true,
                ClickMode::SpecificButton(button) => click.button == button,
            };
            if qualifies {
                return self.emit();
            }
        }

        // 键盘评估
        let key_qualifies = match self.config.key_press_mode {
            KeyPressMode::Disabled => false,
            KeyPressMode::AnyKeyPressed => !frame.keys_pressed.is_empty(),
            KeyPressMode::SpecificKeys => frame
                .keys_pressed
                .iter()
                .any(|key| self.config.key_list.contains(key)),
        };

        if key_qualifies && (!self.config.shift_key_enabled || frame.shift_held) {
            return self.emit();
        }

        None
    }

    /// 交付一个前进信号并重置冷却计时器
    fn emit(&mut self) -> Option<FlowInput> {
        if self.cooldown > 0.0 {
            return None;
        }
        self.cooldown = self.config.next_click_delay;
        Some(FlowInput::Advance)
    }
}

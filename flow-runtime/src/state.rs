//! # State 模块
//!
//! 序列器的运行时状态和等待模型。
//!
//! ## 设计原则
//!
//! - 所有状态必须**显式建模**，作为上下文对象传递，不允许全局单例
//! - 所有状态必须**可序列化**（支持存档/读档）
//! - 等待门是**单槽位**的：同一时刻至多一个命令持有它

use serde::{Deserialize, Serialize};

use crate::effect::EffectId;

/// 等待原因
///
/// 命令进入后可能挂起序列，需要特定的恢复路径才能继续。
///
/// # 状态转换
///
/// ```text
/// None       -> 继续执行，不等待
/// ForAdvance -> 等待输入路由器交付的前进信号
/// ForEffect  -> 等待指定效果的完成事件
/// ForTime    -> 等待剩余时长归零（由 tick 的 dt 递减）
/// ```
///
/// 门携带它所等待的**具体事物**（效果 ID / 剩余时长），
/// 过期的完成事件无法错误地恢复序列。
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum WaitReason {
    /// 不等待，继续执行
    #[default]
    None,

    /// 等待前进信号
    ForAdvance,

    /// 等待指定效果完成
    ForEffect(EffectId),

    /// 等待剩余时长（秒）归零
    ForTime(f32),
}

impl WaitReason {
    /// 是否处于等待状态
    ///
    /// 原始设计中的 `waiting` 布尔标志由此导出。
    pub fn is_waiting(&self) -> bool {
        !matches!(self, Self::None)
    }

    /// 创建等待前进信号状态
    pub fn advance() -> Self {
        Self::ForAdvance
    }

    /// 创建等待效果完成状态
    pub fn effect(id: EffectId) -> Self {
        Self::ForEffect(id)
    }

    /// 创建等待时间状态
    pub fn time(seconds: f32) -> Self {
        Self::ForTime(seconds)
    }
}

/// 序列执行位置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequencePosition {
    /// 序列标识符
    pub sequence_id: String,
    /// 当前执行的命令索引
    pub index: usize,
}

impl SequencePosition {
    /// 创建新的执行位置
    pub fn new(sequence_id: impl Into<String>, index: usize) -> Self {
        Self {
            sequence_id: sequence_id.into(),
            index,
        }
    }

    /// 创建默认位置（序列开头）
    pub fn start(sequence_id: impl Into<String>) -> Self {
        Self::new(sequence_id, 0)
    }

    /// 前进到下一个命令
    pub fn advance(&mut self) {
        self.index += 1;
    }

    /// 跳转到指定位置
    pub fn jump_to(&mut self, index: usize) {
        self.index = index;
    }
}

/// 序列器状态
///
/// 这是序列器的**唯一可变状态**，显式传递而非全局持有。
/// 所有字段都可序列化，支持存档/读档。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowState {
    /// 序列执行位置
    pub position: SequencePosition,

    /// 当前等待状态
    pub waiting: WaitReason,
}

impl FlowState {
    /// 创建新的序列器状态
    pub fn new(sequence_id: impl Into<String>) -> Self {
        Self {
            position: SequencePosition::start(sequence_id),
            waiting: WaitReason::None,
        }
    }

    /// 进入等待状态
    pub fn wait(&mut self, reason: WaitReason) {
        self.waiting = reason;
    }

    /// 清除等待状态
    pub fn clear_wait(&mut self) {
        self.waiting = WaitReason::None;
    }

    /// 是否处于等待状态
    pub fn is_waiting(&self) -> bool {
        self.waiting.is_waiting()
    }
}

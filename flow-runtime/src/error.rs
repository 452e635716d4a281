//! # Error 模块
//!
//! 定义 flow-runtime 中使用的错误类型。

use thiserror::Error;

use crate::stage::SpriteId;

/// 配置错误
///
/// 脚本创作阶段的错误，在序列校验或命令进入时尽早暴露。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 文档格式无效
    #[error("序列文档无效: {message}")]
    InvalidDocument { message: String },

    /// 时长为负
    #[error("第 {index} 个命令：时长不能为负（{value}）")]
    NegativeDuration { index: usize, value: f32 },

    /// 标签重复定义
    #[error("标签 '{label}' 重复定义")]
    DuplicateLabel { label: String },

    /// 跳转目标未定义
    #[error("第 {index} 个命令：跳转目标 '{label}' 未定义")]
    UnknownLabel { index: usize, label: String },
}

/// 运行时错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// 按别名找不到精灵
    #[error("精灵 '{name}' 不存在")]
    SpriteNotFound { name: String },

    /// 精灵句柄已失效
    #[error("精灵句柄已失效：{id}")]
    InvalidSprite { id: SpriteId },

    /// 标签未找到
    #[error("标签 '{label}' 未找到")]
    LabelNotFound { label: String },

    /// 在没有命令挂起时请求恢复
    ///
    /// 这是命令实现的编程错误（重复 Continue），检测后上报
    /// 而不是让序列位置悄悄错乱。
    #[error("没有命令挂起，恢复请求被拒绝：{context}")]
    UnexpectedResume { context: String },

    /// 序列执行结束
    #[error("序列已执行完毕")]
    SequenceEnded,
}

/// flow-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 运行时错误
    #[error("运行时错误: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Result 类型别名
pub type FlowResult<T> = Result<T, FlowError>;

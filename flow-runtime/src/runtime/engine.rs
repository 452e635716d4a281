//! # Engine 模块
//!
//! 序列器核心：命令执行与继续协议。
//!
//! ## 执行模型
//!
//! ```text
//! tick(dt, input) -> (Vec<FlowEvent>, WaitReason)
//! ```
//!
//! 1. 推进效果驱动器，交付完成事件；命中等待门的完成先清门
//! 2. 递减时间等待
//! 3. 根据 input 决定是否解除前进等待
//! 4. 若不再等待，依次进入命令直到某个命令挂起或序列结束
//!
//! ## 继续协议不变量
//!
//! 每个进入的命令经由**恰好一条**路径继续：同步立即
//! （`EnterOutcome::Advance`）或异步恢复（等待门被清除）。
//! 门是单槽位的，且记录它所等待的具体效果，过期的完成事件
//! 只会作为通知交付，不会恢复序列。

use crate::effect::{EffectDriver, EffectEvent};
use crate::error::{FlowResult, RuntimeError};
use crate::event::FlowEvent;
use crate::input::FlowInput;
use crate::sequence::Sequence;
use crate::stage::Stage;
use crate::state::{FlowState, WaitReason};

use super::executor::{EnterOutcome, Executor};

/// 序列器
///
/// 这是 flow-runtime 的核心类型，负责驱动命令序列执行。
///
/// # 使用示例
///
/// ```ignore
/// let sequence = Sequence::from_json(text)?;
/// let mut runtime = FlowRuntime::new(sequence);
/// runtime.stage_mut().spawn(Sprite::new("hero"));
///
/// loop {
///     let signal = router.poll(dt, &frame);
///     let (events, waiting) = runtime.tick(dt, signal)?;
///
///     // 宿主呈现 events、读取 stage 渲染……
///
///     if runtime.is_finished() {
///         break;
///     }
/// }
/// ```
pub struct FlowRuntime {
    /// 当前序列
    sequence: Sequence,
    /// 序列器状态
    state: FlowState,
    /// 命令执行器
    executor: Executor,
    /// 精灵注册表
    stage: Stage,
    /// 效果驱动器
    effects: EffectDriver,
}

impl FlowRuntime {
    /// 创建新的序列器实例
    ///
    /// # 参数
    ///
    /// - `sequence`: 已校验的命令序列（见 [`Sequence::validate`]）
    pub fn new(sequence: Sequence) -> Self {
        let state = FlowState::new(&sequence.id);
        Self {
            sequence,
            state,
            executor: Executor::new(),
            stage: Stage::new(),
            effects: EffectDriver::new(),
        }
    }

    /// 从保存的状态恢复序列器
    ///
    /// # 参数
    ///
    /// - `sequence`: 序列（必须与保存时相同）
    /// - `state`: 保存的序列器状态
    /// - `stage`: 保存的精灵注册表快照
    ///
    /// 进行中的效果不随存档保存；恢复后残留的效果等待门会在
    /// 第一次 tick 按立即完成降级。
    pub fn restore(sequence: Sequence, state: FlowState, stage: Stage) -> Self {
        Self {
            sequence,
            state,
            executor: Executor::new(),
            stage,
            effects: EffectDriver::new(),
        }
    }

    /// 核心驱动函数
    ///
    /// 按帧推进效果与序列执行。
    ///
    /// # 参数
    ///
    /// - `dt`: 距上一次 tick 经过的时间（秒）
    /// - `input`: 输入路由器本 tick 交付的信号（可选）
    ///
    /// # 返回
    ///
    /// - `Vec<FlowEvent>`: 本次 tick 产生的所有通知
    /// - `WaitReason`: 新的等待状态
    pub fn tick(
        &mut self,
        dt: f32,
        input: Option<FlowInput>,
    ) -> FlowResult<(Vec<FlowEvent>, WaitReason)> {
        let mut events = Vec::new();

        // 1. 推进效果驱动器，交付完成事件
        let effect_events = self.effects.update(dt, &mut self.stage);
        self.collect_effect_events(effect_events, &mut events);

        // 2. 递减时间等待
        if let WaitReason::ForTime(remaining) = &mut self.state.waiting {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.state.clear_wait();
            }
        }

        // 3. 等待的效果已不存在（存档恢复、目标被销毁后旧事件已
        //    交付等情况）时按立即完成降级，序列器不允许死锁
        if let WaitReason::ForEffect(id) = self.state.waiting {
            if !self.effects.is_active(id) {
                self.state.clear_wait();
            }
        }

        // 4. 处理输入，尝试解除等待
        if let Some(input) = input {
            self.handle_input(input);
        }

        // 5. 如果仍在等待，直接返回
        if self.state.is_waiting() {
            return Ok((events, self.state.waiting.clone()));
        }

        // 6. 依次进入命令直到挂起或序列结束
        loop {
            let command = match self.sequence.get(self.state.position.index) {
                Some(command) => command.clone(),
                None => {
                    // 序列执行完毕
                    return Ok((events, WaitReason::None));
                }
            };

            let result = self.executor.enter(
                &command,
                self.state.position.index,
                &mut self.stage,
                &mut self.effects,
                &self.sequence,
            )?;
            events.extend(result.events);

            // 取走进入期间入队的效果事件（零时长完成、取代完成）
            let pending = self.effects.drain_events();
            self.collect_effect_events(pending, &mut events);

            match result.outcome {
                EnterOutcome::Jump(target) => {
                    self.state.position.jump_to(target);
                }

                EnterOutcome::Advance => {
                    self.state.position.advance();
                }

                EnterOutcome::Wait(reason) => {
                    self.state.position.advance();

                    // 同一调度轮次内已完成的效果（零时长）不再挂起：
                    // 完成事件已在上面交付，继续是同步路径
                    let already_done = matches!(
                        &reason,
                        WaitReason::ForEffect(id) if !self.effects.is_active(*id)
                    );
                    if !already_done {
                        self.state.wait(reason.clone());
                        return Ok((events, reason));
                    }
                }
            }
        }
    }

    /// 把效果事件转换为通知，命中等待门的完成事件先清门
    fn collect_effect_events(&mut self, raw: Vec<EffectEvent>, events: &mut Vec<FlowEvent>) {
        for event in raw {
            match event {
                EffectEvent::Started { id, sprite } => {
                    events.push(FlowEvent::FadeStarted { effect: id, sprite });
                }
                EffectEvent::Completed { id, sprite } | EffectEvent::Skipped { id, sprite } => {
                    if matches!(self.state.waiting, WaitReason::ForEffect(waited) if waited == id) {
                        // 先清门，再继续：waiting 在 Continue 之前归位
                        self.state.clear_wait();
                    }
                    events.push(FlowEvent::FadeFinished { effect: id, sprite });
                }
            }
        }
    }

    /// 处理输入，解除等待状态
    ///
    /// 等待效果或计时期间收到的前进信号是正常的急躁输入，
    /// 忽略即可，不构成错误。
    fn handle_input(&mut self, input: FlowInput) {
        match (&self.state.waiting, input) {
            (WaitReason::ForAdvance, FlowInput::Advance) => {
                self.state.clear_wait();
            }
            _ => {}
        }
    }

    /// 强制解除当前等待（宿主的"跳过"操作）
    ///
    /// # 返回
    ///
    /// 没有命令挂起时返回 [`RuntimeError::UnexpectedResume`]：
    /// 这是重复 Continue 的检测点，上报而不是让序列位置错乱。
    pub fn force_continue(&mut self) -> FlowResult<()> {
        if !self.state.is_waiting() {
            return Err(RuntimeError::UnexpectedResume {
                context: "force_continue".to_string(),
            }
            .into());
        }
        self.state.clear_wait();
        Ok(())
    }

    /// 跳过所有进行中的效果（快进）
    ///
    /// 终值立即写入，完成事件由下一次 tick 交付。
    pub fn skip_effects(&mut self) {
        self.effects.skip_all(&mut self.stage);
    }

    /// 获取当前状态（用于存档）
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// 恢复状态（用于读档）
    ///
    /// 调用方需要确保 state 中的 sequence_id 与当前加载的序列匹配。
    /// 等待中的效果不会随存档恢复，对应的等待门会在下一次 tick
    /// 按立即完成降级。
    pub fn restore_state(&mut self, state: FlowState) {
        self.state = state;
    }

    /// 获取当前等待状态
    pub fn waiting(&self) -> &WaitReason {
        &self.state.waiting
    }

    /// 检查序列是否执行完毕
    pub fn is_finished(&self) -> bool {
        self.state.position.index >= self.sequence.len() && !self.state.is_waiting()
    }

    /// 获取当前序列
    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// 获取精灵注册表
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    /// 获取精灵注册表（可变，宿主创建/销毁精灵用）
    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    /// 获取效果驱动器
    pub fn effects(&self) -> &EffectDriver {
        &self.effects
    }
}

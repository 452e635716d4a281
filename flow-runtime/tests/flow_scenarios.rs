//! # 序列执行集成测试
//!
//! 测试 DialogRouter → FlowRuntime → EffectDriver 的完整执行链路。
//! 这些测试不依赖真实的渲染/输入设备，用固定 dt 模拟帧循环。

use flow_runtime::{
    Color, Command, DialogInput, DialogRouter, Easing, FlowEvent, FlowRuntime, InputFrame,
    PointerButton, SaveData, Sequence, Sprite, WaitReason,
};

const DT: f32 = 0.1;

fn fade_then_say() -> Sequence {
    Sequence::new(
        "scenario",
        vec![
            Command::FadeSprite {
                sprite: "hero".to_string(),
                target_color: Color::WHITE,
                duration: 2.0,
                easing: Easing::Linear,
                wait_until_finished: true,
            },
            Command::Say {
                speaker: None,
                content: "渐变结束".to_string(),
            },
        ],
    )
}

/// 场景：等待式渐变的完整时间线
///
/// 2 秒渐变 + wait_until_finished：
/// - t=0 时等待门已持有
/// - t=1.0 时颜色约为中点
/// - t=2.0（± 一个 tick）时门清除、序列继续
#[test]
fn test_waited_fade_timeline() {
    let mut runtime = FlowRuntime::new(fade_then_say());
    let hero = runtime
        .stage_mut()
        .spawn(Sprite::with_color("hero", Color::BLACK));

    // t=0：进入渐变，门立即持有
    let (_, waiting) = runtime.tick(0.0, None).unwrap();
    assert!(matches!(waiting, WaitReason::ForEffect(_)));

    // 推进到 t=1.0
    for _ in 0..10 {
        let (_, waiting) = runtime.tick(DT, None).unwrap();
        assert!(matches!(waiting, WaitReason::ForEffect(_)));
    }
    let mid = runtime.stage().color_of(hero).unwrap();
    assert!((mid.r - 0.5).abs() < 0.05, "t=1.0 时颜色应接近中点: {mid:?}");

    // 推进到 t=2.0（± 一个 tick），门清除、对话进入
    let mut resumed_at = None;
    for tick in 0..12 {
        let (events, waiting) = runtime.tick(DT, None).unwrap();
        if waiting == WaitReason::ForAdvance {
            assert!(events.iter().any(|e| matches!(e, FlowEvent::FadeFinished { .. })));
            assert!(events.iter().any(
                |e| matches!(e, FlowEvent::ShowText { content, .. } if content == "渐变结束")
            ));
            resumed_at = Some(tick);
            break;
        }
    }
    let resumed_at = resumed_at.expect("渐变结束后序列应恢复");
    assert!(resumed_at <= 10, "恢复晚于 t=2.0 + 一个 tick: {resumed_at}");

    // 渐变结束后颜色恰好等于目标
    assert_eq!(runtime.stage().color_of(hero), Some(Color::WHITE));
}

/// 场景：后台渐变与对话解耦
#[test]
fn test_background_fade_decoupled_from_dialogue() {
    let sequence = Sequence::new(
        "scenario",
        vec![
            Command::FadeSprite {
                sprite: "hero".to_string(),
                target_color: Color::TRANSPARENT,
                duration: 1.0,
                easing: Easing::Linear,
                wait_until_finished: false,
            },
            Command::Say {
                speaker: Some("爱丽丝".to_string()),
                content: "渐变还在进行".to_string(),
            },
        ],
    );
    let mut runtime = FlowRuntime::new(sequence);
    runtime
        .stage_mut()
        .spawn(Sprite::with_color("hero", Color::WHITE));

    // 对话与渐变开始出现在同一个 tick：序列流未被阻塞
    let (events, waiting) = runtime.tick(0.0, None).unwrap();
    assert_eq!(waiting, WaitReason::ForAdvance);
    assert!(events.iter().any(|e| matches!(e, FlowEvent::FadeStarted { .. })));
    assert!(events.iter().any(|e| matches!(e, FlowEvent::ShowText { .. })));

    // 等待对话期间渐变在后台完成，完成通知照常交付
    let mut finished = false;
    for _ in 0..15 {
        let (events, waiting) = runtime.tick(DT, None).unwrap();
        assert_eq!(waiting, WaitReason::ForAdvance);
        finished |= events.iter().any(|e| matches!(e, FlowEvent::FadeFinished { .. }));
    }
    assert!(finished, "后台渐变应在等待对话期间完成");
}

/// 场景：路由器限速下的对话推进
///
/// next_click_delay = 0.5s：间隔 0.3s 的两次点击只推进一句，
/// 间隔 0.6s 的两次点击推进两句。
#[test]
fn test_dialogue_advance_respects_click_delay() {
    let say = |content: &str| Command::Say {
        speaker: None,
        content: content.to_string(),
    };
    let sequence = Sequence::new("scenario", vec![say("一"), say("二"), say("三")]);
    let mut runtime = FlowRuntime::new(sequence);
    let mut router = DialogRouter::new(DialogInput {
        next_click_delay: 0.5,
        ..DialogInput::default()
    });

    let mut shown: Vec<String> = Vec::new();
    let show = |events: &[FlowEvent], shown: &mut Vec<String>| {
        for event in events {
            if let FlowEvent::ShowText { content, .. } = event {
                shown.push(content.clone());
            }
        }
    };

    // 进入第一句
    let signal = router.poll(0.0, &InputFrame::idle());
    let (events, _) = runtime.tick(0.0, signal).unwrap();
    show(&events, &mut shown);

    // 第一次点击：推进到第二句
    let signal = router.poll(DT, &InputFrame::click(PointerButton::Left));
    let (events, _) = runtime.tick(DT, signal).unwrap();
    show(&events, &mut shown);

    // 0.3 秒后的点击被限速丢弃
    let signal = router.poll(0.3, &InputFrame::click(PointerButton::Left));
    assert!(signal.is_none());
    let (events, _) = runtime.tick(0.3, signal).unwrap();
    show(&events, &mut shown);

    // 再过 0.3 秒（累计 0.6 秒）推进到第三句
    let signal = router.poll(0.3, &InputFrame::click(PointerButton::Left));
    let (events, _) = runtime.tick(0.3, signal).unwrap();
    show(&events, &mut shown);

    assert_eq!(shown, vec!["一", "二", "三"]);
}

/// 场景：菜单点击不推进对话
#[test]
fn test_menu_click_does_not_advance() {
    let sequence = Sequence::new(
        "scenario",
        vec![Command::Say {
            speaker: None,
            content: "等待中".to_string(),
        }],
    );
    let mut runtime = FlowRuntime::new(sequence);
    let mut router = DialogRouter::new(DialogInput {
        ignore_menu_clicks: true,
        ..DialogInput::default()
    });

    runtime.tick(0.0, None).unwrap();

    let signal = router.poll(DT, &InputFrame::menu_click(PointerButton::Left));
    assert!(signal.is_none());
    let (_, waiting) = runtime.tick(DT, signal).unwrap();
    assert_eq!(waiting, WaitReason::ForAdvance);
}

/// 场景：存档 / 读档往返
#[test]
fn test_save_and_restore_mid_flow() {
    let say = |content: &str| Command::Say {
        speaker: None,
        content: content.to_string(),
    };
    let sequence = Sequence::new("scenario", vec![say("一"), say("二")]);

    let mut runtime = FlowRuntime::new(sequence.clone());
    runtime.stage_mut().spawn(Sprite::new("hero"));
    runtime.tick(0.0, None).unwrap();

    // 在第一句挂起时存档
    let save = SaveData::new(runtime.state().clone(), runtime.stage().clone());
    let json = save.to_json().unwrap();

    // 读档到新的运行时实例
    let loaded = SaveData::from_json(&json).unwrap();
    let mut restored = FlowRuntime::restore(sequence, loaded.state, loaded.stage);

    assert!(restored.state().is_waiting());
    assert!(restored.stage().id_of("hero").is_some());

    // 恢复后照常推进
    let (events, _) = restored
        .tick(DT, Some(flow_runtime::FlowInput::Advance))
        .unwrap();
    assert!(events.iter().any(
        |e| matches!(e, FlowEvent::ShowText { content, .. } if content == "二")
    ));
}

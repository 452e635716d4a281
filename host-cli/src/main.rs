//! Flow Runtime - 终端宿主
//!
//! 无渲染引擎的命令行播放器：加载 JSON 播放文档，按固定帧率
//! 驱动 flow-runtime 执行，stdin 回车映射为指针点击。

use std::fs;
use std::io::BufRead;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::{debug, info, warn};

use flow_runtime::{
    Color, DialogInput, DialogRouter, FlowEvent, FlowRuntime, InputFrame, PointerButton, Sequence,
    Sprite, WaitReason,
};

#[derive(Parser, Debug)]
#[command(name = "host-cli", about = "flow-runtime 终端播放器")]
struct Args {
    /// 播放文档路径（JSON）
    document: std::path::PathBuf,

    /// 帧率
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// 自动推进对话（无需回车，用于冒烟测试）
    #[arg(long)]
    auto: bool,
}

/// 播放文档：精灵定义 + 输入配置 + 命令序列
#[derive(Debug, Deserialize)]
struct PlayDocument {
    /// 开场时创建的精灵
    #[serde(default)]
    sprites: Vec<SpriteDef>,

    /// 输入路由配置
    #[serde(default)]
    input: DialogInput,

    /// 命令序列
    sequence: Sequence,
}

/// 精灵定义
#[derive(Debug, Deserialize)]
struct SpriteDef {
    name: String,
    #[serde(default)]
    color: Color,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.document)
        .with_context(|| format!("无法读取播放文档 {}", args.document.display()))?;
    let doc: PlayDocument = serde_json::from_str(&text).context("播放文档格式无效")?;
    doc.sequence.validate().context("序列校验失败")?;

    info!(
        "已加载序列 '{}'：{} 个命令，{} 个精灵",
        doc.sequence.id,
        doc.sequence.len(),
        doc.sprites.len()
    );

    let mut runtime = FlowRuntime::new(doc.sequence);
    for def in doc.sprites {
        runtime
            .stage_mut()
            .spawn(Sprite::with_color(def.name, def.color));
    }
    let mut router = DialogRouter::new(doc.input);

    let clicks = spawn_stdin_reader();

    let dt = 1.0 / args.fps as f32;
    let frame_budget = Duration::from_secs_f32(dt);

    loop {
        let frame_start = Instant::now();

        // 采集本帧输入
        let mut frame = InputFrame::idle();
        let wants_click = if args.auto {
            matches!(runtime.waiting(), WaitReason::ForAdvance)
        } else {
            clicks.try_recv().is_ok()
        };
        if wants_click {
            frame = InputFrame::click(PointerButton::Left);
        }

        let signal = router.poll(dt, &frame);
        match runtime.tick(dt, signal) {
            Ok((events, _)) => present(&events, args.auto),
            Err(e) => warn!("运行时错误: {e}"),
        }

        if runtime.is_finished() {
            info!("序列播放完毕");
            break;
        }

        if let Some(remaining) = frame_budget.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }

    Ok(())
}

/// stdin 读取线程：每行映射为一次点击
fn spawn_stdin_reader() -> mpsc::Receiver<()> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            if line.is_err() || tx.send(()).is_err() {
                break;
            }
        }
    });
    rx
}

/// 呈现本帧通知
fn present(events: &[FlowEvent], auto: bool) {
    for event in events {
        match event {
            FlowEvent::ShowText { speaker, content } => {
                match speaker {
                    Some(name) => println!("{name}: {content}"),
                    None => println!("{content}"),
                }
                if !auto {
                    println!("  （回车继续）");
                }
            }
            FlowEvent::FadeStarted { effect, sprite } => {
                debug!("渐变开始 {effect} @ {sprite}");
            }
            FlowEvent::FadeFinished { effect, sprite } => {
                debug!("渐变结束 {effect} @ {sprite}");
            }
            FlowEvent::SpriteColorSet { sprite, .. } => {
                debug!("颜色写入 @ {sprite}");
            }
        }
    }
}

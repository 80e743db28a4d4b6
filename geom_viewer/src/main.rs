//! Standalone viewer binary.
//!
//! Usage:
//!   cargo run -p geom_viewer -- [--config viewer.json] [--tick-hz 60] [--frames 600] [--dump frame.json]
//!
//! Runs the closest-point scene headless: every tick the overlay parameters
//! are read, the closest point is recomputed, and the scene is drawn into a
//! recording backend. `--dump` writes the last frame's draw calls as JSON.
//!
//! Console commands:
//!   point <x> <y> <z>             - Move the query point
//!   radius <r>                    - Query point marker radius
//!   closest_radius <r>            - Closest point marker radius
//!   camera_translate <x> <y> <z>  - Move the camera
//!   camera_rotate <x> <y> <z>     - Rotate the camera (radians)
//!   status                        - Show the last frame's results
//!   quit                          - Press escape (exits on the next frame)

use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use geom_shared::{config::ViewerConfig, render::RecordingRenderer};
use geom_viewer::{
    app::{ClosestPointApp, FrameReport},
    input::{KeyboardState, Keys},
    overlay::{Overlay, OverlayParams},
};
use tokio::sync::mpsc;
use tracing::info;

struct Args {
    config: Option<PathBuf>,
    tick_hz: Option<u32>,
    frames: Option<u64>,
    dump: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> anyhow::Result<Args> {
    let mut out = Args {
        config: None,
        tick_hz: None,
        frames: None,
        dump: None,
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--tick-hz" if i + 1 < args.len() => {
                out.tick_hz = args[i + 1].parse().ok();
                i += 2;
            }
            "--frames" if i + 1 < args.len() => {
                let frames: u64 = args[i + 1]
                    .parse()
                    .with_context(|| format!("invalid --frames value: {}", args[i + 1]))?;
                if frames == 0 {
                    bail!("--frames must be at least 1");
                }
                out.frames = Some(frames);
                i += 2;
            }
            "--dump" if i + 1 < args.len() => {
                out.dump = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            _ => i += 1,
        }
    }
    Ok(out)
}

fn status_lines(report: Option<&FrameReport>) -> Vec<String> {
    match report {
        Some(r) => vec![
            format!("Frame: {}", r.frame),
            format!("Project: {:.3} {:.3} {:.3}", r.project.x, r.project.y, r.project.z),
            format!(
                "Closest: {:.3} {:.3} {:.3} (t = {:.3}{})",
                r.closest.position.x,
                r.closest.position.y,
                r.closest.position.z,
                r.closest.t,
                if r.closest.degenerate { ", degenerate segment" } else { "" }
            ),
            format!("Lines: {}", r.lines),
        ],
        None => vec!["No frame drawn yet".to_string()],
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args(&env::args().collect::<Vec<_>>())?;
    let mut cfg = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(hz) = args.tick_hz {
        cfg.tick_hz = hz;
    }
    info!(tick_hz = cfg.tick_hz, frames = ?args.frames, "Starting viewer");

    let mut app = ClosestPointApp::new(&cfg);
    let mut overlay = Overlay::new(&OverlayParams::from_config(&cfg));
    let mut backend = RecordingRenderer::new();
    let mut keyboard = KeyboardState::default();

    // Set up console input channel.
    let (console_tx, mut console_rx) = mpsc::channel::<String>(32);

    // Spawn stdin reader thread.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        loop {
            print!("] ");
            let _ = stdout.flush();
            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if !line.is_empty() && console_tx.blocking_send(line).is_err() {
                break;
            }
        }
    });

    println!("Viewer running. Type 'status' for results, 'quit' to exit.");
    println!();

    let tick_interval = Duration::from_secs_f32(1.0 / cfg.tick_hz.max(1) as f32);
    let mut next_tick = tokio::time::Instant::now();
    let mut last_report: Option<FrameReport> = None;

    loop {
        // Console input stands in for this frame's keyboard and slider state.
        let mut keys = Keys::empty();
        while let Ok(line) = console_rx.try_recv() {
            match line.as_str() {
                "quit" | "exit" => keys |= Keys::ESCAPE,
                "status" => {
                    for line in status_lines(last_report.as_ref()) {
                        println!("{}", line);
                    }
                }
                _ => match overlay.exec(&line) {
                    Ok(output) => {
                        for line in output {
                            println!("{}", line);
                        }
                    }
                    Err(e) => println!("Error: {:#}", e),
                },
            }
        }
        keyboard.advance(keys);

        let params = overlay.params()?;
        let report = app.frame(&params, &mut backend)?;
        overlay.publish(&report)?;
        last_report = Some(report);

        if keyboard.triggered(Keys::ESCAPE) {
            info!("Escape pressed");
            break;
        }
        if args.frames.is_some_and(|n| report.frame + 1 >= n) {
            break;
        }

        next_tick += tick_interval;
        tokio::time::sleep_until(next_tick).await;
    }

    if let Some(report) = &last_report {
        info!(
            frames = report.frame + 1,
            closest = ?report.closest.position,
            t = report.closest.t,
            "Viewer finished"
        );
    }

    if let (Some(path), Some(frame)) = (&args.dump, backend.last_frame()) {
        let json = serde_json::to_string_pretty(frame).context("serialize frame")?;
        std::fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), lines = frame.lines.len(), "Frame dumped");
    }

    Ok(())
}

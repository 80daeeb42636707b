//! Workspace build tasks. Run via `cargo xtask <task>`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

const WASM_TARGET: &str = "wasm32-unknown-unknown";
const CRATE_NAME: &str = "fireworks";

#[derive(Parser)]
#[command(name = "xtask", about = "Build tasks for the fireworks workspace")]
struct Cli {
    #[command(subcommand)]
    task: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build the browser bundle into `dist/`.
    Web {
        /// Build with the release profile.
        #[arg(long)]
        release: bool,
        /// Output directory, relative to the workspace root.
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    match Cli::parse().task {
        Task::Web { release, out_dir } => web(release, &out_dir),
    }
}

fn workspace_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask has no parent directory")
}

fn run(command: &mut Command) -> Result<()> {
    let status = command
        .status()
        .with_context(|| format!("failed to spawn {command:?}"))?;
    if !status.success() {
        bail!("{command:?} exited with {status}");
    }
    Ok(())
}

fn web(release: bool, out_dir: &Path) -> Result<()> {
    let root = workspace_root()?;
    let profile = if release { "release" } else { "debug" };

    let mut build = Command::new(env!("CARGO"));
    let _ = build.current_dir(&root).args([
        "rustc",
        "--lib",
        "--crate-type=cdylib",
        "--target",
        WASM_TARGET,
        "--no-default-features",
        "--features",
        "web",
    ]);
    if release {
        let _ = build.arg("--release");
    }
    run(&mut build)?;

    let wasm = root
        .join("target")
        .join(WASM_TARGET)
        .join(profile)
        .join(format!("{CRATE_NAME}.wasm"));
    let out = root.join(out_dir);
    fs::create_dir_all(&out)
        .with_context(|| format!("creating {}", out.display()))?;

    run(Command::new("wasm-bindgen")
        .arg("--target")
        .arg("web")
        .arg("--no-typescript")
        .arg("--out-name")
        .arg(CRATE_NAME)
        .arg("--out-dir")
        .arg(&out)
        .arg(&wasm))
    .context("is wasm-bindgen-cli installed? (cargo install wasm-bindgen-cli)")?;

    let index = out.join("index.html");
    fs::write(&index, INDEX_HTML)
        .with_context(|| format!("writing {}", index.display()))?;
    println!("web bundle written to {}", out.display());
    Ok(())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Happy New Year</title>
  <style>
    html, body { margin: 0; height: 100%; overflow: hidden; background: #000; }
    #fireworks { position: fixed; inset: 0; display: block; }
    .overlay {
      position: fixed; inset: 0; display: flex; flex-direction: column;
      align-items: center; justify-content: center; pointer-events: none;
      color: #fff; font-family: system-ui, sans-serif;
    }
    h1 { font-size: 3rem; margin: 0; }
    .year { font-size: 5rem; font-weight: 700; margin-bottom: 1.5rem; }
    .grid { display: flex; gap: 1rem; }
    .box {
      display: flex; flex-direction: column; align-items: center;
      min-width: 5rem; padding: 0.75rem; border-radius: 0.75rem;
      background: rgba(255, 255, 255, 0.08);
    }
    .value { font-size: 2.5rem; font-variant-numeric: tabular-nums; }
    .label { font-size: 0.8rem; text-transform: uppercase; opacity: 0.7; }
    #countdown[data-finished] .grid { display: none; }
  </style>
</head>
<body>
  <canvas id="fireworks"></canvas>
  <div class="overlay" id="countdown">
    <h1>Happy New Year</h1>
    <div class="year" data-countdown="year"></div>
    <div class="grid">
      <div class="box"><span class="value" data-countdown="days">00</span><span class="label">Days</span></div>
      <div class="box"><span class="value" data-countdown="hours">00</span><span class="label">Hours</span></div>
      <div class="box"><span class="value" data-countdown="minutes">00</span><span class="label">Minutes</span></div>
      <div class="box"><span class="value" data-countdown="seconds">00</span><span class="label">Seconds</span></div>
    </div>
  </div>
  <script type="module">
    import init, { start } from "./fireworks.js";
    await init();
    window.fireworks = start("fireworks", "countdown");
  </script>
</body>
</html>
"#;

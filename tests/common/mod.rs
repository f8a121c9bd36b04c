//! Shared fixtures for the harness integration tests.

#![allow(dead_code)]

use kata_harness::{CapturedConsole, RenderMode, Runner, RunnerConfig};

/// A seeded runner writing to a captured console in the given mode.
pub fn captured_runner(mode: RenderMode) -> (Runner, CapturedConsole) {
    let console = CapturedConsole::new();
    let config = RunnerConfig::default()
        .with_render_mode(mode)
        .with_colors(false)
        .with_seed(7);
    let runner = Runner::with_console(config, Box::new(console.clone()));
    (runner, console)
}

pub fn text_runner() -> (Runner, CapturedConsole) {
    captured_runner(RenderMode::Text)
}

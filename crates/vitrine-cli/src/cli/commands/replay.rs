//! `vitrine replay`: drives a script through the simulated stage and prints
//! one JSON line per step.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;
use vitrine_core::config::Config;
use vitrine_stage::sim::Script;
use vitrine_stage::{Notice, Simulation, StageSnapshot};

#[derive(Serialize)]
struct ReplayLine<'a> {
    step: usize,
    notices: &'a [Notice],
    snapshot: &'a StageSnapshot,
}

pub fn run(path: &Path, config: Config, all: bool) -> Result<()> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read replay script {}", path.display()))?;
    let script = Script::from_json(&contents).with_context(|| format!("load {}", path.display()))?;

    let mut sim = Simulation::from_script(config, &script);
    let mut out = io::stdout().lock();
    let mut last = None;

    // Step 0 is the state after boot and the initial mounts.
    emit(&mut out, 0, &mut sim, &mut last, true)?;
    for (i, step) in script.steps.iter().enumerate() {
        sim.run_step(step);
        emit(&mut out, i + 1, &mut sim, &mut last, all)?;
    }

    info!(steps = script.steps.len(), now_ms = sim.now_ms(), "replay finished");
    Ok(())
}

fn emit(
    out: &mut impl Write,
    step: usize,
    sim: &mut Simulation,
    last: &mut Option<StageSnapshot>,
    always: bool,
) -> Result<()> {
    let notices = sim.take_notices();
    let snapshot = sim.snapshot();
    if !always && notices.is_empty() && last.as_ref() == Some(&snapshot) {
        return Ok(());
    }

    let line = serde_json::to_string(&ReplayLine {
        step,
        notices: &notices,
        snapshot: &snapshot,
    })
    .context("serialize replay step")?;
    writeln!(out, "{line}").context("write replay output")?;
    *last = Some(snapshot);
    Ok(())
}

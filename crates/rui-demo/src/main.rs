//! RUI demo runner: replays pointer scenarios against the headless element
//! tree and prints the geometry each component publishes.
//!
//! ```text
//! rui-demo                     # every built-in scenario
//! rui-demo grid-drag sheet     # selected built-ins
//! rui-demo ./my-scenario.json  # a scenario file
//! rui-demo --json sidebar      # machine-readable report
//! rui-demo --list
//! ```
//!
//! `RUST_LOG=debug` traces every gesture.

mod builtin;
mod runner;
mod scenario;

use anyhow::{Context, Result};
use runner::Report;
use scenario::Scenario;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "--list") {
        for name in builtin::names() {
            println!("{name}");
        }
        return Ok(());
    }
    let json = args.iter().any(|a| a == "--json");
    let targets: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    let scenarios = if targets.is_empty() {
        builtin::all()?
    } else {
        targets.iter().map(|t| load(t)).collect::<Result<Vec<_>>>()?
    };

    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in &scenarios {
        log::info!("running `{}`", scenario.name);
        let report = runner::run(scenario)?;
        if !json {
            print_report(scenario, &report);
        }
        reports.push(report);
    }
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(())
}

/// A built-in name, or a path to a scenario JSON file.
fn load(target: &str) -> Result<Scenario> {
    if let Some(scenario) = builtin::get(target) {
        return scenario;
    }
    let path = Path::new(target);
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("`{target}` is neither a built-in scenario nor a readable file"))?;
    serde_json::from_str(&source).with_context(|| format!("parsing {}", path.display()))
}

fn print_report(scenario: &Scenario, report: &Report) {
    println!("── {} ──", report.name);
    if !scenario.description.is_empty() {
        println!("   {}", scenario.description);
    }
    match report.initial {
        Some(g) => println!("   start: {g}"),
        None => println!("   start: (unmeasured)"),
    }
    for frame in &report.frames {
        match frame.geometry {
            Some(g) => println!("   #{:<2} {:<28} → {g}", frame.step, frame.event),
            None => println!("   #{:<2} {}", frame.step, frame.event),
        }
    }
    let [x0, y0, x1, y1] = report.element_rect;
    println!("   element: ({x0}, {y0})–({x1}, {y1})");
    println!();
}

use serde_json::{json, Value};

use super::script::Run;
use crate::config::Config;

/// Human-readable rendering of an `exec` run.
pub fn exec_text(run: &Run) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "── {} queue, capacity {} ──────────────────────\n",
        run.backend, run.capacity
    ));
    for (i, step) in run.steps.iter().enumerate() {
        let result = match (&step.value, &step.error) {
            (_, Some(e))    => format!("error: {}", e),
            (Some(v), None) => v.clone(),
            (None, None)    => "ok".to_string(),
        };
        out.push_str(&format!(
            "  {:>3}  {:<20} {:<24} [{}/{}]\n",
            i + 1, step.op, result, step.fill_count, run.capacity
        ));
    }
    out.push_str(&format!("  contents: [{}]\n", run.contents.join(", ")));
    if run.failures() > 0 {
        out.push_str(&format!("  {} op(s) failed\n", run.failures()));
    }
    out
}

pub fn exec_json(run: &Run) -> Value {
    json!({
        "backend":  run.backend,
        "capacity": run.capacity,
        "steps":    run.steps,
        "contents": run.contents,
        "failures": run.failures(),
    })
}

pub fn pluck_json(frequency: f64, period: usize, samples: &[f64]) -> Value {
    json!({
        "frequency": frequency,
        "period":    period,
        "count":     samples.len(),
        "samples":   samples,
    })
}

pub fn config_text(cfg: &Config, path: &str) -> String {
    let seed = cfg.synth.seed.map(|s| s.to_string()).unwrap_or_else(|| "(random)".to_string());
    let mut out = String::new();
    out.push_str(&format!("Config: {}\n\n", path));
    out.push_str("[general]\n");
    out.push_str(&format!("  default_capacity = {}\n", cfg.general.default_capacity));
    out.push_str(&format!("  backend          = {}\n", cfg.general.backend.label()));
    out.push_str(&format!("  json             = {}\n\n", cfg.general.json));
    out.push_str("[synth]\n");
    out.push_str(&format!("  sample_rate = {} Hz\n", cfg.synth.sample_rate));
    out.push_str(&format!("  decay       = {}\n", cfg.synth.decay));
    out.push_str(&format!("  seed        = {}\n", seed));
    out
}

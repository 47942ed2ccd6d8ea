use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::queue::BoundedQueue;

/// One queue operation from an `exec` script.
///
/// Accepted spellings: `enqueue:<v>` / `+<v>`, `dequeue` / `-`, `peek` / `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    Enqueue(String),
    Dequeue,
    Peek,
}

impl FromStr for Op {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(v) = s.strip_prefix("enqueue:").or_else(|| s.strip_prefix('+')) {
            return Ok(Op::Enqueue(v.to_string()));
        }
        match s {
            "dequeue" | "-" => Ok(Op::Dequeue),
            "peek"    | "?" => Ok(Op::Peek),
            _ => bail!("unknown op '{}' (expected enqueue:<v>, +<v>, dequeue, -, peek or ?)", s),
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Enqueue(v) => write!(f, "enqueue:{}", v),
            Op::Dequeue    => write!(f, "dequeue"),
            Op::Peek       => write!(f, "peek"),
        }
    }
}

/// Outcome of a single op.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Step {
    pub op:         String,
    pub ok:         bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value:      Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error:      Option<String>,
    pub fill_count: usize,
}

/// Full result of running a script against one queue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub backend:  String,
    pub capacity: usize,
    pub steps:    Vec<Step>,
    /// Final contents, front first
    pub contents: Vec<String>,
}

impl Run {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|s| !s.ok).count()
    }
}

pub fn parse_ops<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Op>> {
    raw.iter().map(|s| s.as_ref().parse()).collect()
}

/// Applies `ops` in order. Failed ops are recorded and the run continues;
/// a failed op never changes the queue.
pub fn run<Q: BoundedQueue<String>>(queue: &mut Q, backend: &str, ops: &[Op]) -> Run {
    let mut steps = Vec::with_capacity(ops.len());
    for op in ops {
        let result = match op {
            Op::Enqueue(v) => queue.enqueue(v.clone()).map(|()| None),
            Op::Dequeue    => queue.dequeue().map(Some),
            Op::Peek       => queue.peek().map(|v| Some(v.clone())),
        };
        let step = match result {
            Ok(value) => Step { op: op.to_string(), ok: true, value, error: None, fill_count: queue.fill_count() },
            Err(e)    => {
                tracing::debug!(op = %op, "op failed: {}", e);
                Step { op: op.to_string(), ok: false, value: None, error: Some(e.to_string()), fill_count: queue.fill_count() }
            }
        };
        steps.push(step);
    }
    Run {
        backend:  backend.to_string(),
        capacity: queue.capacity(),
        steps,
        contents: queue.iter().cloned().collect(),
    }
}

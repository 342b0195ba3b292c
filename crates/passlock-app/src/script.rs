//! Parser for scripted lifecycle sessions: `event@seconds[,event@seconds...]`.

use anyhow::{anyhow, bail, Result};
use passlock_core::{LifecycleEvent, Timestamp};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub event: LifecycleEvent,
    pub at: Timestamp,
}

pub fn parse(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut last: Option<Timestamp> = None;

    for raw in script.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let (name, time) = raw
            .split_once('@')
            .ok_or_else(|| anyhow!("step {raw:?} is missing '@<seconds>'"))?;
        let event = LifecycleEvent::from_name(name.trim()).ok_or_else(|| {
            anyhow!("unknown event {name:?} (expected launch, background, active, accept)")
        })?;
        let secs: f64 = time
            .trim()
            .parse()
            .map_err(|e| anyhow!("bad time in step {raw:?}: {e}"))?;
        if !secs.is_finite() {
            bail!("bad time in step {raw:?}: must be finite");
        }
        let at = Timestamp(secs);
        if let Some(prev) = last {
            if at < prev {
                tracing::warn!("Step {raw:?} goes back in time from {prev}");
            }
        }
        last = Some(at);
        steps.push(Step { event, at });
    }

    if steps.is_empty() {
        bail!("script has no steps");
    }
    Ok(steps)
}

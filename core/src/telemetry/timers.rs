//! telemetry/timers.rs
//! Phase and stage timers.
//!
//! A phase (write or read) is one contiguous wall-clock span. Stages are the
//! pieces inside it (protect vs insert, select vs reveal) accumulated
//! separately so CPU-bound encoding can be told apart from store I/O.

use std::collections::{hash_map, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    KeySetup,
    Protect,
    Insert,
    Commit,
    Select,
    Reveal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::KeySetup => "key_setup",
            Stage::Protect  => "protect",
            Stage::Insert   => "insert",
            Stage::Commit   => "commit",
            Stage::Select   => "select",
            Stage::Reveal   => "reveal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageTimes {
    times: HashMap<Stage, Duration>,
}

impl StageTimes {
    /// Add duration to a stage (accumulates if already present).
    pub fn add(&mut self, stage: Stage, dur: Duration) {
        *self.times.entry(stage).or_insert(Duration::ZERO) += dur;
    }

    /// Get total duration for a stage.
    pub fn get(&self, stage: Stage) -> Duration {
        self.times.get(&stage).copied().unwrap_or(Duration::ZERO)
    }

    /// Sum of the given stages.
    pub fn sum_of(&self, stages: &[Stage]) -> Duration {
        stages.iter().map(|s| self.get(*s)).sum()
    }

    pub fn total(&self) -> Duration {
        self.times.values().copied().sum()
    }

    /// Fold another set of stage times into this one.
    pub fn merge(&mut self, other: &StageTimes) {
        for (stage, dur) in other {
            self.add(*stage, *dur);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Stage, &Duration)> {
        self.times.iter()
    }
}

impl<'a> IntoIterator for &'a StageTimes {
    type Item = (&'a Stage, &'a Duration);
    type IntoIter = hash_map::Iter<'a, Stage, Duration>;

    fn into_iter(self) -> Self::IntoIter {
        self.times.iter()
    }
}

/// Wall-clock span for one phase plus the stage breakdown inside it.
#[derive(Clone, Debug)]
pub struct PhaseTimer {
    start_time: Instant,
    end_time: Option<Instant>,
    pub stage_times: StageTimes,
}

impl PhaseTimer {
    pub fn start() -> Self {
        Self {
            start_time: Instant::now(),
            end_time: None,
            stage_times: StageTimes::default(),
        }
    }

    /// Stop the span; later calls keep the first end time.
    pub fn finish(&mut self) -> Duration {
        let end = *self.end_time.get_or_insert_with(Instant::now);
        end.duration_since(self.start_time)
    }

    /// Run `f` and charge its duration to `stage`.
    pub fn time<T>(&mut self, stage: Stage, f: impl FnOnce() -> T) -> T {
        let t = Instant::now();
        let out = f();
        self.stage_times.add(stage, t.elapsed());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_times_accumulate() {
        let mut st = StageTimes::default();
        st.add(Stage::Protect, Duration::from_millis(2));
        st.add(Stage::Protect, Duration::from_millis(3));
        st.add(Stage::Insert, Duration::from_millis(1));
        assert_eq!(st.get(Stage::Protect), Duration::from_millis(5));
        assert_eq!(st.get(Stage::Reveal), Duration::ZERO);
        assert_eq!(st.sum_of(&[Stage::Protect, Stage::Insert]), Duration::from_millis(6));
    }

    #[test]
    fn stages_fit_inside_phase_span() {
        let mut timer = PhaseTimer::start();
        timer.time(Stage::Select, || std::thread::sleep(Duration::from_millis(2)));
        let span = timer.finish();
        assert!(timer.stage_times.total() <= span);
        assert_eq!(timer.finish(), span);
    }
}

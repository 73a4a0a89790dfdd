//! Scripted tours: a list of steps replayed against an engine on a
//! simulated clock.
//!
//! Steps are written as comma- or whitespace-separated words:
//!
//! ```text
//! next, next, prev, goto:7, click:640:360, wait:1500
//! ```

use std::str::FromStr;

use web_time::{Duration, Instant};

use crate::engine::{FrameState, IsleCommand, IsleEngine};
use crate::error::IsleError;
use crate::timeline::InfoPanel;
use crate::util::frame_timing::FrameTiming;

/// One step of a tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TourStep {
    /// Fly to the next stop.
    Next,
    /// Fly to the previous stop.
    Prev,
    /// Fly to a stop by index.
    Goto(i64),
    /// Click at a screen position.
    Click {
        /// Pixels from the left edge.
        x: f32,
        /// Pixels from the top edge.
        y: f32,
    },
    /// Let the clock run.
    Wait(Duration),
}

impl TourStep {
    /// Command issued by this step, `None` for waits.
    #[must_use]
    pub fn command(&self) -> Option<IsleCommand> {
        match *self {
            Self::Next => Some(IsleCommand::Next),
            Self::Prev => Some(IsleCommand::Prev),
            Self::Goto(index) => Some(IsleCommand::Goto { index }),
            Self::Click { x, y } => Some(IsleCommand::Pick { x, y }),
            Self::Wait(_) => None,
        }
    }
}

fn number<T: FromStr>(step: &str, field: Option<&str>) -> Result<T, IsleError> {
    field
        .and_then(|f| f.trim().parse().ok())
        .ok_or_else(|| IsleError::Script(format!("bad step '{step}'")))
}

impl FromStr for TourStep {
    type Err = IsleError;

    fn from_str(step: &str) -> Result<Self, Self::Err> {
        let mut parts = step.split(':');
        let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
        let parsed = match verb.as_str() {
            "next" => Self::Next,
            "prev" => Self::Prev,
            "goto" => Self::Goto(number(step, parts.next())?),
            "click" => Self::Click {
                x: number(step, parts.next())?,
                y: number(step, parts.next())?,
            },
            "wait" => Self::Wait(Duration::from_millis(number(step, parts.next())?)),
            _ => {
                return Err(IsleError::Script(format!("unknown step '{step}'")));
            }
        };
        if parts.next().is_some() {
            return Err(IsleError::Script(format!("trailing fields in '{step}'")));
        }
        Ok(parsed)
    }
}

/// Parse a whole script.
pub fn parse_script(script: &str) -> Result<Vec<TourStep>, IsleError> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(TourStep::from_str)
        .collect()
}

/// Replays steps against an engine, one simulated frame at a time.
pub struct TourRunner {
    clock: FrameTiming,
    now: Instant,
    last_frame: Option<FrameState>,
}

impl TourRunner {
    /// Runner ticking at `fps`, starting at `origin`.
    #[must_use]
    pub fn new(fps: u32, origin: Instant) -> Self {
        Self {
            clock: FrameTiming::new(fps.max(1), origin),
            now: origin,
            last_frame: None,
        }
    }

    /// Simulated time of the most recent frame.
    #[must_use]
    pub fn now(&self) -> Instant {
        self.now
    }

    /// Frames run so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    /// State returned by the most recent frame.
    #[must_use]
    pub fn last_frame(&self) -> Option<&FrameState> {
        self.last_frame.as_ref()
    }

    /// Run frames until `duration` of simulated time has passed.
    pub fn run_for<P: InfoPanel + ?Sized>(
        &mut self,
        engine: &mut IsleEngine,
        panel: &mut P,
        duration: Duration,
    ) {
        let until = self.now + duration;
        while self.now < until {
            self.now = self.clock.advance();
            self.last_frame = Some(engine.update(panel, self.now));
        }
    }

    /// Execute one step. Rejected commands are logged and the tour
    /// continues.
    pub fn step<P: InfoPanel + ?Sized>(
        &mut self,
        engine: &mut IsleEngine,
        panel: &mut P,
        step: TourStep,
    ) {
        match step.command() {
            Some(command) => {
                log::debug!("tour step {step:?}");
                if let Err(e) = engine.execute(command, panel, self.now) {
                    log::warn!("tour step {step:?} rejected: {e}");
                }
            }
            None => {
                if let TourStep::Wait(duration) = step {
                    self.run_for(engine, panel, duration);
                }
            }
        }
    }

    /// Execute every step in order.
    pub fn run<P: InfoPanel + ?Sized>(
        &mut self,
        engine: &mut IsleEngine,
        panel: &mut P,
        steps: &[TourStep],
    ) {
        for &step in steps {
            self.step(engine, panel, step);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_step_kinds() {
        let steps = parse_script("next, prev goto:7,click:640:360 wait:250").unwrap();
        assert_eq!(
            steps,
            vec![
                TourStep::Next,
                TourStep::Prev,
                TourStep::Goto(7),
                TourStep::Click { x: 640.0, y: 360.0 },
                TourStep::Wait(Duration::from_millis(250)),
            ]
        );
    }

    #[test]
    fn negative_goto_parses() {
        // Range checking happens in the engine.
        assert_eq!(TourStep::from_str("goto:-1").unwrap(), TourStep::Goto(-1));
    }

    #[test]
    fn malformed_steps_are_script_errors() {
        for bad in ["jump", "goto", "goto:x", "click:1", "wait:-5", "next:1"] {
            let err = TourStep::from_str(bad).unwrap_err();
            assert!(matches!(err, IsleError::Script(_)), "{bad}");
        }
    }

    #[test]
    fn empty_script_is_empty() {
        assert!(parse_script("  ,, ").unwrap().is_empty());
    }
}

//! Timeline navigation and camera choreography.
//!
//! [`TimelineNavigator`] is the only mutator of the current stop. A
//! successful [`goto`](TimelineNavigator::goto) updates the index, starts
//! the camera flight and refreshes the info panel in one call, so the panel
//! and the camera never disagree about which stop is current.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec3;
use web_time::{Duration, Instant};

use super::entry::{Timeline, TimelineEntry};
use super::presenter::InfoPanel;
use crate::camera::{CameraAnimator, CameraPose};
use crate::options::NavigationOptions;
use crate::scene::SceneProvider;

/// A stop index outside `[0, len)` was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfRange {
    /// Requested index (signed so rejected negative input can be reported).
    pub index: i64,
    /// Number of stops.
    pub len: usize,
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "timeline index {} out of range (0..{})",
            self.index, self.len
        )
    }
}

impl std::error::Error for OutOfRange {}

/// Where the camera sits relative to a stop, and how long it takes to
/// get there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightFraming {
    /// Horizontal offset from the stop, outward along the stop's angle.
    pub distance: f32,
    /// Absolute eye height.
    pub height: f32,
    /// Flight duration.
    pub duration: Duration,
}

impl Default for FlightFraming {
    fn default() -> Self {
        Self::from(&NavigationOptions::default())
    }
}

impl From<&NavigationOptions> for FlightFraming {
    fn from(options: &NavigationOptions) -> Self {
        Self {
            distance: options.camera_distance,
            height: options.camera_height,
            duration: Duration::from_millis(options.flight_duration_ms),
        }
    }
}

/// Current-stop state plus the camera flight it drives.
#[derive(Debug, Clone)]
pub struct TimelineNavigator {
    timeline: Timeline,
    current: usize,
    animator: CameraAnimator,
    framing: FlightFraming,
    visits: u64,
}

impl TimelineNavigator {
    /// Navigator positioned on stop 0, with no flight in progress.
    #[must_use]
    pub fn new(timeline: Timeline, framing: FlightFraming) -> Self {
        Self {
            timeline,
            current: 0,
            animator: CameraAnimator::new(),
            framing,
            visits: 0,
        }
    }

    /// The stops being navigated.
    #[must_use]
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Index of the current stop.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current stop.
    #[must_use]
    pub fn current_entry(&self) -> Option<&TimelineEntry> {
        self.timeline.get(self.current)
    }

    /// The camera flight state.
    #[must_use]
    pub fn animator(&self) -> &CameraAnimator {
        &self.animator
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_flying(&self) -> bool {
        self.animator.is_animating()
    }

    /// Number of successful `goto` calls so far.
    #[must_use]
    pub fn visits(&self) -> u64 {
        self.visits
    }

    /// Flight framing in use.
    #[must_use]
    pub fn framing(&self) -> &FlightFraming {
        &self.framing
    }

    /// Camera pose that frames stop `index` when its marker sits at
    /// `anchor`.
    #[must_use]
    pub fn target_pose(&self, index: usize, anchor: Vec3) -> CameraPose {
        let angle = index as f32 / self.timeline.len() as f32 * TAU;
        let eye = Vec3::new(
            anchor.x + angle.cos() * self.framing.distance,
            self.framing.height,
            anchor.z + angle.sin() * self.framing.distance,
        );
        CameraPose::new(eye, anchor)
    }

    /// Make `index` the current stop: fly the camera there and show its
    /// text. Out-of-range indices are rejected without side effects.
    pub fn goto<S, P>(
        &mut self,
        index: usize,
        scene: &S,
        panel: &mut P,
        now: Instant,
    ) -> Result<(), OutOfRange>
    where
        S: SceneProvider + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let Some(entry) = self.timeline.get(index) else {
            return Err(OutOfRange {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                len: self.timeline.len(),
            });
        };

        let anchor = scene
            .entry_world_position(index)
            .unwrap_or_else(|| entry.world_position());
        let end = self.target_pose(index, anchor);
        let start = scene.camera_pose();

        log::debug!(
            "goto {index} '{}': eye {:?} -> {:?}",
            entry.title(),
            start.eye,
            end.eye
        );

        panel.show(entry.title(), entry.description());
        self.current = index;
        self.visits += 1;
        self.animator.start_at(start, end, self.framing.duration, now);
        Ok(())
    }

    /// Advance to the next stop, wrapping after the last.
    pub fn next<S, P>(&mut self, scene: &S, panel: &mut P, now: Instant)
    where
        S: SceneProvider + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let index = (self.current + 1) % self.timeline.len();
        self.goto_wrapped(index, scene, panel, now);
    }

    /// Step back to the previous stop, wrapping before the first.
    pub fn prev<S, P>(&mut self, scene: &S, panel: &mut P, now: Instant)
    where
        S: SceneProvider + ?Sized,
        P: InfoPanel + ?Sized,
    {
        let len = self.timeline.len();
        let index = (self.current + len - 1) % len;
        self.goto_wrapped(index, scene, panel, now);
    }

    fn goto_wrapped<S, P>(
        &mut self,
        index: usize,
        scene: &S,
        panel: &mut P,
        now: Instant,
    ) where
        S: SceneProvider + ?Sized,
        P: InfoPanel + ?Sized,
    {
        // Wrapped indices are always in range.
        if let Err(e) = self.goto(index, scene, panel, now) {
            log::error!("{e}");
        }
    }

    /// Advance the flight and push the pose into the scene. Returns the
    /// pose while a flight is (or was, on this tick) in progress.
    pub fn tick<S>(&mut self, scene: &mut S, now: Instant) -> Option<CameraPose>
    where
        S: SceneProvider + ?Sized,
    {
        if !self.animator.is_animating() {
            return None;
        }
        let pose = self.animator.tick(now)?;
        scene.set_camera_pose(pose);
        Some(pose)
    }
}

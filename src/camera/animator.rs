//! Time-boxed camera flights between two poses.
//!
//! The animator is a two-state machine. [`CameraAnimator::start_at`] enters
//! `Animating` (dropping any flight already in progress) and each
//! [`CameraAnimator::tick`] samples the eased trajectory. The final tick
//! returns the end pose exactly and drops back to `Idle`.

use web_time::{Duration, Instant};

use super::core::CameraPose;
use crate::util::easing::EasingFunction;

/// A single in-flight camera animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraAnimation {
    /// Pose at the moment the flight started.
    pub start_pose: CameraPose,
    /// Pose the flight ends on.
    pub end_pose: CameraPose,
    /// When the flight started.
    pub start_time: Instant,
    /// Total flight duration.
    pub duration: Duration,
}

impl CameraAnimation {
    /// Normalized progress (0.0 to 1.0) at `now`.
    #[must_use]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start_time);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }
}

/// Animator state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorState {
    /// No flight in progress.
    Idle,
    /// A flight is in progress.
    Animating(CameraAnimation),
}

/// Drives at most one camera flight at a time.
#[derive(Debug, Clone)]
pub struct CameraAnimator {
    state: AnimatorState,
    easing: EasingFunction,
    /// Last pose produced by `tick` (or the start pose of the newest
    /// flight, before its first tick).
    last_pose: Option<CameraPose>,
}

impl CameraAnimator {
    /// Idle animator using the cubic ease-out curve.
    #[must_use]
    pub fn new() -> Self {
        Self::with_easing(EasingFunction::CubicOut)
    }

    /// Idle animator using a custom curve.
    #[must_use]
    pub fn with_easing(easing: EasingFunction) -> Self {
        Self {
            state: AnimatorState::Idle,
            easing,
            last_pose: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &AnimatorState {
        &self.state
    }

    /// The in-flight animation, if any.
    #[must_use]
    pub fn current(&self) -> Option<&CameraAnimation> {
        match &self.state {
            AnimatorState::Animating(anim) => Some(anim),
            AnimatorState::Idle => None,
        }
    }

    /// Whether a flight is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.state, AnimatorState::Animating(_))
    }

    /// Last pose the animator produced.
    #[must_use]
    pub fn last_pose(&self) -> Option<CameraPose> {
        self.last_pose
    }

    /// Start a flight now. See [`start_at`](Self::start_at).
    pub fn start(&mut self, from: CameraPose, to: CameraPose, duration: Duration) {
        self.start_at(from, to, duration, Instant::now());
    }

    /// Start a flight beginning at `now`, replacing any flight in progress.
    pub fn start_at(
        &mut self,
        from: CameraPose,
        to: CameraPose,
        duration: Duration,
        now: Instant,
    ) {
        if self.is_animating() {
            log::debug!("camera flight superseded");
        }
        self.state = AnimatorState::Animating(CameraAnimation {
            start_pose: from,
            end_pose: to,
            start_time: now,
            duration,
        });
        self.last_pose = Some(from);
    }

    /// Sample the flight at `now`.
    ///
    /// Returns `None` only if the animator has never run. When idle this
    /// is the last produced pose; callers should stop ticking.
    pub fn tick(&mut self, now: Instant) -> Option<CameraPose> {
        let AnimatorState::Animating(anim) = self.state else {
            return self.last_pose;
        };

        let progress = anim.progress(now);
        let pose = if progress >= 1.0 {
            self.state = AnimatorState::Idle;
            anim.end_pose
        } else {
            let eased = self.easing.evaluate(progress);
            anim.start_pose.lerp(&anim.end_pose, eased)
        };
        self.last_pose = Some(pose);
        Some(pose)
    }
}

impl Default for CameraAnimator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    fn poses() -> (CameraPose, CameraPose) {
        (
            CameraPose::new(Vec3::new(20.0, 20.0, 20.0), Vec3::ZERO),
            CameraPose::new(Vec3::new(27.0, 10.0, 0.0), Vec3::new(12.0, 2.0, 0.0)),
        )
    }

    #[test]
    fn tick_at_start_returns_start_pose() {
        let (a, b) = poses();
        let t0 = Instant::now();
        let mut animator = CameraAnimator::new();
        animator.start_at(a, b, SECOND, t0);
        assert_eq!(animator.tick(t0), Some(a));
        assert!(animator.is_animating());
    }

    #[test]
    fn tick_after_duration_returns_end_pose_and_idles() {
        let (a, b) = poses();
        let t0 = Instant::now();
        let mut animator = CameraAnimator::new();
        animator.start_at(a, b, SECOND, t0);
        assert_eq!(animator.tick(t0 + SECOND), Some(b));
        assert_eq!(*animator.state(), AnimatorState::Idle);

        // Idle ticks keep reporting the final pose.
        assert_eq!(animator.tick(t0 + SECOND * 5), Some(b));
    }

    #[test]
    fn midpoint_follows_cubic_ease_out() {
        let (a, b) = poses();
        let t0 = Instant::now();
        let mut animator = CameraAnimator::new();
        animator.start_at(a, b, SECOND, t0);
        let pose = animator.tick(t0 + SECOND / 2).unwrap();
        let expected = a.lerp(&b, 0.875);
        assert!((pose.eye - expected.eye).length() < 1e-4);
        assert!((pose.target - expected.target).length() < 1e-4);
    }

    #[test]
    fn new_flight_discards_previous() {
        let (a, b) = poses();
        let c = CameraPose::new(Vec3::new(-30.0, 10.0, 5.0), Vec3::new(-12.0, 2.0, 0.0));
        let t0 = Instant::now();
        let mut animator = CameraAnimator::new();
        animator.start_at(a, b, SECOND, t0);
        let mid = animator.tick(t0 + SECOND / 4).unwrap();

        let t1 = t0 + SECOND / 4;
        animator.start_at(mid, c, SECOND, t1);
        let anim = animator.current().unwrap();
        assert_eq!(anim.start_pose, mid);
        assert_eq!(anim.end_pose, c);

        // Completion of the first flight's time window no longer matters.
        let pose = animator.tick(t0 + SECOND).unwrap();
        assert_ne!(pose, b);
        assert_eq!(animator.tick(t1 + SECOND), Some(c));
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let (a, b) = poses();
        let t0 = Instant::now();
        let mut animator = CameraAnimator::new();
        animator.start_at(a, b, Duration::ZERO, t0);
        assert_eq!(animator.tick(t0), Some(b));
        assert!(!animator.is_animating());
    }

    #[test]
    fn start_uses_the_current_instant() {
        let (a, b) = poses();
        let mut animator = CameraAnimator::new();
        let before = Instant::now();
        animator.start(a, b, SECOND);
        let anim = animator.current().unwrap();
        assert!(anim.start_time >= before);
        assert!(anim.start_time <= Instant::now());

        let landed = animator.tick(anim.start_time + SECOND).unwrap();
        assert_eq!(landed, b);
        assert!(!animator.is_animating());
    }

    #[test]
    fn idle_animator_without_history() {
        let mut animator = CameraAnimator::default();
        assert_eq!(animator.tick(Instant::now()), None);
        assert!(animator.current().is_none());
    }

    #[test]
    fn tick_before_start_time_clamps_to_start() {
        let (a, b) = poses();
        let t0 = Instant::now();
        let mut animator = CameraAnimator::new();
        animator.start_at(a, b, SECOND, t0 + SECOND);
        assert_eq!(animator.tick(t0), Some(a));
    }
}

//! The island engine: owns the scene, the camera and the timeline, and
//! turns commands and clock ticks into camera poses.
//!
//! The engine has no renderer. Each [`update`](IsleEngine::update) returns
//! a [`FrameState`] describing where the camera is; embedders draw the
//! [`SceneGraph`] from it however they like.

/// Command vocabulary.
pub mod command;

use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use web_time::{Duration, Instant};

pub use self::command::IsleCommand;
use crate::camera::{Camera, CameraPose, OrbitController};
use crate::error::IsleError;
use crate::options::Options;
use crate::picking::{Ray, SelectionResolver};
use crate::scene::{AmbientAnimator, IslandLayout, SceneGraph, SceneProvider};
use crate::timeline::{FlightFraming, InfoPanel, OutOfRange, Timeline, TimelineNavigator};

/// Snapshot handed to the embedder after each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    /// Camera pose this frame.
    pub pose: CameraPose,
    /// Combined view-projection matrix.
    pub view_proj: Mat4,
    /// Current timeline stop.
    pub current_index: usize,
    /// Whether a camera flight is in progress.
    pub flying: bool,
}

/// Pending automatic first visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Intro {
    Pending { at: Instant },
    Done,
}

/// [`SceneProvider`] over the engine's camera and graph.
///
/// Camera moves are mirrored into the orbit controller so manual control
/// resumes from wherever a flight left the camera.
struct SceneView<'a> {
    camera: &'a mut Camera,
    orbit: &'a mut OrbitController,
    graph: &'a SceneGraph,
}

impl SceneProvider for SceneView<'_> {
    fn camera_pose(&self) -> CameraPose {
        self.camera.pose()
    }

    fn set_camera_pose(&mut self, pose: CameraPose) {
        self.camera.set_pose(pose);
        self.orbit.set_pose(pose);
    }

    fn entry_world_position(&self, index: usize) -> Option<Vec3> {
        self.graph
            .timeline_node(index)
            .and_then(|id| self.graph.world_position(id))
    }
}

/// The headless island engine.
pub struct IsleEngine {
    options: Options,
    camera: Camera,
    orbit: OrbitController,
    graph: SceneGraph,
    layout: IslandLayout,
    ambient: AmbientAnimator,
    navigator: TimelineNavigator,
    resolver: SelectionResolver,
    viewport: (u32, u32),
    started: Instant,
    intro: Intro,
}

impl IsleEngine {
    /// Build the island for `timeline` and place the camera at its
    /// starting pose. The clock starts at `now`.
    #[must_use]
    pub fn new(options: Options, timeline: Timeline, now: Instant) -> Self {
        let mut rng = match options.scene.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut graph = SceneGraph::new();
        let layout =
            IslandLayout::build(&mut graph, &timeline, &options.scene, &mut rng);
        let ambient = AmbientAnimator::new(
            &graph,
            &layout,
            options.ambient.clone(),
            StdRng::seed_from_u64(rng.random()),
        );

        let start_pose =
            CameraPose::new(Vec3::from(options.camera.initial_eye), Vec3::ZERO);
        let viewport = (1280, 720);
        let mut camera = Camera::new(start_pose, 1.0, &options.camera);
        camera.resize(viewport.0, viewport.1);
        let orbit = OrbitController::new(start_pose, &options.camera);

        let navigator = TimelineNavigator::new(
            timeline,
            FlightFraming::from(&options.navigation),
        );
        let intro = match options.navigation.intro_delay_ms {
            Some(ms) => Intro::Pending {
                at: now + Duration::from_millis(ms),
            },
            None => Intro::Done,
        };

        log::info!(
            "engine ready: {} stops, {} nodes",
            navigator.timeline().len(),
            graph.len()
        );

        Self {
            options,
            camera,
            orbit,
            graph,
            layout,
            ambient,
            navigator,
            resolver: SelectionResolver::new(),
            viewport,
            started: now,
            intro,
        }
    }

    /// Engine over the bundled twelve-stop timeline.
    pub fn with_builtin_timeline(
        options: Options,
        now: Instant,
    ) -> Result<Self, IsleError> {
        let timeline = Timeline::builtin(options.scene.ring())?;
        Ok(Self::new(options, timeline, now))
    }

    /// Options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Scene graph (read-only; the engine animates it).
    #[must_use]
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Node ids of the island's parts.
    #[must_use]
    pub fn layout(&self) -> &IslandLayout {
        &self.layout
    }

    /// Ambient motion state (smoke opacity for renderers).
    #[must_use]
    pub fn ambient(&self) -> &AmbientAnimator {
        &self.ambient
    }

    /// The timeline navigator.
    #[must_use]
    pub fn navigator(&self) -> &TimelineNavigator {
        &self.navigator
    }

    /// Current camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current stop index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.navigator.current_index()
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether the automatic first visit is still pending.
    #[must_use]
    pub fn intro_pending(&self) -> bool {
        matches!(self.intro, Intro::Pending { .. })
    }

    /// Perform `command`. Only [`IsleCommand::Goto`] with a bad index
    /// fails, and it leaves every piece of state untouched.
    pub fn execute<P: InfoPanel + ?Sized>(
        &mut self,
        command: IsleCommand,
        panel: &mut P,
        now: Instant,
    ) -> Result<(), IsleError> {
        let visits = self.navigator.visits();
        let view = SceneView {
            camera: &mut self.camera,
            orbit: &mut self.orbit,
            graph: &self.graph,
        };
        match command {
            IsleCommand::Next => self.navigator.next(&view, panel, now),
            IsleCommand::Prev => self.navigator.prev(&view, panel, now),
            IsleCommand::First => {
                self.navigator.goto(0, &view, panel, now)?;
            }
            IsleCommand::Goto { index } => {
                let len = self.navigator.timeline().len();
                let Ok(target) = usize::try_from(index) else {
                    let err = OutOfRange { index, len };
                    log::warn!("{err}");
                    return Err(err.into());
                };
                if let Err(err) = self.navigator.goto(target, &view, panel, now) {
                    log::warn!("{err}");
                    return Err(err.into());
                }
            }
            IsleCommand::Pick { x, y } => {
                let ray = self.camera.ray_from_screen(
                    x,
                    y,
                    self.viewport.0,
                    self.viewport.1,
                );
                match self.resolver.pick(&self.graph, &ray) {
                    Some(index) => {
                        let view = SceneView {
                            camera: &mut self.camera,
                            orbit: &mut self.orbit,
                            graph: &self.graph,
                        };
                        self.navigator.goto(index, &view, panel, now)?;
                    }
                    None => log::debug!("click at ({x}, {y}) hit no stop"),
                }
            }
            IsleCommand::RotateCamera { delta } => {
                if !self.navigator.is_flying() {
                    self.orbit.rotate(delta);
                }
            }
            IsleCommand::PanCamera { delta } => {
                if !self.navigator.is_flying() {
                    self.orbit.pan(delta);
                }
            }
            IsleCommand::Zoom { delta } => {
                if !self.navigator.is_flying() {
                    self.orbit.zoom(delta);
                    self.camera.set_pose(self.orbit.pose());
                }
            }
            IsleCommand::Resize { width, height } => {
                self.viewport = (width.max(1), height.max(1));
                self.camera.resize(width, height);
            }
        }

        if self.navigator.visits() > visits {
            // A completed visit supersedes the intro.
            self.intro = Intro::Done;
        }
        Ok(())
    }

    /// World ray through a screen position of the current viewport.
    #[must_use]
    pub fn screen_ray(&self, x: f32, y: f32) -> Ray {
        self.camera
            .ray_from_screen(x, y, self.viewport.0, self.viewport.1)
    }

    /// Stop under a screen position, without navigating.
    #[must_use]
    pub fn pick(&self, x: f32, y: f32) -> Option<usize> {
        self.resolver.pick(&self.graph, &self.screen_ray(x, y))
    }

    /// Advance one frame: fire the intro visit when due, animate the
    /// island, then move the camera by flight or by orbit control.
    pub fn update<P: InfoPanel + ?Sized>(
        &mut self,
        panel: &mut P,
        now: Instant,
    ) -> FrameState {
        if let Intro::Pending { at } = self.intro {
            if now >= at {
                self.intro = Intro::Done;
                log::info!("intro: visiting the first stop");
                let view = SceneView {
                    camera: &mut self.camera,
                    orbit: &mut self.orbit,
                    graph: &self.graph,
                };
                if let Err(err) = self.navigator.goto(0, &view, panel, now) {
                    log::error!("intro visit failed: {err}");
                }
            }
        }

        let elapsed = now.saturating_duration_since(self.started);
        self.ambient.update(&mut self.graph, elapsed);

        let mut view = SceneView {
            camera: &mut self.camera,
            orbit: &mut self.orbit,
            graph: &self.graph,
        };
        if self.navigator.tick(&mut view, now).is_none() {
            let pose = self.orbit.update();
            self.camera.set_pose(pose);
        }

        self.frame_state()
    }

    /// Current frame snapshot without advancing anything.
    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            pose: self.camera.pose(),
            view_proj: self.camera.build_matrix(),
            current_index: self.navigator.current_index(),
            flying: self.navigator.is_flying(),
        }
    }
}

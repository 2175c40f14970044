use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::behaviors::{ElasticPath, Jitter, TargetTracker};
use crate::camera::Camera;
use crate::chain::{draw_chain, ChainArena, ChainHead, NodeId, Removal, RemovalPolicy};
use crate::config::SceneConfig;
use crate::math::{degrees_to_radians, Orientation};
use crate::orbit::Orbit;
use crate::rig::CameraRig;
use crate::traits::{Controller, HeldMotions, Motion, RandSource, RenderSink, UniformSource};

/// Side of the last cube a new segment is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentDirection {
    Up,
    Front,
    Right,
    Left,
    Back,
    Down,
}

impl SegmentDirection {
    pub const ALL: [SegmentDirection; 6] = [
        SegmentDirection::Up,
        SegmentDirection::Front,
        SegmentDirection::Right,
        SegmentDirection::Left,
        SegmentDirection::Back,
        SegmentDirection::Down,
    ];

    pub fn axis(self) -> Vec3 {
        match self {
            SegmentDirection::Up => Vec3::Y,
            SegmentDirection::Front => Vec3::Z,
            SegmentDirection::Right => Vec3::X,
            SegmentDirection::Left => Vec3::NEG_X,
            SegmentDirection::Back => Vec3::NEG_Z,
            SegmentDirection::Down => Vec3::NEG_Y,
        }
    }
}

/// One user edit, as delivered by whatever handles input.
///
/// Magnitudes are input steps; [`Scene::apply`] scales them by the
/// [`ControlConfig`](crate::config::ControlConfig).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    NewPipe,
    Append(SegmentDirection),
    RotateActive(f32),
    MoveActivePipe(Vec3),
    YawActivePipe(f32),
    PitchActivePipe(f32),
    RollActivePipe(f32),
    DeleteActive {
        #[serde(default)]
        ignore_clashes: bool,
    },
    NextNode,
    PrevNode,
    NextPipe,
    PrevPipe,
    FirstPipe,
    LastPipe,
    PitchCamera(f32),
    YawCamera(f32),
    Press(Motion),
    Release(Motion),
    ToggleOrbit,
    RecordOrbitPoint,
    /// Uses the configured duration when none is given
    Shake {
        #[serde(default)]
        duration: Option<f32>,
    },
    StopShake,
}

/// All editable state of a session: the pipes, the selection and the camera.
pub struct Scene {
    config: SceneConfig,
    arena: ChainArena,
    /// Head of every pipe, in creation order
    pipes: Vec<NodeId>,
    active_pipe: Option<usize>,
    active: Option<NodeId>,
    last: Option<NodeId>,
    rig: CameraRig,
    orbit: Orbit,
    orbiting: bool,
    controls: HeldMotions,
    /// Shake displacement currently applied to the free-flying camera
    shake_offset: Vec3,
}

impl Scene {
    pub fn new(config: SceneConfig, source: Box<dyn UniformSource>) -> Self {
        let camera = &config.camera;
        let rig = CameraRig::new(Camera::at(camera.position))
            .with_behavior(Box::new(ElasticPath::new(camera.position, camera.path_speed)))
            .with_behavior(Box::new(Jitter::new(
                camera.shake_strength,
                camera.shake_rate,
                source,
            )))
            .with_behavior(Box::new(TargetTracker::new(config.orbit.target, Vec3::Y)));
        let orbit = Orbit::new(config.orbit.points.clone(), config.orbit.target);
        let start_orbiting = config.orbit.enabled;

        let mut scene = Self {
            config,
            arena: ChainArena::new(),
            pipes: Vec::new(),
            active_pipe: None,
            active: None,
            last: None,
            rig,
            orbit,
            orbiting: false,
            controls: HeldMotions::new(),
            shake_offset: Vec3::ZERO,
        };
        if start_orbiting {
            scene.toggle_orbit();
        }
        scene
    }

    /// Scene whose shake offsets come from a seeded generator
    pub fn seeded(config: SceneConfig, seed: u64) -> Self {
        Self::new(config, Box::new(RandSource::new(StdRng::seed_from_u64(seed))))
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn arena(&self) -> &ChainArena {
        &self.arena
    }

    /// Head of every pipe, in creation order
    pub fn pipes(&self) -> &[NodeId] {
        &self.pipes
    }

    pub fn active_pipe(&self) -> Option<usize> {
        self.active_pipe
    }

    /// Selected node, if it still exists
    pub fn active(&self) -> Option<NodeId> {
        self.active.filter(|id| self.arena.contains(*id))
    }

    /// Most recently appended node, if it still exists
    pub fn last(&self) -> Option<NodeId> {
        self.last.filter(|id| self.arena.contains(*id))
    }

    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.rig
    }

    pub fn camera(&self) -> &Camera {
        self.rig.camera()
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    pub fn controls(&self) -> &HeldMotions {
        &self.controls
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.rig.view_matrix()
    }

    fn select(&mut self, id: NodeId) {
        if let Some(previous) = self.active() {
            self.arena.set_active(previous, false);
        }
        self.arena.set_active(id, true);
        self.active = Some(id);
    }

    fn clear_selection(&mut self) {
        if let Some(previous) = self.active() {
            self.arena.set_active(previous, false);
        }
        self.active = None;
        self.active_pipe = None;
    }

    fn active_head_mut(&mut self) -> Option<&mut ChainHead> {
        let head = *self.pipes.get(self.active_pipe?)?;
        self.arena.head_mut(head)
    }

    /// Starts a new pipe at the origin and selects its head
    pub fn new_pipe(&mut self) -> NodeId {
        let head = self.arena.spawn_head(Vec3::ZERO);
        self.pipes.push(head);
        self.active_pipe = Some(self.pipes.len() - 1);
        self.last = Some(head);
        self.select(head);
        log::info!("created pipe {}", self.pipes.len() - 1);
        head
    }

    /// Attaches a segment to the end of the active pipe.
    ///
    /// Returns `None` without changing anything when there is no pipe or the
    /// segment would fold back into the current tail.
    pub fn append(&mut self, direction: SegmentDirection) -> Option<NodeId> {
        let head = *self.pipes.get(self.active_pipe?)?;
        let tail = self.arena.tail(head)?;
        let segment = self.arena.spawn_segment(0.0, direction.axis());

        if self.arena.link(tail, segment) {
            self.last = Some(segment);
            log::debug!("appended {:?} segment", direction);
            Some(segment)
        } else {
            self.arena.release_chain(segment);
            log::warn!("rejected {:?} segment: it would overlap the previous cube", direction);
            None
        }
    }

    /// Twists the selected segment by `delta` radians
    pub fn rotate_active(&mut self, delta: f32) -> bool {
        match self.active() {
            Some(id) => self.arena.rotate(id, delta),
            None => false,
        }
    }

    /// Moves the whole active pipe by `offset` in world space
    pub fn move_active_pipe(&mut self, offset: Vec3) -> bool {
        self.active_head_mut().map(|head| head.dolly(offset)).is_some()
    }

    pub fn yaw_active_pipe(&mut self, angle: f32) -> bool {
        self.active_head_mut().map(|head| head.yaw(angle)).is_some()
    }

    pub fn pitch_active_pipe(&mut self, angle: f32) -> bool {
        self.active_head_mut().map(|head| head.pitch(angle)).is_some()
    }

    pub fn roll_active_pipe(&mut self, angle: f32) -> bool {
        self.active_head_mut().map(|head| head.roll(angle)).is_some()
    }

    /// Removes the selected node and moves the selection to whatever replaced it
    pub fn delete_active(&mut self, policy: RemovalPolicy) -> Removal {
        let Some(active) = self.active() else {
            return Removal::Missing;
        };
        let removal = self.arena.remove(active, policy);
        log::debug!("delete {:?} with {:?}: {:?}", active, policy, removal);

        match removal {
            Removal::Relinked { prev, .. } | Removal::Truncated { prev, .. } => {
                if self.last().is_none() {
                    self.last = Some(prev);
                }
                self.select(prev);
            }
            Removal::Promoted { new_head } => {
                if let Some(slot) = self.active_pipe.and_then(|i| self.pipes.get_mut(i)) {
                    *slot = new_head;
                }
                self.select(new_head);
                log::info!("promoted successor to pipe head");
            }
            Removal::Emptied => self.drop_pipe(active),
            Removal::Rejected => {
                log::warn!("delete rejected: neighbours would overlap (use ignore_clashes to truncate)");
            }
            Removal::Missing => {}
        }
        removal
    }

    fn drop_pipe(&mut self, head: NodeId) {
        let Some(index) = self.pipes.iter().position(|&id| id == head) else {
            return;
        };
        self.pipes.remove(index);
        log::info!("removed pipe {}", index);

        if self.pipes.is_empty() {
            self.clear_selection();
            self.last = None;
            return;
        }
        let index = index.min(self.pipes.len() - 1);
        self.select_pipe(index);
        if self.last().is_none() {
            self.last = self.arena.tail(self.pipes[index]);
        }
    }

    /// Moves the selection one node further along the pipe
    pub fn next_node(&mut self) -> bool {
        match self.active().and_then(|id| self.arena.next(id)) {
            Some(next) => {
                self.select(next);
                true
            }
            None => false,
        }
    }

    pub fn prev_node(&mut self) -> bool {
        match self.active().and_then(|id| self.arena.prev(id)) {
            Some(prev) => {
                self.select(prev);
                true
            }
            None => false,
        }
    }

    /// Selects the head of pipe `index`, clamped to the existing pipes
    pub fn select_pipe(&mut self, index: usize) -> bool {
        let Some(last) = self.pipes.len().checked_sub(1) else {
            return false;
        };
        let index = index.min(last);
        self.active_pipe = Some(index);
        self.select(self.pipes[index]);
        true
    }

    pub fn next_pipe(&mut self) -> bool {
        let index = self.active_pipe.map_or(0, |i| i + 1);
        self.select_pipe(index)
    }

    pub fn prev_pipe(&mut self) -> bool {
        let index = self.active_pipe.map_or(0, |i| i.saturating_sub(1));
        self.select_pipe(index)
    }

    pub fn first_pipe(&mut self) -> bool {
        self.select_pipe(0)
    }

    pub fn last_pipe(&mut self) -> bool {
        self.select_pipe(usize::MAX)
    }

    /// Tilts the camera about its own right axis
    pub fn pitch_camera(&mut self, angle: f32) {
        self.rig.camera_mut().pitch(angle);
    }

    /// Turns the camera about world up, so it never rolls
    pub fn yaw_camera(&mut self, angle: f32) {
        self.rig
            .camera_mut()
            .pan(Orientation::from_axis_angle(Vec3::Y, angle));
    }

    pub fn press(&mut self, motion: Motion) {
        self.controls.press(motion);
    }

    pub fn release(&mut self, motion: Motion) {
        self.controls.release(motion);
    }

    /// Switches between orbiting the recorded points and flying freely.
    ///
    /// Either way the camera turns to the orbit target and the path is
    /// collapsed onto the current position so nothing lurches.
    pub fn toggle_orbit(&mut self) {
        self.settle_shake();
        self.orbiting = !self.orbiting;
        let target = self.orbit.target();
        let position = self.rig.camera().position();
        self.rig.camera_mut().look_at(target, Vec3::Y);
        self.rig.set_position(position);
        log::info!("orbit {}", if self.orbiting { "on" } else { "off" });
    }

    /// Adds the camera's current position to the orbit
    pub fn record_orbit_point(&mut self) {
        let position = self.rig.camera().position() - self.shake_offset;
        self.orbit.record_point(position);
        log::debug!("recorded orbit point {:?}", position);
    }

    pub fn shake(&mut self, duration: f32) {
        if let Some(jitter) = self.rig.behavior_mut::<Jitter>() {
            jitter.shake(duration);
        }
    }

    pub fn stop_shake(&mut self) {
        if let Some(jitter) = self.rig.behavior_mut::<Jitter>() {
            jitter.stop();
        }
    }

    /// Steps the camera by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.orbiting {
            self.orbit.step(&mut self.rig, dt);
            self.rig.advance(dt);
        } else {
            self.settle_shake();
            self.fly(dt);
            let offset = self
                .rig
                .behavior_mut::<Jitter>()
                .map_or(Vec3::ZERO, |jitter| jitter.step(dt));
            self.rig.camera_mut().dolly(offset);
            self.shake_offset = offset;
        }
    }

    /// Takes the free-flying camera back to its unshaken position
    fn settle_shake(&mut self) {
        if self.shake_offset != Vec3::ZERO {
            self.rig.camera_mut().dolly(-self.shake_offset);
            self.shake_offset = Vec3::ZERO;
        }
    }

    fn fly(&mut self, dt: f32) {
        let step = self.config.camera.fly_speed * dt;
        let sway = self.controls.axis(Motion::Right, Motion::Left);
        let heave = self.controls.axis(Motion::Up, Motion::Down);
        let surge = self.controls.axis(Motion::Forward, Motion::Backward);

        let camera = self.rig.camera_mut();
        if sway != 0.0 {
            camera.sway(sway * step);
        }
        if heave != 0.0 {
            camera.heave(heave * step);
        }
        if surge != 0.0 {
            camera.surge(surge * step);
        }
    }

    /// Draws every pipe. Returns the number of cubes submitted.
    pub fn render(&self, sink: &mut dyn RenderSink) -> usize {
        self.pipes
            .iter()
            .map(|&head| draw_chain(&self.arena, head, sink))
            .sum()
    }

    pub fn apply(&mut self, action: &Action) {
        let controls = self.config.controls.clone();
        let degrees = |steps: f32, per_step: f32| degrees_to_radians(steps * per_step);

        match *action {
            Action::NewPipe => {
                self.new_pipe();
            }
            Action::Append(direction) => {
                self.append(direction);
            }
            Action::RotateActive(steps) => {
                self.rotate_active(degrees(steps, controls.rotate_step));
            }
            Action::MoveActivePipe(steps) => {
                self.move_active_pipe(steps * controls.pipe_move_step);
            }
            Action::YawActivePipe(steps) => {
                self.yaw_active_pipe(degrees(steps, controls.pipe_pan_step));
            }
            Action::PitchActivePipe(steps) => {
                self.pitch_active_pipe(degrees(steps, controls.pipe_pan_step));
            }
            Action::RollActivePipe(steps) => {
                self.roll_active_pipe(degrees(steps, controls.pipe_pan_step));
            }
            Action::DeleteActive { ignore_clashes } => {
                let policy = if ignore_clashes {
                    RemovalPolicy::ForceTruncate
                } else {
                    RemovalPolicy::Reject
                };
                self.delete_active(policy);
            }
            Action::NextNode => {
                self.next_node();
            }
            Action::PrevNode => {
                self.prev_node();
            }
            Action::NextPipe => {
                self.next_pipe();
            }
            Action::PrevPipe => {
                self.prev_pipe();
            }
            Action::FirstPipe => {
                self.first_pipe();
            }
            Action::LastPipe => {
                self.last_pipe();
            }
            Action::PitchCamera(steps) => self.pitch_camera(degrees(steps, controls.look_step)),
            Action::YawCamera(steps) => self.yaw_camera(degrees(steps, controls.look_step)),
            Action::Press(motion) => self.press(motion),
            Action::Release(motion) => self.release(motion),
            Action::ToggleOrbit => self.toggle_orbit(),
            Action::RecordOrbitPoint => self.record_orbit_point(),
            Action::Shake { duration } => {
                self.shake(duration.unwrap_or(self.config.camera.shake_duration))
            }
            Action::StopShake => self.stop_shake(),
        }
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("pipes", &self.pipes)
            .field("active_pipe", &self.active_pipe)
            .field("active", &self.active)
            .field("nodes", &self.arena.len())
            .field("orbiting", &self.orbiting)
            .field("shake_offset", &self.shake_offset)
            .field("rig", &self.rig)
            .finish()
    }
}

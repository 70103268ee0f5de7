//! Headless per-frame driver for the driving simulation
//!
//! [`DrivingScene`] owns everything that changes from frame to frame: the
//! vehicle box and its integrator, the static obstacles, and the two follow
//! cameras. A window or test harness calls [`DrivingScene::step`] once per
//! frame with the held controls and reads back matrices for drawing.

use crate::core::config::{Config, ConfigError, SimulationConfig};
use crate::foundation::math::{Mat4, Vec3};
use crate::input::{CameraIntent, DriveIntent};
use crate::physics::collision::{CollidableBox, ShapeKind};
use crate::physics::collision_system::{first_collision, BoxKey, Obstacles};
use crate::physics::movement::VelocityIntegrator;
use crate::render::primitives::OrbitCamera;
use crate::scene::arena::Arena;

/// Which camera the view matrix comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// Behind and above the vehicle
    #[default]
    Chase,
    /// High above the vehicle looking down
    Overhead,
}

impl CameraMode {
    /// The other camera
    pub fn toggled(self) -> Self {
        match self {
            Self::Chase => Self::Overhead,
            Self::Overhead => Self::Chase,
        }
    }
}

/// What happened to the vehicle during one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Vehicle velocity after the frame
    pub velocity: f32,
    /// Vehicle position after the frame
    pub vehicle_position: Vec3,
    /// Obstacle that stopped a turn or a move this frame
    pub blocked_by: Option<BoxKey>,
}

/// Vehicle, arena, and cameras advanced together one frame at a time
#[derive(Debug, Clone)]
pub struct DrivingScene {
    config: SimulationConfig,
    vehicle: CollidableBox,
    integrator: VelocityIntegrator,
    obstacles: Obstacles,
    scenery: Vec<CollidableBox>,
    chase_camera: OrbitCamera,
    overhead_camera: OrbitCamera,
    camera_mode: CameraMode,
}

impl DrivingScene {
    /// Build the arena, vehicle, and cameras described by `config`
    ///
    /// # Errors
    /// [`ConfigError::Invalid`] when the configuration fails validation.
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let arena = Arena::build(&config.arena);
        let mut obstacles = Obstacles::with_key();
        for wall in arena.walls {
            obstacles.insert(wall);
        }

        let vehicle = CollidableBox::new()
            .with_position(config.drive.vehicle_start)
            .with_scale(config.drive.vehicle_size);

        let mut chase_camera = OrbitCamera::from_config(&config.camera);
        chase_camera.translate_to(config.chase_camera.start_position);
        chase_camera.set_target(Vec3::zeros());

        let mut overhead_camera = OrbitCamera::from_config(&config.camera);
        overhead_camera.translate_to(Vec3::new(
            0.0,
            config.arena.size * config.overhead_camera.height_fraction,
            0.0,
        ));
        overhead_camera.set_target(Vec3::zeros());

        log::info!(
            "Driving scene ready: {} obstacles, vehicle at {:?}",
            obstacles.len(),
            vehicle.position()
        );

        Ok(Self {
            integrator: VelocityIntegrator::from_config(&config.integrator),
            config,
            vehicle,
            obstacles,
            scenery: vec![arena.ground],
            chase_camera,
            overhead_camera,
            camera_mode: CameraMode::Chase,
        })
    }

    /// Configuration the scene was built from
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The vehicle's collision box
    pub fn vehicle(&self) -> &CollidableBox {
        &self.vehicle
    }

    /// The vehicle's velocity integrator
    pub fn integrator(&self) -> &VelocityIntegrator {
        &self.integrator
    }

    /// Static obstacles
    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    /// Add a static obstacle
    pub fn add_obstacle(&mut self, obstacle: CollidableBox) -> BoxKey {
        self.obstacles.insert(obstacle)
    }

    /// Chase camera
    pub fn chase_camera(&self) -> &OrbitCamera {
        &self.chase_camera
    }

    /// Overhead camera
    pub fn overhead_camera(&self) -> &OrbitCamera {
        &self.overhead_camera
    }

    /// Which camera is active
    pub fn camera_mode(&self) -> CameraMode {
        self.camera_mode
    }

    /// The camera the view matrix comes from
    pub fn active_camera(&self) -> &OrbitCamera {
        match self.camera_mode {
            CameraMode::Chase => &self.chase_camera,
            CameraMode::Overhead => &self.overhead_camera,
        }
    }

    fn active_camera_mut(&mut self) -> &mut OrbitCamera {
        match self.camera_mode {
            CameraMode::Chase => &mut self.chase_camera,
            CameraMode::Overhead => &mut self.overhead_camera,
        }
    }

    /// Switch between the chase and overhead cameras
    pub fn toggle_camera(&mut self) -> CameraMode {
        self.camera_mode = self.camera_mode.toggled();
        log::info!("Switched to {:?} camera", self.camera_mode);
        self.camera_mode
    }

    /// Advance the scene by one frame
    pub fn step(&mut self, delta_seconds: f32, drive: DriveIntent, camera: CameraIntent) -> FrameReport {
        self.apply_camera_controls(delta_seconds, camera);
        self.apply_translation(delta_seconds, drive);

        let acceleration = match drive.axis(DriveIntent::FORWARD, DriveIntent::BACKWARD) {
            Some(direction) if direction > 0.0 => self.config.drive.forward_acceleration,
            Some(_) => self.config.drive.reverse_acceleration,
            None => 0.0,
        };
        self.integrator.set_drive_acceleration(acceleration);

        let mut blocked_by = self.apply_steering(delta_seconds, drive);

        let distance = self.integrator.displacement(delta_seconds);
        self.vehicle.transform_mut().move_local(0.0, 0.0, distance);
        if let Some(key) = first_collision(&self.vehicle, &self.obstacles) {
            self.vehicle.transform_mut().move_local(0.0, 0.0, -distance);
            self.integrator.stop();
            log::debug!("Vehicle blocked by {:?}, move of {} reverted", key, distance);
            blocked_by = Some(key);
        }

        self.follow_vehicle();

        let report = FrameReport {
            velocity: self.integrator.velocity(),
            vehicle_position: self.vehicle.position(),
            blocked_by,
        };
        log::trace!("Frame: {:?}", report);
        report
    }

    /// Manual camera controls; moves that would take the camera under the
    /// minimum height are undone
    fn apply_camera_controls(&mut self, delta_seconds: f32, intent: CameraIntent) {
        let settings = &self.config.camera;
        let move_step = settings.move_speed * delta_seconds;
        let revolve_step = settings.revolve_rate * delta_seconds;
        let zoom_step = settings.zoom_rate * delta_seconds;
        let min_height = settings.min_height;

        let camera = self.active_camera_mut();

        // View-space right is the transform's -right
        if let Some(direction) = intent.axis(CameraIntent::MOVE_RIGHT, CameraIntent::MOVE_LEFT) {
            camera.move_local(-direction * move_step, 0.0, 0.0);
        }

        match intent.axis(CameraIntent::MOVE_UP, CameraIntent::MOVE_DOWN) {
            Some(direction) if direction > 0.0 => camera.move_local(0.0, move_step, 0.0),
            Some(_) => {
                camera.move_local(0.0, -move_step, 0.0);
                if camera.position().y < min_height {
                    camera.move_local(0.0, move_step, 0.0);
                }
            }
            None => {}
        }

        if let Some(direction) = intent.axis(CameraIntent::REVOLVE_RIGHT, CameraIntent::REVOLVE_LEFT) {
            camera.revolve_horizontal(-direction * revolve_step);
        }

        match intent.axis(CameraIntent::REVOLVE_UP, CameraIntent::REVOLVE_DOWN) {
            Some(direction) if direction > 0.0 => {
                camera.revolve_vertical(revolve_step);
                if camera.position().y < min_height {
                    camera.revolve_vertical(-revolve_step);
                }
            }
            Some(_) => camera.revolve_vertical(-revolve_step),
            None => {}
        }

        match intent.axis(CameraIntent::ZOOM_IN, CameraIntent::ZOOM_OUT) {
            Some(direction) if direction > 0.0 => camera.zoom_distance(zoom_step),
            Some(_) => {
                camera.zoom_distance(-zoom_step);
                if camera.position().y < min_height {
                    camera.zoom_distance(zoom_step);
                }
            }
            None => {}
        }
    }

    /// Direct world-axis sliding of the vehicle
    fn apply_translation(&mut self, delta_seconds: f32, intent: DriveIntent) {
        let step = self.config.drive.translate_speed * delta_seconds;
        let offset = Vec3::new(
            intent.axis(DriveIntent::TRANSLATE_X_POS, DriveIntent::TRANSLATE_X_NEG).unwrap_or(0.0),
            intent.axis(DriveIntent::TRANSLATE_Y_POS, DriveIntent::TRANSLATE_Y_NEG).unwrap_or(0.0),
            intent.axis(DriveIntent::TRANSLATE_Z_POS, DriveIntent::TRANSLATE_Z_NEG).unwrap_or(0.0),
        ) * step;

        if offset != Vec3::zeros() {
            self.vehicle.transform_mut().translate(offset);
        }
    }

    /// Steering (only while moving, undone on collision) and pitch
    fn apply_steering(&mut self, delta_seconds: f32, intent: DriveIntent) -> Option<BoxKey> {
        let mut blocked_by = None;

        if self.integrator.velocity() != 0.0 {
            if let Some(direction) = intent.axis(DriveIntent::TURN_RIGHT, DriveIntent::TURN_LEFT) {
                let angle = direction * self.config.drive.turn_rate * delta_seconds;
                self.vehicle.transform_mut().rotate_horizontal(angle);

                if let Some(key) = first_collision(&self.vehicle, &self.obstacles) {
                    self.vehicle.transform_mut().rotate_horizontal(-angle);
                    log::debug!("Turn into {:?} reverted", key);
                    blocked_by = Some(key);
                }
            }
        }

        // Positive vertical angles pitch the nose down
        if let Some(direction) = intent.axis(DriveIntent::TURN_UP, DriveIntent::TURN_DOWN) {
            let angle = -direction * self.config.drive.pitch_rate * delta_seconds;
            self.vehicle.transform_mut().rotate_vertical(angle);
        }

        blocked_by
    }

    /// Re-aim both cameras at the vehicle
    fn follow_vehicle(&mut self) {
        let position = self.vehicle.position();
        let forward = self.vehicle.transform().forward();
        let chase = &self.config.chase_camera;

        self.chase_camera.set_target(position);
        self.chase_camera.set_distance(chase.follow_distance);
        self.chase_camera.revolve_horizontal_from_vector(0.0, &forward);
        self.chase_camera.revolve_vertical_from_vector(chase.pitch_offset, &forward);
        self.chase_camera.translate(Vec3::new(0.0, chase.height_offset, 0.0));

        let height = self.overhead_camera.position().y;
        self.overhead_camera.translate_to(Vec3::new(position.x, height, position.z));
        self.overhead_camera
            .set_angle_horizontal(self.vehicle.transform().angle_horizontal());
    }

    /// Boxes to draw, as `(kind, model matrix)` pairs: vehicle, scenery, then obstacles
    pub fn draw_list(&self) -> impl Iterator<Item = (ShapeKind, Mat4)> + '_ {
        std::iter::once(&self.vehicle)
            .chain(self.scenery.iter())
            .chain(self.obstacles.values())
            .map(|shape| (shape.kind(), shape.model_matrix()))
    }

    /// View matrix of the active camera
    pub fn view_matrix(&self) -> Mat4 {
        self.active_camera().view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::dot;
    use approx::assert_relative_eq;

    const DELTA: f32 = 1.0 / 60.0;

    fn scene() -> DrivingScene {
        DrivingScene::new(SimulationConfig::default()).unwrap()
    }

    fn idle(scene: &mut DrivingScene) -> FrameReport {
        scene.step(DELTA, DriveIntent::empty(), CameraIntent::empty())
    }

    #[test]
    fn test_new_scene_layout() {
        let scene = scene();

        assert_eq!(scene.obstacles().len(), 4);
        assert_eq!(scene.camera_mode(), CameraMode::Chase);
        assert_relative_eq!(scene.vehicle().position(), Vec3::new(0.0, 0.375, 0.0), epsilon = 1e-6);
        assert_relative_eq!(scene.overhead_camera().position().y, 80.0, epsilon = 1e-3);
        assert_eq!(first_collision(scene.vehicle(), scene.obstacles()), None);
        // Vehicle, ground, and four walls
        assert_eq!(scene.draw_list().count(), 6);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.arena.size = -1.0;
        assert!(matches!(DrivingScene::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_forward_and_coasting() {
        let mut scene = scene();

        let report = scene.step(0.1, DriveIntent::FORWARD, CameraIntent::empty());
        assert_relative_eq!(report.velocity, 2.73, epsilon = 1e-5);
        assert_relative_eq!(report.vehicle_position.z, 0.273, epsilon = 1e-5);

        for _ in 0..600 {
            idle(&mut scene);
        }
        assert_eq!(scene.integrator().velocity(), 0.0);
    }

    #[test]
    fn test_reverse_drives_backwards() {
        let mut scene = scene();
        for _ in 0..30 {
            scene.step(DELTA, DriveIntent::BACKWARD, CameraIntent::empty());
        }

        assert!(scene.integrator().velocity() < 0.0);
        assert!(scene.vehicle().position().z < 0.0);
    }

    #[test]
    fn test_no_steering_while_stationary() {
        let mut scene = scene();
        scene.step(DELTA, DriveIntent::TURN_RIGHT, CameraIntent::empty());
        assert_eq!(scene.vehicle().transform().angle_horizontal(), 0.0);

        for _ in 0..30 {
            scene.step(DELTA, DriveIntent::FORWARD | DriveIntent::TURN_RIGHT, CameraIntent::empty());
        }
        assert!(scene.vehicle().transform().angle_horizontal() > 0.0);
        // Steering right heads towards -X
        assert!(scene.vehicle().position().x < 0.0);
    }

    #[test]
    fn test_driving_into_wall_stops_vehicle() {
        let mut scene = scene();

        let mut blocked = None;
        for _ in 0..3000 {
            let report = scene.step(DELTA, DriveIntent::FORWARD, CameraIntent::empty());
            if report.blocked_by.is_some() {
                blocked = Some(report);
                break;
            }
        }

        let report = blocked.expect("vehicle never reached the wall");
        assert_eq!(report.velocity, 0.0);
        assert_eq!(scene.integrator().velocity(), 0.0);
        assert!(report.vehicle_position.z > 90.0);
        assert_eq!(first_collision(scene.vehicle(), scene.obstacles()), None);

        // The +Z wall's inner face is at z = 98.5
        let front = report.vehicle_position.z + scene.vehicle().half_extents().z;
        assert!(front <= 98.5);
    }

    #[test]
    fn test_chase_camera_sits_behind_and_above() {
        let mut scene = scene();
        for _ in 0..60 {
            scene.step(DELTA, DriveIntent::FORWARD | DriveIntent::TURN_LEFT, CameraIntent::empty());
        }
        for _ in 0..3 {
            idle(&mut scene);
        }

        let vehicle = scene.vehicle().position();
        let forward = scene.vehicle().transform().forward();
        let camera = scene.chase_camera();

        assert!(dot(&(camera.position() - vehicle), &forward) < 0.0);
        assert!(camera.position().y > vehicle.y);
        assert_relative_eq!(camera.target().x, vehicle.x, epsilon = 1e-3);
        assert_relative_eq!(camera.target().z, vehicle.z, epsilon = 1e-3);
        assert_relative_eq!(camera.target().y, vehicle.y + 2.0, epsilon = 1e-3);
    }

    #[test]
    fn test_overhead_camera_tracks_vehicle() {
        let mut scene = scene();
        assert_eq!(scene.toggle_camera(), CameraMode::Overhead);

        for _ in 0..45 {
            scene.step(DELTA, DriveIntent::FORWARD | DriveIntent::TURN_RIGHT, CameraIntent::empty());
        }

        let vehicle = scene.vehicle();
        let camera = scene.active_camera();
        assert_relative_eq!(camera.position().x, vehicle.position().x, epsilon = 1e-3);
        assert_relative_eq!(camera.position().z, vehicle.position().z, epsilon = 1e-3);
        assert_relative_eq!(camera.position().y, 80.0, epsilon = 1e-2);
        assert_relative_eq!(
            camera.angle_horizontal(),
            vehicle.transform().angle_horizontal(),
            epsilon = 1e-3
        );
        assert_eq!(scene.view_matrix(), scene.overhead_camera().view_matrix());

        assert_eq!(scene.toggle_camera(), CameraMode::Chase);
    }

    #[test]
    fn test_camera_cannot_revolve_below_ground() {
        let mut scene = scene();
        scene.toggle_camera();
        idle(&mut scene);

        scene.step(1.0, DriveIntent::empty(), CameraIntent::REVOLVE_UP);
        assert!(scene.overhead_camera().position().y >= scene.config().camera.min_height);
        assert_relative_eq!(scene.overhead_camera().position().y, 80.0, epsilon = 1e-2);
    }

    #[test]
    fn test_translate_intents_slide_vehicle() {
        let mut scene = scene();
        scene.step(1.0, DriveIntent::TRANSLATE_X_POS | DriveIntent::TRANSLATE_Y_POS, CameraIntent::empty());

        assert_relative_eq!(scene.vehicle().position(), Vec3::new(5.0, 5.375, 0.0), epsilon = 1e-4);
    }

    #[test]
    fn test_added_obstacle_blocks_vehicle() {
        let mut scene = scene();
        let barrier = scene.add_obstacle(
            CollidableBox::new()
                .with_position(Vec3::new(0.0, 0.5, 6.0))
                .with_scale(Vec3::new(10.0, 2.0, 1.0)),
        );

        let mut blocked_by = None;
        for _ in 0..600 {
            blocked_by = scene.step(DELTA, DriveIntent::FORWARD, CameraIntent::empty()).blocked_by;
            if blocked_by.is_some() {
                break;
            }
        }
        assert_eq!(blocked_by, Some(barrier));
        assert!(scene.vehicle().position().z < 6.0);
    }
}

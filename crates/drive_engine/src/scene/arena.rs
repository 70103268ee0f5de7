//! Walled arena the vehicle drives in
//!
//! The ground slab's top face is the `y = 0` plane. Each wall reaches from the
//! slab's bottom face up to `wall_height` above the ground.

use crate::core::config::ArenaConfig;
use crate::foundation::math::Vec3;
use crate::physics::collision::CollidableBox;

/// Static boxes making up the arena
#[derive(Debug, Clone)]
pub struct Arena {
    /// Ground slab; drawn but never collided with
    pub ground: CollidableBox,
    /// Boundary walls at +X, -X, +Z, -Z
    pub walls: [CollidableBox; 4],
}

impl Arena {
    /// Build the ground and the four boundary walls
    pub fn build(config: &ArenaConfig) -> Self {
        let size = config.size;
        let thickness = config.wall_thickness;
        let wall_center_y = (config.wall_height - config.ground_thickness) * 0.5;
        let wall_height = config.wall_height + config.ground_thickness;

        let ground = CollidableBox::new()
            .with_position(Vec3::new(0.0, -config.ground_thickness * 0.5, 0.0))
            .with_scale(Vec3::new(size, config.ground_thickness, size));

        let x_wall = |side: f32| {
            CollidableBox::new()
                .with_position(Vec3::new(side * (size + thickness) * 0.5, wall_center_y, 0.0))
                .with_scale(Vec3::new(thickness, wall_height, size + thickness))
        };
        let z_wall = |side: f32| {
            CollidableBox::new()
                .with_position(Vec3::new(0.0, wall_center_y, side * size * 0.5))
                .with_scale(Vec3::new(size, wall_height, thickness))
        };

        log::debug!("Built arena of size {} with {} thick walls", size, thickness);

        Self {
            ground,
            walls: [x_wall(1.0), x_wall(-1.0), z_wall(1.0), z_wall(-1.0)],
        }
    }
}

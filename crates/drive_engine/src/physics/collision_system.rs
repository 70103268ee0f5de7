//! Obstacle storage and the moving-box collision query
//!
//! Static obstacles live in a [`SlotMap`] keyed by [`BoxKey`]. Only one box
//! moves per frame and it is never stored alongside the obstacles, so the query
//! never has to skip the box against itself.

use slotmap::{new_key_type, SlotMap};

use crate::physics::collision::CollidableBox;

new_key_type! {
    /// Stable handle to an obstacle box
    pub struct BoxKey;
}

/// Static obstacles a moving box can collide with
pub type Obstacles = SlotMap<BoxKey, CollidableBox>;

/// First obstacle overlapping `moving`, in storage order
pub fn first_collision(moving: &CollidableBox, obstacles: &Obstacles) -> Option<BoxKey> {
    let hit = obstacles
        .iter()
        .find(|(_, obstacle)| moving.is_shape_inside(obstacle))
        .map(|(key, _)| key);

    if let Some(key) = hit {
        log::trace!("Box at {:?} overlaps obstacle {:?}", moving.position(), key);
    }
    hit
}

//! Movement intent flags
//!
//! Key polling happens outside the crate. Whoever owns the window maps held
//! keys onto these flag sets once per frame and hands them to
//! [`crate::scene::DrivingScene::step`].

use bitflags::bitflags;

bitflags! {
    /// Vehicle controls held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DriveIntent: u16 {
        /// Accelerate forwards
        const FORWARD = 1 << 0;
        /// Accelerate backwards
        const BACKWARD = 1 << 1;
        /// Steer left
        const TURN_LEFT = 1 << 2;
        /// Steer right
        const TURN_RIGHT = 1 << 3;
        /// Pitch the nose up
        const TURN_UP = 1 << 4;
        /// Pitch the nose down
        const TURN_DOWN = 1 << 5;
        /// Slide along world +X
        const TRANSLATE_X_POS = 1 << 6;
        /// Slide along world -X
        const TRANSLATE_X_NEG = 1 << 7;
        /// Slide along world +Y
        const TRANSLATE_Y_POS = 1 << 8;
        /// Slide along world -Y
        const TRANSLATE_Y_NEG = 1 << 9;
        /// Slide along world +Z
        const TRANSLATE_Z_POS = 1 << 10;
        /// Slide along world -Z
        const TRANSLATE_Z_NEG = 1 << 11;
    }
}

bitflags! {
    /// Camera controls held during a frame
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CameraIntent: u16 {
        /// Strafe the camera left
        const MOVE_LEFT = 1 << 0;
        /// Strafe the camera right
        const MOVE_RIGHT = 1 << 1;
        /// Raise the camera
        const MOVE_UP = 1 << 2;
        /// Lower the camera
        const MOVE_DOWN = 1 << 3;
        /// Orbit the target to the left
        const REVOLVE_LEFT = 1 << 4;
        /// Orbit the target to the right
        const REVOLVE_RIGHT = 1 << 5;
        /// Orbit up over the target
        const REVOLVE_UP = 1 << 6;
        /// Orbit down under the target
        const REVOLVE_DOWN = 1 << 7;
        /// Move closer to the target
        const ZOOM_IN = 1 << 8;
        /// Move away from the target
        const ZOOM_OUT = 1 << 9;
    }
}

/// Resolve a pair of opposing controls into a direction
///
/// `None` when neither or both are held, otherwise `Some(1.0)` for the positive
/// control and `Some(-1.0)` for the negative one.
pub fn axis(positive: bool, negative: bool) -> Option<f32> {
    match (positive, negative) {
        (true, false) => Some(1.0),
        (false, true) => Some(-1.0),
        _ => None,
    }
}

impl DriveIntent {
    /// Direction of a pair of opposing vehicle controls
    pub fn axis(self, positive: Self, negative: Self) -> Option<f32> {
        axis(self.contains(positive), self.contains(negative))
    }
}

impl CameraIntent {
    /// Direction of a pair of opposing camera controls
    pub fn axis(self, positive: Self, negative: Self) -> Option<f32> {
        axis(self.contains(positive), self.contains(negative))
    }
}

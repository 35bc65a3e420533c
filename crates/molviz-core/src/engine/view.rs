use nalgebra::Vector2;

pub const AUTO_ROTATE_SPEED: f64 = 0.01;
pub const DRAG_SENSITIVITY: f64 = 0.01;
pub const ZOOM_SENSITIVITY: f64 = 0.01;
pub const MIN_ZOOM_DISTANCE: f64 = 2.0;
pub const MAX_ZOOM_DISTANCE: f64 = 50.0;

const INITIAL_CAMERA_DISTANCE: f64 = 10.0;

/// Interactive view state: molecule rotation, camera distance and the
/// auto-rotation flag.
///
/// Rotation is stored as Euler angles in radians, `x` pitch and `y` yaw, and
/// applies to the molecule group rather than the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub rotation: Vector2<f64>,
    pub camera_distance: f64,
    pub auto_rotate: bool,
    drag_anchor: Option<Vector2<f64>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            rotation: Vector2::zeros(),
            camera_distance: INITIAL_CAMERA_DISTANCE,
            auto_rotate: false,
            drag_anchor: None,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Starts a drag at pointer position `(x, y)`. Auto-rotation stops at once.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag_anchor = Some(Vector2::new(x, y));
        self.auto_rotate = false;
    }

    /// Rotates by the pointer movement since the last event. Ignored when no
    /// drag is in progress.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let pointer = Vector2::new(x, y);
        let delta = pointer - anchor;
        self.rotation.y += delta.x * DRAG_SENSITIVITY;
        self.rotation.x += delta.y * DRAG_SENSITIVITY;
        self.drag_anchor = Some(pointer);
    }

    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Moves the camera by a wheel delta, clamped to the zoom range.
    pub fn zoom(&mut self, delta_y: f64) {
        self.camera_distance = (self.camera_distance + delta_y * ZOOM_SENSITIVITY)
            .clamp(MIN_ZOOM_DISTANCE, MAX_ZOOM_DISTANCE);
    }

    /// Advances one frame of auto-rotation.
    pub fn tick(&mut self) {
        if self.auto_rotate {
            self.rotation.y += AUTO_ROTATE_SPEED;
        }
    }

    /// Places the camera for a freshly rendered molecule and resumes
    /// auto-rotation. The distance is taken as is, outside the zoom clamp.
    pub fn fit(&mut self, distance: f64) {
        self.camera_distance = distance;
        self.auto_rotate = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-12;

    #[test]
    fn drag_rotates_by_pointer_delta() {
        let mut view = ViewState::new();
        view.begin_drag(100.0, 100.0);
        view.drag_to(110.0, 95.0);
        view.drag_to(120.0, 95.0);
        assert!((view.rotation.y - 0.2).abs() < TOL);
        assert!((view.rotation.x + 0.05).abs() < TOL);
        view.end_drag();
        view.drag_to(500.0, 500.0);
        assert!((view.rotation.y - 0.2).abs() < TOL);
    }

    #[test]
    fn drag_disables_auto_rotation() {
        let mut view = ViewState::new();
        view.fit(8.0);
        assert!(view.auto_rotate);
        view.begin_drag(0.0, 0.0);
        assert!(!view.auto_rotate);
        assert!(view.is_dragging());
        view.tick();
        assert_eq!(view.rotation.y, 0.0);
        view.end_drag();
        assert!(!view.auto_rotate);
    }

    #[test]
    fn tick_spins_about_y_when_enabled() {
        let mut view = ViewState::new();
        view.tick();
        assert_eq!(view.rotation.y, 0.0);
        view.fit(4.0);
        view.tick();
        view.tick();
        assert!((view.rotation.y - 0.02).abs() < TOL);
        assert_eq!(view.rotation.x, 0.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = ViewState::new();
        view.zoom(100.0);
        assert!((view.camera_distance - 11.0).abs() < TOL);
        view.zoom(-10_000.0);
        assert_eq!(view.camera_distance, MIN_ZOOM_DISTANCE);
        view.zoom(10_000.0);
        assert_eq!(view.camera_distance, MAX_ZOOM_DISTANCE);
    }

    #[test]
    fn fit_is_not_clamped_by_the_zoom_range() {
        let mut view = ViewState::new();
        view.fit(75.0);
        assert_eq!(view.camera_distance, 75.0);
        view.zoom(1.0);
        assert_eq!(view.camera_distance, MAX_ZOOM_DISTANCE);
    }
}

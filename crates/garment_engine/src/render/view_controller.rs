//! # Camera/View Controller
//!
//! Owns the camera pose and every way the shopper can change it: preset
//! buttons, zoom buttons, orbit drag with damped inertia, the mouse wheel
//! and held arrow keys. All of them funnel into one update path that keeps
//! the distance to the target within the configured bounds. Panning is not
//! supported; the target is always the centered garment at the origin.

use approx::relative_eq;

use super::camera::Camera;
use crate::config::{CameraConfig, ViewportConfig};
use crate::foundation::math::{constants, Spherical, Vec2, Vec3};
use crate::input::NudgeKeys;
use crate::scene::Aabb;

/// Inertia below this angular velocity is dropped
const MIN_ANGULAR_VELOCITY: f32 = 1e-5;

/// Named camera views offered by the view buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewPreset {
    /// Looking at the front of the garment
    Front,
    /// Front-right three-quarter view
    ThreeQuarterFront,
    /// Looking at the back
    Back,
    /// Back-left three-quarter view
    ThreeQuarterBack,
}

impl ViewPreset {
    /// All presets in button order
    pub const ALL: [ViewPreset; 4] = [
        ViewPreset::Front,
        ViewPreset::ThreeQuarterFront,
        ViewPreset::Back,
        ViewPreset::ThreeQuarterBack,
    ];

    /// Parse a button identifier (`front`, `3/4-front`, `back`, `3/4-back`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "front" => Some(ViewPreset::Front),
            "3/4-front" => Some(ViewPreset::ThreeQuarterFront),
            "back" => Some(ViewPreset::Back),
            "3/4-back" => Some(ViewPreset::ThreeQuarterBack),
            _ => None,
        }
    }

    /// Button identifier
    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Front => "front",
            ViewPreset::ThreeQuarterFront => "3/4-front",
            ViewPreset::Back => "back",
            ViewPreset::ThreeQuarterBack => "3/4-back",
        }
    }

    /// Unit direction from the target to the camera
    pub fn direction(self) -> Vec3 {
        let diagonal = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            ViewPreset::Front => Vec3::new(0.0, 0.0, 1.0),
            ViewPreset::ThreeQuarterFront => Vec3::new(diagonal, 0.0, diagonal),
            ViewPreset::Back => Vec3::new(0.0, 0.0, -1.0),
            ViewPreset::ThreeQuarterBack => Vec3::new(-diagonal, 0.0, -diagonal),
        }
    }
}

/// Zoom button direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoomDirection {
    /// Move closer
    In,
    /// Move away
    Out,
}

impl ZoomDirection {
    /// Parse a button identifier (`in`, `out`)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "in" => Some(ZoomDirection::In),
            "out" => Some(ZoomDirection::Out),
            _ => None,
        }
    }
}

/// Orbit camera controller
#[derive(Debug, Clone)]
pub struct ViewController {
    camera: Camera,
    settings: CameraConfig,
    reference_distance: f32,
    viewport_height: f32,
    drag_anchor: Option<Vec2>,
    /// Pending (theta, phi) rotation still to be applied by inertia
    angular_velocity: Vec2,
    held: NudgeKeys,
}

impl ViewController {
    /// Create a controller looking at the origin from the front
    pub fn new(settings: CameraConfig, viewport: &ViewportConfig) -> Self {
        let reference_distance = settings.min_distance;
        let camera = Camera::perspective(
            ViewPreset::Front.direction() * reference_distance,
            settings.fov_degrees,
            viewport.aspect_ratio(),
            settings.near,
            settings.far,
        );

        Self {
            camera,
            settings,
            reference_distance,
            viewport_height: viewport.height.max(1) as f32,
            drag_anchor: None,
            angular_velocity: Vec2::zeros(),
            held: NudgeKeys::empty(),
        }
    }

    /// Current camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Settings in use
    pub fn settings(&self) -> &CameraConfig {
        &self.settings
    }

    /// Distance the presets place the camera at
    pub fn reference_distance(&self) -> f32 {
        self.reference_distance
    }

    /// Current distance from the target
    pub fn distance(&self) -> f32 {
        self.camera.distance()
    }

    /// Navigation keys currently held
    pub fn held_keys(&self) -> NudgeKeys {
        self.held
    }

    /// Derive the reference distance from the garment bounds and show the front
    pub fn frame_bounds(&mut self, bounds: &Aabb) -> f32 {
        let distance = bounds.diagonal_length() * self.settings.reference_scale;
        if distance.is_finite() && distance > 0.0 {
            self.reference_distance = distance;
        } else {
            log::warn!("Cannot frame empty bounds, keeping reference distance {}", self.reference_distance);
        }
        log::debug!("Camera reference distance: {}", self.reference_distance);

        self.set_view(ViewPreset::Front);
        self.reference_distance
    }

    /// Jump to a preset view around the origin; returns whether the pose changed
    pub fn set_view(&mut self, preset: ViewPreset) -> bool {
        self.angular_velocity = Vec2::zeros();
        let retargeted = self.camera.target != Vec3::zeros();
        self.camera.set_target(Vec3::zeros());
        let moved = self.apply_offset(preset.direction() * self.reference_distance);
        log::debug!("Camera view '{}' at distance {}", preset.name(), self.distance());
        retargeted || moved
    }

    /// Preset view by button identifier; unknown identifiers are ignored
    pub fn set_view_named(&mut self, name: &str) -> bool {
        match ViewPreset::parse(name) {
            Some(preset) => self.set_view(preset),
            None => {
                log::debug!("Ignoring unknown camera view '{}'", name);
                false
            }
        }
    }

    /// Zoom button: scale the distance, or do nothing if that leaves the bounds
    pub fn zoom(&mut self, direction: ZoomDirection) -> bool {
        let factor = match direction {
            ZoomDirection::In => self.settings.zoom_in_factor,
            ZoomDirection::Out => self.settings.zoom_out_factor,
        };
        let distance = self.distance() * factor;
        if distance < self.settings.min_distance || distance > self.settings.max_distance {
            log::debug!("Zoom {:?} to {} rejected, outside distance bounds", direction, distance);
            return false;
        }
        self.apply_offset(self.camera.offset() * factor)
    }

    /// Mouse wheel: negative deltas move closer; the result is clamped to the bounds
    pub fn wheel(&mut self, delta_y: f32) -> bool {
        let scale = if delta_y < 0.0 {
            self.settings.wheel_zoom_base
        } else if delta_y > 0.0 {
            1.0 / self.settings.wheel_zoom_base
        } else {
            return false;
        };
        self.apply_offset(self.camera.offset() * scale)
    }

    /// Start an orbit drag at a pointer position
    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag_anchor = Some(Vec2::new(x, y));
    }

    /// Continue an orbit drag; rotation is applied with inertia by [`Self::update`]
    pub fn drag_to(&mut self, x: f32, y: f32) {
        let Some(anchor) = self.drag_anchor else {
            return;
        };
        let position = Vec2::new(x, y);
        let delta = position - anchor;
        self.drag_anchor = Some(position);

        // A full viewport height of travel is one full turn
        let turn = 2.0 * constants::PI * self.settings.rotate_speed / self.viewport_height;
        self.angular_velocity.x -= delta.x * turn;
        self.angular_velocity.y -= delta.y * turn;
    }

    /// Release an orbit drag; remaining inertia keeps decaying
    pub fn end_drag(&mut self) {
        self.drag_anchor = None;
    }

    /// Whether a drag is in progress
    pub fn is_dragging(&self) -> bool {
        self.drag_anchor.is_some()
    }

    /// Start nudging while the key is held
    pub fn press(&mut self, keys: NudgeKeys) {
        self.held.insert(keys);
    }

    /// Stop nudging in the released directions
    pub fn release(&mut self, keys: NudgeKeys) {
        self.held.remove(keys);
    }

    /// Whether [`Self::update`] would still move the camera
    pub fn is_animating(&self) -> bool {
        !self.held.is_empty() || self.angular_velocity.norm() > MIN_ANGULAR_VELOCITY
    }

    /// Advance one frame of keyboard nudging and drag inertia
    ///
    /// Returns whether the pose changed.
    pub fn update(&mut self) -> bool {
        if !self.is_animating() {
            self.angular_velocity = Vec2::zeros();
            return false;
        }

        let mut spherical = Spherical::from_vec3(&self.camera.offset());
        let step = self.settings.keyboard_step;
        let margin = self.settings.polar_margin;

        if self.held.contains(NudgeKeys::LEFT) {
            spherical.theta -= step;
        }
        if self.held.contains(NudgeKeys::RIGHT) {
            spherical.theta += step;
        }
        if self.held.contains(NudgeKeys::UP) {
            spherical.phi = (spherical.phi - step).max(margin);
        }
        if self.held.contains(NudgeKeys::DOWN) {
            spherical.phi = (spherical.phi + step).min(constants::PI - margin);
        }

        if self.angular_velocity.norm() > MIN_ANGULAR_VELOCITY {
            let damping = self.settings.damping_factor;
            spherical.theta += self.angular_velocity.x * damping;
            spherical.phi += self.angular_velocity.y * damping;
            spherical.clamp_phi(constants::POLAR_EPSILON);
            self.angular_velocity *= 1.0 - damping;
        } else {
            self.angular_velocity = Vec2::zeros();
        }

        self.apply_offset(spherical.to_vec3())
    }

    /// The single pose path: place the camera at `offset` from the target,
    /// clamping the distance into `[min_distance, max_distance]`
    fn apply_offset(&mut self, offset: Vec3) -> bool {
        let distance = offset
            .norm()
            .clamp(self.settings.min_distance, self.settings.max_distance);
        let direction = offset
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(|| ViewPreset::Front.direction());
        let position = self.camera.target + direction * distance;

        if relative_eq!(position, self.camera.position, epsilon = 1e-6) {
            return false;
        }
        self.camera.set_position(position);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controller(min: f32, max: f32) -> ViewController {
        let settings = CameraConfig {
            min_distance: min,
            max_distance: max,
            ..Default::default()
        };
        ViewController::new(settings, &ViewportConfig::default())
    }

    fn cube(half: f32) -> Aabb {
        Aabb::new(Vec3::repeat(-half), Vec3::repeat(half))
    }

    #[test]
    fn test_preset_names() {
        for preset in ViewPreset::ALL {
            assert_eq!(ViewPreset::parse(preset.name()), Some(preset));
            assert_relative_eq!(preset.direction().norm(), 1.0, epsilon = 1e-6);
        }
        assert_eq!(ViewPreset::parse("top"), None);
    }

    #[test]
    fn test_frame_bounds_sets_reference_distance() {
        let mut view = controller(5.0, 100.0);
        view.settings.reference_scale = 0.7;
        let bounds = Aabb::new(Vec3::new(-2.0, -3.0, -6.0), Vec3::new(2.0, 3.0, 6.0));

        let distance = view.frame_bounds(&bounds);
        assert_relative_eq!(distance, 9.8, epsilon = 1e-5);

        assert!(view.set_view(ViewPreset::Back));
        assert_relative_eq!(view.camera().position, Vec3::new(0.0, 0.0, -9.8), epsilon = 1e-5);
        assert_relative_eq!(view.camera().target, Vec3::zeros());
    }

    #[test]
    fn test_three_quarter_views_keep_distance() {
        let mut view = controller(5.0, 100.0);
        view.frame_bounds(&cube(10.0));
        view.set_view(ViewPreset::ThreeQuarterBack);
        let position = view.camera().position;
        assert!(position.x < 0.0 && position.z < 0.0);
        assert_relative_eq!(view.distance(), view.reference_distance(), epsilon = 1e-4);
    }

    #[test]
    fn test_unknown_view_is_ignored() {
        let mut view = controller(5.0, 100.0);
        let before = view.camera().clone();
        assert!(!view.set_view_named("isometric"));
        assert_eq!(view.camera(), &before);
    }

    #[test]
    fn test_zoom_rejected_at_minimum() {
        let mut view = controller(40.0, 100.0);
        view.set_view(ViewPreset::Front);
        assert_relative_eq!(view.distance(), 40.0);

        assert!(!view.zoom(ZoomDirection::In));
        assert_relative_eq!(view.distance(), 40.0);
    }

    #[test]
    fn test_zoom_rejected_at_maximum() {
        let mut view = controller(10.0, 100.0);
        view.frame_bounds(&cube(50.0));
        assert_relative_eq!(view.distance(), 100.0);

        assert!(!view.zoom(ZoomDirection::Out));
        assert_relative_eq!(view.distance(), 100.0);
        assert!(view.zoom(ZoomDirection::In));
        assert_relative_eq!(view.distance(), 90.0, epsilon = 1e-4);
    }

    #[test]
    fn test_zoom_keeps_direction() {
        let mut view = controller(1.0, 100.0);
        view.frame_bounds(&cube(10.0));
        view.set_view(ViewPreset::ThreeQuarterFront);
        let direction = view.camera().position.normalize();
        assert!(view.zoom(ZoomDirection::Out));
        assert_relative_eq!(view.camera().position.normalize(), direction, epsilon = 1e-5);
    }

    #[test]
    fn test_presets_clamp_to_bounds() {
        let mut view = controller(10.0, 100.0);
        view.frame_bounds(&cube(1.0));
        view.set_view(ViewPreset::Back);
        assert_relative_eq!(view.distance(), 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_wheel_zoom_clamps() {
        let mut view = controller(10.0, 100.0);
        view.set_view(ViewPreset::Front);
        assert!(!view.wheel(-1.0));
        assert_relative_eq!(view.distance(), 10.0);

        assert!(view.wheel(1.0));
        assert_relative_eq!(view.distance(), 10.0 / 0.95, epsilon = 1e-4);
        assert!(!view.wheel(0.0));
    }

    #[test]
    fn test_keyboard_nudge_rotates_while_held() {
        let mut view = controller(5.0, 100.0);
        view.frame_bounds(&cube(5.0));
        let start = Spherical::from_vec3(&view.camera().offset());

        view.press(NudgeKeys::RIGHT);
        assert!(view.update());
        assert!(view.update());
        let after = Spherical::from_vec3(&view.camera().offset());
        assert_relative_eq!(after.theta - start.theta, 2.0 * constants::PI / 80.0, epsilon = 1e-4);
        assert_relative_eq!(after.radius, start.radius, epsilon = 1e-4);

        view.release(NudgeKeys::RIGHT);
        assert!(!view.is_animating());
        assert!(!view.update());
    }

    #[test]
    fn test_keyboard_tilt_stops_short_of_pole() {
        let mut view = controller(5.0, 100.0);
        view.frame_bounds(&cube(5.0));
        view.press(NudgeKeys::UP);
        for _ in 0..200 {
            view.update();
        }
        let spherical = Spherical::from_vec3(&view.camera().offset());
        assert_relative_eq!(spherical.phi, 0.1, epsilon = 1e-4);
    }

    #[test]
    fn test_drag_inertia_decays() {
        let mut view = controller(5.0, 100.0);
        view.frame_bounds(&cube(5.0));

        view.begin_drag(100.0, 100.0);
        view.drag_to(150.0, 100.0);
        view.end_drag();
        assert!(view.is_animating());

        let start = Spherical::from_vec3(&view.camera().offset());
        assert!(view.update());
        let after = Spherical::from_vec3(&view.camera().offset());
        // Dragging right orbits towards negative theta
        assert!(after.theta < start.theta);

        let mut frames = 0;
        while view.update() {
            frames += 1;
            assert!(frames < 1000, "inertia never settled");
        }
        assert!(!view.is_animating());
    }

    #[test]
    fn test_drag_without_anchor_is_ignored() {
        let mut view = controller(5.0, 100.0);
        view.drag_to(10.0, 10.0);
        assert!(!view.is_animating());
        assert!(!view.is_dragging());
    }
}

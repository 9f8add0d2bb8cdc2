use glam::{Mat4, Vec3, Vec4Swizzles};
use serde::Serialize;

/// Where the camera sits and what it looks at.
///
/// Written by the focus controller during a flight or by the orbit
/// controller during a user drag, never by both in the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraState {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera orbits around and looks at.
    pub orbit_target: Vec3,
}

impl CameraState {
    /// Camera state from an eye position and orbit target.
    #[must_use]
    pub fn new(position: Vec3, orbit_target: Vec3) -> Self {
        Self {
            position,
            orbit_target,
        }
    }

    /// Offset from the orbit target to the eye.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.position - self.orbit_target
    }

    /// Whether both vectors are free of NaN and infinity.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.orbit_target.is_finite()
    }
}

/// Size of the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Canvas width in physical pixels.
    pub canvas_width: f32,
    /// Canvas height in physical pixels.
    pub canvas_height: f32,
    /// Physical pixels per CSS pixel.
    pub device_pixel_ratio: f32,
}

impl Viewport {
    /// Viewport from physical canvas size and device pixel ratio.
    #[must_use]
    pub fn new(canvas_width: f32, canvas_height: f32, device_pixel_ratio: f32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            device_pixel_ratio,
        }
    }

    /// Width / height, falling back to 1.0 for a collapsed canvas.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.canvas_height > 0.0 {
            self.canvas_width / self.canvas_height
        } else {
            1.0
        }
    }

    /// Canvas width in CSS pixels.
    #[must_use]
    pub fn css_width(&self) -> f32 {
        self.canvas_width / self.device_pixel_ratio
    }

    /// Canvas height in CSS pixels.
    #[must_use]
    pub fn css_height(&self) -> f32 {
        self.canvas_height / self.device_pixel_ratio
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0, 1.0)
    }
}

/// Integer CSS-pixel position of an overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScreenPoint {
    /// Distance from the left edge (`style.left`).
    pub x: i32,
    /// Distance from the top edge (`style.top`).
    pub y: i32,
}

/// Perspective camera defined by its state and projection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position and orbit target.
    pub state: CameraState,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Build the view matrix looking from the eye at the orbit target.
    #[must_use]
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.state.position, self.state.orbit_target, self.up)
    }

    /// Projection matrix with OpenGL [-1, 1] clip depth, matching the
    /// browser renderer's NDC convention.
    #[must_use]
    pub fn build_projection(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.build_projection() * self.build_view()
    }
}

/// Project a world point to normalized device coordinates.
#[must_use]
pub fn world_to_ndc(view_proj: &Mat4, point: Vec3) -> Vec3 {
    let clip = *view_proj * point.extend(1.0);
    clip.xyz() / clip.w
}

/// Map NDC x/y to integer CSS pixels.
///
/// `px = round((0.5 + nx/2) * width / dpr)`,
/// `py = round((0.5 - ny/2) * height / dpr)`, where `round` is
/// round-half-up like JavaScript's `Math.round`.
#[must_use]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, viewport: &Viewport) -> ScreenPoint {
    let x = (0.5 + ndc_x / 2.0) * viewport.css_width();
    let y = (0.5 - ndc_y / 2.0) * viewport.css_height();
    ScreenPoint {
        x: round_half_up(x),
        y: round_half_up(y),
    }
}

/// Project a world point straight to integer CSS pixels.
#[must_use]
pub fn project_to_screen(
    view_proj: &Mat4,
    point: Vec3,
    viewport: &Viewport,
) -> ScreenPoint {
    let ndc = world_to_ndc(view_proj, point);
    ndc_to_screen(ndc.x, ndc.y, viewport)
}

fn round_half_up(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ndc_corners_map_to_canvas_corners() {
        let vp = Viewport::new(800.0, 600.0, 1.0);
        assert_eq!(ndc_to_screen(-1.0, 1.0, &vp), ScreenPoint { x: 0, y: 0 });
        assert_eq!(ndc_to_screen(1.0, -1.0, &vp), ScreenPoint { x: 800, y: 600 });
        assert_eq!(ndc_to_screen(0.0, 0.0, &vp), ScreenPoint { x: 400, y: 300 });
    }

    #[test]
    fn device_pixel_ratio_divides_canvas_size() {
        let vp = Viewport::new(1600.0, 1200.0, 2.0);
        assert_eq!(ndc_to_screen(0.5, 0.5, &vp), ScreenPoint { x: 600, y: 150 });
    }

    #[test]
    fn rounding_matches_math_round() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.6), -3);
        assert_eq!(round_half_up(7.49), 7);
    }

    #[test]
    fn orbit_target_projects_to_center() {
        let camera = Camera {
            state: CameraState::new(Vec3::new(10.0, 20.0, 30.0), Vec3::ZERO),
            up: Vec3::Y,
            aspect: 4.0 / 3.0,
            fovy: 50.0,
            znear: 0.1,
            zfar: 5000.0,
        };
        let vp = Viewport::new(800.0, 600.0, 1.0);
        let p = project_to_screen(&camera.build_matrix(), Vec3::ZERO, &vp);
        assert_eq!(p, ScreenPoint { x: 400, y: 300 });
    }

    #[test]
    fn gl_depth_range_is_symmetric() {
        let camera = Camera {
            state: CameraState::new(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO),
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 90.0,
            znear: 1.0,
            zfar: 100.0,
        };
        let m = camera.build_matrix();
        let near = world_to_ndc(&m, Vec3::new(0.0, 0.0, 9.0));
        let far = world_to_ndc(&m, Vec3::new(0.0, 0.0, -90.0));
        assert!((near.z + 1.0).abs() < 1e-4);
        assert!((far.z - 1.0).abs() < 1e-4);
    }
}

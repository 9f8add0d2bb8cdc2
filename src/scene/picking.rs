//! Resolve pointer positions to building ids.
//!
//! The map only consumes the resolved id; [`PickResolver`] is the seam where
//! an external picking layer can replace the built-in [`ProxyPicker`].

use glam::{Quat, Vec3};

use super::building::{BuildingProxy, BuildingRegistry};
use crate::camera::core::{Camera, Viewport};

/// World-space ray with a normalized direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Ray origin (on the near plane for camera rays).
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    /// Ray through the given CSS-pixel position of the viewport.
    #[must_use]
    pub fn from_screen(camera: &Camera, viewport: &Viewport, x: f32, y: f32) -> Self {
        let ndc_x = x / viewport.css_width().max(1.0) * 2.0 - 1.0;
        let ndc_y = 1.0 - y / viewport.css_height().max(1.0) * 2.0;
        let inv = camera.build_matrix().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, -1.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Self {
            origin: near,
            dir: (far - near).normalize_or_zero(),
        }
    }

    /// Distance along the ray to the proxy's rotated box, if hit.
    #[must_use]
    pub fn hit_proxy(&self, proxy: &BuildingProxy) -> Option<f32> {
        let to_local = Quat::from_rotation_y(-proxy.rotation_y);
        let origin = to_local * (self.origin - proxy.position);
        let dir = to_local * self.dir;
        let half = proxy.size * 0.5;

        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;
        for axis in 0..3 {
            let (o, d, h) = (origin[axis], dir[axis], half[axis]);
            if d.abs() < 1e-8 {
                if o.abs() > h {
                    return None;
                }
                continue;
            }
            let inv_d = 1.0 / d;
            let (t0, t1) = {
                let a = (-h - o) * inv_d;
                let b = (h - o) * inv_d;
                if a <= b { (a, b) } else { (b, a) }
            };
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }
        Some(t_min)
    }
}

/// A pointer position to resolve against the scene.
#[derive(Debug, Clone, Copy)]
pub struct PickQuery<'a> {
    /// Camera the scene is drawn with.
    pub camera: &'a Camera,
    /// Current drawing surface.
    pub viewport: &'a Viewport,
    /// Pointer x in CSS pixels.
    pub x: f32,
    /// Pointer y in CSS pixels.
    pub y: f32,
}

/// Turns pointer positions into building ids.
pub trait PickResolver {
    /// Id of the building under the pointer, if any.
    fn pick(&self, registry: &BuildingRegistry, query: PickQuery<'_>) -> Option<String>;
}

/// CPU ray caster against the proxy boxes. Closest hit wins; ties go to the
/// building authored first.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProxyPicker;

impl PickResolver for ProxyPicker {
    fn pick(&self, registry: &BuildingRegistry, query: PickQuery<'_>) -> Option<String> {
        let ray = Ray::from_screen(query.camera, query.viewport, query.x, query.y);
        let mut best: Option<(f32, &BuildingProxy)> = None;
        for proxy in registry.iter() {
            let Some(t) = ray.hit_proxy(proxy) else {
                continue;
            };
            if best.is_none_or(|(bt, _)| t < bt) {
                best = Some((t, proxy));
            }
        }
        best.map(|(_, proxy)| proxy.id.clone())
    }
}

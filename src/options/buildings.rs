use glam::Vec3;

use crate::scene::BuildingProxy;

/// The campus layout shipped with the crate: one proxy per building with
/// its fly-to offset and annotation anchor.
#[must_use]
pub fn default_layout() -> Vec<BuildingProxy> {
    vec![
        building(
            "rst",
            "Overview",
            Vec3::new(0.0, 2.5, -100.0),
            Vec3::new(95.0, 60.0, 95.0),
            None,
            Vec3::ONE,
            0.0,
        ),
        building(
            "mainBldg",
            "Main building",
            Vec3::new(-35.0, 10.0, -40.5),
            Vec3::new(10.0, 20.0, 50.0),
            Some(Vec3::new(-25.0, 25.0, -50.0)),
            Vec3::new(30.0, 20.0, 10.0),
            0.0,
        ),
        building(
            "lib",
            "Library",
            Vec3::new(-14.0, 2.6, -130.0),
            Vec3::new(-25.0, 15.0, -45.0),
            Some(Vec3::new(-15.0, 5.0, -150.0)),
            Vec3::new(12.0, 4.9, 39.0),
            -3.2,
        ),
        building(
            "lab",
            "Laboratory",
            Vec3::new(-75.0, 7.0, -105.0),
            Vec3::new(40.0, 10.0, -55.0),
            Some(Vec3::new(-80.0, 20.0, -120.0)),
            Vec3::new(16.0, 18.0, 80.0),
            -3.28,
        ),
        building(
            "mensa",
            "Mensa",
            Vec3::new(-67.0, -0.5, -185.0),
            Vec3::new(50.0, 15.0, 30.0),
            Some(Vec3::new(-75.0, 10.0, -185.0)),
            Vec3::new(26.0, 9.7, 42.0),
            -3.31,
        ),
        building(
            "dorm",
            "Dormitory",
            Vec3::new(3.5, 12.15, -220.0),
            Vec3::new(25.0, 20.0, 55.0),
            Some(Vec3::new(-10.0, 30.0, -200.0)),
            Vec3::new(14.8, 25.0, 59.0),
            -3.37,
        ),
    ]
}

fn building(
    id: &str,
    label: &str,
    position: Vec3,
    focus_offset: Vec3,
    annotation_anchor: Option<Vec3>,
    size: Vec3,
    rotation_y: f32,
) -> BuildingProxy {
    BuildingProxy {
        id: id.to_owned(),
        label: label.to_owned(),
        position,
        focus_offset,
        annotation_anchor,
        size,
        rotation_y,
    }
}

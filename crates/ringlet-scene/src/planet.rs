//! Planet sphere, its ring, and the ambient light that shades them.

use glam::{Mat4, Vec2, Vec3};
use ringlet_config::{LightConfig, PlanetConfig, RingConfig};
use ringlet_core::Rgb;

use crate::camera::Ray;
use crate::color::{modulate, scale};

/// Rays closer to parallel with the ring plane than this miss it.
const PLANE_EPSILON: f32 = 1e-6;

/// Uniform light reaching every surface equally.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

impl AmbientLight {
    pub fn from_config(config: &LightConfig) -> Self {
        Self {
            color: config.color,
            intensity: config.intensity,
        }
    }

    /// Lit color of a surface with the given albedo.
    pub fn illuminate(&self, albedo: Rgb) -> Rgb {
        scale(modulate(albedo, self.color), self.intensity)
    }
}

/// A flat annulus attached to the planet.
///
/// The ring lies in its local XY plane. Its tilt is fixed at construction;
/// it still turns with the planet because its world transform is the
/// planet's transform times its own.
#[derive(Debug, Clone)]
pub struct Ring {
    inner_radius: f32,
    outer_radius: f32,
    color: Rgb,
    tilt: Vec2,
    local: Mat4,
}

impl Ring {
    pub fn new(config: &RingConfig) -> Self {
        let tilt = Vec2::new(config.tilt_x, config.tilt_y);
        Self {
            inner_radius: config.inner_radius,
            outer_radius: config.outer_radius,
            color: config.color,
            tilt,
            local: Mat4::from_rotation_x(tilt.x) * Mat4::from_rotation_y(tilt.y),
        }
    }

    /// Euler tilt (X then Y) relative to the planet.
    pub fn tilt(&self) -> Vec2 {
        self.tilt
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.local
    }

    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Distance along `ray` to the ring, seen from either side.
    ///
    /// `to_local` maps world space into the ring's own frame.
    pub fn intersect(&self, ray: &Ray, to_local: Mat4) -> Option<f32> {
        let origin = to_local.transform_point3(ray.origin);
        let direction = to_local.transform_vector3(ray.direction);

        if direction.z.abs() < PLANE_EPSILON {
            return None;
        }
        let t = -origin.z / direction.z;
        if t <= 0.0 {
            return None;
        }

        let radius = (origin + direction * t).truncate().length();
        (self.inner_radius..=self.outer_radius)
            .contains(&radius)
            .then_some(t)
    }
}

/// What a ray hit first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Distance along the ray.
    pub t: f32,
    /// Unlit surface color at the hit point.
    pub albedo: Rgb,
}

/// The spinning planet and its ring.
#[derive(Debug, Clone)]
pub struct Planet {
    radius: f32,
    color: Rgb,
    spin_step: f32,
    band_contrast: f32,
    bands: u32,
    yaw: f32,
    ring: Ring,
    ring_to_local: Mat4,
}

impl Planet {
    pub fn new(config: &PlanetConfig, ring: Ring) -> Self {
        let ring_to_local = ring.local_matrix().inverse();
        Self {
            radius: config.radius,
            color: config.color,
            spin_step: config.spin_step,
            band_contrast: config.band_contrast.clamp(0.0, 1.0),
            bands: config.bands,
            yaw: 0.0,
            ring,
            ring_to_local,
        }
    }

    /// Spin the planet by one step. The ring follows through the transform hierarchy.
    pub fn advance(&mut self) {
        self.yaw += self.spin_step;
        self.ring_to_local = (self.world_matrix() * self.ring.local_matrix()).inverse();
    }

    /// Accumulated rotation about Y in radians. Never wrapped.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn spin_step(&self) -> f32 {
        self.spin_step
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw)
    }

    /// Nearest surface of the planet or its ring along `ray`.
    pub fn hit(&self, ray: &Ray) -> Option<SurfaceHit> {
        let sphere = self.intersect_sphere(ray).map(|t| SurfaceHit {
            t,
            albedo: self.surface_color(ray.at(t)),
        });
        let ring = self
            .ring
            .intersect(ray, self.ring_to_local)
            .map(|t| SurfaceHit {
                t,
                albedo: self.ring.color,
            });

        match (sphere, ring) {
            (Some(s), Some(r)) => Some(if r.t < s.t { r } else { s }),
            (s, r) => s.or(r),
        }
    }

    fn intersect_sphere(&self, ray: &Ray) -> Option<f32> {
        let b = ray.origin.dot(ray.direction);
        let c = ray.origin.length_squared() - self.radius * self.radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let root = discriminant.sqrt();
        [-b - root, -b + root].into_iter().find(|t| *t > 0.0)
    }

    /// Surface color with longitude bands fixed to the planet, so the spin shows.
    fn surface_color(&self, world_point: Vec3) -> Rgb {
        if self.band_contrast == 0.0 || self.bands == 0 {
            return self.color;
        }
        let local = Mat4::from_rotation_y(-self.yaw).transform_point3(world_point);
        let longitude = local.x.atan2(local.z);
        let wave = (longitude * self.bands as f32).cos();
        scale(self.color, 1.0 - self.band_contrast * 0.5 * (1.0 - wave))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planet() -> Planet {
        Planet::new(&PlanetConfig::default(), Ring::new(&RingConfig::default()))
    }

    fn ray_down_z(x: f32, y: f32) -> Ray {
        Ray {
            origin: Vec3::new(x, y, 5.0),
            direction: Vec3::NEG_Z,
        }
    }

    #[test]
    fn test_yaw_advances_by_fixed_step() {
        let mut planet = planet();
        let tilt = planet.ring().tilt();
        let local = planet.ring().local_matrix();
        for frame in 1..=100 {
            let before = planet.yaw();
            planet.advance();
            assert!(planet.yaw() > before);
            assert!((planet.yaw() - before - 0.002).abs() < 1e-6);
            assert!((planet.yaw() - frame as f32 * 0.002).abs() < 1e-4);
        }
        assert_eq!(planet.ring().tilt(), tilt);
        assert_eq!(planet.ring().local_matrix(), local);
    }

    #[test]
    fn test_center_ray_hits_sphere_front() {
        let hit = planet().hit(&ray_down_z(0.0, 0.0)).unwrap();
        assert!((hit.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_far_ray_misses_everything() {
        assert!(planet().hit(&ray_down_z(3.0, 3.0)).is_none());
    }

    #[test]
    fn test_ring_hit_outside_sphere() {
        // Untilted ring faces the camera; a ray at radius 1.45 passes the sphere.
        let config = RingConfig {
            tilt_x: 0.0,
            tilt_y: 0.0,
            ..RingConfig::default()
        };
        let planet = Planet::new(&PlanetConfig::default(), Ring::new(&config));
        let hit = planet.hit(&ray_down_z(1.45, 0.0)).unwrap();
        assert_eq!(hit.albedo, Rgb::WHITE);
        assert!((hit.t - 5.0).abs() < 1e-4);

        // Inside the gap between sphere and ring.
        assert!(planet.hit(&ray_down_z(1.15, 0.0)).is_none());
    }

    #[test]
    fn test_ring_edge_on_is_missed() {
        let config = RingConfig {
            tilt_x: std::f32::consts::FRAC_PI_2,
            tilt_y: 0.0,
            ..RingConfig::default()
        };
        let ring = Ring::new(&config);
        let ray = Ray {
            origin: Vec3::new(0.0, 0.0, 5.0),
            direction: Vec3::NEG_Z,
        };
        assert!(ring.intersect(&ray, ring.local_matrix().inverse()).is_none());
    }

    #[test]
    fn test_bands_turn_with_planet() {
        let mut planet = planet();
        let point = Vec3::new(0.3, 0.0, 0.95).normalize();
        let before = planet.surface_color(point);
        for _ in 0..100 {
            planet.advance();
        }
        assert_ne!(planet.surface_color(point), before);
    }

    #[test]
    fn test_flat_planet_without_bands() {
        let config = PlanetConfig {
            band_contrast: 0.0,
            ..PlanetConfig::default()
        };
        let planet = Planet::new(&config, Ring::new(&RingConfig::default()));
        assert_eq!(planet.surface_color(Vec3::Z), Rgb::from_u32(0x800080));
    }

    #[test]
    fn test_ambient_light_scales_albedo() {
        let light = AmbientLight {
            color: Rgb::WHITE,
            intensity: 0.5,
        };
        assert_eq!(light.illuminate(Rgb::new(200, 100, 0)), Rgb::new(100, 50, 0));
    }
}

//! Perspective camera and screen-space projection.

use glam::{Mat4, Vec2, Vec3};
use ringlet_config::CameraConfig;
use ringlet_core::Viewport;

/// A perspective camera looking down -Z.
///
/// The projection matrix is cached; changing `aspect` (or any other lens
/// parameter) has no effect until [`PerspectiveCamera::update_projection_matrix`]
/// is called.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Width / height.
    pub aspect: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// World position.
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_deg: f32, aspect: f32, near: f32, far: f32, position: Vec3) -> Self {
        let mut camera = Self {
            fov_deg,
            aspect,
            near,
            far,
            position,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Camera on the +Z axis at the configured distance.
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self::new(
            config.fov_deg,
            aspect,
            config.near,
            config.far,
            Vec3::new(0.0, 0.0, config.distance),
        )
    }

    /// Recompute the cached projection from the lens parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Inverse of the camera's world transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position).inverse()
    }

    /// Combined view-projection matrix.
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

/// A half-line in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from the near plane through a point in normalized device coordinates.
    ///
    /// `inverse_view_projection` is the inverse of the camera's view-projection.
    pub fn through_ndc(inverse_view_projection: Mat4, ndc: Vec2) -> Self {
        let near = inverse_view_projection.project_point3(ndc.extend(-1.0));
        let far = inverse_view_projection.project_point3(ndc.extend(1.0));
        Self {
            origin: near,
            direction: (far - near).normalize(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Project a world-space point to pixel coordinates.
///
/// Normalized device coordinates in [-1, 1] map to `[0, width]` left to
/// right and `[0, height]` top to bottom. Points behind the camera or
/// outside the frustum are not clipped; they land wherever the
/// perspective divide puts them.
pub fn project_to_pixel(point: Vec3, view_projection: Mat4, viewport: Viewport) -> Vec2 {
    let ndc = view_projection.project_point3(point);
    Vec2::new(
        (ndc.x * 0.5 + 0.5) * viewport.width_f32(),
        (-ndc.y * 0.5 + 0.5) * viewport.height_f32(),
    )
}

/// Pixel center to normalized device coordinates, the inverse of the mapping
/// in [`project_to_pixel`].
pub fn pixel_to_ndc(x: f32, y: f32, viewport: Viewport) -> Vec2 {
    Vec2::new(
        x / viewport.width_f32() * 2.0 - 1.0,
        1.0 - y / viewport.height_f32() * 2.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(viewport: Viewport) -> PerspectiveCamera {
        PerspectiveCamera::from_config(&CameraConfig::default(), viewport.aspect())
    }

    #[test]
    fn test_origin_projects_to_center() {
        let viewport = Viewport::new(800, 600).unwrap();
        let vp = camera(viewport).view_projection();
        let pixel = project_to_pixel(Vec3::ZERO, vp, viewport);
        assert!((pixel.x - 400.0).abs() < 1e-3);
        assert!((pixel.y - 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_projection_is_symmetric_about_center() {
        let viewport = Viewport::new(800, 600).unwrap();
        let vp = camera(viewport).view_projection();
        let right = project_to_pixel(Vec3::new(1.0, 0.5, 0.0), vp, viewport);
        let left = project_to_pixel(Vec3::new(-1.0, -0.5, 0.0), vp, viewport);
        assert!((right.x + left.x - 800.0).abs() < 1e-3);
        assert!((right.y + left.y - 600.0).abs() < 1e-3);
        // +X is right, +Y is up (smaller pixel row).
        assert!(right.x > 400.0);
        assert!(right.y < 300.0);
    }

    #[test]
    fn test_frustum_edge_maps_to_top_row() {
        let viewport = Viewport::new(800, 600).unwrap();
        let cam = camera(viewport);
        let half_height = (cam.fov_deg.to_radians() / 2.0).tan() * cam.position.z;
        let pixel = project_to_pixel(
            Vec3::new(0.0, half_height, 0.0),
            cam.view_projection(),
            viewport,
        );
        assert!(pixel.y.abs() < 1e-2, "got {}", pixel.y);
    }

    #[test]
    fn test_aspect_change_requires_update() {
        let viewport = Viewport::new(800, 600).unwrap();
        let mut cam = camera(viewport);
        let before = cam.projection_matrix();

        cam.aspect = 1200.0 / 800.0;
        assert_eq!(cam.projection_matrix(), before);

        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
        assert_eq!(cam.aspect, 1.5);
    }

    #[test]
    fn test_point_behind_camera_is_not_clipped() {
        let viewport = Viewport::new(800, 600).unwrap();
        let vp = camera(viewport).view_projection();
        let pixel = project_to_pixel(Vec3::new(1.0, 1.0, 10.0), vp, viewport);
        // Mirrored through the center by the negative w divide.
        assert!(pixel.x < 400.0);
        assert!(pixel.y > 300.0);
    }

    #[test]
    fn test_center_ray_points_down_negative_z() {
        let viewport = Viewport::new(800, 600).unwrap();
        let inverse = camera(viewport).view_projection().inverse();
        let ray = Ray::through_ndc(inverse, Vec2::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-3);
        assert!((ray.origin.z - 4.9).abs() < 1e-2);
        assert!(ray.at(ray.origin.z).z.abs() < 1e-2);
    }

    #[test]
    fn test_pixel_to_ndc_inverts_projection_mapping() {
        let viewport = Viewport::new(800, 600).unwrap();
        assert_eq!(pixel_to_ndc(400.0, 300.0, viewport), Vec2::ZERO);
        assert_eq!(pixel_to_ndc(0.0, 0.0, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(pixel_to_ndc(800.0, 600.0, viewport), Vec2::new(1.0, -1.0));
    }
}

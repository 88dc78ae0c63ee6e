//! Pixel-space geometry to NDC model matrices.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use tableau_engine::coords::Viewport;

use crate::object::SceneObjectRef;

/// Model matrix placing the unit quad over an object's pixel rectangle.
///
/// `position` is the top-left corner and `size` the extent, both in logical
/// pixels with +Y down. The result is `translate · rotate(identity) · scale`
/// in NDC (+Y up).
pub fn model_transform(position: Vec4, size: Vec2, viewport: Viewport) -> Mat4 {
    let (half_w, half_h) = viewport.half_extent();

    let center_x = position.x + size.x / 2.0;
    let center_y = position.y + size.y / 2.0;

    let translation = Vec3::new(
        (center_x - half_w) / half_w,
        -((center_y - half_h) / half_h),
        0.0,
    );
    let scale = Vec3::new(size.x / half_w, size.y / half_h, 1.0);

    Mat4::from_scale_rotation_translation(scale, Quat::IDENTITY, translation)
}

/// Computes model matrices against one frame's viewport.
#[derive(Debug, Copy, Clone)]
pub struct TransformCalculator {
    viewport: Viewport,
}

impl TransformCalculator {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn model(&self, obj: &SceneObjectRef<'_>) -> Mat4 {
        model_transform(obj.position(), obj.size(), self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn centered_object_maps_to_origin() {
        let m = model_transform(Vec4::new(375.0, 275.0, 0.0, 1.0), Vec2::new(50.0, 50.0), VP);
        let (scale, rot, t) = m.to_scale_rotation_translation();
        assert!(approx(t, Vec3::ZERO));
        assert!(approx(scale, Vec3::new(0.125, 50.0 / 300.0, 1.0)));
        assert!(rot.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn top_left_corner_lands_on_ndc_corner() {
        let m = model_transform(Vec4::new(0.0, 0.0, 0.0, 1.0), Vec2::new(100.0, 60.0), VP);
        // Quad corner (-0.5, +0.5) is the object's top-left.
        let corner = m.transform_point3(Vec3::new(-0.5, 0.5, 0.0));
        assert!(approx(corner, Vec3::new(-1.0, 1.0, 0.0)));

        let far = m.transform_point3(Vec3::new(0.5, -0.5, 0.0));
        assert!(approx(far, Vec3::new(-0.75, 0.8, 0.0)));
    }

    #[test]
    fn y_axis_is_flipped() {
        let m = model_transform(Vec4::new(100.0, 100.0, 0.0, 1.0), Vec2::new(50.0, 50.0), VP);
        let t = m.w_axis.truncate();
        assert!(approx(t, Vec3::new(-0.6875, 175.0 / 300.0, 0.0)));
        assert!(t.y > 0.0);
    }
}

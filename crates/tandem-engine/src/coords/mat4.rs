use core::ops::Mul;

use super::Vec3;

/// 4x4 column-major matrix.
///
/// `cols[c][r]` is the element in column `c`, row `r`. The memory layout
/// matches a WGSL `mat4x4<f32>`, so the matrix can be uploaded as-is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    pub const ZERO: Self = Self { cols: [[0.0; 4]; 4] };

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Non-uniform scale. A zero component collapses that axis.
    #[inline]
    pub fn from_scale(s: Vec3) -> Self {
        Self::from_cols([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    #[inline]
    pub fn from_translation(t: Vec3) -> Self {
        Self::from_cols([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    /// Right-handed rotation of `radians` about `axis`.
    ///
    /// `axis` is normalized first; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let a = axis.normalize_or_zero();
        if a == Vec3::ZERO {
            return Self::IDENTITY;
        }

        let (s, c) = radians.sin_cos();
        let t = 1.0 - c;

        Self::from_cols([
            [t * a.x * a.x + c, t * a.x * a.y + s * a.z, t * a.x * a.z - s * a.y, 0.0],
            [t * a.y * a.x - s * a.z, t * a.y * a.y + c, t * a.y * a.z + s * a.x, 0.0],
            [t * a.z * a.x + s * a.y, t * a.z * a.y - s * a.x, t * a.z * a.z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed orthographic projection with a `[0, 1]` depth range.
    ///
    /// The x/y mapping is the same as `glOrtho`; only depth differs, since
    /// wgpu clips z to `[0, 1]`.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rl = right - left;
        let tb = top - bottom;
        let fnr = far - near;

        Self::from_cols([
            [2.0 / rl, 0.0, 0.0, 0.0],
            [0.0, 2.0 / tb, 0.0, 0.0],
            [0.0, 0.0, -1.0 / fnr, 0.0],
            [-(right + left) / rl, -(top + bottom) / tb, -near / fnr, 1.0],
        ])
    }

    /// Returns `self * S(s)`.
    #[inline]
    pub fn scale(self, s: Vec3) -> Self {
        self * Self::from_scale(s)
    }

    /// Returns `self * R(axis, radians)`.
    #[inline]
    pub fn rotate(self, radians: f32, axis: Vec3) -> Self {
        self * Self::from_axis_angle(axis, radians)
    }

    /// Returns `self * T(t)`.
    #[inline]
    pub fn translate(self, t: Vec3) -> Self {
        self * Self::from_translation(t)
    }

    /// Transforms a point (w = 1) and drops w.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let m = &self.cols;
        Vec3::new(
            m[0][0] * p.x + m[1][0] * p.y + m[2][0] * p.z + m[3][0],
            m[0][1] * p.x + m[1][1] * p.y + m[2][1] * p.z + m[3][1],
            m[0][2] * p.x + m[1][2] * p.y + m[2][2] * p.z + m[3][2],
        )
    }

    /// Returns the translation column.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.cols[3][0], self.cols[3][1], self.cols[3][2])
    }

    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        self.cols
    }

    /// Element-wise comparison within `eps`.
    pub fn abs_diff_eq(&self, other: &Mat4, eps: f32) -> bool {
        self.cols
            .iter()
            .flatten()
            .zip(other.cols.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0f32; 4]; 4];

        for (c, col) in out.iter_mut().enumerate() {
            for (r, v) in col.iter_mut().enumerate() {
                *v = a[0][r] * b[c][0] + a[1][r] * b[c][1] + a[2][r] * b[c][2] + a[3][r] * b[c][3];
            }
        }

        Mat4 { cols: out }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn v_close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() <= EPS
    }

    // ── products ──────────────────────────────────────────────────────────

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))
            * Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn product_applies_right_operand_first() {
        let t = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let s = Mat4::from_scale(Vec3::new(2.0, 2.0, 2.0));
        // T * S: scale, then translate.
        assert!(v_close((t * s).transform_point(Vec3::X), Vec3::new(3.0, 0.0, 0.0)));
        // S * T: translate, then scale.
        assert!(v_close((s * t).transform_point(Vec3::X), Vec3::new(4.0, 0.0, 0.0)));
    }

    #[test]
    fn helpers_right_multiply() {
        let base = Mat4::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let s = Vec3::new(1.5, 1.5, 0.0);
        assert_eq!(base.scale(s), base * Mat4::from_scale(s));

        let t = Vec3::new(0.5, 0.0, 0.0);
        assert_eq!(base.translate(t), base * Mat4::from_translation(t));
    }

    // ── rotation ──────────────────────────────────────────────────────────

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let r = Mat4::from_axis_angle(Vec3::Z, core::f32::consts::FRAC_PI_2);
        assert!(v_close(r.transform_point(Vec3::X), Vec3::Y));
    }

    #[test]
    fn negative_axis_rotates_clockwise() {
        let a = Mat4::from_axis_angle(-Vec3::Z, 0.3);
        let b = Mat4::from_axis_angle(Vec3::Z, -0.3);
        assert!(a.abs_diff_eq(&b, EPS));
    }

    #[test]
    fn axis_is_normalized() {
        let a = Mat4::from_axis_angle(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let b = Mat4::from_axis_angle(Vec3::Z, 1.0);
        assert!(a.abs_diff_eq(&b, EPS));
    }

    #[test]
    fn zero_angle_is_identity() {
        assert_eq!(Mat4::from_axis_angle(Vec3::Z, 0.0), Mat4::IDENTITY);
    }

    // ── scale / translate ─────────────────────────────────────────────────

    #[test]
    fn zero_z_scale_flattens_depth() {
        let m = Mat4::from_scale(Vec3::new(1.2, 1.2, 0.0));
        assert!(v_close(m.transform_point(Vec3::new(1.0, 1.0, 1.0)), Vec3::new(1.2, 1.2, 0.0)));
    }

    #[test]
    fn translation_column() {
        let m = Mat4::IDENTITY.translate(Vec3::new(0.5, 0.0, 0.0));
        assert_eq!(m.translation(), Vec3::new(0.5, 0.0, 0.0));
    }

    // ── projection ────────────────────────────────────────────────────────

    #[test]
    fn orthographic_maps_bounds_to_ndc() {
        let p = Mat4::orthographic(-5.0, 5.0, -3.75, 3.75, -1.0, 1.0);
        assert!(v_close(p.transform_point(Vec3::new(5.0, 3.75, 0.0)), Vec3::new(1.0, 1.0, 0.5)));
        assert!(v_close(p.transform_point(Vec3::new(-5.0, -3.75, 0.0)), Vec3::new(-1.0, -1.0, 0.5)));
        assert!(v_close(p.transform_point(Vec3::new(0.0, 0.0, -1.0)), Vec3::new(0.0, 0.0, 1.0)));
    }
}

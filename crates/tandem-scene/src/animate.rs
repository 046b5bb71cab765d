//! Per-frame animation.
//!
//! Transforms are never reset: every frame right-multiplies a small
//! increment onto the accumulated matrix, so the pose depends on the whole
//! history of frame deltas rather than on total elapsed time.

use tandem_engine::coords::{Mat4, Vec3};

use crate::state::{PulsePhase, SceneState};

/// Seconds the pulsing sprite spends growing (or shrinking) before it turns.
pub const PULSE_PERIOD: f32 = 2.0;

/// Fractional X/Y scale change per second while pulsing.
pub const SCALE_RATE: f32 = 0.2;

/// Spin rate of both sprites.
pub const ROTATE_DEGREES_PER_SEC: f32 = 30.0;

/// Local-frame X drift of the orbiting sprite, in world units per second.
pub const TRANSLATE_SPEED: f32 = 0.5;

/// Advances the scene by `dt` seconds.
///
/// A zero, negative or non-finite `dt` is a no-op.
pub fn update(state: &mut SceneState, dt: f32) {
    if !(dt.is_finite() && dt > 0.0) {
        return;
    }

    if advance_pulse(&mut state.pulse, dt) {
        log::debug!(
            "pulse phase -> {} (carry {:.3}s)",
            if state.pulse.growing { "growing" } else { "shrinking" },
            state.pulse.time_stack
        );
    }

    state.chrome.transform = pulse_step(state.chrome.transform, state.pulse.growing, dt);
    state.firefox.transform = orbit_step(state.firefox.transform, dt);
}

/// Adds `dt` to the phase clock and flips the phase once the period is
/// reached, carrying the remainder. Returns true on a flip.
///
/// At most one flip per call; after a long stall `time_stack` may still be
/// at or above the period and the next call flips again.
pub fn advance_pulse(pulse: &mut PulsePhase, dt: f32) -> bool {
    pulse.time_stack += dt;
    if pulse.time_stack >= PULSE_PERIOD {
        pulse.time_stack -= PULSE_PERIOD;
        pulse.growing = !pulse.growing;
        return true;
    }
    false
}

/// `M · Scale(f, f, 0) · Rotate(30°·dt, -Z)` with `f = 1 ± 0.2·dt`.
pub fn pulse_step(transform: Mat4, growing: bool, dt: f32) -> Mat4 {
    let rate = if growing { SCALE_RATE } else { -SCALE_RATE };
    let f = 1.0 + rate * dt;

    transform
        .scale(Vec3::new(f, f, 0.0))
        .rotate(spin(dt), -Vec3::Z)
}

/// `M · Rotate(30°·dt, +Z) · Translate(0.5·dt, 0, 0)`.
pub fn orbit_step(transform: Mat4, dt: f32) -> Mat4 {
    transform
        .rotate(spin(dt), Vec3::Z)
        .translate(Vec3::new(TRANSLATE_SPEED * dt, 0.0, 0.0))
}

#[inline]
fn spin(dt: f32) -> f32 {
    (ROTATE_DEGREES_PER_SEC * dt).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_engine::scene::TextureId;

    const EPS: f32 = 1e-5;

    fn scene() -> SceneState {
        SceneState::new(TextureId(0), TextureId(1))
    }

    // ── pulse ────────────────────────────────────────────────────────────

    #[test]
    fn one_second_growing_scales_then_spins_clockwise() {
        let mut s = scene();
        update(&mut s, 1.0);

        let expected = Mat4::from_scale(Vec3::new(1.2, 1.2, 0.0))
            * Mat4::from_axis_angle(Vec3::new(0.0, 0.0, -1.0), 30f32.to_radians());

        assert!(s.chrome.transform.abs_diff_eq(&expected, EPS));
        assert!(s.pulse.growing);
        assert!((s.pulse.time_stack - 1.0).abs() < EPS);
    }

    #[test]
    fn phase_flips_once_when_period_is_reached() {
        let mut s = scene();
        update(&mut s, 1.0);
        update(&mut s, 1.0);

        assert!(!s.pulse.growing);
        assert_eq!(s.pulse.time_stack, 0.0);

        update(&mut s, 1.0);
        assert!(!s.pulse.growing);
        assert_eq!(s.pulse.time_stack, 1.0);

        update(&mut s, 1.0);
        assert!(s.pulse.growing);
    }

    #[test]
    fn overflow_carries_remainder() {
        let mut p = PulsePhase::default();
        assert!(!advance_pulse(&mut p, 1.5));
        assert!(advance_pulse(&mut p, 1.0));
        assert!(!p.growing);
        assert!((p.time_stack - 0.5).abs() < EPS);
    }

    #[test]
    fn long_stall_flips_only_once_per_call() {
        let mut p = PulsePhase::default();
        assert!(advance_pulse(&mut p, 5.0));
        assert!(!p.growing);
        assert!((p.time_stack - 3.0).abs() < EPS);

        // The leftover period is consumed by the next call.
        assert!(advance_pulse(&mut p, 0.0));
        assert!(p.growing);
        assert!((p.time_stack - 1.0).abs() < EPS);
    }

    #[test]
    fn shrinking_uses_reduced_factor() {
        let m = pulse_step(Mat4::IDENTITY, false, 1.0);
        let expected = Mat4::from_scale(Vec3::new(0.8, 0.8, 0.0))
            * Mat4::from_axis_angle(-Vec3::Z, 30f32.to_radians());
        assert!(m.abs_diff_eq(&expected, EPS));
    }

    #[test]
    fn pulse_composes_in_local_frame() {
        let prior = Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0));
        let m = pulse_step(prior, true, 1.0);

        let expected = prior
            * Mat4::from_scale(Vec3::new(1.2, 1.2, 0.0))
            * Mat4::from_axis_angle(-Vec3::Z, 30f32.to_radians());
        assert!(m.abs_diff_eq(&expected, EPS));

        // Scaling about the object's own origin leaves its placement alone.
        let t = m.translation();
        assert!((t.x - 1.0).abs() < EPS && t.y.abs() < EPS);
    }

    #[test]
    fn pulse_collapses_z_axis() {
        let m = pulse_step(Mat4::IDENTITY, true, 0.016);
        let p = m.transform_point(Vec3::new(0.0, 0.0, 1.0));
        assert!(p.z.abs() < EPS);
    }

    // ── orbit ────────────────────────────────────────────────────────────

    #[test]
    fn orbit_moves_along_rotated_x() {
        let mut s = scene();
        update(&mut s, 1.0);

        let t = s.firefox.transform.translation();
        let a = 30f32.to_radians();
        assert!((t.x - 0.5 * a.cos()).abs() < EPS);
        assert!((t.y - 0.5 * a.sin()).abs() < EPS);
        assert!(t.z.abs() < EPS);
    }

    #[test]
    fn orbit_accumulates_in_local_frame() {
        let once = orbit_step(orbit_step(Mat4::IDENTITY, 1.0), 1.0);
        let expected = Mat4::from_axis_angle(Vec3::Z, 30f32.to_radians())
            * Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0))
            * Mat4::from_axis_angle(Vec3::Z, 30f32.to_radians())
            * Mat4::from_translation(Vec3::new(0.5, 0.0, 0.0));
        assert!(once.abs_diff_eq(&expected, EPS));
    }

    // ── boundaries ───────────────────────────────────────────────────────

    #[test]
    fn zero_dt_changes_nothing() {
        let mut s = scene();
        update(&mut s, 0.7);
        let before = s.clone();

        update(&mut s, 0.0);
        assert_eq!(s, before);
    }

    #[test]
    fn negative_or_nan_dt_is_ignored() {
        let mut s = scene();
        let before = s.clone();

        update(&mut s, -1.0);
        update(&mut s, f32::NAN);
        assert_eq!(s, before);
    }

    #[test]
    fn same_deltas_give_identical_matrices() {
        let deltas = [0.016, 0.017, 0.5, 1.9, 0.0, 0.033, 2.5];

        let mut a = scene();
        let mut b = scene();
        for dt in deltas {
            update(&mut a, dt);
            update(&mut b, dt);
            assert_eq!(a.chrome.transform.cols, b.chrome.transform.cols);
            assert_eq!(a.firefox.transform.cols, b.firefox.transform.cols);
        }
        assert_eq!(a.pulse, b.pulse);
    }
}

//! Easing curves for the purely visual dead-effect animations

/// Overshoot constant of the "back" curve
const BACK_C1: f32 = 1.70158;
const BACK_C3: f32 = BACK_C1 + 1.0;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease-in: slow start, fast finish
#[inline]
pub fn ease_in_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Back ease-in: dips below 0 before accelerating toward 1
#[inline]
pub fn ease_in_back(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    BACK_C3 * t * t * t - BACK_C1 * t * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        for f in [ease_in_cubic, ease_in_back] {
            assert!(f(0.0).abs() < 1e-5);
            assert!((f(1.0) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_back_curve_dips() {
        assert!(ease_in_back(0.2) < 0.0);
        assert!(ease_in_back(0.9) < 1.0);
    }

    #[test]
    fn test_inputs_are_clamped() {
        assert_eq!(ease_in_cubic(2.0), 1.0);
        assert_eq!(ease_in_cubic(-1.0), 0.0);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}

//! Type definition of Float, otherwise constants and functions which
//! can be used almost everywhere else in the code.

// std
use std;
use std::f32::consts::PI;

pub type Float = f32;

pub const MACHINE_EPSILON: Float = std::f32::EPSILON * 0.5;
pub const INV_PI: Float = 0.318_309_886_183_790_671_54;
pub const INV_2_PI: Float = 0.159_154_943_091_895_335_77;

/// Error propagation.
pub fn gamma(n: i32) -> Float {
    (n as Float * MACHINE_EPSILON) / (1.0 - n as Float * MACHINE_EPSILON)
}

/// Is used to write sRGB-compatible 8-bit image files.
pub fn gamma_correct(value: Float) -> Float {
    if value <= 0.003_130_8 {
        12.92 * value
    } else {
        1.055 as Float * value.powf((1.0 / 2.4) as Float) - 0.055
    }
}

/// Clamp the given value *val* to lie between the values *low* and *high*.
pub fn clamp_t<T>(val: T, low: T, high: T) -> T
where
    T: PartialOrd,
{
    if val < low {
        low
    } else if val > high {
        high
    } else {
        val
    }
}

/// Convert from angles expressed in degrees to radians.
pub fn radians(deg: Float) -> Float {
    (PI / 180.0) * deg
}

/// Interpolate linearly between two provided values.
pub fn lerp(t: Float, a: Float, b: Float) -> Float {
    (1.0 - t) * a + t * b
}

/// Find solution(s) of the quadratic equation at<sup>2</sup> + bt + c = 0.
pub fn quadratic(a: Float, b: Float, c: Float, t0: &mut Float, t1: &mut Float) -> bool {
    // find quadratic discriminant
    let discrim: f64 = (b as f64) * (b as f64) - 4.0 * (a as f64) * (c as f64);
    if discrim < 0.0 {
        false
    } else {
        let root_discrim: f64 = discrim.sqrt();
        // compute quadratic _t_ values
        let q = if b < 0.0 {
            -0.5 * (b as f64 - root_discrim)
        } else {
            -0.5 * (b as f64 + root_discrim)
        };
        *t0 = q as Float / a;
        *t1 = c / q as Float;
        if *t0 > *t1 {
            std::mem::swap(&mut (*t0), &mut (*t1))
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn quadratic_two_roots() {
        let mut t0: Float = 0.0;
        let mut t1: Float = 0.0;
        // (t - 1) * (t - 3)
        assert!(quadratic(1.0, -4.0, 3.0, &mut t0, &mut t1));
        assert!((t0 - 1.0).abs() < 1e-6);
        assert!((t1 - 3.0).abs() < 1e-6);
    }

    #[test]
    fn quadratic_no_root() {
        let mut t0: Float = 0.0;
        let mut t1: Float = 0.0;
        assert!(!quadratic(1.0, 0.0, 1.0, &mut t0, &mut t1));
    }

    #[test]
    fn clamp_and_lerp() {
        assert_eq!(clamp_t(5, 0, 3), 3);
        assert_eq!(clamp_t(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(lerp(0.25, 0.0, 4.0), 1.0);
    }
}

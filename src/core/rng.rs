//! Random Number Generator

use hexf::*;

// pbrt
use crate::core::pbrt::Float;

// see rng.h

pub const FLOAT_ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1");
pub const PCG32_DEFAULT_STATE: u64 = 0x853c_49e6_748f_ea9b;
pub const PCG32_DEFAULT_STREAM: u64 = 0xda3e_39cb_94b9_5bdb;
pub const PCG32_MULT: u64 = 0x5851_f42d_4c95_7f2d;

/// Random number generator (PCG32), used to create reproducible
/// scenes and rays for tests and benchmarks.
#[derive(Debug, Copy, Clone)]
pub struct Rng {
    state: u64,
    inc: u64,
}

impl Default for Rng {
    fn default() -> Self {
        Rng::new()
    }
}

impl Rng {
    pub fn new() -> Self {
        Rng {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
    pub fn with_sequence(initseq: u64) -> Self {
        let mut rng = Rng::new();
        rng.set_sequence(initseq);
        rng
    }
    pub fn set_sequence(&mut self, initseq: u64) {
        self.state = 0_u64;
        self.inc = initseq.wrapping_shl(1) | 1;
        self.uniform_uint32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_uint32();
    }
    pub fn uniform_uint32(&mut self) -> u32 {
        let oldstate: u64 = self.state;
        // C++: state = oldstate * PCG32_MULT + inc;
        self.state = oldstate.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);
        // C++: uint32_t xorshifted = (uint32_t)(((oldstate >> 18u) ^ oldstate) >> 27u);
        let xorshifted: u32 = (oldstate.wrapping_shr(18) ^ oldstate).wrapping_shr(27) as u32;
        // C++: uint32_t rot = (uint32_t)(oldstate >> 59u);
        let rot: u32 = oldstate.wrapping_shr(59) as u32;
        // C++: return (xorshifted >> rot) | (xorshifted << ((~rot + 1u) & 31));
        xorshifted.wrapping_shr(rot) | xorshifted.wrapping_shl(rot.wrapping_neg() & 31)
    }
    pub fn uniform_uint32_bounded(&mut self, b: u32) -> u32 {
        assert!(b > 0_u32);
        let threshold: u32 = b.wrapping_neg() % b;
        loop {
            let r = self.uniform_uint32();
            if r >= threshold {
                return r % b;
            }
        }
    }
    /// Uniform value in `[0, 1)`.
    pub fn uniform_float(&mut self) -> Float {
        (self.uniform_uint32() as Float * hexf32!("0x1.0p-32") as Float)
            .min(FLOAT_ONE_MINUS_EPSILON)
    }
    /// Uniform value in `[low, high)`.
    pub fn uniform_float_in(&mut self, low: Float, high: Float) -> Float {
        low + (high - low) * self.uniform_float()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn same_sequence_same_numbers() {
        let mut a = Rng::with_sequence(7);
        let mut b = Rng::with_sequence(7);
        let mut c = Rng::with_sequence(8);
        let va: Vec<u32> = (0..16).map(|_| a.uniform_uint32()).collect();
        let vb: Vec<u32> = (0..16).map(|_| b.uniform_uint32()).collect();
        let vc: Vec<u32> = (0..16).map(|_| c.uniform_uint32()).collect();
        assert_eq!(va, vb);
        assert_ne!(va, vc);
    }

    #[test]
    fn floats_stay_in_range() {
        let mut rng = Rng::new();
        for _ in 0..1000 {
            let f = rng.uniform_float();
            assert!((0.0..1.0).contains(&f));
            let g = rng.uniform_float_in(-2.0, 3.0);
            assert!((-2.0..3.0).contains(&g));
            assert!(rng.uniform_uint32_bounded(12) < 12);
        }
    }
}

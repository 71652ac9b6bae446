/// Small deterministic PRNG (SplitMix64).
///
/// Every random choice in the effect (scatter positions, radii, drift legs, orbit phase,
/// shuffle permutations) is drawn from one of these, so a fixed seed replays the same
/// animation.
#[derive(Clone, Copy, Debug)]
pub struct Rng64 {
    state: u64,
}

impl Rng64 {
    /// Seed a new generator.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform value in `[0, 1)`.
    pub fn next_f64_01(&mut self) -> f64 {
        // 53 bits of precision.
        let v = self.next_u64() >> 11;
        (v as f64) * (1.0 / ((1u64 << 53) as f64))
    }

    /// Uniform value between `min` and `max`.
    pub fn range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64_01()
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        let i = (self.next_f64_01() * n as f64) as usize;
        i.min(n - 1)
    }

    /// `1.0` or `-1.0` with equal probability.
    pub fn sign(&mut self) -> f64 {
        if self.next_u64() >> 63 == 0 { 1.0 } else { -1.0 }
    }

    /// Derive an independent generator, leaving `self` advanced by one step.
    pub fn fork(&mut self) -> Self {
        Self::new(self.next_u64() ^ 0xD6E8_FEB8_6659_FD93)
    }
}

/// Uniformly random permutation of `0..n` (Fisher-Yates).
///
/// `perm[i]` is the index whose slot `i` receives; every index appears exactly once.
pub fn permutation(n: usize, rng: &mut Rng64) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = rng.below(i + 1);
        perm.swap(i, j);
    }
    perm
}

#[cfg(test)]
#[path = "../../tests/unit/animation/rng.rs"]
mod tests;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Source of the zero-mean perturbation added to leaf scores during search.
/// Drawn afresh on every call.
pub trait NoiseSource {
    fn sample_cp(&mut self) -> i32;
}

/// No perturbation; full-strength, deterministic play.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNoise;

impl NoiseSource for NoNoise {
    fn sample_cp(&mut self) -> i32 { 0 }
}

/// Uniform noise in `[-amplitude, +amplitude]` centipawns.
#[derive(Debug, Clone)]
pub struct EvalNoise<R: Rng = SmallRng> {
    rng: R,
    amplitude_cp: f64,
}

impl<R: Rng> EvalNoise<R> {
    pub fn new(rng: R, amplitude_cp: f64) -> Self { Self { rng, amplitude_cp: amplitude_cp.max(0.0) } }
    pub fn amplitude_cp(&self) -> f64 { self.amplitude_cp }
}

impl EvalNoise<SmallRng> {
    pub fn seeded(amplitude_cp: f64, seed: u64) -> Self { Self::new(SmallRng::seed_from_u64(seed), amplitude_cp) }
}

impl<R: Rng> NoiseSource for EvalNoise<R> {
    fn sample_cp(&mut self) -> i32 {
        if self.amplitude_cp <= 0.0 { return 0; }
        let u: f64 = self.rng.gen_range(-1.0..=1.0);
        (u * self.amplitude_cp).round() as i32
    }
}

impl<N: NoiseSource + ?Sized> NoiseSource for &mut N {
    fn sample_cp(&mut self) -> i32 { (**self).sample_cp() }
}

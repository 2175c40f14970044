use rand::Rng;

/// Source of uniform samples in `[-0.5, 0.5)`
pub trait UniformSource {
    fn sample(&mut self) -> f32;
}

/// Adapts any `rand` generator
#[derive(Debug, Clone)]
pub struct RandSource<R> {
    rng: R,
}

impl<R: Rng> RandSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> UniformSource for RandSource<R> {
    fn sample(&mut self) -> f32 {
        self.rng.random_range(-0.5..0.5)
    }
}

/// Replays a fixed list of samples in a loop
#[derive(Debug, Clone)]
pub struct SequenceSource {
    samples: Vec<f32>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(samples: Vec<f32>) -> Self {
        Self { samples, cursor: 0 }
    }
}

impl UniformSource for SequenceSource {
    fn sample(&mut self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let value = self.samples[self.cursor % self.samples.len()];
        self.cursor += 1;
        value
    }
}

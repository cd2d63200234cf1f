use bevy::prelude::Resource;
use rand::{RngCore, SeedableRng, rngs::StdRng};

/// Random source for shake offsets.
///
/// Seeded from OS entropy by default. Insert a seeded one (before or after
/// adding the plugin) for reproducible runs.
#[derive(Resource)]
pub struct ShakeRng(Box<dyn RngCore + Send + Sync>);

impl ShakeRng {
    pub fn new(rng: impl RngCore + Send + Sync + 'static) -> Self {
        Self(Box::new(rng))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for ShakeRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl RngCore for ShakeRng {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seeded_sources_repeat() {
        let mut a = ShakeRng::seeded(42);
        let mut b = ShakeRng::seeded(42);
        let xs: Vec<f32> = (0..16).map(|_| a.gen_range(-1.0..=1.0)).collect();
        let ys: Vec<f32> = (0..16).map(|_| b.gen_range(-1.0..=1.0)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn wraps_any_source() {
        let mut rng = ShakeRng::new(rand::rngs::mock::StepRng::new(1, 1));
        assert_eq!(rng.next_u64(), 1);
        assert_eq!(rng.next_u64(), 2);
    }
}

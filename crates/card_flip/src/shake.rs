//! Positional jitter of a freshly revealed face.

use bevy::prelude::*;
use rand::Rng;

use crate::{LOG_CARD, card::CardFlip, config::CardFlipSettings, rng::ShakeRng};

/// One shake run on a single face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShakeEffect {
    face: Entity,
    rest: Vec3,
    elapsed: f32,
    duration: f32,
    amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShakeStep {
    /// Position to apply for this frame.
    Jitter(Vec3),
    /// The run is over; the face goes back to exactly this position.
    Settled(Vec3),
}

impl ShakeEffect {
    pub fn begin(face: Entity, rest: Vec3, settings: &CardFlipSettings) -> Self {
        Self {
            face,
            rest,
            elapsed: 0.0,
            duration: settings.shake_duration,
            amount: settings.shake_amount,
        }
    }

    pub fn face(&self) -> Entity {
        self.face
    }

    pub fn rest(&self) -> Vec3 {
        self.rest
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) -> ShakeStep {
        if self.elapsed >= self.duration {
            return ShakeStep::Settled(self.rest);
        }

        let offset = Vec3::new(jitter(rng, self.amount), jitter(rng, self.amount), 0.0);
        self.elapsed += dt;
        ShakeStep::Jitter(self.rest + offset)
    }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R, amount: f32) -> f32 {
    let spread = amount.abs();
    if spread > 0.0 {
        // a range over the whole spread rejects bounds near f32::MAX
        spread * rng.gen_range(-1.0f32..=1.0)
    } else {
        0.0
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum ShakeState {
    #[default]
    Idle,
    Shaking(ShakeEffect),
}

impl ShakeState {
    pub fn is_shaking(&self) -> bool {
        matches!(self, ShakeState::Shaking(_))
    }

    pub fn effect(&self) -> Option<&ShakeEffect> {
        match self {
            ShakeState::Shaking(effect) => Some(effect),
            ShakeState::Idle => None,
        }
    }
}

pub(crate) fn advance_shakes(
    time: Res<Time>,
    mut rng: ResMut<ShakeRng>,
    mut cards: Query<(Entity, &mut ShakeState)>,
    mut faces: Query<&mut Transform, Without<CardFlip>>,
) {
    let dt = time.delta_secs();

    for (entity, mut state) in &mut cards {
        let ShakeState::Shaking(mut effect) = *state else {
            continue;
        };

        let Ok(mut transform) = faces.get_mut(effect.face()) else {
            warn!(target: LOG_CARD, "card {entity:?} lost its shaking face, dropping the shake");
            *state = ShakeState::Idle;
            continue;
        };

        match effect.advance(dt, &mut *rng) {
            ShakeStep::Jitter(position) => {
                transform.translation = position;
                *state = ShakeState::Shaking(effect);
            }
            ShakeStep::Settled(rest) => {
                transform.translation = rest;
                *state = ShakeState::Idle;
                debug!(target: LOG_CARD, "card {entity:?} finished shaking");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn settings(duration: f32, amount: f32) -> CardFlipSettings {
        CardFlipSettings {
            shake_duration: duration,
            shake_amount: amount,
            ..default()
        }
    }

    fn run(effect: &mut ShakeEffect, dt: f32, rng: &mut StdRng) -> (Vec<Vec3>, Vec3) {
        let mut jitter = Vec::new();
        for _ in 0..10_000 {
            match effect.advance(dt, rng) {
                ShakeStep::Jitter(position) => jitter.push(position),
                ShakeStep::Settled(rest) => return (jitter, rest),
            }
        }
        panic!("shake never settled");
    }

    #[test]
    fn offsets_stay_within_amount() {
        let rest = Vec3::new(3.0, -2.0, 7.5);
        let mut rng = StdRng::seed_from_u64(7);
        let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, rest, &settings(0.5, 0.1));

        let (jitter, _) = run(&mut effect, 1.0 / 60.0, &mut rng);

        assert!(!jitter.is_empty());
        for position in jitter {
            let offset = position - rest;
            assert!(offset.x.abs() <= 0.1 + 1e-6, "{offset:?}");
            assert!(offset.y.abs() <= 0.1 + 1e-6, "{offset:?}");
            assert_eq!(position.z, rest.z);
        }
    }

    #[test]
    fn settles_exactly_on_rest() {
        let rest = Vec3::new(0.1, 0.2, 0.3);
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, rest, &settings(0.5, 25.0));
            let (_, settled) = run(&mut effect, 0.033, &mut rng);
            assert_eq!(settled, rest);
            assert!(effect.elapsed() >= 0.5);
        }
    }

    #[test]
    fn frame_count_follows_duration() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, Vec3::ZERO, &settings(0.5, 1.0));
        let (jitter, _) = run(&mut effect, 0.1, &mut rng);
        // five 0.1s frames reach the duration, give or take rounding
        assert!((5..=6).contains(&jitter.len()), "{}", jitter.len());
    }

    #[test]
    fn non_positive_duration_settles_immediately() {
        let mut rng = StdRng::seed_from_u64(3);
        for duration in [0.0, -1.0] {
            let rest = Vec3::new(1.0, 1.0, 1.0);
            let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, rest, &settings(duration, 1.0));
            assert_eq!(effect.advance(0.016, &mut rng), ShakeStep::Settled(rest));
        }
    }

    #[test]
    fn amplitude_sign_is_ignored() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, Vec3::ZERO, &settings(0.2, -0.5));
        let (jitter, _) = run(&mut effect, 0.016, &mut rng);
        for position in jitter {
            assert!(position.x.abs() <= 0.5 && position.y.abs() <= 0.5);
        }
    }

    #[test]
    fn zero_amplitude_holds_still() {
        let rest = Vec3::new(4.0, 5.0, 6.0);
        let mut rng = StdRng::seed_from_u64(5);
        let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, rest, &settings(0.1, 0.0));
        let (jitter, _) = run(&mut effect, 0.016, &mut rng);
        assert!(jitter.iter().all(|position| *position == rest));
    }

    #[test]
    fn huge_amplitudes_still_settle() {
        let rest = Vec3::new(1.0, 2.0, 3.0);
        for amount in [3.0e38, f32::MAX, f32::INFINITY, f32::NEG_INFINITY] {
            let mut rng = StdRng::seed_from_u64(23);
            let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, rest, &settings(0.1, amount));
            let (jitter, settled) = run(&mut effect, 0.016, &mut rng);
            assert!(!jitter.is_empty(), "{amount}");
            assert_eq!(settled, rest, "{amount}");
        }
    }

    #[test]
    fn finite_huge_amplitude_stays_bounded() {
        let mut rng = StdRng::seed_from_u64(29);
        let mut effect = ShakeEffect::begin(Entity::PLACEHOLDER, Vec3::ZERO, &settings(0.2, 3.0e38));
        let (jitter, _) = run(&mut effect, 0.016, &mut rng);
        for position in jitter {
            assert!(position.is_finite(), "{position:?}");
            assert!(position.x.abs() <= 3.0e38 && position.y.abs() <= 3.0e38);
        }
    }
}

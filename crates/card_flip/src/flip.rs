//! Rotating a card half a turn around its vertical axis.

use bevy::prelude::*;

use crate::{
    LOG_CARD,
    card::{BaselineScale, CardFlip, CardYaw, Face, VisibleFace, normalize_degrees, yaw_degrees},
    config::CardFlipSettings,
    input::ActivateCard,
    shake::{ShakeEffect, ShakeState},
};

pub const FLIP_DEGREES: f32 = 180.0;
/// Progress past which the hidden face is revealed.
pub const HALFWAY_DEGREES: f32 = 90.0;
/// Remaining distance at which the yaw snaps onto its target.
pub const SNAP_EPSILON_DEGREES: f32 = 0.1;

/// A single half-turn in progress.
///
/// The host calls [`advance`](Self::advance) once per frame with the largest
/// angle the card may turn in that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipController {
    start_yaw: f32,
    target_yaw: f32,
    yaw: f32,
    facing: Face,
    revealed: bool,
}

/// Outcome of one [`FlipController::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipStep {
    /// Yaw to apply this frame, in degrees. Not normalized.
    pub yaw: f32,
    /// Set on the one frame the hidden face becomes visible.
    pub revealed: Option<Face>,
    /// The yaw reached its target and was snapped onto it.
    pub finished: bool,
}

impl FlipController {
    pub fn begin(start_yaw: f32, facing: Face) -> Self {
        Self {
            start_yaw,
            target_yaw: start_yaw + FLIP_DEGREES,
            yaw: start_yaw,
            facing,
            revealed: false,
        }
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn target_yaw(&self) -> f32 {
        self.target_yaw
    }

    /// Face shown at the current yaw.
    pub fn facing(&self) -> Face {
        self.facing
    }

    pub fn advance(&mut self, max_delta: f32) -> FlipStep {
        self.yaw = move_towards(self.yaw, self.target_yaw, max_delta);

        let mut revealed = None;
        if !self.revealed && self.yaw - self.start_yaw > HALFWAY_DEGREES {
            self.revealed = true;
            self.facing = self.facing.opposite();
            revealed = Some(self.facing);
        }

        let finished = (self.target_yaw - self.yaw).abs() <= SNAP_EPSILON_DEGREES;
        if finished {
            self.yaw = self.target_yaw;
        }

        FlipStep {
            yaw: self.yaw,
            revealed,
            finished,
        }
    }
}

/// Moves `current` toward `target` by at most `max_delta` without overshooting.
pub fn move_towards(current: f32, target: f32, max_delta: f32) -> f32 {
    let distance = target - current;
    if distance.abs() <= max_delta {
        target
    } else {
        current + distance.signum() * max_delta
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub enum FlipState {
    #[default]
    Idle,
    Rotating(FlipController),
}

impl FlipState {
    pub fn is_rotating(&self) -> bool {
        matches!(self, FlipState::Rotating(_))
    }

    pub fn controller(&self) -> Option<&FlipController> {
        match self {
            FlipState::Rotating(controller) => Some(controller),
            FlipState::Idle => None,
        }
    }
}

/// Yaw a new flip starts from.
///
/// The cached yaw wins while the transform still agrees with it, so repeated
/// flips land exactly on multiples of 180°. A card turned by someone else
/// starts from wherever it was turned to.
pub fn start_yaw(cached: f32, rotation: Quat) -> f32 {
    let current = yaw_degrees(rotation);
    let drift = normalize_degrees(current - cached);
    if drift.min(360.0 - drift) <= SNAP_EPSILON_DEGREES {
        cached
    } else {
        current
    }
}

pub(crate) fn start_flips(
    mut activations: MessageReader<ActivateCard>,
    mut cards: Query<
        (&Transform, &mut CardYaw, &VisibleFace, &mut FlipState),
        With<BaselineScale>,
    >,
) {
    for activation in activations.read() {
        let Ok((transform, mut yaw, visible, mut state)) = cards.get_mut(activation.card) else {
            trace!(target: LOG_CARD, "activation for unknown card {:?}", activation.card);
            continue;
        };
        if state.is_rotating() {
            continue;
        }

        yaw.0 = start_yaw(yaw.0, transform.rotation);
        *state = FlipState::Rotating(FlipController::begin(yaw.0, visible.0));
        debug!(target: LOG_CARD, "card {:?} flipping from {:.1}°", activation.card, yaw.0);
    }
}

type FaceQuery<'w, 's> =
    Query<'w, 's, (&'static mut Visibility, &'static mut Transform), Without<CardFlip>>;

pub(crate) fn advance_flips(
    time: Res<Time>,
    mut cards: Query<(
        Entity,
        &CardFlip,
        &CardFlipSettings,
        &mut FlipState,
        &mut CardYaw,
        &mut VisibleFace,
        &mut Transform,
        &mut ShakeState,
    )>,
    mut faces: FaceQuery,
) {
    let dt = time.delta_secs();

    for (entity, card, settings, mut state, mut yaw, mut visible, mut transform, mut shake) in
        &mut cards
    {
        let FlipState::Rotating(mut controller) = *state else {
            continue;
        };

        let step = controller.advance(settings.rotation_speed * dt);
        // pitch and roll stay pinned to zero
        transform.rotation = Quat::from_rotation_y(step.yaw.to_radians());

        if let Some(face) = step.revealed {
            show_face(entity, card, face, &mut faces);
            visible.0 = face;
        }

        if !step.finished {
            yaw.0 = step.yaw;
            *state = FlipState::Rotating(controller);
            continue;
        }

        yaw.0 = normalize_degrees(step.yaw);
        *state = FlipState::Idle;
        debug!(target: LOG_CARD, "card {entity:?} settled at {:.1}°", yaw.0);

        start_shake(entity, card.face(visible.0), settings, &mut shake, &mut faces);
    }
}

fn show_face(entity: Entity, card: &CardFlip, face: Face, faces: &mut FaceQuery) {
    for (face, visibility) in [
        (face, Visibility::Visible),
        (face.opposite(), Visibility::Hidden),
    ] {
        match faces.get_mut(card.face(face)) {
            Ok((mut current, _)) => *current = visibility,
            Err(_) => warn!(target: LOG_CARD, "card {entity:?} lost its {face:?} face"),
        }
    }
}

fn start_shake(
    entity: Entity,
    face: Entity,
    settings: &CardFlipSettings,
    shake: &mut ShakeState,
    faces: &mut FaceQuery,
) {
    // a shake still running from the previous flip gives its face back first
    if let ShakeState::Shaking(previous) = *shake {
        if let Ok((_, mut transform)) = faces.get_mut(previous.face()) {
            transform.translation = previous.rest();
        }
    }

    *shake = match faces.get(face) {
        Ok((_, transform)) => {
            ShakeState::Shaking(ShakeEffect::begin(face, transform.translation, settings))
        }
        Err(_) => {
            warn!(target: LOG_CARD, "card {entity:?} has no face {face:?} to shake");
            ShakeState::Idle
        }
    };
}

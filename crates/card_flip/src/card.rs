//! Card components and their one-time initialization.

use bevy::prelude::*;

use crate::{
    LOG_CARD, config::CardFlipSettings, error::CardFlipError, flip::FlipState, shake::ShakeState,
};

/// The card visual. Points at its two faces and the control that flips it.
///
/// Faces need `Visibility` and `Transform`; the control needs `Interaction`
/// (a UI `Button` has all it needs). Missing pieces are reported once when the
/// component is added and the card stays inert.
#[derive(Component, Debug, Clone, Copy)]
#[require(CardFlipSettings, FlipState, ShakeState, Transform, Visibility)]
pub struct CardFlip {
    pub front: Entity,
    pub back: Entity,
    pub button: Entity,
}

impl CardFlip {
    pub fn new(front: Entity, back: Entity, button: Entity) -> Self {
        Self {
            front,
            back,
            button,
        }
    }

    pub fn face(&self, face: Face) -> Entity {
        match face {
            Face::Front => self.front,
            Face::Back => self.back,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Front,
    Back,
}

impl Face {
    pub fn opposite(self) -> Self {
        match self {
            Face::Front => Face::Back,
            Face::Back => Face::Front,
        }
    }
}

/// Local scale of the card at initialization. Hover scaling is relative to it.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BaselineScale(Vec3);

impl BaselineScale {
    pub fn get(&self) -> Vec3 {
        self.0
    }
}

/// Orientation around the vertical axis in degrees, kept in `[0, 360)` while
/// the card is settled.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct CardYaw(pub f32);

/// Which face is currently shown.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleFace(pub Face);

/// Placed on the clickable control once its card is initialized.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipButtonOf(pub Entity);

pub(crate) fn initialize_cards(
    mut commands: Commands,
    cards: Query<(Entity, &CardFlip, &Transform), Added<CardFlip>>,
    mut faces: Query<&mut Visibility, (With<Transform>, Without<CardFlip>)>,
    buttons: Query<(), With<Interaction>>,
) {
    for (entity, card, transform) in &cards {
        if let Err(err) = validate(entity, card, &faces, &buttons) {
            error!(target: LOG_CARD, "card initialization aborted: {err}");
            continue;
        }

        // validate() guarantees both lookups succeed
        if let Ok(mut visibility) = faces.get_mut(card.front) {
            *visibility = Visibility::Visible;
        }
        if let Ok(mut visibility) = faces.get_mut(card.back) {
            *visibility = Visibility::Hidden;
        }

        let yaw = yaw_degrees(transform.rotation);
        commands.entity(entity).insert((
            BaselineScale(transform.scale),
            CardYaw(yaw),
            VisibleFace(Face::Front),
        ));
        commands.entity(card.button).insert(FlipButtonOf(entity));

        debug!(
            target: LOG_CARD,
            "card {entity:?} ready: baseline {:?}, yaw {yaw:.1}°",
            transform.scale
        );
    }
}

fn validate(
    entity: Entity,
    card: &CardFlip,
    faces: &Query<&mut Visibility, (With<Transform>, Without<CardFlip>)>,
    buttons: &Query<(), With<Interaction>>,
) -> Result<(), CardFlipError> {
    if card.front == card.back {
        return Err(CardFlipError::SharedFace {
            card: entity,
            entity: card.front,
        });
    }
    for face in [Face::Front, Face::Back] {
        let face_entity = card.face(face);
        if !faces.contains(face_entity) {
            return Err(CardFlipError::MissingFace {
                card: entity,
                face,
                entity: face_entity,
            });
        }
    }
    if !buttons.contains(card.button) {
        return Err(CardFlipError::MissingButton {
            card: entity,
            button: card.button,
        });
    }
    Ok(())
}

/// Yaw of a rotation in degrees, normalized to `[0, 360)`.
pub fn yaw_degrees(rotation: Quat) -> f32 {
    let (yaw, _pitch, _roll) = rotation.to_euler(EulerRot::YXZ);
    normalize_degrees(yaw.to_degrees())
}

pub fn normalize_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaw_is_read_from_rotation() {
        assert_eq!(yaw_degrees(Quat::IDENTITY), 0.0);
        let yaw = yaw_degrees(Quat::from_rotation_y(90f32.to_radians()));
        assert!((yaw - 90.0).abs() < 1e-3);
        let yaw = yaw_degrees(Quat::from_rotation_y(-90f32.to_radians()));
        assert!((yaw - 270.0).abs() < 1e-3);
    }

    #[test]
    fn normalize_wraps_into_range() {
        assert_eq!(normalize_degrees(180.0), 180.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(540.0), 180.0);
        assert_eq!(normalize_degrees(-90.0), 270.0);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn opposite_face() {
        assert_eq!(Face::Front.opposite(), Face::Back);
        assert_eq!(Face::Back.opposite(), Face::Front);
    }
}

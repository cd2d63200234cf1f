use bevy::prelude::Entity;
use thiserror::Error;

use crate::card::Face;

#[derive(Error, Debug)]
pub enum CardFlipError {
    #[error("card {card:?} has no usable {face:?} face at {entity:?}")]
    MissingFace {
        card: Entity,
        face: Face,
        entity: Entity,
    },

    #[error("card {card:?} uses {entity:?} as both front and back face")]
    SharedFace { card: Entity, entity: Entity },

    #[error("card {card:?} has no clickable control at {button:?}")]
    MissingButton { card: Entity, button: Entity },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

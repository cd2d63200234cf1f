//! Flip, shake and hover feedback for card entities.
//!
//! A card is an entity carrying [`CardFlip`], which points at two face entities
//! and at the clickable control that flips it. Everything is driven by the
//! host's `Update` schedule:
//!
//! - pointer enter/exit rescales the card ([`hover`])
//! - activation rotates it 180° around its vertical axis and swaps the visible
//!   face at the halfway point ([`flip`])
//! - the revealed face shakes briefly once the rotation settles ([`shake`])
//!
//! # Example
//! ```no_run
//! use bevy::prelude::*;
//! use card_flip::prelude::*;
//!
//! App::new()
//!     .add_plugins((DefaultPlugins, CardFlipPlugin))
//!     .run();
//! ```

pub mod card;
pub mod config;
pub mod error;
pub mod flip;
pub mod hover;
pub mod input;
pub mod rng;
pub mod shake;

use bevy::prelude::*;

pub use card::{BaselineScale, CardFlip, CardYaw, Face, FlipButtonOf, VisibleFace};
pub use config::CardFlipSettings;
pub use error::CardFlipError;
pub use flip::{FlipController, FlipState, FlipStep};
pub use input::{ActivateCard, CardPointer, PointerKind};
pub use rng::ShakeRng;
pub use shake::{ShakeEffect, ShakeState, ShakeStep};

/// Log target for everything this crate reports.
pub const LOG_CARD: &str = "card_flip";

pub mod prelude {
    pub use crate::{
        ActivateCard, CardFlip, CardFlipPlugin, CardFlipSettings, CardPointer, CardYaw, Face,
        FlipState, PointerKind, ShakeRng, ShakeState, VisibleFace,
    };
}

/// Ordering of the card systems inside `Update`.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum CardFlipSystems {
    /// One-time validation of newly added cards
    Setup,
    /// Translating host input into card messages
    Input,
    Hover,
    Flip,
    /// Runs after `Flip` so a shake begins in the frame its flip settles
    Shake,
}

pub struct CardFlipPlugin;

impl Plugin for CardFlipPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<CardPointer>()
            .add_message::<ActivateCard>()
            // keeps a ShakeRng the host inserted before the plugin
            .init_resource::<ShakeRng>()
            .configure_sets(
                Update,
                (
                    CardFlipSystems::Setup,
                    CardFlipSystems::Input,
                    CardFlipSystems::Hover,
                    CardFlipSystems::Flip,
                    CardFlipSystems::Shake,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    card::initialize_cards.in_set(CardFlipSystems::Setup),
                    input::forward_button_presses.in_set(CardFlipSystems::Input),
                    hover::apply_hover.in_set(CardFlipSystems::Hover),
                    (flip::start_flips, flip::advance_flips)
                        .chain()
                        .in_set(CardFlipSystems::Flip),
                    shake::advance_shakes.in_set(CardFlipSystems::Shake),
                ),
            )
            .add_observer(input::forward_pointer_over)
            .add_observer(input::forward_pointer_out);
    }
}

//! Host notifications and the adapters that produce them.
//!
//! Hosts can write [`CardPointer`] and [`ActivateCard`] directly; the plugin
//! also forwards picking hover events and presses of the card's button.

use bevy::picking::events::{Out, Over, Pointer};
use bevy::prelude::*;

use crate::{LOG_CARD, card::{CardFlip, FlipButtonOf}};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Enter,
    Exit,
}

/// Pointer entered or left a card.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardPointer {
    pub card: Entity,
    pub kind: PointerKind,
}

impl CardPointer {
    pub fn enter(card: Entity) -> Self {
        Self {
            card,
            kind: PointerKind::Enter,
        }
    }

    pub fn exit(card: Entity) -> Self {
        Self {
            card,
            kind: PointerKind::Exit,
        }
    }
}

/// The card's clickable control was activated.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivateCard {
    pub card: Entity,
}

/// Forwards presses of a registered flip button.
pub(crate) fn forward_button_presses(
    buttons: Query<(&Interaction, &FlipButtonOf), Changed<Interaction>>,
    mut activations: MessageWriter<ActivateCard>,
) {
    for (interaction, button_of) in &buttons {
        if *interaction == Interaction::Pressed {
            debug!(target: LOG_CARD, "flip button pressed for card {:?}", button_of.0);
            activations.write(ActivateCard { card: button_of.0 });
        }
    }
}

// Pointer events bubble up from face sprites, so only the hop that lands on
// the card itself is forwarded.
pub(crate) fn forward_pointer_over(
    over: On<Pointer<Over>>,
    cards: Query<(), With<CardFlip>>,
    mut pointer: MessageWriter<CardPointer>,
) {
    let target = over.event_target();
    if cards.contains(target) {
        pointer.write(CardPointer::enter(target));
    }
}

pub(crate) fn forward_pointer_out(
    out: On<Pointer<Out>>,
    cards: Query<(), With<CardFlip>>,
    mut pointer: MessageWriter<CardPointer>,
) {
    let target = out.event_target();
    if cards.contains(target) {
        pointer.write(CardPointer::exit(target));
    }
}

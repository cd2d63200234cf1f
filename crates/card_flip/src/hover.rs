use bevy::prelude::*;

use crate::{
    LOG_CARD,
    card::BaselineScale,
    config::CardFlipSettings,
    input::{CardPointer, PointerKind},
};

/// Scale a card should have for the given pointer state.
pub fn hover_scale(baseline: Vec3, settings: &CardFlipSettings, kind: PointerKind) -> Vec3 {
    match kind {
        PointerKind::Enter => baseline * settings.hover_scale,
        PointerKind::Exit => baseline,
    }
}

pub(crate) fn apply_hover(
    mut pointer: MessageReader<CardPointer>,
    mut cards: Query<(&mut Transform, &BaselineScale, &CardFlipSettings)>,
) {
    for message in pointer.read() {
        let Ok((mut transform, baseline, settings)) = cards.get_mut(message.card) else {
            trace!(target: LOG_CARD, "pointer event for unknown card {:?}", message.card);
            continue;
        };
        transform.scale = hover_scale(baseline.get(), settings, message.kind);
    }
}

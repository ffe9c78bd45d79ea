use tracing::debug;
use vitrine_types::ElementId;

use super::Section;
use crate::effects::{Notice, StageEffect};
use crate::features::progress;
use crate::state::StageState;

pub fn set_sections(
    state: &mut StageState,
    sections: Vec<Section>,
    effects: &mut Vec<StageEffect>,
) {
    state.navigation.set_sections(sections);
    refresh(state, effects);
}

pub fn refresh(state: &mut StageState, effects: &mut Vec<StageEffect>) {
    let probe = state.config.navigation.anchor_offset_px;
    if let Some(section) = state.navigation.on_scroll(state.scroll_offset, probe) {
        effects.push(StageEffect::notify(Notice::ActiveSectionChanged { section }));
    }
}

/// Smooth-scrolls to a section, handing native scrolling back first.
pub fn navigate_to(state: &mut StageState, anchor: ElementId, effects: &mut Vec<StageEffect>) {
    if state.intro.is_gating() {
        debug!(%anchor, "navigation ignored during intro");
        return;
    }
    progress::update::release_all(state, effects);
    effects.push(StageEffect::ScrollToAnchor {
        anchor,
        offset_px: state.config.navigation.anchor_offset_px,
        smooth: true,
    });
}

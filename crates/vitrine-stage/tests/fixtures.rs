//! Shared page layout and region specs for stage integration tests.

#![allow(dead_code)]

use vitrine_core::config::Config;
use vitrine_stage::index::IndexLayout;
use vitrine_stage::pinning::RegionSpec;
use vitrine_stage::sim::PageModel;
use vitrine_stage::state::RegionSnapshot;
use vitrine_stage::{Notice, StageSnapshot};
use vitrine_types::{ContentItem, ElementBounds, ElementId, Viewport};

pub const VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

/// Home page: intercept hero, pinned gallery (six works at 0.6 viewport
/// each), then the about and contact sections after the pin spacer.
pub fn home_page() -> PageModel {
    PageModel::new(VIEWPORT)
        .with_element("hero", ElementBounds::new(0.0, 800.0, 1280.0))
        .with_element("gallery", ElementBounds::new(800.0, 800.0, 1280.0))
        .with_element("about", ElementBounds::new(4480.0, 800.0, 1280.0))
        .with_element("contact", ElementBounds::new(5280.0, 900.0, 1280.0))
        .with_element("title", ElementBounds::new(4500.0, 120.0, 1280.0))
}

/// Defaults with a fixed scramble seed and the intro switched off.
pub fn quiet_config() -> Config {
    let mut config = Config::default();
    config.intro.enabled = false;
    config.transitions.scramble_seed = Some(7);
    config
}

/// Defaults with a fixed scramble seed; the intro still plays.
pub fn intro_config() -> Config {
    let mut config = quiet_config();
    config.intro.enabled = true;
    config
}

pub fn works(count: usize) -> Vec<ContentItem> {
    (0..count)
        .map(|i| ContentItem::new(format!("w{i}"), format!("/work/{i}.jpg"), format!("Work {i}")))
        .collect()
}

pub fn gallery(count: usize) -> RegionSpec {
    RegionSpec::new("gallery")
        .with_items(works(count), IndexLayout::Linear)
        .with_crossfade_target("gallery-stage")
}

pub fn hero() -> RegionSpec {
    RegionSpec::new("hero").intercept()
}

pub fn ids(names: &[&str]) -> Vec<ElementId> {
    names.iter().map(|name| ElementId::new(*name)).collect()
}

pub fn region<'a>(snapshot: &'a StageSnapshot, id: &str) -> &'a RegionSnapshot {
    snapshot
        .regions
        .iter()
        .find(|r| r.id.as_str() == id)
        .unwrap_or_else(|| panic!("region {id} not mounted"))
}

pub fn count(notices: &[Notice], pred: impl Fn(&Notice) -> bool) -> usize {
    notices.iter().filter(|n| pred(n)).count()
}

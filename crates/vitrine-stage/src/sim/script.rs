use anyhow::{Context, Result};
use serde::Deserialize;
use vitrine_types::{ElementBounds, ElementId, MediaRef, RawInput, Viewport};

use super::PageModel;
use crate::events::StageCommand;
use crate::features::pinning::RegionSpec;

/// A reproducible page session: layout, regions and a list of steps.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub viewport: Viewport,
    /// URL fragment of the initial load, e.g. `#contact`.
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub elements: Vec<ScriptElement>,
    #[serde(default)]
    pub sections: Vec<ElementId>,
    #[serde(default)]
    pub regions: Vec<RegionSpec>,
    #[serde(default)]
    pub media_latency_ms: u64,
    #[serde(default)]
    pub failing_media: Vec<MediaRef>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptElement {
    pub id: ElementId,
    pub top: f64,
    pub height: f64,
    #[serde(default)]
    pub width: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Advance { advance_ms: u64 },
    Input { input: RawInput },
    Mount { mount: RegionSpec },
    Command(StageCommand),
}

impl Script {
    pub fn from_json(contents: &str) -> Result<Self> {
        serde_json::from_str(contents).context("Failed to parse replay script")
    }

    pub fn page(&self) -> PageModel {
        self.elements.iter().fold(PageModel::new(self.viewport), |page, el| {
            let width = el.width.unwrap_or(self.viewport.width);
            page.with_element(el.id.as_str(), ElementBounds::new(el.top, el.height, width))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Measure;

    #[test]
    fn test_script_parses_mixed_steps() {
        let script = Script::from_json(
            r##"{
                "hash": "#contact",
                "elements": [{"id": "contact", "top": 3000, "height": 900}],
                "steps": [
                    {"advance_ms": 300},
                    {"input": {"type": "wheel", "delta_y": 120}},
                    {"command": "reveal_text", "element": "title", "text": "ART"},
                    {"mount": {"id": "gallery"}}
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 4);
        assert!(matches!(script.steps[0], Step::Advance { advance_ms: 300 }));
        assert!(matches!(script.steps[2], Step::Command(StageCommand::RevealText { .. })));
        assert!(matches!(script.steps[3], Step::Mount { .. }));

        let page = script.page();
        let bounds = page.element_bounds(&ElementId::new("contact")).unwrap();
        assert!((bounds.width - 1280.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bad_script_reports_context() {
        let err = Script::from_json("{\"steps\": 3}").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse replay script"));
    }
}

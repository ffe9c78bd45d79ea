//! Raw host input, before normalization.

use serde::{Deserialize, Serialize};

use crate::Viewport;

/// A raw event as the host environment dispatches it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RawInput {
    /// Page scroll position changed.
    Scroll { offset: f64 },
    /// Mouse wheel; positive `delta_y` scrolls forward (down).
    Wheel { delta_y: f64 },
    TouchStart { y: f64 },
    TouchMove { y: f64 },
    TouchEnd,
    Resize { viewport: Viewport },
}

impl RawInput {
    /// Listener kind a host must have registered to deliver this input.
    pub fn listener_kind(&self) -> ListenerKind {
        match self {
            RawInput::Scroll { .. } => ListenerKind::Scroll,
            RawInput::Wheel { .. } => ListenerKind::Wheel,
            RawInput::TouchStart { .. } | RawInput::TouchMove { .. } | RawInput::TouchEnd => {
                ListenerKind::Touch
            }
            RawInput::Resize { .. } => ListenerKind::Resize,
        }
    }
}

/// Window-level listener categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListenerKind {
    Scroll,
    Wheel,
    Touch,
    Resize,
    Visibility,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_inputs_share_listener_kind() {
        assert_eq!(RawInput::TouchStart { y: 1.0 }.listener_kind(), ListenerKind::Touch);
        assert_eq!(RawInput::TouchMove { y: 1.0 }.listener_kind(), ListenerKind::Touch);
        assert_eq!(RawInput::TouchEnd.listener_kind(), ListenerKind::Touch);
    }

    #[test]
    fn test_raw_input_json_shape() {
        let input: RawInput = serde_json::from_str(r#"{"type":"wheel","delta_y":120.0}"#).unwrap();
        assert_eq!(input, RawInput::Wheel { delta_y: 120.0 });
    }
}

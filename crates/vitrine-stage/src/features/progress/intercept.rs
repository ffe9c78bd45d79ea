use serde::Serialize;
use vitrine_core::config::InputConfig;

/// Adds a scaled delta to `current`, clamped to `[0, 1]`.
///
/// Non-finite deltas leave the value untouched.
pub fn accumulate(current: f32, delta: f64, sensitivity: f32) -> f32 {
    if !delta.is_finite() {
        return current;
    }
    (current + delta as f32 * sensitivity).clamp(0.0, 1.0)
}

/// What an intercept region did with one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptOutcome {
    /// The event fed the accumulator; the page must not scroll.
    Consumed,
    /// The accumulator crossed the completion threshold on this event.
    /// The event is still consumed; native scrolling resumes afterwards.
    Released,
    /// A reverse gesture at the page top took control back.
    Recaptured,
    /// Not ours; let the page scroll natively.
    PassThrough,
}

impl InterceptOutcome {
    pub fn consumes(self) -> bool {
        !matches!(self, InterceptOutcome::PassThrough)
    }
}

/// Accumulator state for an input-intercept region.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InterceptState {
    pub progress: f32,
    /// Native scrolling has been handed back.
    pub released: bool,
    /// Secondary content is shown; hides again below the hide threshold.
    pub show_content: bool,
    #[serde(skip)]
    touch_anchor: Option<f64>,
}

impl InterceptState {
    /// State for a load that landed past this region (deep link): already
    /// complete and released.
    pub fn completed() -> Self {
        Self {
            progress: 1.0,
            released: true,
            show_content: true,
            touch_anchor: None,
        }
    }

    pub fn on_wheel(
        &mut self,
        delta_y: f64,
        page_offset: f64,
        cfg: &InputConfig,
    ) -> InterceptOutcome {
        self.advance(delta_y, cfg.wheel_sensitivity, page_offset, cfg)
    }

    pub fn on_touch_start(&mut self, y: f64) {
        self.touch_anchor = Some(y);
    }

    /// Finger movement since the previous touch sample. Dragging up
    /// (decreasing `y`) opens.
    pub fn on_touch_move(
        &mut self,
        y: f64,
        page_offset: f64,
        cfg: &InputConfig,
    ) -> InterceptOutcome {
        let Some(anchor) = self.touch_anchor.replace(y) else {
            return if self.released {
                InterceptOutcome::PassThrough
            } else {
                InterceptOutcome::Consumed
            };
        };
        let delta = anchor - y;
        let sensitivity = if delta < 0.0 {
            cfg.touch_close_sensitivity
        } else {
            cfg.touch_open_sensitivity
        };
        self.advance(delta, sensitivity, page_offset, cfg)
    }

    pub fn on_touch_end(&mut self) {
        self.touch_anchor = None;
    }

    fn advance(
        &mut self,
        delta: f64,
        sensitivity: f32,
        page_offset: f64,
        cfg: &InputConfig,
    ) -> InterceptOutcome {
        if self.released {
            if delta < 0.0 && page_offset <= cfg.top_tolerance_px {
                self.released = false;
                return InterceptOutcome::Recaptured;
            }
            return InterceptOutcome::PassThrough;
        }

        self.progress = accumulate(self.progress, delta, sensitivity);
        if self.progress >= cfg.completion_threshold {
            self.released = true;
            self.show_content = true;
            return InterceptOutcome::Released;
        }
        if self.progress < cfg.content_hide_threshold {
            self.show_content = false;
        }
        InterceptOutcome::Consumed
    }
}

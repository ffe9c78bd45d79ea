use vitrine_types::MediaRef;

use super::{Easing, TransitionKind, TransitionState, Tween};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrossfadeTrigger {
    Started,
    /// Waiting on the target's media; the blend starts once it is ready.
    Deferred,
    /// A blend is already in flight.
    Busy,
    AlreadyShowing,
}

/// Two-layer image blend for one element. At most one blend runs at a time;
/// when it finishes the next image becomes current and the blend resets.
#[derive(Debug, Clone)]
pub struct Crossfade {
    current: Option<MediaRef>,
    next: Option<MediaRef>,
    pending: Option<MediaRef>,
    blend: f32,
    duration_ms: u64,
    pub transition: TransitionState,
}

impl Crossfade {
    pub fn new(current: Option<MediaRef>, duration_ms: u64) -> Self {
        Self {
            current,
            next: None,
            pending: None,
            blend: 0.0,
            duration_ms,
            transition: TransitionState::new(TransitionKind::Crossfade),
        }
    }

    pub fn current(&self) -> Option<&MediaRef> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&MediaRef> {
        self.next.as_ref()
    }

    pub fn pending(&self) -> Option<&MediaRef> {
        self.pending.as_ref()
    }

    pub fn blend(&self) -> f32 {
        self.blend
    }

    pub fn is_running(&self) -> bool {
        self.transition.is_running()
    }

    pub fn trigger(&mut self, target: MediaRef, ready: bool, now_ms: u64) -> CrossfadeTrigger {
        if self.is_running() {
            return CrossfadeTrigger::Busy;
        }
        if self.current.as_ref() == Some(&target) {
            self.pending = None;
            return CrossfadeTrigger::AlreadyShowing;
        }
        if !ready {
            self.pending = Some(target);
            return CrossfadeTrigger::Deferred;
        }
        self.begin(target, now_ms);
        CrossfadeTrigger::Started
    }

    fn begin(&mut self, target: MediaRef, now_ms: u64) {
        self.pending = None;
        self.next = Some(target);
        self.blend = 0.0;
        self.transition.start(now_ms);
    }

    /// Starts a deferred blend once its media arrives.
    pub fn on_media_ready(&mut self, source: &MediaRef, now_ms: u64) -> bool {
        if self.is_running() || self.pending.as_ref() != Some(source) {
            return false;
        }
        self.begin(source.clone(), now_ms);
        true
    }

    /// Drops a deferred blend whose media failed; the current image stays.
    pub fn on_media_failed(&mut self, source: &MediaRef) -> bool {
        if self.pending.as_ref() != Some(source) {
            return false;
        }
        self.pending = None;
        true
    }

    /// Advances the blend. Returns the new current media on the frame the
    /// swap happens.
    pub fn tick(&mut self, now_ms: u64) -> Option<MediaRef> {
        if !self.is_running() {
            return None;
        }
        let tween = Tween::new(
            0.0,
            1.0,
            self.transition.started_at_ms.unwrap_or(now_ms),
            self.duration_ms,
            Easing::EaseInOutQuad,
        );
        self.blend = tween.sample(now_ms);
        if !tween.is_done(now_ms) {
            return None;
        }
        self.current = self.next.take();
        self.blend = 0.0;
        self.transition.complete();
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(src: &str) -> MediaRef {
        MediaRef::new(src)
    }

    #[test]
    fn test_trigger_while_running_is_ignored() {
        let mut fade = Crossfade::new(Some(media("a.jpg")), 1000);
        assert_eq!(fade.trigger(media("b.jpg"), true, 0), CrossfadeTrigger::Started);
        assert_eq!(fade.trigger(media("c.jpg"), true, 100), CrossfadeTrigger::Busy);

        assert!(fade.tick(500).is_none());
        assert!(fade.blend() > 0.0 && fade.blend() < 1.0);
        assert_eq!(fade.tick(1000), Some(media("b.jpg")));
        assert_eq!(fade.current(), Some(&media("b.jpg")));
        assert!(fade.next().is_none());
        assert!(fade.blend().abs() < f32::EPSILON);
        assert!(fade.tick(1100).is_none());
    }

    #[test]
    fn test_repeatable_after_completion() {
        let mut fade = Crossfade::new(Some(media("a.jpg")), 200);
        fade.trigger(media("b.jpg"), true, 0);
        fade.tick(200);
        assert_eq!(fade.trigger(media("a.jpg"), true, 300), CrossfadeTrigger::Started);
        assert_eq!(fade.tick(500), Some(media("a.jpg")));
    }

    #[test]
    fn test_deferred_until_ready() {
        let mut fade = Crossfade::new(Some(media("a.jpg")), 200);
        assert_eq!(fade.trigger(media("b.jpg"), false, 0), CrossfadeTrigger::Deferred);
        assert!(!fade.is_running());
        assert!(!fade.on_media_ready(&media("other.jpg"), 10));
        assert!(fade.on_media_ready(&media("b.jpg"), 50));
        assert!(fade.is_running());
        assert_eq!(fade.tick(250), Some(media("b.jpg")));
    }

    #[test]
    fn test_failed_media_is_skipped() {
        let mut fade = Crossfade::new(Some(media("a.jpg")), 200);
        fade.trigger(media("broken.jpg"), false, 0);
        assert!(fade.on_media_failed(&media("broken.jpg")));
        assert!(fade.pending().is_none());
        assert_eq!(fade.current(), Some(&media("a.jpg")));
        assert!(!fade.on_media_ready(&media("broken.jpg"), 10));
    }

    #[test]
    fn test_same_media_is_noop() {
        let mut fade = Crossfade::new(Some(media("a.jpg")), 200);
        assert_eq!(
            fade.trigger(media("a.jpg"), true, 0),
            CrossfadeTrigger::AlreadyShowing
        );
        assert!(!fade.is_running());
    }
}

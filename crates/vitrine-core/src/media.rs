//! Media loading collaborator.
//!
//! The stage never decodes anything; it only needs to know when a source is
//! ready so a crossfade never starts into a blank frame.

use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use vitrine_types::MediaRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    /// GPU texture for the shader gallery.
    Texture,
}

/// A ready-to-render resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaHandle {
    pub source: MediaRef,
    pub kind: MediaKind,
}

/// Media loading errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaError {
    /// The source does not exist.
    NotFound(String),
    /// The source exists but could not be decoded.
    Decode(String),
}

impl fmt::Display for MediaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaError::NotFound(src) => write!(f, "media not found: {src}"),
            MediaError::Decode(src) => write!(f, "media could not be decoded: {src}"),
        }
    }
}

impl std::error::Error for MediaError {}

pub type MediaResult = Result<MediaHandle, MediaError>;

pub trait MediaLoader: Send + Sync {
    fn load_image(&self, source: &MediaRef) -> BoxFuture<'static, MediaResult>;

    fn load_texture(&self, source: &MediaRef) -> BoxFuture<'static, MediaResult> {
        self.load_image(source)
            .map(|result| {
                result.map(|handle| MediaHandle {
                    kind: MediaKind::Texture,
                    ..handle
                })
            })
            .boxed()
    }

    fn load(&self, source: &MediaRef, kind: MediaKind) -> BoxFuture<'static, MediaResult> {
        match kind {
            MediaKind::Image => self.load_image(source),
            MediaKind::Texture => self.load_texture(source),
        }
    }
}

/// Loader with a fixed latency and a set of sources that always fail.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    latency: Duration,
    failing: HashSet<MediaRef>,
}

impl StaticLoader {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            failing: HashSet::new(),
        }
    }

    #[must_use]
    pub fn failing(mut self, source: MediaRef) -> Self {
        self.failing.insert(source);
        self
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Resolves a source without waiting.
    pub fn resolve(&self, source: &MediaRef, kind: MediaKind) -> MediaResult {
        if self.failing.contains(source) {
            Err(MediaError::NotFound(source.as_str().to_string()))
        } else {
            Ok(MediaHandle {
                source: source.clone(),
                kind,
            })
        }
    }
}

impl MediaLoader for StaticLoader {
    fn load_image(&self, source: &MediaRef) -> BoxFuture<'static, MediaResult> {
        let latency = self.latency;
        let result = self.resolve(source, MediaKind::Image);
        async move {
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            result
        }
        .boxed()
    }
}

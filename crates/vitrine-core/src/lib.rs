//! Ambient services for Vitrine: configuration, telemetry and the external
//! collaborators (media loading, form submission) the stage talks to.

pub mod config;
pub mod form;
pub mod media;
pub mod telemetry;

pub use futures_util::future::BoxFuture;

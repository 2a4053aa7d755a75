/// Async resource module
///
/// Wraps a zero-argument async producer and tracks its data, loading flag and
/// last error so a presentation layer can render any fetch uniformly.
pub mod async_resource;
pub mod domain;

pub use async_resource::{AsyncResource, Producer, ProducerFuture, ResourceOptions};
pub use domain::{ResourceState, ResourceStatus};

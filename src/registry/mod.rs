//! Release-timestamp resolution against the artifact registry.

mod cache;
mod client;
mod resolver;

pub use cache::TimestampCache;
pub use client::{RegistryClient, RegistryConfig, MAVEN_CENTRAL_URL};
pub use resolver::{resolve_timestamp, ReleaseDateSource};

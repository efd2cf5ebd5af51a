//! BORGA: per-user board game groups over a remote game catalogue.
//!
//! The crate is laid out hexagonally: [`domain`] holds the types, ports and
//! the collection service; [`outbound`] implements the driven ports;
//! [`inbound`] exposes the service over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;

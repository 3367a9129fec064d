//! In-process services for the `/app` namespace
//!
//! A service turns the part of the request target following `/app` into a
//! response body. Services are registered once at startup; the registry is
//! read-only while requests are handled.

pub mod hello;
pub mod registry;

pub use hello::HelloService;
pub use registry::{RegistryError, Service, ServiceError, ServiceRegistry};

//! plainserve - a small static file and service HTTP server
//!
//! Serves files from a document root and answers `/app/<service>` targets
//! from in-process services.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod service;

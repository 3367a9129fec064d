//! HTTP protocol implementation.
//!
//! A deliberately small HTTP/1.1 subset: one request per connection, the
//! connection is closed once the response is written.
//!
//! # Architecture
//!
//! - **`connection`**: Drives one accepted socket through its state machine
//! - **`parser`**: Parses the request line, raw header lines and body from a byte buffer
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`mime`**: Content-Type detection from the requested path
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for the request (bounded by the read timeout)
//!        └──────┬──────┘
//!               │ Request received / parse error / timeout
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route to a service or the static files
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod mime;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

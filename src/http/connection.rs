use std::sync::Arc;
use std::time::Duration;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;

use crate::http::parser::{parse_http_request, parse_truncated_request, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// One accepted connection: a single request, a single response, then close.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    router: Arc<Router>,
    read_timeout: Duration,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

/// What reading the socket produced.
pub enum Incoming {
    Request(Request),
    /// The request could not be parsed; answer with this response.
    Rejected(Response),
    /// The client closed the connection without sending anything.
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, read_timeout: Duration) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            router,
            read_timeout,
        }
    }

    /// Handles the connection to completion and shuts the stream down,
    /// whatever the outcome.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        if let Err(e) = self.stream.shutdown().await {
            tracing::trace!(error = %e, "Shutdown after response failed");
        }

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => {
                    let incoming = match timeout(self.read_timeout, self.read_request()).await {
                        Ok(incoming) => incoming?,
                        Err(_) => {
                            tracing::warn!(
                                timeout_secs = self.read_timeout.as_secs(),
                                "Timed out reading request"
                            );
                            Incoming::Rejected(Response::request_timeout())
                        }
                    };

                    self.state = match incoming {
                        Incoming::Request(req) => ConnectionState::Processing(req),
                        Incoming::Rejected(response) => {
                            ConnectionState::Writing(ResponseWriter::new(&response))
                        }
                        Incoming::Closed => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let response = self.router.dispatch(req).await;

                    tracing::info!(
                        method = %req.method,
                        path = %req.path,
                        status = response.status.as_u16(),
                        body_len = response.body.len(),
                        "Request served"
                    );

                    self.state = ConnectionState::Writing(ResponseWriter::new(&response));
                }

                ConnectionState::Writing(writer) => {
                    writer.write_to_stream(&mut self.stream).await?;
                    self.state = ConnectionState::Closed;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads until one full request is buffered, the request turns out to
    /// be malformed, or the client closes its side.
    pub async fn read_request(&mut self) -> anyhow::Result<Incoming> {
        loop {
            if !self.buffer.is_empty() {
                match parse_http_request(&self.buffer) {
                    Ok((request, consumed)) => {
                        self.buffer.advance(consumed);
                        log_request(&request);
                        return Ok(Incoming::Request(request));
                    }

                    Err(ParseError::Incomplete) => {
                        // Need more data → fall through to read
                    }

                    Err(e) => {
                        tracing::warn!(error = %e, "Rejected request");
                        return Ok(Incoming::Rejected(Response::bad_request()));
                    }
                }
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                if self.buffer.is_empty() {
                    tracing::debug!("Client closed connection before sending a request");
                    return Ok(Incoming::Closed);
                }

                // Client closed its side mid-request; use what arrived.
                return Ok(match parse_truncated_request(&self.buffer) {
                    Ok(request) => {
                        log_request(&request);
                        Incoming::Request(request)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Rejected truncated request");
                        Incoming::Rejected(Response::bad_request())
                    }
                });
            }
        }
    }
}

/// Traces the request line and each raw header line, once per request.
fn log_request(request: &Request) {
    tracing::debug!(
        method = %request.method,
        path = %request.path,
        version = %request.version,
        "Request line"
    );
    for line in &request.headers {
        tracing::debug!(header = %line, "Request header");
    }
}

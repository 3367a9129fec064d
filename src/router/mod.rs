//! Request routing
//!
//! Decides, from method and target, between an in-process service and the
//! static files:
//!
//! 1. `/app` and `/app/...` go to the service named by the next segment.
//! 2. Other targets are served from the document root for GET and POST.
//! 3. Any other method answers 405 without touching the filesystem.

pub mod static_files;

use crate::config::Config;
use crate::http::request::{split_target, Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::service::{ServiceError, ServiceRegistry};

pub use static_files::{StaticError, StaticFiles};

/// Path prefix of the dynamic namespace.
pub const APP_PREFIX: &str = "/app";

/// Content type of every successful service response.
const APP_CONTENT_TYPE: &str = "text/html";

/// Routes requests; immutable once built and shared by all connections.
pub struct Router {
    registry: ServiceRegistry,
    static_files: StaticFiles,
}

impl Router {
    pub fn new(registry: ServiceRegistry, static_files: StaticFiles) -> Self {
        Self {
            registry,
            static_files,
        }
    }

    pub fn from_config(cfg: &Config, registry: ServiceRegistry) -> Self {
        Self::new(registry, StaticFiles::from_config(&cfg.static_files))
    }

    pub async fn dispatch(&self, request: &Request) -> Response {
        if is_app_path(request.path_only()) {
            return self.dispatch_app(request);
        }

        match request.method {
            Method::GET => self.static_files.serve(&request.path).await,
            Method::POST => {
                tracing::debug!(
                    path = %request.path,
                    body_len = request.body.len(),
                    "POST to static path served as GET"
                );
                self.static_files.serve(&request.path).await
            }
            _ => Response::method_not_allowed(),
        }
    }

    fn dispatch_app(&self, request: &Request) -> Response {
        if !matches!(request.method, Method::GET | Method::POST) {
            return Response::method_not_allowed();
        }

        let target = &request.path[APP_PREFIX.len()..];
        let name = service_name(target);

        let Some(service) = self.registry.lookup(name) else {
            tracing::debug!(service = %name, "No such service");
            return Response::html_error(StatusCode::NotFound, "Service Not Found");
        };

        match service.handle(target) {
            Ok(body) => Response::ok(APP_CONTENT_TYPE, body),
            Err(ServiceError::MalformedServiceInput(reason)) => {
                tracing::warn!(service = %name, reason = %reason, "Malformed service input");
                let body = serde_json::json!({ "error": reason }).to_string();
                ResponseBuilder::new(StatusCode::BadRequest)
                    .header("Content-type", "application/json")
                    .body(body)
                    .build()
            }
        }
    }
}

/// `/app` itself or anything below it; `/application.css` is not.
pub fn is_app_path(path: &str) -> bool {
    path.strip_prefix(APP_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// First path segment of the target following `/app`.
fn service_name(target: &str) -> &str {
    split_target(target)
        .0
        .trim_start_matches('/')
        .split('/')
        .next()
        .unwrap_or("")
}

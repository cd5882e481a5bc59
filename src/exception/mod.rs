use crate::common::ActionResult;
use crate::error::Exception;
use axum::extract::OriginalUri;
use axum::http::{Method, Request};

pub mod chain;
pub mod extension;
pub mod http;
pub mod layer;

pub use chain::FilterChain;
pub use extension::ExceptionMiddlewareExt;
pub use http::HttpResponseExceptionFilter;
pub use layer::{ExceptionFilterLayer, ExceptionFilterMiddleware};

/// Request metadata available to exception filters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentsHost {
    method: Method,
    path: String,
}

impl ArgumentsHost {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }

    /// Capture method and path (without query) from a request.
    ///
    /// Inside nested routers the path is taken from [`OriginalUri`], so it
    /// keeps the prefix the router stripped.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        let path = match request.extensions().get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path(),
            None => request.uri().path(),
        };
        Self::new(request.method().clone(), path)
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `"<METHOD> <PATH>"`, e.g. `GET /users/5`
    pub fn instance(&self) -> String {
        format!("{} {}", self.method, self.path)
    }
}

/// State of a request after its handler ran, as seen by exception filters
#[derive(Debug)]
pub struct ExceptionContext {
    host: ArgumentsHost,
    exception: Option<Exception>,
    result: Option<ActionResult>,
    handled: bool,
}

impl ExceptionContext {
    pub fn new(host: ArgumentsHost, exception: Option<Exception>) -> Self {
        Self {
            host,
            exception,
            result: None,
            handled: false,
        }
    }

    pub fn host(&self) -> &ArgumentsHost {
        &self.host
    }

    pub fn exception(&self) -> Option<&Exception> {
        self.exception.as_ref()
    }

    pub fn result(&self) -> Option<&ActionResult> {
        self.result.as_ref()
    }

    pub fn set_result(&mut self, result: ActionResult) {
        self.result = Some(result);
    }

    /// Whether a filter has fully resolved the exception
    pub fn handled(&self) -> bool {
        self.handled
    }

    pub fn set_handled(&mut self, handled: bool) {
        self.handled = handled;
    }

    pub fn into_result(self) -> Option<ActionResult> {
        self.result
    }
}

/// The ExceptionFilter trait
///
/// Filters run after the handler and may turn a raised [`Exception`] into a
/// response by setting a result on the context and marking it handled.
/// Lower [`order`](ExceptionFilter::order) runs first.
pub trait ExceptionFilter: Send + Sync + 'static {
    fn order(&self) -> i32 {
        0
    }

    fn on_action_executed(&self, context: &mut ExceptionContext);
}

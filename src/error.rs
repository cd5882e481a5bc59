use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::sync::Arc;
use strum_macros::Display;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Exception>;

/// A type-erased error, as produced by tower services
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The closed set of error kinds a request can fail with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    /// The request timed out or was cancelled
    Timeout,
    BadRequest,
    NotFound,
    Forbidden,
    /// Anything that is not one of the named kinds
    Unknown,
}

impl ErrorKind {
    /// The HTTP status a failure of this kind resolves to
    pub fn status_code(self) -> StatusCode {
        match self {
            ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Unknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error raised while handling a request.
///
/// Handlers return it through [`Result`]; the exception filters turn it into
/// the final HTTP response.
///
/// # Example
/// ```
/// use meshestra_exceptions::{Exception, Result};
///
/// async fn find_user(id: u32) -> Result<String> {
///     if id == 1 {
///         Ok("Test User".to_string())
///     } else {
///         Err(Exception::not_found("User not found"))
///     }
/// }
/// ```
#[derive(Debug, Clone, Error)]
#[error("{kind}{}", message_suffix(.message))]
pub struct Exception {
    kind: ErrorKind,
    message: Option<String>,
    stack_trace: Option<String>,
    #[source]
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Exception {
    /// Create an exception of the given kind without a message.
    ///
    /// A backtrace is recorded only when capturing is enabled through
    /// `RUST_BACKTRACE` or `RUST_LIB_BACKTRACE`.
    pub fn new(kind: ErrorKind) -> Self {
        Self::with_backtrace(kind, Backtrace::capture())
    }

    pub(crate) fn with_backtrace(kind: ErrorKind, backtrace: Backtrace) -> Self {
        let stack_trace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };

        Self {
            kind,
            message: None,
            stack_trace,
            source: None,
        }
    }

    pub fn timeout() -> Self {
        Self::new(ErrorKind::Timeout)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest).with_message(message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound).with_message(message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden).with_message(message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown).with_message(message)
    }

    /// Classify an error coming out of a tower service.
    ///
    /// Timeouts from `tower::timeout` and `tokio::time` become
    /// [`ErrorKind::Timeout`]; anything that is not already an [`Exception`]
    /// becomes [`ErrorKind::Unknown`] and is kept as the source.
    pub fn from_boxed(error: BoxError) -> Self {
        let error = match error.downcast::<Exception>() {
            Ok(exception) => return *exception,
            Err(error) => error,
        };

        if error.is::<tower::timeout::error::Elapsed>() || error.is::<tokio::time::error::Elapsed>()
        {
            return Self::timeout().with_source(error);
        }

        Self::unknown(error.to_string()).with_source(error)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Replace the captured stack trace
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<BoxError>) -> Self {
        self.source = Some(Arc::from(source.into()));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The message, if one was given. Empty messages count as absent.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.is_empty())
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }
}

fn message_suffix(message: &Option<String>) -> String {
    match message.as_deref() {
        Some(message) if !message.is_empty() => format!(": {message}"),
        _ => String::new(),
    }
}

/// Carries an exception from a handler's response to the exception filter layer
#[derive(Clone)]
pub(crate) struct RaisedException(pub(crate) Exception);

impl IntoResponse for Exception {
    fn into_response(self) -> Response {
        let mut response = self.kind.status_code().into_response();
        response.extensions_mut().insert(RaisedException(self));
        response
    }
}

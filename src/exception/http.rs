use crate::common::{ActionResult, ProblemDetails};
use crate::config::Environment;
use crate::error::{ErrorKind, Exception};
use crate::exception::{ArgumentsHost, ExceptionContext, ExceptionFilter};
use axum::http::StatusCode;

/// Terminal exception filter mapping every exception to an HTTP response.
///
/// | Kind         | Status | Title                                 |
/// |--------------|--------|---------------------------------------|
/// | `Timeout`    | 504    | `Request Timeout`                     |
/// | `BadRequest` | 400    | message, or `Bad Request`             |
/// | `NotFound`   | 404    | message, or `Not Found`               |
/// | `Forbidden`  | 403    | message, or `Forbidden`               |
/// | `Unknown`    | 500    | `Internal Server Error`               |
///
/// Client errors get a bare status. Timeouts and unknown errors get a
/// [`ProblemDetails`] body, with the stack trace as `detail` outside
/// production. Only 500s are logged.
#[derive(Debug, Clone)]
pub struct HttpResponseExceptionFilter {
    is_production: bool,
}

impl HttpResponseExceptionFilter {
    /// Runs after every filter with a lower order
    pub const ORDER: i32 = i32::MAX - 10;

    pub fn new(environment: &Environment) -> Self {
        Self {
            is_production: environment.is_production(),
        }
    }

    /// Build the problem details for an exception raised by `host`
    pub fn problem_details(&self, exception: &Exception, host: &ArgumentsHost) -> ProblemDetails {
        let (status, title) = map_exception(exception);
        let detail = if self.is_production {
            None
        } else {
            exception.stack_trace().map(str::to_string)
        };

        ProblemDetails {
            status: status.as_u16(),
            title,
            instance: host.instance(),
            detail,
        }
    }
}

impl ExceptionFilter for HttpResponseExceptionFilter {
    fn order(&self) -> i32 {
        Self::ORDER
    }

    fn on_action_executed(&self, context: &mut ExceptionContext) {
        if context.handled() {
            return;
        }
        let Some(exception) = context.exception() else {
            return;
        };

        let problem = self.problem_details(exception, context.host());

        if problem.status_code() == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(
                error = exception as &(dyn std::error::Error + 'static),
                status_code = problem.status,
                instance = %problem.instance,
                "An error occurred while processing the request"
            );
        }

        let result = action_result(exception.kind(), problem);
        context.set_result(result);
        context.set_handled(true);
    }
}

/// Resolve the status code and title for an exception
pub fn map_exception(exception: &Exception) -> (StatusCode, String) {
    let kind = exception.kind();
    let title = match kind {
        ErrorKind::Timeout => "Request Timeout".to_string(),
        ErrorKind::BadRequest => exception.message().unwrap_or("Bad Request").to_string(),
        ErrorKind::NotFound => exception.message().unwrap_or("Not Found").to_string(),
        ErrorKind::Forbidden => exception.message().unwrap_or("Forbidden").to_string(),
        ErrorKind::Unknown => "Internal Server Error".to_string(),
    };
    (kind.status_code(), title)
}

fn action_result(kind: ErrorKind, problem: ProblemDetails) -> ActionResult {
    match kind {
        ErrorKind::BadRequest | ErrorKind::NotFound | ErrorKind::Forbidden => {
            ActionResult::Status(problem.status_code())
        }
        ErrorKind::Timeout | ErrorKind::Unknown => ActionResult::Problem(problem),
    }
}

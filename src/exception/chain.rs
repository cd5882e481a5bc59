use crate::config::Environment;
use crate::exception::{ExceptionContext, ExceptionFilter, HttpResponseExceptionFilter};
use std::sync::Arc;

/// Exception filters ordered by ascending [`ExceptionFilter::order`]
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn ExceptionFilter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter. Filters with equal order keep insertion order.
    pub fn add<F: ExceptionFilter>(&mut self, filter: F) -> &mut Self {
        self.filters.push(Arc::new(filter));
        self.filters.sort_by_key(|f| f.order());
        self
    }

    /// Install the terminal filter that maps every exception to an HTTP response
    pub fn use_http_exception_filter(&mut self, environment: &Environment) -> &mut Self {
        self.add(HttpResponseExceptionFilter::new(environment))
    }

    pub fn execute(&self, context: &mut ExceptionContext) {
        for filter in &self.filters {
            filter.on_action_executed(context);
        }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

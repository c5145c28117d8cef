//! Tracing spans for catalog loading and message resolution.

use tracing::{debug_span, info_span, Span};

/// Span covering the load of one catalog group.
pub fn catalog_span(namespace: &str, group: &str, locale: &str) -> Span {
    info_span!("catalog", ns = %namespace, group = %group, locale = %locale)
}

/// Span covering a single message lookup.
pub fn lookup_span(key: &str, locale: &str) -> Span {
    debug_span!("lookup", key = %key, locale = %locale, hit = tracing::field::Empty)
}

/// Record a lookup outcome on `span`.
pub fn record_hit(span: &Span, hit: bool) {
    span.record("hit", hit);
}

/// Timing utility for operations.
pub struct Timer {
    start: std::time::Instant,
    operation: &'static str,
}

impl Timer {
    /// Start a new timer.
    pub fn start(operation: &'static str) -> Self {
        Self {
            start: std::time::Instant::now(),
            operation,
        }
    }

    /// Milliseconds elapsed since [`Timer::start`].
    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }

    /// Complete the timer and record duration.
    pub fn finish(self) {
        tracing::debug!(
            operation = %self.operation,
            duration_ms = %self.elapsed_ms(),
            "operation completed"
        );
    }
}

/// Macro for timing a block of code.
#[macro_export]
macro_rules! timed {
    ($name:expr, $body:expr) => {{
        let _timer = $crate::spans::Timer::start($name);
        let result = $body;
        _timer.finish();
        result
    }};
}

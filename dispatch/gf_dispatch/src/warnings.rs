//! Warning delivery for recoverable dispatch conditions.
//!
//! `AmbiguousBinaryMethod` completes the operation but must be surfaced
//! to the caller out-of-band from the returned value. The handler
//! decides where the signal goes:
//! - Tracing: `tracing::warn!` (default)
//! - Buffer: captured for assertions and embedders that poll
//! - Silent: discarded
//!
//! Uses enum dispatch instead of trait objects for O(1) static dispatch
//! on this path.

use gf_value::ClassTag;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

use crate::names::OperationName;

/// A recoverable condition raised during dispatch.
///
/// Warnings are never returned as errors; execution proceeds and the
/// condition is delivered through the configured handler.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DispatchWarning {
    /// Both operands of a symmetric binary operation resolved to
    /// distinct non-default methods; the default implementation ran
    /// instead.
    AmbiguousBinaryMethod {
        /// The symmetric operation.
        operation: OperationName,
        /// Tag at which the left operand's method was found.
        left_tag: ClassTag,
        /// Tag at which the right operand's method was found.
        right_tag: ClassTag,
    },
}

impl fmt::Display for DispatchWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousBinaryMethod {
                operation,
                left_tag,
                right_tag,
            } => write!(
                f,
                "double dispatch for `{operation}` is ambiguous (`{left_tag}` vs `{right_tag}`); \
                 using the default implementation"
            ),
        }
    }
}

/// Default warning handler that emits through `tracing`.
#[derive(Default)]
pub struct TracingWarningHandler;

impl TracingWarningHandler {
    /// Deliver a warning.
    pub fn warn(&self, warning: &DispatchWarning) {
        tracing::warn!(warning = %warning, "dispatch warning");
    }

    /// Captured warnings (always empty; tracing does not capture).
    pub fn get_warnings(&self) -> Vec<DispatchWarning> {
        Vec::new()
    }

    /// Clear captured warnings. No-op for tracing.
    pub fn clear(&self) {
        // Nothing to clear
    }
}

/// Warning handler that captures to a buffer.
///
/// Used in tests and by embedders that poll for conditions after a
/// call completes.
pub struct BufferWarningHandler {
    buffer: Mutex<Vec<DispatchWarning>>,
}

impl BufferWarningHandler {
    /// Create an empty buffer handler.
    pub fn new() -> Self {
        BufferWarningHandler {
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a warning.
    pub fn warn(&self, warning: &DispatchWarning) {
        self.buffer.lock().push(warning.clone());
    }

    /// All captured warnings, oldest first.
    pub fn get_warnings(&self) -> Vec<DispatchWarning> {
        self.buffer.lock().clone()
    }

    /// Clear captured warnings.
    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Default for BufferWarningHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Warning handler implementation using enum dispatch.
pub enum WarningHandlerImpl {
    /// Emits via `tracing::warn!` (default).
    Tracing(TracingWarningHandler),
    /// Captures to a buffer (tests/polling embedders).
    Buffer(BufferWarningHandler),
    /// Discards all warnings.
    Silent,
}

impl WarningHandlerImpl {
    /// Deliver a warning.
    pub fn warn(&self, warning: &DispatchWarning) {
        match self {
            Self::Tracing(h) => h.warn(warning),
            Self::Buffer(h) => h.warn(warning),
            Self::Silent => {}
        }
    }

    /// All captured warnings (empty for handlers that don't capture).
    pub fn get_warnings(&self) -> Vec<DispatchWarning> {
        match self {
            Self::Tracing(h) => h.get_warnings(),
            Self::Buffer(h) => h.get_warnings(),
            Self::Silent => Vec::new(),
        }
    }

    /// Clear captured warnings.
    pub fn clear(&self) {
        match self {
            Self::Tracing(h) => h.clear(),
            Self::Buffer(h) => h.clear(),
            Self::Silent => {}
        }
    }
}

/// Shared warning handler that can be passed around.
pub type SharedWarningHandler = Arc<WarningHandlerImpl>;

/// Create the default tracing warning handler.
pub fn tracing_handler() -> SharedWarningHandler {
    Arc::new(WarningHandlerImpl::Tracing(TracingWarningHandler))
}

/// Create a buffer warning handler for capturing conditions.
pub fn buffer_handler() -> SharedWarningHandler {
    Arc::new(WarningHandlerImpl::Buffer(BufferWarningHandler::new()))
}

/// Create a silent warning handler that discards all conditions.
pub fn silent_handler() -> SharedWarningHandler {
    Arc::new(WarningHandlerImpl::Silent)
}

//! User-facing failure notifications.

use tracing::warn;

use crate::error::ClassifiedError;

/// Receives one call per surfacing-mode terminal failure the user should see.
///
/// Unauthorized and NotFound failures, and requests marked quiet, never reach
/// the notifier.
pub trait ErrorNotifier: Send + Sync {
    fn notify(&self, error: &ClassifiedError);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl ErrorNotifier for NoopNotifier {
    fn notify(&self, _error: &ClassifiedError) {}
}

/// Emits the classified message as a `warn!` event on the `cvs::notify`
/// target, for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl ErrorNotifier for TracingNotifier {
    fn notify(&self, error: &ClassifiedError) {
        warn!(target: "cvs::notify", kind = %error.kind, "{}", error.message);
    }
}

impl<F> ErrorNotifier for F
where
    F: Fn(&ClassifiedError) + Send + Sync,
{
    fn notify(&self, error: &ClassifiedError) {
        self(error)
    }
}

//! Single-shot session invalidation.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info};

/// Whoever owns the sign-in flow. Called at most once per latch cycle.
pub trait SessionOwner: Send + Sync {
    fn on_session_invalid(&self);
}

impl<F> SessionOwner for F
where
    F: Fn() + Send + Sync,
{
    fn on_session_invalid(&self) {
        self()
    }
}

struct Detached;

impl SessionOwner for Detached {
    fn on_session_invalid(&self) {}
}

/// "Already redirecting" latch shared by every request of one client.
///
/// The first Unauthorized failure sets the latch and notifies the owner;
/// later ones are dropped until [`SessionGuard::reset`], which a successful
/// sign-in performs.
pub struct SessionGuard {
    redirecting: AtomicBool,
    owner: Arc<dyn SessionOwner>,
}

impl SessionGuard {
    pub fn new(owner: Arc<dyn SessionOwner>) -> Self {
        Self {
            redirecting: AtomicBool::new(false),
            owner,
        }
    }

    /// Guard whose owner ignores notifications.
    pub fn detached() -> Self {
        Self::new(Arc::new(Detached))
    }

    /// Sets the latch. Returns `true` only for the caller that flipped it.
    pub fn try_acquire(&self) -> bool {
        self.redirecting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn is_held(&self) -> bool {
        self.redirecting.load(Ordering::Acquire)
    }

    pub fn reset(&self) {
        self.redirecting.store(false, Ordering::Release);
    }

    /// Reports an invalid session. Returns whether the owner was notified.
    pub fn signal_invalid(&self) -> bool {
        if self.try_acquire() {
            info!("session invalid, notifying session owner");
            self.owner.on_session_invalid();
            true
        } else {
            debug!("session invalidation already in progress");
            false
        }
    }
}

impl fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionGuard")
            .field("redirecting", &self.is_held())
            .finish_non_exhaustive()
    }
}

//! Resilient HTTP client for the campus volunteer-service (CVS) backend.
//!
//! Every request flows through the same pipeline:
//!
//! 1. the [`interceptor::InterceptorChain`] decorates it with credentials and
//!    a per-installation device identifier,
//! 2. a [`transport::Transport`] executes it,
//! 3. the chain unwraps the `{code, message, data}` envelope or turns the
//!    failure into a [`ClassifiedError`],
//! 4. the retrying invoker in [`retry`] decides whether to try again.
//!
//! Authentication failures are escalated once per invalidation to an
//! external [`session::SessionOwner`] through the [`session::SessionGuard`]
//! latch. The crate never clears credentials or navigates on its own.

#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod interceptor;
pub mod logging;
pub mod notify;
pub mod retry;
pub mod session;
pub mod transport;

mod coalesce;

pub use client::{BuildError, CvsClient, CvsClientBuilder};
pub use config::{ClientConfig, ConfigLoader};
pub use envelope::Envelope;
pub use error::{ClassifiedError, ErrorKind};
pub use interceptor::{Interceptor, RequestSpec, ResponseBody};
pub use notify::{ErrorNotifier, NoopNotifier, TracingNotifier};
pub use retry::{Classify, RawFailure, RetryError, RetryPolicy};
pub use session::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, Session, SessionGuard, SessionOwner,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

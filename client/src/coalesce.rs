//! Shares one in-flight execution between identical concurrent requests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use tracing::debug;

use crate::error::ClassifiedError;
use crate::interceptor::ResponseBody;

type SharedCall = Shared<BoxFuture<'static, Result<ResponseBody, ClassifiedError>>>;

#[derive(Default)]
pub(crate) struct InFlight {
    generation: AtomicU64,
    entries: Mutex<HashMap<String, (u64, SharedCall)>>,
}

impl InFlight {
    /// Joins the pending call for `key`, or starts one with `start`.
    pub(crate) async fn run<F>(
        &self,
        key: String,
        start: F,
    ) -> Result<ResponseBody, ClassifiedError>
    where
        F: FnOnce() -> BoxFuture<'static, Result<ResponseBody, ClassifiedError>>,
    {
        let (generation, call) = {
            let mut entries = match self.entries.lock() {
                Ok(entries) => entries,
                Err(poisoned) => poisoned.into_inner(),
            };
            match entries.get(&key) {
                Some((generation, call)) => {
                    debug!(key = %key, "joining in-flight request");
                    (*generation, call.clone())
                }
                None => {
                    let generation = self.generation.fetch_add(1, Ordering::Relaxed);
                    let call = start().shared();
                    entries.insert(key.clone(), (generation, call.clone()));
                    (generation, call)
                }
            }
        };

        let result = call.await;

        let mut entries = match self.entries.lock() {
            Ok(entries) => entries,
            Err(poisoned) => poisoned.into_inner(),
        };
        if entries.get(&key).is_some_and(|(g, _)| *g == generation) {
            entries.remove(&key);
        }
        result
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }
}

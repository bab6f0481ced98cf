//! Cancellable polling loop around a [`Reconciler`].

use super::{Reconciler, RetryPolicy, TickOutcome};
use crate::errors::{AppError, AppResult};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shared cancellation flag that also wakes up sleepers.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (flag, cvar) = &*self.inner;
        *flag.lock().unwrap_or_else(|e| e.into_inner()) = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Sleep up to `timeout`; returns `true` as soon as the token is cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (flag, cvar) = &*self.inner;
        let guard = flag.lock().unwrap_or_else(|e| e.into_inner());
        let (guard, _) = cvar
            .wait_timeout_while(guard, timeout, |cancelled| !*cancelled)
            .unwrap_or_else(|e| e.into_inner());
        *guard
    }
}

/// Tick immediately, then after every policy delay, until cancelled or
/// `max_ticks` ticks ran. Returns the number of ticks.
pub fn run_loop<F>(
    reconciler: &mut Reconciler,
    policy: &mut dyn RetryPolicy,
    token: &CancellationToken,
    max_ticks: Option<u64>,
    mut on_tick: F,
) -> u64
where
    F: FnMut(&mut Reconciler, &TickOutcome),
{
    let mut ticks = 0;

    while !token.is_cancelled() && max_ticks.is_none_or(|max| ticks < max) {
        let outcome = reconciler.tick();
        ticks += 1;
        on_tick(reconciler, &outcome);

        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        let delay = policy.next_delay(outcome.is_failure());
        tracing::trace!(policy = policy.name(), ?delay, "next reconciler tick");
        if token.wait_timeout(delay) {
            break;
        }
    }

    ticks
}

/// Background thread running [`run_loop`].
pub struct PollingTask {
    token: CancellationToken,
    handle: Option<JoinHandle<Reconciler>>,
}

impl PollingTask {
    pub fn spawn(
        mut reconciler: Reconciler,
        mut policy: Box<dyn RetryPolicy>,
        token: CancellationToken,
    ) -> AppResult<Self> {
        let worker_token = token.clone();
        let handle = thread::Builder::new()
            .name("reconciler".into())
            .spawn(move || {
                run_loop(
                    &mut reconciler,
                    policy.as_mut(),
                    &worker_token,
                    None,
                    |_, _| {},
                );
                reconciler
            })
            .map_err(AppError::Io)?;

        Ok(Self {
            token,
            handle: Some(handle),
        })
    }

    /// Cancel and wait for the loop; hands the reconciler back.
    pub fn stop(mut self) -> Option<Reconciler> {
        self.token.cancel();
        self.handle.take().and_then(|h| h.join().ok())
    }
}

impl Drop for PollingTask {
    fn drop(&mut self) {
        self.token.cancel();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

//! Async resource: one producer, observable loading/error/data state
//!
//! A resource wraps a zero-argument async producer. `run` invokes it and
//! records the outcome; `reset` returns to `Idle`. State lives in a
//! `tokio::sync::watch` channel so any number of consumers can observe
//! transitions.
//!
//! Every run takes a generation number. A completion is applied only while
//! its generation is still the latest one issued, so overlapping runs can no
//! longer let a slow, older request overwrite a newer result, and a `reset`
//! is never undone by a request that was already in flight. Producers are
//! never cancelled; stale results are simply dropped.

use super::domain::{ResourceState, ResourceStatus};
use crate::shared::errors::{AppError, AppResult};
use futures::future::{BoxFuture, FutureExt};
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub type ProducerFuture<T> = BoxFuture<'static, AppResult<T>>;

/// Zero-argument async function that performs one fetch
pub type Producer<T> = Arc<dyn Fn() -> ProducerFuture<T> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOptions {
    /// Start one run as soon as the resource is created
    pub auto_run: bool,
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self { auto_run: true }
    }
}

impl ResourceOptions {
    pub fn manual() -> Self {
        Self { auto_run: false }
    }
}

struct Inner<T> {
    name: String,
    producer: Producer<T>,
    state: watch::Sender<ResourceState<T>>,
    generation: AtomicU64,
}

/// Shared handle to an async resource; clones observe and drive the same state
pub struct AsyncResource<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AsyncResource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for AsyncResource<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncResource")
            .field("name", &self.inner.name)
            .field("status", &self.inner.state.borrow().status)
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}

impl<T> AsyncResource<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new(name: impl Into<String>, producer: Producer<T>, options: ResourceOptions) -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        let resource = Self {
            inner: Arc::new(Inner {
                name: name.into(),
                producer,
                state,
                generation: AtomicU64::new(0),
            }),
        };

        if options.auto_run {
            resource.auto_run();
        }
        resource
    }

    /// Build a resource from any async closure
    pub fn from_fn<F, Fut>(name: impl Into<String>, options: ResourceOptions, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = AppResult<T>> + Send + 'static,
    {
        let producer: Producer<T> = Arc::new(move || f().boxed());
        Self::new(name, producer, options)
    }

    fn auto_run(&self) {
        match Handle::try_current() {
            Ok(handle) => {
                let ticket = self.begin();
                handle.spawn(ticket.execute());
            }
            Err(_) => {
                tracing::warn!(resource = %self.inner.name, "auto-run requested outside a tokio runtime");
                self.inner.state.send_modify(|state| {
                    state.fail(AppError::InternalError(format!(
                        "No async runtime available to load '{}'",
                        self.inner.name
                    )))
                });
            }
        }
    }

    /// Invoke the producer and record its outcome
    ///
    /// Never fails: producer errors and panics end up in `error`.
    pub async fn run(&self) {
        self.begin().execute().await
    }

    /// Start a run on a background task
    ///
    /// The resource is `Loading` by the time this returns.
    pub fn spawn_run(&self) -> JoinHandle<()> {
        let ticket = self.begin();
        tokio::spawn(ticket.execute())
    }

    /// Clear data and error and return to `Idle`
    ///
    /// In-flight runs keep going but their results are discarded.
    pub fn reset(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner
            .state
            .send_modify(|state| *state = ResourceState::default());
        tracing::debug!(resource = %self.inner.name, "reset");
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn state(&self) -> ResourceState<T> {
        self.inner.state.borrow().clone()
    }

    pub fn status(&self) -> ResourceStatus {
        self.inner.state.borrow().status
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.borrow().data.clone()
    }

    pub fn error(&self) -> Option<AppError> {
        self.inner.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<ResourceState<T>> {
        self.inner.state.subscribe()
    }

    fn begin(&self) -> RunTicket<T> {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.send_modify(ResourceState::begin_loading);
        tracing::debug!(resource = %self.inner.name, generation, "run started");

        // The producer is invoked right away so overlapping runs start in call order.
        let producer = Arc::clone(&self.inner.producer);
        let future = match std::panic::catch_unwind(AssertUnwindSafe(|| producer())) {
            Ok(future) => future,
            Err(panic) => {
                log_panic(&self.inner.name, panic.as_ref());
                futures::future::ready(Err(AppError::unknown())).boxed()
            }
        };

        RunTicket {
            inner: Arc::clone(&self.inner),
            generation,
            future: Some(future),
            settled: false,
        }
    }
}

/// One started run; dropping it unsettled still takes the resource out of `Loading`
struct RunTicket<T> {
    inner: Arc<Inner<T>>,
    generation: u64,
    future: Option<ProducerFuture<T>>,
    settled: bool,
}

impl<T> RunTicket<T> {
    async fn execute(mut self) {
        let outcome = match self.future.take() {
            Some(future) => AssertUnwindSafe(future).catch_unwind().await,
            None => Ok(Err(AppError::unknown())),
        };

        let result = outcome.unwrap_or_else(|panic| {
            log_panic(&self.inner.name, panic.as_ref());
            Err(AppError::unknown())
        });
        self.settle(result);
    }

    fn is_current(&self) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == self.generation
    }

    fn settle(&mut self, result: AppResult<T>) {
        self.settled = true;

        let generation = self.generation;
        let name = &self.inner.name;
        let applied = self.inner.state.send_if_modified(|state| {
            // Checked under the channel lock so a concurrent begin/reset is ordered
            if self.inner.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            match result {
                Ok(data) => state.succeed(data),
                Err(error) => {
                    tracing::debug!(resource = %name, generation, %error, "run failed");
                    state.fail(error);
                }
            }
            true
        });

        if !applied {
            tracing::debug!(resource = %name, generation, "discarded stale completion");
        }
    }
}

impl<T> Drop for RunTicket<T> {
    fn drop(&mut self) {
        if self.settled || !self.is_current() {
            return;
        }
        let generation = self.generation;
        self.inner.state.send_if_modified(|state| {
            if self.inner.generation.load(Ordering::SeqCst) != generation || !state.is_loading() {
                return false;
            }
            state.abandon();
            true
        });
        tracing::debug!(resource = %self.inner.name, generation, "run dropped before completion");
    }
}

fn log_panic(name: &str, panic: &(dyn std::any::Any + Send)) {
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string());
    tracing::warn!(resource = %name, %message, "producer panicked");
}

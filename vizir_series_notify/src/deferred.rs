// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-slot, cancelable deferred task.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Runs at most one closure after a fixed delay.
///
/// Scheduling again replaces the pending closure and restarts the delay. Dropping the task
/// cancels anything still pending.
#[derive(Debug)]
pub struct DeferredTask {
    runtime: Handle,
    delay: Duration,
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    task: JoinHandle<()>,
    cancelled: Arc<AtomicBool>,
}

impl DeferredTask {
    /// Creates a task slot with nothing scheduled.
    pub fn idle(runtime: Handle, delay: Duration) -> Self {
        Self {
            runtime,
            delay,
            pending: None,
        }
    }

    /// Schedules `f` to run on `runtime` after `delay`.
    pub fn schedule(runtime: Handle, delay: Duration, f: impl FnOnce() + Send + 'static) -> Self {
        let mut task = Self::idle(runtime, delay);
        task.reschedule(f);
        task
    }

    /// Cancels whatever is pending and schedules `f` after the full delay.
    pub fn reschedule(&mut self, f: impl FnOnce() + Send + 'static) {
        self.cancel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let delay = self.delay;
        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if !flag.load(Ordering::Acquire) {
                f();
            }
        });
        self.pending = Some(Pending { task, cancelled });
    }

    /// Cancels the pending closure, if any. Returns whether one was still waiting to run.
    ///
    /// A closure that has already started (on another worker thread) runs to completion.
    pub fn cancel(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        pending.cancelled.store(true, Ordering::Release);
        let waiting = !pending.task.is_finished();
        pending.task.abort();
        waiting
    }

    /// Returns whether a closure is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| !pending.task.is_finished())
    }

    /// Returns the runtime closures are spawned on.
    pub fn runtime(&self) -> &Handle {
        &self.runtime
    }

    /// Returns the delay applied to each scheduled closure.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Drop for DeferredTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

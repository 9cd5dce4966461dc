//! UI-thread task submission.
//!
//! The web runtime faults when called off its thread, so every call into it is
//! submitted here instead of made directly.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

/// A unit of work for the UI thread.
pub type UiTask = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks on the designated thread, in submission order.
///
/// Submission never blocks and never reports failure back to the submitter.
pub trait UiExecutor: Send + Sync {
    fn submit(&self, task: UiTask);
}

/// Type alias for shared executor reference.
pub type UiExecutorRef = Arc<dyn UiExecutor>;

/// Runs each task immediately on the calling thread.
///
/// For hosts already on their UI thread, and for tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl UiExecutor for InlineExecutor {
    fn submit(&self, task: UiTask) {
        task();
    }
}

/// Dedicated thread draining a task queue.
///
/// Stands in for a platform UI looper in headless hosts and tests. A panicking
/// task is logged and does not stop the queue.
pub struct QueueExecutor {
    sender: Option<Sender<UiTask>>,
    handle: Option<JoinHandle<()>>,
}

impl QueueExecutor {
    /// Start the worker thread with the given name.
    pub fn spawn(name: &str) -> std::io::Result<Self> {
        let (sender, receiver) = crossbeam_channel::unbounded::<UiTask>();
        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || run_queue(receiver))?;

        tracing::debug!(thread = name, "ui_queue_started");

        Ok(Self {
            sender: Some(sender),
            handle: Some(handle),
        })
    }

    /// Block until every task submitted so far has run.
    pub fn drain(&self) {
        let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);
        self.submit(Box::new(move || {
            let _ = done_tx.send(());
        }));
        let _ = done_rx.recv();
    }

    /// Stop accepting tasks, run what is queued, and join the thread.
    pub fn shutdown(&mut self) {
        self.sender.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn run_queue(receiver: Receiver<UiTask>) {
    for task in receiver {
        if catch_unwind(AssertUnwindSafe(task)).is_err() {
            tracing::warn!("ui task panicked");
        }
    }
    tracing::debug!("ui_queue_stopped");
}

impl UiExecutor for QueueExecutor {
    fn submit(&self, task: UiTask) {
        let Some(sender) = &self.sender else {
            tracing::debug!(reason = "shut_down", "drop_ui_task");
            return;
        };
        if sender.send(task).is_err() {
            tracing::debug!(reason = "disconnected", "drop_ui_task");
        }
    }
}

impl Drop for QueueExecutor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_inline_runs_immediately() {
        let ran = Arc::new(Mutex::new(false));
        let flag = ran.clone();

        InlineExecutor.submit(Box::new(move || *flag.lock().unwrap() = true));

        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn test_queue_preserves_order_and_thread() {
        let executor = QueueExecutor::spawn("test-ui").unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..20 {
            let seen = seen.clone();
            executor.submit(Box::new(move || {
                let thread = std::thread::current().name().map(str::to_string);
                seen.lock().unwrap().push((i, thread));
            }));
        }
        executor.drain();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 20);
        for (expected, (i, thread)) in seen.iter().enumerate() {
            assert_eq!(*i, expected);
            assert_eq!(thread.as_deref(), Some("test-ui"));
        }
    }

    #[test]
    fn test_queue_survives_panicking_task() {
        let executor = QueueExecutor::spawn("test-ui-panic").unwrap();
        let ran = Arc::new(Mutex::new(false));
        let flag = ran.clone();

        executor.submit(Box::new(|| panic!("boom")));
        executor.submit(Box::new(move || *flag.lock().unwrap() = true));
        executor.drain();

        assert!(*ran.lock().unwrap());
    }

    #[test]
    fn test_submit_after_shutdown_is_dropped() {
        let mut executor = QueueExecutor::spawn("test-ui-shutdown").unwrap();
        executor.shutdown();

        // Must not panic or block.
        executor.submit(Box::new(|| unreachable!()));
        executor.drain();
    }
}

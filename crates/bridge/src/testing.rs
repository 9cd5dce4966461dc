//! Test doubles for the web runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::handle::WebviewHandle;

/// Webview that records every script it is asked to run.
///
/// Also records the name of the thread each script ran on, so callers can
/// check that evaluation happened on the UI thread.
#[derive(Debug)]
pub struct RecordingWebview {
    alive: AtomicBool,
    calls: Mutex<Vec<(String, Option<String>)>>,
}

impl RecordingWebview {
    pub fn new() -> Self {
        Self {
            alive: AtomicBool::new(true),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Simulate the hosting view being torn down.
    pub fn destroy(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    pub fn scripts(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(script, _)| script.clone()).collect())
            .unwrap_or_default()
    }

    pub fn threads(&self) -> Vec<Option<String>> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(|(_, thread)| thread.clone()).collect())
            .unwrap_or_default()
    }
}

impl Default for RecordingWebview {
    fn default() -> Self {
        Self::new()
    }
}

impl WebviewHandle for RecordingWebview {
    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    fn evaluate_script(&self, script: &str) {
        let thread = std::thread::current().name().map(str::to_string);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((script.to_string(), thread));
        }
    }
}

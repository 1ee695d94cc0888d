//! Recording backend for tests.

use crate::backend::CommandRunner;
use crate::error::Result;
use crate::types::{Invocation, WaitStatus};
use std::sync::Mutex;

/// Records every invocation and answers with a scripted status.
///
/// By default every command succeeds. [`RecordingRunner::fail_when`] makes
/// commands matching a predicate return the given status.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    failure: Option<(Box<dyn Fn(&Invocation) -> bool + Send + Sync>, WaitStatus)>,
}

impl RecordingRunner {
    /// Runner where every command succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runner that fails commands matching `predicate` with `status`.
    pub fn fail_when<F>(predicate: F, status: WaitStatus) -> Self
    where
        F: Fn(&Invocation) -> bool + Send + Sync + 'static,
    {
        Self {
            calls: Mutex::new(Vec::new()),
            failure: Some((Box::new(predicate), status)),
        }
    }

    /// Invocations seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Rendered command lines seen so far.
    pub fn lines(&self) -> Vec<String> {
        self.calls().iter().map(ToString::to_string).collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<WaitStatus> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }
        match &self.failure {
            Some((predicate, status)) if predicate(invocation) => Ok(*status),
            _ => Ok(WaitStatus::SUCCESS),
        }
    }
}

// src/progress.rs
/// Lightweight progress reporting used by long-running operations (fetch/extract/export).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of steps (if known).
    fn begin(&mut self, _steps: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one step completes (fetched, parsed, extracted).
    fn step_done(&mut self, _step: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Collects every call, for tests and for callers that want a transcript.
#[derive(Debug, Default)]
pub struct Transcript {
    pub lines: Vec<String>,
    pub steps: Vec<String>,
    pub finished: bool,
}

impl Progress for Transcript {
    fn log(&mut self, msg: &str) {
        self.lines.push(s!(msg));
    }
    fn step_done(&mut self, step: &str) {
        self.steps.push(s!(step));
    }
    fn finish(&mut self) {
        self.finished = true;
    }
}

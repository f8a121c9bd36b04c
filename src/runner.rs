//! The `describe`/`it` block runner.
//!
//! A [`Runner`] owns every piece of mutable harness state: counters, hook
//! lists, the failure accumulator, and the output sink. Only one `describe`
//! scope may be open at a time; inside it, output is buffered and assertion
//! failures are recorded rather than returned, then the first one is
//! reported once the scope has been flushed and reset.

use std::mem;
use std::panic::{self, AssertUnwindSafe};

use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use serde::Serialize;
use tracing::{debug, warn};

use crate::calls::record_call;
use crate::config::RunnerConfig;
use crate::errors::{Failure, Outcome, TestError};
use crate::message::Message;
use crate::output::{Block, Console, OutputSink, StdoutConsole};

/// A before/after callback run around every `it` of the open `describe`.
pub type Hook = Box<dyn FnMut(&mut Runner) -> Outcome>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookKind {
    Before,
    After,
}

/// Pass/fail accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub correct: usize,
    pub incorrect: usize,
}

/// Mutable state shared by the block runner and the assertion engine.
#[derive(Default)]
pub struct RunnerState {
    pub correct: usize,
    pub incorrect: usize,
    describing: bool,
    before: Vec<Hook>,
    after: Vec<Hook>,
    failures: Vec<Failure>,
}

impl RunnerState {
    pub fn is_describing(&self) -> bool {
        self.describing
    }

    pub fn recorded_failures(&self) -> &[Failure] {
        &self.failures
    }

    pub(crate) fn record_failure(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    fn hooks_mut(&mut self, kind: HookKind) -> &mut Vec<Hook> {
        match kind {
            HookKind::Before => &mut self.before,
            HookKind::After => &mut self.after,
        }
    }

    fn hook_count(&self) -> usize {
        self.before.len() + self.after.len()
    }

    /// Leaves the describe scope, returning the failures it recorded.
    fn end_scope(&mut self) -> Vec<Failure> {
        self.describing = false;
        self.before.clear();
        self.after.clear();
        mem::take(&mut self.failures)
    }
}

pub struct Runner {
    pub(crate) state: RunnerState,
    pub(crate) sink: OutputSink,
    pub(crate) rng: Xoshiro256StarStar,
}

impl Runner {
    /// Creates a runner writing to stdout.
    pub fn new(config: RunnerConfig) -> Self {
        let console = StdoutConsole::new(config.use_colors);
        Self::with_console(config, Box::new(console))
    }

    pub fn with_console(config: RunnerConfig, console: Box<dyn Console>) -> Self {
        let rng = match config.seed {
            Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
            None => Xoshiro256StarStar::from_entropy(),
        };
        Self {
            state: RunnerState::default(),
            sink: OutputSink::new(config.render_mode, console),
            rng,
        }
    }

    pub fn state(&self) -> &RunnerState {
        &self.state
    }

    pub fn sink(&self) -> &OutputSink {
        &self.sink
    }

    pub fn is_describing(&self) -> bool {
        self.state.describing
    }

    pub fn summary(&self) -> Summary {
        Summary {
            correct: self.state.correct,
            incorrect: self.state.incorrect,
        }
    }

    /// Writes a diagnostic line from code under test.
    ///
    /// Inside a `describe` the line is captured into the buffered report;
    /// otherwise it goes straight to the console.
    pub fn log(&mut self, message: impl AsRef<str>) {
        self.sink.write(message.as_ref(), false);
    }

    /// Runs a group of test cases as one buffered report.
    pub fn describe<F>(&mut self, message: impl Into<Message>, body: F) -> Outcome
    where
        F: FnOnce(&mut Runner) -> Outcome,
    {
        if self.state.describing {
            warn!("describe called inside another describe");
            return Err(TestError::NestedDescribe);
        }
        record_call("describe");

        let title = message.into().resolve();
        debug!(title = %title, "entering describe");
        self.state.describing = true;
        self.sink.begin_scope();
        self.sink.open_block(Block::Describe, &title);

        let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *self)));

        self.sink.close_block();
        self.sink.end_scope();
        let failures = self.state.end_scope();
        debug!(title = %title, failures = failures.len(), "leaving describe");

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        };
        match failures.into_iter().next() {
            Some(first) => Err(first.into()),
            None => outcome,
        }
    }

    /// Runs one test case between the registered before and after hooks.
    pub fn it<F>(&mut self, message: impl Into<Message>, body: F) -> Outcome
    where
        F: FnOnce(&mut Runner) -> Outcome,
    {
        record_call("it");
        let title = message.into().resolve();
        debug!(title = %title, "running it");
        self.sink.open_block(Block::It, &title);

        let result = panic::catch_unwind(AssertUnwindSafe(|| self.run_case(body)));

        self.sink.close_block();
        match result {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    pub fn before<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Runner) -> Outcome + 'static,
    {
        self.register_hook(HookKind::Before, Box::new(hook));
    }

    pub fn after<F>(&mut self, hook: F)
    where
        F: FnMut(&mut Runner) -> Outcome + 'static,
    {
        self.register_hook(HookKind::After, Box::new(hook));
    }

    fn register_hook(&mut self, kind: HookKind, hook: Hook) {
        if !self.state.describing {
            warn!(?kind, "hook registered outside describe was discarded");
            return;
        }
        self.state.hooks_mut(kind).push(hook);
        debug!(hooks = self.state.hook_count(), "registered hook");
    }

    fn run_case<F>(&mut self, body: F) -> Outcome
    where
        F: FnOnce(&mut Runner) -> Outcome,
    {
        self.run_hooks(HookKind::Before)?;
        let result = panic::catch_unwind(AssertUnwindSafe(|| body(&mut *self)));
        let after = self.run_hooks(HookKind::After);
        match result {
            Ok(outcome) => after.and(outcome),
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    /// Runs hooks in registration order, stopping at the first error.
    ///
    /// The list is detached while it runs so hooks can use the runner, and
    /// put back even if a hook panics. Hooks registered meanwhile are
    /// appended afterwards.
    fn run_hooks(&mut self, kind: HookKind) -> Outcome {
        let mut hooks = mem::take(self.state.hooks_mut(kind));
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            hooks.iter_mut().try_for_each(|hook| hook(&mut *self))
        }));
        let added = mem::replace(self.state.hooks_mut(kind), hooks);
        self.state.hooks_mut(kind).extend(added);
        match result {
            Ok(outcome) => outcome,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(RunnerConfig::default())
    }
}

//! Assertion primitives.
//!
//! Every assertion funnels into [`Runner::expect_with`], which renders the
//! report line, updates the counters, and decides whether a failure is
//! recorded (inside `describe`) or returned right away.

use serde::Serialize;
use tracing::trace;

use crate::calls::record_call;
use crate::errors::{guard, Failure, Outcome, TestError};
use crate::inspect::inspect;
use crate::message::{combine, format, Message};
use crate::output::Severity;
use crate::runner::Runner;

const DEFAULT_FAILURE: &str = "Invalid";
const DEFAULT_NO_ERROR: &str = "Unexpected error was raised";
const DEFAULT_EXPECT_ERROR: &str = "Unexpected error was raised.";

/// Marks a failed assertion as a missed bonus rather than a hard failure.
#[derive(Debug)]
pub enum ExtraCredit {
    Flag,
    Message(Message),
}

#[derive(Debug, Default)]
pub struct ExpectOptions {
    pub success_msg: Option<String>,
    pub extra_credit: Option<ExtraCredit>,
}

impl ExpectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success_msg(mut self, message: impl Into<String>) -> Self {
        self.success_msg = Some(message.into());
        self
    }

    pub fn extra_credit(mut self) -> Self {
        self.extra_credit = Some(ExtraCredit::Flag);
        self
    }

    pub fn extra_credit_msg(mut self, message: impl Into<Message>) -> Self {
        self.extra_credit = Some(ExtraCredit::Message(message.into()));
        self
    }
}

impl Runner {
    pub fn expect(&mut self, passed: bool, message: impl Into<Message>) -> Outcome {
        self.expect_with(passed, message, ExpectOptions::default())
    }

    pub fn expect_with(
        &mut self,
        passed: bool,
        message: impl Into<Message>,
        options: ExpectOptions,
    ) -> Outcome {
        record_call("expect");
        if passed {
            let line = match options.success_msg.filter(|m| !m.is_empty()) {
                Some(detail) => format!("{}: {}", Severity::Passed.label(), detail),
                None => Severity::Passed.label().to_string(),
            };
            trace!(line = %line, "assertion passed");
            self.sink.report(Severity::Passed, &line);
            self.state.correct += 1;
            return Ok(());
        }

        let mut text = message.into().resolve();
        if text.is_empty() {
            text = DEFAULT_FAILURE.to_string();
        }

        // TODO: extra credit has no separate score yet; it only reports as missed.
        if let Some(extra) = options.extra_credit {
            let detail = match extra {
                ExtraCredit::Flag => None,
                ExtraCredit::Message(message) => Some(message.resolve()),
            };
            let line = combine([Some(Severity::Missed.label().to_string()), detail], ": ");
            trace!(line = %line, "assertion missed");
            self.sink.report(Severity::Missed, &line);
            self.state.incorrect += 1;
            return Ok(());
        }

        trace!(message = %text, "assertion failed");
        self.sink
            .report(Severity::Failed, &format!("{}: {}", Severity::Failed.label(), text));
        let failure = Failure::new(text);
        if self.state.is_describing() {
            self.state.record_failure(failure);
            self.state.incorrect += 1;
            Ok(())
        } else {
            Err(failure.into())
        }
    }

    pub fn assert_equals<T>(
        &mut self,
        actual: &T,
        expected: &T,
        message: impl Into<Message>,
    ) -> Outcome
    where
        T: PartialEq + Serialize + ?Sized,
    {
        self.assert_equals_with(actual, expected, message, ExpectOptions::default())
    }

    pub fn assert_equals_with<T>(
        &mut self,
        actual: &T,
        expected: &T,
        message: impl Into<Message>,
        mut options: ExpectOptions,
    ) -> Outcome
    where
        T: PartialEq + Serialize + ?Sized,
    {
        record_call("assert_equals");
        if actual != expected {
            let detail = format!(
                "Expected: {}, instead got: {}",
                inspect(expected),
                inspect(actual)
            );
            let text = format(detail, message);
            self.expect_with(false, text, options)
        } else {
            if options.success_msg.as_deref().map_or(true, str::is_empty) {
                options.success_msg = Some(format!("Value == {}", inspect(expected)));
            }
            self.expect_with(true, Message::Empty, options)
        }
    }

    pub fn assert_not_equals<T>(&mut self, a: &T, b: &T, message: impl Into<Message>) -> Outcome
    where
        T: PartialEq + Serialize + ?Sized,
    {
        self.assert_not_equals_with(a, b, message, ExpectOptions::default())
    }

    pub fn assert_not_equals_with<T>(
        &mut self,
        a: &T,
        b: &T,
        message: impl Into<Message>,
        mut options: ExpectOptions,
    ) -> Outcome
    where
        T: PartialEq + Serialize + ?Sized,
    {
        record_call("assert_not_equals");
        if a == b {
            let text = format(format!("Not Expected: {}", inspect(a)), message);
            self.expect_with(false, text, options)
        } else {
            if options.success_msg.as_deref().map_or(true, str::is_empty) {
                options.success_msg = Some(format!("Value != {}", inspect(b)));
            }
            self.expect_with(true, Message::Empty, options)
        }
    }

    pub fn assert_similar<A, B>(
        &mut self,
        actual: &A,
        expected: &B,
        message: impl Into<Message>,
    ) -> Outcome
    where
        A: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.assert_similar_with(actual, expected, message, ExpectOptions::default())
    }

    /// Compares the inspected forms of two values.
    pub fn assert_similar_with<A, B>(
        &mut self,
        actual: &A,
        expected: &B,
        message: impl Into<Message>,
        options: ExpectOptions,
    ) -> Outcome
    where
        A: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        record_call("assert_similar");
        let actual = inspect(actual);
        let expected = inspect(expected);
        self.assert_equals_with(actual.as_str(), expected.as_str(), message, options)
    }

    pub fn assert_not_similar<A, B>(
        &mut self,
        actual: &A,
        expected: &B,
        message: impl Into<Message>,
    ) -> Outcome
    where
        A: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        self.assert_not_similar_with(actual, expected, message, ExpectOptions::default())
    }

    pub fn assert_not_similar_with<A, B>(
        &mut self,
        actual: &A,
        expected: &B,
        message: impl Into<Message>,
        options: ExpectOptions,
    ) -> Outcome
    where
        A: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        record_call("assert_not_similar");
        let actual = inspect(actual);
        let expected = inspect(expected);
        self.assert_not_equals_with(actual.as_str(), expected.as_str(), message, options)
    }

    /// Passes when `f` completes without error.
    ///
    /// `f` gets the runner so it can assert. Assertion failures and
    /// structural errors from `f` are returned unchanged. Other errors and
    /// panics become a failed assertion.
    pub fn expect_no_error<F>(&mut self, message: impl Into<Message>, f: F) -> Outcome
    where
        F: FnOnce(&mut Runner) -> Outcome,
    {
        record_call("expect_no_error");
        match guard(|| f(&mut *self)) {
            Ok(()) => self.expect(true, Message::Empty),
            Err(TestError::Host(error)) => {
                let mut text = message.into().resolve();
                if text.is_empty() {
                    text = DEFAULT_NO_ERROR.to_string();
                }
                self.expect(false, format!("{}: {}", text, error))
            }
            Err(err) => Err(err),
        }
    }

    pub fn expect_error<F>(&mut self, message: impl Into<Message>, f: F) -> Outcome
    where
        F: FnOnce(&mut Runner) -> Outcome,
    {
        self.expect_error_with(message, f, ExpectOptions::default())
    }

    /// Passes when `f` returns any error or panics.
    pub fn expect_error_with<F>(
        &mut self,
        message: impl Into<Message>,
        f: F,
        options: ExpectOptions,
    ) -> Outcome
    where
        F: FnOnce(&mut Runner) -> Outcome,
    {
        record_call("expect_error");
        let passed = match guard(|| f(&mut *self)) {
            Ok(()) => false,
            Err(err) => {
                let line = format!(
                    "{}Expected error was thrown:{} {}",
                    self.sink.filter("<b>", false),
                    self.sink.filter("</b>", false),
                    err
                );
                self.log(line);
                true
            }
        };
        if passed {
            return self.expect_with(true, Message::Empty, options);
        }
        let mut text = message.into().resolve();
        if text.is_empty() {
            text = DEFAULT_EXPECT_ERROR.to_string();
        }
        self.expect_with(false, text, options)
    }
}

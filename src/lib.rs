//! A small synchronous test harness.
//!
//! Tests are grouped with [`Runner::describe`] and [`Runner::it`], wrapped by
//! [`Runner::before`]/[`Runner::after`] hooks, and checked with assertions
//! such as [`Runner::assert_equals`]. Reports render as plain text or HTML
//! fragments depending on [`RenderMode`].
//!
//! ```
//! use kata_harness::{CapturedConsole, RenderMode, Runner, RunnerConfig};
//!
//! let console = CapturedConsole::new();
//! let config = RunnerConfig::default().with_render_mode(RenderMode::Text);
//! let mut runner = Runner::with_console(config, Box::new(console.clone()));
//!
//! runner
//!     .describe("addition", |t| {
//!         t.it("adds small numbers", |t| t.assert_equals(&(1 + 1), &2, ""))
//!     })
//!     .unwrap();
//!
//! assert!(console.text().contains("Test Passed: Value == 2"));
//! ```

pub mod assertions;
pub mod calls;
pub mod config;
pub mod errors;
pub mod inspect;
pub mod message;
pub mod output;
pub mod random;
pub mod runner;

pub use crate::assertions::{ExpectOptions, ExtraCredit};
pub use crate::calls::call_count;
pub use crate::config::{RenderMode, RunnerConfig};
pub use crate::errors::{Failure, Outcome, TestError};
pub use crate::inspect::inspect;
pub use crate::message::{combine, format, Message};
pub use crate::output::{CapturedConsole, Console, NullConsole, OutputSink, StdoutConsole};
pub use crate::runner::{Hook, Runner, RunnerState, Summary};

pub mod prelude {
    pub use crate::{
        inspect, ExpectOptions, Message, Outcome, RenderMode, Runner, RunnerConfig, TestError,
    };
}

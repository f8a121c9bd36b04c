//! Call instrumentation for the harness's own operations.
//!
//! Every assertion and block operation records itself here under its Rust
//! name so the harness's test suite can verify how often each path ran.
//! The table lives per thread: a harness run is single-threaded, and Rust's
//! test runner executes each `#[test]` on its own thread.

use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    static CALLS: RefCell<HashMap<String, usize>> = RefCell::new(HashMap::new());
}

/// Increments the invocation count for `name`.
pub fn record_call(name: &str) {
    CALLS.with(|calls| {
        *calls.borrow_mut().entry(name.to_string()).or_insert(0) += 1;
    });
}

/// Returns how many times `name` has been recorded, or 0.
pub fn call_count(name: &str) -> usize {
    CALLS.with(|calls| calls.borrow().get(name).copied().unwrap_or(0))
}

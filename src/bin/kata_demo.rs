//! Example kata suite for the harness.
//!
//! Runs a few katas through `describe`/`it` and prints the report.
//!
//! ## Usage
//! ```bash
//! cargo run --bin kata-demo -- --html --seed 7
//! RUST_LOG=kata_harness=debug cargo run --bin kata-demo -- --fail
//! ```

use std::cell::Cell;
use std::collections::BTreeMap;
use std::rc::Rc;

use clap::Parser;
use kata_harness::prelude::*;
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

// ============================================================================
// ARGUMENTS
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "kata-demo",
    version,
    about = "Run the bundled example katas through the test harness."
)]
struct DemoArgs {
    /// Render the report as HTML fragments instead of text.
    #[arg(long)]
    html: bool,
    /// Seed for the random test data.
    #[arg(long)]
    seed: Option<u64>,
    /// Include a deliberately failing case and a missed bonus.
    #[arg(long)]
    fail: bool,
    /// Print the pass/fail summary as JSON after the report.
    #[arg(long)]
    json: bool,
    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// ============================================================================
// KATAS UNDER TEST
// ============================================================================

fn fizzbuzz(n: u32) -> String {
    match (n % 3, n % 5) {
        (0, 0) => "FizzBuzz".to_string(),
        (0, _) => "Fizz".to_string(),
        (_, 0) => "Buzz".to_string(),
        _ => n.to_string(),
    }
}

fn word_counts(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for word in text.split_whitespace() {
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    counts
}

fn parse_age(input: &str) -> Result<u32, TestError> {
    input.trim().parse::<u32>().map_err(TestError::host)
}

// ============================================================================
// SUITE
// ============================================================================

fn run_suite(runner: &mut Runner, include_failures: bool) -> Outcome {
    runner.describe("fizzbuzz", |t| {
        let cases = Rc::new(Cell::new(0));
        let counter = cases.clone();
        t.before(move |_| {
            counter.set(counter.get() + 1);
            Ok(())
        });

        t.it("handles multiples of three and five", |t| {
            t.assert_equals(&fizzbuzz(3), &"Fizz".to_string(), "three")?;
            t.assert_equals(&fizzbuzz(10), &"Buzz".to_string(), "ten")?;
            t.assert_equals(&fizzbuzz(30), &"FizzBuzz".to_string(), "thirty")
        })?;

        t.it("passes other numbers through", |t| {
            let n = t.random_number() * 15 + 1;
            t.log(format!("checking {}", n));
            t.assert_equals(&fizzbuzz(n), &n.to_string(), "")
        })?;

        if include_failures {
            t.it("reports a wrong expectation", |t| {
                t.assert_equals(&fizzbuzz(3), &"3".to_string(), "deliberate")?;
                t.expect_with(
                    false,
                    "zero is not handled",
                    ExpectOptions::new().extra_credit_msg("bonus: zero"),
                )
            })?;
        }

        let ran = cases.get();
        t.expect_with(
            ran >= 2,
            format!("before hook ran {} times", ran),
            ExpectOptions::new().success_msg("before hook ran for every case"),
        )
    })?;

    runner.describe("word counts", |t| {
        t.it("counts case-insensitively", |t| {
            let words = t.randomize(&["the", "cat", "The", "hat"]);
            let counts = word_counts(&words.join(" "));
            t.assert_similar(&counts, &serde_json::json!({"cat": 1, "hat": 1, "the": 2}), "")?;
            t.assert_not_similar(&counts, &serde_json::json!({}), "")
        })?;

        t.it("samples a known word", |t| {
            let pool = ["alpha", "beta", "gamma"];
            let picked = t.sample(&pool).copied().unwrap_or_default();
            t.expect(
                pool.contains(&picked),
                Message::lazy(move || format!("unknown word {}", picked)),
            )
        })
    })?;

    runner.describe("parse_age", |t| {
        t.it("rejects garbage", |t| {
            t.expect_error("garbage should not parse", |_| {
                parse_age("abc").map(|_| ())
            })
        })?;
        t.it("accepts digits", |t| {
            t.expect_no_error("digits should parse", |_| {
                parse_age(" 42 ").map(|_| ())
            })?;
            let token = t.random_token();
            t.assert_not_equals(&token, &String::new(), "token")
        })
    })
}

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = DemoArgs::parse();
    let mut config = RunnerConfig::default();
    if args.html {
        config = config.with_render_mode(RenderMode::Html);
    }
    if args.no_color {
        config = config.with_colors(false);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut runner = Runner::new(config);
    let outcome = run_suite(&mut runner, args.fail);

    if args.json {
        let summary = serde_json::to_string(&runner.summary()).into_diagnostic()?;
        println!("{}", summary);
    }

    outcome?;
    Ok(())
}

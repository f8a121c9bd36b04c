//! Report rendering.
//!
//! The [`OutputSink`] either writes lines straight to the host [`Console`] or,
//! while a `describe` scope is open, buffers markup fragments that are
//! flushed to the console as a single report when the scope closes.

// ============================================================================
// CONSOLES: host output capabilities
// ============================================================================

use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::RenderMode;

/// The host's native output sink.
pub trait Console {
    fn emit(&mut self, text: &str);
}

/// A console that discards everything.
pub struct NullConsole;

impl Console for NullConsole {
    fn emit(&mut self, _text: &str) {}
}

/// StdoutConsole: writes to stdout, coloring report lines by category.
pub struct StdoutConsole {
    use_colors: bool,
}

impl StdoutConsole {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl Console for StdoutConsole {
    fn emit(&mut self, text: &str) {
        let choice = if self.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        let mut stdout = StandardStream::stdout(choice);
        for line in text.lines() {
            match line_color(line) {
                Some(color) => {
                    let _ = stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true));
                    let _ = writeln!(stdout, "{}", line);
                    let _ = stdout.reset();
                }
                None => {
                    let _ = writeln!(stdout, "{}", line);
                }
            }
        }
    }
}

fn line_color(line: &str) -> Option<Color> {
    if line.starts_with(Severity::Passed.label()) {
        Some(Color::Green)
    } else if line.starts_with(Severity::Failed.label()) {
        Some(Color::Red)
    } else if line.starts_with(Severity::Missed.label()) {
        Some(Color::Yellow)
    } else {
        None
    }
}

/// CapturedConsole: collects emitted text for tests or programmatic capture.
///
/// Clones share the same storage, so a handle kept by the caller sees what
/// the runner emits.
#[derive(Clone, Default)]
pub struct CapturedConsole {
    entries: Rc<RefCell<Vec<String>>>,
}

impl CapturedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    /// Each emitted chunk, in order. A flushed `describe` report is one entry.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    /// Everything emitted, one chunk per line.
    pub fn text(&self) -> String {
        self.entries.borrow().join("\n")
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Console for CapturedConsole {
    fn emit(&mut self, text: &str) {
        self.entries.borrow_mut().push(text.to_string());
    }
}

// ============================================================================
// MARKUP VOCABULARY
// ============================================================================

/// Category of a single report line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Passed,
    Failed,
    Missed,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Passed => "Test Passed",
            Severity::Failed => "Test Failed",
            Severity::Missed => "Test Missed",
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Passed => "console-passed",
            Severity::Failed => "console-failed",
            Severity::Missed => "console-missed",
        }
    }
}

/// A nesting container in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Describe,
    It,
}

impl Block {
    pub fn css_class(self) -> &'static str {
        match self {
            Block::Describe => "console-describe",
            Block::It => "console-it",
        }
    }
}

lazy_static! {
    static ref MARKUP_TAG: Regex = Regex::new(r"<[^>]*>").expect("markup tag pattern compiles");
}

// ============================================================================
// OUTPUT SINK
// ============================================================================

pub struct OutputSink {
    mode: RenderMode,
    console: Box<dyn Console>,
    buffer: Option<Vec<String>>,
}

impl OutputSink {
    pub fn new(mode: RenderMode, console: Box<dyn Console>) -> Self {
        Self {
            mode,
            console,
            buffer: None,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn is_buffering(&self) -> bool {
        self.buffer.is_some()
    }

    /// Fragments buffered so far in the open scope.
    pub fn buffered(&self) -> &[String] {
        self.buffer.as_deref().unwrap_or(&[])
    }

    /// Adapts a markup fragment to the render mode.
    ///
    /// HTML keeps markup verbatim. Text strips tags; what remains gets a
    /// trailing newline, and an empty remainder is dropped unless
    /// `force_line` asks for the newline anyway.
    pub fn filter(&self, markup: &str, force_line: bool) -> String {
        match self.mode {
            RenderMode::Html => markup.to_string(),
            RenderMode::Text => {
                let stripped = MARKUP_TAG.replace_all(markup, "");
                if stripped.is_empty() && !force_line {
                    String::new()
                } else {
                    format!("{}\n", stripped)
                }
            }
        }
    }

    pub fn line_break(&self) -> &'static str {
        match self.mode {
            RenderMode::Html => "<br>",
            RenderMode::Text => "\n",
        }
    }

    /// Appends `message` to the current render target.
    pub fn write(&mut self, message: &str, suppress_line_break: bool) {
        if message.is_empty() && (self.mode == RenderMode::Text || self.buffer.is_none()) {
            return;
        }
        let line_break = self.line_break();
        match self.buffer.as_mut() {
            Some(buffer) => {
                buffer.push(message.to_string());
                if !suppress_line_break {
                    buffer.push(line_break.to_string());
                }
            }
            None => self.emit_line(message),
        }
    }

    /// Renders a categorized report line.
    pub fn report(&mut self, severity: Severity, text: &str) {
        let open = format!("<div class=\"{}\">", severity.css_class());
        let line = format!("{}{}{}", self.filter(&open, false), text, self.filter("</div>", true));
        self.write(&line, true);
    }

    pub fn open_block(&mut self, block: Block, title: &str) {
        let open = format!("<div class=\"{}\"><h6>", block.css_class());
        let header = format!("{}{}{}", self.filter(&open, false), title, self.filter(":</h6>", false));
        self.push(header);
    }

    pub fn close_block(&mut self) {
        let close = self.filter("</div>", false);
        self.push(close);
    }

    pub(crate) fn begin_scope(&mut self) {
        self.buffer = Some(Vec::new());
    }

    /// Emits the buffered scope as one report and clears it.
    pub(crate) fn end_scope(&mut self) {
        if let Some(fragments) = self.buffer.take() {
            let report = fragments.concat();
            let report = report.strip_suffix('\n').unwrap_or(&report);
            if !report.is_empty() {
                self.console.emit(report);
            }
        }
    }

    fn push(&mut self, fragment: String) {
        match self.buffer.as_mut() {
            Some(buffer) => {
                if !fragment.is_empty() {
                    buffer.push(fragment);
                }
            }
            None => {
                if !fragment.is_empty() {
                    self.emit_line(&fragment);
                }
            }
        }
    }

    fn emit_line(&mut self, text: &str) {
        let text = text.strip_suffix('\n').unwrap_or(text);
        self.console.emit(text);
    }
}

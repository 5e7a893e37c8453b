/* src/cli/core/src/ui.rs */

// Terminal status lines. Machine-readable output (`--json`, injected HTML)
// goes straight to stdout and never passes through here.

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
  Done,
  Failed,
  Caution,
  Next,
}

impl Mark {
  fn glyph(self) -> &'static str {
    match self {
      Self::Done => "\u{2713}",
      Self::Failed => "\u{2717}",
      Self::Caution => "!",
      Self::Next => "\u{2192}",
    }
  }

  fn color(self) -> &'static str {
    match self {
      Self::Done | Self::Next => "\x1b[32m",
      Self::Failed => "\x1b[31m",
      Self::Caution => "\x1b[33m",
    }
  }
}

fn marked(mark: Mark, msg: &str) -> String {
  format!("  {}{}{RESET} {msg}", mark.color(), mark.glyph())
}

pub fn ok(msg: &str) {
  println!("{}", marked(Mark::Done, msg));
}

pub fn fail(msg: &str) {
  println!("{}", marked(Mark::Failed, msg));
}

pub fn warn(msg: &str) {
  println!("{}", marked(Mark::Caution, msg));
}

pub fn arrow(msg: &str) {
  println!("{}", marked(Mark::Next, msg));
}

/// Unmarked continuation line, indented under the previous status.
pub fn detail(msg: &str) {
  println!("      {DIM}{msg}{RESET}");
}

/// `label` padded to a fixed column, then the value in cyan.
pub fn field(label: &str, value: &str) {
  println!("    {DIM}{label:<12}{RESET} {CYAN}{value}{RESET}");
}

pub fn banner(cmd: &str) {
  println!("\n  {BOLD}mtr-web {cmd}{RESET} {DIM}v{VERSION}{RESET}\n");
}

pub fn blank() {
  println!();
}

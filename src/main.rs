use std::env;
use std::io;
use std::process;

use anyhow::{bail, Context, Result};
use log::debug;

use backtrack_grep::Pattern;

const USAGE: &str = "usage: echo <input_text> | backtrack-grep -E <pattern>";

// Usage: echo <input_text> | backtrack-grep -E <pattern>
fn main() {
    env_logger::init();

    match run() {
        Ok(true) => process::exit(0),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(2);
        }
    }
}

fn run() -> Result<bool> {
    let mut args = env::args().skip(1);
    if args.next().as_deref() != Some("-E") {
        bail!("expected first argument to be '-E'\n{USAGE}");
    }
    let Some(pattern) = args.next() else {
        bail!("missing pattern\n{USAGE}");
    };

    let regex =
        Pattern::compile(&pattern).with_context(|| format!("invalid pattern {pattern:?}"))?;

    let mut input_line = String::new();
    io::stdin()
        .read_line(&mut input_line)
        .context("failed to read input line")?;
    let line = input_line.trim_end_matches(['\n', '\r']);

    let matched = regex.is_match(line);
    debug!("{pattern:?} against {line:?}: {matched}");
    Ok(matched)
}

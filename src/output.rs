use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Small wrapper around stdout/stderr printing to provide consistent, colored
/// user-facing messages. Colors are enabled only when the stream is a TTY.
fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Print a plain user-facing line (no prefix). Use this for primary outputs
/// such as the banner and the closing summary.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Print a prompt without a trailing newline and flush, so the question is
/// visible before reading the answer.
pub fn print_prompt(msg: &str) -> io::Result<()> {
    let mut out = io::stdout();
    if stdout_tty() {
        write!(out, "{} ", msg.bold())?;
    } else {
        write!(out, "{} ", msg)?;
    }
    out.flush()
}

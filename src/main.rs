//! Ezcut CLI entry point.

#![allow(clippy::print_stderr)]

fn main() {
    if let Err(e) = ezcut::run() {
        eprintln!("error ({}): {e}", e.stage());
        std::process::exit(1);
    }
}

//! Command: print version information.

/// Print the zdot version to stdout.
#[allow(clippy::print_stdout)]
pub fn run() {
    println!("zdot {}", crate::version());
}

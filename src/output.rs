//! Terminal output helpers.
//!
//! Colours are dropped when `NO_COLOR` is set.

use colored::Colorize;

fn colors_enabled() -> bool {
    std::env::var("NO_COLOR").is_err()
}

/// `✓ msg` in green.
pub fn success(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "✓".green(), msg);
    } else {
        println!("✓ {}", msg);
    }
}

/// `✗ msg` on stderr in red.
pub fn error(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "✗".red(), msg);
    } else {
        eprintln!("✗ {}", msg);
    }
}

/// `⚠ msg` in yellow.
pub fn warn(msg: &str) {
    if colors_enabled() {
        println!("{} {}", "⚠".yellow(), msg);
    } else {
        println!("⚠ {}", msg);
    }
}

/// `→ msg` on stderr, used for remediation hints next to errors.
pub fn hint(msg: &str) {
    if colors_enabled() {
        eprintln!("{} {}", "→".cyan(), msg.cyan());
    } else {
        eprintln!("→ {}", msg);
    }
}

pub fn header(title: &str) {
    println!();
    if colors_enabled() {
        println!("{}", title.bold());
    } else {
        println!("{}", title);
    }
}

pub fn list_item(item: &str) {
    println!("  • {}", item);
}

/// A command the user may want to run next.
pub fn command(cmd: &str) {
    if colors_enabled() {
        println!("  {}", cmd.bright_cyan());
    } else {
        println!("  {}", cmd);
    }
}

pub fn dimmed(msg: &str) {
    if colors_enabled() {
        println!("{}", msg.dimmed());
    } else {
        println!("{}", msg);
    }
}

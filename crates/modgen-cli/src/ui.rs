//! ModGen CLI UI primitives.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(51);
    pub const MAGENTA: Color = Color::Color256(201);
    pub const NEON_GREEN: Color = Color::Color256(82);
    pub const AMBER: Color = Color::Color256(214);
    pub const DIM: Color = Color::Color256(240);
}

pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TARGET_FILLED: &str = "\u{25C9}"; // ◉
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const ARROW: &str = "\u{2500}\u{25B8}"; // ─▸
}

/// Output sink that stays silent under `--quiet`.
#[derive(Debug, Clone, Copy)]
pub struct Ui {
    quiet: bool,
}

impl Ui {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn blank(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Spinner on stderr, hidden when quiet.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner()
            .tick_chars("\u{25CE}\u{25C9}\u{25CE}\u{25C9}") // ◎◉◎◉
            .template("  {spinner:.cyan} {msg}")
        {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(Duration::from_millis(150));
        pb
    }

    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!(
                "  {} {}",
                style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
                msg
            );
        }
    }

    pub fn info(&self, msg: &str) {
        if !self.quiet {
            println!("  {} {}", style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN), msg);
        }
    }

    pub fn warn(&self, msg: &str) {
        if !self.quiet {
            println!(
                "  {} {}",
                style(symbols::DIAMOND).fg(colors::AMBER),
                style(msg).fg(colors::AMBER)
            );
        }
    }

    /// A `▸ label  detail` row.
    pub fn row(&self, label: &str, detail: &str) {
        if !self.quiet {
            println!(
                "  {}   {:12} {}",
                style(symbols::TRIANGLE).fg(colors::CYAN),
                style(label).bold(),
                style(detail).fg(colors::DIM)
            );
        }
    }

    pub fn box_header(&self, title: &str) {
        if self.quiet {
            return;
        }
        let width: usize = 55;
        let title_padded = format!(" {} ", title);
        let dashes = width.saturating_sub(title_padded.chars().count() + 4);
        println!(
            "  {}{}{}{}",
            style("\u{256D}\u{2500}").fg(colors::CYAN), // ╭─
            style(title_padded).fg(colors::CYAN).bold(),
            style("\u{2500}".repeat(dashes)).fg(colors::CYAN),
            style("\u{256E}").fg(colors::CYAN) // ╮
        );
    }

    pub fn box_line(&self, content: &str) {
        if self.quiet {
            return;
        }
        let width: usize = 53;
        let padding = width.saturating_sub(content.chars().count());
        println!(
            "  {} {}{}{}",
            style("\u{2502}").fg(colors::CYAN), // │
            content,
            " ".repeat(padding),
            style("\u{2502}").fg(colors::CYAN)
        );
    }

    pub fn box_footer(&self) {
        if self.quiet {
            return;
        }
        let width: usize = 55;
        println!(
            "  {}{}{}",
            style("\u{2570}").fg(colors::CYAN), // ╰
            style("\u{2500}".repeat(width - 2)).fg(colors::CYAN),
            style("\u{256F}").fg(colors::CYAN) // ╯
        );
    }

    pub fn timing(&self, label: &str, duration_ms: u128) {
        if !self.quiet {
            println!(
                "  {} {} in {}ms",
                style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
                label,
                duration_ms
            );
        }
    }

    pub fn nope_header(&self) {
        if !self.quiet {
            println!();
            println!(
                "  {} {}",
                style(symbols::DIAMOND).fg(colors::MAGENTA).bold(),
                style("Nope.").fg(colors::MAGENTA).bold()
            );
            println!();
        }
    }

    pub fn looking_good(&self) {
        if !self.quiet {
            println!(
                "  {} {}",
                style(symbols::TARGET_FILLED).fg(colors::NEON_GREEN),
                style("Looking good.").bold()
            );
        }
    }
}

/// `3 item(s)` style counts, pluralized.
pub fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_pluralizes() {
        assert_eq!(count(1, "item"), "1 item");
        assert_eq!(count(0, "block"), "0 blocks");
        assert_eq!(count(3, "tab"), "3 tabs");
    }

    #[test]
    fn test_quiet_spinner_is_hidden() {
        assert!(Ui::new(true).spinner("working").is_hidden());
    }
}

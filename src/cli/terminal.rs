//! Status lines printed by the commands, colored when the terminal allows it

use std::{fmt::Display, path::Path};

use owo_colors::{OwoColorize, colors::css};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Good,
    Bad,
    Quiet,
}

fn color_enabled() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

fn paint(tone: Tone, text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.fg::<css::Green>().to_string(),
        Tone::Bad => text.fg::<css::Orange>().to_string(),
        Tone::Quiet => text.dimmed().to_string(),
    }
}

fn written_line(source: &dyn Display, target: &dyn Display, color: bool) -> String {
    format!(
        "{} {}",
        paint(Tone::Good, "✓", color),
        paint(Tone::Quiet, &format!("{source} → {target}"), color)
    )
}

fn failed_line(error: &anyhow::Error, color: bool) -> String {
    paint(Tone::Bad, &format!("✗ {error:#}"), color)
}

fn heading_line(title: &str, count: usize, color: bool) -> String {
    paint(Tone::Bad, &format!("{title} ({count}):"), color)
}

fn verdict_line(problems: usize, color: bool) -> String {
    if problems == 0 {
        paint(Tone::Good, "File is healthy (0 problems)", color)
    } else {
        paint(Tone::Bad, &format!("Summary: {problems} problems found"), color)
    }
}

/// `✓ source → target` for a file converted and written.
pub fn written(source: &Path, target: &Path) -> String {
    written_line(&source.display(), &target.display(), color_enabled())
}

/// `✗ error` for a file that could not be converted, with its causes.
pub fn failed(error: &anyhow::Error) -> String {
    failed_line(error, color_enabled())
}

/// `Title (count):` above a list of problems.
pub fn problem_heading(title: &str, count: usize) -> String {
    heading_line(title, count, color_enabled())
}

/// The closing line of a check report.
pub fn verdict(problems: usize) -> String {
    verdict_line(problems, color_enabled())
}

/// Secondary text such as "nothing to do" notices.
pub fn notice(text: &str) -> String {
    paint(Tone::Quiet, text, color_enabled())
}

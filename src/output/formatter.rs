use std::io::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{Width, terminal_size};

use crate::locale::Locale;
use crate::scoring::{
    answer_label, interpretation_for, Level, ResponseSet, ScoreKind, ScoreReport, ITEMS,
    MAX_ANSWER,
};

const BAR_WIDTH: usize = 12;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Scores are shown to two decimals; they are never rounded internally.
pub fn format_score(score: f64) -> String {
    format!("{:.2}", score)
}

/// "Q2, Q7"
pub fn format_missing(ids: &[u8]) -> String {
    ids.iter()
        .map(|id| format!("Q{}", id))
        .collect::<Vec<_>>()
        .join(", ")
}

fn score_bar(score: f64) -> (String, String) {
    let ratio = (score / f64::from(MAX_ANSWER)).clamp(0.0, 1.0);
    let filled = (ratio * BAR_WIDTH as f64).round() as usize;
    ("█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn paint_level(text: &str, level: Level) -> String {
    match level {
        Level::VeryLow => text.red().to_string(),
        Level::Low | Level::SomewhatLow => text.yellow().to_string(),
        Level::Average => text.blue().to_string(),
        Level::High | Level::VeryHigh => text.green().to_string(),
    }
}

/// Multi-line report: one line per score with bar and level, then the
/// interpretation of the overall level.
pub fn format_report(report: &ScoreReport, locale: Locale, use_colors: bool) -> String {
    let name_width = report
        .entries()
        .iter()
        .map(|(kind, _)| kind.name(locale).chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = report
        .entries()
        .iter()
        .map(|(kind, score)| {
            let level = report.level(*kind);
            let name = kind.name(locale);
            let padding = " ".repeat(name_width - name.chars().count());
            let (filled, empty) = score_bar(*score);
            let label = level.label(locale);

            if use_colors {
                let name = if matches!(kind, ScoreKind::Overall) {
                    name.bold().to_string()
                } else {
                    name.to_string()
                };
                format!(
                    "{}{}  {}  {}{}  {}",
                    name,
                    padding,
                    format_score(*score).bold(),
                    paint_level(&filled, level),
                    empty.dimmed(),
                    paint_level(label, level)
                )
            } else {
                format!(
                    "{}{}  {}  {}{}  {}",
                    name,
                    padding,
                    format_score(*score),
                    filled,
                    empty,
                    label
                )
            }
        })
        .collect();

    lines.push(String::new());
    lines.push(interpretation_for(report.overall_level(), locale).to_string());
    lines.join("\n")
}

/// Tab-separated scores for scripting: overall, vigor, dedication, absorption
pub fn format_tsv(report: &ScoreReport) -> String {
    report
        .entries()
        .iter()
        .map(|(_, score)| format_score(*score))
        .collect::<Vec<_>>()
        .join("\t")
}

#[derive(Serialize)]
struct JsonScore {
    score: f64,
    level: Level,
    label: &'static str,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    overall: JsonScore,
    vigor: JsonScore,
    dedication: JsonScore,
    absorption: JsonScore,
    interpretation: &'static str,
    answers: &'a ResponseSet,
}

/// JSON object with scores, levels, interpretation and raw answers
pub fn format_json(
    report: &ScoreReport,
    responses: &ResponseSet,
    locale: Locale,
) -> serde_json::Result<String> {
    let entry = |score: f64| {
        let level = crate::scoring::level_of(score);
        JsonScore {
            score,
            level,
            label: level.label(locale),
        }
    };
    let json = JsonReport {
        overall: entry(report.overall),
        vigor: entry(report.vigor),
        dedication: entry(report.dedication),
        absorption: entry(report.absorption),
        interpretation: interpretation_for(report.overall_level(), locale),
        answers: responses,
    };
    serde_json::to_string_pretty(&json)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
pub fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// The item catalog, one line per item: "Q1  Vigor       text"
pub fn format_items(locale: Locale, use_colors: bool) -> String {
    let term_width = get_terminal_width();
    let subscale_width = ITEMS
        .iter()
        .map(|item| item.subscale.name(locale).chars().count())
        .max()
        .unwrap_or(0);
    // "Q9" + 2 spaces + subscale + 2 spaces
    let fixed_width = 4 + subscale_width + 2;

    let mut lines: Vec<String> = ITEMS
        .iter()
        .map(|item| {
            let subscale = item.subscale.name(locale);
            let padding = " ".repeat(subscale_width - subscale.chars().count());
            let text = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(item.text(locale), width - fixed_width)
                }
                Some(_) => truncate_text(item.text(locale), 20),
                None => item.text(locale).to_string(),
            };

            if use_colors {
                format!(
                    "{}  {}{}  {}",
                    item.short_ref().dimmed(),
                    subscale.cyan(),
                    padding,
                    text
                )
            } else {
                format!("{}  {}{}  {}", item.short_ref(), subscale, padding, text)
            }
        })
        .collect();

    lines.push(String::new());
    let scale: Vec<String> = (0..=MAX_ANSWER)
        .filter_map(|value| answer_label(value, locale).map(|label| format!("{} {}", value, label)))
        .collect();
    lines.push(scale.join(" | "));
    lines.join("\n")
}

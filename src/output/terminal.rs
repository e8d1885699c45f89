// Colored terminal output for metric results.
//
// This module handles all terminal-specific formatting: colors, tables,
// bar charts. The main.rs command handlers delegate here.

use std::collections::BTreeMap;

use colored::Colorize;

use crate::judge::JudgeReport;
use crate::metrics::focus::FocusReport;
use crate::metrics::length::LengthStats;
use crate::output::truncate_chars;

/// Display mean novelty ratios per n-gram order.
pub fn display_novelty(results: &BTreeMap<String, f64>, pairs: usize) {
    println!(
        "\n{}",
        format!("=== Novelty ({pairs} pairs) ===").bold()
    );
    println!();

    for (name, value) in results {
        println!("  {:<10} {}  {:.4}", name, ratio_bar(*value), value);
    }

    println!();
    println!(
        "  {}",
        "0.0 = every summary n-gram copied from the article, 1.0 = none.".dimmed()
    );
}

/// Display corpus length statistics.
pub fn display_length(stats: &LengthStats) {
    println!(
        "\n{}",
        format!("=== Lengths ({} pairs) ===", stats.pairs_scored).bold()
    );
    println!();
    println!(
        "  Average summary length:        {:.1} tokens",
        stats.average_summary_length
    );
    println!(
        "  Average article/summary ratio: {:.2}x",
        stats.average_article_summary_ratio
    );

    if stats.pairs_skipped > 0 {
        println!(
            "\n  {} {} pair(s) skipped (summary tokenized to nothing)",
            "!".yellow(),
            stats.pairs_skipped
        );
    }
}

/// Display the position-salience profile as a bar chart.
///
/// One row per sentence position, scannable top to bottom — a lead-biased
/// corpus shows long bars at the top that taper off quickly.
pub fn display_focus(report: &FocusReport) {
    println!(
        "\n{}",
        format!("=== Focus ({} pairs) ===", report.pairs_scored).bold()
    );
    println!();
    println!(
        "  Sentences per article: avg {:.1}  (p25 {}, p50 {}, p75 {})",
        report.average_sentence_count, report.spread.p25, report.spread.p50, report.spread.p75
    );
    println!();

    for position in &report.positions {
        let bar = ratio_bar(position.scaled);
        println!(
            "  Sentence #{:<4} {}  salience {:.3}  coverage {:>5.1}%",
            position.index + 1,
            bar,
            position.mean_similarity,
            position.coverage * 100.0
        );

        // Quartile markers help read the tail: beyond p75 most articles
        // no longer have a sentence at that position.
        if position.index + 1 == report.spread.p25 {
            println!("  {}", "--- 25% of articles end here ---".dimmed());
        }
        if position.index + 1 == report.spread.p50 {
            println!("  {}", "--- 50% of articles end here ---".dimmed());
        }
        if position.index + 1 == report.spread.p75 {
            println!("  {}", "--- 75% of articles end here ---".dimmed());
        }
    }

    if report.pairs_skipped > 0 {
        println!(
            "\n  {} {} pair(s) skipped (article had no sentences)",
            "!".yellow(),
            report.pairs_skipped
        );
    }
}

/// Display aggregate judge scores and any per-pair failures.
pub fn display_judge(report: &JudgeReport) {
    println!(
        "\n{}",
        format!("=== Judge ({} pairs) ===", report.pairs_judged).bold()
    );
    println!();
    println!("  Relevance:   {:>5.2} / 10", report.relevance);
    println!("  Consistency: {:>5.2} / 10", report.consistency);
    println!("  Fluency:     {:>5.2} / 10", report.fluency);
    println!("  Coherence:   {:>5.2} / 10", report.coherence);

    if let Some((idx, scores)) = report.raw_scores.first() {
        if !scores.explanation.is_empty() {
            println!(
                "\n  {} \"{}\"",
                format!("Sample rationale (pair {idx}):").dimmed(),
                truncate_chars(&scores.explanation, 120).dimmed()
            );
        }
    }

    if !report.failed_pairs.is_empty() {
        println!(
            "\n  {} {} pair(s) failed and were excluded: {:?}",
            "!".yellow(),
            report.failed_pairs.len(),
            report.failed_pairs
        );
    }
}

/// Render a [0, 1] value as a fixed-width bar, colored by magnitude.
fn ratio_bar(value: f64) -> String {
    let bar_width: usize = 20;
    let filled = (value.clamp(0.0, 1.0) * bar_width as f64).round() as usize;
    let empty = bar_width.saturating_sub(filled);
    let bar = format!("[{}{}]", "=".repeat(filled), " ".repeat(empty));

    if value >= 0.66 {
        bar.bright_green().to_string()
    } else if value >= 0.33 {
        bar.bright_yellow().to_string()
    } else {
        bar.bright_blue().to_string()
    }
}

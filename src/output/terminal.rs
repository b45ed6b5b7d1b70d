// Colored terminal output for network summaries and metric results.
//
// main.rs delegates all display formatting here.

use std::collections::HashMap;
use std::path::Path;

use colored::Colorize;

use crate::graph::network::NetworkSummary;
use crate::tweets::record::Tweet;

/// Display the headline numbers of a built network and its heaviest edges.
pub fn display_network_summary(topic: &str, summary: &NetworkSummary, tweets: &[Tweet]) {
    println!(
        "\n{}",
        format!("=== Tweet Network: {topic} ({} tweets) ===", summary.nodes).bold()
    );
    println!();
    println!("  Hashtags in vocabulary: {}", summary.hashtags);
    println!("  Non-zero edges:         {}", summary.edges);
    println!("  Mean edge weight:       {:.4}", summary.mean_weight);

    if summary.strongest.is_empty() {
        println!();
        return;
    }

    let texts: HashMap<u64, &str> = tweets.iter().map(|t| (t.id, t.text.as_str())).collect();

    println!("\n  {}", "Strongest edges:".dimmed());
    for (rank, &(a, b, weight)) in summary.strongest.iter().enumerate() {
        println!(
            "  {:>3}. {} {} <-> {}",
            rank + 1,
            colorize_weight(weight),
            a,
            b
        );
        for id in [a, b] {
            let preview = super::truncate_chars(texts.get(&id).copied().unwrap_or(""), 100);
            println!("        {}", preview.dimmed());
        }
    }
    println!();
}

/// Display where the network files were written.
pub fn display_written(adjacency: &Path, nodes: &Path) {
    println!("{} {}", "Adjacency matrix:".bold(), adjacency.display());
    println!("{} {}", "Node map:        ".bold(), nodes.display());
}

/// Display a single information-theory result in bits.
pub fn display_bits(label: &str, bits: f64) {
    println!("{}: {} bits", label.bold(), format!("{bits:.6}").bright_green());
}

/// Display a polarity score and the sentiment channels it maps to.
pub fn display_polarity(text: &str, polarity: f64, negative: f64, positive: f64) {
    println!("  {}", super::truncate_chars(text, 120).dimmed());
    let colored_polarity = if polarity > 0.0 {
        format!("{polarity:+.3}").green()
    } else if polarity < 0.0 {
        format!("{polarity:+.3}").red()
    } else {
        format!("{polarity:+.3}").normal()
    };
    println!("  Polarity: {colored_polarity}  (negative {negative:.3}, positive {positive:.3})");
}

/// Colorize an edge weight by strength.
fn colorize_weight(weight: f64) -> colored::ColoredString {
    let text = format!("{weight:.3}");
    if weight >= 0.9 {
        text.bright_green().bold()
    } else if weight >= 0.5 {
        text.bright_yellow()
    } else {
        text.bright_blue()
    }
}

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use crate::catalog::Facets;
use crate::matcher::SearchResults;
use crate::model::PlantRecord;
use crate::recommend::CareInfo;

pub fn show_facets(f: &Facets) {
    println!("\n{}", "=== FACETS ===".bold());
    let rows: [(&str, &[String]); 5] = [
        ("State", &f.states),
        ("Plant Size", &f.sizes),
        ("Flowering Color", &f.flower_colors),
        ("Plant Height", &f.heights),
        ("Plant Type", &f.types),
    ];
    for (name, values) in rows {
        println!("{:<16} {}", name.cyan().bold(), values.join(" | "));
    }
    println!();
}

/// Renders catalog matches. Placeholder rows show only the name.
pub fn show_results(title: &str, results: &SearchResults, placeholders: bool) {
    println!("\n{}", format!("=== {title} ===").bold());
    if !results.has_searched() {
        println!("(no search performed yet)");
        return;
    }
    let records = results.records();
    if records.is_empty() {
        println!("{}", "No plants match the selected criteria.".yellow());
        return;
    }
    for (i, p) in records.iter().enumerate() {
        if placeholders {
            println!("{}. {}", i + 1, p.scientific_name.green().bold());
        } else {
            println!("{}", plant_line(i + 1, p));
        }
    }
    println!();
}

fn plant_line(n: usize, p: &PlantRecord) -> String {
    format!(
        "{}. {} ({})  {}  {}  {}  {}  {}",
        n,
        p.scientific_name.green().bold(),
        p.common_name,
        p.state.to_string().cyan(),
        p.plant_type,
        p.plant_size,
        p.plant_height,
        p.flower_color.to_string().magenta(),
    )
}

pub fn show_image(name: &str, url: Option<&str>) {
    match url {
        Some(u) => println!("{}  {}", name.bold(), u),
        None => println!("{}  {}", name.bold(), "(no image)".dimmed()),
    }
}

pub fn show_care(name: &str, info: &CareInfo) {
    println!("\n{}", name.green().bold());
    println!("{}", "Requirements:".bold());
    println!("{}", indent(non_empty(&info.requirements), 2));
    println!("{}", "Care:".bold());
    println!("{}", indent(non_empty(&info.care), 2));
    println!();
}

pub fn show_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}

/// Spinner shown while a network request is outstanding.
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn non_empty(s: &str) -> &str {
    if s.trim().is_empty() { "(none)" } else { s }
}

fn indent(s: &str, n: usize) -> String {
    let pad = " ".repeat(n);
    s.lines()
        .map(|l| format!("{}{}", pad, l))
        .collect::<Vec<_>>()
        .join("\n")
}

// src/card.rs
//! Business card: name, role, main links and topics in a rounded panel.

use colored::Colorize;
use tabled::builder::Builder;
use tabled::settings::{Alignment, Padding, Style};

use crate::urls::{self, add_utm_source};

pub const CARD_TITLE: &str = "💠 Ardalis";
pub const CARD_FOOTER: &str = "Try 'ardalis recent' or 'ardalis urls' for more options";

/// Panel body, one entry per line. Links carry the UTM tag.
pub fn card_lines() -> Vec<String> {
    vec![
        "Steve 'Ardalis' Smith".to_string(),
        "Software Architect, Speaker, and Trainer".to_string(),
        String::new(),
        add_utm_source(urls::BLOG),
        add_utm_source(urls::NIMBLEPROS),
        String::new(),
        format!("BlueSky: {}", add_utm_source(urls::BLUESKY)),
        format!("LinkedIn: {}", add_utm_source(urls::LINKEDIN)),
        format!("Sessionize: {}", add_utm_source(urls::SPEAKER)),
        String::new(),
        "Clean Architecture • DDD • .NET".to_string(),
    ]
}

/// Uncolored panel; width is computed on plain text.
pub fn render_card() -> String {
    let mut builder = Builder::default();
    builder.push_record([card_lines().join("\n")]);
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Padding::new(2, 2, 1, 1))
        .with(Alignment::center());
    table.to_string()
}

pub fn print_card() {
    println!();
    println!("{}", CARD_TITLE.cyan().bold());
    println!("{}", render_card().magenta());
    println!("{}", CARD_FOOTER.bright_black());
    println!();
}

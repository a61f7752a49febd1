// Plain-text drawing of module views and the chat transcript

use burbs_core::chat::TranscriptLine;
use burbs_core::render::{ListItem, ModuleView, Table};
use burbs_core::{Sender, Tone};

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Neutral => "",
        Tone::Positive | Tone::Good => " (+)",
        Tone::Negative | Tone::Poor => " (-)",
        Tone::Caution => " (~)",
    }
}

fn table_text(table: &Table, out: &mut String) {
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.text.chars().count())
                .chain(std::iter::once(col.label.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(col, w)| format!("{:<w$}", col.label, w = *w))
        .collect();
    out.push_str(&format!("  {}\n", header.join(" | ")));

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<w$}{}", cell.text, tone_marker(cell.tone), w = *w))
            .collect();
        out.push_str(&format!("  {}\n", cells.join(" | ")));
    }
}

fn item_text(item: &ListItem, out: &mut String) {
    out.push_str(&format!("  - {}", item.title));
    if let Some(value) = &item.value {
        out.push_str(&format!(": {value}{}", tone_marker(item.tone)));
    }
    out.push('\n');
    for extra in [&item.detail, &item.note].into_iter().flatten() {
        if !extra.is_empty() {
            out.push_str(&format!("      {extra}\n"));
        }
    }
}

pub fn view_text(view: &ModuleView) -> String {
    let mut out = format!("== {} ==\n", view.title);
    if let Some(notice) = view.notice() {
        out.push_str(&format!("  {notice}\n"));
        return out;
    }
    for card in view.cards() {
        out.push_str(&format!("  {}: {}{}\n", card.label, card.value, tone_marker(card.tone)));
    }
    if let Some(table) = view.table() {
        table_text(table, &mut out);
    }
    for item in view.items() {
        item_text(item, &mut out);
    }
    out
}

pub fn transcript_text(lines: &[TranscriptLine]) -> String {
    let mut out = String::new();
    for line in lines {
        match line {
            TranscriptLine::Greeting(text) => out.push_str(&format!("assistant> {text}\n")),
            TranscriptLine::Message(m) => {
                let who = match m.sender {
                    Sender::User => "you",
                    Sender::Assistant => "assistant",
                };
                out.push_str(&format!("{who}> {}\n", m.text));
            }
            TranscriptLine::Composing => out.push_str("assistant is typing...\n"),
        }
    }
    out
}

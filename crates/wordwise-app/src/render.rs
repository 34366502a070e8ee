use std::fmt::{self, Write};
use std::time::{Duration, SystemTime};

use wordwise_core::history::HistoryRecord;
use wordwise_core::session::RequestStatus;
use wordwise_core::state::Session;
use wordwise_core::view::{CopyKey, ResultTab, ResultView};
use wordwise_types::ResultShape;

/// Draw the whole session as text.
pub fn render(session: &Session) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_frame(session, &mut out);
    out
}

pub fn render_history(session: &Session) -> String {
    render_history_at(session, SystemTime::now())
}

/// History listing with entry ages measured against `now`.
pub fn render_history_at(session: &Session, now: SystemTime) -> String {
    let mut out = String::new();
    let _ = write_history(session, now, &mut out);
    out
}

/// Coarse age of a history entry. Clock skew reads as "just now".
fn age(created_at: SystemTime, now: SystemTime) -> String {
    let elapsed = now.duration_since(created_at).unwrap_or(Duration::ZERO).as_secs();
    match elapsed {
        0..60 => "just now".to_string(),
        60..3600 => format!("{}m ago", elapsed / 60),
        3600..86400 => format!("{}h ago", elapsed / 3600),
        _ => format!("{}d ago", elapsed / 86400),
    }
}

fn write_frame(session: &Session, out: &mut String) -> fmt::Result {
    let selection = session.selection();
    let catalog = session.catalog();

    writeln!(
        out,
        "── {} ⇄ {} ──",
        catalog.display_name(selection.source_code()),
        catalog.display_name(selection.target_code())
    )?;

    if let Some(side) = selection.expanded() {
        let chosen = selection.code(side);
        writeln!(out, "{side} languages (search: \"{}\")", selection.query(side))?;
        for lang in session.filtered_languages(side) {
            let marker = if lang.code == chosen { '*' } else { ' ' };
            writeln!(out, " {marker} {:<4} {}", lang.code, lang.display_name)?;
        }
    }

    let controller = session.controller();
    writeln!(out, "> {}", controller.input())?;

    match controller.display_status() {
        RequestStatus::Requesting => writeln!(out, "Learning...")?,
        RequestStatus::Failed => writeln!(
            out,
            "Lookup failed: {}",
            controller.last_failure().unwrap_or("unknown error")
        )?,
        RequestStatus::Idle => {}
    }

    match session.shape() {
        ResultShape::Structured => write_result(session, out),
        ResultShape::PlainText => write_plain(session, out),
    }
}

fn copied(session: &Session, key: &CopyKey) -> &'static str {
    if session.feedback().is_copied(key) {
        "  [copied]"
    } else {
        ""
    }
}

fn write_result(session: &Session, out: &mut String) -> fmt::Result {
    let Some(view) = session.view() else {
        return Ok(());
    };

    let tabs: Vec<String> = ResultTab::ALL
        .iter()
        .map(|tab| {
            if *tab == session.tab() {
                format!("[{}]", tab.label())
            } else {
                format!(" {} ", tab.label())
            }
        })
        .collect();
    writeln!(out, "{}", tabs.join(" "))?;

    match view {
        ResultView::Translation {
            source_word,
            translation,
            target_language,
        } => {
            writeln!(out, "English: {source_word}{}", copied(session, &CopyKey::SourceWord))?;
            writeln!(
                out,
                "{target_language}: {translation}{}",
                copied(session, &CopyKey::Translation)
            )?;
        }
        ResultView::Meaning {
            source_word,
            meaning,
        } => {
            writeln!(out, "Meaning of \"{source_word}\":")?;
            writeln!(out, "  {meaning}{}", copied(session, &CopyKey::Meaning))?;
        }
        ResultView::Examples(lines) => {
            if lines.is_empty() {
                writeln!(out, "No examples.")?;
            }
            for line in lines {
                writeln!(
                    out,
                    "Example {}: {}{}",
                    line.number,
                    line.text,
                    copied(session, &line.copy_key)
                )?;
            }
        }
    }
    Ok(())
}

fn write_plain(session: &Session, out: &mut String) -> fmt::Result {
    let output = session.controller().output();
    if output.is_empty() {
        return Ok(());
    }
    writeln!(out, "= {output}{}", copied(session, &CopyKey::Output))?;
    if !session.selection().can_swap() {
        writeln!(out, "(swap disabled while the source language is auto-detected)")?;
    }
    Ok(())
}

fn write_history(session: &Session, now: SystemTime, out: &mut String) -> fmt::Result {
    let history = session.history();
    if history.is_empty() {
        return writeln!(out, "History is empty.");
    }

    writeln!(out, "History ({}/{}):", history.len(), history.capacity())?;
    for (i, entry) in history.entries().enumerate() {
        let age = age(entry.created_at, now);
        match &entry.record {
            HistoryRecord::Lookup(result) => writeln!(
                out,
                "{:>2}. {} → {} ({}), {age}",
                i + 1,
                result.source_word,
                result.translation,
                result.target_language_name
            )?,
            HistoryRecord::Translation {
                source_language,
                target_language,
                input_text,
                output_text,
            } => writeln!(
                out,
                "{:>2}. [{source_language} → {target_language}] {input_text} → {output_text}, {age}",
                i + 1
            )?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use wordwise_core::selection::PickerSide;
    use wordwise_core::session::LookupPayload;
    use wordwise_types::{Example, LookupResult};

    use super::*;

    fn session_with_result() -> Session {
        let mut session = Session::new(
            ResultShape::Structured,
            "en",
            "es",
            10,
            Duration::from_millis(2000),
        );
        session.set_input("beautiful");
        let pending = session.submit().unwrap();
        session.complete(
            pending.generation(),
            Ok(LookupPayload::Lookup(LookupResult {
                source_word: "beautiful".into(),
                translation: "hermoso".into(),
                target_language_name: "Spanish".into(),
                meaning: "pleasing the senses".into(),
                examples: vec![Example {
                    id: "1".into(),
                    text: "The sunset was beautiful.".into(),
                }],
            })),
        );
        session
    }

    #[test]
    fn empty_session_has_no_result_region() {
        let session = Session::new(
            ResultShape::Structured,
            "en",
            "es",
            10,
            Duration::from_millis(2000),
        );
        let frame = render(&session);
        assert!(frame.contains("English ⇄ Spanish"));
        assert!(!frame.contains("[Translation]"));
    }

    #[test]
    fn translation_tab_shows_copy_marker() {
        let mut session = session_with_result();
        session.copy(CopyKey::Translation, Instant::now());
        let frame = render(&session);
        assert!(frame.contains("[Translation]"));
        assert!(frame.contains("Spanish: hermoso  [copied]"));
        assert!(!frame.contains("English: beautiful  [copied]"));
    }

    #[test]
    fn examples_tab_lists_examples_in_order() {
        let mut session = session_with_result();
        session.select_tab(ResultTab::Examples);
        assert!(render(&session).contains("Example 1: The sunset was beautiful."));
    }

    #[test]
    fn open_picker_lists_filtered_languages() {
        let mut session = session_with_result();
        session.toggle_picker(PickerSide::Target);
        session.set_language_query(PickerSide::Target, "span");
        let frame = render(&session);
        assert!(frame.contains(" * es   Spanish"));
        assert!(!frame.contains("French"));
    }

    #[test]
    fn history_lists_newest_first() {
        let session = session_with_result();
        let listing = render_history(&session);
        assert!(listing.contains("History (1/10):"));
        assert!(listing.contains(" 1. beautiful → hermoso (Spanish), just now"));
    }

    #[test]
    fn history_shows_entry_age() {
        let session = session_with_result();
        let created = session.history().latest().unwrap().created_at;

        let listing = render_history_at(&session, created + Duration::from_secs(150));
        assert!(listing.contains("(Spanish), 2m ago"));

        let listing = render_history_at(&session, created + Duration::from_secs(3 * 3600 + 5));
        assert!(listing.contains("(Spanish), 3h ago"));

        let listing = render_history_at(&session, created - Duration::from_secs(30));
        assert!(listing.contains("(Spanish), just now"));
    }
}

use log::debug;

use crate::{Note, NotesError, Result};

/// Trims a user supplied field and rejects it when nothing is left.
pub fn require_text(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        debug!("Rejected empty {}", field);
        return Err(NotesError::Validation {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(trimmed.to_string())
}

/// Case-insensitive substring match over title, content and category.
///
/// `needle` must already be lower-cased.
pub fn note_matches(note: &Note, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle)
        || note.category.label().to_lowercase().contains(needle)
}

/// First non-empty line of `content`, cut to `max_chars` characters.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let first_line = content
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");

    if first_line.chars().count() <= max_chars {
        first_line.to_string()
    } else {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

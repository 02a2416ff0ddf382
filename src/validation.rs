//! Input validation for typed commands and player names.

/// Reasons a line of player input or a player name is refused.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Input is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name is too long (maximum {max} characters)")]
    NameTooLong { max: usize },

    #[error("Name contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },
}

/// Longest accepted player name, in characters.
pub const MAX_NAME_LENGTH: usize = 30;

/// Clean one line of typed input before parsing.
///
/// Tabs become spaces, other control characters are dropped and the ends are
/// trimmed. Inner spacing is kept because answers are compared verbatim;
/// name lookups normalise whitespace themselves. Lines longer than `max_len` characters
/// (after cleaning) are refused rather than truncated, so a partial command
/// never executes.
pub fn sanitize_command(line: &str, max_len: usize) -> Result<String, InputError> {
    let cleaned = line
        .chars()
        .map(|c| if c == '\t' { ' ' } else { c })
        .filter(|c| !c.is_control())
        .collect::<String>()
        .trim()
        .to_string();

    if cleaned.chars().count() > max_len {
        return Err(InputError::TooLong { max: max_len });
    }
    Ok(cleaned)
}

/// Validate a player name, returning it trimmed.
///
/// Names end up inside save files and log lines, so path separators and
/// control characters are refused.
pub fn validate_player_name(name: &str) -> Result<String, InputError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyName);
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(InputError::NameTooLong {
            max: MAX_NAME_LENGTH,
        });
    }

    let bad: Vec<String> = trimmed
        .chars()
        .filter(|c| c.is_control() || matches!(c, '/' | '\\'))
        .map(|c| {
            if c.is_control() {
                format!("\\u{{{:04x}}}", c as u32)
            } else {
                c.to_string()
            }
        })
        .collect();
    if !bad.is_empty() {
        return Err(InputError::InvalidCharacters {
            chars: bad.join(", "),
        });
    }

    Ok(trimmed.to_string())
}

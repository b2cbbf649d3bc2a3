#![forbid(unsafe_code)]

/// Substrings that mark a developer query as potentially mutating.
///
/// Matching is a case-insensitive substring test over the whole statement, so
/// string literals and identifiers (`SELECT updated_at_ms ...`) also trip it.
/// The flag is a warning for the console, not an access control.
pub const DANGEROUS_KEYWORDS: &[&str] = &[
    "delete", "drop", "update", "insert", "alter", "create", "truncate",
];

pub fn is_dangerous(sql: &str) -> bool {
    let lowered = sql.trim().to_lowercase();
    DANGEROUS_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    Read,
    Write,
}

impl StatementKind {
    pub fn classify(sql: &str) -> Self {
        let head = sql.trim_start();
        let is_select = head
            .get(..6)
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case("select"));
        if is_select { Self::Read } else { Self::Write }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "SELECT",
            Self::Write => "WRITE",
        }
    }
}

/// True when `sql` holds more than one statement.
///
/// Semicolons inside quoted strings, quoted identifiers and comments are not
/// separators; trailing semicolons, whitespace and comments are allowed.
pub fn has_trailing_statement(sql: &str) -> bool {
    let mut chars = sql.chars().peekable();
    let mut seen_separator = false;
    while let Some(ch) = chars.next() {
        match ch {
            '\'' | '"' | '`' => {
                if seen_separator {
                    return true;
                }
                for next in chars.by_ref() {
                    if next == ch {
                        break;
                    }
                }
            }
            '[' => {
                if seen_separator {
                    return true;
                }
                for next in chars.by_ref() {
                    if next == ']' {
                        break;
                    }
                }
            }
            '-' if chars.peek() == Some(&'-') => {
                for next in chars.by_ref() {
                    if next == '\n' {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                let mut prev = '\0';
                for next in chars.by_ref() {
                    if prev == '*' && next == '/' {
                        break;
                    }
                    prev = next;
                }
            }
            ';' => seen_separator = true,
            c if c.is_whitespace() => {}
            _ => {
                if seen_separator {
                    return true;
                }
            }
        }
    }
    false
}

/// Log-safe preview of a statement: at most `max_chars` characters, with an
/// ellipsis when cut.
pub fn preview(sql: &str, max_chars: usize) -> String {
    let trimmed = sql.trim();
    let mut out: String = trimmed.chars().take(max_chars).collect();
    if trimmed.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}

//! Canonical command text
//!
//! Matching and extraction only ever see the normalized form.

/// A command as received, paired with its canonical form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    raw: String,
    normalized: String,
}

impl Command {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            normalized: normalize(raw),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The raw words behind a word-aligned fragment of the normalized text,
    /// with their original casing. `None` when the fragment is not a run of
    /// whole normalized words.
    pub fn original_of(&self, fragment: &str) -> Option<String> {
        let normalized: Vec<&str> = self.normalized.split(' ').collect();
        let raw: Vec<&str> = self.raw.split_whitespace().collect();
        let wanted: Vec<&str> = fragment.split(' ').collect();
        if fragment.is_empty() || raw.len() != normalized.len() || wanted.len() > raw.len() {
            return None;
        }

        (0..=normalized.len() - wanted.len())
            .find(|&i| normalized[i..i + wanted.len()] == wanted[..])
            .map(|i| raw[i..i + wanted.len()].join(" "))
    }
}

/// Trim, lowercase and collapse whitespace runs to a single space
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_and_lowercases() {
        assert_eq!(normalize("  Open NotePad \n"), "open notepad");
    }

    #[test]
    fn test_collapses_inner_whitespace() {
        assert_eq!(normalize("rename\ta.txt   to  b.txt"), "rename a.txt to b.txt");
    }

    #[test]
    fn test_empty_and_blank() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }

    #[test]
    fn test_is_idempotent() {
        let once = normalize("  What IS 2 + 2 ");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_original_of_restores_casing() {
        let command = Command::new("Go  to https://Example.com/CaseSensitive");
        assert_eq!(
            command.original_of("https://example.com/casesensitive").as_deref(),
            Some("https://Example.com/CaseSensitive")
        );
        assert_eq!(command.original_of("go to").as_deref(), Some("Go to"));
        assert_eq!(command.original_of("to https"), None);
        assert_eq!(command.original_of(""), None);
    }

    #[test]
    fn test_command_keeps_raw_text() {
        let command = Command::new("  Hello ");
        assert_eq!(command.raw(), "  Hello ");
        assert_eq!(command.normalized(), "hello");
    }
}

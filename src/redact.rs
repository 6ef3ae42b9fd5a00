//! NG-word redaction
//!
//! Every configured banned word is matched literally and case-insensitively and
//! replaced with a single placeholder glyph. Matching is line-oriented.

use regex::{Regex, RegexBuilder};

/// Glyph substituted for every banned-word match
pub const PLACEHOLDER: &str = "〇";

/// Compiled set of banned words, reusable across edits
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    patterns: Vec<Regex>,
}

impl Redactor {
    /// Compile a redactor from an ordered list of banned words.
    ///
    /// Empty words are skipped. Every character of a word matches literally,
    /// including regex metacharacters.
    pub fn new<S: AsRef<str>>(words: &[S]) -> Self {
        let patterns = words
            .iter()
            .map(AsRef::as_ref)
            .filter(|word| !word.is_empty())
            .filter_map(|word| {
                match RegexBuilder::new(&regex::escape(word))
                    .case_insensitive(true)
                    .build()
                {
                    Ok(re) => Some(re),
                    Err(e) => {
                        tracing::warn!("Skipping NG word {:?}: {}", word, e);
                        None
                    }
                }
            })
            .collect();

        Self { patterns }
    }

    /// True when no banned words are configured
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Number of compiled banned words
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Redact `text`, line by line.
    pub fn apply(&self, text: &str) -> String {
        if self.patterns.is_empty() {
            return text.to_string();
        }

        text.split('\n')
            .map(|line| self.apply_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn apply_line(&self, line: &str) -> String {
        let mut current = line.to_string();
        for re in &self.patterns {
            if re.is_match(&current) {
                current = re.replace_all(&current, PLACEHOLDER).into_owned();
            }
        }
        current
    }
}

/// Redact `text` with a one-off set of banned words.
pub fn redact<S: AsRef<str>>(text: &str, banned_words: &[S]) -> String {
    Redactor::new(banned_words).apply(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_word() {
        assert_eq!(
            redact("this is a badword here", &["badword"]),
            "this is a 〇 here"
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(redact("BadWord", &["badword"]), "〇");
        assert_eq!(redact("BADWORD and badWord", &["BadWord"]), "〇 and 〇");
    }

    #[test]
    fn test_metacharacters_match_literally() {
        assert_eq!(redact("a.b aXb", &["a.b"]), "〇 aXb");
        assert_eq!(redact("(x)+ xx", &["(x)+"]), "〇 xx");
        assert_eq!(redact("cost $5^2", &["$5^2"]), "cost 〇");
        assert_eq!(redact(r"a\b", &[r"a\b"]), "〇");
    }

    #[test]
    fn test_empty_word_set_is_noop() {
        let words: [&str; 0] = [];
        assert_eq!(redact("anything", &words), "anything");
        assert_eq!(redact("anything", &[""]), "anything");
    }

    #[test]
    fn test_multiline_preserved() {
        assert_eq!(
            redact("ng one\nclean\nNG two\n", &["ng"]),
            "〇 one\nclean\n〇 two\n"
        );
    }

    #[test]
    fn test_every_word_applies() {
        assert_eq!(redact("foo bar baz", &["foo", "baz"]), "〇 bar 〇");
    }

    #[test]
    fn test_redactor_reuse() {
        let redactor = Redactor::new(&["spoiler".to_string()]);
        assert_eq!(redactor.len(), 1);
        assert_eq!(redactor.apply("no Spoiler pls"), "no 〇 pls");
        assert_eq!(redactor.apply("clean"), "clean");
    }
}

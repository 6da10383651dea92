//! Phrase substitution: longest match first, single left-to-right pass.
//!
//! Keys match ASCII case-insensitively and only on word boundaries.
//! Replaced text is never rescanned, so `a → b` and `b → c` cannot chain.

use rhythmcard_core::RoleVocabulary;

#[derive(Debug, Clone, Default)]
pub struct PhraseMap {
    /// `(key, replacement)`, longest key first.
    entries: Vec<(String, String)>,
}

impl PhraseMap {
    pub fn from_vocabulary(vocab: &RoleVocabulary) -> Self {
        Self::new(
            vocab
                .sorted_entries()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut entries: Vec<(String, String)> = entries
            .into_iter()
            .filter(|(k, _)| !k.trim().is_empty())
            .collect();
        entries.sort_by(|a, b| {
            b.0.chars()
                .count()
                .cmp(&a.0.chars().count())
                .then_with(|| a.0.cmp(&b.0))
        });
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        if self.entries.is_empty() {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while pos < text.len() {
            let rest = &text[pos..];
            let at_boundary = text[..pos].chars().next_back().is_none_or(|c| !is_word_char(c));

            if at_boundary {
                if let Some((matched_len, replacement)) = self.match_at(rest) {
                    out.push_str(&preserve_leading_capital(&rest[..matched_len], replacement));
                    pos += matched_len;
                    continue;
                }
            }

            // `pos` is always on a char boundary, so `rest` is non-empty here.
            let Some(ch) = rest.chars().next() else {
                break;
            };
            out.push(ch);
            pos += ch.len_utf8();
        }
        out
    }

    /// First (longest) entry matching at the start of `rest` and ending on a word boundary.
    fn match_at(&self, rest: &str) -> Option<(usize, &str)> {
        self.entries.iter().find_map(|(key, replacement)| {
            let len = key.len();
            let candidate = rest.get(..len)?;
            if !candidate.eq_ignore_ascii_case(key) {
                return None;
            }
            let ends_on_boundary = rest[len..].chars().next().is_none_or(|c| !is_word_char(c));
            ends_on_boundary.then_some((len, replacement.as_str()))
        })
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn preserve_leading_capital(original: &str, replacement: &str) -> String {
    let capitalized = original.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if capitalized => first.to_uppercase().chain(chars).collect(),
        _ => replacement.to_string(),
    }
}

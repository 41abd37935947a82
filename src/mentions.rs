//! Confirmed-mention extraction.
//!
//! Free text is scanned for `@user` and `#tag` references against the
//! roster of known usernames. Only confirmed matches are reported: the
//! trigger must be preceded by start-of-string or whitespace, the name
//! must be on the roster (case-insensitively), and it must end at a word
//! boundary, so `@Bob` never matches a roster that only knows `Bobby`.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MentionTrigger {
    #[serde(rename = "@")]
    At,
    #[serde(rename = "#")]
    Hash,
}

impl MentionTrigger {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::At => '@',
            Self::Hash => '#',
        }
    }
}

/// One recognized reference inside a text body.
///
/// `start` is the byte offset of the trigger character, `end` the
/// exclusive offset past the matched name; `text[start..end]` is always
/// the trigger plus the name as typed. `username` carries the roster
/// casing, not the casing found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MentionEntity {
    pub start: usize,
    pub end: usize,
    pub trigger: MentionTrigger,
    pub username: String,
}

/// Precompiled roster pattern, reusable across keystrokes.
#[derive(Debug, Clone, Default)]
pub struct MentionMatcher {
    pattern: Option<Regex>,
    canonical: HashMap<String, String>,
}

impl MentionMatcher {
    #[must_use]
    pub fn new<S: AsRef<str>>(usernames: &[S]) -> Self {
        let mut canonical = HashMap::new();
        let mut names: Vec<&str> = Vec::new();

        for name in usernames {
            let name = name.as_ref();
            if name.is_empty() {
                continue;
            }
            let key = name.to_lowercase();
            if !canonical.contains_key(&key) {
                canonical.insert(key, name.to_string());
                names.push(name);
            }
        }

        if names.is_empty() {
            return Self {
                pattern: None,
                canonical,
            };
        }

        // Longer names first so the reported span is deterministic when one
        // roster name is a prefix of another.
        names.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let alternation = names
            .iter()
            .map(|name| regex::escape(name))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"(?:^|\s)([@#](?i:{alternation})\b)");

        let pattern = match Regex::new(&source) {
            Ok(re) => Some(re),
            Err(err) => {
                tracing::debug!(%err, "mention pattern failed to compile");
                None
            }
        };

        Self { pattern, canonical }
    }

    /// Scans left to right, non-overlapping. Empty input, an empty roster,
    /// or an unbuildable pattern all degrade to an empty result.
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<MentionEntity> {
        let Some(pattern) = &self.pattern else {
            return Vec::new();
        };
        if text.is_empty() {
            return Vec::new();
        }

        let mut entities = Vec::new();
        for captures in pattern.captures_iter(text) {
            let Some(span) = captures.get(1) else {
                continue;
            };
            let matched = span.as_str();
            let trigger = match matched.as_bytes().first() {
                Some(b'@') => MentionTrigger::At,
                Some(b'#') => MentionTrigger::Hash,
                _ => continue,
            };
            let name_in_text = &matched[1..];
            let username = self
                .canonical
                .get(&name_in_text.to_lowercase())
                .cloned()
                .unwrap_or_else(|| name_in_text.to_string());

            entities.push(MentionEntity {
                start: span.start(),
                end: span.end(),
                trigger,
                username,
            });
        }
        entities
    }
}

/// One-shot form of [`MentionMatcher`]: compile the roster, scan, discard.
#[must_use]
pub fn extract_confirmed_mentions(text: &str, usernames: &[String]) -> Vec<MentionEntity> {
    if text.is_empty() || usernames.is_empty() {
        return Vec::new();
    }
    MentionMatcher::new(usernames).scan(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn empty_roster_finds_nothing() {
        assert!(extract_confirmed_mentions("hi @Bob", &[]).is_empty());
    }

    #[test]
    fn empty_text_finds_nothing() {
        assert!(extract_confirmed_mentions("", &roster(&["Bob"])).is_empty());
    }

    #[test]
    fn exact_offsets_for_mixed_triggers() {
        let text = "hi @Bob and #Bob2 there";
        let entities = extract_confirmed_mentions(text, &roster(&["Bob", "Bob2"]));

        assert_eq!(
            entities,
            vec![
                MentionEntity {
                    start: 3,
                    end: 7,
                    trigger: MentionTrigger::At,
                    username: "Bob".into(),
                },
                MentionEntity {
                    start: 12,
                    end: 17,
                    trigger: MentionTrigger::Hash,
                    username: "Bob2".into(),
                },
            ]
        );
        assert_eq!(&text[3..7], "@Bob");
        assert_eq!(&text[12..17], "#Bob2");
    }

    #[test]
    fn matching_is_case_insensitive_but_reports_roster_casing() {
        let entities = extract_confirmed_mentions("hey @bob!", &roster(&["Bob"]));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].username, "Bob");
        assert_eq!(entities[0].start, 4);
        assert_eq!(entities[0].end, 8);
    }

    #[test]
    fn partial_names_are_rejected() {
        // "Bobby" is not "Bob": the name must end at a word boundary.
        assert!(extract_confirmed_mentions("hi @Bobby", &roster(&["Bob"])).is_empty());
        // And "Bob" is not "Bobby".
        assert!(extract_confirmed_mentions("hi @Bob!", &roster(&["Bobby"])).is_empty());
    }

    #[test]
    fn prefix_roster_names_resolve_to_the_longer_match() {
        let entities = extract_confirmed_mentions("hi @Bobby", &roster(&["Bob", "Bobby"]));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].username, "Bobby");
    }

    #[test]
    fn trigger_must_follow_whitespace_or_start() {
        assert!(extract_confirmed_mentions("hi@Bob", &roster(&["Bob"])).is_empty());

        let entities = extract_confirmed_mentions("@Bob hi", &roster(&["Bob"]));
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].start, 0);
    }

    #[test]
    fn adjacent_mentions_do_not_overlap() {
        let text = "@Bob @Bob";
        let entities = extract_confirmed_mentions(text, &roster(&["Bob"]));
        assert_eq!(entities.len(), 2);
        assert!(entities[0].end <= entities[1].start);
        assert_eq!(&text[entities[1].start..entities[1].end], "@Bob");
    }

    #[test]
    fn roster_names_are_matched_literally_not_as_patterns() {
        let with_dot = roster(&["a.b"]);
        assert_eq!(extract_confirmed_mentions("hi @a.b yo", &with_dot).len(), 1);
        assert!(extract_confirmed_mentions("hi @aXb yo", &with_dot).is_empty());
    }

    #[test]
    fn matcher_is_reusable_and_deterministic() {
        let matcher = MentionMatcher::new(&["Ann", "Bob"]);
        let first = matcher.scan("hi @Ann and @Bob");
        let second = matcher.scan("hi @Ann and @Bob");
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].username, "Ann");
        assert_eq!(first[1].username, "Bob");
    }

    proptest! {
        #[test]
        fn whole_word_roster_names_are_always_found(name in "[A-Za-z][A-Za-z0-9]{0,7}") {
            let text = format!("hello @{name}, bye");
            let entities = extract_confirmed_mentions(&text, &[name.clone()]);

            prop_assert_eq!(entities.len(), 1);
            let entity = &entities[0];
            prop_assert_eq!(entity.trigger, MentionTrigger::At);
            prop_assert_eq!(&entity.username, &name);
            prop_assert_eq!(&text[entity.start..entity.end], &format!("@{name}"));
        }
    }
}

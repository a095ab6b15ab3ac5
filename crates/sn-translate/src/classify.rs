//! Search-or-update classification of free-text commands.
//!
//! A command is an update only when it carries a mutation verb; a record
//! reference alone is not enough. A mutation verb without any reference
//! still classifies as update, with the missing reference surfaced later
//! as a `NoRecordReference` error.

use std::sync::LazyLock;

use regex::Regex;

use sn_protocol::record;

/// Verbs that signal a mutation.
const MUTATION_VERBS: &[&str] = &[
    "update", "set", "close", "change", "modify", "resolve", "assign",
];

static RE_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{})\b", MUTATION_VERBS.join("|"))).unwrap()
});

// Ticket number: alphabetic table prefix + at least 4 digits.
static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]{2,7}\d{4,}\b").unwrap());

// Opaque sys_id: exactly 32 hex characters.
static RE_SYS_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-fA-F]{32}\b").unwrap());

/// Classification outcome. Total over all inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Search,
    Update { reference: Option<String> },
}

/// Decide whether the text expresses a search or an update, capturing the
/// exact matched reference substring when one is present.
pub fn classify(text: &str) -> Classified {
    if !RE_VERB.is_match(text) {
        return Classified::Search;
    }
    Classified::Update {
        reference: find_reference(text),
    }
}

/// First record-reference token in the text. Sys_ids win over ticket
/// numbers; number candidates must carry a known table prefix so ordinary
/// word+digit runs don't count.
pub fn find_reference(text: &str) -> Option<String> {
    if let Some(m) = RE_SYS_ID.find(text) {
        return Some(m.as_str().to_string());
    }
    RE_NUMBER
        .find_iter(text)
        .map(|m| m.as_str())
        .find(|token| record::has_known_prefix(token))
        .map(str::to_string)
}

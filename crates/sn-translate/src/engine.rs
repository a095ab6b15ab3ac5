//! Translation engine — the one place free text becomes an executable
//! intent.
//!
//! Searches become a Contains filter on `short_description` against a
//! default table (`incident`) unless the text names another known table.
//! Updates compose the classifier and the field extractor.

use std::sync::LazyLock;

use regex::Regex;

use sn_protocol::{
    DEFAULT_TABLE, FilterClause, FilterOp, Intent, QuerySpec, RecordRef, UpdatePayload,
};

use crate::classify::{Classified, classify};
use crate::error::{TranslateError, TranslateResult};
use crate::fields;

/// Table keywords recognized in search text, in priority order.
const TABLE_KEYWORDS: &[(&str, &str)] = &[
    ("incident", "incident"),
    ("problem", "problem"),
    ("change", "change_request"),
    ("request", "sc_request"),
    ("task", "sc_task"),
];

// Leading search-verb phrase: "find all incidents about email" → "email".
static RE_SEARCH_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)
        ^ (?: find | search | show | list | get | give ) \s+
        (?: me \s+ )?
        (?: all \s+ )?
        (?: the \s+ )?
        (?: recent \s+ )?
        (?: (?: incidents? | problems? | changes? | requests? | tasks? | tickets? | records? ) \b \s* )?
        (?: (?: about | regarding | related \s+ to | containing | with | for ) \b )?
        \s* (.*) $",
    )
    .unwrap()
});

/// Detect an explicit table keyword; first listed keyword wins.
fn detect_table(lower: &str) -> Option<&'static str> {
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .filter(|w| !w.is_empty())
        .collect();
    TABLE_KEYWORDS
        .iter()
        .find(|(keyword, _)| {
            words
                .iter()
                .any(|w| *w == *keyword || w.strip_suffix('s') == Some(*keyword))
        })
        .map(|(_, table)| *table)
}

/// Build a best-effort query from search text: the text minus any leading
/// search-verb phrase becomes a Contains filter on `short_description`.
pub fn translate_search(text: &str) -> TranslateResult<(String, QuerySpec)> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TranslateError::ClassificationAmbiguous(text.to_string()));
    }

    let lower = trimmed.to_lowercase();
    let table = detect_table(&lower).unwrap_or(DEFAULT_TABLE).to_string();

    let term = RE_SEARCH_PREFIX
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|t| !t.is_empty())
        .unwrap_or(trimmed);

    let clause = FilterClause::new("short_description", FilterOp::Contains, term)?;
    Ok((table, QuerySpec::new().filter(clause)))
}

/// Resolve an update command into its target and payload.
pub fn translate_update(text: &str) -> TranslateResult<(RecordRef, UpdatePayload)> {
    match classify(text) {
        Classified::Update {
            reference: Some(raw),
        } => {
            let record = RecordRef::parse(&raw).ok_or(TranslateError::NoRecordReference)?;
            let payload = fields::extract(text, &raw)?;
            Ok((record, payload))
        }
        Classified::Update { reference: None } => Err(TranslateError::NoRecordReference),
        Classified::Search => Err(TranslateError::ClassificationAmbiguous(text.to_string())),
    }
}

/// Classify and translate in one step.
pub fn translate(text: &str) -> TranslateResult<Intent> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TranslateError::ClassificationAmbiguous(text.to_string()));
    }
    match classify(trimmed) {
        Classified::Update { .. } => {
            let (record, payload) = translate_update(trimmed)?;
            Ok(Intent::Update { record, payload })
        }
        Classified::Search => {
            let (table, spec) = translate_search(trimmed)?;
            Ok(Intent::Search { table, spec })
        }
    }
}

/// Non-failing form of [`translate`]: unresolvable text folds into
/// `Intent::Unknown`.
pub fn resolve(text: &str) -> Intent {
    translate(text).unwrap_or_else(|error| {
        tracing::debug!(%error, "command did not translate");
        Intent::Unknown {
            raw: text.to_string(),
        }
    })
}

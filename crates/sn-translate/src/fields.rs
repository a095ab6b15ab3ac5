//! Phrase-to-field extraction for update commands.
//!
//! Rules apply in a fixed order so the same text always yields the same
//! payload:
//! 1. State phrases: close/closed/closing sets state 7; otherwise
//!    resolve/resolved/resolving sets state 6.
//! 2. The record reference, the first mutation verb, leading record
//!    nouns, and a leading connective are stripped; if the remainder
//!    starts a marker phrase ("comment:", "comments:", "note:") the text
//!    after it becomes `comments`, otherwise the whole remainder becomes
//!    `work_notes` with its original casing.
//! 3. An empty payload is an `EmptyUpdate` error, never a no-op mutation.

use std::sync::LazyLock;

use regex::Regex;

use sn_protocol::{IncidentState, UpdatePayload};

use crate::error::{TranslateError, TranslateResult};

static RE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:close|closed|closing)\b").unwrap());

static RE_RESOLVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:resolve|resolved|resolving)\b").unwrap());

static RE_VERB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:update|set|close|change|modify|resolve|assign)\b").unwrap()
});

static RE_LEADING_NOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:incident|ticket|record|the)\b").unwrap());

static RE_LEADING_CONNECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:saying|to say|that|with|to)\b").unwrap());

/// Marker phrases that route the remainder into `comments`, in priority
/// order.
const COMMENT_MARKERS: &[&str] = &["comment:", "comments:", "note:"];

/// Extract an update payload from a command whose reference has already
/// been identified.
pub fn extract(text: &str, reference: &str) -> TranslateResult<UpdatePayload> {
    let mut payload = UpdatePayload::new();

    // Rule 1: state phrases anywhere in the command.
    if RE_CLOSE.is_match(text) {
        payload.set_state(IncidentState::Closed);
    } else if RE_RESOLVE.is_match(text) {
        payload.set_state(IncidentState::Resolved);
    }

    // Rule 2: remainder routing.
    let remainder = strip_command_words(text, reference);
    if !remainder.is_empty() {
        if let Some(comment) = after_marker(&remainder) {
            if !comment.is_empty() {
                payload.set("comments", comment)?;
            }
        } else {
            payload.set("work_notes", remainder)?;
        }
    }

    // Rule 3: nothing actionable.
    if payload.is_empty() {
        return Err(TranslateError::EmptyUpdate);
    }
    Ok(payload)
}

/// Remove the reference, the first mutation verb, leading record nouns,
/// and a leading connective, preserving the casing of what remains.
fn strip_command_words(text: &str, reference: &str) -> String {
    let mut rest = text.replacen(reference, "", 1);

    if let Some(range) = RE_VERB.find(&rest).map(|m| m.range()) {
        rest.replace_range(range, "");
    }

    let mut rest = rest.trim();
    while let Some(m) = RE_LEADING_NOUN.find(rest) {
        rest = rest[m.end()..].trim_start();
    }
    if let Some(m) = RE_LEADING_CONNECTIVE.find(rest) {
        rest = rest[m.end()..].trim_start();
    }
    rest.trim().to_string()
}

/// Text after the first marker phrase, if any marker is present.
fn after_marker(remainder: &str) -> Option<&str> {
    let lower = remainder.to_lowercase();
    COMMENT_MARKERS
        .iter()
        .filter_map(|marker| lower.find(marker).map(|pos| (pos, marker.len())))
        .min_by_key(|(pos, _)| *pos)
        // Indexing by position in the lowered text; `get` guards against
        // case folds that shift byte offsets.
        .map(|(pos, len)| remainder.get(pos + len..).unwrap_or("").trim())
}

//! Record identity: ticket numbers, sys_ids, table mapping, state codes.

use serde::{Deserialize, Serialize};

/// Table used when a command names no table of its own.
pub const DEFAULT_TABLE: &str = "incident";

/// Ticket-number prefixes and the tables they identify.
///
/// Longer prefixes listed first so `SCTASK0001` never matches a shorter
/// entry by accident.
const NUMBER_PREFIXES: &[(&str, &str)] = &[
    ("SCTASK", "sc_task"),
    ("RITM", "sc_req_item"),
    ("CHG", "change_request"),
    ("INC", "incident"),
    ("PRB", "problem"),
    ("REQ", "sc_request"),
];

fn alpha_prefix(number: &str) -> String {
    number
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Map a ticket number's alphabetic prefix to its table.
/// Unknown prefixes fall back to the default table.
pub fn table_for_number(number: &str) -> &'static str {
    let prefix = alpha_prefix(number);
    NUMBER_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, table)| *table)
        .unwrap_or(DEFAULT_TABLE)
}

/// True when the token's alphabetic prefix names a known table.
pub fn has_known_prefix(number: &str) -> bool {
    let prefix = alpha_prefix(number);
    NUMBER_PREFIXES.iter().any(|(p, _)| *p == prefix)
}

fn looks_like_sys_id(token: &str) -> bool {
    token.len() == 32 && token.chars().all(|c| c.is_ascii_hexdigit())
}

fn looks_like_number(token: &str) -> bool {
    let alpha = token.chars().take_while(|c| c.is_ascii_alphabetic()).count();
    let digits = token.len() - alpha;
    (2..=7).contains(&alpha)
        && digits >= 4
        && token[alpha..].chars().all(|c| c.is_ascii_digit())
}

/// The target of a mutation: a human-readable ticket number or a
/// table-qualified opaque sys_id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    /// Ticket number such as `INC0010001`; the table is derived from the
    /// alphabetic prefix.
    Number(String),
    /// Opaque 32-character identifier plus the table it belongs to.
    SysId { table: String, id: String },
}

impl RecordRef {
    /// Parse a reference token. Sys_ids are recognized before numbers
    /// (a 32-hex token is never a plausible ticket number). Sys_ids taken
    /// from free text are scoped to the default table.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if looks_like_sys_id(token) {
            return Some(Self::SysId {
                table: DEFAULT_TABLE.to_string(),
                id: token.to_string(),
            });
        }
        if looks_like_number(token) {
            return Some(Self::Number(token.to_string()));
        }
        None
    }

    pub fn table(&self) -> &str {
        match self {
            Self::Number(number) => table_for_number(number),
            Self::SysId { table, .. } => table,
        }
    }
}

impl std::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(number) => f.write_str(number),
            Self::SysId { table, id } => write!(f, "{table}/{id}"),
        }
    }
}

/// Incident lifecycle states and their numeric codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncidentState {
    New,
    InProgress,
    OnHold,
    Resolved,
    Closed,
}

impl IncidentState {
    /// Numeric state code as the Table API expects it (a string field).
    pub fn code(self) -> &'static str {
        match self {
            Self::New => "1",
            Self::InProgress => "2",
            Self::OnHold => "3",
            Self::Resolved => "6",
            Self::Closed => "7",
        }
    }
}

/// Fields an update may touch. Anything else is rejected, not dropped.
pub const UPDATE_FIELDS: &[&str] = &[
    "short_description",
    "description",
    "state",
    "work_notes",
    "comments",
    "category",
    "subcategory",
    "urgency",
    "impact",
    "assignment_group",
    "assigned_to",
];

pub fn is_update_field(name: &str) -> bool {
    UPDATE_FIELDS.contains(&name)
}

/// Typed incident-creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentCreate {
    pub short_description: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caller_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignment_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
}

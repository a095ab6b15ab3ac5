//! Structured filter model and ServiceNow encoded-query rendering.
//!
//! A `QuerySpec` is an ordered list of AND-combined `FilterClause`s plus
//! sort and paging. Rendering is infallible and deterministic because the
//! reserved characters of the encoded-query grammar are rejected when a
//! clause is built, never escaped at render time.

use thiserror::Error;

/// Default result page size when the caller does not specify one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Errors from building query clauses or specs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("filter field must not be empty")]
    EmptyField,

    #[error("reserved character '^' in {0:?}")]
    ReservedCharacter(String),

    #[error("',' not allowed inside IN-list element {0:?}")]
    CommaInListElement(String),

    #[error("limit must be greater than zero")]
    ZeroLimit,
}

/// Comparison operator of a single filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Equals,
    Contains,
    GreaterThan,
    LessThan,
    StartsWith,
    In,
}

impl FilterOp {
    /// Operator token in the encoded-query grammar.
    fn token(self) -> &'static str {
        match self {
            Self::Equals => "=",
            Self::Contains => "LIKE",
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::StartsWith => "STARTSWITH",
            Self::In => "IN",
        }
    }
}

/// Right-hand side of a filter clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(i64),
    List(Vec<String>),
}

impl FilterValue {
    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::List(items) => items.join(","),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FilterValue {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

/// One `field <op> value` term. Immutable once built; the constructor is
/// the only place grammar-reserved characters are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    field: String,
    op: FilterOp,
    value: FilterValue,
}

impl FilterClause {
    pub fn new(
        field: impl Into<String>,
        op: FilterOp,
        value: impl Into<FilterValue>,
    ) -> Result<Self, QueryError> {
        let field = field.into();
        let value = value.into();

        if field.trim().is_empty() {
            return Err(QueryError::EmptyField);
        }
        if field.contains('^') {
            return Err(QueryError::ReservedCharacter(field));
        }
        match &value {
            FilterValue::Text(s) => {
                if s.contains('^') {
                    return Err(QueryError::ReservedCharacter(s.clone()));
                }
            }
            FilterValue::Number(_) => {}
            FilterValue::List(items) => {
                for item in items {
                    if item.contains('^') {
                        return Err(QueryError::ReservedCharacter(item.clone()));
                    }
                    if item.contains(',') {
                        return Err(QueryError::CommaInListElement(item.clone()));
                    }
                }
            }
        }

        Ok(Self { field, op, value })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    fn render(&self) -> String {
        format!("{}{}{}", self.field, self.op.token(), self.value.render())
    }
}

/// Sort direction for the optional ordering directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Sort {
    field: String,
    direction: SortDirection,
}

/// An ordered, AND-combined filter set with sort and paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    clauses: Vec<FilterClause>,
    sort: Option<Sort>,
    limit: u32,
    offset: u32,
    fields: Option<Vec<String>>,
}

impl QuerySpec {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            sort: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
            fields: None,
        }
    }

    /// Append a clause. Clause order is preserved and significant for
    /// byte-identical encoding.
    pub fn filter(mut self, clause: FilterClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn order_by(
        mut self,
        field: impl Into<String>,
        direction: SortDirection,
    ) -> Result<Self, QueryError> {
        let field = field.into();
        if field.trim().is_empty() {
            return Err(QueryError::EmptyField);
        }
        if field.contains('^') {
            return Err(QueryError::ReservedCharacter(field));
        }
        self.sort = Some(Sort { field, direction });
        Ok(self)
    }

    pub fn with_limit(mut self, limit: u32) -> Result<Self, QueryError> {
        if limit == 0 {
            return Err(QueryError::ZeroLimit);
        }
        self.limit = limit;
        Ok(self)
    }

    pub fn with_offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Restrict the returned columns.
    pub fn select(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn fields(&self) -> Option<&[String]> {
        self.fields.as_deref()
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    /// No filter and no ordering; encodes to the empty string.
    pub fn is_unfiltered(&self) -> bool {
        self.clauses.is_empty() && self.sort.is_none()
    }

    /// Render the encoded-query string: clauses joined with `^`, then the
    /// ordering directive. Equal specs always render byte-identically.
    pub fn encode(&self) -> String {
        let mut parts: Vec<String> = self.clauses.iter().map(FilterClause::render).collect();
        if let Some(sort) = &self.sort {
            parts.push(match sort.direction {
                SortDirection::Ascending => format!("ORDERBY{}", sort.field),
                SortDirection::Descending => format!("ORDERBYDESC{}", sort.field),
            });
        }
        parts.join("^")
    }
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new()
    }
}

//! The application request handed from routing to dispatch.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::MODULE_SEPARATOR;
use crate::method::Action;
use crate::request::UploadedFile;

/// A query parameter value. Numeric strings are stored as integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    /// A numeric value.
    Int(i64),
    /// Any other value.
    Str(String),
}

impl QueryValue {
    /// Builds a value from a raw query string value, coercing numbers.
    ///
    /// A value is numeric when it is a decimal literal with an optional sign,
    /// fraction and exponent, optionally preceded by whitespace. Integer
    /// literals are kept exactly; other numeric literals are truncated toward
    /// zero and saturate at the `i64` bounds.
    #[must_use]
    pub fn coerce(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        if !is_numeric(trimmed) {
            return Self::Str(raw.to_string());
        }
        trimmed.parse::<i64>().map_or_else(
            |_| {
                #[allow(clippy::cast_possible_truncation)]
                let value = trimmed.parse::<f64>().map_or(0, |f| f as i64);
                Self::Int(value)
            },
            Self::Int,
        )
    }

    /// Returns the integer value, if numeric.
    #[must_use]
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Str(_) => None,
        }
    }

    /// Returns the string value, if not numeric.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Int(_) => None,
            Self::Str(s) => Some(s.as_str()),
        }
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with at least one digit in the
/// mantissa. `.5` and `5.` are numeric.
fn is_numeric(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    let digits = |i: &mut usize| {
        let start = *i;
        while *i < bytes.len() && bytes[*i].is_ascii_digit() {
            *i += 1;
        }
        *i - start
    };

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let mut mantissa = digits(&mut i);
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        mantissa += digits(&mut i);
    }
    if mantissa == 0 {
        return false;
    }
    if matches!(bytes.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(bytes.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        if digits(&mut i) == 0 {
            return false;
        }
    }
    i == bytes.len()
}

/// Routing parameters of an [`ApplicationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameters {
    /// Action derived from the HTTP method.
    pub action: Action,
    /// Resource identifier, the last path token when the segment count is
    /// even.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Negotiated response format name.
    pub format: String,
    /// Parent resources as `(relation, id)` pairs, outermost first.
    pub associations: IndexMap<String, String>,
    /// Raw request body.
    pub data: Vec<u8>,
    /// Query parameters with numeric values coerced.
    pub query: IndexMap<String, QueryValue>,
}

impl Parameters {
    /// Creates parameters for an action with everything else empty.
    pub fn new(action: Action, format: impl Into<String>) -> Self {
        Self {
            action,
            id: None,
            format: format.into(),
            associations: IndexMap::new(),
            data: Vec::new(),
            query: IndexMap::new(),
        }
    }

    /// Returns the body as a string.
    #[must_use]
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.data.clone()).ok()
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the body is not valid JSON for `T`.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.data)
    }
}

/// The descriptor produced by matching a request and consumed by URL
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationRequest {
    /// Module-qualified handler name, e.g. `Admin:Users`.
    pub target: String,
    /// Effective HTTP method, after method override.
    pub http_method: String,
    /// Routing parameters.
    pub parameters: Parameters,
    /// Uploaded files.
    pub files: Vec<UploadedFile>,
}

impl ApplicationRequest {
    /// Creates a descriptor for a target with default parameters.
    ///
    /// Used by dispatchers to describe a resource they want a link to.
    pub fn new(target: impl Into<String>, http_method: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            http_method: http_method.into(),
            parameters: Parameters::new(Action::Read, ""),
            files: Vec::new(),
        }
    }

    /// Sets the action.
    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.parameters.action = action;
        self
    }

    /// Sets the resource id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.parameters.id = Some(id.into());
        self
    }

    /// Sets the format name.
    #[must_use]
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.parameters.format = format.into();
        self
    }

    /// Appends a parent association.
    #[must_use]
    pub fn association(mut self, relation: impl Into<String>, id: impl Into<String>) -> Self {
        self.parameters.associations.insert(relation.into(), id.into());
        self
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.parameters.query.insert(key.into(), value.into());
        self
    }

    /// Returns the module part of the target, if any.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.target
            .rsplit_once(MODULE_SEPARATOR)
            .map(|(module, _)| module)
    }

    /// Returns the resource part of the target.
    #[must_use]
    pub fn resource(&self) -> &str {
        self.target
            .rsplit_once(MODULE_SEPARATOR)
            .map_or(self.target.as_str(), |(_, resource)| resource)
    }
}

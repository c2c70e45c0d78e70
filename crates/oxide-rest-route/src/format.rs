//! Response format negotiation.

use indexmap::IndexMap;

/// Resolves symbolic formats such as `json` from MIME types and URL suffixes.
///
/// The table order is the negotiation priority. The same negotiator strips
/// suffixes from resource names and picks the response format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatNegotiator {
    /// Symbolic name to MIME type, in priority order.
    formats: IndexMap<String, String>,
    /// Format used when neither header nor suffix decides.
    default_format: String,
}

impl FormatNegotiator {
    pub(crate) fn new(formats: IndexMap<String, String>, default_format: String) -> Self {
        Self {
            formats,
            default_format,
        }
    }

    /// Returns the format table.
    #[must_use]
    pub const fn formats(&self) -> &IndexMap<String, String> {
        &self.formats
    }

    /// Returns the default format name.
    #[must_use]
    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    /// Returns `true` if `name` is a configured format.
    #[must_use]
    pub fn is_known(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Returns the MIME type registered for a format name.
    #[must_use]
    pub fn mime_type(&self, name: &str) -> Option<&str> {
        self.formats.get(name).map(String::as_str)
    }

    /// Returns the format name registered for an exact MIME type.
    #[must_use]
    pub fn format_for_mime(&self, mime: &str) -> Option<&str> {
        self.formats
            .iter()
            .find(|(_, m)| m.eq_ignore_ascii_case(mime))
            .map(|(name, _)| name.as_str())
    }

    /// Splits a trailing `.<format>` off a path token.
    ///
    /// Only known formats are split, and only when something precedes the
    /// dot: `users.json` gives `("users", Some("json"))`, while `.json` and
    /// `users.csv` come back untouched.
    #[must_use]
    pub fn split_suffix<'a>(&self, token: &'a str) -> (&'a str, Option<&'a str>) {
        match token.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() && self.is_known(ext) => (stem, Some(ext)),
            _ => (token, None),
        }
    }

    /// Picks the response format for a request.
    ///
    /// The `Accept` header is scanned for each configured MIME type in
    /// priority order; the first one contained in the header wins. Quality
    /// values are ignored. Failing that, a known suffix on the last path
    /// segment decides, and failing that the default format is used.
    #[must_use]
    pub fn negotiate(&self, accept: Option<&str>, path: &str) -> &str {
        if let Some(accept) = accept {
            if let Some((name, _)) = self
                .formats
                .iter()
                .find(|(_, mime)| accept.contains(mime.as_str()))
            {
                return name;
            }
        }

        let last = path.rsplit('/').next().unwrap_or(path);
        if let (_, Some(ext)) = self.split_suffix(last) {
            if let Some((name, _)) = self.formats.get_key_value(ext) {
                return name;
            }
        }

        &self.default_format
    }
}

impl Default for FormatNegotiator {
    fn default() -> Self {
        Self::new(default_formats(), "json".to_string())
    }
}

/// The built-in format table: JSON first, then XML.
#[must_use]
pub fn default_formats() -> IndexMap<String, String> {
    [
        ("json".to_string(), "application/json".to_string()),
        ("xml".to_string(), "application/xml".to_string()),
    ]
    .into_iter()
    .collect()
}

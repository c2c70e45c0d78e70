//! Route configuration.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::format::{default_formats, FormatNegotiator};

/// Separator between a module namespace and the resource name.
pub const MODULE_SEPARATOR: char = ':';

const DEFAULT_FORMAT: &str = "json";
const DEFAULT_QUERY_SEPARATOR: char = '&';

/// Validated, immutable configuration of a [`RestRoute`].
///
/// [`RestRoute`]: crate::RestRoute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConfig {
    module: Option<String>,
    negotiator: FormatNegotiator,
    query_separator: char,
}

impl RouteConfig {
    /// Creates a configuration with the built-in JSON and XML formats.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnknownFormat`] if `default_format` is neither
    /// `json` nor `xml`.
    pub fn new(module: Option<&str>, default_format: &str) -> Result<Self> {
        let mut builder = Self::builder().default_format(default_format);
        if let Some(module) = module {
            builder = builder.module(module);
        }
        builder.build()
    }

    /// Returns a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> RouteConfigBuilder {
        RouteConfigBuilder::default()
    }

    /// Returns the module namespace, e.g. `Admin:Users`.
    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Returns the path the module is mounted at: `Admin:Users` is mounted
    /// at `admin/users`. Without a module this is empty.
    #[must_use]
    pub fn mount_path(&self) -> String {
        self.module
            .as_deref()
            .map(|m| m.replace(MODULE_SEPARATOR, "/").to_lowercase())
            .unwrap_or_default()
    }

    /// Returns the format negotiator.
    #[must_use]
    pub const fn negotiator(&self) -> &FormatNegotiator {
        &self.negotiator
    }

    /// Returns the format table in priority order.
    #[must_use]
    pub const fn formats(&self) -> &IndexMap<String, String> {
        self.negotiator.formats()
    }

    /// Returns the default format name.
    #[must_use]
    pub fn default_format(&self) -> &str {
        self.negotiator.default_format()
    }

    /// Returns the separator placed between encoded query pairs.
    #[must_use]
    pub const fn query_separator(&self) -> char {
        self.query_separator
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            module: None,
            negotiator: FormatNegotiator::default(),
            query_separator: DEFAULT_QUERY_SEPARATOR,
        }
    }
}

/// Builder for [`RouteConfig`].
#[derive(Debug, Clone)]
pub struct RouteConfigBuilder {
    module: Option<String>,
    formats: IndexMap<String, String>,
    default_format: String,
    query_separator: char,
}

impl Default for RouteConfigBuilder {
    fn default() -> Self {
        Self {
            module: None,
            formats: default_formats(),
            default_format: DEFAULT_FORMAT.to_string(),
            query_separator: DEFAULT_QUERY_SEPARATOR,
        }
    }
}

impl RouteConfigBuilder {
    /// Sets the module namespace. An empty string means no module.
    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        let module = module.into();
        self.module = (!module.is_empty()).then_some(module);
        self
    }

    /// Adds a format, or replaces the MIME type of an existing one.
    ///
    /// New formats go to the end of the priority order.
    #[must_use]
    pub fn format(mut self, name: impl Into<String>, mime: impl Into<String>) -> Self {
        self.formats.insert(name.into(), mime.into());
        self
    }

    /// Replaces the whole format table.
    #[must_use]
    pub fn formats<I, K, V>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.formats = formats
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Sets the default format.
    #[must_use]
    pub fn default_format(mut self, name: impl Into<String>) -> Self {
        self.default_format = name.into();
        self
    }

    /// Sets the query pair separator used when building URLs.
    #[must_use]
    pub fn query_separator(mut self, separator: char) -> Self {
        self.query_separator = separator;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::EmptyFormats`] if no format is configured and
    /// [`RouteError::UnknownFormat`] if the default format is not in the
    /// table.
    pub fn build(self) -> Result<RouteConfig> {
        if self.formats.is_empty() {
            return Err(RouteError::EmptyFormats);
        }
        if !self.formats.contains_key(&self.default_format) {
            return Err(RouteError::UnknownFormat {
                format: self.default_format,
            });
        }
        Ok(RouteConfig {
            module: self.module,
            negotiator: FormatNegotiator::new(self.formats, self.default_format),
            query_separator: self.query_separator,
        })
    }
}

/// Deserializable route settings, e.g. a section of an application config
/// file. Convert with [`RouteConfig::try_from`] to validate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouteSettings {
    pub module: Option<String>,
    pub formats: IndexMap<String, String>,
    pub default_format: String,
    pub query_separator: char,
}

impl Default for RouteSettings {
    fn default() -> Self {
        Self {
            module: None,
            formats: default_formats(),
            default_format: DEFAULT_FORMAT.to_string(),
            query_separator: DEFAULT_QUERY_SEPARATOR,
        }
    }
}

impl TryFrom<RouteSettings> for RouteConfig {
    type Error = RouteError;

    fn try_from(settings: RouteSettings) -> Result<Self> {
        let mut builder = Self::builder()
            .formats(settings.formats)
            .default_format(settings.default_format)
            .query_separator(settings.query_separator);
        if let Some(module) = settings.module {
            builder = builder.module(module);
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouteConfig::new(None, "json").unwrap();
        assert_eq!(config.module(), None);
        assert_eq!(config.default_format(), "json");
        assert_eq!(config.query_separator(), '&');
        let names: Vec<&str> = config.formats().keys().map(String::as_str).collect();
        assert_eq!(names, ["json", "xml"]);
        assert_eq!(config, RouteConfig::default());
    }

    #[test]
    fn test_unknown_default_format() {
        let err = RouteConfig::new(None, "yaml").unwrap_err();
        assert!(err.is_config());
        assert_eq!(err.to_string(), "format 'yaml' is not allowed");
    }

    #[test]
    fn test_empty_formats() {
        let err = RouteConfig::builder()
            .formats(Vec::<(String, String)>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, RouteError::EmptyFormats));
    }

    #[test]
    fn test_custom_format() {
        let config = RouteConfig::builder()
            .format("yaml", "application/yaml")
            .default_format("yaml")
            .build()
            .unwrap();
        assert_eq!(config.default_format(), "yaml");
        assert_eq!(config.negotiator().mime_type("yaml"), Some("application/yaml"));
    }

    #[test]
    fn test_mount_path() {
        let config = RouteConfig::new(Some("Admin:Users"), "json").unwrap();
        assert_eq!(config.mount_path(), "admin/users");
        assert_eq!(RouteConfig::default().mount_path(), "");
    }

    #[test]
    fn test_empty_module_is_no_module() {
        let config = RouteConfig::new(Some(""), "json").unwrap();
        assert_eq!(config.module(), None);
    }

    #[test]
    fn test_settings_from_json() {
        let settings: RouteSettings = serde_json::from_str(
            r#"{"module": "Api:V1", "default_format": "xml", "query_separator": ";"}"#,
        )
        .unwrap();
        let config = RouteConfig::try_from(settings).unwrap();
        assert_eq!(config.module(), Some("Api:V1"));
        assert_eq!(config.default_format(), "xml");
        assert_eq!(config.query_separator(), ';');
    }

    #[test]
    fn test_settings_validation() {
        let settings: RouteSettings =
            serde_json::from_str(r#"{"formats": {"csv": "text/csv"}}"#).unwrap();
        let err = RouteConfig::try_from(settings).unwrap_err();
        assert!(matches!(err, RouteError::UnknownFormat { ref format } if format == "json"));
    }
}

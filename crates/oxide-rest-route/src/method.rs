//! HTTP methods, CRUD actions, and method override.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RouteError};
use crate::request::HttpRequest;

/// Header a client sets to tunnel another method through POST.
pub const HTTP_HEADER_OVERRIDE: &str = "X-HTTP-Method-Override";

/// Query parameter a client sets to tunnel another method through POST.
pub const QUERY_PARAM_OVERRIDE: &str = "__method";

/// HTTP methods the router maps to actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// OPTIONS method
    Options,
}

impl Method {
    /// Returns the method as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Options => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = RouteError;

    /// Parses an upper-case method name. Matching is exact: the override
    /// value is upper-cased before it gets here, the request line is not.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "OPTIONS" => Ok(Self::Options),
            _ => Err(RouteError::MethodNotAllowed {
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The action a handler is asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Action {
    /// Read one resource.
    Read,
    /// Read the whole collection.
    ReadAll,
    /// Create a resource.
    Create,
    /// Update some fields of a resource.
    PartialUpdate,
    /// Replace a resource.
    Update,
    /// Delete a resource.
    Delete,
    /// Describe the resource.
    Options,
}

impl Action {
    /// Maps an effective method name to its action.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MethodNotAllowed`] for methods outside
    /// GET, POST, PATCH, PUT, DELETE and OPTIONS.
    pub fn from_method(method: &str) -> Result<Self> {
        Ok(Self::from(method.parse::<Method>()?))
    }

    /// Returns the action name handlers are keyed by.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::ReadAll => "readAll",
            Self::Create => "create",
            Self::PartialUpdate => "partialUpdate",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Options => "options",
        }
    }
}

impl From<Method> for Action {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::Read,
            Method::Post => Self::Create,
            Method::Patch => Self::PartialUpdate,
            Method::Put => Self::Update,
            Method::Delete => Self::Delete,
            Method::Options => Self::Options,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the method the request should be treated as.
///
/// Only POST can be overridden. The override header is consulted before the
/// override query parameter; the value is upper-cased.
pub fn resolve_method<R: HttpRequest + ?Sized>(request: &R) -> String {
    let method = request.method();
    if method != Method::Post.as_str() {
        return method.to_string();
    }
    request
        .get_header(HTTP_HEADER_OVERRIDE)
        .or_else(|| request.get_query(QUERY_PARAM_OVERRIDE))
        .map_or_else(|| method.to_string(), str::to_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;

    #[test]
    fn test_method_parsing() {
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert_eq!("OPTIONS".parse::<Method>().unwrap(), Method::Options);
        assert!("HEAD".parse::<Method>().is_err());
        assert!("get".parse::<Method>().is_err());
    }

    #[test]
    fn test_action_mapping() {
        assert_eq!(Action::from_method("GET").unwrap(), Action::Read);
        assert_eq!(Action::from_method("POST").unwrap(), Action::Create);
        assert_eq!(Action::from_method("PATCH").unwrap(), Action::PartialUpdate);
        assert_eq!(Action::from_method("PUT").unwrap(), Action::Update);
        assert_eq!(Action::from_method("DELETE").unwrap(), Action::Delete);
        assert_eq!(Action::from_method("OPTIONS").unwrap(), Action::Options);
    }

    #[test]
    fn test_unknown_method_is_not_allowed() {
        let err = Action::from_method("TRACE").unwrap_err();
        assert!(matches!(err, RouteError::MethodNotAllowed { ref method } if method == "TRACE"));
        assert_eq!(err.to_string(), "method TRACE is not allowed");
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::ReadAll.to_string(), "readAll");
        assert_eq!(Action::PartialUpdate.as_str(), "partialUpdate");
        assert_eq!(
            serde_json::to_string(&Action::ReadAll).unwrap(),
            "\"readAll\""
        );
    }

    #[test]
    fn test_override_header() {
        let req = Request::post("/users").header("x-http-method-override", "delete");
        assert_eq!(resolve_method(&req), "DELETE");
    }

    #[test]
    fn test_override_query_param() {
        let req = Request::post("/users").query_param("__method", "patch");
        assert_eq!(resolve_method(&req), "PATCH");
    }

    #[test]
    fn test_override_header_wins_over_query() {
        let req = Request::post("/users")
            .header(HTTP_HEADER_OVERRIDE, "PUT")
            .query_param(QUERY_PARAM_OVERRIDE, "DELETE");
        assert_eq!(resolve_method(&req), "PUT");
    }

    #[test]
    fn test_override_only_applies_to_post() {
        let req = Request::get("/users").header(HTTP_HEADER_OVERRIDE, "DELETE");
        assert_eq!(resolve_method(&req), "GET");
        assert_eq!(resolve_method(&Request::post("/users")), "POST");
    }
}

//! Convention-based REST route and route lists.

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::config::{RouteConfig, MODULE_SEPARATOR};
use crate::descriptor::{ApplicationRequest, Parameters, QueryValue};
use crate::error::{Result, RouteError};
use crate::inflector::{spinal_case, studly_case};
use crate::method::{resolve_method, Action};
use crate::request::HttpRequest;

/// Two-way mapping between HTTP requests and application requests.
pub trait Route {
    /// Maps an HTTP request to an application request.
    ///
    /// Returns `Ok(None)` when the request does not belong to this route.
    ///
    /// # Errors
    ///
    /// Returns an error when the request belongs to the route but cannot be
    /// served, e.g. its method has no action.
    fn match_request(&self, request: &mut dyn HttpRequest) -> Result<Option<ApplicationRequest>>;

    /// Builds the absolute URL of an application request.
    ///
    /// Returns `None` when the application request does not belong to this
    /// route.
    fn construct_url(&self, request: &ApplicationRequest, base_url: &str) -> Option<String>;
}

/// A route that derives handler, action and id from the URL layout.
///
/// Paths are read right to left. With an even number of segments the last one
/// is the resource id; the segment before it names the resource; whatever
/// precedes it are `(relation, id)` pairs of parent resources:
///
/// ```text
/// /authors/3/books/7    GET  -> Books   read     id=7  associations={authors: 3}
/// /authors/3/books      GET  -> Books   readAll        associations={authors: 3}
/// /books                POST -> Books   create
/// ```
///
/// # Example
///
/// ```
/// use oxide_rest_route::{Action, Request, RestRoute, RouteConfig};
///
/// let route = RestRoute::new(RouteConfig::new(Some("Api"), "json").unwrap());
///
/// let mut request = Request::get("/api/authors/3/books/7");
/// let app = route.match_request(&mut request).unwrap().unwrap();
/// assert_eq!(app.target, "Api:Books");
/// assert_eq!(app.parameters.action, Action::Read);
/// assert_eq!(app.parameters.id.as_deref(), Some("7"));
///
/// let url = route.construct_url(&app, "https://example.com/").unwrap();
/// assert_eq!(url, "https://example.com/api/authors/3/books/7");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RestRoute {
    config: RouteConfig,
    mount_path: String,
}

impl RestRoute {
    /// Creates a route from a validated configuration.
    #[must_use]
    pub fn new(config: RouteConfig) -> Self {
        let mount_path = config.mount_path();
        Self { config, mount_path }
    }

    /// Returns the route configuration.
    #[must_use]
    pub const fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Returns the path prefix this route answers under.
    #[must_use]
    pub fn mount_path(&self) -> &str {
        &self.mount_path
    }

    /// Returns the MIME type of the format negotiated for `request`.
    #[must_use]
    pub fn content_type(&self, request: &ApplicationRequest) -> Option<&str> {
        self.config
            .negotiator()
            .mime_type(&request.parameters.format)
    }

    /// Maps an HTTP request to an application request.
    ///
    /// The request body is consumed.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::MethodNotAllowed`] if the effective method has no
    /// action and [`RouteError::Body`] if reading the body fails.
    pub fn match_request<R: HttpRequest + ?Sized>(
        &self,
        request: &mut R,
    ) -> Result<Option<ApplicationRequest>> {
        let Some(relative) = self.relative_path(request) else {
            return Ok(None);
        };

        let method = resolve_method(request);
        let mut action = match Action::from_method(&method) {
            Ok(action) => action,
            Err(err) => {
                warn!(method = %method, path = request.path(), "method not allowed");
                return Err(err);
            }
        };

        let mut frags: Vec<&str> = relative.split('/').collect();
        let id = if frags.len() % 2 == 0 {
            frags.pop().map(str::to_string)
        } else {
            if action == Action::Read {
                action = Action::ReadAll;
            }
            None
        };

        let negotiator = self.config.negotiator();
        let resource_token = frags.pop().unwrap_or_default();
        let (resource_token, _) = negotiator.split_suffix(resource_token);
        let resource = studly_case(resource_token);

        // Whatever is left is an even run of (relation, id) pairs.
        let associations: IndexMap<String, String> = frags
            .chunks_exact(2)
            .map(|pair| (pair[0].to_string(), pair[1].to_string()))
            .collect();

        let format = negotiator
            .negotiate(request.get_header("Accept"), request.path())
            .to_string();
        let data = request.read_body()?;
        let query = request
            .query()
            .iter()
            .map(|(k, v)| (k.clone(), QueryValue::coerce(v)))
            .collect();

        let target = match self.config.module() {
            Some(module) => format!("{module}{MODULE_SEPARATOR}{resource}"),
            None => resource,
        };

        debug!(target_name = %target, %action, %format, "matched request");

        Ok(Some(ApplicationRequest {
            target,
            http_method: method,
            parameters: Parameters {
                action,
                id,
                format,
                associations,
                data,
                query,
            },
            files: request.files().to_vec(),
        }))
    }

    /// Returns the part of the request path below the mount path, or `None`
    /// if the request is not under it.
    fn relative_path<'r, R: HttpRequest + ?Sized>(&self, request: &'r R) -> Option<&'r str> {
        let path = request.path();
        let clean = path.strip_prefix(request.base_path()).unwrap_or(path);

        if self.mount_path.is_empty() {
            if clean.is_empty() {
                trace!(path, "empty path");
                return None;
            }
            return Some(clean);
        }

        let relative = clean
            .strip_prefix(self.mount_path.as_str())
            .and_then(|rest| rest.strip_prefix('/'));
        if relative.is_none() {
            trace!(path, mount_path = %self.mount_path, "path outside mount path");
        }
        relative
    }

    /// Builds the absolute URL of an application request.
    ///
    /// Namespace segments, associations, resource and id become path
    /// segments; query parameters become the query string. Action and format
    /// are not represented in the URL.
    #[must_use]
    pub fn construct_url(&self, request: &ApplicationRequest, base_url: &str) -> Option<String> {
        if let Some(module) = self.config.module() {
            if !request.target.starts_with(module) {
                trace!(target_name = %request.target, module, "module prefix mismatch");
                return None;
            }
        }

        let params = &request.parameters;
        let mut namespace: Vec<String> = request
            .target
            .split(MODULE_SEPARATOR)
            .map(spinal_case)
            .collect();
        let resource = namespace.pop().unwrap_or_default();

        let mut segments = namespace;
        for (relation, id) in &params.associations {
            segments.push(relation.clone());
            segments.push(id.clone());
        }
        segments.push(resource);
        if let Some(id) = &params.id {
            segments.push(id.clone());
        }

        let mut url = format!("{base_url}{}", segments.join("/"));
        let query = self.encode_query(&params.query);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Some(url)
    }

    fn encode_query(&self, query: &IndexMap<String, QueryValue>) -> String {
        let mut separator = [0_u8; 4];
        let separator: &str = self.config.query_separator().encode_utf8(&mut separator);
        query
            .iter()
            .map(|(key, value)| {
                let value = value.to_string();
                format!("{}={}", encode_component(key), encode_component(&value))
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

fn encode_component(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
}

impl Route for RestRoute {
    fn match_request(&self, request: &mut dyn HttpRequest) -> Result<Option<ApplicationRequest>> {
        Self::match_request(self, request)
    }

    fn construct_url(&self, request: &ApplicationRequest, base_url: &str) -> Option<String> {
        Self::construct_url(self, request, base_url)
    }
}

/// An ordered list of routes, tried first to last.
#[derive(Clone, Default)]
pub struct RouteList {
    routes: Vec<Arc<dyn Route + Send + Sync>>,
}

impl RouteList {
    /// Creates an empty route list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route.
    #[must_use]
    pub fn route(mut self, route: impl Route + Send + Sync + 'static) -> Self {
        self.routes.push(Arc::new(route));
        self
    }

    /// Returns the number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if no routes were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Route for RouteList {
    /// Returns the first match. An error from any route stops the search.
    fn match_request(&self, request: &mut dyn HttpRequest) -> Result<Option<ApplicationRequest>> {
        for route in &self.routes {
            if let Some(app) = route.match_request(request)? {
                return Ok(Some(app));
            }
        }
        trace!(path = request.path(), "no route matched");
        Ok(None)
    }

    fn construct_url(&self, request: &ApplicationRequest, base_url: &str) -> Option<String> {
        self.routes
            .iter()
            .find_map(|route| route.construct_url(request, base_url))
    }
}

impl std::fmt::Debug for RouteList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteList")
            .field("routes", &self.routes.len())
            .finish()
    }
}

/// Returns `true` when `error` means the request should get a 405 response.
#[must_use]
pub const fn is_method_not_allowed(error: &RouteError) -> bool {
    matches!(error, RouteError::MethodNotAllowed { .. })
}

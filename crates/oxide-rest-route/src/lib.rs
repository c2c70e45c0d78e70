//! # oxide-rest-route
//!
//! Convention-based REST routing: no route table, the URL layout itself names
//! the handler, the resource id and its parents.
//!
//! This crate provides:
//! - Mapping of HTTP requests to application requests (handler, action, id,
//!   associations, format, body, query)
//! - The reverse mapping from application requests to canonical URLs
//! - CRUD action inference from the HTTP method, with method override
//! - Response format negotiation from `Accept` or a URL suffix
//!
//! ## Quick Start
//!
//! ```
//! use oxide_rest_route::{Action, Request, RestRoute, RouteConfig};
//!
//! let route = RestRoute::new(RouteConfig::new(None, "json").unwrap());
//!
//! let mut request = Request::get("/users/42").header("Accept", "application/xml");
//! let app = route.match_request(&mut request).unwrap().unwrap();
//!
//! assert_eq!(app.target, "Users");
//! assert_eq!(app.parameters.action, Action::Read);
//! assert_eq!(app.parameters.id.as_deref(), Some("42"));
//! assert_eq!(app.parameters.format, "xml");
//! ```
//!
//! ## Actions
//!
//! | Method  | Action                                     |
//! |---------|--------------------------------------------|
//! | GET     | `read`, or `readAll` when there is no id   |
//! | POST    | `create`                                   |
//! | PATCH   | `partialUpdate`                            |
//! | PUT     | `update`                                   |
//! | DELETE  | `delete`                                   |
//! | OPTIONS | `options`                                  |
//!
//! Clients limited to POST can send `X-HTTP-Method-Override` or the
//! `__method` query parameter.
//!
//! ## Modules
//!
//! A route configured with module `Admin:Users` only answers under
//! `/admin/users/` and prefixes targets with `Admin:Users:`:
//!
//! ```
//! use oxide_rest_route::{ApplicationRequest, RestRoute, RouteConfig};
//!
//! let route = RestRoute::new(RouteConfig::new(Some("Admin:Users"), "json").unwrap());
//!
//! let app = ApplicationRequest::new("Admin:Users:Roles", "GET").id("9");
//! let url = route.construct_url(&app, "https://example.com/");
//! assert_eq!(url.as_deref(), Some("https://example.com/admin/users/roles/9"));
//! ```
//!
//! ## Route Lists
//!
//! ```
//! use oxide_rest_route::{Request, RestRoute, Route, RouteConfig, RouteList};
//!
//! let routes = RouteList::new()
//!     .route(RestRoute::new(RouteConfig::new(Some("Admin"), "json").unwrap()))
//!     .route(RestRoute::new(RouteConfig::default()));
//!
//! let mut request = Request::get("/admin/users");
//! let app = routes.match_request(&mut request).unwrap().unwrap();
//! assert_eq!(app.target, "Admin:Users");
//! ```

mod config;
mod descriptor;
mod error;
mod format;
mod inflector;
mod method;
mod request;
mod route;

pub use config::{RouteConfig, RouteConfigBuilder, RouteSettings, MODULE_SEPARATOR};
pub use descriptor::{ApplicationRequest, Parameters, QueryValue};
pub use error::{Result, RouteError};
pub use format::{default_formats, FormatNegotiator};
pub use inflector::{spinal_case, studly_case};
pub use method::{resolve_method, Action, Method, HTTP_HEADER_OVERRIDE, QUERY_PARAM_OVERRIDE};
pub use request::{HttpRequest, Request, UploadedFile};
pub use route::{is_method_not_allowed, RestRoute, Route, RouteList};

//! Inbound HTTP request abstraction.

use std::collections::HashMap;
use std::io;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::method::Method;

/// Metadata of a file uploaded with the request.
///
/// The router never inspects uploads; they are handed to the dispatcher as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Form field the file was submitted under.
    pub field: String,
    /// Client-side file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: Option<String>,
    /// Size in bytes.
    pub size: u64,
}

impl UploadedFile {
    /// Creates upload metadata for a form field.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, size: u64) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: None,
            size,
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// The view of an HTTP request that routing needs.
///
/// Every request fact the router looks at (method, headers, query, body)
/// goes through this trait. Implement it for the request type of whatever
/// HTTP stack sits in front of the router.
pub trait HttpRequest {
    /// The request method as sent by the client.
    fn method(&self) -> &str;

    /// The raw request path, without the query string.
    fn path(&self) -> &str;

    /// The path prefix under which the application is mounted.
    fn base_path(&self) -> &str {
        "/"
    }

    /// Looks up a header by name, ignoring case.
    fn get_header(&self, name: &str) -> Option<&str>;

    /// Query string parameters in the order they appeared.
    fn query(&self) -> &IndexMap<String, String>;

    /// Looks up a single query parameter.
    fn get_query(&self, name: &str) -> Option<&str> {
        self.query().get(name).map(String::as_str)
    }

    /// Consumes the request body.
    ///
    /// The body can be read once; later calls may return an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the body stream fails.
    fn read_body(&mut self) -> io::Result<Vec<u8>>;

    /// Files uploaded with the request.
    fn files(&self) -> &[UploadedFile] {
        &[]
    }
}

/// An in-memory HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    /// HTTP method.
    pub method: String,
    /// Request path.
    pub path: String,
    /// Application base path.
    pub base_path: String,
    /// Query string parameters.
    pub query: IndexMap<String, String>,
    /// Request headers.
    pub headers: HashMap<String, String>,
    /// Request body; taken by the first [`HttpRequest::read_body`] call.
    pub body: Vec<u8>,
    /// Uploaded files.
    pub files: Vec<UploadedFile>,
}

impl Request {
    /// Creates a new request.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            base_path: "/".to_string(),
            query: IndexMap::new(),
            headers: HashMap::new(),
            body: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Creates a request from a request target such as `/users?page=2`.
    pub fn from_uri(method: impl Into<String>, uri: &str) -> Self {
        match uri.split_once('?') {
            Some((path, query)) => {
                let mut req = Self::new(method, path);
                req.query = Self::parse_query_string(query);
                req
            }
            None => Self::new(method, uri),
        }
    }

    /// Creates a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get.as_str(), path)
    }

    /// Creates a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post.as_str(), path)
    }

    /// Creates a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put.as_str(), path)
    }

    /// Creates a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::Patch.as_str(), path)
    }

    /// Creates a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete.as_str(), path)
    }

    /// Sets the base path.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a query parameter.
    #[must_use]
    pub fn query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Attaches an uploaded file.
    #[must_use]
    pub fn file(mut self, file: UploadedFile) -> Self {
        self.files.push(file);
        self
    }

    /// Parses query parameters from a query string.
    ///
    /// Later occurrences of a key replace earlier ones but keep the position
    /// of the first.
    pub fn parse_query_string(query: &str) -> IndexMap<String, String> {
        url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }
}

impl HttpRequest for Request {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn base_path(&self) -> &str {
        &self.base_path
    }

    fn get_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn query(&self) -> &IndexMap<String, String> {
        &self.query
    }

    fn read_body(&mut self) -> io::Result<Vec<u8>> {
        Ok(std::mem::take(&mut self.body))
    }

    fn files(&self) -> &[UploadedFile] {
        &self.files
    }
}

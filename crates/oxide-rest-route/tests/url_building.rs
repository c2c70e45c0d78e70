//! Tests for building URLs from application requests.

mod common;
use common::*;

use oxide_rest_route::{Action, ApplicationRequest, RestRoute, RouteConfig};

const BASE: &str = "https://api.example.com/";

#[test]
fn collection_url() {
    let app = ApplicationRequest::new("Users", "GET");
    assert_eq!(
        route(None).construct_url(&app, BASE).as_deref(),
        Some("https://api.example.com/users")
    );
}

#[test]
fn segment_order_is_namespace_associations_resource_id() {
    let app = ApplicationRequest::new("Shop:V2:LineItems", "GET")
        .association("orders", "12")
        .association("shipments", "3")
        .id("7");
    assert_eq!(
        route(Some("Shop")).construct_url(&app, BASE).as_deref(),
        Some("https://api.example.com/shop/v2/orders/12/shipments/3/line-items/7")
    );
}

#[test]
fn module_mismatch_is_no_match() {
    let app = ApplicationRequest::new("Blog:Posts", "GET");
    assert!(route(Some("Admin")).construct_url(&app, BASE).is_none());
    assert!(route(Some("Blog:Comments")).construct_url(&app, BASE).is_none());
}

#[test]
fn module_prefix_is_a_plain_string_prefix() {
    // `Admin` owns `AdminTools:Users` as well.
    let app = ApplicationRequest::new("AdminTools:Users", "GET");
    assert_eq!(
        route(Some("Admin")).construct_url(&app, "/").as_deref(),
        Some("/admin-tools/users")
    );
}

#[test]
fn route_without_module_builds_everything() {
    let app = ApplicationRequest::new("Blog:Posts", "GET").id("1");
    assert_eq!(
        route(None).construct_url(&app, "/").as_deref(),
        Some("/blog/posts/1")
    );
}

#[test]
fn query_is_encoded() {
    let app = ApplicationRequest::new("Search", "GET")
        .query_param("q", "rust & web")
        .query_param("page", 3_i64);
    assert_eq!(
        route(None).construct_url(&app, "/").as_deref(),
        Some("/search?q=rust+%26+web&page=3")
    );
}

#[test]
fn empty_query_adds_no_question_mark() {
    let app = ApplicationRequest::new("Search", "GET");
    let url = route(None).construct_url(&app, "/").unwrap();
    assert!(!url.contains('?'));
}

#[test]
fn configured_query_separator() {
    let config = RouteConfig::builder().query_separator(';').build().unwrap();
    let app = ApplicationRequest::new("Search", "GET")
        .query_param("a", 1_i64)
        .query_param("b", "x");
    assert_eq!(
        RestRoute::new(config).construct_url(&app, "/").as_deref(),
        Some("/search?a=1;b=x")
    );
}

#[test]
fn action_and_format_are_not_in_url() {
    let app = ApplicationRequest::new("Users", "PATCH")
        .action(Action::PartialUpdate)
        .format("xml");
    assert_eq!(
        route(None).construct_url(&app, "/").as_deref(),
        Some("/users")
    );
}

#[test]
fn dispatcher_can_strip_id_and_associations() {
    let route = route(None);
    let mut app = matched(&route, oxide_rest_route::Request::get("/authors/3/books/7"));
    app.parameters.id = None;
    app.parameters.associations.clear();
    assert_eq!(route.construct_url(&app, "/").as_deref(), Some("/books"));
}

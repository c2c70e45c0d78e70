#![allow(dead_code)]

use oxide_rest_route::{ApplicationRequest, Request, RestRoute, RouteConfig};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_test_writer()
        .try_init();
}

pub fn route(module: Option<&str>) -> RestRoute {
    RestRoute::new(
        RouteConfig::new(module, "json")
            .unwrap_or_else(|e| panic!("Failed to configure route {module:?}: {e}")),
    )
}

pub fn matched(route: &RestRoute, mut request: Request) -> ApplicationRequest {
    let path = request.path.clone();
    route
        .match_request(&mut request)
        .unwrap_or_else(|e| panic!("Failed to match: {path}\nError: {e:?}"))
        .unwrap_or_else(|| panic!("Expected a match for: {path}"))
}

pub fn unmatched(route: &RestRoute, mut request: Request) {
    let path = request.path.clone();
    let result = route
        .match_request(&mut request)
        .unwrap_or_else(|e| panic!("Failed to match: {path}\nError: {e:?}"));
    assert!(result.is_none(), "Expected no match for: {path}, got {result:?}");
}

pub fn associations(app: &ApplicationRequest) -> Vec<(&str, &str)> {
    app.parameters
        .associations
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect()
}

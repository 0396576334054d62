//! Tests for route tables loaded from JSON files.

use std::io::Write;

use tempfile::NamedTempFile;
use trellis_router::{Method, PatternSyntaxError, RouteConfig, RouterError, UrlValues};

const ROUTES: &str = r#"{
    "routes": [
        {
            "name": "home",
            "path": "/"
        },
        {
            "name": "user.show",
            "methods": ["GET", "HEAD"],
            "path": "/users/:id[/:tab=profile]",
            "host": ":tenant.example.com",
            "secure": true,
            "constraints": { "id": "\\d+" }
        },
        {
            "name": "user.update",
            "methods": ["PUT", "PATCH"],
            "path": "/users/:id",
            "constraints": { "id": "\\d+" }
        }
    ]
}"#;

fn write_routes(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn load_route_table_from_file() {
    let file = write_routes(ROUTES);
    let routes = RouteConfig::from_path(file.path())
        .unwrap()
        .into_collection()
        .unwrap();

    assert_eq!(routes.len(), 3);
    assert_eq!(routes.for_method(Method::Get).count(), 2);
    assert_eq!(routes.for_method(Method::Patch).count(), 1);

    let user = routes.get("user.show").unwrap();
    assert!(user.route().is_secure());
    assert_eq!(
        user.path().captures("/users/9").unwrap().get("tab"),
        Some("profile")
    );

    assert_eq!(
        routes
            .url_for("user.show", UrlValues::positional(["acme", "9", "posts"]))
            .unwrap(),
        "https://acme.example.com/users/9/posts"
    );
    assert_eq!(
        routes
            .url_for("home", UrlValues::positional::<_, String>([]))
            .unwrap(),
        "/"
    );
}

#[test]
fn lowercase_methods_in_file() {
    let file = write_routes(
        r#"{"routes": [{"name": "users", "methods": ["get", "head"], "path": "/users"}]}"#,
    );
    let routes = RouteConfig::from_path(file.path())
        .unwrap()
        .into_collection()
        .unwrap();

    let users = routes.get("users").unwrap();
    assert!(users.allows(Method::Get));
    assert!(users.allows(Method::Head));
    assert!(!users.allows(Method::Post));
}

#[test]
fn missing_file() {
    let err = RouteConfig::from_path("/nonexistent/routes.json").unwrap_err();
    assert!(matches!(err, RouterError::Io(_)));
}

#[test]
fn malformed_json() {
    let file = write_routes("{ \"routes\": [");
    let err = RouteConfig::from_path(file.path()).unwrap_err();
    assert!(matches!(err, RouterError::Config(_)));
}

#[test]
fn malformed_route_rejects_table() {
    let config = RouteConfig::from_json_str(
        r#"{"routes": [{"path": "/ok"}, {"name": "bad", "path": "/users/[:id"}]}"#,
    )
    .unwrap();
    let err = config.into_collection().unwrap_err();
    assert!(matches!(
        err,
        RouterError::Pattern(PatternSyntaxError::UnclosedBrackets { .. })
    ));
}

#[test]
fn duplicate_route_names_rejected() {
    let config = RouteConfig::from_json_str(
        r#"{"routes": [{"name": "a", "path": "/x"}, {"name": "a", "path": "/y"}]}"#,
    )
    .unwrap();
    assert!(matches!(
        config.into_collection(),
        Err(RouterError::DuplicateRouteName(name)) if name == "a"
    ));
}

#[test]
fn invalid_constraint_rejects_table() {
    let config =
        RouteConfig::from_json_str(r#"{"routes": [{"path": "/:id", "constraints": {"id": "("}}]}"#)
            .unwrap();
    let err = config.into_collection().unwrap_err();
    assert!(matches!(err, RouterError::InvalidConstraint { .. }));
}

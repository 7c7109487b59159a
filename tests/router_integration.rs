use nested_router_rs::{
    BuildParams, LocationSource, MatchState, MemoryLocation, RouteDecl, RouteHandle, RouteKind,
    Router, RouterError,
};
use parking_lot::Mutex;
use std::sync::Arc;

fn router(url: &str) -> (Arc<MemoryLocation>, Router) {
    let location = Arc::new(MemoryLocation::new(url).expect("url should parse"));
    let source: Arc<dyn LocationSource> = location.clone();
    let router = Router::new(source, None).expect("router should build");
    (location, router)
}

fn ignore(_: &MatchState) {}

fn register(router: &Router, decl: RouteDecl) -> RouteHandle {
    router.register(&decl, ignore).expect("route should register")
}

#[test]
fn router_when_exact_route_matches_then_handle_exposes_params() {
    let (_location, router) = router("http://localhost/blog/123");
    let handle = register(&router, RouteDecl::exact("/blog/:id"));

    let found = handle.matched().expect("route should match");
    assert_eq!(found.params.get("id"), Some("123"));
    assert_eq!(found.matched_text, "/blog/123");
}

#[test]
fn router_when_exact_and_prefix_declared_then_only_prefix_accepts_longer_path() {
    let (_location, router) = router("http://localhost/users/42");
    let exact = router.match_route(&RouteDecl::exact("/users"));
    assert!(exact.expect("pattern compiles").is_none());
    let prefix = router.match_route(&RouteDecl::prefix("/users"));
    assert!(prefix.expect("pattern compiles").is_some());
}

#[test]
fn router_when_routes_overlap_then_first_registered_wins() {
    let (_location, router) = router("http://localhost/me");
    let me = register(&router, RouteDecl::exact("/me"));
    let id = register(&router, RouteDecl::exact("/:id"));

    assert!(me.is_matched());
    assert!(!id.is_matched());
}

#[test]
fn router_when_handle_dropped_then_route_is_deregistered_and_next_wins() {
    let (location, router) = router("http://localhost/me");
    let me = register(&router, RouteDecl::exact("/me"));
    let id = register(&router, RouteDecl::exact("/:id"));

    drop(me);
    assert!(id.is_matched());
    assert_eq!(router.arbiter().len(), 1);

    id.deregister();
    assert!(router.arbiter().is_empty());
    assert_eq!(location.listener_count(), 0);
}

#[test]
fn router_when_nested_under_prefix_then_child_sees_residual_url() {
    let (_location, root) = router("http://localhost/users/42?tab=1#bio");
    let users = register(&root, RouteDecl::prefix("/users"));
    let child = root.nest(&users);

    let url = child.url();
    assert_eq!(url.path(), "/42");
    assert_eq!(url.query(), Some("tab=1"));
    assert_eq!(url.fragment(), Some("bio"));

    let profile = register(&child, RouteDecl::exact("/:id"));
    assert_eq!(
        profile.matched().and_then(|m| m.params.get("id").map(str::to_string)),
        Some("42".to_string())
    );
}

#[test]
fn router_when_parent_location_changes_then_nested_routes_follow() {
    let (location, root) = router("http://localhost/users/42");
    let users = register(&root, RouteDecl::prefix("/users"));
    let child = root.nest(&users);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let profile = child
        .register(&RouteDecl::exact("/:id"), move |state: &MatchState| {
            let id = state.as_match().and_then(|m| m.params.get("id")).map(str::to_string);
            sink.lock().push(id);
        })
        .expect("route should register");

    location.push("/users/7").expect("push should succeed");
    assert_eq!(*seen.lock(), vec![Some("7".to_string())]);
    assert!(profile.is_matched());

    location.push("/users").expect("push should succeed");
    assert!(users.is_matched());
    assert!(!profile.is_matched());
    assert_eq!(seen.lock().last(), Some(&None));
}

#[test]
fn router_when_child_pushes_then_navigation_goes_to_outermost_location() {
    let (location, root) = router("http://localhost/users/42");
    let users = register(&root, RouteDecl::prefix("/users"));
    let child = root.nest(&users);

    child.push("/users/9?from=child").expect("push should succeed");

    assert_eq!(location.url().as_str(), "http://localhost/users/9?from=child");
    assert_eq!(child.url().path(), "/9");
}

#[test]
fn router_when_unicode_prefix_nested_then_child_sees_rest_of_path() {
    let (_location, root) = router("http://localhost/café/test");
    let cafe = register(&root, RouteDecl::prefix("/café"));
    assert_eq!(cafe.matched().map(|m| m.matched_text), Some("/caf%C3%A9".to_string()));
    assert_eq!(root.nest(&cafe).url().path(), "/test");
}

#[test]
fn router_when_fallback_declared_then_matches_and_passes_url_through() {
    let (_location, root) = router("http://localhost/anything/here");
    let missing = register(&root, RouteDecl::exact("/home"));
    let fallback = register(&root, RouteDecl::fallback());

    assert!(!missing.is_matched());
    assert!(fallback.is_matched());
    assert_eq!(root.nest(&fallback).url().path(), "/anything/here");
}

#[test]
fn router_when_pattern_is_invalid_then_register_fails_loudly() {
    let (_location, root) = router("http://localhost/");
    match root.register(&RouteDecl::exact("/:"), ignore) {
        Err(RouterError::Pattern(_)) => {}
        other => panic!("expected pattern error, got {other:?}"),
    }
    assert!(root.arbiter().is_empty());
}

#[test]
fn router_when_declarations_come_from_json_then_kind_tag_decides_matching() {
    let decls: Vec<RouteDecl> = serde_json::from_str(
        r#"[
            {"kind": "prefix", "path": "/café"},
            {"kind": "exact", "path": "/About", "options": {"sensitive": true}},
            {"kind": "prefix"}
        ]"#,
    )
    .expect("declarations should parse");

    assert_eq!(decls[0].kind, RouteKind::Prefix);
    assert!(!decls[0].effective_options().end);
    assert!(decls[1].options.sensitive);
    assert!(decls[1].effective_options().end);
    assert!(decls[2].is_fallback());

    let (_location, root) = router("http://localhost/about");
    assert!(root.match_route(&decls[1]).expect("pattern compiles").is_none());
    assert!(root.match_route(&decls[2]).expect("pattern compiles").is_some());
}

#[test]
fn router_when_building_paths_then_encodes_values() {
    let (_location, root) = router("http://localhost/");
    let built = root
        .build_path("/:id", &BuildParams::new().set("id", "café"))
        .expect("build should succeed");
    assert_eq!(built, "/caf%C3%A9");
}

#[test]
fn router_when_two_routers_share_a_location_then_only_one_route_wins() {
    let (location, first) = router("http://localhost/me");
    let source: Arc<dyn LocationSource> = location.clone();
    let second = Router::new(source, None).expect("router should build");

    let me = register(&first, RouteDecl::exact("/me"));
    let id = register(&second, RouteDecl::exact("/:id"));

    assert!(me.is_matched());
    assert!(!id.is_matched());
    assert!(first.arbiter().ptr_eq(second.arbiter()));

    drop(me);
    assert!(id.is_matched());
}

#[test]
fn router_when_nested_twice_under_one_handle_then_children_share_arbitration() {
    let (_location, root) = router("http://localhost/users/42");
    let users = register(&root, RouteDecl::prefix("/users"));
    let left = root.nest(&users);
    let right = root.nest(&users);

    let by_id = register(&left, RouteDecl::exact("/:id"));
    let any = register(&right, RouteDecl::fallback());

    assert!(left.arbiter().ptr_eq(right.arbiter()));
    assert!(by_id.is_matched());
    assert!(!any.is_matched());
}

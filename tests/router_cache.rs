use nested_router_rs::{
    BuildParams, LocationSource, MatchState, MemoryLocation, RouteDecl, Router, RouterOptions,
};
use std::sync::Arc;

fn router(options: Option<RouterOptions>) -> Router {
    let location: Arc<dyn LocationSource> =
        Arc::new(MemoryLocation::new("http://localhost/users/1").expect("url should parse"));
    Router::new(location, options).expect("router should build")
}

fn ignore(_: &MatchState) {}

#[test]
fn router_when_same_declaration_compiled_twice_then_records_hit() {
    let router = router(None);
    assert_eq!(router.cache_stats(), (0, 0));

    router.match_route(&RouteDecl::prefix("/users")).expect("pattern compiles");
    assert_eq!(router.cache_stats(), (0, 1));

    let _handle = router
        .register(&RouteDecl::prefix("/users"), ignore)
        .expect("route should register");
    assert_eq!(router.cache_stats(), (1, 1));
}

#[test]
fn router_when_options_differ_then_compiles_separately() {
    let router = router(None);
    router.match_route(&RouteDecl::exact("/users")).expect("pattern compiles");
    router.match_route(&RouteDecl::prefix("/users")).expect("pattern compiles");
    router.match_route(&RouteDecl::exact("/users").sensitive(true)).expect("pattern compiles");
    assert_eq!(router.cache_stats(), (0, 3));
}

#[test]
fn router_when_nested_then_child_shares_parent_cache() {
    let router = router(None);
    let users = router
        .register(&RouteDecl::prefix("/users"), ignore)
        .expect("route should register");
    let child = router.nest(&users);

    child.match_route(&RouteDecl::prefix("/users")).expect("pattern compiles");
    assert_eq!(child.cache_stats(), (1, 1));
    assert_eq!(router.cache_stats(), (1, 1));
}

#[test]
fn router_when_capacity_is_one_then_older_entries_are_evicted() {
    let router = router(Some(RouterOptions { cache_capacity: 1 }));
    router.build_path("/a/:id", &BuildParams::new().set("id", "1")).expect("build should succeed");
    router.build_path("/b/:id", &BuildParams::new().set("id", "1")).expect("build should succeed");
    router.build_path("/a/:id", &BuildParams::new().set("id", "2")).expect("build should succeed");
    assert_eq!(router.cache_stats(), (0, 3));
}

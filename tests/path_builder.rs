use nested_router_rs::{
    BuildError, BuildParams, MatchOptions, PathBuilder, RouterError, build_path, compile_builder,
    compile_matcher,
};

fn builder(pattern: &str) -> PathBuilder {
    compile_builder(pattern, &MatchOptions::default()).expect("pattern should compile")
}

#[test]
fn builder_when_value_is_unicode_then_percent_encodes_it() {
    let params = BuildParams::new().set("id", "café");
    assert_eq!(builder("/:id").build(&params).expect("build should succeed"), "/caf%C3%A9");
}

#[test]
fn builder_when_value_contains_reserved_chars_then_encodes_them() {
    let params = BuildParams::new().set("id", "a/b?c");
    assert_eq!(builder("/:id").build(&params).expect("build should succeed"), "/a%2Fb%3Fc");
}

#[test]
fn builder_when_required_parameter_missing_then_returns_error() {
    let err = builder("/users/:id").build(&BuildParams::new()).expect_err("build should fail");
    assert_eq!(err, BuildError::MissingParameter { name: "id".to_string() });
}

#[test]
fn builder_when_optional_parameter_missing_then_omits_prefix() {
    let built = builder("/blog/:id?").build(&BuildParams::new()).expect("build should succeed");
    assert_eq!(built, "/blog");
}

#[test]
fn builder_when_value_violates_constraint_then_returns_error() {
    let params = BuildParams::new().set("id", "abc");
    match builder("/users/:id(\\d+)").build(&params) {
        Err(BuildError::ConstraintViolation {
            name,
            constraint,
            value,
        }) => {
            assert_eq!(name, "id");
            assert_eq!(constraint, "\\d+");
            assert_eq!(value, "abc");
        }
        other => panic!("expected constraint violation, got {other:?}"),
    }
}

#[test]
fn builder_when_validation_disabled_then_skips_constraints() {
    let options = MatchOptions::builder().validate(false).build().expect("options should build");
    let built = compile_builder("/users/:id(\\d+)", &options)
        .expect("pattern should compile")
        .build(&BuildParams::new().set("id", "abc"))
        .expect("build should succeed");
    assert_eq!(built, "/users/abc");
}

#[test]
fn builder_when_repeatable_parameter_then_joins_values_with_prefix() {
    let b = builder("/tags/:tag+");
    let params = BuildParams::new().set("tag", vec!["rust", "web dev"]);
    assert_eq!(b.build(&params).expect("build should succeed"), "/tags/rust/web%20dev");

    let empty = BuildParams::new().set("tag", Vec::<String>::new());
    assert_eq!(
        b.build(&empty).expect_err("empty list should fail"),
        BuildError::EmptyRepeat { name: "tag".to_string() }
    );

    let optional = builder("/tags/:tag*");
    assert_eq!(optional.build(&empty).expect("build should succeed"), "/tags");
}

#[test]
fn builder_when_list_given_for_single_parameter_then_returns_error() {
    let params = BuildParams::new().set("id", vec!["1", "2"]);
    assert_eq!(
        builder("/:id").build(&params).expect_err("list should be rejected"),
        BuildError::UnexpectedRepeat {
            name: "id".to_string(),
            count: 2
        }
    );
}

#[test]
fn builder_when_wildcard_then_keeps_slashes_between_segments() {
    let params = BuildParams::new().set(0usize, "css/my site.css");
    assert_eq!(
        builder("/assets/*").build(&params).expect("build should succeed"),
        "/assets/css/my%20site.css"
    );
}

#[test]
fn builder_when_groups_without_parameters_then_optional_ones_are_omitted() {
    let optional = builder("/docs{/latest}?").build(&BuildParams::new());
    assert_eq!(optional.expect("build should succeed"), "/docs");
    let required = builder("/docs{/v1}").build(&BuildParams::new());
    assert_eq!(required.expect("build should succeed"), "/docs/v1");
}

#[test]
fn builder_when_fed_match_params_then_round_trips() {
    let options = MatchOptions::default();
    let pattern = "/users/:id/files/:name";
    let matcher = compile_matcher(pattern, &options).expect("pattern should compile");
    let first = matcher.exec("/users/42/files/a%20b.txt").expect("path should match");

    let rebuilt = compile_builder(pattern, &options)
        .expect("pattern should compile")
        .build(&BuildParams::from(&first.params))
        .expect("build should succeed");
    assert_eq!(rebuilt, "/users/42/files/a%20b.txt");

    let second = matcher.exec(&rebuilt).expect("rebuilt path should match");
    assert_eq!(first.params, second.params);
}

#[test]
fn build_path_when_parameter_missing_then_surfaces_build_error() {
    match build_path("/:id", &BuildParams::new()) {
        Err(RouterError::Build(BuildError::MissingParameter { name })) => assert_eq!(name, "id"),
        other => panic!("expected missing parameter, got {other:?}"),
    }
    assert!(matches!(build_path("/:", &BuildParams::new()), Err(RouterError::Pattern(_))));
}

#[test]
fn builder_when_bare_zero_or_more_parameter_matched_nothing_then_round_trips() {
    let options = MatchOptions::default();
    let pattern = "/t/{:tag}*";
    let found = compile_matcher(pattern, &options)
        .expect("pattern should compile")
        .exec("/t/")
        .expect("path should match");
    assert_eq!(found.params.get_all("tag"), None);

    let rebuilt = compile_builder(pattern, &options)
        .expect("pattern should compile")
        .build(&BuildParams::from(&found.params))
        .expect("build should succeed");
    assert_eq!(rebuilt, "/t/");
}

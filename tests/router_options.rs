use nested_router_rs::router::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_DELIMITER, DEFAULT_PREFIXES, MatchOptions, RouterOptions,
    RouterOptionsError,
};
use nested_router_rs::{LocationSource, MemoryLocation, Router, RouterError, compile_matcher};
use std::sync::Arc;

#[test]
fn match_options_when_defaulted_then_anchored_insensitive_and_validating() {
    let options = MatchOptions::default();
    assert!(!options.sensitive);
    assert!(!options.strict);
    assert!(options.start);
    assert!(options.end);
    assert!(options.validate);
    assert_eq!(options.delimiter, DEFAULT_DELIMITER);
    assert_eq!(options.prefixes, DEFAULT_PREFIXES);
}

#[test]
fn match_options_when_all_fields_customized_then_values_are_assigned() {
    let options = MatchOptions::builder()
        .sensitive(true)
        .strict(true)
        .start(false)
        .end(false)
        .delimiter("/")
        .prefixes("/")
        .validate(false)
        .build()
        .expect("options should build");

    assert!(options.sensitive);
    assert!(options.strict);
    assert!(!options.start);
    assert!(!options.end);
    assert_eq!(options.delimiter, "/");
    assert_eq!(options.prefixes, "/");
    assert!(!options.validate);
}

#[test]
fn match_options_when_delimiter_empty_then_build_fails() {
    let err = MatchOptions::builder()
        .delimiter("")
        .build()
        .expect_err("empty delimiter should fail");
    assert_eq!(err, RouterOptionsError::EmptyDelimiter);
}

#[test]
fn match_options_when_prefixes_empty_then_slash_is_not_optional() {
    let options = MatchOptions::builder().prefixes("").build().expect("options should build");
    let matcher = compile_matcher("/blog/:id?", &options).expect("pattern should compile");
    assert!(matcher.is_match("/blog/"));
    assert!(!matcher.is_match("/blog"));
}

#[test]
fn match_options_when_deserialized_partially_then_missing_fields_default() {
    let options: MatchOptions =
        serde_json::from_str(r#"{"strict": true}"#).expect("options should parse");
    assert!(options.strict);
    assert!(options.end);
    assert_eq!(options.delimiter, DEFAULT_DELIMITER);
}

#[test]
fn router_options_when_defaulted_then_cache_capacity_is_default() {
    assert_eq!(RouterOptions::default().cache_capacity, DEFAULT_CACHE_CAPACITY);
    let options = RouterOptions::builder().cache_capacity(8).build().expect("options should build");
    assert_eq!(options.cache_capacity, 8);
}

#[test]
fn router_options_when_cache_capacity_zero_then_router_rejects_them() {
    let err = RouterOptions::builder()
        .cache_capacity(0)
        .build()
        .expect_err("zero capacity should fail");
    assert_eq!(err, RouterOptionsError::CacheCapacityInvalid { provided: 0 });

    let location: Arc<dyn LocationSource> =
        Arc::new(MemoryLocation::new("http://localhost/").expect("url should parse"));
    match Router::new(location, Some(RouterOptions { cache_capacity: 0 })) {
        Err(RouterError::Options(RouterOptionsError::CacheCapacityInvalid { provided })) => {
            assert_eq!(provided, 0)
        }
        other => panic!("expected options error, got {other:?}"),
    }
}

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use cache_expiry::{
    CustomResolver, PolicySpec, Resolver, compile, compile_custom, compile_value,
};
use http::{Response, StatusCode};
use serde_json::json;

fn layered() -> Resolver {
    compile(PolicySpec::rules([("404", "a"), ("4xx", "b"), ("xxx", "c")])).unwrap()
}

#[test]
fn test_exact_code_wins() {
    assert_eq!(layered().resolve(404), "a");
}

#[test]
fn test_class_fallback() {
    assert_eq!(layered().resolve(403), "b");
    assert_eq!(layered().resolve(499), "b");
}

#[test]
fn test_default_fallback() {
    assert_eq!(layered().resolve(200), "c");
    assert_eq!(layered().resolve(500), "c");
}

#[test]
fn test_every_status_code_resolves() {
    let resolver = layered();
    for code in 100..=599 {
        let expected = match code {
            404 => "a",
            400..=499 => "b",
            _ => "c",
        };
        assert_eq!(resolver.resolve(code), expected, "status {code}");
    }
}

#[test]
fn test_uniform_policy_resolves_everything() {
    let resolver: Resolver = compile("no-cache").unwrap();
    for code in 100..=599 {
        assert_eq!(resolver.resolve(code), "no-cache");
    }
}

#[test]
fn test_short_codes_use_default_and_long_codes_use_leading_digit() {
    let resolver: Resolver =
        compile_value(json!({ "1xx": "informational", "xxx": "default" })).unwrap();

    assert_eq!(resolver.resolve(0), "default");
    assert_eq!(resolver.resolve(10), "default");
    assert_eq!(resolver.resolve(1000), "informational");
    assert_eq!(resolver.resolve(2000), "default");
    assert_eq!(resolver.resolve(199), "informational");
}

#[test]
fn test_resolve_http_status_and_response() {
    let resolver = layered();

    assert_eq!(resolver.resolve_status(StatusCode::NOT_FOUND), "a");
    assert_eq!(resolver.resolve_status(StatusCode::FORBIDDEN), "b");

    let response = Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .body(())
        .unwrap();
    assert_eq!(resolver.resolve_status(&response), "b");

    let (parts, ()) = response.into_parts();
    assert_eq!(resolver.resolve_status(&parts), "b");
    assert_eq!(resolver.resolve_status(parts), "b");
}

#[test]
fn test_resolve_numeric_string() {
    let resolver = layered();

    assert_eq!(resolver.resolve_str("404").as_deref(), Some("a"));
    assert_eq!(resolver.resolve_str(" 403 ").as_deref(), Some("b"));
    assert_eq!(resolver.resolve_str("200").as_deref(), Some("c"));
    assert_eq!(resolver.resolve_str("not-a-status"), None);
    assert_eq!(resolver.resolve_str(""), None);
}

#[test]
fn test_custom_resolver_is_passed_through() {
    let custom: CustomResolver = Arc::new(|status: u16| format!("max-age={status}"));
    let resolver: Resolver = compile(Arc::clone(&custom)).unwrap();

    let passed = resolver.as_custom().unwrap();
    assert!(Arc::ptr_eq(passed, &custom));
    assert!(resolver.as_table().is_none());
    assert_eq!(resolver.resolve(404), "max-age=404");
}

#[test]
fn test_custom_resolver_is_not_validated() {
    // An empty string would never be a useful header value, but custom
    // resolvers are trusted as is.
    let resolver: Resolver = compile(PolicySpec::custom(|_| String::new())).unwrap();
    assert_eq!(resolver.resolve(200), "");
}

#[derive(Debug, Clone, PartialEq)]
enum Strategy {
    Header(String),
    Skip,
}

impl From<String> for Strategy {
    fn from(value: String) -> Self {
        Strategy::Header(value)
    }
}

#[test]
fn test_custom_value_types() {
    let custom: Resolver<Strategy> = compile(PolicySpec::custom(|status| {
        if status >= 500 {
            Strategy::Skip
        } else {
            Strategy::Header("max-age=60".to_owned())
        }
    }))
    .unwrap();
    assert_eq!(custom.resolve(503), Strategy::Skip);

    let table: Resolver<Strategy> = compile("no-cache").unwrap();
    assert_eq!(table.resolve(503), Strategy::Header("no-cache".to_owned()));
}

#[test]
fn test_custom_resolver_returning_integers() {
    let resolver: Resolver<u32> = compile_custom(|code| u32::from(code) * 2);

    assert_eq!(resolver.resolve(404), 808);
    assert_eq!(resolver.resolve_status(StatusCode::OK), 400);
    assert_eq!(resolver.resolve_str("301"), Some(602));
    assert!(resolver.as_table().is_none());
}

#[test]
fn test_custom_resolver_returning_optional_durations() {
    let resolver = compile_custom(|code| match code {
        200..=299 => Some(Duration::from_secs(300)),
        404 => Some(Duration::from_secs(10)),
        _ => None,
    });

    assert_eq!(resolver.resolve(204), Some(Duration::from_secs(300)));
    assert_eq!(resolver.resolve(404), Some(Duration::from_secs(10)));
    assert_eq!(resolver.resolve(500), None);
}

#[test]
fn test_custom_resolver_from_shared_function_keeps_identity() {
    let custom: CustomResolver<u64> = Arc::new(|status: u16| u64::from(status));
    let resolver = Resolver::from(Arc::clone(&custom));

    assert!(Arc::ptr_eq(resolver.as_custom().unwrap(), &custom));
    assert_eq!(resolver.resolve(418), 418);
}

#[test]
fn test_resolver_is_shared_across_threads() {
    let resolver = layered();

    let handles: Vec<_> = [404_u16, 403, 200]
        .into_iter()
        .map(|code| {
            let resolver = resolver.clone();
            thread::spawn(move || resolver.resolve(code))
        })
        .collect();
    let results: Vec<String> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    assert_eq!(results, vec!["a", "b", "c"]);
}

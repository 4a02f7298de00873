#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::error::ErrorKind;

fn names(t: &PathTemplate) -> Vec<&str> {
    t.bindings.iter().map(|b| b.name.as_str()).collect()
}

#[test]
fn test_simple_placeholder() {
    let t = translate("/users/{user_id}", 8).unwrap();
    assert_eq!(t.pattern(), "/users/:user_id");
    assert_eq!(names(&t), vec!["user_id"]);
    assert_eq!(t.bindings[0].field_path, vec!["user_id"]);
    assert!(!t.bindings[0].catch_all);
}

#[test]
fn test_explicit_single_wildcard() {
    let t = translate("/users/{user_id=*}/posts", 8).unwrap();
    assert_eq!(t.pattern(), "/users/:user_id/posts");
}

#[test]
fn test_catch_all() {
    let t = translate("/files/{file_path=**}", 8).unwrap();
    assert_eq!(t.pattern(), "/files/*file_path");
    assert_eq!(t.catch_all().map(|b| b.name.as_str()), Some("file_path"));
    assert_eq!(
        t.segments.last(),
        Some(&Segment::CatchAll("file_path".to_string()))
    );
}

#[test]
fn test_literal_sub_path_binds_nothing() {
    let t = translate("/api/{version=v1}/users", 8).unwrap();
    assert_eq!(t.pattern(), "/api/v1/users");
    assert!(t.bindings.is_empty());
}

#[test]
fn test_sub_path_with_catch_all() {
    let t = translate("/static/{path=assets/**}", 8).unwrap();
    assert_eq!(t.pattern(), "/static/assets/*path");
    assert_eq!(names(&t), vec!["path"]);
}

#[test]
fn test_sub_path_with_trailing_star() {
    let t = translate("/v1/{name=shelves/*}", 8).unwrap();
    assert_eq!(t.pattern(), "/v1/shelves/:name");
    assert!(!t.bindings[0].catch_all);
}

#[test]
fn test_dotted_placeholder_flattens() {
    let t = translate("/orgs/{org.id}/members/{member_id}", 8).unwrap();
    assert_eq!(t.pattern(), "/orgs/:org_id/members/:member_id");
    let org = t.binding("org_id").unwrap();
    assert_eq!(org.field_path, vec!["org", "id"]);
    assert!(!org.is_top_level());
    assert_eq!(t.top_level_fields().collect::<Vec<_>>(), vec!["member_id"]);
}

#[test]
fn test_root_template() {
    let t = translate("/", 8).unwrap();
    assert_eq!(t.pattern(), "/");
    assert!(t.segments.is_empty());
}

#[test]
fn test_shape_ignores_names() {
    let a = translate("/users/{id}", 8).unwrap();
    let b = translate("/users/{user_id}", 8).unwrap();
    assert_ne!(a.pattern(), b.pattern());
    assert_eq!(a.shape(), b.shape());
}

#[test]
fn test_two_catch_alls_rejected() {
    let err = translate("/a/{x=**}/{y=**}", 8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPathTemplate);
    assert!(err.to_string().contains("only one catch-all"));
}

#[test]
fn test_catch_all_must_be_last() {
    let err = translate("/a/{x=**}/tail", 8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPathTemplate);
    assert!(err.to_string().contains("last segment"));

    let err = translate("/a/{x=**/tail}", 8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidPathTemplate);
}

#[test]
fn test_grammar_violations() {
    for bad in [
        "users/{id}",
        "/users/{id",
        "/users/id}",
        "/users/{}",
        "/users/{1id}",
        "/users/{id-x}",
        "/users/x{id}",
        "/users//posts",
        "/users/{id}/{id}",
        "/users/:id",
        "/users/*rest",
        "/users/{id=}",
        "/users/{a=*/b/*}",
        "/users/{a={b}}",
    ] {
        let err = translate(bad, 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPathTemplate, "{bad}");
    }
}

#[test]
fn test_depth_limit() {
    assert!(translate("/x/{a.b.c}", 3).is_ok());
    let err = translate("/x/{a.b.c.d}", 3).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::SchemaTooDeep);
    assert!(matches!(err, PathError::TooDeep { depth: 4, max: 3, .. }));
}

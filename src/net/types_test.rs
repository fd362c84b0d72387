use super::*;

#[test]
fn method_defaults_to_get() {
    assert_eq!(Method::default(), Method::Get);
}

#[test]
fn method_parses_case_insensitively() {
    assert_eq!("post".parse::<Method>(), Ok(Method::Post));
    assert_eq!(" Delete ".parse::<Method>(), Ok(Method::Delete));
    assert_eq!("PATCH".parse::<Method>(), Ok(Method::Patch));
}

#[test]
fn unknown_method_is_rejected() {
    let err = "TRACE".parse::<Method>().unwrap_err();
    assert_eq!(err.to_string(), "unsupported http method: TRACE");
}

#[test]
fn header_lookup_ignores_case() {
    let req = HttpRequest {
        method: Method::Get,
        url: "/api/x".to_owned(),
        headers: vec![(CONTENT_TYPE.to_owned(), JSON_CONTENT_TYPE.to_owned())],
        body: Body::Empty,
    };
    assert_eq!(req.header("content-type"), Some("application/json"));
    assert_eq!(req.header(AUTHORIZATION), None);
}

#[test]
fn success_range_is_2xx() {
    let resp = |status| HttpResponse { status, body: String::new() };
    assert!(resp(200).is_success());
    assert!(resp(204).is_success());
    assert!(!resp(199).is_success());
    assert!(!resp(301).is_success());
    assert!(!resp(401).is_success());
}

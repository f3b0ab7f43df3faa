use super::*;

#[test]
fn parse_projects_decodes_roles() {
    let body = r#"[{"id":"p1","name":"Alpha","roles":["billing"]},{"id":"p2","name":"Beta","roles":[]}]"#;
    let resp = parse_projects(200, None, body).unwrap();
    assert_eq!(resp.projects.len(), 2);
    assert_eq!(resp.projects[0].name, "Alpha");
    assert!(resp.projects[0].has_role("billing"));
    assert!(resp.renewed_token.is_none());
}

#[test]
fn parse_projects_keeps_renewed_token() {
    let resp = parse_projects(200, Some("Bearer fresh"), "[]").unwrap();
    assert!(resp.projects.is_empty());
    assert_eq!(resp.renewed_token.as_deref(), Some("fresh"));
}

#[test]
fn parse_projects_ignores_blank_authorization() {
    let resp = parse_projects(200, Some("  "), "[]").unwrap();
    assert!(resp.renewed_token.is_none());
}

#[test]
fn parse_projects_rejects_non_success_status() {
    let err = parse_projects(401, None, r#"{"message":"token expired"}"#).unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 401 }));
}

#[test]
fn parse_projects_rejects_malformed_body() {
    let err = parse_projects(200, None, "<html>").unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn http_api_keeps_config() {
    let config = SessionConfig { api_base_url: "https://billing.example.test".to_owned(), ..SessionConfig::default() };
    let api = HttpApi::new(config.clone());
    assert_eq!(api.config, config);
    assert_eq!(api.config.login_url(), "https://billing.example.test/api/login");
}

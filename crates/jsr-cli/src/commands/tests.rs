//! Unit tests for CLI commands.

use super::*;

use camino::Utf8PathBuf;
use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jsr_config::JsrToml;
use jsr_core::types::{Quota, Scope, ScoreBand};

/// Create a temporary directory for testing
fn create_temp_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, path)
}

/// Create a test command context talking to the mock registry
fn create_test_context(server: &MockServer, cwd: Utf8PathBuf, token: &str) -> CommandContext {
    let mut config = JsrToml::default();
    config.registry.api_url = server.uri();

    let mut ctx = CommandContext::from_config(cwd, config, token).unwrap();
    ctx.output = OutputHandler::plain();
    ctx
}

fn package_json(scope: &str, name: &str, score: u32) -> serde_json::Value {
    serde_json::json!({
        "scope": scope,
        "name": name,
        "description": format!("The {} package", name),
        "githubRepository": { "owner": "denoland", "name": "std" },
        "runtimeCompat": { "deno": true },
        "createdAt": "2024-02-01T10:00:00.000Z",
        "updatedAt": "2024-02-01T10:00:00.000Z",
        "score": score
    })
}

fn docs_json(main: &str) -> serde_json::Value {
    serde_json::json!({
        "css": ".ddoc{}",
        "main": main,
        "version": {
            "scope": "std",
            "package": "fmt",
            "version": "1.0.0",
            "rekorLogId": "9876",
            "createdAt": "2024-02-01T10:00:00.000Z",
            "updatedAt": "2024-02-01T10:00:00.000Z"
        }
    })
}

fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "name": "Ada",
        "avatarUrl": "https://avatars.example.com/ada"
    })
}

fn scope_json(scope: &str, with_quotas: bool) -> serde_json::Value {
    let mut value = serde_json::json!({
        "scope": scope,
        "createdAt": "2024-02-01T10:00:00.000Z",
        "updatedAt": "2024-02-01T10:00:00.000Z"
    });
    if with_quotas {
        value["quotas"] = serde_json::json!({ "packageUsage": 7 });
    }
    value
}

fn error_json(code: &str) -> serde_json::Value {
    serde_json::json!({ "code": code, "message": "nope" })
}

fn std_fmt() -> PackageRef {
    "@std/fmt".parse().unwrap()
}

#[tokio::test]
async fn test_context_binds_configured_registry() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    let ctx = create_test_context(&server, cwd, "abc");
    assert_eq!(ctx.client.base_url(), format!("{}/", server.uri()));
    assert_eq!(ctx.client.token(), "abc");
    assert_eq!(ctx.session.snapshot().logged_in, None);
}

#[tokio::test]
async fn test_home_lists_featured() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "newest": [],
            "featured": [package_json("std", "fmt", 94)]
        })))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = home::fetch(&ctx.client).await;
    assert_eq!(state.featured.len(), 1);
    assert!(home::execute(&ctx).await.is_ok());
}

#[tokio::test]
async fn test_home_undocumented_is_empty() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    assert!(home::fetch(&ctx.client).await.featured.is_empty());
}

#[tokio::test]
async fn test_search_sends_query() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/packages"))
        .and(query_param("query", "foo"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [package_json("luca", "foo", 60)],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = search::fetch(&ctx.client, Some("foo")).await;
    assert_eq!(state.packages[0].name, "foo");
}

#[tokio::test]
async fn test_search_failures_collapse_to_empty() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/packages"))
        .and(query_param("query", "bad"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_json("invalidQuery")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/packages"))
        .and(query_param("query", "teapot"))
        .respond_with(ResponseTemplate::new(418))
        .mount(&server)
        .await;

    // Empty query: no filter and no items field
    Mock::given(method("GET"))
        .and(path("/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "total": 0 })))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    assert!(search::fetch(&ctx.client, Some("bad")).await.packages.is_empty());
    assert!(search::fetch(&ctx.client, Some("teapot")).await.packages.is_empty());
    assert!(search::fetch(&ctx.client, Some("")).await.packages.is_empty());
    assert!(search::execute(None, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_docs_not_found() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/versions/9.9.9/docs"))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_json("packageVersionNotFound")))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = docs::fetch(&ctx.client, &std_fmt(), "9.9.9", false).await;

    assert!(state.not_found);
    assert!(state.docs.is_none());
}

#[tokio::test]
async fn test_docs_bad_request_sets_neither() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/versions/latest/docs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_json("badVersion")))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = docs::fetch(&ctx.client, &std_fmt(), "latest", false).await;

    assert!(!state.not_found);
    assert!(state.docs.is_none());
}

#[tokio::test]
async fn test_docs_all_symbols_written_to_file() {
    let server = MockServer::start().await;
    let (temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/versions/latest/docs"))
        .and(query_param("all_symbols", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs_json("<ul>symbols</ul>")))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let result = docs::execute(
        &std_fmt(),
        "latest",
        true,
        Some(std::path::Path::new("symbols.html")),
        &ctx,
    )
    .await;
    assert!(result.is_ok());

    let html = std::fs::read_to_string(temp_dir.path().join("symbols.html")).unwrap();
    assert!(html.contains(r#"<div class="ddoc" id="docMain"><ul>symbols</ul></div>"#));
    assert!(html.contains(r#"href="https://jsr.io/styles.css""#));
}

#[tokio::test]
async fn test_package_overview() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [package_json("std", "path", 90), package_json("std", "fmt", 94)],
            "total": 2
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/versions/latest/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs_json("<h1>README</h1>")))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = package::fetch(&ctx.client, &std_fmt(), "latest").await;

    let found = state.package.unwrap();
    assert_eq!(found.name, "fmt");
    assert_eq!(found.github_repository.unwrap().url(), "https://github.com/denoland/std");

    let docs = state.docs.unwrap();
    assert_eq!(
        docs.version.provenance_url().as_deref(),
        Some("https://search.sigstore.dev/?logIndex=9876")
    );
    assert!(!state.not_found);
}

#[tokio::test]
async fn test_package_past_first_page_has_no_overview() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [package_json("std", "path", 90)],
            "total": 120
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/versions/latest/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(docs_json("<h1>README</h1>")))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = package::fetch(&ctx.client, &std_fmt(), "latest").await;

    assert!(state.package.is_none());
    assert!(state.docs.is_some());
    assert!(!state.not_found);
}

#[tokio::test]
async fn test_versions_listing() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/versions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "version": "1.0.1",
                "createdAt": "2024-03-01T10:00:00.000Z",
                "updatedAt": "2024-03-01T10:00:00.000Z"
            },
            {
                "version": "1.0.0",
                "yanked": true,
                "createdAt": "2024-02-01T10:00:00.000Z",
                "updatedAt": "2024-02-01T10:00:00.000Z"
            }
        ])))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = versions::fetch(&ctx.client, &std_fmt()).await;

    let yanked: Vec<bool> = state.versions.iter().map(|v| v.yanked).collect();
    assert_eq!(yanked, vec![false, true]);
    assert!(versions::execute(&std_fmt(), &ctx).await.is_ok());
}

#[tokio::test]
async fn test_score_formats_documented_symbols() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std/packages/fmt/score"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "hasReadme": true,
            "hasReadmeExamples": false,
            "allEntrypointsDocs": true,
            "percentageDocumentedSymbols": 87.5,
            "allFastCheck": true,
            "hasProvenance": false,
            "hasDescription": true,
            "atLeastOneRuntimeCompatible": true,
            "multipleRuntimesCompatible": false,
            "total": 70
        })))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let score = score::fetch(&ctx.client, &std_fmt()).await.score.unwrap();

    assert_eq!(score.documented_symbols_display(), "87.50");
    assert_eq!(score::band_label(ScoreBand::from_score(score.total.unwrap())), "medium");
    assert!(score::execute(&std_fmt(), &ctx).await.is_ok());
}

#[test]
fn test_score_band_labels() {
    assert_eq!(score::band_label(ScoreBand::from_score(49)), "low");
    assert_eq!(score::band_label(ScoreBand::from_score(50)), "medium");
    assert_eq!(score::band_label(ScoreBand::from_score(75)), "high");
}

#[tokio::test]
async fn test_scope_packages_and_members() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/oak/packages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [package_json("oak", "oak", 80)],
            "total": 1
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/scopes/oak/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "scope": "oak", "user": user_json(), "isAdmin": true }
        ])))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");

    let packages = scope::fetch(&ctx.client, "@oak").await.packages;
    assert_eq!(packages[0].reference().to_string(), "@oak/oak");

    let members = members::fetch(&ctx.client, "oak").await.members;
    assert_eq!(members[0].role(), "admin");

    assert!(members::fetch(&ctx.client, "missing").await.members.is_empty());
}

#[tokio::test]
async fn test_profile_unauthorized() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_json("missingAuthentication")))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/scopes"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_json("missingAuthentication")))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let state = profile::fetch(&ctx.client).await;

    assert!(!state.logged_in);
    assert!(state.user.is_none());
    assert!(state.scopes.is_empty());
    assert!(profile::execute(&ctx).await.is_ok());
}

#[tokio::test]
async fn test_profile_logged_in() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/user/scopes"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            scope_json("ada", true)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "secret");
    let state = profile::fetch(&ctx.client).await;

    assert!(state.logged_in);
    let user = state.user.unwrap();
    assert_eq!(user.scope_quota().to_string(), "0 / 3");
    assert_eq!(state.scopes[0].id(), "ada");
}

#[test]
fn test_scope_settings_merge_requires_quotas() {
    let with_quotas: Scope = serde_json::from_value(scope_json("std", true)).unwrap();
    let without_quotas: Scope = serde_json::from_value(scope_json("std", false)).unwrap();

    let kept = settings::merge_fetched(Some(with_quotas.clone()), without_quotas.clone());
    assert_eq!(kept, Some(with_quotas.clone()));

    let replaced = settings::merge_fetched(Some(without_quotas.clone()), with_quotas.clone());
    assert_eq!(replaced, Some(with_quotas));

    let first = settings::merge_fetched(None, without_quotas.clone());
    assert_eq!(first, Some(without_quotas));
}

#[tokio::test]
async fn test_scope_settings_defaults() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/scopes/std"))
        .respond_with(ResponseTemplate::new(200).set_body_json(scope_json("std", true)))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");
    let scope = settings::fetch(&ctx.client, "@std").await.scope.unwrap();

    let quotas = scope.quotas.clone().unwrap();
    assert_eq!(quotas.packages().to_string(), "7 / 100");
    assert_eq!(quotas.new_packages_per_week().to_string(), "0 / 20");
    assert_eq!(quotas.publish_attempts_per_week().to_string(), "0 / 1000");
    assert!(!scope.verifies_actor());
    assert!(!scope.requires_ci_publish());
    assert!(settings::execute("std", &ctx).await.is_ok());
}

#[test]
fn test_quota_gauge() {
    assert_eq!(
        settings::quota_gauge(&Quota::new(Some(5), Some(20), 100)),
        "[#####---------------] 5 / 20"
    );
    assert_eq!(
        settings::quota_gauge(&Quota::new(None, None, 20)),
        "[--------------------] 0 / 20"
    );
    // Usage past the limit fills the gauge without overflowing it
    assert_eq!(
        settings::quota_gauge(&Quota::new(Some(30), Some(20), 100)),
        "[####################] 30 / 20"
    );
}

#[tokio::test]
async fn test_login_success_and_logout() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json()))
        .expect(1)
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");

    let user = login::login(&ctx.client, &ctx.session, "good").await.unwrap();
    assert_eq!(user.unwrap().name, "Ada");

    let state = ctx.session.snapshot();
    assert_eq!(state.logged_in, Some(true));
    assert_eq!(state.avatar_url.as_deref(), Some("https://avatars.example.com/ada"));
    assert!(ctx.client.is_authenticated());

    login::logout(&ctx.client, &ctx.session).unwrap();
    assert!(!ctx.client.is_authenticated());
    assert!(!ctx.session.snapshot().has_token());
    assert_eq!(ctx.session.snapshot().logged_in, Some(false));
}

#[tokio::test]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(error_json("invalidBearerToken")))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");

    assert!(login::login(&ctx.client, &ctx.session, "bad").await.unwrap().is_none());
    assert_eq!(ctx.session.snapshot().logged_in, Some(false));
    assert!(login::execute_login(Some("bad".to_string()), &ctx).await.is_ok());
}

#[tokio::test]
async fn test_login_undocumented_status_fails() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .mount(&server)
        .await;

    let ctx = create_test_context(&server, cwd, "");

    assert!(login::login(&ctx.client, &ctx.session, "t1").await.unwrap().is_none());
    assert_eq!(ctx.session.snapshot().logged_in, Some(false));
}

#[tokio::test]
async fn test_login_rejects_unsendable_token() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    let ctx = create_test_context(&server, cwd, "");
    let result = login::login(&ctx.client, &ctx.session, "two\nlines").await;

    assert!(matches!(result, Err(JsrError::InvalidToken { .. })));
    assert_eq!(ctx.session.snapshot().logged_in, Some(false));
}

#[tokio::test]
async fn test_invalid_reference_is_rejected_before_dispatch() {
    let server = MockServer::start().await;
    let (_temp_dir, cwd) = create_temp_dir();

    let ctx = create_test_context(&server, cwd, "");
    let result = dispatch_command(Commands::Score { package: "fmt".to_string() }, &ctx).await;

    assert!(matches!(result, Err(JsrError::InvalidReference { .. })));
}

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;
use tower::ServiceExt;
use url::Url;

use orma::application::admin::audit::AdminAuditService;
use orma::application::admin::chrome::AdminChromeService;
use orma::application::admin::settings::AdminSettingsService;
use orma::application::repos::{AuditRepo, SettingsRepo};
use orma::application::store::SettingsStore;
use orma::infra::db::SqliteRepositories;
use orma::infra::http::{AdminState, build_admin_router};
use orma::infra::uploads::UploadStorage;

struct TestAdmin {
    router: Router,
    store: Arc<SettingsStore>,
    _uploads: TempDir,
}

async fn admin_site() -> TestAdmin {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite should connect");
    let db = Arc::new(SqliteRepositories::from_pool(pool));
    db.run_migrations().await.expect("migrations should run");

    let settings_repo: Arc<dyn SettingsRepo> = db.clone();
    let store = Arc::new(SettingsStore::initialize(settings_repo).await);

    let audit_repo: Arc<dyn AuditRepo> = db.clone();
    let audit = AdminAuditService::new(audit_repo);
    let settings = AdminSettingsService::new(store.clone(), audit.clone());

    let base_url = Url::parse("http://127.0.0.1:8080/").expect("base url should parse");
    let chrome = AdminChromeService::new(store.clone(), &base_url);

    let uploads = tempfile::tempdir().expect("temp dir should be created");
    let upload_storage = Arc::new(
        UploadStorage::new(uploads.path().to_path_buf(), 1024 * 1024)
            .expect("upload storage should initialize"),
    );

    let router = build_admin_router(
        AdminState {
            db,
            store: store.clone(),
            settings,
            audit,
            chrome,
            upload_storage,
        },
        2 * 1024 * 1024,
    );

    TestAdmin {
        router,
        store,
        _uploads: uploads,
    }
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (status, String::from_utf8_lossy(&body).to_string())
}

async fn post_form(router: &Router, uri: &str, body: &str) -> (StatusCode, String, String) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_string()))
                .expect("request should build"),
        )
        .await
        .expect("request should succeed");
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap_or_default().to_string())
        .unwrap_or_default();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    (status, content_type, String::from_utf8_lossy(&body).to_string())
}

#[tokio::test]
async fn every_section_page_renders_its_panel() {
    let admin = admin_site().await;

    for path in ["/", "/brand", "/contact", "/theme", "/services", "/hours", "/audit"] {
        let (status, body) = get(&admin.router, path).await;
        assert_eq!(status, StatusCode::OK, "GET {path}");
        assert!(body.contains("data-role=\"panel\""), "GET {path}");
        assert!(body.contains("data-admin-toast=\"stack\""), "GET {path}");
    }
}

#[tokio::test]
async fn dashboard_reports_seed_state_before_any_save() {
    let admin = admin_site().await;
    let (status, body) = get(&admin.router, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Seed defaults (never saved)"));
    assert!(body.contains("Podoflex by Heidi"));
}

#[tokio::test]
async fn brand_update_patches_the_panel_and_raises_a_toast() {
    let admin = admin_site().await;

    let (status, content_type, body) = post_form(
        &admin.router,
        "/brand",
        "name=Atelier+Pieds+L%C3%A9gers\
         &tagline_en=Light+feet&tagline_fr=Pieds+l%C3%A9gers\
         &description_en=Care.&description_fr=Soins.\
         &logo=%2Fstatic%2Fcommon%2Fbrand%2Flogo.svg\
         &favicon=%2Fstatic%2Fcommon%2Fbrand%2Ffavicon.svg",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/event-stream"));
    assert!(body.contains("Brand updated"));
    assert!(body.contains("Atelier Pieds Légers"));

    assert_eq!(admin.store.current().brand.name, "Atelier Pieds Légers");
    assert!(admin.store.last_saved_at().is_some());
}

#[tokio::test]
async fn invalid_contact_submission_is_rejected_with_a_toast() {
    let admin = admin_site().await;
    let before = admin.store.current();

    let (status, _, body) = post_form(
        &admin.router,
        "/contact",
        "email=&whatsapp=%2B1234567890&instagram=&linktree=&tiktok=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Validation failed: email"));
    assert_eq!(admin.store.current(), before);

    // A social link that is not a URL is rejected too.
    let (_, _, body) = post_form(
        &admin.router,
        "/contact",
        "email=hello%40example.com&whatsapp=%2B1234567890\
         &instagram=not-a-url&linktree=&tiktok=",
    )
    .await;
    assert!(body.contains("Validation failed: instagram"));
    assert_eq!(admin.store.current(), before);
}

#[tokio::test]
async fn adding_and_deleting_a_service_round_trips() {
    let admin = admin_site().await;
    let seed_services = orma::domain::seed::seed_settings().services;
    let seeded = seed_services.len();
    assert_eq!(seeded, 4);

    let (status, _, _) = post_form(&admin.router, "/services/add", "").await;
    assert_eq!(status, StatusCode::OK);

    let after_add = admin.store.current();
    assert_eq!(after_add.services.len(), seeded + 1);
    assert_eq!(after_add.services[seeded].title.en, "New Service");
    assert_eq!(after_add.duplicate_service_id(), None);

    let (status, _, _) =
        post_form(&admin.router, &format!("/services/{seeded}/delete"), "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(admin.store.current().services, seed_services);
}

#[tokio::test]
async fn deleting_a_seeded_service_keeps_the_rest_intact() {
    let admin = admin_site().await;
    let seeded = admin.store.current().services.len();
    let removed_id = admin.store.current().services[0].id.clone();

    post_form(&admin.router, "/services/add", "").await;
    let (status, _, _) = post_form(&admin.router, "/services/0/delete", "").await;
    assert_eq!(status, StatusCode::OK);

    let current = admin.store.current();
    assert_eq!(current.services.len(), seeded);
    assert_eq!(current.duplicate_service_id(), None);
    assert!(current.services.iter().all(|service| service.id != removed_id));
}

#[tokio::test]
async fn hours_form_controls_publication() {
    let admin = admin_site().await;
    assert!(admin.store.current().working_hours.is_some());

    // No `published` checkbox in the payload: the section is hidden.
    let (status, _, _) = post_form(
        &admin.router,
        "/hours",
        "monday_en=9-17&monday_fr=9h-17h\
         &tuesday_en=&tuesday_fr=&wednesday_en=&wednesday_fr=\
         &thursday_en=&thursday_fr=&friday_en=&friday_fr=\
         &saturday_en=&saturday_fr=&sunday_en=&sunday_fr=",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(admin.store.current().working_hours.is_none());
}

#[tokio::test]
async fn export_import_round_trip_preserves_settings() {
    let admin = admin_site().await;

    let (status, archive) = get(&admin.router, "/settings/export").await;
    assert_eq!(status, StatusCode::OK);
    assert!(archive.contains("schema_version = 1"));

    // Mutate, then import the exported archive to restore the original.
    post_form(
        &admin.router,
        "/theme",
        "primary=%23000000&secondary=%23111111&background=%23ffffff&text=%23222222&font=Arial",
    )
    .await;
    assert_eq!(admin.store.current().theme.colors.primary, "#000000");

    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("archive", &archive)
        .finish();
    let (status, _, body) = post_form(&admin.router, "/settings/import", &encoded).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Settings archive updated"));
    assert_eq!(admin.store.current().theme.colors.primary, "#0f766e");
}

#[tokio::test]
async fn import_rejects_garbage_without_touching_settings() {
    let admin = admin_site().await;
    let before = admin.store.current();

    let (status, _, body) =
        post_form(&admin.router, "/settings/import", "archive=this+is+not+toml").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Import rejected"));
    assert_eq!(admin.store.current(), before);
}

#[tokio::test]
async fn reset_returns_to_seed_defaults() {
    let admin = admin_site().await;

    post_form(
        &admin.router,
        "/theme",
        "primary=%23000000&secondary=%23111111&background=%23ffffff&text=%23222222&font=Arial",
    )
    .await;
    assert_ne!(admin.store.current().theme.colors.primary, "#0f766e");

    let (status, _, body) = post_form(&admin.router, "/settings/reset", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Settings reset to defaults"));
    assert_eq!(admin.store.current().theme.colors.primary, "#0f766e");
    assert!(admin.store.last_saved_at().is_none());
}

#[test]
fn toast_stack_markup_is_stable() {
    use askama::Template;
    use orma::presentation::admin::views::{AdminToastItem, AdminToastStackTemplate};

    let template = AdminToastStackTemplate {
        toasts: vec![AdminToastItem {
            id: "fixed".to_string(),
            kind: "success",
            text: "Brand updated".to_string(),
            ttl_ms: 6000,
        }],
    };

    insta::assert_snapshot!(
        template.render().expect("toast stack should render"),
        @r#"<div data-admin-toast="stack"><div class="toast toast-success" id="toast-fixed" data-ttl="6000">Brand updated</div></div>"#
    );
}

#[tokio::test]
async fn toasts_only_originate_from_server_side_outcomes() {
    let admin = admin_site().await;

    // There is no endpoint for injecting arbitrary toasts; they are always
    // attached to a section submit's result.
    let (status, _, _) = post_form(&admin.router, "/toasts", "kind=success&message=hi").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn edits_are_recorded_in_the_audit_log() {
    let admin = admin_site().await;

    post_form(
        &admin.router,
        "/theme",
        "primary=%23000000&secondary=%23111111&background=%23ffffff&text=%23222222&font=Arial",
    )
    .await;

    let (status, body) = get(&admin.router, "/audit").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("studio-admin"));
    assert!(body.contains("settings.theme.update"));
}

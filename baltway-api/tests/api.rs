use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use baltway_api::auth::StaticCredentialVerifier;
use baltway_api::route_preview::NullGeocoder;
use baltway_api::state::{AppState, AuthConfig};
use baltway_api::app;
use baltway_core::blog::{self, BlogPost, NewBlogPost, UpdateBlogPost};
use baltway_core::booking::BookingRequest;
use baltway_core::form::{BookingNotifier, NotifyError};
use baltway_core::repository::{BlogRepository, SettingsRepository, StoreError};
use baltway_core::settings::SiteSettings;

// ============================================================================
// In-memory doubles
// ============================================================================

#[derive(Default)]
struct InMemoryBlog {
    posts: Mutex<Vec<BlogPost>>,
    next_id: AtomicI32,
}

#[async_trait]
impl BlogRepository for InMemoryBlog {
    async fn list(&self) -> Result<Vec<BlogPost>, StoreError> {
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    async fn find_by_id(&self, id: i32) -> Result<BlogPost, StoreError> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<BlogPost, StoreError> {
        self.posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.slug == slug)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn create(&self, post: NewBlogPost) -> Result<BlogPost, StoreError> {
        let slug = match post.slug {
            Some(slug) if !slug.is_empty() => slug,
            _ => blog::slugify(&post.title),
        };
        let mut posts = self.posts.lock().unwrap();
        if posts.iter().any(|p| p.slug == slug) {
            return Err(StoreError::DuplicateSlug(slug));
        }
        let now = Utc::now();
        let stored = BlogPost {
            id: self.next_id.fetch_add(1, Ordering::SeqCst) + 1,
            title: post.title,
            slug,
            content: post.content,
            excerpt: post.excerpt,
            image: post.image,
            fallback_image: post
                .fallback_image
                .unwrap_or_else(|| blog::DEFAULT_FALLBACK_IMAGE.to_string()),
            published_at: post.published_at.unwrap_or(now),
            read_time: post.read_time.unwrap_or_else(|| "5 min".to_string()),
            is_published: post.is_published,
            created_at: now,
            updated_at: now,
        };
        posts.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: i32, changes: UpdateBlogPost) -> Result<BlogPost, StoreError> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(slug) = &changes.slug {
            if posts.iter().any(|p| &p.slug == slug && p.id != id) {
                return Err(StoreError::DuplicateSlug(slug.clone()));
            }
        }
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(StoreError::NotFound)?;
        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(slug) = changes.slug {
            post.slug = slug;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(excerpt) = changes.excerpt {
            post.excerpt = excerpt;
        }
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemorySettings {
    value: Mutex<Option<SiteSettings>>,
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn get(&self) -> Result<SiteSettings, StoreError> {
        let mut value = self.value.lock().unwrap();
        Ok(value.get_or_insert_with(SiteSettings::default).clone())
    }

    async fn replace(&self, settings: SiteSettings) -> Result<SiteSettings, StoreError> {
        *self.value.lock().unwrap() = Some(settings.clone());
        Ok(settings)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    deliveries: AtomicUsize,
}

#[async_trait]
impl BookingNotifier for RecordingNotifier {
    async fn notify(&self, _request: &BookingRequest) -> Result<(), NotifyError> {
        self.deliveries.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

const ADMIN_PASSWORD: &str = "test-admin-password";

fn test_state(notifier: Arc<RecordingNotifier>) -> AppState {
    AppState {
        blog: Arc::new(InMemoryBlog::default()),
        settings: Arc::new(InMemorySettings::default()),
        notifier,
        geocoder: Arc::new(NullGeocoder),
        verifier: Arc::new(StaticCredentialVerifier::new(ADMIN_PASSWORD.to_string())),
        auth: AuthConfig {
            secret: "test-secret".to_string(),
            expiration: 3600,
        },
    }
}

fn test_app() -> (axum::Router, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    (app(test_state(notifier.clone())), notifier)
}

fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn authed_request(method: Method, uri: &str, token: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn login(app: &axum::Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/admin/login",
            &json!({ "password": ADMIN_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}

fn valid_booking() -> Value {
    let tomorrow = Utc::now().date_naive() + chrono::Duration::days(1);
    json!({
        "name": "Anna",
        "phone": "+79000000000",
        "vehicleClass": "comfort",
        "date": tomorrow,
        "time": "10:30",
        "originCity": "kaliningrad",
        "originAddress": "Airport Khrabrovo",
        "destinationCity": "gdansk",
        "destinationAddress": "Main St 1",
        "paymentMethod": "card",
        "returnTransfer": "no",
        "agreement": true
    })
}

// ============================================================================
// Bookings
// ============================================================================

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = test_app();
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn valid_booking_is_accepted_and_delivered() {
    let (app, notifier) = test_app();

    let response = app
        .oneshot(json_request(Method::POST, "/v1/bookings", &valid_booking()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["status"], "accepted");
    assert!(body["reference"].is_string());
    assert_eq!(notifier.deliveries.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn invalid_booking_enumerates_violations_per_field() {
    let (app, notifier) = test_app();

    let mut booking = valid_booking();
    booking["destinationCity"] = json!("custom");
    booking["customDestinationCity"] = json!("");
    booking["destinationAddress"] = json!("");

    let response = app
        .oneshot(json_request(Method::POST, "/v1/bookings", &booking))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    let fields: Vec<&str> = body["violations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["customDestinationCity", "destinationAddress"]);
    assert_eq!(notifier.deliveries.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn booking_with_past_date_is_rejected() {
    let (app, _) = test_app();

    let mut booking = valid_booking();
    // Two days back so the date is in the past regardless of the offset
    // between UTC and the server's local timezone.
    booking["date"] = json!(Utc::now().date_naive() - chrono::Duration::days(2));

    let response = app
        .oneshot(json_request(Method::POST, "/v1/bookings", &booking))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["violations"][0]["field"], "date");
}

// ============================================================================
// Blog
// ============================================================================

#[tokio::test]
async fn blog_mutations_require_authentication() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/v1/admin/blog",
            &json!({ "title": "T", "content": "C", "excerpt": "E" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(authed_request(
            Method::POST,
            "/v1/admin/blog",
            "not-a-jwt",
            &json!({ "title": "T", "content": "C", "excerpt": "E" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_admin_password_is_rejected() {
    let (app, _) = test_app();
    let response = app
        .oneshot(json_request(
            Method::POST,
            "/v1/admin/login",
            &json!({ "password": "guess" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn blog_crud_round_trip() {
    let (app, _) = test_app();
    let token = login(&app).await;

    // Create: slug generated from the title.
    let response = app
        .clone()
        .oneshot(authed_request(
            Method::POST,
            "/v1/admin/blog",
            &token,
            &json!({
                "title": "Transfer to Gdansk Airport",
                "content": "Full text",
                "excerpt": "Short"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    let id = body["post"]["id"].as_i64().unwrap();
    assert_eq!(body["post"]["slug"], "transfer-to-gdansk-airport");
    assert_eq!(body["post"]["fallbackImage"], blog::DEFAULT_FALLBACK_IMAGE);

    // Duplicate slug is a conflict.
    let response = app
        .clone()
        .oneshot(authed_request(
            Method::POST,
            "/v1/admin/blog",
            &token,
            &json!({
                "title": "Another",
                "slug": "transfer-to-gdansk-airport",
                "content": "x",
                "excerpt": "y"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Public read by slug.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/v1/blog?slug=transfer-to-gdansk-airport")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["post"]["title"], "Transfer to Gdansk Airport");

    // Update the title.
    let response = app
        .clone()
        .oneshot(authed_request(
            Method::PUT,
            &format!("/v1/admin/blog/{id}"),
            &token,
            &json!({ "title": "Updated title" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["post"]["title"], "Updated title");

    // Delete, then the post is gone.
    let response = app
        .clone()
        .oneshot(authed_request(
            Method::DELETE,
            &format!("/v1/admin/blog/{id}"),
            &token,
            &json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/v1/blog?id={id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn updating_to_a_foreign_slug_is_a_conflict() {
    let (app, _) = test_app();
    let token = login(&app).await;

    for title in ["First post", "Second post"] {
        let response = app
            .clone()
            .oneshot(authed_request(
                Method::POST,
                "/v1/admin/blog",
                &token,
                &json!({ "title": title, "content": "x", "excerpt": "y" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(authed_request(
            Method::PUT,
            "/v1/admin/blog/2",
            &token,
            &json!({ "slug": "first-post" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn blog_list_is_newest_first() {
    let (app, _) = test_app();
    let token = login(&app).await;

    for (title, published) in [
        ("Old post", "2026-01-01T00:00:00Z"),
        ("New post", "2026-06-01T00:00:00Z"),
    ] {
        let response = app
            .clone()
            .oneshot(authed_request(
                Method::POST,
                "/v1/admin/blog",
                &token,
                &json!({
                    "title": title,
                    "content": "x",
                    "excerpt": "y",
                    "publishedAt": published
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(Request::builder().uri("/v1/blog").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    let titles: Vec<&str> = body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["New post", "Old post"]);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn settings_default_then_replace() {
    let (app, _) = test_app();

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/v1/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["settings"]["phone"], "+7 (900) 000-00-00");

    let token = login(&app).await;

    // Empty phone is rejected.
    let response = app
        .clone()
        .oneshot(authed_request(
            Method::PUT,
            "/v1/admin/settings",
            &token,
            &json!({ "phone": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(authed_request(
            Method::PUT,
            "/v1/admin/settings",
            &token,
            &json!({ "phone": "+48 500 100 200", "telegram": "baltway" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/v1/settings").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["settings"]["phone"], "+48 500 100 200");
    assert_eq!(body["settings"]["telegram"], "baltway");
}

// ============================================================================
// Route preview
// ============================================================================

#[tokio::test]
async fn route_preview_between_known_cities() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/route-preview?origin=kaliningrad&destination=gdansk")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let distance = body["distanceKm"].as_f64().unwrap();
    assert!(distance > 110.0 && distance < 150.0);
    assert!(body["durationMinutes"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn route_preview_degrades_when_unresolvable() {
    let (app, _) = test_app();

    // NullGeocoder resolves no custom city: no map, no error.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/v1/route-preview?origin=kaliningrad&destination=custom&customDestination=Szczecin")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

mod common;

use assert_matches::assert_matches;
use axum::http::{Method, StatusCode};
use serde_json::json;

use cms_client::screens::ListingScreen;
use cms_client::{ClientError, SessionStore};
use cms_core::error::CoreError;
use cms_core::notice::NoticeKind;
use cms_core::query::{ListQuery, SortDirection};
use cms_core::resource::{Record, Resource};
use cms_core::resources::banner::Banners;
use cms_core::resources::gallery_category::{GalleryCategories, ACTIVE_ONLY};
use cms_core::resources::slider::HomeSlider;
use cms_core::route::Route;

use common::{banner, page_of, signed_in, FakeBackend, TOKEN};

fn ids<R: Record>(rows: &[R]) -> Vec<&str> {
    rows.iter().map(|r| r.id()).collect()
}

#[tokio::test]
async fn load_sends_page_and_limit_with_token() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of("banners", vec![banner("b1", "Spring")], Some(3)),
    );

    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(2).await.unwrap();

    let sent = backend.requests_to(Method::GET, "/banners").remove(0);
    assert_eq!(sent.query_param("page").as_deref(), Some("2"));
    assert_eq!(sent.query_param("limit").as_deref(), Some("10"));
    assert_eq!(sent.authorization.as_deref(), Some(format!("Bearer {TOKEN}").as_str()));
    assert_eq!(screen.listing().current_page(), 2);
    assert_eq!(screen.listing().total_pages(), 3);
}

#[tokio::test]
async fn page_never_exceeds_limit() {
    let backend = FakeBackend::start().await;
    let rows = (1..=8).map(|i| banner(&format!("b{i}"), "Row")).collect();
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of("banners", rows, Some(2)),
    );

    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 5).unwrap();
    screen.load(1).await.unwrap();
    assert_eq!(screen.listing().items().len(), 5);
}

#[tokio::test]
async fn next_and_previous_are_clamped() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of("banners", vec![banner("b1", "Only")], Some(1)),
    );

    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();
    screen.next().await.unwrap();
    screen.previous().await.unwrap();

    let pages: Vec<_> = backend
        .requests_to(Method::GET, "/banners")
        .iter()
        .map(|r| r.query_param("page"))
        .collect();
    assert_eq!(pages, vec![Some("1".to_string()); 3]);
    assert!(!screen.listing().has_next());
}

#[tokio::test]
async fn missing_total_pages_means_single_page() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        json!({ "data": [banner("b1", "A"), banner("b2", "B")] }),
    );

    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();
    assert_eq!(screen.listing().total_pages(), 1);
    assert_eq!(ids(screen.listing().items()), ["b1", "b2"]);
}

#[tokio::test]
async fn bare_array_and_items_envelopes_are_accepted() {
    let backend = FakeBackend::start().await;
    backend.respond(Method::GET, "/banners", StatusCode::OK, json!([banner("b1", "A")]));
    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();
    assert_eq!(ids(screen.listing().items()), ["b1"]);

    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        json!({ "items": [banner("b9", "Z")], "totalPages": 4 }),
    );
    screen.load(1).await.unwrap();
    assert_eq!(ids(screen.listing().items()), ["b9"]);
    assert_eq!(screen.listing().total_pages(), 4);
}

#[tokio::test]
async fn unrecognized_envelope_keeps_previous_rows() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of("banners", vec![banner("b1", "Kept")], None),
    );
    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();

    backend.respond(Method::GET, "/banners", StatusCode::OK, json!({ "rows": [] }));
    let err = screen.load(1).await.unwrap_err();
    assert_matches!(err, ClientError::Core(CoreError::Parse(_)));
    assert_eq!(ids(screen.listing().items()), ["b1"]);

    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "boom" }),
    );
    assert!(screen.load(1).await.is_err());
    assert_eq!(ids(screen.listing().items()), ["b1"]);
}

#[tokio::test]
async fn public_listings_are_read_without_token() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/slider",
        StatusCode::OK,
        json!({ "sliders": [{ "_id": "s1", "title": "Hello" }], "totalPages": 1 }),
    );

    let mut screen =
        ListingScreen::<HomeSlider>::mount(backend.api(), &signed_in(), HomeSlider::PAGE_SIZE)
            .unwrap();
    screen.load(1).await.unwrap();

    let sent = backend.requests_to(Method::GET, "/slider").remove(0);
    assert_eq!(sent.authorization, None);
    assert_eq!(sent.query_param("limit").as_deref(), Some("5"));
}

#[tokio::test]
async fn extra_query_is_forwarded() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/gallery-categories",
        StatusCode::OK,
        json!({ "categories": [{ "_id": "c1", "name": "Events" }] }),
    );

    let (key, value) = ACTIVE_ONLY;
    let mut screen = ListingScreen::<GalleryCategories>::mount(backend.api(), &signed_in(), 10)
        .unwrap()
        .with_query(key, value);
    screen.load(1).await.unwrap();

    let sent = backend.requests_to(Method::GET, "/gallery-categories").remove(0);
    assert_eq!(sent.query_param("isActive").as_deref(), Some("true"));
}

#[tokio::test]
async fn confirmed_delete_removes_exactly_one_row() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of(
            "banners",
            vec![banner("b1", "A"), banner("b2", "B"), banner("b3", "C")],
            None,
        ),
    );
    backend.respond(
        Method::DELETE,
        "/banners/b2",
        StatusCode::OK,
        json!({ "message": "Banner deleted" }),
    );

    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();
    screen.request_delete("b2");
    let notice = screen.confirm_delete().await;

    assert_eq!(notice.kind, NoticeKind::Success);
    assert_eq!(ids(screen.listing().items()), ["b1", "b3"]);
    assert_eq!(screen.listing().pending_delete(), None);

    let sent = backend.requests_to(Method::DELETE, "/banners/b2").remove(0);
    assert_eq!(sent.authorization.as_deref(), Some(format!("Bearer {TOKEN}").as_str()));
    assert!(sent.idempotency_key.is_some());
}

#[tokio::test]
async fn failed_delete_keeps_the_row() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of("banners", vec![banner("b1", "A"), banner("b2", "B")], None),
    );
    backend.respond(
        Method::DELETE,
        "/banners/b1",
        StatusCode::FORBIDDEN,
        json!({ "message": "Not allowed" }),
    );

    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();
    screen.request_delete("b1");
    let notice = screen.confirm_delete().await;

    assert!(notice.is_error());
    assert_eq!(notice.message, "Not allowed");
    assert_eq!(ids(screen.listing().items()), ["b1", "b2"]);
    assert_eq!(screen.listing().pending_delete(), Some("b1"));

    // Confirming again is the same deletion.
    assert!(screen.confirm_delete().await.is_error());
    let keys: Vec<String> = backend
        .requests_to(Method::DELETE, "/banners/b1")
        .into_iter()
        .map(|r| r.idempotency_key.unwrap())
        .collect();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys[0], keys[1]);
}

#[tokio::test]
async fn delete_without_confirmation_sends_nothing() {
    let backend = FakeBackend::start().await;
    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    assert!(screen.confirm_delete().await.is_error());
    assert!(backend.requests().is_empty());
}

#[tokio::test]
async fn local_view_filters_and_sorts_loaded_page() {
    let backend = FakeBackend::start().await;
    backend.respond(
        Method::GET,
        "/banners",
        StatusCode::OK,
        page_of(
            "banners",
            vec![
                banner("b1", "Spring Promo"),
                banner("b2", "winter sale"),
                banner("b3", "Autumn Promo"),
            ],
            None,
        ),
    );
    let mut screen = ListingScreen::<Banners>::mount(backend.api(), &signed_in(), 10).unwrap();
    screen.load(1).await.unwrap();

    let query = ListQuery::default().search("promo").sorted(SortDirection::Asc);
    let rows: Vec<&str> = screen.view(&query).into_iter().map(|r| r.id.as_str()).collect();
    assert_eq!(rows, ["b3", "b1"]);
    assert_eq!(backend.requests().len(), 1);
}

#[test]
fn mounting_without_token_redirects_to_login() {
    let api = cms_client::CmsApi::with_client(reqwest::Client::new(), "http://127.0.0.1:9");
    let redirect = ListingScreen::<Banners>::mount(api, &SessionStore::default(), 10)
        .err()
        .unwrap();
    assert_eq!(redirect.to, Route::Login);
    assert_eq!(redirect.notice, None);
}

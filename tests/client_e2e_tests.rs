//! End-to-end tests for the client toolkit against a live server.
//!
//! Each test serves the API over an in-memory store on an ephemeral port
//! and drives it the way the frontend components do: form controller with
//! debounced autosave, filterable browser, read-only viewer.

use listings::client::{ClientError, ListingBrowser, ListingFormController, ListingViewer, ListingsClient};
use listings::core::filter::ListingQuery;
use listings::core::listing::{Coordinates, Listing, ListingStatus, Location, PropertyType, Purpose};
use listings::server::build_router;
use listings::storage::InMemoryListingStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

/// Debounce quiet period used by these tests.
const QUIET: Duration = Duration::from_millis(40);
/// Comfortably longer than QUIET, so a pending timer has fired.
const SETTLE: Duration = Duration::from_millis(250);

async fn spawn_server() -> String {
    let store = Arc::new(InMemoryListingStore::new());
    let app = build_router(store);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// Make the draft pass the server-side schema.
fn fill_required(draft: &mut Listing) {
    draft.title = "Luxury 2BR Apartment".to_string();
    draft.description = "A premium 2-bedroom apartment in Dubai Marina.".to_string();
    draft.location = Location {
        emirate: "Dubai".to_string(),
        city: "Dubai Marina".to_string(),
        building_name: None,
        community: None,
        street: None,
        coordinates: Coordinates {
            lat: 25.085779,
            lng: 55.14545,
        },
    };
}

fn sample_listing(title: &str, emirate: &str, price: f64) -> Listing {
    let mut listing = Listing::default();
    fill_required(&mut listing);
    listing.title = title.to_string();
    listing.location.emirate = emirate.to_string();
    listing.price = price;
    listing
}

// ==============================================================
// API client
// ==============================================================

#[tokio::test]
async fn test_ping_returns_liveness_text() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let text = client.ping().await.unwrap();
    assert_eq!(text, "Real Estate Listings API is running.");
}

#[tokio::test]
async fn test_client_crud_roundtrip() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let created = client
        .create(&sample_listing("Marina apartment", "Dubai", 1_850_000.0))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();

    let fetched = client.get(&id).await.unwrap();
    assert_eq!(fetched.title, "Marina apartment");

    let updated = client
        .update(&id, &serde_json::json!({"price": 500_000}))
        .await
        .unwrap();
    assert_eq!(updated.price, 500_000.0);
    assert_eq!(updated.title, "Marina apartment");

    client.delete(&id).await.unwrap();
    assert!(matches!(
        client.get(&id).await.unwrap_err(),
        ClientError::NotFound
    ));
}

#[tokio::test]
async fn test_client_surfaces_validation_errors() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut invalid = sample_listing("ab", "Dubai", 1.0);
    invalid.title = "ab".to_string();

    match client.create(&invalid).await.unwrap_err() {
        ClientError::Api { status, .. } => assert_eq!(status, 400),
        other => panic!("expected Api error, got {other:?}"),
    }
}

// ==============================================================
// Form controller — debounced autosave
// ==============================================================

#[tokio::test]
async fn test_rapid_edits_coalesce_into_one_save() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.edit(fill_required);
    form.edit(|d| d.price = 1_000_000.0);
    form.edit(|d| d.price = 1_850_000.0);

    sleep(SETTLE).await;
    form.flush().await;

    // One document, carrying the final snapshot.
    let all = client.list(&ListingQuery::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].price, 1_850_000.0);
    assert_eq!(form.document_id(), all[0].id);
    assert!(form.session().last_saved.is_some());
}

#[tokio::test]
async fn test_first_save_creates_then_subsequent_saves_update() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.edit(fill_required);

    sleep(SETTLE).await;
    form.flush().await;
    let id = form.document_id().expect("first save should assign an id");

    form.edit(|d| d.title = "Updated Marina Apartment".to_string());
    sleep(SETTLE).await;
    form.flush().await;

    // Still one document, now updated in place.
    let all = client.list(&ListingQuery::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id.as_ref(), Some(&id));
    assert_eq!(all[0].title, "Updated Marina Apartment");
}

#[tokio::test]
async fn test_save_stamps_timestamps() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.edit(fill_required);

    sleep(SETTLE).await;
    form.flush().await;

    let stored = client.get(&form.document_id().unwrap()).await.unwrap();
    assert!(stored.created_at.is_some());
    assert!(stored.updated_at.is_some());
}

#[tokio::test]
async fn test_publish_after_pending_edit_loses_neither_write() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.edit(fill_required);
    sleep(SETTLE).await;
    form.flush().await;
    let id = form.document_id().unwrap();

    // Edit, then publish while the debounce timer is still pending. The
    // write queue applies the edit first, then the publish flip.
    form.edit(|d| d.price = 2_222_222.0);
    form.toggle_publish();
    form.flush().await;

    let stored = client.get(&id).await.unwrap();
    assert_eq!(stored.price, 2_222_222.0);
    assert!(stored.is_published);
    assert_eq!(stored.status, ListingStatus::Published);
    assert!(form.is_published());
}

#[tokio::test]
async fn test_unpublish_flips_back_to_draft() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.edit(fill_required);
    sleep(SETTLE).await;
    form.flush().await;
    let id = form.document_id().unwrap();

    form.toggle_publish();
    form.flush().await;
    assert!(client.get(&id).await.unwrap().is_published);

    form.toggle_publish();
    form.flush().await;
    let stored = client.get(&id).await.unwrap();
    assert!(!stored.is_published);
    assert_eq!(stored.status, ListingStatus::Draft);
}

#[tokio::test]
async fn test_publish_on_never_saved_draft_is_a_no_op() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.toggle_publish();
    form.flush().await;

    // Nothing stored, but the local draft carries the flip.
    let all = client.list(&ListingQuery::default()).await.unwrap();
    assert!(all.is_empty());
    assert!(form.is_published());
}

#[tokio::test]
async fn test_load_existing_listing_updates_in_place() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let created = client
        .create(&sample_listing("Marina apartment", "Dubai", 1_850_000.0))
        .await
        .unwrap();
    let id = created.id.clone().unwrap();

    let mut form = ListingFormController::load(client.clone(), &id)
        .await
        .unwrap()
        .with_quiet_period(QUIET);
    assert_eq!(form.document_id(), Some(id.clone()));
    assert_eq!(form.draft().title, "Marina apartment");

    form.edit(|d| d.bedrooms = 4);
    sleep(SETTLE).await;
    form.flush().await;

    let all = client.list(&ListingQuery::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].bedrooms, 4);
}

#[tokio::test]
async fn test_invalid_draft_save_is_swallowed() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    // Draft defaults fail server-side validation (empty title); the save
    // fires, fails, and the controller keeps editing.
    let mut form = ListingFormController::new(client.clone()).with_quiet_period(QUIET);
    form.edit(|d| d.price = 100.0);

    sleep(SETTLE).await;
    form.flush().await;

    assert!(form.document_id().is_none());
    let all = client.list(&ListingQuery::default()).await.unwrap();
    assert!(all.is_empty());

    // Completing the draft makes the next autosave succeed.
    form.edit(fill_required);
    sleep(SETTLE).await;
    form.flush().await;
    assert!(form.document_id().is_some());
}

// ==============================================================
// Browser
// ==============================================================

#[tokio::test]
async fn test_browser_apply_and_reset() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    client
        .create(&sample_listing("Marina apartment", "Dubai", 1_850_000.0))
        .await
        .unwrap();
    client
        .create(&sample_listing("Downtown penthouse", "Dubai", 6_500_000.0))
        .await
        .unwrap();
    client
        .create(&sample_listing("Majaz townhouse", "Sharjah", 650_000.0))
        .await
        .unwrap();

    let mut browser = ListingBrowser::new(client.clone());

    // Initial unfiltered fetch.
    browser.apply().await.unwrap();
    assert_eq!(browser.results().len(), 3);

    // Conjunctive criteria narrow the collection.
    browser.filters_mut().emirate = Some("Dubai".to_string());
    browser.filters_mut().min_price = Some("2000000".to_string());
    browser.apply().await.unwrap();
    assert_eq!(browser.results().len(), 1);
    assert_eq!(browser.results()[0].title, "Downtown penthouse");

    // Reset clears criteria and refetches in one step.
    browser.reset().await.unwrap();
    assert!(browser.filters().emirate.is_none());
    assert!(browser.filters().min_price.is_none());
    assert_eq!(browser.results().len(), 3);
}

#[tokio::test]
async fn test_browser_keeps_results_on_fetch_failure() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base.clone());

    client
        .create(&sample_listing("Marina apartment", "Dubai", 1_850_000.0))
        .await
        .unwrap();

    let mut browser = ListingBrowser::new(client);
    browser.apply().await.unwrap();
    assert_eq!(browser.results().len(), 1);

    // Point a second browser at a dead port: fetch fails, results stay.
    let mut dead = ListingBrowser::new(ListingsClient::new("http://127.0.0.1:9"));
    assert!(dead.apply().await.is_err());
    assert!(dead.results().is_empty());

    assert_eq!(browser.results().len(), 1);
}

// ==============================================================
// Viewer
// ==============================================================

#[tokio::test]
async fn test_viewer_loads_listing() {
    let base = spawn_server().await;
    let client = ListingsClient::new(base);

    let created = client
        .create(&sample_listing("Marina apartment", "Dubai", 1_850_000.0))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let viewer = ListingViewer::new(client);
    let listing = viewer.load(&id).await.unwrap();
    assert_eq!(listing.title, "Marina apartment");
    assert_eq!(listing.property_type, PropertyType::Apartment);
    assert_eq!(listing.purpose, Purpose::Sale);
}

#[tokio::test]
async fn test_viewer_maps_every_failure_to_not_found() {
    let base = spawn_server().await;
    let viewer = ListingViewer::new(ListingsClient::new(base));

    // Unknown id.
    assert!(matches!(
        viewer.load("65f0a1b2c3d4e5f6a7b8c9d0").await.unwrap_err(),
        ClientError::NotFound
    ));

    // Malformed id — still just "not found" to the viewer.
    assert!(matches!(
        viewer.load("not-an-objectid").await.unwrap_err(),
        ClientError::NotFound
    ));
}

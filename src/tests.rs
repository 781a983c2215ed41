//! Integration tests for the CampusCircle backend.

use reqwest::Client;
use serde_json::{json, Value};

use crate::config::{Config, LogFormat};
use crate::models::LenderIdentity;
use crate::{create_router, AppState};

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
}

impl TestFixture {
    async fn new() -> Self {
        Self::with_seed(true).await
    }

    async fn with_seed(seed: bool) -> Self {
        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Text,
            lender: LenderIdentity {
                id: "current-user-id".to_string(),
                display_name: "Anonymous".to_string(),
            },
            seed,
            max_upload_bytes: 1024 * 1024,
            location_label: "IIT Delhi Campus • 50m radius".to_string(),
        };

        let app = create_router(AppState::new(config));

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json(&self, path: &str) -> (u16, Value) {
        let resp = self.client.get(self.url(path)).send().await.unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    async fn post_json(&self, path: &str, body: Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }
}

fn charger_offer() -> Value {
    json!({
        "price": "75",
        "description": "I have a 60W charger available now, like-new condition."
    })
}

#[tokio::test]
async fn test_health_check() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/health"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn test_feed_defaults_to_all_requests() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/feed").await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["revisionId"], 0);
    assert_eq!(body["data"]["selectedCategory"], "all");
    assert_eq!(body["data"]["visibleCount"], 6);
    assert_eq!(body["data"]["summary"], "6 active requests");
    assert_eq!(body["data"]["locationLabel"], "IIT Delhi Campus • 50m radius");
    assert!(body["data"].get("emptyState").is_none());

    let first = &body["data"]["requests"][0];
    assert_eq!(first["id"], "1");
    assert_eq!(first["priceLabel"], "₹50");
    assert_eq!(first["showNewBadge"], true);
    assert_eq!(first["offersLabel"], "3 offers");
}

#[tokio::test]
async fn test_feed_books_filter() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/feed?category=Books").await;

    assert_eq!(status, 200);
    let requests = body["data"]["requests"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["title"], "Data Structures & Algorithms Textbook");

    // The filter sticks for the session
    let (_, session) = fixture.get_json("/api/session").await;
    assert_eq!(session["data"]["selectedCategory"], "Books");
}

#[tokio::test]
async fn test_feed_empty_state() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/feed?category=Other").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["visibleCount"], 0);
    assert_eq!(body["data"]["emptyState"]["title"], "No requests found");
}

#[tokio::test]
async fn test_feed_unknown_category() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/feed?category=Furniture").await;

    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_categories() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/categories").await;

    assert_eq!(status, 200);
    let options = body["data"].as_array().unwrap();
    let values: Vec<&str> = options.iter().map(|o| o["value"].as_str().unwrap()).collect();
    assert_eq!(
        values,
        ["all", "Electronics", "Books", "Food", "Transport", "Other"]
    );
    assert_eq!(options[0]["label"], "All");
    assert_eq!(options[0]["selected"], true);
}

#[tokio::test]
async fn test_create_request() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post_json(
            "/api/requests",
            json!({
                "title": "Lab coat for chemistry practical",
                "description": "Size M, needed for Thursday's lab.",
                "category": "Other",
                "urgency": "high",
                "price": "120",
                "tags": ["Lab", "Lab", "Chemistry"],
                "image": "data:image/png;base64,aGVsbG8="
            }),
        )
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["revisionId"], 1);
    assert_eq!(body["notice"]["title"], "Request Created!");

    let request = &body["data"];
    assert!(request["id"].as_str().unwrap().starts_with("req_"));
    assert_eq!(request["price"], 120.0);
    assert_eq!(request["urgency"], "high");
    assert_eq!(request["timeAgo"], "just now");
    assert_eq!(request["offersCount"], 0);
    assert_eq!(request["isNew"], true);
    assert_eq!(request["tags"], json!(["Lab", "Chemistry"]));
    assert_eq!(request["image"], "data:image/png;base64,aGVsbG8=");

    // Most recent first
    let (_, list) = fixture.get_json("/api/requests").await;
    let list = list["data"].as_array().unwrap();
    assert_eq!(list.len(), 7);
    assert_eq!(list[0]["id"], request["id"]);
}

#[tokio::test]
async fn test_create_request_missing_fields() {
    let fixture = TestFixture::new().await;

    fixture
        .client
        .post(fixture.url("/api/session/request-modal"))
        .send()
        .await
        .unwrap();

    let (status, body) = fixture
        .post_json(
            "/api/requests",
            json!({ "title": "Something", "category": "Food" }),
        )
        .await;

    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["notice"]["title"], "Missing Information");
    assert_eq!(body["notice"]["variant"], "destructive");
    let fields: Vec<&str> = body["error"]["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["description", "price"]);

    // Nothing changed and the modal stays open
    let (_, list) = fixture.get_json("/api/requests").await;
    assert_eq!(list["data"].as_array().unwrap().len(), 6);
    assert_eq!(list["revisionId"], 0);
    let (_, session) = fixture.get_json("/api/session").await;
    assert_eq!(session["data"]["modals"]["createRequestOpen"], true);
}

#[tokio::test]
async fn test_create_offer_for_seed_request() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post_json("/api/requests/1/offers", charger_offer())
        .await;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["notice"]["title"], "Offer submitted!");

    let offer = &body["data"];
    assert_eq!(offer["requestId"], "1");
    assert_eq!(offer["price"], 75.0);
    assert_eq!(offer["status"], "pending");
    assert_eq!(offer["lenderId"], "current-user-id");
    assert_eq!(offer["lenderName"], "Anonymous");
    assert!(offer["id"].as_str().unwrap().starts_with("offer-"));

    let (_, request) = fixture.get_json("/api/requests/1").await;
    assert_eq!(request["data"]["offersCount"], 4);
    assert_eq!(request["data"]["offersLabel"], "4 offers");

    let (_, offers) = fixture.get_json("/api/requests/1/offers").await;
    assert_eq!(offers["data"].as_array().unwrap().len(), 1);
    let (_, all_offers) = fixture.get_json("/api/offers").await;
    assert_eq!(all_offers["data"][0]["id"], offer["id"]);
}

#[tokio::test]
async fn test_create_offer_with_tags_and_lender_header() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/requests/4/offers"))
        .header("x-lender-id", "student-42")
        .json(&json!({
            "price": "25",
            "description": "Casio fx-991ES, works perfectly.",
            "availableNow": true,
            "canDeliver": true,
            "tags": ["Battery included", "Slightly used"],
            "images": ["data:image/jpeg;base64,/9j/"]
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    let offer = &body["data"];
    assert_eq!(offer["lenderId"], "student-42");
    assert_eq!(offer["lenderName"], "Anonymous");
    assert_eq!(
        offer["tags"],
        json!(["Available now", "Can deliver", "Battery included", "Slightly used"])
    );
    assert_eq!(offer["images"], json!(["data:image/jpeg;base64,/9j/"]));
}

#[tokio::test]
async fn test_invalid_offers_are_rejected() {
    let fixture = TestFixture::new().await;

    for body in [
        json!({ "price": "0", "description": "A long enough description" }),
        json!({ "price": "-1", "description": "A long enough description" }),
        json!({ "price": "ten", "description": "A long enough description" }),
        json!({ "price": "10", "description": "short" }),
        json!({ "price": "10", "description": "z".repeat(501) }),
    ] {
        let (status, resp) = fixture.post_json("/api/requests/1/offers", body).await;
        assert_eq!(status, 400);
        assert_eq!(resp["error"]["code"], "VALIDATION_ERROR");
    }

    let (_, offers) = fixture.get_json("/api/offers").await;
    assert!(offers["data"].as_array().unwrap().is_empty());
    let (_, request) = fixture.get_json("/api/requests/1").await;
    assert_eq!(request["data"]["offersCount"], 3);
}

#[tokio::test]
async fn test_offer_for_unknown_request() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post_json("/api/requests/missing/offers", charger_offer())
        .await;

    assert_eq!(status, 404);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = fixture.get_json("/api/requests/missing/offers").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_offer_target_and_modals() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture
        .post_json("/api/requests/3/offer-target", json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], "Ride to Airport Tomorrow 6 AM");

    let (_, session) = fixture.get_json("/api/session").await;
    assert_eq!(session["data"]["modals"]["createOfferOpen"], true);
    assert_eq!(session["data"]["offerTarget"]["id"], "3");

    let resp = fixture
        .client
        .delete(fixture.url("/api/session/modal"))
        .send()
        .await
        .unwrap();
    let closed: Value = resp.json().await.unwrap();
    assert_eq!(closed["data"]["modals"]["createOfferOpen"], false);

    let (status, _) = fixture
        .post_json("/api/requests/nope/offer-target", json!({}))
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_select_category() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .put(fixture.url("/api/session/category"))
        .json(&json!({ "category": "Electronics" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let (_, feed) = fixture.get_json("/api/feed").await;
    let ids: Vec<&str> = feed["data"]["requests"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, ["1", "4", "6"]);

    let bad = fixture
        .client
        .put(fixture.url("/api/session/category"))
        .json(&json!({ "category": "electronics" }))
        .send()
        .await
        .unwrap();
    assert_eq!(bad.status(), 400);
}

#[tokio::test]
async fn test_offer_tags() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/offer-tags").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["toggles"], json!(["Available now", "Can deliver"]));
    assert_eq!(body["data"]["vocabulary"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_upload_image() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/uploads"))
        .header("content-type", "image/png")
        .body(b"hello".to_vec())
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["data"]["dataUri"], "data:image/png;base64,aGVsbG8=");
    assert_eq!(body["data"]["contentType"], "image/png");
    assert_eq!(body["data"]["size"], 5);

    let empty = fixture
        .client
        .post(fixture.url("/api/uploads"))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), 400);
    let body: Value = empty.json().await.unwrap();
    assert_eq!(body["error"]["code"], "UPLOAD_ERROR");
}

#[tokio::test]
async fn test_revision_increments_on_writes() {
    let fixture = TestFixture::new().await;

    let (_, initial) = fixture.get_json("/api/snapshot").await;
    let initial_revision = initial["data"]["revisionId"].as_i64().unwrap();

    let (_, created) = fixture
        .post_json(
            "/api/requests",
            json!({
                "title": "Umbrella",
                "description": "Monsoon caught me off guard.",
                "category": "Other",
                "price": "15"
            }),
        )
        .await;
    assert_eq!(created["revisionId"].as_i64().unwrap(), initial_revision + 1);

    let request_id = created["data"]["id"].as_str().unwrap();
    let (_, offered) = fixture
        .post_json(
            &format!("/api/requests/{}/offers", request_id),
            json!({ "price": "10", "description": "Spare umbrella, blue." }),
        )
        .await;
    assert_eq!(offered["revisionId"].as_i64().unwrap(), initial_revision + 2);

    let (_, snapshot) = fixture.get_json("/api/snapshot").await;
    assert_eq!(snapshot["data"]["requests"][0]["offersCount"], 1);
    assert_eq!(snapshot["data"]["offers"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unseeded_feed_is_empty() {
    let fixture = TestFixture::with_seed(false).await;

    let (status, body) = fixture.get_json("/api/feed").await;

    assert_eq!(status, 200);
    assert_eq!(body["data"]["visibleCount"], 0);
    assert!(body["data"]["emptyState"].is_object());
}

#[tokio::test]
async fn test_not_found_errors() {
    let fixture = TestFixture::new().await;

    let (status, body) = fixture.get_json("/api/requests/non-existent-id").await;

    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_bodies_use_error_envelope() {
    let fixture = TestFixture::new().await;

    // Price must be sent as typed text
    let (status, body) = fixture
        .post_json(
            "/api/requests/1/offers",
            json!({ "price": 75, "description": "I have a 60W charger available now." }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["revisionId"], 0);

    let resp = fixture
        .client
        .post(fixture.url("/api/requests"))
        .header("content-type", "application/json")
        .body("{\"title\": ")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let resp = fixture
        .client
        .put(fixture.url("/api/session/category"))
        .json(&json!({ "category": 3 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"]["code"], "BAD_REQUEST");

    let (_, offers) = fixture.get_json("/api/offers").await;
    assert!(offers["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_rejected_offer_leaves_session_untouched() {
    let fixture = TestFixture::new().await;

    let (status, _) = fixture
        .post_json(
            "/api/requests/2/offers",
            json!({ "price": "0", "description": "too short" }),
        )
        .await;
    assert_eq!(status, 400);

    let (_, session) = fixture.get_json("/api/session").await;
    assert!(session["data"]["offerTarget"].is_null());
    assert_eq!(session["data"]["modals"]["createOfferOpen"], false);
}

//! Integration tests for the country endpoints

mod common;

use actix_web::{http::header, http::StatusCode, test, web};
use serde_json::{json, Value};

use common::{access_token, bearer, test_state};
use hotel_api::create_app;
use hotel_core::domain::entities::role;

#[actix_web::test]
async fn test_list_is_paged() {
    let app = test::init_service(create_app(web::Data::new(test_state()))).await;

    let req = test::TestRequest::get().uri("/api/country").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
    assert_eq!(body["totalCount"], 3);
    assert_eq!(body["pageNumber"], 1);
    assert_eq!(body["data"][0]["shortName"], "JM");

    let req = test::TestRequest::get()
        .uri("/api/country?pageNumber=2&pageSize=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["name"], "Cayman Island");
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["hasPrev"], true);
    assert_eq!(body["hasNext"], false);
}

#[actix_web::test]
async fn test_malformed_paging_is_bad_request() {
    let app = test::init_service(create_app(web::Data::new(test_state()))).await;

    let req = test::TestRequest::get()
        .uri("/api/country?pageNumber=first")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_version_two_returns_plain_list() {
    let app = test::init_service(create_app(web::Data::new(test_state()))).await;

    let req = test::TestRequest::get()
        .uri("/api/country")
        .insert_header(("api-version", "2.0"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let countries = body.as_array().expect("array body");
    assert_eq!(countries.len(), 3);
    assert_eq!(countries[1]["name"], "Bahamas");
}

#[actix_web::test]
async fn test_get_includes_hotels_and_is_cached() {
    let app = test::init_service(create_app(web::Data::new(test_state()))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/country/1").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers().get("X-Cache").unwrap(), "MISS");
    assert_eq!(
        res.headers().get(header::CACHE_CONTROL).unwrap(),
        "private, max-age=120, must-revalidate"
    );
    let etag = res.headers().get(header::ETAG).unwrap().clone();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["name"], "Jamaica");
    assert_eq!(body["hotels"][0]["name"], "Sandals Resort and Spa");

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/country/1").to_request()).await;
    assert_eq!(res.headers().get("X-Cache").unwrap(), "HIT");

    let req = test::TestRequest::get()
        .uri("/api/country/1")
        .insert_header((header::IF_NONE_MATCH, etag))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
}

#[actix_web::test]
async fn test_invalid_and_missing_ids() {
    let app = test::init_service(create_app(web::Data::new(test_state()))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/country/0").to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/country/999").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[actix_web::test]
async fn test_create_requires_administrator() {
    let state = test_state();
    let user = access_token(&state, "guest@hotels.test", &[role::USER]).await;
    let admin = access_token(&state, "admin@hotels.test", &[role::ADMINISTRATOR]).await;
    let app = test::init_service(create_app(web::Data::new(state))).await;
    let payload = json!({"name": "Trinidad", "shortName": "TT"});

    let req = test::TestRequest::post().uri("/api/country").set_json(&payload).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(res.headers().get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");

    let req = test::TestRequest::post()
        .uri("/api/country")
        .insert_header(bearer(&user))
        .set_json(&payload)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/api/country")
        .insert_header(bearer(&admin))
        .set_json(&payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res.headers().get(header::LOCATION).unwrap().to_str().unwrap().to_string();
    let created: Value = test::read_body_json(res).await;
    assert_eq!(location, format!("/api/country/{}", created["id"]));

    // Round trip through the returned location
    let fetched: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(&location).to_request()).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["name"], "Trinidad");
    assert_eq!(fetched["shortName"], "TT");
    assert_eq!(fetched["hotels"], json!([]));
}

#[actix_web::test]
async fn test_create_rejects_invalid_fields() {
    let state = test_state();
    let admin = access_token(&state, "admin@hotels.test", &[role::ADMINISTRATOR]).await;
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::post()
        .uri("/api/country")
        .insert_header(bearer(&admin))
        .set_json(json!({"name": "Trinidad and Tobago", "shortName": "TTO"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body["details"]["fields"]["shortName"][0],
        "Short Country Name Is Too Long"
    );

    let req = test::TestRequest::post()
        .uri("/api/country")
        .insert_header(bearer(&admin))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"name\": ")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_update_replaces_fields_and_adds_hotels() {
    let state = test_state();
    let user = access_token(&state, "guest@hotels.test", &[role::USER]).await;
    let app = test::init_service(create_app(web::Data::new(state))).await;

    // Prime the cache so the update has to invalidate it
    let before: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/country/2").to_request()).await;
    assert_eq!(before["hotels"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::put()
        .uri("/api/country/2")
        .insert_header(bearer(&user))
        .set_json(json!({
            "name": "The Bahamas",
            "shortName": "BS",
            "hotels": [{"name": "Atlantis", "address": "Paradise Island", "rating": 4.7}]
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/country/2").to_request()).await;
    assert_eq!(res.headers().get("X-Cache").unwrap(), "MISS");
    let after: Value = test::read_body_json(res).await;
    assert_eq!(after["name"], "The Bahamas");
    let hotels = after["hotels"].as_array().unwrap();
    assert_eq!(hotels.len(), 2);
    assert!(hotels.iter().any(|h| h["name"] == "Atlantis" && h["countryId"] == 2));
}

#[actix_web::test]
async fn test_update_missing_country_is_not_found() {
    let state = test_state();
    let user = access_token(&state, "guest@hotels.test", &[role::USER]).await;
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let req = test::TestRequest::put()
        .uri("/api/country/999")
        .insert_header(bearer(&user))
        .set_json(json!({"name": "Atlantis", "shortName": "AT"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri("/api/country/1")
        .set_json(json!({"name": "Jamaica", "shortName": "JM"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_delete_cascades_to_hotels() {
    let state = test_state();
    let admin = access_token(&state, "admin@hotels.test", &[role::ADMINISTRATOR]).await;
    let app = test::init_service(create_app(web::Data::new(state))).await;

    // Cached before the delete
    let res = test::call_service(&app, test::TestRequest::get().uri("/api/hotel/1").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri("/api/country/1")
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    for uri in ["/api/country/1", "/api/hotel/1"] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", uri);
    }

    let req = test::TestRequest::delete()
        .uri("/api/country/1")
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_update_refreshes_cached_hotels() {
    let state = test_state();
    let user = access_token(&state, "guest@hotels.test", &[role::USER]).await;
    let app = test::init_service(create_app(web::Data::new(state))).await;

    let before: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/api/hotel/1").to_request()).await;
    assert_eq!(before["country"]["name"], "Jamaica");

    let req = test::TestRequest::put()
        .uri("/api/country/1")
        .insert_header(bearer(&user))
        .set_json(json!({"name": "Renamed", "shortName": "RN"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let res = test::call_service(&app, test::TestRequest::get().uri("/api/hotel/1").to_request()).await;
    assert_eq!(res.headers().get("X-Cache").unwrap(), "MISS");
    let after: Value = test::read_body_json(res).await;
    assert_eq!(after["country"]["name"], "Renamed");
    assert_eq!(after["country"]["shortName"], "RN");
}

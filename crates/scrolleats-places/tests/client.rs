//! Integration tests for `PlacesClient` and the single-lookup aggregator
//! operations using wiremock HTTP mocks.

use scrolleats_places::{GeocodeQuery, PlacesClient, PlacesError, SearchAggregator};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> PlacesClient {
    PlacesClient::with_base_url(&format!("{}/api", server.uri()), 10)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn geocode_address_returns_coordinates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .and(query_param("address", "Austin, TX"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "lat": 30.2672, "lng": -97.7431 })),
        )
        .mount(&server)
        .await;

    let coords = test_client(&server)
        .geocode(&GeocodeQuery::Address("Austin, TX".to_owned()))
        .await
        .expect("should geocode");
    assert!((coords.latitude - 30.2672).abs() < 1e-9);
    assert!((coords.longitude + 97.7431).abs() < 1e-9);
}

#[tokio::test]
async fn geocode_place_id_uses_place_id_param() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .and(query_param("placeId", "ChIJ123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "lat": 1.0, "lng": 2.0 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let coords = test_client(&server)
        .geocode(&GeocodeQuery::PlaceId("ChIJ123".to_owned()))
        .await
        .expect("should geocode");
    assert_eq!(coords.longitude, 2.0);
}

#[tokio::test]
async fn geocode_not_found_maps_to_location_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": "Location not found. Please try a different search term.",
            "details": "ZERO_RESULTS"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .geocode(&GeocodeQuery::Address("nowhere at all".to_owned()))
        .await
        .unwrap_err();
    match err {
        PlacesError::LocationNotFound { details, message } => {
            assert_eq!(details, "ZERO_RESULTS");
            assert!(message.starts_with("Location not found"));
        }
        other => panic!("expected LocationNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn geocode_blank_query_is_rejected() {
    let server = MockServer::start().await;
    let err = test_client(&server)
        .geocode(&GeocodeQuery::Address("  ".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Validation(_)));
}

#[tokio::test]
async fn geocode_server_error_is_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/geocode"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "error": "Failed to fetch geocoding data"
        })))
        .mount(&server)
        .await;

    let err = test_client(&server)
        .geocode(&GeocodeQuery::Address("Paris".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Http(_)));
}

#[tokio::test]
async fn autocomplete_returns_predictions() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/autocomplete"))
        .and(query_param("input", "San F"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {
                "place_id": "sf",
                "description": "San Francisco, CA, USA",
                "structured_formatting": { "main_text": "San Francisco", "secondary_text": "CA, USA" }
            },
            { "place_id": "sfe", "description": "San Fernando, CA, USA" }
        ])))
        .mount(&server)
        .await;

    let predictions = test_client(&server)
        .autocomplete("San F")
        .await
        .expect("should parse predictions");
    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].place_id, "sf");
    assert_eq!(
        predictions[0]
            .structured_formatting
            .as_ref()
            .map(|s| s.main_text.as_str()),
        Some("San Francisco")
    );
    assert!(predictions[1].structured_formatting.is_none());
}

#[tokio::test]
async fn malformed_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/autocomplete"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = test_client(&server).autocomplete("x").await.unwrap_err();
    assert!(matches!(err, PlacesError::Deserialize { .. }));
}

#[tokio::test]
async fn aggregator_autocomplete_swallows_failures() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/autocomplete"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregator = SearchAggregator::new(test_client(&server));
    assert!(aggregator.autocomplete("Lon").await.is_empty());
    assert!(aggregator.autocomplete("").await.is_empty());
}

#[tokio::test]
async fn place_details_normalizes_and_caches() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/details/abc"))
        .and(query_param(
            "fields",
            "name,formatted_address,formatted_phone_number,website,opening_hours,rating,user_ratings_total,photos,types,price_level,geometry",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": {
                "name": "Trattoria",
                "formatted_address": "10 Via Roma, Chicago, IL 60601, USA",
                "geometry": { "location": { "lat": 41.88, "lng": -87.62 } },
                "rating": 4.6,
                "user_ratings_total": 321,
                "price_level": 3,
                "types": ["italian_restaurant"],
                "opening_hours": {
                    "open_now": false,
                    "weekday_text": ["Monday: 11:00 AM – 10:00 PM"]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let aggregator = SearchAggregator::new(test_client(&server));
    let first = aggregator.place_details("abc").await.expect("details");
    assert_eq!(first.name, "Trattoria");
    assert_eq!(first.city, "Chicago");
    assert_eq!(first.zip_code, "60601");
    assert_eq!(first.review_count, 321);
    assert_eq!(first.hours.len(), 1);
    assert_eq!(first.images.len(), 1);

    let second = aggregator.place_details("abc").await.expect("cached details");
    assert_eq!(first, second);
}

#[tokio::test]
async fn place_details_not_ok_is_upstream_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/details/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "NOT_FOUND"
        })))
        .mount(&server)
        .await;

    let err = SearchAggregator::new(test_client(&server))
        .place_details("gone")
        .await
        .unwrap_err();
    assert!(matches!(err, PlacesError::Upstream { ref status, .. } if status == "NOT_FOUND"));
}

#[tokio::test]
async fn place_reviews_returns_reviews_or_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/places/reviews/good"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "OK",
            "result": {
                "reviews": [{
                    "author_name": "Sam",
                    "rating": 5,
                    "text": "Great noodles",
                    "relative_time_description": "a week ago",
                    "time": 1_700_000_000
                }]
            }
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/places/reviews/bad"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let aggregator = SearchAggregator::new(test_client(&server));
    let reviews = aggregator.place_reviews("good").await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].author_name, "Sam");
    assert!((reviews[0].rating - 5.0).abs() < f64::EPSILON);

    assert!(aggregator.place_reviews("bad").await.is_empty());
}

use super::*;

fn test_client(base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url(base_url, 15).expect("client construction should not fail")
}

#[test]
fn build_url_appends_path_under_base() {
    let client = test_client("http://localhost:3001/api");
    let url = client
        .build_url(&["places", "nearby"], &[("latitude", "1.5")])
        .expect("url");
    assert_eq!(
        url.as_str(),
        "http://localhost:3001/api/places/nearby?latitude=1.5"
    );
}

#[test]
fn build_url_tolerates_trailing_slash() {
    let client = test_client("http://localhost:3001/api/");
    let url = client.build_url(&["health"], &[]).expect("url");
    assert_eq!(url.as_str(), "http://localhost:3001/api/health");
}

#[test]
fn build_url_encodes_place_id_segment() {
    let client = test_client("http://localhost:3001/api");
    let url = client
        .build_url(&["places", "details", "a/b c"], &[])
        .expect("url");
    assert_eq!(
        url.as_str(),
        "http://localhost:3001/api/places/details/a%2Fb%20c"
    );
}

#[test]
fn photo_url_goes_through_proxy() {
    let client = test_client("http://localhost:3001/api");
    let url = client.photo_url("ref&1", 800);
    assert_eq!(
        url,
        "http://localhost:3001/api/places/photo?maxwidth=800&photoreference=ref%261"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = PlacesClient::with_base_url("not a url", 15).unwrap_err();
    assert!(matches!(err, PlacesError::InvalidBaseUrl(_)));
}

use axum::{
    body::Body,
    http::{StatusCode, header},
    response::Response,
};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "want status 200 OK, got {}",
        response.status()
    );
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let got = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .expect("content-type header missing or not text");

    assert_eq!(got, content_type);
}

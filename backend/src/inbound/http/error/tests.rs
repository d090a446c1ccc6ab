//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("denied"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("taken"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn body_text(response: HttpResponse) -> String {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted() {
    let err = Error::internal("database file is corrupt").with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&err);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_text(response).await;
    assert!(body.contains("Internal server error"));
    assert!(!body.contains("corrupt"));
}

#[rstest]
#[actix_web::test]
async fn not_found_page_shows_message_and_trace_header() {
    let err = Error::not_found("Post id 3 doesn't exist.").with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&err);

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .expect("trace-id header")
        .to_str()
        .expect("ascii header");
    assert_eq!(header, TRACE_ID);
    assert!(
        response
            .headers()
            .get(actix_web::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html"))
    );
    let body = body_text(response).await;
    assert!(body.contains("Post id 3 doesn't exist."));
}

#[rstest]
#[actix_web::test]
async fn missing_trace_id_omits_header() {
    let response = ResponseError::error_response(&Error::forbidden("nope"));
    assert!(response.headers().get(TRACE_ID_HEADER).is_none());
}

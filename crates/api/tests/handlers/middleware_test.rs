use axum::http::HeaderMap;
use bookline_api::middleware::auth;
use bookline_core::errors::BookingError;

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = BookingError::NotFound("Resource not found".to_string());

    let response = bookline_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = BookingError::Validation("Invalid input".to_string());

    let response = bookline_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_conflict() {
    // Conflicts map to their own status code, distinct from validation
    let error = BookingError::Conflict("Slot already booked".to_string());

    let response = bookline_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = BookingError::Authentication("Missing user id".to_string());

    let response = bookline_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = BookingError::Database(eyre::eyre!("Database error"));

    let response = bookline_api::middleware::error_handling::map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = BookingError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = bookline_api::middleware::error_handling::map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[test]
fn test_owner_id_from_headers_valid() {
    let mut headers = HeaderMap::new();
    headers.insert(auth::USER_ID_HEADER, "42".parse().unwrap());

    let owner_id = auth::owner_id_from_headers(&headers).unwrap();

    assert_eq!(owner_id, 42);
}

#[test]
fn test_owner_id_from_headers_missing() {
    let headers = HeaderMap::new();

    let err = auth::owner_id_from_headers(&headers).unwrap_err();

    assert!(matches!(err, BookingError::Authentication(_)));
}

#[test]
fn test_owner_id_from_headers_not_numeric() {
    let mut headers = HeaderMap::new();
    headers.insert(auth::USER_ID_HEADER, "alice".parse().unwrap());

    let err = auth::owner_id_from_headers(&headers).unwrap_err();

    assert!(matches!(err, BookingError::Authentication(_)));
}

#[tokio::test]
async fn test_health_routes() {
    let ctx = TestContext::new();
    let app = bookline_api::routes::health::routes().with_state(ctx.build_state());
    let server = axum_test::TestServer::new(app).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let response = server.get("/version").await;
    response.assert_status_ok();
}

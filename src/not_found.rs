//! The fallback response for requests that do not match any route.

use axum::response::{IntoResponse, Response};

use crate::Error;

/// Respond with 404 and a JSON error body.
pub async fn get_404_not_found() -> Response {
    Error::NotFound.into_response()
}

#[cfg(test)]
mod not_found_tests {
    use axum::http::StatusCode;
    use serde_json::Value;

    use crate::test_utils::get_test_server;

    #[tokio::test]
    async fn unknown_route_returns_json_not_found() {
        let server = get_test_server();

        let response = server.get("/api/does_not_exist").await;

        assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "the requested resource could not be found");
    }
}

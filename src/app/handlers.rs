use crate::app::server::AppState;
use crate::utils::error::CheckoutError;
use axum::body::Body;
use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::Response;
use percent_encoding::percent_decode_str;
use serde::Serialize;

const ADDRESS_PREFIX: &str = "/address/";

pub const AUTH_HEADER: &str = "Authentication-Bearer";

pub const NOT_FOUND_MESSAGE: &str = "The requested zipcode was not found.";
pub const INVALID_CREDENTIAL_MESSAGE: &str = "Invalid or missing store credential.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error.";

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
}

/// Builds a JSON response with explicit `Content-Type` and `Content-Length`.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => raw_json_response(status, bytes),
        Err(error) => {
            let error = CheckoutError::from(error);
            tracing::error!(
                category = ?error.category(),
                "Failed to serialize response body: {}",
                error
            );
            let fallback = ErrorBody {
                error: INTERNAL_ERROR_MESSAGE,
            };
            let bytes = serde_json::to_vec(&fallback).unwrap_or_default();
            raw_json_response(error.status_code(), bytes)
        }
    }
}

fn raw_json_response(status: StatusCode, bytes: Vec<u8>) -> Response {
    let length = bytes.len();
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));

    response
}

fn error_response(error: &CheckoutError) -> Response {
    let message = match error {
        CheckoutError::InvalidCredential { .. } => INVALID_CREDENTIAL_MESSAGE,
        _ => INTERNAL_ERROR_MESSAGE,
    };
    json_response(error.status_code(), &ErrorBody { error: message })
}

/// Percent-decodes the zipcode segment of `uri`, replacing invalid UTF-8.
fn lossy_zipcode(uri: &Uri) -> String {
    let segment = uri.path().strip_prefix(ADDRESS_PREFIX).unwrap_or_default();
    percent_decode_str(segment).decode_utf8_lossy().into_owned()
}

/// `GET /address/{zipcode}`
///
/// Returns the address for the zipcode in the shape selected by the calling
/// store, 404 when nothing matches and 401 when the bearer token does not
/// identify a store.
pub async fn get_address(
    State(state): State<AppState>,
    zipcode: std::result::Result<Path<String>, PathRejection>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let zipcode = match zipcode {
        Ok(Path(zipcode)) => zipcode,
        Err(rejection) => {
            // 非 UTF-8 的路徑仍交給 sanitizer，只保留數字
            tracing::debug!("Decoding zipcode lossily: {}", rejection);
            lossy_zipcode(&uri)
        }
    };

    address_response(&state, &zipcode, &headers).await
}

/// `GET /address/` has an empty zipcode, which matches nothing.
pub async fn get_address_without_zipcode(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    address_response(&state, "", &headers).await
}

async fn address_response(state: &AppState, zipcode: &str, headers: &HeaderMap) -> Response {
    // 缺少標頭時以空 token 處理，交由 resolver 拒絕
    let token = headers
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    match state.checkout.address_for(zipcode, token).await {
        Ok(Some(address)) => json_response(StatusCode::OK, &address),
        Ok(None) => json_response(
            StatusCode::NOT_FOUND,
            &ErrorBody {
                error: NOT_FOUND_MESSAGE,
            },
        ),
        Err(error) => {
            tracing::warn!(
                category = ?error.category(),
                "Rejected address request: {}",
                error
            );
            error_response(&error)
        }
    }
}

use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use serde::Serialize;
use serde_json::json;

pub type ResultResp = Result<Response, ServerError>;

/// Serialize a payload as a JSON response with the given status.
pub fn json_response<T: Serialize>(status: u16, payload: &T) -> ResultResp {
    let body = serde_json::to_string(payload).map_err(|_| ServerError::InternalError)?;

    let resp = ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap();

    Ok(resp)
}

/// 204, no body.
pub fn no_content_response() -> ResultResp {
    let resp = ResponseBuilder::new()
        .status(204)
        .body(Body::empty())
        .unwrap();
    Ok(resp)
}

/// Convert a ServerError into a JSON error response.
pub fn error_to_response(err: ServerError) -> Response {
    let (status, detail) = match &err {
        ServerError::NotFound => (404, "Not Found".to_string()),
        ServerError::BadRequest(msg) => (400, msg.clone()),
        ServerError::ServiceUnavailable(msg) => (503, msg.clone()),
        ServerError::DbError(msg) => (500, msg.clone()),
        ServerError::InternalError => (500, "Internal Server Error".to_string()),
    };

    let body = json!({ "detail": detail }).to_string();

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

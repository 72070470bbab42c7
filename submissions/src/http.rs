use lambda_http::{Body, Error, Response};
use serde_json::{json, Value};

pub fn json_response(status: u16, body: &Value) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(status)
        .header("content-type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(serde_json::to_string(body)?.into())
        .map_err(Box::new)?)
}

pub fn error_response(status: u16, message: &str) -> Result<Response<Body>, Error> {
    json_response(status, &json!({ "error": message }))
}

pub fn internal_error() -> Result<Response<Body>, Error> {
    error_response(500, "Internal server error")
}

/// `Ok(None)` when the request carried no body.
pub fn parse_json_body(body: &Body) -> serde_json::Result<Option<Value>> {
    match body {
        Body::Text(s) => serde_json::from_str(s).map(Some),
        Body::Binary(b) => serde_json::from_slice(b).map(Some),
        Body::Empty => Ok(None),
    }
}

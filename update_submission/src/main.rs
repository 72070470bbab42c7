use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use serde_json::Value;
use submissions::clock::iso_timestamp;
use submissions::http::{error_response, internal_error, json_response, parse_json_body};
use submissions::{Clock, SystemClock};
use tracing::{debug, error, info};
use update_submission::{plan_update, update_submission, UpdateOutcome};

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let params = event.path_parameters();
    let id = match params.first("id") {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => return error_response(400, "submissionId is required"),
    };
    let body = match parse_json_body(event.body()) {
        Ok(Some(Value::Object(body))) => body,
        Ok(_) => return error_response(400, "Expected a JSON object body."),
        Err(e) => {
            info!("error parsing body: {}", e);
            return error_response(400, &e.to_string());
        }
    };

    let plan = match plan_update(&body, &iso_timestamp(SystemClock.now())) {
        Ok(plan) => plan,
        Err(e) => return error_response(400, &e.to_string()),
    };
    debug!("update_submission {} {:?}", id, plan);

    match update_submission(&id, plan).await {
        Ok(UpdateOutcome::Updated(attributes)) => json_response(200, &Value::Object(attributes)),
        Ok(UpdateOutcome::NotFound) => error_response(404, "Submission to update not found"),
        Err(e) => {
            error!("error updating submission {}: {}", id, e);
            internal_error()
        }
    }
}

const TRACE_DEBUG: &str = "TRACE_DEBUG";

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(match std::env::var(TRACE_DEBUG) {
            Ok(_) => tracing::Level::DEBUG,
            Err(_) => tracing::Level::INFO
        })
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    run(service_fn(function_handler)).await
}

use create_submission::{build_submission, create_submission, CreateSubmissionRequest};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use submissions::http::{error_response, internal_error, json_response, parse_json_body};
use submissions::{SystemClock, UuidGenerator};
use tracing::{debug, error, info};

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let body = match parse_json_body(event.body()) {
        Ok(Some(body)) => body,
        Ok(None) => return error_response(400, "Expected a request body."),
        Err(e) => {
            info!("error parsing body: {}", e);
            return error_response(400, &e.to_string());
        }
    };
    let request: CreateSubmissionRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(e) => {
            info!("error reading submission: {}", e);
            return error_response(400, &e.to_string());
        }
    };
    debug!("create_submission {:?}", request);

    let submission = match build_submission(request, &SystemClock, &UuidGenerator) {
        Ok(submission) => submission,
        Err(e) => return error_response(400, &e.to_string()),
    };

    match create_submission(&submission).await {
        Ok(()) => json_response(201, &submission.to_json()?),
        Err(e) => {
            error!("error creating submission: {}", e);
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

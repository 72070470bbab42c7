use delete_submission::{delete_submission, deleted_body, DeleteOutcome};
use lambda_http::{run, service_fn, Body, Error, Request, RequestExt, Response};
use submissions::http::{error_response, internal_error, json_response};
use tracing::{error, info};

async fn function_handler(event: Request) -> Result<Response<Body>, Error> {
    let params = event.path_parameters();
    let id = match params.first("id") {
        Some(id) if !id.is_empty() => id,
        _ => return error_response(400, "submissionId is required"),
    };

    match delete_submission(id).await {
        Ok(DeleteOutcome::Deleted) => {
            info!("deleted submission {}", id);
            json_response(200, &deleted_body(id))
        }
        Ok(DeleteOutcome::NotFound) => error_response(404, "Submission not found"),
        Err(e) => {
            error!("error deleting submission {}: {}", id, e);
            internal_error()
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    run(service_fn(function_handler)).await
}

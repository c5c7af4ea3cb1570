use rocket::{Request, catch, serde::json::Json};
use shared::{ErrorCode, ErrorResponse};

#[catch(400)]
pub fn bad_request(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ErrorCode::InvalidInput, "Invalid request"))
}

#[catch(404)]
pub fn not_found(req: &Request) -> Json<ErrorResponse> {
    let error_msg = match req.uri().path().segments().nth(1) {
        Some("polls") | Some("delete-poll") => "Poll not found",
        _ => "The requested resource was not found.",
    };
    Json(ErrorResponse::new(ErrorCode::NotFound, error_msg))
}

#[catch(422)]
pub fn unprocessable_entity(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ErrorCode::InvalidInput, "Invalid request"))
}

#[catch(500)]
pub fn internal_error(_req: &Request) -> Json<ErrorResponse> {
    Json(ErrorResponse::new(ErrorCode::SystemError, "An internal server error occurred."))
}

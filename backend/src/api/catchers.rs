use crate::models::ErrorResponse;
use rocket::catch;
use rocket::http::Status;
use rocket::Request;

// Requests Rocket rejects before a handler runs (unparseable bodies, unknown
// paths) still answer with the JSON error shape.

#[catch(400)]
pub fn bad_request(req: &Request) -> ErrorResponse {
    ErrorResponse::new(
        Status::BadRequest,
        "Invalid search request",
        format!("Malformed request to {}", req.uri().path()),
    )
}

#[catch(422)]
pub fn unprocessable_entity(req: &Request) -> ErrorResponse {
    ErrorResponse::new(
        Status::UnprocessableEntity,
        "Invalid search request",
        format!("Request body for {} could not be parsed", req.uri().path()),
    )
}

#[catch(404)]
pub fn not_found(req: &Request) -> ErrorResponse {
    ErrorResponse::new(
        Status::NotFound,
        "Not found",
        format!("No route for {}", req.uri().path()),
    )
}

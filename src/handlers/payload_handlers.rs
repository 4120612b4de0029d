use actix_web::{HttpResponse, Responder, Result, web};
use log::debug;

use crate::payload::{build_payload, payload_warning};
use crate::structs::payload_request::PayloadRequest;
use crate::structs::qr_request::{PayloadResponse, ValidationFailure};
use crate::validation::validate;

/// Validate raw form input and return the string that would be encoded.
pub async fn create_payload(web::Json(req): web::Json<PayloadRequest>) -> Result<impl Responder> {
    let input = match validate(req) {
        Ok(input) => input,
        Err(errors) => {
            debug!("Rejected payload input: {} field error(s)", errors.len());
            return Ok(HttpResponse::BadRequest().json(ValidationFailure { errors }));
        }
    };

    Ok(HttpResponse::Ok().json(PayloadResponse {
        payload: build_payload(&input),
        warning: payload_warning(&input),
    }))
}

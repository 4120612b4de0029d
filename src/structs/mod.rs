pub mod payload_request;
pub mod qr_request;

//! Request routing and the request/response types handlers work with.

mod handler;
pub(crate) mod request;
mod response;
mod router;

pub use handler::Handler;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;

pub(crate) use router::Route;

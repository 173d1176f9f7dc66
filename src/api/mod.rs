//! API module for HTTP handlers.
//!
//! This module contains the route table, the handlers, identifier
//! validation and response formatting.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod reply;
pub mod router;
pub mod validate;

pub use dto::{AddItemRequest, TodoResponse};
pub use error::ApiError;
pub use handlers::AppState;
pub use reply::RequestContext;
pub use router::{Operation, PathShape, create_router, dispatch, resolve, with_middleware};
pub use validate::validate_id;

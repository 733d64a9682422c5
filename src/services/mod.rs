//! # Service wrappers
//!
//! One wrapper per resource, one method per API action. Each method issues
//! exactly one request through the injected [`RequestExecutor`] and returns the
//! raw [`ApiResponse`](crate::http::ApiResponse). Inputs are forwarded without
//! validation and status codes are never interpreted here.

pub mod pet;
pub mod store;
pub mod user;

pub use pet::{PetService, UploadImage};
pub use store::StoreService;
pub use user::UserService;

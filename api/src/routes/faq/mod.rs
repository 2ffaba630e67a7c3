pub mod collection_route;
pub mod context_request;
pub mod context_response;
pub mod context_route;
pub mod delete_route;
pub mod sync_route;

pub mod response;
pub mod validation;

pub use response::{ApiError, ApiResponse, DocumentJson, hex_object_ids};
pub use validation::is_resource_id;

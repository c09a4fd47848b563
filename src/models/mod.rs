pub mod assignments;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod feedbacks;
pub mod stats;
pub mod submissions;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;
pub use common::startup::AppStartTime;

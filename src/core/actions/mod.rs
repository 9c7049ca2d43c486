pub mod cancellation;
pub mod fill_field;
pub mod project_field;

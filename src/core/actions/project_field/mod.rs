pub mod ports;
pub mod project_field;

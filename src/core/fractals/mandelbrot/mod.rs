pub mod escape_time;
pub mod greyscale_map;

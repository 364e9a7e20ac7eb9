pub mod core_api;
pub mod json5_loose;
pub mod json_io;
pub mod model;
pub mod path;
pub mod repository;
pub mod rules;
pub mod validation;
pub mod value;

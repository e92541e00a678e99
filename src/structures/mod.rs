pub mod errors;
pub mod model;
pub mod responses;

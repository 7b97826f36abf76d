pub mod estimate;
pub mod links;
pub mod validate;

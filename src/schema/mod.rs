pub mod locale;
pub mod node;
pub mod segment;

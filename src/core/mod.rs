pub mod decorate;
pub mod emotion;
pub mod parser;
pub mod speaker;

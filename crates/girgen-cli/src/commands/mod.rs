pub mod dump;
pub mod generate;
pub mod json;

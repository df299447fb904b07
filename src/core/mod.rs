pub mod admin;
pub mod submit;
pub mod visitor;

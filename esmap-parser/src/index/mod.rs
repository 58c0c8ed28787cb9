//! Document model and parsing for index configuration documents.

pub mod authoring;
pub mod error;
pub mod model;
pub mod parse;
pub mod path;

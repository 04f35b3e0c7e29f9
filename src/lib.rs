// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod diagram;
pub mod document;
pub mod fetch;
pub mod json_schema;
pub mod schema;

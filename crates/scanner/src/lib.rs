#![allow(clippy::manual_range_contains)]
pub mod identity;
pub mod moviehash;
pub mod parser;
pub mod walk;

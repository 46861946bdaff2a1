pub mod analysis;
pub mod anime;
pub mod config;
pub mod document;
pub mod fetch;
pub mod parse;
pub mod record;

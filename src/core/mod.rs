pub mod config;
pub mod convert;
pub mod document;
pub mod feed;
pub mod pipeline;
pub mod report;
pub mod writer;

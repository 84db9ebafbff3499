pub mod config;
pub mod content;
pub mod error;
pub mod logger;
pub mod page_processor;
pub mod post_repository;
pub mod query_string;
pub mod router;
pub mod server;
pub mod text_utils;
pub mod util;
pub mod view;
#[cfg(test)]
mod test_data;

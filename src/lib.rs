pub mod bootstrap;
pub mod codec;
pub mod config;
pub mod content;
pub mod error;
pub mod index_builder;
pub mod logger;
pub mod publisher;
pub mod scaffold;
pub mod text_utils;
pub mod view;
#[cfg(test)]
mod test_data;

//! Model identifiers.

pub mod openai;

pub use openai::OpenAiModel;

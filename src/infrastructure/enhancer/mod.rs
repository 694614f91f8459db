pub mod openai;

pub use openai::OpenAiTextEnhancer;

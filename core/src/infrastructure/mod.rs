pub mod llm;
pub mod media;

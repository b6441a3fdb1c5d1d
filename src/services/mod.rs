pub mod llm_service;
pub mod prompts;
pub mod question_service;
pub mod warn_writer;

pub use llm_service::{GenerationParams, LlmService, TextGenerator};
pub use question_service::QuestionService;
pub use warn_writer::WarnWriter;

pub mod explanation;
pub mod loaders;
pub mod question;
pub mod request;
pub mod response;

pub use explanation::ExplanationSections;
pub use loaders::{load_all_task_files, load_task_file};
pub use question::{Difficulty, Provenance, QuestionOption, QuestionRecord, QuestionType, SimilarQuestionRecord};
pub use request::{AnalyzeRequest, ExplainRequest, GenerateRequest, SimilarRequest, TaskFile, TaskKind, WrongQuestion};
pub use response::{
    AnalysisReport, AnalysisResponse, ExplanationResponse, GeneratedFrom, GeneratedQuestionsResponse,
    HealthStatus, SimilarQuestionsResponse,
};

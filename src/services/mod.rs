pub mod json_recovery;
pub mod language_model;
pub mod mcq_generation;
pub mod pdf_extractor;
pub mod quiz_pipeline;
pub mod skill_extraction;
pub mod skill_normalizer;

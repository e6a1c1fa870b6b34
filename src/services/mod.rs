pub mod collaborators;
pub mod report_writer;
pub mod research_service;

pub use collaborators::{EvidenceSource, LanguageModel};
pub use report_writer::ReportWriter;
pub use research_service::{parse_confidence, ResearchService, NEUTRAL_CONFIDENCE};

// Records exchanged between pipeline stages.

pub mod candidate;
pub mod job_description;
pub mod report;
pub mod sections;

pub use candidate::CandidateRecord;
pub use job_description::JobDescriptionRecord;
pub use report::AtsReport;
pub use sections::{SectionHeader, SectionMap};

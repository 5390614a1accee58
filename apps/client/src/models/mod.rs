pub mod job_description;
pub mod outcome;
pub mod resume;
pub mod targeting;
pub mod variant;

pub use job_description::JobDescription;
pub use outcome::{ApplicationOutcome, OutcomeStatus};
pub use resume::Resume;
pub use targeting::{Persona, Platform};
pub use variant::ResumeVariant;

//! Job application intake, scoring, and regional ranking.
//!
//! Submissions pass through the intake guard before they are stored. Scoring is a pure function
//! of an applicant's subjects, certifications, and work history; ranking groups scored applicants
//! by region and orders each group by score and tiebreaker.

pub mod domain;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Applicant, ApplicantId, ApplicationSubmission, Experience, Grade, Region, Subject,
};
pub use ranking::{rank_by_region, RankedApplicant, RegionGroup, RegionRankings};
pub use repository::{
    contact_match, ApplicantSummary, ApplicationRecord, ApplicationRepository, ContactMatch,
    RepositoryError,
};
pub use router::application_router;
pub use scoring::{compute_score, ScoreBand, ScoreComponent, ScoreFactor, ScoreOutcome};
pub use service::{ApplicationDetails, IntakeService, IntakeServiceError};
pub use validation::{FieldError, IntakeGuard, IntakePolicy, IntakeRejection, IntakeViolation};

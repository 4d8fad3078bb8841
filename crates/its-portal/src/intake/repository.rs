use serde::{Deserialize, Serialize};

use super::domain::{Applicant, ApplicantId, Experience, Region, Subject};

/// Repository record containing the applicant with their subjects and work history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub applicant: Applicant,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

/// Which contact detail collided with an existing application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMatch {
    Email(ApplicantId),
    Phone(ApplicantId),
}

/// Storage abstraction so the service can be exercised without a hosted database.
pub trait ApplicationRepository: Send + Sync {
    /// Stores a new record. Email and phone must be unique across stored applications; the check
    /// and the write happen atomically, failing with `ContactTaken`.
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    /// Applicants ordered newest first, optionally limited to one region.
    fn fetch_applicants(&self, region: Option<Region>) -> Result<Vec<Applicant>, RepositoryError>;
    fn fetch_subjects(&self, id: &ApplicantId) -> Result<Vec<Subject>, RepositoryError>;
    fn fetch_experiences(&self, id: &ApplicantId) -> Result<Vec<Experience>, RepositoryError>;
    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn persist_score(&self, id: &ApplicantId, score: u8) -> Result<(), RepositoryError>;
    /// Email matches take precedence over phone matches.
    fn find_by_contact(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<ContactMatch>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("contact details already belong to another application")]
    ContactTaken(ContactMatch),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Finds the first stored applicant sharing the email (case-insensitive) or phone, email first.
pub fn contact_match<'a>(
    applicants: impl IntoIterator<Item = &'a Applicant> + Clone,
    email: &str,
    phone: &str,
) -> Option<ContactMatch> {
    let email = email.trim();
    let phone = phone.trim();
    applicants
        .clone()
        .into_iter()
        .find(|applicant| applicant.email.eq_ignore_ascii_case(email))
        .map(|applicant| ContactMatch::Email(applicant.id.clone()))
        .or_else(|| {
            applicants
                .into_iter()
                .find(|applicant| applicant.phone == phone)
                .map(|applicant| ContactMatch::Phone(applicant.id.clone()))
        })
}

/// Row shown in the admin list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantSummary {
    pub id: ApplicantId,
    pub name: String,
    pub email: String,
    pub region: Region,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

impl From<&Applicant> for ApplicantSummary {
    fn from(applicant: &Applicant) -> Self {
        Self {
            id: applicant.id.clone(),
            name: applicant.name.clone(),
            email: applicant.email.clone(),
            region: applicant.region,
            score: applicant.score,
            submitted_at: applicant.submitted_at,
        }
    }
}

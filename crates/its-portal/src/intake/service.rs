use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::domain::{Applicant, ApplicantId, ApplicationSubmission, Region};
use super::ranking::{rank_by_region, RegionRankings};
use super::repository::{
    ApplicantSummary, ApplicationRecord, ApplicationRepository, ContactMatch, RepositoryError,
};
use super::scoring::{compute_score, is_high_value_qualification, ScoreBand, ScoreOutcome};
use super::validation::{FieldError, IntakeGuard, IntakeRejection};

/// Service composing the intake guard, repository, and scorer.
pub struct IntakeService<R> {
    guard: Arc<IntakeGuard>,
    repository: Arc<R>,
    reference_date: Option<NaiveDate>,
}

static APPLICANT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_applicant_id() -> ApplicantId {
    let id = APPLICANT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicantId(format!("its-{id:06}"))
}

/// Full view of one application for the admin detail page.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationDetails {
    #[serde(flatten)]
    pub record: ApplicationRecord,
    pub outcome: ScoreOutcome,
    pub band: ScoreBand,
    pub high_value_qualifications: Vec<String>,
}

impl<R> IntakeService<R>
where
    R: ApplicationRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_guard(IntakeGuard::default(), repository)
    }

    pub fn with_guard(guard: IntakeGuard, repository: Arc<R>) -> Self {
        Self {
            guard: Arc::new(guard),
            repository,
            reference_date: None,
        }
    }

    /// Pin the date used for open-ended experience instead of today.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }

    fn today(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    /// Validate, store, and score a new application.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, IntakeServiceError> {
        if let Err(rejection) = self.guard.check(&submission) {
            info!(
                violations = rejection.violations.len(),
                "application rejected at intake"
            );
            return Err(rejection.into());
        }

        if let Some(existing) = self
            .repository
            .find_by_contact(&submission.email, &submission.phone)?
        {
            return Err(duplicate_contact(existing));
        }

        let ApplicationSubmission {
            name,
            address,
            phone,
            email,
            date_of_birth,
            region,
            certification,
            subjects,
            experiences,
        } = submission;

        let applicant = Applicant {
            id: next_applicant_id(),
            name: name.trim().to_string(),
            address: address.trim().to_string(),
            phone: phone.trim().to_string(),
            email: email.trim().to_string(),
            date_of_birth,
            region,
            certification,
            score: None,
            submitted_at: Utc::now(),
        };

        // A concurrent submission may have claimed the contact since the lookup above.
        let mut stored = self
            .repository
            .insert(ApplicationRecord {
                applicant,
                subjects,
                experiences,
            })
            .map_err(|err| match err {
                RepositoryError::ContactTaken(existing) => duplicate_contact(existing),
                other => other.into(),
            })?;

        let outcome = compute_score(
            &stored.applicant,
            &stored.subjects,
            &stored.experiences,
            self.today(),
        );
        stored.applicant.score = Some(outcome.score);

        match self
            .repository
            .persist_score(&stored.applicant.id, outcome.score)
        {
            Ok(()) => info!(
                applicant = %stored.applicant.id,
                region = %stored.applicant.region,
                score = outcome.score,
                "application accepted"
            ),
            Err(err) => warn!(
                applicant = %stored.applicant.id,
                error = %err,
                "application stored but score could not be persisted"
            ),
        }

        Ok(stored)
    }

    /// Applicants newest first, optionally limited to one region.
    pub fn list(&self, region: Option<Region>) -> Result<Vec<ApplicantSummary>, IntakeServiceError> {
        let applicants = self.repository.fetch_applicants(region)?;
        Ok(applicants.iter().map(ApplicantSummary::from).collect())
    }

    pub fn details(&self, id: &ApplicantId) -> Result<ApplicationDetails, IntakeServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;

        let outcome = compute_score(
            &record.applicant,
            &record.subjects,
            &record.experiences,
            self.today(),
        );
        let high_value_qualifications = record
            .applicant
            .certifications()
            .filter(|entry| is_high_value_qualification(entry))
            .map(str::to_string)
            .collect();

        Ok(ApplicationDetails {
            band: outcome.band(),
            outcome,
            high_value_qualifications,
            record,
        })
    }

    /// Rank every stored applicant by region, persisting scores that were missing.
    pub fn rankings(&self) -> Result<RegionRankings, IntakeServiceError> {
        let applicants = self.repository.fetch_applicants(None)?;

        let mut subjects = HashMap::with_capacity(applicants.len());
        let mut experiences = HashMap::with_capacity(applicants.len());
        for applicant in &applicants {
            subjects.insert(
                applicant.id.clone(),
                self.repository.fetch_subjects(&applicant.id)?,
            );
            experiences.insert(
                applicant.id.clone(),
                self.repository.fetch_experiences(&applicant.id)?,
            );
        }

        let rankings = rank_by_region(applicants, &subjects, &experiences, self.today());

        let mut backfilled = 0usize;
        for ranked in rankings.iter_ranked().filter(|ranked| ranked.newly_scored) {
            match self
                .repository
                .persist_score(&ranked.applicant.id, ranked.score())
            {
                Ok(()) => backfilled += 1,
                Err(err) => warn!(
                    applicant = %ranked.applicant.id,
                    error = %err,
                    "could not persist backfilled score"
                ),
            }
        }
        debug!(regions = rankings.len(), backfilled, "regional rankings built");

        Ok(rankings)
    }
}

fn duplicate_contact(existing: ContactMatch) -> IntakeServiceError {
    match existing {
        ContactMatch::Email(existing) => {
            info!(%existing, "duplicate email on submission");
            IntakeServiceError::DuplicateEmail
        }
        ContactMatch::Phone(existing) => {
            info!(%existing, "duplicate phone on submission");
            IntakeServiceError::DuplicatePhone
        }
    }
}

/// Error raised by the intake service.
#[derive(Debug, thiserror::Error)]
pub enum IntakeServiceError {
    #[error(transparent)]
    Rejected(#[from] IntakeRejection),
    #[error("an application with this email already exists")]
    DuplicateEmail,
    #[error("an application with this phone number already exists")]
    DuplicatePhone,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntakeServiceError {
    /// Field-level errors suitable for echoing back to the form.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            IntakeServiceError::Rejected(rejection) => rejection.field_errors(),
            IntakeServiceError::DuplicateEmail => vec![FieldError {
                path: "email".to_string(),
                message: "This email address has already been used for an application"
                    .to_string(),
            }],
            IntakeServiceError::DuplicatePhone => vec![FieldError {
                path: "phone".to_string(),
                message: "This phone number has already been used for an application"
                    .to_string(),
            }],
            IntakeServiceError::Repository(_) => Vec::new(),
        }
    }
}

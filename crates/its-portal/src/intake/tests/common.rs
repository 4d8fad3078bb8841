use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::intake::domain::{
    Applicant, ApplicantId, ApplicationSubmission, Experience, Grade, Region, Subject,
};
use crate::intake::repository::{
    contact_match, ApplicationRecord, ApplicationRepository, ContactMatch, RepositoryError,
};
use crate::intake::{application_router, IntakeService};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn as_of() -> NaiveDate {
    date(2025, 6, 1)
}

pub(super) fn core_subjects() -> Vec<Subject> {
    vec![
        Subject::graded("Mathematics", Grade::One),
        Subject::graded("English A", Grade::One),
        Subject::graded("Social Studies", Grade::Two),
        Subject::graded("Principles of Business", Grade::Two),
        Subject::graded("Geography", Grade::Three),
    ]
}

pub(super) fn experience(duties: &str) -> Experience {
    Experience {
        company: "Demerara Computers".to_string(),
        start_date: date(2022, 1, 1),
        end_date: Some(date(2023, 1, 1)),
        duties: duties.to_string(),
    }
}

pub(super) fn applicant(suffix: &str, region: Region) -> Applicant {
    Applicant {
        id: ApplicantId(format!("its-{suffix}")),
        name: format!("Applicant {suffix}"),
        address: "12 Main Street, Georgetown".to_string(),
        phone: "5926001234".to_string(),
        email: format!("{suffix}@example.gy"),
        date_of_birth: date(1999, 4, 12),
        region,
        certification: String::new(),
        score: None,
        submitted_at: Utc
            .with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    }
}

pub(super) fn scored(suffix: &str, region: Region, score: u8) -> Applicant {
    let mut applicant = applicant(suffix, region);
    applicant.score = Some(score);
    applicant
}

pub(super) fn submission() -> ApplicationSubmission {
    ApplicationSubmission {
        name: "Keisha Persaud".to_string(),
        address: "45 Robb Street, Georgetown".to_string(),
        phone: "5926123456".to_string(),
        email: "keisha@example.gy".to_string(),
        date_of_birth: date(2000, 2, 14),
        region: Region::Region4,
        certification: "CompTIA A+".to_string(),
        subjects: {
            let mut subjects = core_subjects();
            subjects.push(Subject::graded("Information Technology", Grade::One));
            subjects
        },
        experiences: vec![experience("Helpdesk support and printer setup")],
    }
}

pub(super) fn build_service() -> (IntakeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = IntakeService::new(repository.clone()).with_reference_date(as_of());
    (service, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<Vec<ApplicationRecord>>>,
    pub(super) persisted: Arc<Mutex<HashMap<ApplicantId, u8>>>,
}

impl MemoryRepository {
    pub(super) fn seed(&self, record: ApplicationRecord) {
        self.records
            .lock()
            .expect("repository mutex poisoned")
            .push(record);
    }

    pub(super) fn persisted(&self, id: &ApplicantId) -> Option<u8> {
        self.persisted
            .lock()
            .expect("repository mutex poisoned")
            .get(id)
            .copied()
    }
}

impl ApplicationRepository for MemoryRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard
            .iter()
            .any(|existing| existing.applicant.id == record.applicant.id)
        {
            return Err(RepositoryError::Conflict);
        }
        if let Some(existing) = contact_match(
            guard.iter().map(|existing| &existing.applicant),
            &record.applicant.email,
            &record.applicant.phone,
        ) {
            return Err(RepositoryError::ContactTaken(existing));
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn fetch_applicants(&self, region: Option<Region>) -> Result<Vec<Applicant>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .rev()
            .filter(|record| region.map_or(true, |region| record.applicant.region == region))
            .map(|record| record.applicant.clone())
            .collect())
    }

    fn fetch_subjects(&self, id: &ApplicantId) -> Result<Vec<Subject>, RepositoryError> {
        Ok(self
            .fetch(id)?
            .map(|record| record.subjects)
            .unwrap_or_default())
    }

    fn fetch_experiences(&self, id: &ApplicantId) -> Result<Vec<Experience>, RepositoryError> {
        Ok(self
            .fetch(id)?
            .map(|record| record.experiences)
            .unwrap_or_default())
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .iter()
            .find(|record| &record.applicant.id == id)
            .cloned())
    }

    fn persist_score(&self, id: &ApplicantId, score: u8) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let record = guard
            .iter_mut()
            .find(|record| &record.applicant.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.applicant.score = Some(score);
        self.persisted
            .lock()
            .expect("repository mutex poisoned")
            .insert(id.clone(), score);
        Ok(())
    }

    fn find_by_contact(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<ContactMatch>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(contact_match(
            guard.iter().map(|record| &record.applicant),
            email,
            phone,
        ))
    }
}

/// Contact lookups always miss, as when another writer commits between lookup and insert.
#[derive(Default)]
pub(super) struct StaleLookupRepository {
    pub(super) inner: MemoryRepository,
}

impl ApplicationRepository for StaleLookupRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch_applicants(&self, region: Option<Region>) -> Result<Vec<Applicant>, RepositoryError> {
        self.inner.fetch_applicants(region)
    }

    fn fetch_subjects(&self, id: &ApplicantId) -> Result<Vec<Subject>, RepositoryError> {
        self.inner.fetch_subjects(id)
    }

    fn fetch_experiences(&self, id: &ApplicantId) -> Result<Vec<Experience>, RepositoryError> {
        self.inner.fetch_experiences(id)
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn persist_score(&self, id: &ApplicantId, score: u8) -> Result<(), RepositoryError> {
        self.inner.persist_score(id, score)
    }

    fn find_by_contact(
        &self,
        _email: &str,
        _phone: &str,
    ) -> Result<Option<ContactMatch>, RepositoryError> {
        Ok(None)
    }
}

/// Accepts inserts but refuses to record scores.
#[derive(Default)]
pub(super) struct ReadOnlyScoresRepository {
    pub(super) inner: MemoryRepository,
}

impl ApplicationRepository for ReadOnlyScoresRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn fetch_applicants(&self, region: Option<Region>) -> Result<Vec<Applicant>, RepositoryError> {
        self.inner.fetch_applicants(region)
    }

    fn fetch_subjects(&self, id: &ApplicantId) -> Result<Vec<Subject>, RepositoryError> {
        self.inner.fetch_subjects(id)
    }

    fn fetch_experiences(&self, id: &ApplicantId) -> Result<Vec<Experience>, RepositoryError> {
        self.inner.fetch_experiences(id)
    }

    fn fetch(&self, id: &ApplicantId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        self.inner.fetch(id)
    }

    fn persist_score(&self, _id: &ApplicantId, _score: u8) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("scores table locked".to_string()))
    }

    fn find_by_contact(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<ContactMatch>, RepositoryError> {
        self.inner.find_by_contact(email, phone)
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_applicants(&self, _region: Option<Region>) -> Result<Vec<Applicant>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_subjects(&self, _id: &ApplicantId) -> Result<Vec<Subject>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_experiences(&self, _id: &ApplicantId) -> Result<Vec<Experience>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicantId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn persist_score(&self, _id: &ApplicantId, _score: u8) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn find_by_contact(
        &self,
        _email: &str,
        _phone: &str,
    ) -> Result<Option<ContactMatch>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn router_with_service(service: IntakeService<MemoryRepository>) -> axum::Router {
    application_router(Arc::new(service))
}

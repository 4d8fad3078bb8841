use chrono::NaiveDate;
use its_portal::intake::{
    contact_match, Applicant, ApplicantId, ApplicationRecord, ApplicationRepository, ContactMatch,
    Experience, Region, RepositoryError, Subject,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local store. Records are kept in submission order.
#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<Vec<ApplicationRecord>>>,
}

impl InMemoryApplicationRepository {
    fn records(&self) -> Result<MutexGuard<'_, Vec<ApplicationRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records()?;
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
        let guard = self.records()?;
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
        let guard = self.records()?;
        Ok(guard
            .iter()
            .find(|record| &record.applicant.id == id)
            .cloned())
    }

    fn persist_score(&self, id: &ApplicantId, score: u8) -> Result<(), RepositoryError> {
        let mut guard = self.records()?;
        let record = guard
            .iter_mut()
            .find(|record| &record.applicant.id == id)
            .ok_or(RepositoryError::NotFound)?;
        record.applicant.score = Some(score);
        Ok(())
    }

    fn find_by_contact(
        &self,
        email: &str,
        phone: &str,
    ) -> Result<Option<ContactMatch>, RepositoryError> {
        let guard = self.records()?;
        Ok(contact_match(
            guard.iter().map(|record| &record.applicant),
            email,
            phone,
        ))
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

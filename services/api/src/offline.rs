use crate::infra::{parse_date, InMemoryApplicationRepository};
use chrono::{Local, NaiveDate};
use clap::Args;
use its_portal::error::{AppError, InputError};
use its_portal::intake::{
    rank_by_region, ApplicationDetails, ApplicationRecord, ApplicationSubmission, FieldError,
    IntakeService, IntakeServiceError, RegionRankings,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding one application submission
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Date used for ongoing experience (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// JSON file holding an array of stored application records
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Date used for ongoing experience (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum ScoreReport {
    Accepted {
        #[serde(flatten)]
        details: Box<ApplicationDetails>,
    },
    Rejected {
        field_errors: Vec<FieldError>,
    },
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let submission: ApplicationSubmission = read_json(&args.input)?;
    let report = score_submission(submission, resolve(args.as_of))?;
    print_json(&report)
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let records: Vec<ApplicationRecord> = read_json(&args.input)?;
    let rankings = rank_records(records, resolve(args.as_of), &args.input)?;
    print_json(&rankings)
}

fn resolve(as_of: Option<NaiveDate>) -> NaiveDate {
    as_of.unwrap_or_else(|| Local::now().date_naive())
}

/// Runs a submission through the same intake pipeline the HTTP service uses.
pub(crate) fn score_submission(
    submission: ApplicationSubmission,
    as_of: NaiveDate,
) -> Result<ScoreReport, AppError> {
    let service = IntakeService::new(Arc::new(InMemoryApplicationRepository::default()))
        .with_reference_date(as_of);

    let record = match service.submit(submission) {
        Ok(record) => record,
        Err(err @ IntakeServiceError::Rejected(_)) => {
            return Ok(ScoreReport::Rejected {
                field_errors: err.field_errors(),
            })
        }
        Err(err) => return Err(err.into()),
    };

    let details = service.details(&record.applicant.id)?;
    Ok(ScoreReport::Accepted {
        details: Box::new(details),
    })
}

/// Ranks exported records; an applicant id appearing twice rejects the whole export.
pub(crate) fn rank_records(
    records: Vec<ApplicationRecord>,
    as_of: NaiveDate,
    source: &Path,
) -> Result<RegionRankings, InputError> {
    let mut subjects = HashMap::with_capacity(records.len());
    let mut experiences = HashMap::with_capacity(records.len());
    let mut applicants = Vec::with_capacity(records.len());
    for record in records {
        if subjects
            .insert(record.applicant.id.clone(), record.subjects)
            .is_some()
        {
            return Err(InputError::DuplicateApplicant {
                path: source.display().to_string(),
                applicant_id: record.applicant.id.0,
            });
        }
        experiences.insert(record.applicant.id.clone(), record.experiences);
        applicants.push(record.applicant);
    }
    Ok(rank_by_region(applicants, &subjects, &experiences, as_of))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| InputError::Decode {
        path: display,
        source,
    })
}

fn print_json(value: &impl Serialize) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(std::io::Error::from)?;
    println!("{rendered}");
    Ok(())
}

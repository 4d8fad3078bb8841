use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stored applicants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicantId(pub String);

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Administrative regions an applicant can be deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Georgetown,
    #[serde(rename = "Region 1")]
    Region1,
    #[serde(rename = "Region 2")]
    Region2,
    #[serde(rename = "Region 3")]
    Region3,
    #[serde(rename = "Region 4")]
    Region4,
    #[serde(rename = "Region 5")]
    Region5,
    #[serde(rename = "Region 6")]
    Region6,
    #[serde(rename = "Region 7")]
    Region7,
    #[serde(rename = "Region 8")]
    Region8,
    #[serde(rename = "Region 9")]
    Region9,
    #[serde(rename = "Region 10")]
    Region10,
}

impl Region {
    pub const ALL: [Region; 11] = [
        Region::Georgetown,
        Region::Region1,
        Region::Region2,
        Region::Region3,
        Region::Region4,
        Region::Region5,
        Region::Region6,
        Region::Region7,
        Region::Region8,
        Region::Region9,
        Region::Region10,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Region::Georgetown => "Georgetown",
            Region::Region1 => "Region 1",
            Region::Region2 => "Region 2",
            Region::Region3 => "Region 3",
            Region::Region4 => "Region 4",
            Region::Region5 => "Region 5",
            Region::Region6 => "Region 6",
            Region::Region7 => "Region 7",
            Region::Region8 => "Region 8",
            Region::Region9 => "Region 9",
            Region::Region10 => "Region 10",
        }
    }

    /// Resolve a display label, ignoring case and surrounding whitespace.
    pub fn from_label(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|region| region.label().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// CXC grade; lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl Grade {
    pub const fn rank(self) -> u8 {
        match self {
            Grade::One => 1,
            Grade::Two => 2,
            Grade::Three => 3,
        }
    }
}

/// A single CXC subject result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
    #[serde(default)]
    pub grade: Option<Grade>,
}

impl Subject {
    pub fn graded(name: impl Into<String>, grade: Grade) -> Self {
        Self {
            name: name.into(),
            grade: Some(grade),
        }
    }
}

/// Work history entry; an absent end date means the position is ongoing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    pub company: String,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    pub duties: String,
}

/// Stored applicant details. `score` stays empty until the scorer has run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    pub id: ApplicantId,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub region: Region,
    /// Comma-joined free text as entered on the form.
    #[serde(default)]
    pub certification: String,
    #[serde(default)]
    pub score: Option<u8>,
    pub submitted_at: DateTime<Utc>,
}

impl Applicant {
    /// Individual certification entries with blanks removed.
    pub fn certifications(&self) -> impl Iterator<Item = &str> {
        self.certification
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
    }
}

/// Raw form payload posted by an applicant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub date_of_birth: NaiveDate,
    pub region: Region,
    #[serde(default)]
    pub certification: String,
    pub subjects: Vec<Subject>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

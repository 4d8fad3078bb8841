mod keywords;
mod rules;
mod tiebreaker;

pub use keywords::{
    duty_matches, first_certification_match, is_english, is_high_value_qualification,
    is_it_subject, is_mathematics, CertificationKeyword, DutyKeyword, ItSubjectPattern,
};
pub use tiebreaker::{tiebreaker, total_experience_months};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Applicant, ApplicantId, Experience, Subject};

/// Scores one applicant and computes the tiebreaker used for ranking.
///
/// Pure: the result depends only on the inputs, with `as_of` standing in for
/// the current date when an experience has no end date.
pub fn compute_score(
    applicant: &Applicant,
    subjects: &[Subject],
    experiences: &[Experience],
    as_of: NaiveDate,
) -> ScoreOutcome {
    let (components, score) = rules::score_components(applicant, subjects, experiences);

    ScoreOutcome {
        applicant_id: applicant.id.clone(),
        score,
        tiebreaker: tiebreaker(subjects, experiences, as_of),
        components,
    }
}

/// Scoring factors that appear in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    SubjectBase,
    ItSubject,
    Certification,
    Experience,
}

/// Discrete contribution to a score, kept so reviewers can see where points came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub points: u8,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreOutcome {
    pub applicant_id: ApplicantId,
    pub score: u8,
    pub tiebreaker: u32,
    pub components: Vec<ScoreComponent>,
}

impl ScoreOutcome {
    pub fn points_for(&self, factor: ScoreFactor) -> u8 {
        self.components
            .iter()
            .filter(|component| component.factor == factor)
            .map(|component| component.points)
            .sum()
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }
}

/// Coarse grouping shown next to a score in the admin views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Strong,
    Moderate,
    Developing,
}

impl ScoreBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 70 {
            ScoreBand::Strong
        } else if score >= 50 {
            ScoreBand::Moderate
        } else {
            ScoreBand::Developing
        }
    }
}

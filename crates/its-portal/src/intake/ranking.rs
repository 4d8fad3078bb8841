use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{Applicant, ApplicantId, Experience, Region, Subject};
use super::scoring::{compute_score, tiebreaker};

/// Applicant with the tiebreaker it was ranked by.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedApplicant {
    #[serde(flatten)]
    pub applicant: Applicant,
    pub tiebreaker: u32,
    /// Set when the score was computed during ranking rather than loaded.
    #[serde(skip)]
    pub newly_scored: bool,
}

impl RankedApplicant {
    pub fn score(&self) -> u8 {
        self.applicant.score.unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGroup {
    pub region: Region,
    pub applicants: Vec<RankedApplicant>,
}

/// Region groups in order of first appearance in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RegionRankings {
    groups: Vec<RegionGroup>,
}

impl RegionRankings {
    pub fn get(&self, region: Region) -> Option<&[RankedApplicant]> {
        self.groups
            .iter()
            .find(|group| group.region == region)
            .map(|group| group.applicants.as_slice())
    }

    pub fn regions(&self) -> impl Iterator<Item = Region> + '_ {
        self.groups.iter().map(|group| group.region)
    }

    pub fn groups(&self) -> &[RegionGroup] {
        &self.groups
    }

    pub fn into_groups(self) -> Vec<RegionGroup> {
        self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn iter_ranked(&self) -> impl Iterator<Item = &RankedApplicant> {
        self.groups.iter().flat_map(|group| group.applicants.iter())
    }
}

/// Groups applicants by region and orders each group by score, then
/// tiebreaker, both descending. Applicants tied on both keep input order.
///
/// Missing scores are computed and attached; tiebreakers are always recomputed.
pub fn rank_by_region(
    applicants: Vec<Applicant>,
    subjects_by_applicant: &HashMap<ApplicantId, Vec<Subject>>,
    experiences_by_applicant: &HashMap<ApplicantId, Vec<Experience>>,
    as_of: NaiveDate,
) -> RegionRankings {
    let mut groups: Vec<RegionGroup> = Vec::new();

    for mut applicant in applicants {
        let subjects = subjects_by_applicant
            .get(&applicant.id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let experiences = experiences_by_applicant
            .get(&applicant.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        let (tiebreaker, newly_scored) = match applicant.score {
            Some(_) => (tiebreaker(subjects, experiences, as_of), false),
            None => {
                let outcome = compute_score(&applicant, subjects, experiences, as_of);
                applicant.score = Some(outcome.score);
                (outcome.tiebreaker, true)
            }
        };

        let ranked = RankedApplicant {
            applicant,
            tiebreaker,
            newly_scored,
        };

        match groups
            .iter_mut()
            .find(|group| group.region == ranked.applicant.region)
        {
            Some(group) => group.applicants.push(ranked),
            None => groups.push(RegionGroup {
                region: ranked.applicant.region,
                applicants: vec![ranked],
            }),
        }
    }

    for group in &mut groups {
        group
            .applicants
            .sort_by_key(|ranked| (Reverse(ranked.score()), Reverse(ranked.tiebreaker)));
    }

    RegionRankings { groups }
}

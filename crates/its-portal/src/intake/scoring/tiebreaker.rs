use chrono::{Datelike, NaiveDate};

use super::super::domain::{Experience, Subject};

const POINTS_PER_GRADED_SUBJECT: u32 = 100;

/// Secondary ranking value: graded subjects count for 100 each, plus one per
/// month of work experience.
pub fn tiebreaker(subjects: &[Subject], experiences: &[Experience], as_of: NaiveDate) -> u32 {
    let graded = subjects
        .iter()
        .filter(|subject| subject.grade.is_some())
        .count();
    let graded = u32::try_from(graded).unwrap_or(u32::MAX);

    graded
        .saturating_mul(POINTS_PER_GRADED_SUBJECT)
        .saturating_add(total_experience_months(experiences, as_of))
}

/// Calendar months across all experiences; ongoing roles run until `as_of`.
/// Saturates at `u32::MAX`.
pub fn total_experience_months(experiences: &[Experience], as_of: NaiveDate) -> u32 {
    experiences
        .iter()
        .map(|entry| months_between(entry.start_date, entry.end_date.unwrap_or(as_of)))
        .fold(0u32, u32::saturating_add)
}

// Day of month is ignored; reversed ranges count as zero.
fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}

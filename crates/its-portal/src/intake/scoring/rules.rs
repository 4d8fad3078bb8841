use super::super::domain::{Applicant, Experience, Grade, Subject};
use super::keywords::{
    duty_matches, first_certification_match, is_english, is_it_subject, is_mathematics,
};
use super::{ScoreComponent, ScoreFactor};

pub(crate) const MAX_SCORE: u16 = 100;
pub(crate) const EXPERIENCE_CAP: u16 = 25;
const BOTH_CORE_SUBJECTS: u16 = 30;
const ONE_CORE_SUBJECT: u16 = 15;
const CERTIFICATION_BONUS: u16 = 20;
const POINTS_PER_DUTY_MATCH: u16 = 3;

pub(crate) fn score_components(
    applicant: &Applicant,
    subjects: &[Subject],
    experiences: &[Experience],
) -> (Vec<ScoreComponent>, u8) {
    let components = vec![
        core_subjects(subjects),
        it_subject(subjects),
        certification(&applicant.certification),
        experience(experiences),
    ];

    let total: u16 = components
        .iter()
        .map(|component| u16::from(component.points))
        .sum();
    let score = total.min(MAX_SCORE) as u8;

    (components, score)
}

fn core_subjects(subjects: &[Subject]) -> ScoreComponent {
    let has_math = subjects
        .iter()
        .any(|subject| subject.grade.is_some() && is_mathematics(&subject.name));
    let has_english = subjects
        .iter()
        .any(|subject| subject.grade.is_some() && is_english(&subject.name));

    let (points, notes) = match (has_math, has_english) {
        (true, true) => (BOTH_CORE_SUBJECTS, "mathematics and english passed".to_string()),
        (true, false) => (ONE_CORE_SUBJECT, "mathematics passed, english missing".to_string()),
        (false, true) => (ONE_CORE_SUBJECT, "english passed, mathematics missing".to_string()),
        (false, false) => (0, "no graded mathematics or english".to_string()),
    };

    component(ScoreFactor::SubjectBase, points, notes)
}

fn it_subject(subjects: &[Subject]) -> ScoreComponent {
    let best = subjects
        .iter()
        .filter(|subject| is_it_subject(&subject.name))
        .filter_map(|subject| subject.grade)
        .min();

    let (points, notes) = match best {
        Some(Grade::One) => (30, "IT subject at grade 1".to_string()),
        Some(Grade::Two) => (20, "IT subject at grade 2".to_string()),
        Some(Grade::Three) => (15, "IT subject at grade 3".to_string()),
        None => (0, "no graded IT subject".to_string()),
    };

    component(ScoreFactor::ItSubject, points, notes)
}

fn certification(text: &str) -> ScoreComponent {
    match first_certification_match(text) {
        Some(keyword) => component(
            ScoreFactor::Certification,
            CERTIFICATION_BONUS,
            format!("certification mentions '{}'", keyword.token()),
        ),
        None => component(
            ScoreFactor::Certification,
            0,
            "no recognised IT certification".to_string(),
        ),
    }
}

fn experience(experiences: &[Experience]) -> ScoreComponent {
    let matches: usize = experiences
        .iter()
        .map(|entry| duty_matches(&entry.duties).len())
        .sum();
    let raw = matches.saturating_mul(usize::from(POINTS_PER_DUTY_MATCH));
    let points = raw.min(usize::from(EXPERIENCE_CAP)) as u16;

    let notes = if raw > usize::from(EXPERIENCE_CAP) {
        format!("{matches} relevant duty keyword(s), capped at {EXPERIENCE_CAP}")
    } else {
        format!("{matches} relevant duty keyword(s)")
    };

    component(ScoreFactor::Experience, points, notes)
}

fn component(factor: ScoreFactor, points: u16, notes: String) -> ScoreComponent {
    ScoreComponent {
        factor,
        points: points as u8,
        notes,
    }
}

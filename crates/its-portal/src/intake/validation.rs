use serde::Serialize;

use super::domain::{ApplicationSubmission, Subject};

const MATHEMATICS_NAMES: [&str; 1] = ["mathematics"];
const ENGLISH_NAMES: [&str; 3] = ["english", "english a", "english b"];
const DEFAULT_MINIMUM_SUBJECTS: usize = 5;
const DEFAULT_PHONE_PREFIX: &str = "592";
const MINIMUM_SUBSCRIBER_DIGITS: usize = 7;

/// Single reason a submission cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{field} is required")]
    MissingField { field: String },
    #[error("at least {required} subjects are required (found {found})")]
    TooFewSubjects { required: usize, found: usize },
    #[error("Mathematics is required with a grade")]
    MissingMathematics,
    #[error("English is required with a grade")]
    MissingEnglish,
    #[error("grade is required for subject '{subject}'")]
    MissingGrade { index: usize, subject: String },
    #[error("phone number must be in format {prefix}XXXXXXX with at least 7 digits after {prefix}")]
    InvalidPhone { prefix: String },
    #[error("valid email is required")]
    InvalidEmail,
    #[error("experience at '{company}' ends before it starts")]
    ExperienceEndsBeforeStart { index: usize, company: String },
}

impl IntakeViolation {
    pub fn field_error(&self) -> FieldError {
        let path = match self {
            IntakeViolation::MissingField { field } => field.clone(),
            IntakeViolation::TooFewSubjects { .. }
            | IntakeViolation::MissingMathematics
            | IntakeViolation::MissingEnglish => "subjects".to_string(),
            IntakeViolation::MissingGrade { index, .. } => format!("subjects.{index}.grade"),
            IntakeViolation::InvalidPhone { .. } => "phone".to_string(),
            IntakeViolation::InvalidEmail => "email".to_string(),
            IntakeViolation::ExperienceEndsBeforeStart { index, .. } => {
                format!("experiences.{index}.end_date")
            }
        };

        FieldError {
            path,
            message: self.to_string(),
        }
    }
}

/// Form-level error pointing at the offending input path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Every violation found in a submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed: {}", summarize(.violations))]
pub struct IntakeRejection {
    pub violations: Vec<IntakeViolation>,
}

impl IntakeRejection {
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.violations
            .iter()
            .map(IntakeViolation::field_error)
            .collect()
    }

    pub fn contains(&self, violation: &IntakeViolation) -> bool {
        self.violations.contains(violation)
    }
}

fn summarize(violations: &[IntakeViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Intake rules applied before anything is stored.
#[derive(Debug, Clone)]
pub struct IntakePolicy {
    minimum_subjects: usize,
    phone_prefix: String,
}

impl IntakePolicy {
    pub fn new(minimum_subjects: usize, phone_prefix: impl Into<String>) -> Self {
        let phone_prefix = phone_prefix.into();
        let phone_prefix = if phone_prefix.chars().all(|c| c.is_ascii_digit()) {
            phone_prefix
        } else {
            DEFAULT_PHONE_PREFIX.to_string()
        };

        Self {
            minimum_subjects,
            phone_prefix,
        }
    }

    pub fn minimum_subjects(&self) -> usize {
        self.minimum_subjects
    }

    pub fn phone_prefix(&self) -> &str {
        &self.phone_prefix
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMUM_SUBJECTS, DEFAULT_PHONE_PREFIX)
    }
}

/// Guard that checks a submission against the intake policy.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard {
    policy: IntakePolicy,
}

impl IntakeGuard {
    pub fn with_policy(policy: IntakePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &IntakePolicy {
        &self.policy
    }

    pub fn check(&self, submission: &ApplicationSubmission) -> Result<(), IntakeRejection> {
        let mut violations = Vec::new();

        for (field, value) in [
            ("name", &submission.name),
            ("address", &submission.address),
            ("phone", &submission.phone),
            ("email", &submission.email),
        ] {
            if value.trim().is_empty() {
                violations.push(IntakeViolation::MissingField {
                    field: field.to_string(),
                });
            }
        }

        if !submission.phone.trim().is_empty() && !self.valid_phone(&submission.phone) {
            violations.push(IntakeViolation::InvalidPhone {
                prefix: self.policy.phone_prefix.clone(),
            });
        }

        if !submission.email.trim().is_empty() && !valid_email(&submission.email) {
            violations.push(IntakeViolation::InvalidEmail);
        }

        self.check_subjects(submission, &mut violations);
        check_experiences(submission, &mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(IntakeRejection { violations })
        }
    }

    fn check_subjects(
        &self,
        submission: &ApplicationSubmission,
        violations: &mut Vec<IntakeViolation>,
    ) {
        let subjects = &submission.subjects;

        if !has_graded(subjects, &MATHEMATICS_NAMES) {
            violations.push(IntakeViolation::MissingMathematics);
        }
        if !has_graded(subjects, &ENGLISH_NAMES) {
            violations.push(IntakeViolation::MissingEnglish);
        }

        if subjects.len() < self.policy.minimum_subjects {
            violations.push(IntakeViolation::TooFewSubjects {
                required: self.policy.minimum_subjects,
                found: subjects.len(),
            });
        }

        for (index, subject) in subjects.iter().enumerate() {
            if subject.name.trim().is_empty() {
                violations.push(IntakeViolation::MissingField {
                    field: format!("subjects.{index}.name"),
                });
            } else if subject.grade.is_none() {
                violations.push(IntakeViolation::MissingGrade {
                    index,
                    subject: subject.name.clone(),
                });
            }
        }
    }

    fn valid_phone(&self, phone: &str) -> bool {
        let phone = phone.trim();
        match phone.strip_prefix(self.policy.phone_prefix.as_str()) {
            Some(rest) => {
                rest.len() >= MINIMUM_SUBSCRIBER_DIGITS && rest.chars().all(|c| c.is_ascii_digit())
            }
            None => false,
        }
    }
}

fn has_graded(subjects: &[Subject], names: &[&str]) -> bool {
    subjects.iter().any(|subject| {
        subject.grade.is_some()
            && names
                .iter()
                .any(|name| subject.name.trim().eq_ignore_ascii_case(name))
    })
}

fn check_experiences(submission: &ApplicationSubmission, violations: &mut Vec<IntakeViolation>) {
    for (index, experience) in submission.experiences.iter().enumerate() {
        if experience.company.trim().is_empty() {
            violations.push(IntakeViolation::MissingField {
                field: format!("experiences.{index}.company"),
            });
        }
        if experience.duties.trim().is_empty() {
            violations.push(IntakeViolation::MissingField {
                field: format!("experiences.{index}.duties"),
            });
        }
        if let Some(end) = experience.end_date {
            if end < experience.start_date {
                violations.push(IntakeViolation::ExperienceEndsBeforeStart {
                    index,
                    company: experience.company.clone(),
                });
            }
        }
    }
}

fn valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .map(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
            .unwrap_or(false)
}

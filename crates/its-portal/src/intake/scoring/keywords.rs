//! Fixed keyword sets used by the scorer. All matching is case-insensitive.

/// Ways a subject name can identify an Information Technology subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItSubjectPattern {
    InformationTechnology,
    ExactIt,
    Edpm,
    ElectronicDocument,
}

impl ItSubjectPattern {
    pub const ALL: [ItSubjectPattern; 4] = [
        ItSubjectPattern::InformationTechnology,
        ItSubjectPattern::ExactIt,
        ItSubjectPattern::Edpm,
        ItSubjectPattern::ElectronicDocument,
    ];

    fn matches(self, lowered: &str) -> bool {
        match self {
            ItSubjectPattern::InformationTechnology => lowered.contains("information technology"),
            ItSubjectPattern::ExactIt => lowered == "it",
            ItSubjectPattern::Edpm => lowered.contains("edpm"),
            ItSubjectPattern::ElectronicDocument => lowered.contains("electronic document"),
        }
    }
}

/// Certification keywords worth a flat bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificationKeyword {
    Comptia,
    APlus,
    NetworkPlus,
    SecurityPlus,
    Azure,
    Aws,
    Cloud,
    Microsoft,
    Cisco,
    Ccna,
    Itil,
    Dynamics,
}

impl CertificationKeyword {
    pub const ALL: [CertificationKeyword; 12] = [
        CertificationKeyword::Comptia,
        CertificationKeyword::APlus,
        CertificationKeyword::NetworkPlus,
        CertificationKeyword::SecurityPlus,
        CertificationKeyword::Azure,
        CertificationKeyword::Aws,
        CertificationKeyword::Cloud,
        CertificationKeyword::Microsoft,
        CertificationKeyword::Cisco,
        CertificationKeyword::Ccna,
        CertificationKeyword::Itil,
        CertificationKeyword::Dynamics,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            CertificationKeyword::Comptia => "comptia",
            CertificationKeyword::APlus => "a+",
            CertificationKeyword::NetworkPlus => "network+",
            CertificationKeyword::SecurityPlus => "security+",
            CertificationKeyword::Azure => "azure",
            CertificationKeyword::Aws => "aws",
            CertificationKeyword::Cloud => "cloud",
            CertificationKeyword::Microsoft => "microsoft",
            CertificationKeyword::Cisco => "cisco",
            CertificationKeyword::Ccna => "ccna",
            CertificationKeyword::Itil => "itil",
            CertificationKeyword::Dynamics => "dynamics",
        }
    }
}

/// Duty keywords that mark work experience as relevant to IT support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyKeyword {
    It,
    Support,
    Computer,
    Technical,
    Helpdesk,
    Troubleshoot,
    Software,
    Hardware,
    Network,
    Install,
    Maintain,
    Equipment,
    Printer,
    Device,
    Workstation,
    Training,
    UserSupport,
}

impl DutyKeyword {
    pub const ALL: [DutyKeyword; 17] = [
        DutyKeyword::It,
        DutyKeyword::Support,
        DutyKeyword::Computer,
        DutyKeyword::Technical,
        DutyKeyword::Helpdesk,
        DutyKeyword::Troubleshoot,
        DutyKeyword::Software,
        DutyKeyword::Hardware,
        DutyKeyword::Network,
        DutyKeyword::Install,
        DutyKeyword::Maintain,
        DutyKeyword::Equipment,
        DutyKeyword::Printer,
        DutyKeyword::Device,
        DutyKeyword::Workstation,
        DutyKeyword::Training,
        DutyKeyword::UserSupport,
    ];

    pub const fn token(self) -> &'static str {
        match self {
            DutyKeyword::It => "it",
            DutyKeyword::Support => "support",
            DutyKeyword::Computer => "computer",
            DutyKeyword::Technical => "technical",
            DutyKeyword::Helpdesk => "helpdesk",
            DutyKeyword::Troubleshoot => "troubleshoot",
            DutyKeyword::Software => "software",
            DutyKeyword::Hardware => "hardware",
            DutyKeyword::Network => "network",
            DutyKeyword::Install => "install",
            DutyKeyword::Maintain => "maintain",
            DutyKeyword::Equipment => "equipment",
            DutyKeyword::Printer => "printer",
            DutyKeyword::Device => "device",
            DutyKeyword::Workstation => "workstation",
            DutyKeyword::Training => "training",
            DutyKeyword::UserSupport => "user support",
        }
    }
}

const HIGH_VALUE_QUALIFICATIONS: [&str; 16] = [
    "associates degree in computer science",
    "associate degree in computer science",
    "associates degree in information technology",
    "associate degree in information technology",
    "bachelors degree in computer science",
    "bachelor degree in computer science",
    "bachelor's degree in computer science",
    "bachelors degree in information technology",
    "bachelor degree in information technology",
    "bachelor's degree in information technology",
    "diploma in computer science",
    "diploma in information technology",
    "bsc in computer science",
    "bsc in information technology",
    "bs in computer science",
    "bs in information technology",
];

pub fn is_mathematics(subject_name: &str) -> bool {
    subject_name.to_lowercase().contains("math")
}

pub fn is_english(subject_name: &str) -> bool {
    subject_name.to_lowercase().contains("english")
}

pub fn is_it_subject(subject_name: &str) -> bool {
    let lowered = subject_name.to_lowercase();
    ItSubjectPattern::ALL
        .iter()
        .any(|pattern| pattern.matches(&lowered))
}

/// First certification keyword found in the text, in declaration order.
pub fn first_certification_match(certification: &str) -> Option<CertificationKeyword> {
    let lowered = certification.to_lowercase();
    CertificationKeyword::ALL
        .into_iter()
        .find(|keyword| lowered.contains(keyword.token()))
}

/// Every duty keyword present in the text. Matching is by substring, so short
/// tokens such as `it` also hit inside longer words.
pub fn duty_matches(duties: &str) -> Vec<DutyKeyword> {
    let lowered = duties.to_lowercase();
    DutyKeyword::ALL
        .into_iter()
        .filter(|keyword| lowered.contains(keyword.token()))
        .collect()
}

/// Whether a certification entry names a tertiary computing qualification.
pub fn is_high_value_qualification(entry: &str) -> bool {
    let lowered = entry.to_lowercase();
    let compact: String = lowered.split_whitespace().collect();
    HIGH_VALUE_QUALIFICATIONS.iter().any(|qualification| {
        let compact_qualification: String = qualification.split_whitespace().collect();
        lowered.contains(qualification) || compact.contains(&compact_qualification)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_subject_patterns() {
        assert!(is_it_subject("Information Technology"));
        assert!(is_it_subject("IT"));
        assert!(is_it_subject(" EDPM "));
        assert!(is_it_subject("Electronic Document Preparation and Management"));
        assert!(!is_it_subject("Literature"));
        assert!(!is_it_subject("IT Fundamentals"));
    }

    #[test]
    fn certification_first_match_wins() {
        assert_eq!(
            first_certification_match("CompTIA A+, AWS Cloud Practitioner"),
            Some(CertificationKeyword::Comptia)
        );
        assert_eq!(
            first_certification_match("Cisco CCNA"),
            Some(CertificationKeyword::Cisco)
        );
        assert_eq!(first_certification_match("Food handler permit"), None);
        assert_eq!(first_certification_match(""), None);
    }

    #[test]
    fn duty_keywords_match_by_substring() {
        let hits = duty_matches("Provided Helpdesk support");
        assert_eq!(hits, vec![DutyKeyword::Support, DutyKeyword::Helpdesk]);

        let hits = duty_matches("Worked with customers");
        assert_eq!(hits, vec![DutyKeyword::It]);

        assert!(duty_matches("Cashier").is_empty());
    }

    #[test]
    fn high_value_qualifications_ignore_spacing() {
        assert!(is_high_value_qualification(
            "BSc in Computer Science (UG, 2021)"
        ));
        assert!(is_high_value_qualification(
            "Associate   Degree in Information Technology"
        ));
        assert!(is_high_value_qualification("DiplomainComputerScience"));
        assert!(!is_high_value_qualification("CompTIA A+"));
    }
}

//! The questionnaire answers collected by the wizard.

pub const SUBJECT_OPTIONS: &[&str] = &[
    "Mathematics",
    "Further Mathematics",
    "English Language",
    "Physics",
    "Chemistry",
    "Biology",
    "Agricultural Science",
    "Economics",
    "Government",
    "Literature in English",
    "Geography",
    "Commerce",
    "Financial Accounting",
    "Computer Studies",
    "Technical Drawing",
    "Fine Arts",
    "CRS/IRS",
];

pub const INTEREST_OPTIONS: &[&str] = &[
    "Coding & Technology",
    "Building & Fixing Things",
    "Helping People",
    "Business & Entrepreneurship",
    "Writing & Storytelling",
    "Debating & Public Speaking",
    "Art & Design",
    "Music & Entertainment",
    "Sports & Fitness",
    "Nature & Farming",
    "Research & Experiments",
    "Politics & Current Affairs",
];

pub const BUDGET_OPTIONS: &[&str] = &[
    "Below ₦100,000 per year",
    "₦100,000 - ₦300,000 per year",
    "₦300,000 - ₦700,000 per year",
    "₦700,000 - ₦1,500,000 per year",
    "Above ₦1,500,000 per year",
];

/// Subjects, interests and budget as entered by the student.
///
/// The two multi-select fields keep first-selection order so the prompt
/// reads the way the student picked them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub subjects: Vec<String>,
    pub interests: Vec<String>,
    pub budget: String,
}

impl Profile {
    /// Adds the subject if absent, removes it otherwise. Returns whether it is now selected.
    pub fn toggle_subject(&mut self, subject: &str) -> bool {
        toggle(&mut self.subjects, subject)
    }

    pub fn toggle_interest(&mut self, interest: &str) -> bool {
        toggle(&mut self.interests, interest)
    }

    pub fn set_budget(&mut self, budget: &str) {
        self.budget = budget.trim().to_string();
    }

    pub fn has_subjects(&self) -> bool {
        !self.subjects.is_empty()
    }

    pub fn has_interests(&self) -> bool {
        !self.interests.is_empty()
    }

    pub fn has_budget(&self) -> bool {
        !self.budget.trim().is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.has_subjects() && self.has_interests() && self.has_budget()
    }
}

fn toggle(values: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    match values.iter().position(|v| v == value) {
        Some(index) => {
            values.remove(index);
            false
        }
        None => {
            values.push(value.to_string());
            true
        }
    }
}

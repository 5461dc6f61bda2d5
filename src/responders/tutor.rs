//! Subject and age aware tutor

use super::Responder;
use crate::error::{EdcareError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// School subject the tutor answers for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    /// Mathematics
    #[default]
    Math,
    /// Science
    Science,
    /// English
    English,
    /// History
    History,
    /// Geography
    Geography,
}

impl Subject {
    /// All subjects
    pub const ALL: [Subject; 5] = [
        Self::Math,
        Self::Science,
        Self::English,
        Self::History,
        Self::Geography,
    ];

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Math => "math",
            Self::Science => "science",
            Self::English => "english",
            Self::History => "history",
            Self::Geography => "geography",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Math => "Mathematics",
            Self::Science => "Science",
            Self::English => "English",
            Self::History => "History",
            Self::Geography => "Geography",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Subject {
    type Err = EdcareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "math" | "maths" | "mathematics" => Ok(Self::Math),
            "science" => Ok(Self::Science),
            "english" => Ok(Self::English),
            "history" => Ok(Self::History),
            "geography" => Ok(Self::Geography),
            _ => Err(EdcareError::InvalidValue {
                kind: "subject",
                value: s.to_string(),
            }),
        }
    }
}

/// Age group the tutor pitches its answers at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeGroup {
    /// 3-5 years
    Preschool,
    /// 6-10 years
    #[default]
    Elementary,
    /// 11-13 years
    Middle,
    /// 14-18 years
    High,
}

impl AgeGroup {
    /// All age groups, youngest first
    pub const ALL: [AgeGroup; 4] = [Self::Preschool, Self::Elementary, Self::Middle, Self::High];

    /// Lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preschool => "preschool",
            Self::Elementary => "elementary",
            Self::Middle => "middle",
            Self::High => "high",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Preschool => "Preschool (3-5 years)",
            Self::Elementary => "Elementary (6-10 years)",
            Self::Middle => "Middle School (11-13 years)",
            Self::High => "High School (14-18 years)",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for AgeGroup {
    type Err = EdcareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "preschool" => Ok(Self::Preschool),
            "elementary" => Ok(Self::Elementary),
            "middle" | "middle-school" => Ok(Self::Middle),
            "high" | "high-school" => Ok(Self::High),
            _ => Err(EdcareError::InvalidValue {
                kind: "age group",
                value: s.to_string(),
            }),
        }
    }
}

const MATH_ELEMENTARY: &str = "Let's break this down into simple steps!\n\n1. First, we need to understand what the problem is asking.\n2. We can use counting or simple addition to solve this.\n3. Remember, math is like a puzzle - we just need to find the right pieces!\n\nDoes that make sense? Let me know if you'd like me to explain further!";

const MATH_ADVANCED: &str = "Great question! Let's approach this systematically:\n\n1. We'll start by identifying the key variables and what we're solving for.\n2. Next, we'll apply the appropriate formula or method.\n3. Then we'll work through the calculations step by step.\n\nDoes this approach make sense to you? I can elaborate on any part that's unclear.";

const SCIENCE: &str = "That's a fascinating scientific question! Here's how we can understand it:\n\n1. Let's look at the basic principles involved.\n2. We can observe how these principles apply in the real world.\n3. Scientists have discovered that this phenomenon works because of specific interactions.\n\nScience is all about curiosity and discovery - keep asking great questions!";

const GENERAL: &str = "I'm happy to help with your question! Here's what I know about this topic:\n\n1. The key concepts we need to understand are...\n2. When we apply these concepts to your question...\n3. The answer becomes clear when we consider...\n\nLearning is a journey, and you're asking exactly the right questions to deepen your understanding!";

/// Tutor whose answer depends only on subject and age group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorResponder {
    subject: Subject,
    age_group: AgeGroup,
}

impl TutorResponder {
    /// Creates a tutor for a subject and age group
    pub fn new(subject: Subject, age_group: AgeGroup) -> Self {
        Self { subject, age_group }
    }

    /// Subject in use
    pub fn subject(&self) -> Subject {
        self.subject
    }

    /// Age group in use
    pub fn age_group(&self) -> AgeGroup {
        self.age_group
    }

    /// The answer for the configured subject and age group
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::responders::{AgeGroup, Subject, TutorResponder};
    ///
    /// let tutor = TutorResponder::new(Subject::Math, AgeGroup::Elementary);
    /// assert!(tutor.answer().starts_with("Let's break this down"));
    /// ```
    pub fn answer(&self) -> &'static str {
        match (self.subject, self.age_group) {
            (Subject::Math, AgeGroup::Elementary) => MATH_ELEMENTARY,
            (Subject::Math, _) => MATH_ADVANCED,
            (Subject::Science, _) => SCIENCE,
            _ => GENERAL,
        }
    }
}

#[async_trait]
impl Responder for TutorResponder {
    fn name(&self) -> &'static str {
        "tutor"
    }

    async fn respond(&self, submission: &str) -> Result<String> {
        tracing::debug!(
            subject = self.subject.as_str(),
            age_group = self.age_group.as_str(),
            question_len = submission.len(),
            "Tutor answering"
        );
        Ok(self.answer().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_math_elementary_answer() {
        let tutor = TutorResponder::new(Subject::Math, AgeGroup::Elementary);
        assert_eq!(tutor.answer(), MATH_ELEMENTARY);
    }

    #[test]
    fn test_math_other_ages_get_systematic_answer() {
        for age in [AgeGroup::Preschool, AgeGroup::Middle, AgeGroup::High] {
            let tutor = TutorResponder::new(Subject::Math, age);
            assert_eq!(tutor.answer(), MATH_ADVANCED);
        }
    }

    #[test]
    fn test_science_ignores_age() {
        for age in AgeGroup::ALL {
            assert_eq!(TutorResponder::new(Subject::Science, age).answer(), SCIENCE);
        }
    }

    #[test]
    fn test_remaining_subjects_get_general_answer() {
        for subject in [Subject::English, Subject::History, Subject::Geography] {
            let tutor = TutorResponder::new(subject, AgeGroup::Elementary);
            assert_eq!(tutor.answer(), GENERAL);
        }
    }

    #[test]
    fn test_subject_parse() {
        assert_eq!("Maths".parse::<Subject>().unwrap(), Subject::Math);
        assert_eq!("geography".parse::<Subject>().unwrap(), Subject::Geography);
        assert!("art".parse::<Subject>().is_err());
    }

    #[test]
    fn test_age_group_parse() {
        assert_eq!("high-school".parse::<AgeGroup>().unwrap(), AgeGroup::High);
        assert_eq!("Preschool".parse::<AgeGroup>().unwrap(), AgeGroup::Preschool);
        assert!("college".parse::<AgeGroup>().is_err());
    }

    #[test]
    fn test_labels() {
        assert_eq!(Subject::Math.to_string(), "Mathematics");
        assert_eq!(AgeGroup::Middle.to_string(), "Middle School (11-13 years)");
    }

    #[tokio::test]
    async fn test_respond_returns_answer() {
        let tutor = TutorResponder::new(Subject::History, AgeGroup::High);
        let reply = tutor.respond("Who built the pyramids?").await.unwrap();
        assert_eq!(reply, GENERAL);
    }
}

//! Rule-based symptom checker
//!
//! Maps a set of reported symptoms to one care recommendation. Rules are
//! checked in order and the first match wins.

use super::Responder;
use crate::error::{EdcareError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A symptom the checker knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Fever,
    Cough,
    Headache,
    SoreThroat,
    Fatigue,
    RunnyNose,
    BodyAche,
    Nausea,
}

impl Symptom {
    /// All symptoms in checklist order
    pub const ALL: [Symptom; 8] = [
        Self::Fever,
        Self::Cough,
        Self::Headache,
        Self::SoreThroat,
        Self::Fatigue,
        Self::RunnyNose,
        Self::BodyAche,
        Self::Nausea,
    ];

    /// Identifier (`sore-throat`, `runny-nose`, ...)
    pub fn id(&self) -> &'static str {
        match self {
            Self::Fever => "fever",
            Self::Cough => "cough",
            Self::Headache => "headache",
            Self::SoreThroat => "sore-throat",
            Self::Fatigue => "fatigue",
            Self::RunnyNose => "runny-nose",
            Self::BodyAche => "body-ache",
            Self::Nausea => "nausea",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fever => "Fever",
            Self::Cough => "Cough",
            Self::Headache => "Headache",
            Self::SoreThroat => "Sore Throat",
            Self::Fatigue => "Fatigue",
            Self::RunnyNose => "Runny Nose",
            Self::BodyAche => "Body Ache",
            Self::Nausea => "Nausea",
        }
    }

    fn phrase(&self) -> &'static str {
        match self {
            Self::SoreThroat => "sore throat",
            Self::RunnyNose => "runny nose",
            Self::BodyAche => "body ache",
            other => other.id(),
        }
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Symptom {
    type Err = EdcareError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(&['_', ' '][..], "-");
        Self::ALL
            .into_iter()
            .find(|symptom| symptom.id() == normalized)
            .ok_or_else(|| EdcareError::InvalidValue {
                kind: "symptom",
                value: s.to_string(),
            })
    }
}

/// Ordered set of selected symptoms
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SymptomSet {
    selected: Vec<Symptom>,
}

impl SymptomSet {
    /// Creates an empty selection
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the symptom if absent, removes it if present
    ///
    /// # Returns
    ///
    /// Returns true if the symptom is selected afterwards
    pub fn toggle(&mut self, symptom: Symptom) -> bool {
        if let Some(pos) = self.selected.iter().position(|s| *s == symptom) {
            self.selected.remove(pos);
            false
        } else {
            self.selected.push(symptom);
            true
        }
    }

    /// Adds the symptom if absent
    pub fn insert(&mut self, symptom: Symptom) {
        if !self.contains(symptom) {
            self.selected.push(symptom);
        }
    }

    /// True if the symptom is selected
    pub fn contains(&self, symptom: Symptom) -> bool {
        self.selected.contains(&symptom)
    }

    /// True when nothing is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected symptoms in selection order
    pub fn symptoms(&self) -> &[Symptom] {
        &self.selected
    }

    /// Parses a list of symptom identifiers, rejecting unknown ones
    ///
    /// # Errors
    ///
    /// Returns error on the first identifier that is not a known symptom
    pub fn parse_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(id.as_ref().parse::<Symptom>()?);
        }
        Ok(set)
    }

    /// Picks out every known symptom mentioned in free text
    ///
    /// # Examples
    ///
    /// ```
    /// use edcare::responders::{Symptom, SymptomSet};
    ///
    /// let set = SymptomSet::detect("She has a fever and a sore throat");
    /// assert!(set.contains(Symptom::Fever));
    /// assert!(set.contains(Symptom::SoreThroat));
    /// ```
    pub fn detect(text: &str) -> Self {
        let normalized = text.to_lowercase().replace(&['-', '_'][..], " ");
        let mut set = Self::new();
        for symptom in Symptom::ALL {
            if normalized.contains(symptom.phrase()) {
                set.insert(symptom);
            }
        }
        set
    }

    /// Care recommendation for the selection, or None when empty
    pub fn recommendation(&self) -> Option<&'static str> {
        if self.is_empty() {
            return None;
        }

        let has = |symptom| self.contains(symptom);
        let text = if has(Symptom::Fever) {
            if has(Symptom::Cough) || has(Symptom::SoreThroat) {
                RESPIRATORY
            } else {
                FEVER
            }
        } else if has(Symptom::Headache) && has(Symptom::Fatigue) {
            TIREDNESS
        } else if has(Symptom::RunnyNose) || has(Symptom::Cough) {
            COMMON_COLD
        } else {
            MONITOR
        };
        Some(text)
    }
}

const RESPIRATORY: &str = "The symptoms suggest a possible respiratory infection. Ensure the child gets plenty of rest and fluids. Monitor temperature regularly. If fever persists for more than 2 days or exceeds 102°F (38.9°C), consult a healthcare provider.";

const FEVER: &str = "Fever could indicate various conditions. Ensure the child stays hydrated and gets adequate rest. Use appropriate fever-reducing medication as advised by a healthcare provider. If fever persists for more than 24 hours, seek medical advice.";

const TIREDNESS: &str = "These symptoms might indicate tiredness or mild dehydration. Ensure the child gets adequate rest and drinks plenty of fluids. Reduce screen time and provide a calm environment. If symptoms persist or worsen, consult a healthcare provider.";

const COMMON_COLD: &str = "These symptoms suggest a common cold. Ensure the child gets plenty of rest and fluids. A humidifier may help ease congestion. If symptoms worsen or persist beyond a week, consult a healthcare provider.";

const MONITOR: &str = "Based on the selected symptoms, it's recommended to monitor the child's condition. Ensure they get adequate rest and stay hydrated. If symptoms persist or worsen, consult a healthcare provider for proper diagnosis and treatment.";

/// Reads symptoms out of the submission text and recommends care
#[derive(Debug, Clone, Copy, Default)]
pub struct SymptomResponder;

impl SymptomResponder {
    /// Reply used when the submission names no known symptom
    pub fn prompt_for_symptoms() -> String {
        let ids: Vec<&str> = Symptom::ALL.iter().map(|s| s.id()).collect();
        format!(
            "I couldn't find any symptoms I recognise. Please list one or more of: {}.",
            ids.join(", ")
        )
    }
}

#[async_trait]
impl Responder for SymptomResponder {
    fn name(&self) -> &'static str {
        "symptoms"
    }

    async fn respond(&self, submission: &str) -> Result<String> {
        let set = SymptomSet::detect(submission);
        tracing::debug!(symptoms = ?set.symptoms(), "Symptoms detected");
        Ok(match set.recommendation() {
            Some(text) => text.to_string(),
            None => Self::prompt_for_symptoms(),
        })
    }
}

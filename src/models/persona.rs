//! Persona library: named roles with keywords that bias relevance scoring.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PersonaError;

/// A named role configuration, e.g. "Investment Analyst".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,

    /// Keywords appended to the synthesized query to bias scoring.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Persona {
    pub fn freeform(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
        }
    }
}

/// JSON persona library: persona keys to definitions plus sample jobs.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersonaLibrary {
    #[serde(default)]
    pub personas: BTreeMap<String, Persona>,

    #[serde(default)]
    pub sample_jobs: BTreeMap<String, String>,
}

impl PersonaLibrary {
    pub fn load(path: &Path) -> Result<Self, PersonaError> {
        let content = std::fs::read_to_string(path)?;
        let library: PersonaLibrary = serde_json::from_str(&content)?;
        for (key, persona) in &library.personas {
            if persona.name.trim().is_empty() {
                return Err(PersonaError::ValidationError(format!(
                    "persona '{}' has an empty name",
                    key
                )));
            }
        }
        Ok(library)
    }

    /// Load from the given path, falling back to the compiled-in defaults
    /// when no file exists or it cannot be parsed.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) if path.exists() => match Self::load(path) {
                Ok(library) => {
                    debug!(path = %path.display(), personas = library.personas.len(), "loaded persona library");
                    library
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "falling back to built-in personas");
                    Self::builtin()
                }
            },
            _ => Self::builtin(),
        }
    }

    /// Resolve user input to a persona: library key match first, then
    /// case-insensitive name match, otherwise a free-form persona.
    pub fn resolve(&self, input: &str) -> Persona {
        if let Some(persona) = self.personas.get(input) {
            return persona.clone();
        }
        self.personas
            .values()
            .find(|p| p.name.eq_ignore_ascii_case(input))
            .cloned()
            .unwrap_or_else(|| Persona::freeform(input))
    }

    /// Compiled-in default library.
    pub fn builtin() -> Self {
        let mut personas = BTreeMap::new();
        personas.insert(
            "investment_analyst".to_string(),
            Persona {
                name: "Investment Analyst".to_string(),
                keywords: vec![
                    "revenue".to_string(),
                    "growth".to_string(),
                    "R&D investment".to_string(),
                    "margins".to_string(),
                    "profitability".to_string(),
                    "market share".to_string(),
                ],
            },
        );
        personas.insert(
            "research_scientist".to_string(),
            Persona {
                name: "Research Scientist".to_string(),
                keywords: vec![
                    "methodology".to_string(),
                    "experiment".to_string(),
                    "results".to_string(),
                    "hypothesis".to_string(),
                    "dataset".to_string(),
                    "evaluation".to_string(),
                ],
            },
        );
        personas.insert(
            "business_consultant".to_string(),
            Persona {
                name: "Business Consultant".to_string(),
                keywords: vec![
                    "strategy".to_string(),
                    "optimization".to_string(),
                    "efficiency".to_string(),
                    "process improvement".to_string(),
                    "recommendation".to_string(),
                ],
            },
        );
        personas.insert(
            "compliance_officer".to_string(),
            Persona {
                name: "Compliance Officer".to_string(),
                keywords: vec![
                    "regulation".to_string(),
                    "compliance".to_string(),
                    "risk".to_string(),
                    "audit".to_string(),
                    "policy".to_string(),
                ],
            },
        );
        personas.insert(
            "product_manager".to_string(),
            Persona {
                name: "Product Manager".to_string(),
                keywords: vec![
                    "user feedback".to_string(),
                    "feature requirements".to_string(),
                    "roadmap".to_string(),
                    "usability".to_string(),
                ],
            },
        );

        let mut sample_jobs = BTreeMap::new();
        sample_jobs.insert(
            "revenue_analysis".to_string(),
            "Analyze revenue trends and R&D investments".to_string(),
        );
        sample_jobs.insert(
            "methodology_review".to_string(),
            "Extract methodology and experimental results".to_string(),
        );
        sample_jobs.insert(
            "strategy_review".to_string(),
            "Identify optimization opportunities and strategic recommendations".to_string(),
        );
        sample_jobs.insert(
            "compliance_review".to_string(),
            "Review regulatory requirements and compliance gaps".to_string(),
        );
        sample_jobs.insert(
            "product_feedback".to_string(),
            "Extract user feedback and feature requirements".to_string(),
        );

        Self {
            personas,
            sample_jobs,
        }
    }
}

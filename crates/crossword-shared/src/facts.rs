//! Heritage facts, unlocked one per completed puzzle.

use serde::{Deserialize, Serialize};

use crate::error::{CrosswordError, Result};

const BUILTIN_FACTS: &str = include_str!("../data/facts.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeritageFact {
    pub id: String,
    pub text: String,
}

#[derive(Deserialize)]
struct FactsFile {
    facts: Vec<HeritageFact>,
}

#[derive(Debug, Clone)]
pub struct Facts {
    facts: Vec<HeritageFact>,
}

impl Facts {
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_FACTS)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: FactsFile = serde_json::from_str(json)?;
        Ok(Self { facts: file.facts })
    }

    pub fn all(&self) -> &[HeritageFact] {
        &self.facts
    }

    /// Facts open after `completed_total` wins, in list order
    pub fn unlocked(&self, completed_total: u64) -> &[HeritageFact] {
        let count = usize::try_from(completed_total).unwrap_or(usize::MAX);
        &self.facts[..count.min(self.facts.len())]
    }

    pub fn find(&self, id: &str) -> Option<&HeritageFact> {
        self.facts.iter().find(|f| f.id == id)
    }

    pub fn require(&self, id: &str) -> Result<&HeritageFact> {
        self.find(id)
            .ok_or_else(|| CrosswordError::UnknownFact(id.to_string()))
    }

    /// Wins needed before the fact at `id` opens
    pub fn wins_required(&self, id: &str) -> Option<u64> {
        self.facts
            .iter()
            .position(|f| f.id == id)
            .map(|pos| pos as u64 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_six_facts() {
        let facts = Facts::builtin().unwrap();
        assert_eq!(facts.all().len(), 6);
        assert_eq!(facts.all()[0].id, "f1");
        assert!(facts.find("f2").unwrap().text.contains("Therme"));
    }

    #[test]
    fn test_unlocked_follows_completed_total() {
        let facts = Facts::builtin().unwrap();
        assert!(facts.unlocked(0).is_empty());
        assert_eq!(facts.unlocked(2).len(), 2);
        assert_eq!(facts.unlocked(40).len(), 6);
        assert_eq!(facts.unlocked(u64::MAX).len(), 6);
    }

    #[test]
    fn test_unknown_fact() {
        let facts = Facts::builtin().unwrap();
        assert_eq!(facts.wins_required("f4"), Some(4));
        assert!(matches!(
            facts.require("f9"),
            Err(CrosswordError::UnknownFact(_))
        ));
    }
}

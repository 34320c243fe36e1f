use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

use crate::chart::NatalChart;
use crate::interpretation::rules::{RuleBook, RuleEntry};

/// Deduplicated tags derived from a chart.
///
/// Tags are emitted sorted, but the order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Interpretation {
    pub traits: Vec<String>,
    pub strengths: Vec<String>,
    pub challenges: Vec<String>,
}

impl Interpretation {
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty() && self.strengths.is_empty() && self.challenges.is_empty()
    }
}

#[derive(Default)]
struct TagSets {
    traits: BTreeSet<String>,
    strengths: BTreeSet<String>,
    challenges: BTreeSet<String>,
}

impl TagSets {
    fn absorb(&mut self, entry: &RuleEntry) {
        self.traits.extend(entry.traits.iter().cloned());
        self.strengths.extend(entry.strengths.iter().cloned());
        self.challenges.extend(entry.challenges.iter().cloned());
    }

    fn finish(self) -> Interpretation {
        Interpretation {
            traits: self.traits.into_iter().collect(),
            strengths: self.strengths.into_iter().collect(),
            challenges: self.challenges.into_iter().collect(),
        }
    }
}

/// Applies a rule book to charts
#[derive(Debug, Clone)]
pub struct Interpreter {
    rules: Arc<RuleBook>,
}

impl Interpreter {
    pub fn new(rules: Arc<RuleBook>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(RuleBook::standard())
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    pub fn interpret(&self, chart: &NatalChart) -> Interpretation {
        let mut tags = TagSets::default();

        for planet in &chart.planets {
            if let Some(entry) = self.rules.sign(planet.sign) {
                tags.absorb(entry);
            }
            if let Some(entry) = self.rules.house(planet.house) {
                tags.absorb(entry);
            }
        }

        for aspect in &chart.aspects {
            if let Some(entry) = self.rules.aspect(aspect.aspect_type.name()) {
                tags.absorb(entry);
            }
        }

        tags.finish()
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::standard()
    }
}

/// Interpret a chart with the standard rule book
pub fn interpret_chart(chart: &NatalChart) -> Interpretation {
    Interpreter::standard().interpret(chart)
}

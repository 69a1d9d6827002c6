use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use tracing::warn;
use crate::catalog::Catalog;
use crate::models::{Module, VoteSubmission};
use crate::priority::Priority;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityCounts {
    by_priority: [u32; 3],
}

impl PriorityCounts {
    #[cfg(test)]
    pub(crate) const fn new(p1: u32, p2: u32, p3: u32) -> Self {
        Self { by_priority: [p1, p2, p3] }
    }

    fn record(&mut self, priority: Priority) {
        self.by_priority[priority.index()] += 1;
    }

    fn merge(&mut self, other: &PriorityCounts) {
        for (mine, theirs) in self.by_priority.iter_mut().zip(other.by_priority) {
            *mine += theirs;
        }
    }

    pub fn get(&self, priority: Priority) -> u32 {
        self.by_priority[priority.index()]
    }

    pub fn total(&self) -> u32 {
        self.by_priority.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTally<'a> {
    pub module: &'a Module,
    pub counts: PriorityCounts,
}

/// Every catalog module has an entry, in catalog order, even with no votes.
/// Votes for unknown module ids only show up in [`Tally::ignored_votes`].
#[derive(Debug, Clone)]
pub struct Tally<'a> {
    modules: Vec<ModuleTally<'a>>,
    totals: PriorityCounts,
    participant_count: usize,
    ignored_votes: usize,
}

impl<'a> Tally<'a> {
    pub fn aggregate<'s, I>(catalog: &'a Catalog, submissions: I) -> Self
    where
        I: IntoIterator<Item = &'s VoteSubmission>,
    {
        let mut modules: Vec<ModuleTally<'a>> = catalog
            .modules()
            .iter()
            .map(|module| ModuleTally { module, counts: PriorityCounts::default() })
            .collect();

        let index: HashMap<&str, usize> = catalog
            .modules()
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.as_str(), i))
            .collect();

        let mut participant_count = 0;
        let mut ignored_votes = 0;

        for submission in submissions {
            let mut counted = false;
            for (module_id, &priority) in &submission.votes {
                match index.get(module_id.as_str()) {
                    Some(&i) => {
                        modules[i].counts.record(priority);
                        counted = true;
                    }
                    None => ignored_votes += 1,
                }
            }
            if counted {
                participant_count += 1;
            }
        }

        if ignored_votes > 0 {
            warn!("Ignored {} votes for modules missing from the catalog", ignored_votes);
        }

        let mut totals = PriorityCounts::default();
        for tally in &modules {
            totals.merge(&tally.counts);
        }

        Self { modules, totals, participant_count, ignored_votes }
    }

    pub fn modules(&self) -> &[ModuleTally<'a>] {
        &self.modules
    }

    /// Modules with at least one vote, by descending total. Equal totals keep
    /// catalog order.
    pub fn ranked(&self) -> Vec<&ModuleTally<'a>> {
        let mut ranked: Vec<_> = self.modules.iter().filter(|t| !t.counts.is_empty()).collect();
        ranked.sort_by(|a, b| b.counts.total().cmp(&a.counts.total()));
        ranked
    }

    #[cfg(test)]
    pub(crate) fn counts_for(&self, module_id: &str) -> Option<PriorityCounts> {
        self.modules
            .iter()
            .find(|t| t.module.id == module_id)
            .map(|t| t.counts)
    }

    pub fn totals(&self) -> PriorityCounts {
        self.totals
    }

    pub fn total_votes(&self) -> u32 {
        self.totals.total()
    }

    pub fn participant_count(&self) -> usize {
        self.participant_count
    }

    pub fn modules_voted(&self) -> usize {
        self.modules.iter().filter(|t| !t.counts.is_empty()).count()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    pub fn ignored_votes(&self) -> usize {
        self.ignored_votes
    }
}

use indexmap::IndexMap;
use variant_model::{Candidate, Occurrence, Report, ReportEntry};

/// Groups candidates by flagged character.
///
/// Occurrences keep arrival order inside a group; the final key order comes from
/// an explicit sort in [`Aggregator::finish`], never from arrival order.
#[derive(Debug, Default)]
pub struct Aggregator {
    groups: IndexMap<char, ReportEntry>,
}

impl Aggregator {
    pub fn new() -> Self { Self::default() }

    pub fn push(&mut self, candidate: Candidate) {
        let link = candidate.anchor();
        let entry = self.groups.entry(candidate.character).or_insert_with(|| ReportEntry {
            character: candidate.character,
            variants: candidate.variants.clone(),
            occurrences: Vec::new(),
        });
        entry.occurrences.push(Occurrence { chapter: candidate.chapter, context: candidate.context, link });
    }

    pub fn extend<I: IntoIterator<Item = Candidate>>(&mut self, candidates: I) {
        for c in candidates {
            self.push(c);
        }
    }

    /// Number of candidates pushed so far.
    pub fn occurrences(&self) -> usize {
        self.groups.values().map(|e| e.occurrences.len()).sum()
    }

    pub fn finish(self) -> Report {
        Report::from_entries(self.groups)
    }
}

pub fn aggregate<I: IntoIterator<Item = Candidate>>(candidates: I) -> Report {
    let mut agg = Aggregator::new();
    agg.extend(candidates);
    agg.finish()
}

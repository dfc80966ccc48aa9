use model::{
    ordered::{OrderedMap, Tally},
    record::SourceRecord,
};
use uuid::Uuid;

/// First-seen sample payloads, keyed by entity type name and then by
/// validation message. Two entity types producing identical message text
/// are tracked independently.
pub type InvalidSamples = OrderedMap<OrderedMap<SourceRecord>>;

/// State that lives for the whole import run.
#[derive(Debug)]
pub struct RunState {
    run_id: Uuid,
    quiet: bool,
    pub(crate) invalid_samples: InvalidSamples,
}

impl RunState {
    pub fn new(quiet: bool) -> Self {
        RunState {
            run_id: Uuid::new_v4(),
            quiet,
            invalid_samples: OrderedMap::new(),
        }
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// Production-mode flag: suppresses progress markers and notice
    /// tallies. Error tallies and invalid-sample collection stay active.
    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn invalid_samples(&self) -> &InvalidSamples {
        &self.invalid_samples
    }
}

/// State scoped to the collection currently being processed; reset at
/// every collection boundary.
#[derive(Debug, Default)]
pub struct CollectionState {
    pub(crate) notices: Tally,
    pub(crate) errors: Tally,
}

impl CollectionState {
    pub fn notices(&self) -> &Tally {
        &self.notices
    }

    pub fn errors(&self) -> &Tally {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_state_starts_empty() {
        let state = RunState::new(true);
        assert!(state.is_quiet());
        assert!(state.invalid_samples().is_empty());
    }

    #[test]
    fn test_collection_state_defaults_empty() {
        let state = CollectionState::default();
        assert!(state.notices().is_empty());
        assert!(state.errors().is_empty());
    }
}

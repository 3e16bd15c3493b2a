use serde::Deserialize;
use tracing::warn;

use crate::roster::RosterStore;

/// What to put in a roster that came back empty from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedPolicy {
    #[default]
    Demo,
    Empty,
}

const DEMO_RECORDS: &[(&str, &[i64])] = &[
    ("Alice Smith", &[95, 88]),
    ("Bob Johnson", &[72]),
    ("Charlie Brown", &[]),
];

impl SeedPolicy {
    /// Seeds `store` and returns the number of records added.
    pub fn apply(self, store: &RosterStore) -> usize {
        match self {
            SeedPolicy::Empty => 0,
            SeedPolicy::Demo => {
                let mut added = 0;
                for (name, scores) in DEMO_RECORDS {
                    match store
                        .add_record(name)
                        .and_then(|id| store.update_scores(id, scores.iter().copied()))
                    {
                        Ok(()) => added += 1,
                        Err(err) => warn!(name, error = %err, "skipping demo record"),
                    }
                }
                added
            }
        }
    }
}

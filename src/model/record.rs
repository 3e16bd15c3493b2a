use crate::model::Grade;

pub const SCORE_MIN: i64 = 0;
pub const SCORE_MAX: i64 = 100;

/// Identity of a record inside one roster. Assigned by the store and never
/// reused, so a stale id from a removed record cannot hit its replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub u64);

/// Anything that can be averaged and graded.
pub trait Gradable {
    fn average(&self) -> f64;

    fn letter_grade(&self) -> Grade {
        Grade::from_average(self.average())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    id: RecordId,
    name: String,
    scores: Vec<u8>,
}

pub fn score_in_range(value: i64) -> bool {
    (SCORE_MIN..=SCORE_MAX).contains(&value)
}

impl ScoreRecord {
    pub fn new(id: RecordId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            scores: Vec::new(),
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scores(&self) -> &[u8] {
        &self.scores
    }

    /// Appends `value` when it lies in 0..=100. Out-of-range values are
    /// dropped; the return value tells whether the score was stored.
    pub fn add_score(&mut self, value: i64) -> bool {
        if !score_in_range(value) {
            return false;
        }
        self.scores.push(value as u8);
        true
    }

    /// Replaces the whole score sequence, dropping out-of-range values with
    /// the same rule as [`add_score`](Self::add_score).
    pub fn set_scores<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = i64>,
    {
        self.scores.clear();
        for value in values {
            self.add_score(value);
        }
    }

    pub fn matches_name(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

impl Gradable for ScoreRecord {
    fn average(&self) -> f64 {
        if self.scores.is_empty() {
            return 0.0;
        }
        let sum: u64 = self.scores.iter().map(|&s| u64::from(s)).sum();
        sum as f64 / self.scores.len() as f64
    }
}

pub fn join_scores(scores: &[u8]) -> String {
    scores
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Case-insensitive comparison after trimming, used for roster uniqueness.
pub fn names_equal(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/record.rs"]
mod tests;

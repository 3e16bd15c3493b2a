pub mod grade;
pub mod record;

pub use grade::Grade;
pub use record::{Gradable, RecordId, ScoreRecord};

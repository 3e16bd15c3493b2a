use std::fmt;

/// Letter grade derived from a score average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Thresholds are inclusive: an average of exactly 90.0 is an A.
    pub fn from_average(average: f64) -> Self {
        if average >= 90.0 {
            Grade::A
        } else if average >= 80.0 {
            Grade::B
        } else if average >= 70.0 {
            Grade::C
        } else if average >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

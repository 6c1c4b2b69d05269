//! Enrollment models for the planning engine.
//!
//! The school runs five grades over a five-year plan horizon. Each year's
//! first grade is an independent input; every other grade is filled by
//! cohort promotion from the previous year.

use serde::{Deserialize, Serialize};

use crate::{GRADES, PLAN_YEARS};

/// A school grade, first through fifth year.
///
/// # Example
///
/// ```
/// use plan_engine::models::Grade;
///
/// assert_eq!(Grade::First.position(), 0);
/// assert_eq!(Grade::ALL.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Grade {
    /// First grade, fed directly by the new-intake input.
    First,
    /// Second grade.
    Second,
    /// Third grade.
    Third,
    /// Fourth grade.
    Fourth,
    /// Fifth grade.
    Fifth,
}

impl Grade {
    /// All grades in promotion order.
    pub const ALL: [Grade; GRADES] = [
        Grade::First,
        Grade::Second,
        Grade::Third,
        Grade::Fourth,
        Grade::Fifth,
    ];

    /// The 0-based position of this grade in promotion order.
    pub fn position(self) -> usize {
        self as usize
    }

    /// The grade one position earlier in promotion order, if any.
    pub fn previous(self) -> Option<Grade> {
        match self {
            Grade::First => None,
            Grade::Second => Some(Grade::First),
            Grade::Third => Some(Grade::Second),
            Grade::Fourth => Some(Grade::Third),
            Grade::Fifth => Some(Grade::Fourth),
        }
    }
}

/// A 5-year × 5-grade matrix of non-negative student counts.
///
/// Invariant (established by the projector): for every year `y > 1` and
/// grade position `p > 1`, `count(y, p) == count(y - 1, p - 1)`, and every
/// grade past the first is empty in year 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentMatrix {
    /// Student counts, indexed `[year][grade]`, both 0-based.
    counts: [[u32; GRADES]; PLAN_YEARS],
}

impl EnrollmentMatrix {
    /// Creates a matrix from raw counts indexed `[year][grade]`.
    pub fn new(counts: [[u32; GRADES]; PLAN_YEARS]) -> Self {
        Self { counts }
    }

    /// The student count for a 0-based year index and grade.
    pub fn count(&self, year_index: usize, grade: Grade) -> u32 {
        self.counts[year_index][grade.position()]
    }

    /// The full grade row for a 0-based year index.
    pub fn grade_row(&self, year_index: usize) -> [u32; GRADES] {
        self.counts[year_index]
    }

    /// Total enrollment for a 0-based year index.
    pub fn total(&self, year_index: usize) -> u32 {
        self.counts[year_index].iter().sum()
    }

    /// Total enrollment for every plan year.
    pub fn totals(&self) -> [u32; PLAN_YEARS] {
        let mut totals = [0u32; PLAN_YEARS];
        for (year_index, total) in totals.iter_mut().enumerate() {
            *total = self.total(year_index);
        }
        totals
    }
}

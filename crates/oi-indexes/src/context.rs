//! `EvaluationContext`: the "as of" state of a rate query.

use crate::fixing_history::FixingHistory;
use oi_time::Date;

/// The evaluation ("today") date together with the fixings published so
/// far.
///
/// Threaded explicitly through every rate and valuation query; nothing in
/// the library reads a process-wide date.  Curves queried under a context
/// must be anchored at its evaluation date.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    /// Fixings strictly before this date must be published; fixings after
    /// it are forecast.
    pub evaluation_date: Date,
    /// Published fixings.
    pub fixings: &'a dyn FixingHistory,
}

impl<'a> EvaluationContext<'a> {
    /// Context for `evaluation_date` reading fixings from `fixings`.
    pub fn new(evaluation_date: Date, fixings: &'a dyn FixingHistory) -> Self {
        Self {
            evaluation_date,
            fixings,
        }
    }
}

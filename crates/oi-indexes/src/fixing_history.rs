//! Published fixings.
//!
//! Rate computations only ever read fixings; publishing them is the
//! business of whoever owns the store.  The read side is the
//! [`FixingHistory`] trait so callers can plug in a database-backed
//! history; [`IndexManager`] keeps everything in memory.

use oi_core::errors::{Error, Result};
use oi_core::{Rate, TimeSeries};
use oi_time::Date;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Read-only access to published index fixings.
pub trait FixingHistory: std::fmt::Debug + Send + Sync {
    /// The fixing of `index_name` on `date`.
    ///
    /// `Ok(None)` means "not published (yet)"; `Err` means the history
    /// could not be read.
    fn fixing(&self, index_name: &str, date: Date) -> Result<Option<Rate>>;
}

/// In-memory fixing store keyed by index name (case-insensitive).
#[derive(Debug, Default)]
pub struct IndexManager {
    histories: RwLock<HashMap<String, TimeSeries<Date, Rate>>>,
}

impl IndexManager {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the fixing of `index_name` on `date`.
    ///
    /// # Errors
    /// Re-publishing a different value for an existing date fails unless
    /// `force_overwrite` is set.
    pub fn add_fixing(
        &self,
        index_name: &str,
        date: Date,
        value: Rate,
        force_overwrite: bool,
    ) -> Result<()> {
        self.add_fixings(index_name, [(date, value)], force_overwrite)
    }

    /// Record several fixings of `index_name` at once.  Nothing is stored
    /// if any of them conflicts with an existing value.
    pub fn add_fixings(
        &self,
        index_name: &str,
        fixings: impl IntoIterator<Item = (Date, Rate)>,
        force_overwrite: bool,
    ) -> Result<()> {
        let fixings: Vec<_> = fixings.into_iter().collect();
        let mut histories = self
            .histories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let series = histories.entry(key(index_name)).or_default();
        if !force_overwrite {
            for &(date, value) in &fixings {
                if let Some(&existing) = series.get(&date) {
                    if existing != value {
                        return Err(Error::InvalidArgument(format!(
                            "duplicated {index_name} fixing provided: {date}, {value} \
                             while {existing} value is already present"
                        )));
                    }
                }
            }
        }
        for (date, value) in fixings {
            if let Some(old) = series.insert(date, value) {
                if old != value {
                    debug!(index = index_name, %date, old, new = value, "fixing overwritten");
                }
            }
        }
        Ok(())
    }

    /// Copy of the full history of `index_name` (empty if none).
    pub fn history(&self, index_name: &str) -> TimeSeries<Date, Rate> {
        self.histories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(index_name))
            .cloned()
            .unwrap_or_default()
    }

    /// `true` if at least one fixing of `index_name` is stored.
    pub fn has_history(&self, index_name: &str) -> bool {
        self.histories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key(index_name))
            .is_some_and(|s| !s.is_empty())
    }

    /// Drop every fixing of `index_name`.
    pub fn clear_history(&self, index_name: &str) {
        self.histories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&key(index_name));
    }

    /// Drop all fixings of all indexes.
    pub fn clear_histories(&self) {
        self.histories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl FixingHistory for IndexManager {
    fn fixing(&self, index_name: &str, date: Date) -> Result<Option<Rate>> {
        let histories = self
            .histories
            .read()
            .map_err(|_| Error::Runtime("fixing history lock poisoned".into()))?;
        Ok(histories
            .get(&key(index_name))
            .and_then(|s| s.get(&date).copied()))
    }
}

fn key(index_name: &str) -> String {
    index_name.to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn store_and_read_back() {
        let im = IndexManager::new();
        let d = date(2025, 1, 15);
        im.add_fixing("EUR-ESTR", d, 0.0291, false).unwrap();
        assert_eq!(im.fixing("eur-estr", d).unwrap(), Some(0.0291));
        assert_eq!(im.fixing("EUR-ESTR", date(2025, 1, 16)).unwrap(), None);
        assert_eq!(im.fixing("USD-SOFR", d).unwrap(), None);
        assert!(im.has_history("EUR-ESTR"));
    }

    #[test]
    fn conflicting_fixing_rejected_unless_forced() {
        let im = IndexManager::new();
        let d = date(2025, 1, 15);
        im.add_fixing("SOFR", d, 0.043, false).unwrap();
        im.add_fixing("SOFR", d, 0.043, false).unwrap();
        assert!(im.add_fixing("SOFR", d, 0.044, false).is_err());
        assert_eq!(im.fixing("SOFR", d).unwrap(), Some(0.043));
        im.add_fixing("SOFR", d, 0.044, true).unwrap();
        assert_eq!(im.fixing("SOFR", d).unwrap(), Some(0.044));
    }

    #[test]
    fn batch_is_all_or_nothing() {
        let im = IndexManager::new();
        im.add_fixing("SOFR", date(2025, 1, 15), 0.043, false).unwrap();
        let batch = [(date(2025, 1, 14), 0.042), (date(2025, 1, 15), 0.05)];
        assert!(im.add_fixings("SOFR", batch, false).is_err());
        assert_eq!(im.history("SOFR").len(), 1);
        im.clear_history("sofr");
        assert!(!im.has_history("SOFR"));
    }
}

use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{Field, RecordStore};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A failed statistic names the offending field and aborts that computation
/// only; the store it was asked about is an immutable snapshot and survives.
/// No statistic ever substitutes a default value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("no entries to compute {0} statistic over")]
    Empty(Field),
    #[error("field {0} is not numeric")]
    NonNumeric(Field),
    #[error("no unique mode for field {0}: most frequent value is tied")]
    NoUniqueMode(Field),
}

// ---------------------------------------------------------------------------
// Statistics over a plucked numeric sequence
// ---------------------------------------------------------------------------

impl RecordStore {
    /// Pluck `field` and require every value to be numeric.
    fn numeric_values(&self, field: Field) -> Result<Vec<i64>, StatsError> {
        self.pluck(field)
            .iter()
            .map(|v| v.as_i64().ok_or(StatsError::NonNumeric(field)))
            .collect()
    }

    fn non_empty_values(&self, field: Field) -> Result<Vec<i64>, StatsError> {
        let values = self.numeric_values(field)?;
        if values.is_empty() {
            return Err(StatsError::Empty(field));
        }
        Ok(values)
    }

    /// Largest value of `field`.
    pub fn max(&self, field: Field) -> Result<i64, StatsError> {
        self.numeric_values(field)?
            .into_iter()
            .max()
            .ok_or(StatsError::Empty(field))
    }

    /// Smallest value of `field`.
    pub fn min(&self, field: Field) -> Result<i64, StatsError> {
        self.numeric_values(field)?
            .into_iter()
            .min()
            .ok_or(StatsError::Empty(field))
    }

    /// Arithmetic mean of `field`.
    pub fn mean(&self, field: Field) -> Result<f64, StatsError> {
        let values = self.non_empty_values(field)?;
        Ok(values.iter().sum::<i64>() as f64 / values.len() as f64)
    }

    /// Median of `field`: the middle of the sorted values, or the midpoint of
    /// the two middle values when the count is even.
    pub fn median(&self, field: Field) -> Result<f64, StatsError> {
        let mut values = self.non_empty_values(field)?;
        values.sort_unstable();
        let n = values.len();
        let mid = n / 2;
        if n % 2 == 1 {
            Ok(values[mid] as f64)
        } else {
            Ok((values[mid - 1] + values[mid]) as f64 / 2.0)
        }
    }

    /// Single most frequent value of `field`. A tie for the top frequency is
    /// reported as [`StatsError::NoUniqueMode`] rather than broken silently.
    pub fn mode(&self, field: Field) -> Result<i64, StatsError> {
        let values = self.non_empty_values(field)?;
        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for v in values {
            *counts.entry(v).or_default() += 1;
        }
        let best = counts.values().copied().max().unwrap_or(0);
        let mut top = counts.iter().filter(|(_, &c)| c == best).map(|(&v, _)| v);
        match (top.next(), top.next()) {
            (Some(value), None) => Ok(value),
            _ => Err(StatsError::NoUniqueMode(field)),
        }
    }

    /// Mean of the consecutive differences `value[i+1] - value[i]`, taken in
    /// the store's **existing order** (not re-sorted): it measures average
    /// period-over-period change assuming the entries are already in a
    /// meaningful sequence, e.g. filtered to one region in year order.
    ///
    /// A single-entry store returns that entry's value unchanged.
    pub fn average_increase(&self, field: Field) -> Result<f64, StatsError> {
        let values = self.non_empty_values(field)?;
        if values.len() == 1 {
            return Ok(values[0] as f64);
        }
        let deltas: Vec<i64> = values.windows(2).map(|w| w[1] - w[0]).collect();
        Ok(deltas.iter().sum::<i64>() as f64 / deltas.len() as f64)
    }
}

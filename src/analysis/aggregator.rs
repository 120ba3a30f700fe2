//! Aggregator
//! Pure reducers over resolved match rows.

use crate::model::ResolvedMatch;
use serde::Serialize;
use std::cmp::Reverse;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Ratio is undefined: no rows match the denominator ({numerator} match the numerator)")]
    UndefinedRatio { numerator: usize },
}

/// A categorical field of a resolved row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    City,
    TeamName,
    Winner,
    WinType,
    Season,
}

impl Dimension {
    fn value(self, row: &ResolvedMatch) -> Option<String> {
        match self {
            Dimension::City => row.row.city_name.clone(),
            Dimension::TeamName => Some(row.row.team_name.clone()),
            Dimension::Winner => row.winner_team_name().map(str::to_string),
            Dimension::WinType => Some(row.row.win_type.label().to_string()),
            Dimension::Season => Some(row.row.season_id.to_string()),
        }
    }
}

/// Occurrences of each distinct value, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValueCounts {
    pub entries: Vec<(String, usize)>,
    /// Rows with no value for the dimension.
    pub missing: usize,
}

impl ValueCounts {
    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(label, _)| label == value)
            .map(|(_, count)| *count)
    }

    /// Rows counted, including those with no value.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum::<usize>() + self.missing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    Max,
    Min,
}

/// Reducers over a borrowed slice of resolved rows.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator<'a> {
    rows: &'a [ResolvedMatch],
}

impl<'a> Aggregator<'a> {
    pub fn new(rows: &'a [ResolvedMatch]) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn count_by<P>(&self, predicate: P) -> usize
    where
        P: Fn(&ResolvedMatch) -> bool,
    {
        self.rows.iter().filter(|&row| predicate(row)).count()
    }

    pub fn value_counts(&self, dimension: Dimension) -> ValueCounts {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut missing = 0;

        for row in self.rows {
            match dimension.value(row) {
                Some(value) => *counts.entry(value).or_default() += 1,
                None => missing += 1,
            }
        }

        let mut entries: Vec<(String, usize)> = counts.into_iter().collect();
        entries.sort_by(|a, b| (Reverse(a.1), &a.0).cmp(&(Reverse(b.1), &b.0)));

        ValueCounts { entries, missing }
    }

    /// Share of the rows matching `denominator` that also match `numerator`.
    pub fn ratio<N, D>(&self, numerator: N, denominator: D) -> Result<f64, AggregateError>
    where
        N: Fn(&ResolvedMatch) -> bool,
        D: Fn(&ResolvedMatch) -> bool,
    {
        let (hits, total) = self
            .rows
            .iter()
            .filter(|&row| denominator(row))
            .fold((0usize, 0usize), |(hits, total), row| {
                (hits + usize::from(numerator(row)), total + 1)
            });

        if total == 0 {
            return Err(AggregateError::UndefinedRatio {
                numerator: self.count_by(&numerator),
            });
        }
        Ok(hits as f64 / total as f64)
    }

    /// Every row where `field` reaches its extreme value. Rows without a
    /// value are skipped. All fields of a returned row belong to that row.
    pub fn extremum<F>(&self, field: F, extreme: Extreme) -> Vec<&'a ResolvedMatch>
    where
        F: Fn(&ResolvedMatch) -> Option<u32>,
    {
        let values = self.rows.iter().filter_map(|row| field(row));
        let target = match extreme {
            Extreme::Max => values.max(),
            Extreme::Min => values.min(),
        };

        let Some(target) = target else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|&row| field(row) == Some(target))
            .collect()
    }
}

// Rust guideline compliant 2026-02-06

//! Sparse access-frequency matrix keyed by service and hour of day.

use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Number of hour slots per service row.
pub const HOURS_PER_DAY: i32 = 24;

/// Per-service access counters.
#[derive(Debug, Clone)]
struct AccessRow {
    service: String,
    /// Only hours that have been recorded are present.
    counts: BTreeMap<u8, u64>,
    total: u64,
}

/// Sparse (service × hour) access counters with top-N ranking.
///
/// Rows are created lazily on the first access to a service and keep their
/// first-recorded order, which breaks ties when ranking.
#[derive(Debug, Clone, Default)]
pub struct AccessFrequencyMatrix {
    rows: Vec<AccessRow>,
    index: HashMap<String, usize>,
}

impl AccessFrequencyMatrix {
    /// Creates an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one access to `service` during `hour`.
    ///
    /// Hours outside `0..=23` are ignored.
    ///
    /// # Returns
    ///
    /// True if the access was counted.
    pub fn record_access(&mut self, service: &str, hour: i32) -> bool {
        if !(0..HOURS_PER_DAY).contains(&hour) {
            debug!(service, hour, "ignoring access record with out-of-range hour");
            return false;
        }

        let row = match self.index.get(service) {
            Some(&position) => &mut self.rows[position],
            None => {
                self.index.insert(service.to_string(), self.rows.len());
                self.rows.push(AccessRow {
                    service: service.to_string(),
                    counts: BTreeMap::new(),
                    total: 0,
                });
                let last = self.rows.len() - 1;
                &mut self.rows[last]
            }
        };

        *row.counts.entry(hour as u8).or_insert(0) += 1;
        row.total += 1;
        trace!(service, hour, total = row.total, "recorded access");
        true
    }

    fn row(&self, service: &str) -> Option<&AccessRow> {
        self.index.get(service).map(|&position| &self.rows[position])
    }

    /// Returns the hour → count mapping for a service, empty if never recorded.
    pub fn access_pattern(&self, service: &str) -> BTreeMap<u8, u64> {
        self.row(service)
            .map(|row| row.counts.clone())
            .unwrap_or_default()
    }

    /// Returns the total number of accesses for a service, 0 if unknown.
    pub fn total_access_count(&self, service: &str) -> u64 {
        self.row(service).map_or(0, |row| row.total)
    }

    /// Returns up to `top_n` services ordered by total accesses, most first.
    ///
    /// Services with equal totals keep their first-recorded order.
    pub fn most_accessed_services(&self, top_n: usize) -> Vec<String> {
        if top_n == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<&AccessRow> = self.rows.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.total.cmp(&a.total));
        ranked
            .into_iter()
            .take(top_n)
            .map(|row| row.service.clone())
            .collect()
    }

    /// Returns every tracked service with its total, in first-recorded order.
    pub fn totals(&self) -> Vec<(String, u64)> {
        self.rows
            .iter()
            .map(|row| (row.service.clone(), row.total))
            .collect()
    }

    /// Returns every tracked service in first-recorded order.
    pub fn services(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.service.clone()).collect()
    }

    /// Returns the number of tracked services.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if no access has been recorded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Discards all counters.
    pub fn clear(&mut self) {
        self.rows.clear();
        self.index.clear();
    }
}

use crate::{classify::Classification, level::Level};
use std::{cmp::Reverse, collections::HashMap, fmt};

/// Number of error messages listed under "Most frequent errors".
pub const TOP_ERRORS: usize = 5;

const BANNER_WIDTH: usize = 30;
const LEVEL_WIDTH: usize = 8;

/// Per-level counts and ERROR message frequencies for a single run.
#[derive(Debug, Default, Clone)]
pub struct ReportAggregator {
    counts: [u64; Level::ALL.len()],
    // Messages in first-seen order, with their counts
    errors: Vec<(String, u64)>,
    error_index: HashMap<String, usize>,
}

impl ReportAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, classification: Classification) {
        if let Classification::Matched { level, message } = classification {
            self.counts[level.index()] += 1;
            if level == Level::Error {
                if let Some(message) = message {
                    self.record_error(message);
                }
            }
        }
    }

    fn record_error(&mut self, message: String) {
        match self.error_index.get(&message) {
            Some(&i) => self.errors[i].1 += 1,
            None => {
                self.error_index.insert(message.clone(), self.errors.len());
                self.errors.push((message, 1));
            }
        }
    }

    pub fn count(&self, level: Level) -> u64 {
        self.counts[level.index()]
    }

    /// Sum of all level counts, i.e. the number of matched lines.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Up to `n` error messages, most frequent first. Equal counts keep first-seen order.
    pub fn top_errors(&self, n: usize) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(usize, u64)> = self.errors.iter().map(|(_, count)| *count).enumerate().collect();
        ranked.sort_by_key(|&(first_seen, count)| (Reverse(count), first_seen));
        ranked.into_iter().take(n).map(|(i, count)| (self.errors[i].0.as_str(), count)).collect()
    }

    /// Format the summary. Does not change any state.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ReportAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        writeln!(f, "Log Analysis Report")?;
        writeln!(f, "{}", "=".repeat(BANNER_WIDTH))?;
        writeln!(f, "Total log entries: {}", self.total())?;
        writeln!(f)?;
        for level in Level::ALL {
            writeln!(f, "{:<width$}: {}", level, self.count(level), width = LEVEL_WIDTH)?;
        }
        if !self.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Most frequent errors:")?;
            for (message, count) in self.top_errors(TOP_ERRORS) {
                writeln!(f, "- ({}x) {}", count, message)?;
            }
        }
        Ok(())
    }
}

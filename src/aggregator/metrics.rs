//! Calculate summary metrics and hot paths from flat entries.
//!
//! Hot paths are the frame paths carrying the most weight.
//! These are the primary targets for optimization.

use super::trie::FlatEntry;
use crate::output::schema::HotPath;
use log::debug;
use std::cmp::Ordering;

/// Calculate hot paths from flat entries
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `entries` - Flat entries from the finalized trie
/// * `total_weight` - Denominator for percentages
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by weight (descending), ties by name
pub fn calculate_hot_paths(entries: &[FlatEntry], total_weight: f64, top_n: usize) -> Vec<HotPath> {
    debug!(
        "Calculating top {} hot paths from {} entries",
        top_n,
        entries.len()
    );

    let mut ranked: Vec<&FlatEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| {
        b.weight
            .partial_cmp(&a.weight)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });

    ranked
        .into_iter()
        .take(top_n)
        .map(|entry| create_hot_path(entry, total_weight))
        .collect()
}

/// Create a HotPath from a FlatEntry
pub fn create_hot_path(entry: &FlatEntry, denominator: f64) -> HotPath {
    let percentage = if denominator > 0.0 {
        (entry.weight / denominator) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: entry.name.clone(),
        weight: entry.weight,
        percentage,
    }
}

/// Calculate weight distribution statistics
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `entries` - Flat entries
///
/// # Returns
/// Statistics about weight distribution
pub fn calculate_weight_distribution(entries: &[FlatEntry]) -> WeightDistribution {
    if entries.is_empty() {
        return WeightDistribution::default();
    }

    let total: f64 = entries.iter().map(|e| e.weight).sum();
    let count = entries.len();
    let mean = total / count as f64;

    let mut weights: Vec<f64> = entries.iter().map(|e| e.weight).collect();
    weights.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let median = weights[weights.len() / 2];

    // Top 10% of paths, heaviest first
    let top_10_percent_count = (count as f64 * 0.1).ceil() as usize;
    let top_10_percent_weight: f64 = weights.iter().rev().take(top_10_percent_count).sum();

    WeightDistribution {
        total_weight: total,
        path_count: count,
        mean_weight: mean,
        median_weight: median,
        top_10_percent_percentage: if total > 0.0 {
            (top_10_percent_weight / total) * 100.0
        } else {
            0.0
        },
    }
}

/// Weight distribution statistics
///
/// **Public** - returned from calculate_weight_distribution
#[derive(Debug, Clone, Default)]
pub struct WeightDistribution {
    /// Total weight across all paths
    pub total_weight: f64,

    /// Number of weighted paths
    pub path_count: usize,

    /// Mean weight per path
    pub mean_weight: f64,

    /// Median weight per path
    pub median_weight: f64,

    /// Percentage of total weight in the heaviest 10% of paths
    pub top_10_percent_percentage: f64,
}

impl WeightDistribution {
    /// True when the heaviest 10% of paths carry more than 80% of the weight
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} | Paths: {} | Mean: {:.1} | Median: {} | Top 10%: {:.1}%",
            self.total_weight,
            self.path_count,
            self.mean_weight,
            self.median_weight,
            self.top_10_percent_percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ties_sort_by_name() {
        let entries = vec![
            FlatEntry::new("b", 2.0),
            FlatEntry::new("a", 2.0),
            FlatEntry::new("c", 9.0),
        ];

        let hot = calculate_hot_paths(&entries, 13.0, 3);
        let names: Vec<&str> = hot.iter().map(|h| h.stack.as_str()).collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_zero_denominator() {
        let hot = create_hot_path(&FlatEntry::new("a", 2.0), 0.0);
        assert_eq!(hot.percentage, 0.0);
    }

    #[test]
    fn test_concentration() {
        let entries = vec![
            FlatEntry::new("hot", 90.0),
            FlatEntry::new("warm", 5.0),
            FlatEntry::new("cool", 5.0),
        ];
        let dist = calculate_weight_distribution(&entries);
        assert!(dist.is_highly_concentrated());
        assert_eq!(dist.median_weight, 5.0);
    }
}

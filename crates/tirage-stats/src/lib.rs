//! Statistics used to report training progress.
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a generation's fitness values
//!
//! ```
//! use tirage_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [6.5, 7.0, 6.75];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.max, 7.0);
//! assert_eq!(stats.count, 3);
//! ```

pub mod descriptive;

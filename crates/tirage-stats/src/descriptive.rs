/// Descriptive statistics summarizing a set of `f32` samples.
///
/// Used to summarize the fitness values of one generation and the spread of
/// each module weight across a population.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// Number of samples.
    pub count: usize,
    /// The smallest sample.
    pub min: f32,
    /// The largest sample.
    pub max: f32,
    /// The arithmetic mean.
    pub mean: f32,
    /// The median (upper median for an even number of samples).
    pub median: f32,
    /// The population standard deviation.
    pub std_dev: f32,
}

impl DescriptiveStats {
    /// Computes statistics over unsorted samples.
    ///
    /// Returns `None` when there are no samples.
    ///
    /// # Examples
    ///
    /// ```
    /// # use tirage_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::new([5.0, 2.0, 4.0, 1.0, 3.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// assert_eq!(stats.median, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f32::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes statistics over samples already sorted in ascending order.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f32]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let n = count as f32;
        let mean = sorted_values.iter().sum::<f32>() / n;
        let median = sorted_values[count / 2];
        let variance = sorted_values
            .iter()
            .map(|v| (v - mean).powi(2))
            .sum::<f32>()
            / n;

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
        })
    }

    /// Spread relative to the range (`std_dev / (max - min)`), 0 for a constant sample.
    #[must_use]
    pub fn normalized_std_dev(&self) -> f32 {
        let range = self.max - self.min;
        if range <= f32::EPSILON * self.mean.abs().max(1.0) {
            0.0
        } else {
            self.std_dev / range
        }
    }
}

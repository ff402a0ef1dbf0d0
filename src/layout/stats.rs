/// Running statistics over leaf weights.
///
/// `min` and `max` start negative to mark "no leaf seen yet"; the first leaf
/// recorded initializes them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub min: f64,
    pub max: f64,
    pub sum: f64,
    pub count: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: -1.0,
            sum: 0.0,
            count: 0,
        }
    }
}

impl Stats {
    pub fn record(&mut self, weight: f64) {
        if self.min < 0.0 || weight < self.min {
            self.min = weight;
        }
        if self.max < 0.0 || weight > self.max {
            self.max = weight;
        }
        self.sum += weight;
        self.count += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::Stats;

    #[test]
    fn first_leaf_initializes_min_and_max() {
        let mut stats = Stats::default();
        assert!(stats.is_empty());
        stats.record(3.0);
        assert_eq!((stats.min, stats.max), (3.0, 3.0));
        stats.record(1.0);
        stats.record(20.0);
        assert_eq!((stats.min, stats.max, stats.sum, stats.count), (1.0, 20.0, 24.0, 3));
        assert_eq!(stats.mean(), Some(8.0));
    }

    #[test]
    fn zero_weight_leaf_is_a_valid_minimum() {
        let mut stats = Stats::default();
        stats.record(0.0);
        stats.record(5.0);
        assert_eq!(stats.min, 0.0);
    }
}

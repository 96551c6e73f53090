//! Staggered start offsets for families of elements

use serde::Serialize;

/// Order in which staggered elements start
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum StaggerDirection {
    /// First to last
    #[default]
    Forward,
    /// Last to first
    Reverse,
    /// Center outward
    FromCenter,
}

/// Delay between consecutive elements of a staggered group
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StaggerConfig {
    /// Delay between each element's start (ms)
    pub each_ms: f32,
    pub direction: StaggerDirection,
    /// Stop growing the delay after this many steps
    pub limit: Option<usize>,
}

impl StaggerConfig {
    pub fn new(each_ms: f32) -> Self {
        Self {
            each_ms,
            direction: StaggerDirection::Forward,
            limit: None,
        }
    }

    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Start offset of the element at `index` in a group of `total`
    pub fn delay_for_index(&self, index: usize, total: usize) -> f32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                index.abs_diff(center)
            }
        };

        let capped_index = match self.limit {
            Some(limit) => effective_index.min(limit),
            None => effective_index,
        };

        self.each_ms * capped_index as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward() {
        let stagger = StaggerConfig::new(100.0);
        let delays: Vec<f32> = (0..4).map(|i| stagger.delay_for_index(i, 4)).collect();
        assert_eq!(delays, vec![0.0, 100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_reverse() {
        let stagger = StaggerConfig::new(50.0).reverse();
        assert_eq!(stagger.delay_for_index(0, 3), 100.0);
        assert_eq!(stagger.delay_for_index(2, 3), 0.0);
    }

    #[test]
    fn test_from_center_and_limit() {
        let stagger = StaggerConfig::new(10.0).from_center();
        assert_eq!(stagger.delay_for_index(2, 5), 0.0);
        assert_eq!(stagger.delay_for_index(0, 5), 20.0);
        assert_eq!(stagger.delay_for_index(4, 5), 20.0);

        let limited = StaggerConfig::new(10.0).limit(2);
        assert_eq!(limited.delay_for_index(7, 8), 20.0);
    }
}

use num_traits::Num;

/// Hold-last-good filter for range sensors that report "no echo" as an
/// out-of-range sentinel.
///
/// Samples at or above `sentinel` are invalid. Up to `limit` consecutive
/// invalid samples are replaced with the last valid one; after that the raw
/// samples are passed through until a valid sample arrives.
pub struct InvalidSampleFilter<ItemT> {
    sentinel: ItemT,
    limit: usize,
    prev: ItemT,
    invalid_count: usize,
}
impl<ItemT> InvalidSampleFilter<ItemT>
where
    ItemT: Num + PartialOrd + core::marker::Copy,
{
    pub fn new(sentinel: ItemT, limit: usize) -> InvalidSampleFilter<ItemT> {
        InvalidSampleFilter {
            sentinel,
            limit,
            prev: ItemT::zero(),
            invalid_count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.prev = ItemT::zero();
        self.invalid_count = 0;
    }

    pub fn update(&mut self, data: ItemT) -> ItemT {
        if self.is_valid(data) {
            self.invalid_count = 0;
            self.prev = data;
            data
        } else if self.invalid_count < self.limit {
            self.invalid_count += 1;
            self.prev
        } else {
            // sustained dropout, stop trusting the stale value
            data
        }
    }

    // last valid sample, zero before the first one
    pub fn filtered(&self) -> ItemT {
        self.prev
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_count
    }

    pub fn is_valid(&self, data: ItemT) -> bool {
        data < self.sentinel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_samples_pass_through_and_reset_count() {
        let mut filter = InvalidSampleFilter::<i32>::new(255, 2);
        filter.update(300);
        assert_eq!(filter.invalid_count(), 1);

        for sample in [0, -4, 17, 254, 42] {
            assert_eq!(filter.update(sample), sample);
            assert_eq!(filter.invalid_count(), 0);
            assert_eq!(filter.filtered(), sample);
        }
    }

    #[test]
    fn holds_last_good_up_to_limit() {
        let mut filter = InvalidSampleFilter::<i32>::new(255, 3);
        filter.update(31);
        for k in 1..=3 {
            assert_eq!(filter.update(255), 31, "call {k} should hold last good");
            assert_eq!(filter.invalid_count(), k);
        }
    }

    #[test]
    fn passes_raw_after_limit() {
        let mut filter = InvalidSampleFilter::<i32>::new(255, 2);
        let outputs: [i32; 4] = [260, 260, 260, 8].map(|s| filter.update(s));
        assert_eq!(outputs, [0, 0, 260, 8]);
    }

    #[test]
    fn pass_through_keeps_last_good_and_count_at_limit() {
        let mut filter = InvalidSampleFilter::<i32>::new(255, 1);
        filter.update(20);
        assert_eq!(filter.update(255), 20);
        assert_eq!(filter.update(270), 270);
        assert_eq!(filter.update(255), 255);
        assert_eq!(filter.invalid_count(), 1);
        assert_eq!(filter.filtered(), 20);

        assert_eq!(filter.update(19), 19);
        assert_eq!(filter.invalid_count(), 0);
        assert_eq!(filter.update(300), 19);
    }

    #[test]
    fn zero_limit_never_holds() {
        let mut filter = InvalidSampleFilter::<i32>::new(255, 0);
        filter.update(12);
        assert_eq!(filter.update(255), 255);
    }

    #[test]
    fn reset_clears_state() {
        let mut filter = InvalidSampleFilter::<f32>::new(2.55, 5);
        filter.update(0.3);
        filter.update(2.55);
        filter.reset();
        assert_eq!(filter.invalid_count(), 0);
        assert_eq!(filter.filtered(), 0.0);
        assert!(!filter.is_valid(2.6));
    }
}

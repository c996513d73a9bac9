//! Quality levels visited by the search.

/// Strictly decreasing sequence of quality levels from a start value down
/// to (and including, when hit exactly) a floor.
///
/// ```ignore
/// let levels: Vec<u8> = QualitySchedule::new(100, 10, 30).collect();
/// assert_eq!(levels, vec![100, 90, 80, 70, 60, 50, 40, 30]);
/// ```
#[derive(Debug, Clone)]
pub struct QualitySchedule {
    next: Option<u8>,
    step: u8,
    min: u8,
}

impl QualitySchedule {
    pub fn new(start: u8, step: u8, min: u8) -> Self {
        // A zero step would never terminate
        let next = (step > 0).then_some(start);
        Self { next, step, min }
    }
}

impl Iterator for QualitySchedule {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let quality = self.next.filter(|q| *q >= self.min)?;
        self.next = quality.checked_sub(self.step);
        Some(quality)
    }
}

impl std::iter::FusedIterator for QualitySchedule {}

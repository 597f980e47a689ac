//! Page indicator model.

use crate::scroll::ScrollSnapshot;

/// One dot of the indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorMarker {
    pub index: usize,
    pub selected: bool,
}

/// Stateless indicator: `count` markers, the resting one selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndicator {
    count: usize,
    selected: usize,
}

impl PageIndicator {
    pub fn new(count: usize, resting_index: usize) -> Self {
        Self {
            count,
            selected: resting_index,
        }
    }

    pub fn from_snapshot(snapshot: &ScrollSnapshot) -> Self {
        Self::new(snapshot.item_count, snapshot.resting_index)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Selected marker, `None` when there are no markers.
    pub fn selected(&self) -> Option<usize> {
        (self.selected < self.count).then_some(self.selected)
    }

    pub fn markers(&self) -> impl Iterator<Item = IndicatorMarker> + '_ {
        (0..self.count).map(move |index| IndicatorMarker {
            index,
            selected: index == self.selected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlights_resting_index() {
        let indicator = PageIndicator::new(5, 2);
        let selected: Vec<usize> = indicator
            .markers()
            .filter(|marker| marker.selected)
            .map(|marker| marker.index)
            .collect();
        assert_eq!(indicator.markers().count(), 5);
        assert_eq!(selected, vec![2]);
        assert_eq!(indicator.selected(), Some(2));
    }

    #[test]
    fn empty_row_renders_no_markers() {
        let indicator = PageIndicator::new(0, 0);
        assert_eq!(indicator.markers().count(), 0);
        assert_eq!(indicator.selected(), None);
    }
}

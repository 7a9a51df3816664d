//! Per-monitor selection state
//!
//! Holds one view-model record per enumerated monitor, indexed directly by
//! monitor index. The UI mutates records through `toggle` on clicks and
//! through `reset` + `apply_indices` when a selection is loaded from a file.

use std::collections::BTreeSet;

use crate::domain::core::{Monitor, Rect};
use crate::domain::layout::MonitorLayout;

/// A monitor together with its selection flag and on-screen tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorViewModel {
    pub monitor: Monitor,
    pub selected: bool,
    /// Tile rectangle in canvas coordinates
    pub display_rect: Rect,
}

/// Selection state for every known monitor
///
/// Records are stored in enumeration order, so `records[i].monitor.index == i`
/// holds for monitors produced by the platform layer. Lookups still go
/// through the monitor index so sparse inputs behave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSelection {
    records: Vec<MonitorViewModel>,
}

impl MonitorSelection {
    /// Builds the view models from monitors and their computed layout
    ///
    /// # Arguments
    /// * `monitors` - Enumerated monitors
    /// * `layout` - Layout computed for the same monitors, in the same order
    /// * `default_selected` - Initial selection flag of every record
    pub fn new(monitors: &[Monitor], layout: &MonitorLayout, default_selected: bool) -> Self {
        let records = monitors
            .iter()
            .enumerate()
            .map(|(position, monitor)| MonitorViewModel {
                monitor: *monitor,
                selected: default_selected,
                display_rect: layout
                    .display_rects
                    .get(position)
                    .copied()
                    .unwrap_or_default(),
            })
            .collect();

        Self { records }
    }

    pub fn records(&self) -> &[MonitorViewModel] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record for a monitor index
    pub fn get(&self, index: usize) -> Option<&MonitorViewModel> {
        self.records.iter().find(|r| r.monitor.index == index)
    }

    fn get_mut(&mut self, index: usize) -> Option<&mut MonitorViewModel> {
        self.records.iter_mut().find(|r| r.monitor.index == index)
    }

    /// Flips the selection of a monitor
    ///
    /// # Returns
    /// The new selection flag, or None if the index is unknown
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let record = self.get_mut(index)?;
        record.selected = !record.selected;
        tracing::debug!("Monitor {} toggled to selected={}", index, record.selected);
        Some(record.selected)
    }

    /// Sets the selection of a monitor unconditionally
    ///
    /// # Returns
    /// The previous selection flag, or None if the index is unknown
    pub fn set_selected(&mut self, index: usize, selected: bool) -> Option<bool> {
        let record = self.get_mut(index)?;
        let previous = record.selected;
        record.selected = selected;
        Some(previous)
    }

    /// Sets every monitor to the same selection flag
    pub fn reset(&mut self, selected: bool) {
        for record in &mut self.records {
            record.selected = selected;
        }
    }

    /// Selects every known monitor listed in `indices`
    ///
    /// Indices with no matching monitor are ignored.
    ///
    /// # Returns
    /// Number of monitors that matched
    pub fn apply_indices(&mut self, indices: &BTreeSet<usize>) -> usize {
        let mut matched = 0;
        for &index in indices {
            if self.set_selected(index, true).is_some() {
                matched += 1;
            } else {
                tracing::debug!("Ignoring selection of unknown monitor {}", index);
            }
        }
        matched
    }

    /// Indices of the selected monitors in ascending order
    pub fn selected_indices(&self) -> Vec<usize> {
        let selected: BTreeSet<usize> = self
            .records
            .iter()
            .filter(|r| r.selected)
            .map(|r| r.monitor.index)
            .collect();
        selected.into_iter().collect()
    }

    /// Returns the monitor whose tile contains the given canvas point
    pub fn monitor_at(&self, x: i32, y: i32) -> Option<usize> {
        self.records
            .iter()
            .find(|r| r.display_rect.contains_point(x, y))
            .map(|r| r.monitor.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::{LayoutParams, compute_layout};

    fn three_monitors(default_selected: bool) -> MonitorSelection {
        let monitors = vec![
            Monitor::new(0, Rect::new(0, 0, 1920, 1080)),
            Monitor::new(1, Rect::new(1920, 0, 1920, 1080)),
            Monitor::new(2, Rect::new(3840, 0, 1920, 1080)),
        ];
        let layout = compute_layout(&monitors, &LayoutParams::default());
        MonitorSelection::new(&monitors, &layout, default_selected)
    }

    #[test]
    fn monitors_start_with_the_given_default() {
        let selection = three_monitors(true);
        assert_eq!(selection.selected_indices(), vec![0, 1, 2]);

        let selection = three_monitors(false);
        assert!(selection.selected_indices().is_empty());
    }

    #[test]
    fn toggle_flips_state() {
        let mut selection = three_monitors(true);
        assert_eq!(selection.toggle(1), Some(false));
        assert_eq!(selection.selected_indices(), vec![0, 2]);
        assert_eq!(selection.toggle(1), Some(true));
        assert_eq!(selection.selected_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn toggle_unknown_monitor_is_ignored() {
        let mut selection = three_monitors(true);
        assert_eq!(selection.toggle(7), None);
        assert_eq!(selection.selected_indices(), vec![0, 1, 2]);
    }

    #[test]
    fn selected_indices_reflect_toggle_parity() {
        let mut selection = three_monitors(true);
        let clicks = [2, 0, 2, 1, 0, 0];
        for index in clicks {
            selection.toggle(index);
        }

        // Odd click counts deselect
        let expected: Vec<usize> = (0..3)
            .filter(|i| clicks.iter().filter(|c| *c == i).count() % 2 == 0)
            .collect();
        assert_eq!(expected, vec![2]);
        assert_eq!(selection.selected_indices(), expected);
    }

    #[test]
    fn selected_indices_are_ascending_not_click_order() {
        let mut selection = three_monitors(false);
        selection.toggle(2);
        selection.toggle(0);
        assert_eq!(selection.selected_indices(), vec![0, 2]);
    }

    #[test]
    fn reset_then_apply_loads_a_selection() {
        let mut selection = three_monitors(true);
        selection.reset(false);
        let matched = selection.apply_indices(&BTreeSet::from([0, 2, 9]));

        assert_eq!(matched, 2);
        assert_eq!(selection.selected_indices(), vec![0, 2]);
    }

    #[test]
    fn set_selected_returns_previous_state() {
        let mut selection = three_monitors(true);
        assert_eq!(selection.set_selected(0, false), Some(true));
        assert_eq!(selection.set_selected(0, false), Some(false));
        assert_eq!(selection.set_selected(5, true), None);
    }

    #[test]
    fn hit_testing_finds_tiles() {
        let selection = three_monitors(true);
        let tile = selection.get(1).unwrap().display_rect;

        assert_eq!(selection.monitor_at(tile.x + 1, tile.y + 1), Some(1));
        assert_eq!(selection.monitor_at(0, 0), None);
    }
}

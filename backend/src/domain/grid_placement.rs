//! Initial placement of new items on a uniform grid.
//!
//! The n-th item lands in cell `(n / cols, n % cols)` where the column count is
//! derived from the container width at the moment the item is created.
//! Positions are assigned once: resizing the container later does not move
//! existing items. That is a known limitation of the layout, not something the
//! engine tries to correct.

use shared::{LayoutConfig, Position};

#[derive(Debug, Clone)]
pub struct GridPlacementEngine {
    layout: LayoutConfig,
}

impl GridPlacementEngine {
    pub fn new() -> Self {
        Self {
            layout: LayoutConfig::default(),
        }
    }

    pub fn with_config(layout: LayoutConfig) -> Self {
        Self { layout }
    }

    /// Number of grid columns for a container width; `None` means not measured yet
    pub fn columns(&self, container_width: Option<f64>) -> usize {
        match container_width {
            Some(width) if width.is_finite() => {
                let columns = (width / self.layout.cell_size).floor();
                if columns < 1.0 {
                    1
                } else {
                    columns as usize
                }
            }
            _ => self.layout.default_columns.max(1),
        }
    }

    /// (row, col) of the cell for the item at `index`
    pub fn cell_for_index(&self, index: usize, container_width: Option<f64>) -> (usize, usize) {
        let columns = self.columns(container_width);
        (index / columns, index % columns)
    }

    pub fn place(&self, index: usize, container_width: Option<f64>) -> Position {
        let (row, col) = self.cell_for_index(index, container_width);
        Position::new(
            col as f64 * self.layout.cell_size + self.layout.padding_x,
            row as f64 * self.layout.cell_size + self.layout.padding_y,
        )
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }
}

impl Default for GridPlacementEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_first_row() {
        let engine = GridPlacementEngine::new();

        assert_eq!(engine.columns(Some(620.0)), 3);
        assert_eq!(engine.cell_for_index(0, Some(620.0)), (0, 0));
        assert_eq!(engine.place(0, Some(620.0)), Position::new(20.0, 100.0));
        assert_eq!(engine.place(2, Some(620.0)), Position::new(420.0, 100.0));
    }

    #[test]
    fn test_place_wraps_to_next_row() {
        let engine = GridPlacementEngine::new();

        assert_eq!(engine.cell_for_index(3, Some(620.0)), (1, 0));
        assert_eq!(engine.place(3, Some(620.0)), Position::new(20.0, 300.0));
        assert_eq!(engine.place(4, Some(620.0)), Position::new(220.0, 300.0));
    }

    #[test]
    fn test_unknown_width_defaults_to_three_columns() {
        let engine = GridPlacementEngine::new();

        assert_eq!(engine.columns(None), 3);
        assert_eq!(engine.columns(Some(f64::NAN)), 3);
        assert_eq!(engine.place(3, None), Position::new(20.0, 300.0));
    }

    #[test]
    fn test_narrow_container_clamps_to_one_column() {
        let engine = GridPlacementEngine::new();

        assert_eq!(engine.columns(Some(150.0)), 1);
        assert_eq!(engine.columns(Some(0.0)), 1);
        assert_eq!(engine.columns(Some(-400.0)), 1);
        assert_eq!(engine.place(2, Some(150.0)), Position::new(20.0, 500.0));
    }

    #[test]
    fn test_place_is_deterministic() {
        let engine = GridPlacementEngine::new();

        for index in 0..50 {
            for width in [None, Some(199.0), Some(620.0), Some(1024.0)] {
                assert_eq!(engine.place(index, width), engine.place(index, width));
            }
        }
    }

    #[test]
    fn test_custom_layout() {
        let engine = GridPlacementEngine::with_config(LayoutConfig {
            cell_size: 100.0,
            padding_x: 0.0,
            padding_y: 0.0,
            default_columns: 2,
        });

        assert_eq!(engine.columns(None), 2);
        assert_eq!(engine.place(5, Some(450.0)), Position::new(100.0, 100.0));
    }
}

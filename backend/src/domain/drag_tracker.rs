//! Free-form drag repositioning.
//!
//! A single-item state machine: `Idle` or `Dragging`. While dragging, pointer
//! moves only update a transient preview position; the store is written once,
//! when the drag ends. The dragged item is resolved through the store by ID,
//! never through the rendering tree.

use shared::{ExpenseItem, FieldUpdate, Position};
use tracing::{debug, info, warn};

use crate::domain::item_store::ItemStore;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        item_id: String,
        /// Pointer minus the item's top-left corner at grab time
        anchor_offset: Position,
        /// Uncommitted position following the pointer
        preview: Position,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DragRepositionTracker {
    state: DragState,
}

impl DragRepositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_item_id(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { item_id, .. } => Some(item_id),
            DragState::Idle => None,
        }
    }

    pub fn preview_position(&self) -> Option<Position> {
        match &self.state {
            DragState::Dragging { preview, .. } => Some(*preview),
            DragState::Idle => None,
        }
    }

    /// Start dragging `item_id`. Returns false (and changes nothing) when a drag
    /// is already in progress or the item does not exist.
    pub fn begin(
        &mut self,
        store: &ItemStore,
        item_id: &str,
        pointer: Position,
        container_origin: Position,
    ) -> bool {
        if let Some(active) = self.active_item_id() {
            warn!("Drag start for {} rejected: {} is already being dragged", item_id, active);
            return false;
        }

        let Some(item) = store.get(item_id) else {
            warn!("Drag start rejected: expense {} not found", item_id);
            return false;
        };

        let top_left = container_origin + item.position;
        let anchor_offset = pointer - top_left;
        debug!(
            "Drag started for {} with anchor offset ({:.1}, {:.1})",
            item_id, anchor_offset.x, anchor_offset.y
        );

        self.state = DragState::Dragging {
            item_id: item_id.to_string(),
            anchor_offset,
            preview: item.position,
        };
        true
    }

    /// Follow the pointer. Returns the new preview, or None when idle.
    pub fn move_to(&mut self, pointer: Position, container_origin: Position) -> Option<Position> {
        match &mut self.state {
            DragState::Dragging {
                anchor_offset,
                preview,
                ..
            } => {
                *preview = pointer - container_origin - *anchor_offset;
                Some(*preview)
            }
            DragState::Idle => None,
        }
    }

    /// Finish the drag and commit the final position.
    ///
    /// Always returns to `Idle`. When the dragged item no longer exists the
    /// store is returned unchanged.
    pub fn end(&mut self, store: &ItemStore, pointer: Position, container_origin: Position) -> ItemStore {
        let DragState::Dragging {
            item_id,
            anchor_offset,
            ..
        } = std::mem::take(&mut self.state)
        else {
            return store.clone();
        };

        if !store.contains(&item_id) {
            warn!("Drag end ignored: expense {} was removed during the drag", item_id);
            return store.clone();
        }

        let position = pointer - container_origin - anchor_offset;
        info!(
            "📍 Moved expense {} to ({:.1}, {:.1})",
            item_id, position.x, position.y
        );
        store.update(&item_id, FieldUpdate::Position(position))
    }

    /// Where an item should be drawn right now: the preview for the dragged
    /// item, the committed position for everything else.
    pub fn display_position(&self, item: &ExpenseItem) -> Position {
        match &self.state {
            DragState::Dragging { item_id, preview, .. } if *item_id == item.id => *preview,
            _ => item.position,
        }
    }
}

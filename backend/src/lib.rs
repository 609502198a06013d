//! # Expense Tracker Backend
//!
//! In-memory expense state and the computations the UI is driven by:
//! grid placement of new items, drag repositioning and chart aggregation.
//!
//! ```text
//! UI layer (forms, canvas, charts)
//!     ↓
//! ExpenseTrackerService (state owner, entry points)
//!     ↓
//! ItemStore · GridPlacementEngine · DragRepositionTracker · AggregationEngine
//! ```
//!
//! Nothing is persisted; all state lives in memory for the life of the process.

pub mod config;
pub mod domain;

pub use domain::*;

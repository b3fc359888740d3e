//! Core types and logic for the moncal ecosystem.
//!
//! This crate provides everything shared by moncal-cli and moncal-server:
//! - `Event` and the per-day grouping of flat event lists
//! - the month grid generator and its navigation state
//! - the mutation/reload controller that keeps client state a faithful
//!   mirror of the remote store
//! - clients for the store, auth, and profile collaborators

pub mod auth;
pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod grid;
pub mod grouping;
pub mod profile;
pub mod session;
pub mod store;

pub use controller::EventController;
pub use error::{MoncalError, MoncalResult};
pub use event::{Event, NewEvent};
pub use grid::{GridCell, MonthView, month_grid};
pub use grouping::{CalendarDay, group_events};

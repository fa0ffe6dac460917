//! # ClassTime Engine
//!
//! The calendar scheduling engine: given events (optionally carrying
//! sessions) fetched through a [`classtime_provider::CalendarProvider`],
//! it decides what is visible for a view/date/filter combination, maps
//! timed items onto hour-grid buckets, resolves or synthesizes a parent
//! event when a session is scheduled into an empty slot, and coordinates
//! all mutations.
//!
//! ## Architecture
//!
//! - **`time_grid`**: pure hour-bucket, segment, and view-window math
//! - **`store`**: windowed in-memory projection of events and sessions,
//!   rebuilt wholesale after every mutation
//! - **`visibility`**: flatten + suppress + filter + sort pipeline that
//!   produces render-ready [`DisplayItem`]s
//! - **`container`**: host-event search and container synthesis
//! - **`coordinator`**: the only sanctioned write path
//! - **`interaction`**: maps cell/item clicks to UI intents
//!
//! [`DisplayItem`]: classtime_core::models::view::DisplayItem

/// Engine tunables loaded from the environment
pub mod config;
/// Container resolution: host search and container synthesis
pub mod container;
/// Mutation coordination: create/update/delete with cascade and refresh
pub mod coordinator;
/// Cell/item interaction routing to UI intents
pub mod interaction;
/// Windowed in-memory projection of the remote calendar
pub mod store;
/// Hour buckets, segment classification, and view windows
pub mod time_grid;
/// The visibility filter
pub mod visibility;

pub use config::EngineConfig;
pub use coordinator::Coordinator;
pub use store::EventStore;
pub use visibility::visible_items;

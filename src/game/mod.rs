//! Interaction core and its ECS wiring
//!
//! # Module Organization
//!
//! - `components` - piece identity types and the ECS marker components
//! - `resources` - registry, state machine, history and animation driver
//! - `events` - pointer and settings panel messages
//! - `systems` - thin systems feeding messages and time to the core
//! - `system_sets` - frame ordering
//! - `plugin` - [`InteractionPlugin`] registering everything
//!
//! # Data Flow
//!
//! ```text
//! click ─▶ PointerAction ─▶ InteractionMachine ─▶ PieceRegistry
//!                                   │                  ▲
//!                                   ▼                  │
//!                            AnimationDriver ──────────┘
//! ```
//!
//! The rendering layer reads [`resources::PieceRegistry`] and never writes
//! interaction state.

pub mod components;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod system_sets;
pub mod systems;

pub use plugin::InteractionPlugin;

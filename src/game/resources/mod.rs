//! Interaction resources - global state of the showcase
//!
//! Resources are ECS singletons shared by every system. Each one wraps a
//! plain Rust type so the whole interaction core can be driven in unit tests
//! without a Bevy `App`.
//!
//! # Resource Categories
//!
//! ## Scene
//! - [`PieceRegistry`] - every piece record, attached or not, plus the
//!   initial-state snapshots taken at creation
//!
//! ## Interaction
//! - [`InteractionMachine`] - Idle / Selected / Moving state, history,
//!   removed pieces and promotion records
//!
//! ## Animation
//! - [`AnimationDriver`] - running tween sequences, advanced once per frame
//!
//! # Integration
//!
//! All resources are registered in [`crate::game::plugin::InteractionPlugin`]
//! and accessed via system parameters:
//!
//! ```rust,ignore
//! fn my_system(
//!     mut machine: ResMut<InteractionMachine>,
//!     mut registry: ResMut<PieceRegistry>,
//!     mut driver: ResMut<AnimationDriver>,
//!     config: Res<InteractionConfig>,
//! ) {
//!     let mut ctx = InteractionContext::new(&mut registry, &mut driver, &config);
//!     machine.undo(&mut ctx);
//! }
//! ```

pub mod animation;
pub mod history;
pub mod interaction;
pub mod registry;
pub mod system_params;


pub use animation::*;
pub use history::*;
pub use interaction::*;
pub use registry::*;
pub use system_params::*;

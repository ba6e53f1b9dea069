//! System parameter groups for interaction resources
//!
//! Every system that drives the state machine needs the same four
//! resources. Instead of:
//!
//! ```rust,ignore
//! fn my_system(
//!     mut machine: ResMut<InteractionMachine>,
//!     mut registry: ResMut<PieceRegistry>,
//!     mut driver: ResMut<AnimationDriver>,
//!     config: Res<InteractionConfig>,
//! ) { /* ... */ }
//! ```
//!
//! Use:
//!
//! ```rust,ignore
//! fn my_system(mut interaction: InteractionParams) {
//!     let (machine, mut ctx) = interaction.split();
//!     machine.undo(&mut ctx);
//! }
//! ```

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use super::{AnimationDriver, InteractionContext, InteractionMachine, PieceRegistry};
use crate::core::InteractionConfig;

/// State machine plus the collaborators its transitions borrow
#[derive(SystemParam)]
pub struct InteractionParams<'w> {
    pub machine: ResMut<'w, InteractionMachine>,
    pub registry: ResMut<'w, PieceRegistry>,
    pub driver: ResMut<'w, AnimationDriver>,
    pub config: Res<'w, InteractionConfig>,
}

impl InteractionParams<'_> {
    /// Borrow the machine and a transition context at the same time
    pub fn split(&mut self) -> (&mut InteractionMachine, InteractionContext<'_>) {
        let ctx = InteractionContext::new(&mut *self.registry, &mut *self.driver, &*self.config);
        (&mut *self.machine, ctx)
    }
}

//! System organization using SystemSets
//!
//! # Execution Order
//!
//! Systems run in this order each frame:
//! 1. **Input** - turn mouse clicks into [`crate::game::events::PointerAction`]s
//! 2. **Interaction** - feed pointer and panel actions to the state machine
//! 3. **Animation** - advance tweens and report finished sequences
//! 4. **Sync** - mirror piece records onto entities, transforms and materials
//!
//! A click is therefore visible on screen in the same frame it happens.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum ShowcaseSystems {
    /// Pointer capture and ray construction
    Input,

    /// State machine transitions
    Interaction,

    /// Tween advancement and completion handling
    Animation,

    /// Registry to ECS mirroring
    Sync,
}

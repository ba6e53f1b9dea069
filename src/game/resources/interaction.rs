//! Interaction state machine - selection, move, capture, promotion and undo
//!
//! [`InteractionMachine`] is the only writer of interaction state. Each
//! transition mutates the [`PieceRegistry`], records a [`HistoryEntry`] and
//! schedules a [`Sequence`] on the [`AnimationDriver`]; the driver reports
//! back through [`InteractionMachine::complete`] once the sequence ends.
//!
//! # States
//!
//! ```text
//!            left click on piece                left click on board
//!   Idle ──────────────────────────▶ Selected ───────────────────────▶ Moving(Move)
//!    ▲                                  │ right click                     │
//!    │                                  ├──────────────▶ Moving(Capture)  │
//!    │                                  │ promote                         │
//!    │                                  └──────────────▶ Moving(Promote)  │
//!    └────────────────────────── completion ◀─────────────────────────────┘
//! ```
//!
//! Undo is accepted in every state. It cancels whatever is animating, drops
//! the selected piece back onto the board and reverses the newest history
//! entry, holding `Moving(Undo)` while the reversal animates. A reversal
//! still animating when the next undo arrives is landed on its end state,
//! not cancelled.
//!
//! # Mutual Exclusion
//!
//! While `Moving` every pointer action and every new transition other than
//! undo is refused with [`InteractionError::Busy`]. There is never more than
//! one selected piece.

use super::animation::{
    AnimationDriver, Completion, Phase, SceneEffect, Sequence, TweenSpec, TweenTarget,
};
use super::history::{ActionHistory, HistoryEntry, RemovedPiece, RemovedPieces};
use super::registry::{board_cell_at, PieceRegistry};
use crate::core::{InteractionConfig, InteractionError, InteractionResult, PromotionChoice};
use crate::game::components::{InitialPieceState, PieceId, PieceKind};
use crate::input::picking::{pick_board, pick_piece};
use bevy::math::curve::EaseFunction;
use bevy::math::Ray3d;
use bevy::prelude::*;
use std::collections::BTreeMap;
use std::time::Duration;

/// What a `Moving` state is animating
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum MotionKind {
    Move,
    Capture,
    Promote,
    Undo,
}

impl MotionKind {
    pub fn name(&self) -> &'static str {
        match self {
            MotionKind::Move => "move",
            MotionKind::Capture => "capture",
            MotionKind::Promote => "promotion",
            MotionKind::Undo => "undo",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionState {
    #[default]
    Idle,
    Selected(PieceId),
    Moving {
        piece: PieceId,
        action: MotionKind,
    },
}

/// Everything needed to put a promoted pawn back
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PromotionRecord {
    pub original_pawn: PieceId,
    pub pawn_kind: PieceKind,
    pub position: Vec3,
    pub rotation: Quat,
    pub initial_state: Option<InitialPieceState>,
}

/// Borrowed collaborators of a transition
pub struct InteractionContext<'a> {
    pub registry: &'a mut PieceRegistry,
    pub driver: &'a mut AnimationDriver,
    pub config: &'a InteractionConfig,
}

impl<'a> InteractionContext<'a> {
    pub fn new(
        registry: &'a mut PieceRegistry,
        driver: &'a mut AnimationDriver,
        config: &'a InteractionConfig,
    ) -> Self {
        Self {
            registry,
            driver,
            config,
        }
    }

    fn schedule(&mut self, sequence: Sequence) {
        self.driver.schedule(sequence, self.registry);
    }

    fn tween(
        &self,
        piece: PieceId,
        target: TweenTarget,
        duration: Duration,
        ease: EaseFunction,
    ) -> TweenSpec {
        TweenSpec::new(piece, target, duration, ease)
    }
}

#[derive(Resource, Debug, Default)]
pub struct InteractionMachine {
    state: InteractionState,
    history: ActionHistory,
    removed: RemovedPieces,
    /// Keyed by the promoted piece
    promotions: BTreeMap<PieceId, PromotionRecord>,
}

impl InteractionMachine {
    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn history(&self) -> &ActionHistory {
        &self.history
    }

    pub fn removed(&self) -> &RemovedPieces {
        &self.removed
    }

    pub fn promotion(&self, promoted: PieceId) -> Option<&PromotionRecord> {
        self.promotions.get(&promoted)
    }

    pub fn promotion_count(&self) -> usize {
        self.promotions.len()
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.state, InteractionState::Moving { .. })
    }

    /// The selected piece, if the machine is waiting for a target
    pub fn selected(&self) -> Option<PieceId> {
        match self.state {
            InteractionState::Selected(piece) => Some(piece),
            _ => None,
        }
    }

    /// Whether the promotion affordance should be offered
    pub fn promotion_available(&self, registry: &PieceRegistry) -> bool {
        self.selected()
            .and_then(|piece| registry.get(piece))
            .is_some_and(|record| record.kind.is_pawn())
    }

    /// Forget everything; used by "Start"
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Left click: select a piece when idle, pick a target when selected
    pub fn left_click(&mut self, ray: Ray3d, ctx: &mut InteractionContext) -> InteractionResult<()> {
        match self.state {
            InteractionState::Moving { .. } => Err(InteractionError::Busy),
            InteractionState::Idle => match pick_piece(ray, ctx.registry) {
                Some(hit) => self.select(hit.piece, ctx),
                None => {
                    trace!("[INTERACTION] Click hit no piece");
                    Ok(())
                }
            },
            InteractionState::Selected(_) => match pick_board(ray, ctx.config) {
                Some(point) => self.move_selected(point, ctx),
                None => {
                    trace!("[INTERACTION] Click missed the board");
                    Ok(())
                }
            },
        }
    }

    /// Right click: capture the selected piece
    pub fn right_click(&mut self, ctx: &mut InteractionContext) -> InteractionResult<()> {
        match self.state {
            InteractionState::Selected(_) => self.capture_selected(ctx),
            // Nothing to capture
            _ => Ok(()),
        }
    }

    /// Lift `piece` and make it the selection
    pub fn select(&mut self, piece: PieceId, ctx: &mut InteractionContext) -> InteractionResult<()> {
        if self.is_moving() {
            return Err(InteractionError::Busy);
        }
        let record = ctx.registry.get(piece).filter(|r| r.attached);
        let Some(record) = record else {
            return Err(InteractionError::PieceNotFound { id: piece });
        };
        let kind = record.kind;

        if let InteractionState::Selected(previous) = self.state {
            if previous == piece {
                return Ok(());
            }
            self.lower(previous, ctx);
        }

        let lift = ctx.tween(
            piece,
            TweenTarget::height(ctx.config.lift_height),
            ctx.config.select_duration(),
            EaseFunction::QuadraticOut,
        );
        ctx.schedule(Sequence::single(lift));
        self.state = InteractionState::Selected(piece);
        info!("[INTERACTION] Selected {} {}", kind, piece);
        Ok(())
    }

    /// Slide the selected piece to `target` and drop it onto the board
    pub fn move_selected(&mut self, target: Vec3, ctx: &mut InteractionContext) -> InteractionResult<()> {
        let piece = self.require_selection()?;
        let from = ctx
            .registry
            .get(piece)
            .map(|r| r.position())
            .ok_or(InteractionError::PieceNotFound { id: piece })?;
        let to = Vec3::new(target.x, ctx.config.resting_height, target.z);

        ctx.registry.get_mut(piece)?.cell = board_cell_at(to, ctx.config);
        self.history.push(HistoryEntry::Move { piece, from, to });

        let cfg = ctx.config;
        let sequence = Sequence::new()
            .then(Phase::new().tween(ctx.tween(
                piece,
                TweenTarget::across(to),
                cfg.slide_duration(),
                EaseFunction::QuadraticInOut,
            )))
            .then(Phase::new().tween(ctx.tween(
                piece,
                TweenTarget::height(cfg.resting_height),
                cfg.drop_duration(),
                EaseFunction::BounceOut,
            )))
            .on_complete(Completion::MoveSettled(piece));
        ctx.schedule(sequence);
        self.state = InteractionState::Moving {
            piece,
            action: MotionKind::Move,
        };
        info!(
            "[INTERACTION] Moving {} from ({:.2}, {:.2}) to ({:.2}, {:.2})",
            piece, from.x, from.z, to.x, to.z
        );
        Ok(())
    }

    /// Raise, shrink and fade the selected piece, then take it off the board
    pub fn capture_selected(&mut self, ctx: &mut InteractionContext) -> InteractionResult<()> {
        let piece = self.require_selection()?;
        let record = ctx
            .registry
            .get(piece)
            .ok_or(InteractionError::PieceNotFound { id: piece })?;
        let position = record.position();
        let kind = record.kind;
        let initial_position = ctx
            .registry
            .initial_state(piece)
            .map(|s| s.position)
            .unwrap_or(position);

        self.history.push(HistoryEntry::Remove {
            piece,
            position,
            kind,
        });
        self.removed.push(RemovedPiece {
            piece,
            initial_position,
            kind,
        });

        let cfg = ctx.config;
        let sequence = Sequence::new()
            .then(Phase::new().tween(ctx.tween(
                piece,
                TweenTarget::height(cfg.rise_height),
                cfg.rise_duration(),
                EaseFunction::QuadraticOut,
            )))
            .then(
                Phase::new()
                    .enter(SceneEffect::SetTransparent(piece, true))
                    .tween(ctx.tween(
                        piece,
                        TweenTarget::Scale(cfg.vanish_scale),
                        cfg.fade_duration(),
                        EaseFunction::QuadraticIn,
                    ))
                    .tween(ctx.tween(
                        piece,
                        TweenTarget::Opacity(0.0),
                        cfg.fade_duration(),
                        EaseFunction::QuadraticIn,
                    ))
                    .exit(SceneEffect::Detach(piece)),
            )
            .on_complete(Completion::CaptureFinished(piece));
        ctx.schedule(sequence);
        self.state = InteractionState::Moving {
            piece,
            action: MotionKind::Capture,
        };
        info!("[INTERACTION] Capturing {} {}", kind, piece);
        Ok(())
    }

    /// Replace the selected pawn with a copy of a live piece of `choice`
    ///
    /// The template is resolved first: if there is none the pawn is left
    /// exactly as it was and still selected.
    pub fn promote_selected(
        &mut self,
        choice: PromotionChoice,
        ctx: &mut InteractionContext,
    ) -> InteractionResult<PieceId> {
        let pawn = self.require_selection()?;
        let record = ctx
            .registry
            .get(pawn)
            .ok_or(InteractionError::PieceNotFound { id: pawn })?;
        if !record.kind.is_pawn() {
            return Err(InteractionError::NotAPawn { kind: record.kind });
        }
        let pawn_kind = record.kind;
        let position = record.position();
        let rotation = record.transform.rotation;
        let cell = record.cell;

        let target_kind = pawn_kind.with_type(choice.piece_type());
        let template = ctx
            .registry
            .find_template(target_kind)
            .ok_or(InteractionError::MissingTemplate { kind: target_kind })?;

        let cfg = ctx.config;
        let promoted = ctx.registry.clone_piece(template)?;
        {
            let clone = ctx.registry.get_mut(promoted)?;
            clone.transform = Transform {
                translation: position.with_y(cfg.rise_height),
                rotation,
                scale: Vec3::splat(cfg.vanish_scale),
            };
            clone.cell = cell;
            clone.transparent = true;
            clone.opacity = 0.0;
        }

        self.promotions.insert(
            promoted,
            PromotionRecord {
                original_pawn: pawn,
                pawn_kind,
                position,
                rotation,
                initial_state: ctx.registry.initial_state(pawn).copied(),
            },
        );
        self.history.push(HistoryEntry::Promote {
            pawn,
            promoted,
            position,
        });

        let sequence = Sequence::new()
            .then(Phase::new().tween(ctx.tween(
                pawn,
                TweenTarget::height(cfg.rise_height),
                cfg.rise_duration(),
                EaseFunction::QuadraticOut,
            )))
            .then(
                Phase::new()
                    .enter(SceneEffect::Detach(pawn))
                    .enter(SceneEffect::Attach(promoted))
                    .tween(ctx.tween(
                        promoted,
                        TweenTarget::Scale(cfg.piece_scale),
                        cfg.fade_duration(),
                        EaseFunction::QuadraticOut,
                    ))
                    .tween(ctx.tween(
                        promoted,
                        TweenTarget::Opacity(1.0),
                        cfg.fade_duration(),
                        EaseFunction::QuadraticOut,
                    ))
                    .tween(ctx.tween(
                        promoted,
                        TweenTarget::height(cfg.resting_height),
                        cfg.fade_duration(),
                        EaseFunction::BounceOut,
                    ))
                    .exit(SceneEffect::SetTransparent(promoted, false)),
            )
            .on_complete(Completion::PromotionFinished { pawn, promoted });
        ctx.schedule(sequence);
        self.state = InteractionState::Moving {
            piece: pawn,
            action: MotionKind::Promote,
        };
        info!(
            "[INTERACTION] Promoting {} {} to {} {}",
            pawn_kind, pawn, target_kind, promoted
        );
        Ok(promoted)
    }

    /// Reverse the newest history entry
    ///
    /// Returns the entry that was undone, or `None` if the history was empty.
    pub fn undo(&mut self, ctx: &mut InteractionContext) -> Option<HistoryEntry> {
        let held = match self.state {
            InteractionState::Selected(piece) => Some(piece),
            InteractionState::Moving { piece, action } if action != MotionKind::Undo => Some(piece),
            _ => None,
        };
        match self.state {
            InteractionState::Moving {
                action: MotionKind::Undo,
                ..
            } => {
                ctx.driver.finish_all(ctx.registry);
            }
            InteractionState::Moving { .. } => {
                ctx.driver.cancel_all();
            }
            _ => {}
        }
        if let Some(piece) = held {
            self.lower(piece, ctx);
        }
        self.state = InteractionState::Idle;

        let Some(entry) = self.history.pop() else {
            info!("[INTERACTION] Nothing to undo");
            return None;
        };
        let cfg = ctx.config;

        match entry {
            HistoryEntry::Move { piece, from, .. } => {
                if !ctx.registry.is_attached(piece) {
                    warn!("[INTERACTION] Cannot undo move of {}: not on the board", piece);
                    return Some(entry);
                }
                let cell = board_cell_at(from, cfg);
                if let Ok(record) = ctx.registry.get_mut(piece) {
                    record.cell = cell;
                }
                let back = ctx.tween(
                    piece,
                    TweenTarget::point(from),
                    cfg.undo_duration(),
                    EaseFunction::QuadraticInOut,
                );
                ctx.schedule(Sequence::single(back).on_complete(Completion::UndoFinished(piece)));
                self.begin_undo(piece);
            }
            HistoryEntry::Remove { piece, position, .. } => {
                let sequence = Sequence::new()
                    .then(
                        Phase::new()
                            .enter(SceneEffect::Attach(piece))
                            .enter(SceneEffect::SetScale(piece, cfg.vanish_scale))
                            .enter(SceneEffect::SetTranslation(
                                piece,
                                position.with_y(cfg.rise_height),
                            ))
                            .enter(SceneEffect::SetTransparent(piece, true))
                            .enter(SceneEffect::SetOpacity(piece, 0.0))
                            .tween(ctx.tween(
                                piece,
                                TweenTarget::Scale(cfg.piece_scale),
                                cfg.undo_duration(),
                                EaseFunction::QuadraticOut,
                            ))
                            .tween(ctx.tween(
                                piece,
                                TweenTarget::Opacity(1.0),
                                cfg.undo_duration(),
                                EaseFunction::QuadraticOut,
                            ))
                            .tween(ctx.tween(
                                piece,
                                TweenTarget::point(position.with_y(cfg.resting_height)),
                                cfg.undo_duration(),
                                EaseFunction::BounceOut,
                            ))
                            .exit(SceneEffect::SetTransparent(piece, false)),
                    )
                    .on_complete(Completion::UndoFinished(piece));
                ctx.schedule(sequence);
                self.removed.forget(piece);
                self.begin_undo(piece);
            }
            HistoryEntry::Promote {
                pawn,
                promoted,
                position,
            } => {
                let footprint = ctx
                    .registry
                    .get(promoted)
                    .map(|r| r.position())
                    .unwrap_or(position);
                self.promotions.remove(&promoted);
                let sequence = Sequence::new()
                    .then(
                        Phase::new()
                            .enter(SceneEffect::Detach(promoted))
                            .enter(SceneEffect::Attach(pawn))
                            .enter(SceneEffect::SetTransparent(pawn, false))
                            .enter(SceneEffect::SetOpacity(pawn, 1.0))
                            .enter(SceneEffect::SetScale(pawn, cfg.piece_scale))
                            .enter(SceneEffect::SetTranslation(pawn, footprint))
                            .tween(ctx.tween(
                                pawn,
                                TweenTarget::height(cfg.resting_height),
                                cfg.undo_duration(),
                                EaseFunction::BounceOut,
                            )),
                    )
                    .on_complete(Completion::UndoFinished(pawn));
                ctx.schedule(sequence);
                self.begin_undo(pawn);
            }
        }
        info!("[INTERACTION] Undid {:?}", entry);
        Some(entry)
    }

    /// Feed back a finished sequence
    ///
    /// Completions that do not belong to the current `Moving` state are
    /// ignored (their sequence was superseded).
    pub fn complete(&mut self, completion: Completion) {
        let finished = match completion {
            Completion::MoveSettled(piece)
            | Completion::CaptureFinished(piece)
            | Completion::UndoFinished(piece) => piece,
            Completion::PromotionFinished { pawn, .. } => pawn,
        };
        match self.state {
            InteractionState::Moving { piece, action } if piece == finished => {
                debug!("[INTERACTION] {} of {} finished", action.name(), piece);
                self.state = InteractionState::Idle;
            }
            _ => trace!("[INTERACTION] Ignoring stale {:?}", completion),
        }
    }

    fn require_selection(&self) -> InteractionResult<PieceId> {
        match self.state {
            InteractionState::Selected(piece) => Ok(piece),
            InteractionState::Moving { .. } => Err(InteractionError::Busy),
            InteractionState::Idle => Err(InteractionError::NothingSelected),
        }
    }

    fn begin_undo(&mut self, piece: PieceId) {
        self.state = InteractionState::Moving {
            piece,
            action: MotionKind::Undo,
        };
    }

    /// Drop a piece back to resting height
    fn lower(&self, piece: PieceId, ctx: &mut InteractionContext) {
        let drop = ctx.tween(
            piece,
            TweenTarget::height(ctx.config.resting_height),
            ctx.config.select_duration(),
            EaseFunction::QuadraticOut,
        );
        ctx.schedule(Sequence::single(drop));
    }
}

//! Animation driver - time-based tweens over piece properties
//!
//! Multi-step animations (rise, then shrink and fade, then detach) are
//! expressed as a [`Sequence`] of [`Phase`]s instead of nested completion
//! callbacks. A phase:
//!
//! 1. applies its `enter` effects and snapshots the start value of each tween,
//! 2. advances all of its tweens together every frame,
//! 3. applies its `exit` effects once every tween has reached its end,
//!
//! after which the next phase begins. When the last phase ends, the
//! sequence's [`Completion`] tag is reported back to the caller of
//! [`AnimationDriver::advance`].
//!
//! # Concurrency
//!
//! Any number of sequences may run at once. Translation tweens only write the
//! axes they target, so a lift (y) and a slide (x, z) on the same piece
//! compose. When two running tweens write the same property the one
//! scheduled later wins for that frame.
//!
//! # Cancellation
//!
//! [`AnimationDriver::cancel_all`] drops every running sequence where it
//! stands. Interpolation is abandoned mid-way and no completion is reported.
//! [`AnimationDriver::finish_all`] instead jumps every sequence to its end
//! state (remaining phases included) before dropping it, again without
//! reporting.

use crate::game::components::PieceId;
use crate::game::resources::registry::PieceRegistry;
use bevy::math::curve::{Curve, EaseFunction};
use bevy::prelude::*;
use std::collections::VecDeque;
use std::time::Duration;

/// Property a tween drives and its destination
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenTarget {
    /// Per-axis destination; `None` axes are left alone
    Translation {
        x: Option<f32>,
        y: Option<f32>,
        z: Option<f32>,
    },
    /// Uniform scale
    Scale(f32),
    Opacity(f32),
}

impl TweenTarget {
    pub fn height(y: f32) -> Self {
        TweenTarget::Translation {
            x: None,
            y: Some(y),
            z: None,
        }
    }

    /// Horizontal slide, height untouched
    pub fn across(point: Vec3) -> Self {
        TweenTarget::Translation {
            x: Some(point.x),
            y: None,
            z: Some(point.z),
        }
    }

    pub fn point(point: Vec3) -> Self {
        TweenTarget::Translation {
            x: Some(point.x),
            y: Some(point.y),
            z: Some(point.z),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TweenSpec {
    pub piece: PieceId,
    pub target: TweenTarget,
    pub duration: Duration,
    pub ease: EaseFunction,
}

impl TweenSpec {
    pub fn new(piece: PieceId, target: TweenTarget, duration: Duration, ease: EaseFunction) -> Self {
        Self {
            piece,
            target,
            duration,
            ease,
        }
    }
}

/// Instant scene mutation applied at a phase boundary
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEffect {
    Attach(PieceId),
    Detach(PieceId),
    SetTransparent(PieceId, bool),
    SetOpacity(PieceId, f32),
    SetScale(PieceId, f32),
    SetTranslation(PieceId, Vec3),
}

impl SceneEffect {
    fn apply(&self, registry: &mut PieceRegistry) {
        let result = match *self {
            SceneEffect::Attach(id) => registry.attach(id),
            SceneEffect::Detach(id) => registry.detach(id),
            SceneEffect::SetTransparent(id, transparent) => registry
                .get_mut(id)
                .map(|record| record.transparent = transparent),
            SceneEffect::SetOpacity(id, opacity) => {
                registry.get_mut(id).map(|record| record.opacity = opacity)
            }
            SceneEffect::SetScale(id, scale) => registry
                .get_mut(id)
                .map(|record| record.transform.scale = Vec3::splat(scale)),
            SceneEffect::SetTranslation(id, translation) => registry
                .get_mut(id)
                .map(|record| record.transform.translation = translation),
        };
        if let Err(e) = result {
            warn!("[ANIMATION] Skipping {:?}: {}", self, e);
        }
    }
}

/// One step of a [`Sequence`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Phase {
    pub enter: Vec<SceneEffect>,
    pub tweens: Vec<TweenSpec>,
    pub exit: Vec<SceneEffect>,
}

impl Phase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(mut self, effect: SceneEffect) -> Self {
        self.enter.push(effect);
        self
    }

    pub fn tween(mut self, tween: TweenSpec) -> Self {
        self.tweens.push(tween);
        self
    }

    pub fn exit(mut self, effect: SceneEffect) -> Self {
        self.exit.push(effect);
        self
    }
}

/// Reported when the last phase of a sequence ends
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    MoveSettled(PieceId),
    CaptureFinished(PieceId),
    PromotionFinished { pawn: PieceId, promoted: PieceId },
    UndoFinished(PieceId),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    phases: VecDeque<Phase>,
    on_complete: Option<Completion>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence with a single one-tween phase and no completion tag
    pub fn single(tween: TweenSpec) -> Self {
        Self::new().then(Phase::new().tween(tween))
    }

    pub fn then(mut self, phase: Phase) -> Self {
        self.phases.push_back(phase);
        self
    }

    pub fn on_complete(mut self, completion: Completion) -> Self {
        self.on_complete = Some(completion);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceId(pub u64);

#[derive(Clone, Copy, Debug)]
enum StartValue {
    Vector(Vec3),
    Scalar(f32),
}

#[derive(Clone, Debug)]
struct ActiveTween {
    spec: TweenSpec,
    start: StartValue,
    elapsed: Duration,
}

impl ActiveTween {
    fn is_finished(&self) -> bool {
        self.elapsed >= self.spec.duration
    }

    /// Jump straight to the destination
    fn finish(&mut self, registry: &mut PieceRegistry) {
        let remaining = self.spec.duration.saturating_sub(self.elapsed);
        self.step(remaining, registry);
    }

    fn step(&mut self, delta: Duration, registry: &mut PieceRegistry) {
        self.elapsed = (self.elapsed + delta).min(self.spec.duration);
        let progress = if self.spec.duration.is_zero() {
            1.0
        } else {
            self.elapsed.as_secs_f32() / self.spec.duration.as_secs_f32()
        };
        // Land exactly on the destination; some curves end a hair off 1.0
        let eased = if self.is_finished() {
            1.0
        } else {
            self.spec.ease.sample_clamped(progress)
        };
        let Ok(record) = registry.get_mut(self.spec.piece) else {
            return;
        };
        let mix = |from: f32, to: f32| from * (1.0 - eased) + to * eased;

        match (self.spec.target, self.start) {
            (TweenTarget::Translation { x, y, z }, StartValue::Vector(start)) => {
                let translation = &mut record.transform.translation;
                if let Some(x) = x {
                    translation.x = mix(start.x, x);
                }
                if let Some(y) = y {
                    translation.y = mix(start.y, y);
                }
                if let Some(z) = z {
                    translation.z = mix(start.z, z);
                }
            }
            (TweenTarget::Scale(to), StartValue::Scalar(start)) => {
                record.transform.scale = Vec3::splat(mix(start, to));
            }
            (TweenTarget::Opacity(to), StartValue::Scalar(start)) => {
                record.opacity = mix(start, to);
            }
            _ => {}
        }
    }
}

#[derive(Debug)]
struct RunningSequence {
    id: SequenceId,
    tweens: Vec<ActiveTween>,
    exit: Vec<SceneEffect>,
    remaining: VecDeque<Phase>,
    on_complete: Option<Completion>,
}

/// Apply `enter` effects and snapshot start values
fn begin_phase(phase: Phase, registry: &mut PieceRegistry) -> (Vec<ActiveTween>, Vec<SceneEffect>) {
    for effect in &phase.enter {
        effect.apply(registry);
    }
    let tweens = phase
        .tweens
        .into_iter()
        .filter_map(|spec| {
            let Some(record) = registry.get(spec.piece) else {
                warn!("[ANIMATION] Tween target {} not in registry", spec.piece);
                return None;
            };
            let start = match spec.target {
                TweenTarget::Translation { .. } => StartValue::Vector(record.transform.translation),
                TweenTarget::Scale(_) => StartValue::Scalar(record.transform.scale.x),
                TweenTarget::Opacity(_) => StartValue::Scalar(record.opacity),
            };
            Some(ActiveTween {
                spec,
                start,
                elapsed: Duration::ZERO,
            })
        })
        .collect();
    (tweens, phase.exit)
}

/// Runs every scheduled [`Sequence`]; advanced once per frame
#[derive(Resource, Debug, Default)]
pub struct AnimationDriver {
    running: Vec<RunningSequence>,
    next_id: u64,
}

impl AnimationDriver {
    /// Start a sequence; its first phase begins immediately
    pub fn schedule(&mut self, mut sequence: Sequence, registry: &mut PieceRegistry) -> SequenceId {
        let id = SequenceId(self.next_id);
        self.next_id += 1;

        let (tweens, exit) = match sequence.phases.pop_front() {
            Some(phase) => begin_phase(phase, registry),
            None => (Vec::new(), Vec::new()),
        };
        self.running.push(RunningSequence {
            id,
            tweens,
            exit,
            remaining: sequence.phases,
            on_complete: sequence.on_complete,
        });
        id
    }

    /// Drop every running sequence without completing it
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.running.len();
        if cancelled > 0 {
            debug!("[ANIMATION] Cancelled {} running sequence(s)", cancelled);
        }
        self.running.clear();
        cancelled
    }

    /// Land every running sequence on its end state, then drop it
    ///
    /// Sequences are finished in scheduling order, so when two of them write
    /// the same property the later one wins, as it would frame by frame.
    pub fn finish_all(&mut self, registry: &mut PieceRegistry) -> usize {
        let finished = self.running.len();
        for mut sequence in self.running.drain(..) {
            loop {
                for tween in &mut sequence.tweens {
                    tween.finish(registry);
                }
                for effect in &sequence.exit {
                    effect.apply(registry);
                }
                let Some(next) = sequence.remaining.pop_front() else {
                    break;
                };
                let (tweens, exit) = begin_phase(next, registry);
                sequence.tweens = tweens;
                sequence.exit = exit;
            }
        }
        if finished > 0 {
            debug!("[ANIMATION] Fast-forwarded {} running sequence(s)", finished);
        }
        finished
    }

    /// Advance every running sequence by `delta`
    ///
    /// Returns the completion tags of sequences that finished during this
    /// step, in scheduling order.
    pub fn advance(&mut self, delta: Duration, registry: &mut PieceRegistry) -> Vec<Completion> {
        let mut completed = Vec::new();
        self.running.retain_mut(|sequence| {
            for tween in &mut sequence.tweens {
                tween.step(delta, registry);
            }
            if !sequence.tweens.iter().all(ActiveTween::is_finished) {
                return true;
            }
            for effect in &sequence.exit {
                effect.apply(registry);
            }
            match sequence.remaining.pop_front() {
                Some(next) => {
                    let (tweens, exit) = begin_phase(next, registry);
                    sequence.tweens = tweens;
                    sequence.exit = exit;
                    true
                }
                None => {
                    trace!("[ANIMATION] Sequence {:?} finished", sequence.id);
                    completed.extend(sequence.on_complete);
                    false
                }
            }
        });
        completed
    }

    pub fn is_idle(&self) -> bool {
        self.running.is_empty()
    }

    /// Number of running sequences
    pub fn len(&self) -> usize {
        self.running.len()
    }

    pub fn is_running(&self, id: SequenceId) -> bool {
        self.running.iter().any(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::InteractionConfig;
    use crate::game::components::{BoardCell, PieceColor, PieceKind, PieceType};

    const FRAME: Duration = Duration::from_millis(50);

    fn setup() -> (PieceRegistry, PieceId) {
        let mut registry = PieceRegistry::default();
        let id = registry.create_piece(
            PieceKind::new(PieceColor::White, PieceType::Pawn),
            BoardCell::new(6, 0),
            &InteractionConfig::default(),
        );
        (registry, id)
    }

    fn run_until_idle(driver: &mut AnimationDriver, registry: &mut PieceRegistry) -> Vec<Completion> {
        let mut all = Vec::new();
        for _ in 0..200 {
            all.extend(driver.advance(FRAME, registry));
            if driver.is_idle() {
                break;
            }
        }
        all
    }

    #[test]
    fn test_tween_reaches_destination() {
        //! A lift tween ends exactly at its target height
        let (mut registry, id) = setup();
        let mut driver = AnimationDriver::default();
        driver.schedule(
            Sequence::single(TweenSpec::new(
                id,
                TweenTarget::height(0.3),
                Duration::from_millis(200),
                EaseFunction::QuadraticOut,
            )),
            &mut registry,
        );

        driver.advance(Duration::from_millis(100), &mut registry);
        let midway = registry.get(id).unwrap().position().y;
        assert!(midway > 0.01 && midway < 0.3);

        driver.advance(Duration::from_millis(100), &mut registry);
        assert_eq!(registry.get(id).unwrap().position().y, 0.3);
        assert!(driver.is_idle());
    }

    #[test]
    fn test_translation_only_writes_targeted_axes() {
        //! A slide on x/z composes with an independent lift on y
        let (mut registry, id) = setup();
        let mut driver = AnimationDriver::default();
        let start = registry.get(id).unwrap().position();
        let ms = Duration::from_millis(200);
        driver.schedule(
            Sequence::single(TweenSpec::new(id, TweenTarget::height(0.3), ms, EaseFunction::Linear)),
            &mut registry,
        );
        driver.schedule(
            Sequence::single(TweenSpec::new(
                id,
                TweenTarget::across(Vec3::new(1.5, 9.0, -0.5)),
                ms,
                EaseFunction::Linear,
            )),
            &mut registry,
        );

        run_until_idle(&mut driver, &mut registry);

        let end = registry.get(id).unwrap().position();
        assert_eq!(end, Vec3::new(1.5, 0.3, -0.5));
        assert_ne!(end.x, start.x);
    }

    #[test]
    fn test_phases_run_in_order_and_complete() {
        //! Exit effects of phase one land before phase two snapshots its start
        let (mut registry, id) = setup();
        let mut driver = AnimationDriver::default();
        let sequence = Sequence::new()
            .then(
                Phase::new()
                    .tween(TweenSpec::new(
                        id,
                        TweenTarget::height(1.0),
                        Duration::from_millis(100),
                        EaseFunction::QuadraticOut,
                    ))
                    .exit(SceneEffect::SetTransparent(id, true)),
            )
            .then(
                Phase::new()
                    .tween(TweenSpec::new(
                        id,
                        TweenTarget::Opacity(0.0),
                        Duration::from_millis(100),
                        EaseFunction::QuadraticIn,
                    ))
                    .exit(SceneEffect::Detach(id)),
            )
            .on_complete(Completion::CaptureFinished(id));
        driver.schedule(sequence, &mut registry);

        driver.advance(Duration::from_millis(100), &mut registry);
        let record = registry.get(id).unwrap();
        assert_eq!(record.position().y, 1.0);
        assert!(record.transparent);
        assert!(record.attached, "detach only happens at the end");

        let completions = run_until_idle(&mut driver, &mut registry);
        assert_eq!(completions, vec![Completion::CaptureFinished(id)]);
        let record = registry.get(id).unwrap();
        assert_eq!(record.opacity, 0.0);
        assert!(!record.attached);
    }

    #[test]
    fn test_cancel_all_abandons_without_completion() {
        //! Cancelled sequences stop where they are and never report
        let (mut registry, id) = setup();
        let mut driver = AnimationDriver::default();
        let seq = driver.schedule(
            Sequence::single(TweenSpec::new(
                id,
                TweenTarget::height(1.0),
                Duration::from_millis(500),
                EaseFunction::Linear,
            ))
            .on_complete(Completion::MoveSettled(id)),
            &mut registry,
        );
        driver.advance(Duration::from_millis(250), &mut registry);
        assert!(driver.is_running(seq));

        assert_eq!(driver.cancel_all(), 1);
        let frozen = registry.get(id).unwrap().position().y;
        let completions = driver.advance(Duration::from_millis(500), &mut registry);

        assert!(completions.is_empty());
        assert_eq!(registry.get(id).unwrap().position().y, frozen);
        assert!(frozen > 0.01 && frozen < 1.0);
    }

    #[test]
    fn test_finish_all_lands_every_phase() {
        //! Fast-forwarding runs the remaining phases and their effects, without reporting
        let (mut registry, id) = setup();
        let mut driver = AnimationDriver::default();
        driver.schedule(
            Sequence::new()
                .then(Phase::new().tween(TweenSpec::new(
                    id,
                    TweenTarget::height(1.0),
                    Duration::from_millis(300),
                    EaseFunction::QuadraticOut,
                )))
                .then(
                    Phase::new()
                        .enter(SceneEffect::SetTransparent(id, true))
                        .tween(TweenSpec::new(
                            id,
                            TweenTarget::Scale(0.01),
                            Duration::from_millis(500),
                            EaseFunction::QuadraticIn,
                        ))
                        .exit(SceneEffect::Detach(id)),
                )
                .on_complete(Completion::CaptureFinished(id)),
            &mut registry,
        );
        driver.advance(FRAME, &mut registry);

        assert_eq!(driver.finish_all(&mut registry), 1);

        assert!(driver.is_idle());
        let record = registry.get(id).unwrap();
        assert_eq!(record.position().y, 1.0);
        assert_eq!(record.transform.scale, Vec3::splat(0.01));
        assert!(record.transparent);
        assert!(!record.attached);
        assert!(driver.advance(FRAME, &mut registry).is_empty());
    }

    #[test]
    fn test_zero_duration_tween_snaps() {
        let (mut registry, id) = setup();
        let mut driver = AnimationDriver::default();
        driver.schedule(
            Sequence::single(TweenSpec::new(
                id,
                TweenTarget::Scale(0.01),
                Duration::ZERO,
                EaseFunction::Linear,
            )),
            &mut registry,
        );
        driver.advance(Duration::ZERO, &mut registry);
        assert_eq!(registry.get(id).unwrap().transform.scale, Vec3::splat(0.01));
        assert!(driver.is_idle());
    }

    #[test]
    fn test_enter_effects_apply_on_schedule() {
        let (mut registry, id) = setup();
        registry.detach(id).unwrap();
        let mut driver = AnimationDriver::default();
        driver.schedule(
            Sequence::new().then(
                Phase::new()
                    .enter(SceneEffect::Attach(id))
                    .enter(SceneEffect::SetScale(id, 0.01)),
            ),
            &mut registry,
        );
        let record = registry.get(id).unwrap();
        assert!(record.attached);
        assert_eq!(record.transform.scale, Vec3::splat(0.01));
    }
}

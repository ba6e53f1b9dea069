//! Integration tests for the interaction plugin
//!
//! Runs [`InteractionPlugin`] inside a headless Bevy `App` and drives it only
//! through the messages the pointer and panel layers send. Time advances by
//! a fixed step per update, so every animation finishes after a bounded
//! number of frames.

use bevy::math::{Dir3, Ray3d};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;
use tabletop_chess::core::{ControlPanel, InteractionConfig, PromotionChoice};
use tabletop_chess::game::components::{BoardCell, PieceColor, PieceId, PieceKind, PieceType};
use tabletop_chess::game::events::{ControlAction, PointerAction, PointerButton};
use tabletop_chess::game::resources::{
    board_position, AnimationDriver, HistoryEntry, InteractionMachine, InteractionState,
    PieceRegistry,
};
use tabletop_chess::game::InteractionPlugin;

const FRAME: Duration = Duration::from_millis(50);

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app.add_plugins(InteractionPlugin);
    app.update();
    app
}

/// Update until no animation is running
fn settle(app: &mut App) {
    for _ in 0..200 {
        app.update();
        let idle = app.world().resource::<AnimationDriver>().is_idle();
        let moving = app.world().resource::<InteractionMachine>().is_moving();
        if idle && !moving {
            return;
        }
    }
    panic!("animations did not settle");
}

fn piece_at(app: &App, row: u8, col: u8) -> PieceId {
    app.world()
        .resource::<PieceRegistry>()
        .attached()
        .find(|r| r.cell == Some(BoardCell::new(row, col)))
        .map(|r| r.id)
        .expect("a piece on that cell")
}

fn position(app: &App, id: PieceId) -> Vec3 {
    app.world()
        .resource::<PieceRegistry>()
        .get(id)
        .expect("known piece")
        .position()
}

fn cell_centre(app: &App, row: u8, col: u8) -> Vec3 {
    board_position(
        BoardCell::new(row, col),
        app.world().resource::<InteractionConfig>(),
    )
}

fn click(app: &mut App, point: Vec3, button: PointerButton) {
    app.world_mut().write_message(PointerAction {
        ray: Ray3d {
            origin: point.with_y(10.0),
            direction: Dir3::NEG_Y,
        },
        button,
    });
    settle(app);
}

fn control(app: &mut App, action: ControlAction) {
    app.world_mut().write_message(action);
    settle(app);
}

fn machine(app: &App) -> &InteractionMachine {
    app.world().resource::<InteractionMachine>()
}

// ============================================================================
// Move and Undo
// ============================================================================

#[test]
fn test_plugin_starts_with_standard_layout() {
    let app = test_app();

    let registry = app.world().resource::<PieceRegistry>();
    assert_eq!(registry.len(), 32);
    assert_eq!(registry.attached().count(), 32);
    assert_eq!(machine(&app).state(), InteractionState::Idle);
}

#[test]
fn test_click_move_then_withdraw() {
    //! Select a pawn, click a square, then withdraw: the pawn is back home
    let mut app = test_app();
    let pawn = piece_at(&app, 6, 4);
    let home = position(&app, pawn);

    click(&mut app, home, PointerButton::Primary);
    assert_eq!(machine(&app).selected(), Some(pawn));

    let target = cell_centre(&app, 4, 4);
    click(&mut app, target, PointerButton::Primary);
    assert_eq!(machine(&app).state(), InteractionState::Idle);
    assert_eq!(machine(&app).history().len(), 1);
    let rest = position(&app, pawn);
    assert!((rest.xz() - target.xz()).length() < 1e-5);

    control(&mut app, ControlAction::WithdrawMove);

    assert!(machine(&app).history().is_empty());
    assert_eq!(machine(&app).state(), InteractionState::Idle);
    let back = position(&app, pawn);
    assert!((back.xz() - home.xz()).length() < 1e-5);
    assert_eq!(
        app.world().resource::<PieceRegistry>().get(pawn).and_then(|r| r.cell),
        Some(BoardCell::new(6, 4))
    );
}

#[test]
fn test_withdraw_is_last_in_first_out() {
    //! Two moves, two withdrawals, undone newest first
    let mut app = test_app();
    let knight = piece_at(&app, 7, 1);
    let pawn = piece_at(&app, 1, 3);
    let knight_home = position(&app, knight);
    let pawn_home = position(&app, pawn);

    let knight_target = cell_centre(&app, 5, 2);
    let pawn_target = cell_centre(&app, 3, 3);
    click(&mut app, knight_home, PointerButton::Primary);
    click(&mut app, knight_target, PointerButton::Primary);
    click(&mut app, pawn_home, PointerButton::Primary);
    click(&mut app, pawn_target, PointerButton::Primary);
    assert_eq!(machine(&app).history().len(), 2);

    control(&mut app, ControlAction::WithdrawMove);
    assert!((position(&app, pawn).xz() - pawn_home.xz()).length() < 1e-5);
    assert!((position(&app, knight).xz() - knight_home.xz()).length() > 0.5, "knight still moved");

    control(&mut app, ControlAction::WithdrawMove);
    assert!((position(&app, knight).xz() - knight_home.xz()).length() < 1e-5);
    assert!(machine(&app).history().is_empty());
}

// ============================================================================
// Capture
// ============================================================================

#[test]
fn test_capture_and_restore() {
    let mut app = test_app();
    let bishop = piece_at(&app, 0, 2);
    let home = position(&app, bishop);

    click(&mut app, home, PointerButton::Primary);
    click(&mut app, home, PointerButton::Secondary);

    let registry = app.world().resource::<PieceRegistry>();
    assert!(!registry.is_attached(bishop));
    assert!(machine(&app).removed().contains(bishop));
    assert!(matches!(
        machine(&app).history().last(),
        Some(HistoryEntry::Remove { piece, .. }) if *piece == bishop
    ));

    control(&mut app, ControlAction::WithdrawMove);

    let registry = app.world().resource::<PieceRegistry>();
    let record = registry.get(bishop).expect("bishop kept");
    assert!(record.attached);
    assert_eq!(record.opacity, 1.0);
    assert!(!record.transparent);
    assert!(machine(&app).removed().is_empty());
}

#[test]
fn test_double_withdraw_restores_captured_piece() {
    //! Pressing Withdraw Move again before the restore finishes still leaves
    //! the piece whole
    let mut app = test_app();
    let bishop = piece_at(&app, 0, 2);
    let home = position(&app, bishop);
    click(&mut app, home, PointerButton::Primary);
    click(&mut app, home, PointerButton::Secondary);

    app.world_mut().write_message(ControlAction::WithdrawMove);
    app.update();
    control(&mut app, ControlAction::WithdrawMove);

    let record = app
        .world()
        .resource::<PieceRegistry>()
        .get(bishop)
        .cloned()
        .expect("bishop kept");
    assert!(record.attached);
    assert_eq!(record.opacity, 1.0);
    assert!(!record.transparent);
    assert_eq!(record.transform.scale, Vec3::splat(0.7));
    assert!((record.position().y - 0.01).abs() < 1e-6);
    assert!(machine(&app).history().is_empty());
}

#[test]
fn test_right_click_without_selection_is_ignored() {
    let mut app = test_app();
    let rook = piece_at(&app, 7, 7);

    let at = position(&app, rook);
    click(&mut app, at, PointerButton::Secondary);

    assert!(app.world().resource::<PieceRegistry>().is_attached(rook));
    assert!(machine(&app).history().is_empty());
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn test_promotion_menu_flow() {
    //! Promote Pawn opens the menu; confirming replaces the pawn and closes it
    let mut app = test_app();
    let pawn = piece_at(&app, 6, 6);
    let at = position(&app, pawn);
    click(&mut app, at, PointerButton::Primary);

    control(&mut app, ControlAction::PromotePawn);
    assert!(app.world().resource::<ControlPanel>().promotion_menu_open);

    app.world_mut().resource_mut::<ControlPanel>().promotion_option = PromotionChoice::Knight;
    control(&mut app, ControlAction::ConfirmPromotion);

    assert!(!app.world().resource::<ControlPanel>().promotion_menu_open);
    assert_eq!(machine(&app).state(), InteractionState::Idle);
    assert_eq!(machine(&app).promotion_count(), 1);

    let registry = app.world().resource::<PieceRegistry>();
    assert!(!registry.is_attached(pawn));
    let promoted = registry
        .attached()
        .find(|r| r.cell == Some(BoardCell::new(6, 6)))
        .expect("promoted piece on the pawn's square");
    assert_eq!(
        promoted.kind,
        PieceKind::new(PieceColor::White, PieceType::Knight)
    );
    assert_eq!(promoted.opacity, 1.0);
    assert_eq!(registry.len(), 33);
}

#[test]
fn test_promote_pawn_ignored_for_other_pieces() {
    let mut app = test_app();
    let queen = piece_at(&app, 7, 3);
    let at = position(&app, queen);
    click(&mut app, at, PointerButton::Primary);

    control(&mut app, ControlAction::PromotePawn);

    assert!(!app.world().resource::<ControlPanel>().promotion_menu_open);
}

#[test]
fn test_promotion_without_template_keeps_pawn() {
    //! Both white rooks captured: promoting to a rook changes nothing
    let mut app = test_app();
    for col in [0, 7] {
        let rook = piece_at(&app, 7, col);
        let home = position(&app, rook);
        click(&mut app, home, PointerButton::Primary);
        click(&mut app, home, PointerButton::Secondary);
    }
    let pawn = piece_at(&app, 6, 1);
    let at = position(&app, pawn);
    click(&mut app, at, PointerButton::Primary);
    control(&mut app, ControlAction::PromotePawn);
    app.world_mut().resource_mut::<ControlPanel>().promotion_option = PromotionChoice::Rook;

    control(&mut app, ControlAction::ConfirmPromotion);

    let registry = app.world().resource::<PieceRegistry>();
    assert!(registry.is_attached(pawn));
    assert_eq!(registry.len(), 32);
    assert_eq!(machine(&app).selected(), Some(pawn));
    assert_eq!(machine(&app).history().len(), 2);
    assert_eq!(machine(&app).promotion_count(), 0);
}

// ============================================================================
// Start
// ============================================================================

#[test]
fn test_start_restores_layout() {
    //! Start discards history, removed pieces and promotions
    let mut app = test_app();
    let pawn = piece_at(&app, 1, 0);
    let home = position(&app, pawn);
    let target = cell_centre(&app, 3, 0);
    click(&mut app, home, PointerButton::Primary);
    click(&mut app, target, PointerButton::Primary);
    let bishop = piece_at(&app, 7, 5);
    let bishop_at = position(&app, bishop);
    click(&mut app, bishop_at, PointerButton::Primary);
    click(&mut app, bishop_at, PointerButton::Secondary);
    let other = piece_at(&app, 6, 0);
    let other_at = position(&app, other);
    click(&mut app, other_at, PointerButton::Primary);
    control(&mut app, ControlAction::PromotePawn);

    control(&mut app, ControlAction::StartGame);

    let machine = machine(&app);
    assert_eq!(machine.state(), InteractionState::Idle);
    assert!(machine.history().is_empty());
    assert!(machine.removed().is_empty());
    assert_eq!(machine.promotion_count(), 0);
    assert!(!app.world().resource::<ControlPanel>().promotion_menu_open);
    let registry = app.world().resource::<PieceRegistry>();
    assert_eq!(registry.len(), 32);
    assert_eq!(registry.attached().count(), 32);
    assert!(registry
        .attached()
        .any(|r| r.cell == Some(BoardCell::new(1, 0)) && (r.position() - home).length() < 1e-5));
}

use star_shooter::entities::{Direction, PlayerId};
use star_shooter::input::*;

fn w() -> Key {
    Key::Char('w')
}

// ── Controller ────────────────────────────────────────────────────────────────

#[test]
fn press_fires_once_for_single_shot_binding() {
    let mut controller = Controller::new();
    controller.register(Key::Tab, Action::ActivatePlayerTwo, None, false);

    let pressed = controller.process(&InputFrame::new().press(Key::Tab));
    assert_eq!(pressed, vec![Action::ActivatePlayerTwo]);

    let held = controller.process(&InputFrame::new().hold(Key::Tab));
    assert!(held.is_empty());
}

#[test]
fn holdable_fires_every_held_tick() {
    let mut controller = Controller::new();
    let up = Action::Move(PlayerId::One, Direction::Up);
    controller.register(w(), up, None, true);

    // The press edge and the held state both fire on the first tick.
    assert_eq!(controller.process(&InputFrame::new().press(w())), vec![up, up]);
    assert_eq!(controller.process(&InputFrame::new().hold(w())), vec![up]);
    assert!(controller.process(&InputFrame::new()).is_empty());
}

#[test]
fn release_fires_release_handler() {
    let mut controller = Controller::new();
    let stop = Action::StopThrust(PlayerId::One);
    controller.register(w(), Action::Move(PlayerId::One, Direction::Up), Some(stop), true);

    let actions = controller.process(&InputFrame::new().release(w()));
    assert_eq!(actions, vec![stop]);
}

#[test]
fn paused_binding_is_silent_until_unpaused() {
    let mut controller = Controller::new();
    let fire = Action::Shoot(PlayerId::Two);
    controller.register(Key::Enter, fire, None, true);
    controller.pause(Key::Enter);
    assert!(controller.is_paused(Key::Enter));

    let input = InputFrame::new().press(Key::Enter);
    assert!(controller.process(&input).is_empty());

    controller.unpause(Key::Enter);
    assert_eq!(controller.process(&input), vec![fire, fire]);
}

#[test]
fn register_replaces_and_release_unbinds() {
    let mut controller = Controller::new();
    controller.register(Key::Esc, Action::ToggleHitboxes, None, false);
    controller.register(Key::Esc, Action::Quit, None, false);
    assert_eq!(controller.binding(Key::Esc).map(|b| b.on_press), Some(Action::Quit));

    let removed = controller.release(Key::Esc);
    assert_eq!(removed.map(|b| b.on_press), Some(Action::Quit));
    assert!(controller.binding(Key::Esc).is_none());
    assert!(controller.process(&InputFrame::new().press(Key::Esc)).is_empty());
}

#[test]
fn dispatch_order_is_press_release_held() {
    let mut controller = Controller::new();
    controller.register(Key::Char('a'), Action::Move(PlayerId::One, Direction::Left), None, true);
    controller.register(Key::Esc, Action::Quit, None, false);
    controller.register(
        Key::Char('s'),
        Action::Move(PlayerId::One, Direction::Down),
        Some(Action::StopThrust(PlayerId::One)),
        true,
    );

    let input = InputFrame::new()
        .hold(Key::Char('a'))
        .release(Key::Char('s'))
        .press(Key::Esc);
    assert_eq!(
        controller.process(&input),
        vec![
            Action::Quit,
            Action::StopThrust(PlayerId::One),
            Action::Move(PlayerId::One, Direction::Left),
        ]
    );
}

// ── Control schemes ───────────────────────────────────────────────────────────

#[test]
fn opposing_keys_cancel() {
    let mut controller = Controller::new();
    bind_scheme(&mut controller, &PLAYER_ONE_KEYS, PlayerId::One);

    let input = InputFrame::new().hold(Key::Char('a')).hold(Key::Char('d'));
    let actions = controller.process(&input);
    assert_eq!(actions.last(), Some(&Action::StopMoving(PlayerId::One)));

    let input = InputFrame::new().hold(Key::Char('w')).hold(Key::Char('s'));
    let actions = controller.process(&input);
    assert_eq!(actions.last(), Some(&Action::StopThrust(PlayerId::One)));
}

#[test]
fn scheme_release_handlers() {
    let mut controller = Controller::new();
    bind_scheme(&mut controller, &PLAYER_TWO_KEYS, PlayerId::Two);

    let left = controller.process(&InputFrame::new().release(Key::Left));
    assert_eq!(left, vec![Action::StopMoving(PlayerId::Two)]);
    let up = controller.process(&InputFrame::new().release(Key::Up));
    assert_eq!(up, vec![Action::StopThrust(PlayerId::Two)]);
    assert!(controller.process(&InputFrame::new().release(Key::Enter)).is_empty());
}

#[test]
fn default_controller_parks_player_two() {
    let controller = default_controller(true, 5);
    for key in PLAYER_TWO_KEYS.keys() {
        assert!(controller.is_paused(key));
    }
    for key in PLAYER_ONE_KEYS.keys() {
        assert!(!controller.is_paused(key));
    }
    let activate = controller.process(&InputFrame::new().press(ACTIVATE_KEY));
    assert_eq!(activate, vec![Action::ActivatePlayerTwo]);
    let quit = controller.process(&InputFrame::new().press(QUIT_KEY));
    assert_eq!(quit, vec![Action::Quit]);
}

#[test]
fn single_player_leaves_player_two_unbound() {
    let controller = default_controller(false, 5);
    assert!(controller.binding(ACTIVATE_KEY).is_none());
    assert!(controller.binding(Key::Enter).is_none());
}

#[test]
fn digit_keys_pick_skins() {
    let controller = default_controller(true, 5);
    let actions = controller.process(&InputFrame::new().press(Key::Char('3')));
    assert_eq!(actions, vec![Action::ChangeSkin(PlayerId::One, 2)]);
    assert!(controller.binding(Key::Char('6')).is_none());
}

/// Key bindings and per-tick input dispatch.
///
/// The input collaborator hands over an `InputFrame` each tick. The
/// `Controller` turns it into a list of `Action`s, which the session applies
/// to the world in order. Bindings never touch game state themselves.

use std::collections::{BTreeMap, BTreeSet};

use crate::entities::{Direction, PlayerId};

/// Opaque key token. The input collaborator maps physical keys onto these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Printable key, lowercase.
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Tab,
    Esc,
    F(u8),
}

/// Edge events and held state for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub pressed: Vec<Key>,
    pub released: Vec<Key>,
    pub held: BTreeSet<Key>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Key went down this tick (and is therefore held).
    pub fn press(mut self, key: Key) -> Self {
        self.pressed.push(key);
        self.held.insert(key);
        self
    }

    /// Key stays down from an earlier tick.
    pub fn hold(mut self, key: Key) -> Self {
        self.held.insert(key);
        self
    }

    pub fn release(mut self, key: Key) -> Self {
        self.released.push(key);
        self.held.remove(&key);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Move(PlayerId, Direction),
    StopMoving(PlayerId),
    StopThrust(PlayerId),
    Shoot(PlayerId),
    ChangeSkin(PlayerId, u8),
    ActivatePlayerTwo,
    ToggleHitboxes,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Binding {
    pub on_press: Action,
    pub on_release: Option<Action>,
    /// Re-fire `on_press` every tick the key is held.
    pub holdable: bool,
    pub paused: bool,
}

/// Two opposing keys held together fire `action` (e.g. A+D re-centers).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Chord {
    keys: (Key, Key),
    action: Action,
}

#[derive(Clone, Debug, Default)]
pub struct Controller {
    bindings: BTreeMap<Key, Binding>,
    chords: Vec<Chord>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key`, replacing any earlier binding for it.
    pub fn register(
        &mut self,
        key: Key,
        on_press: Action,
        on_release: Option<Action>,
        holdable: bool,
    ) {
        self.bindings.insert(
            key,
            Binding {
                on_press,
                on_release,
                holdable,
                paused: false,
            },
        );
    }

    pub fn register_chord(&mut self, a: Key, b: Key, action: Action) {
        self.chords.push(Chord { keys: (a, b), action });
    }

    /// Unbind `key`, returning what it was bound to.
    pub fn release(&mut self, key: Key) -> Option<Binding> {
        self.bindings.remove(&key)
    }

    pub fn pause(&mut self, key: Key) {
        if let Some(binding) = self.bindings.get_mut(&key) {
            binding.paused = true;
        }
    }

    pub fn unpause(&mut self, key: Key) {
        if let Some(binding) = self.bindings.get_mut(&key) {
            binding.paused = false;
        }
    }

    pub fn binding(&self, key: Key) -> Option<&Binding> {
        self.bindings.get(&key)
    }

    pub fn is_paused(&self, key: Key) -> bool {
        self.bindings.get(&key).map(|b| b.paused).unwrap_or(false)
    }

    fn live(&self, key: Key) -> Option<&Binding> {
        self.bindings.get(&key).filter(|b| !b.paused)
    }

    /// Actions for this tick, in dispatch order: key-down edges, key-up
    /// edges, held keys, then chords.
    pub fn process(&self, input: &InputFrame) -> Vec<Action> {
        let mut actions = Vec::new();

        for key in &input.pressed {
            if let Some(binding) = self.live(*key) {
                actions.push(binding.on_press);
            }
        }

        for key in &input.released {
            if let Some(action) = self.live(*key).and_then(|b| b.on_release) {
                actions.push(action);
            }
        }

        for key in &input.held {
            if let Some(binding) = self.live(*key).filter(|b| b.holdable) {
                actions.push(binding.on_press);
            }
        }

        for chord in &self.chords {
            let (a, b) = chord.keys;
            if input.is_held(a)
                && input.is_held(b)
                && self.live(a).is_some()
                && self.live(b).is_some()
            {
                actions.push(chord.action);
            }
        }

        actions
    }
}

// ── Control schemes ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlScheme {
    pub up: Key,
    pub down: Key,
    pub left: Key,
    pub right: Key,
    pub fire: Key,
}

impl ControlScheme {
    pub fn keys(&self) -> [Key; 5] {
        [self.up, self.down, self.left, self.right, self.fire]
    }
}

/// WASD + Space.
pub const PLAYER_ONE_KEYS: ControlScheme = ControlScheme {
    up: Key::Char('w'),
    down: Key::Char('s'),
    left: Key::Char('a'),
    right: Key::Char('d'),
    fire: Key::Char(' '),
};

/// Arrow keys + Enter.
pub const PLAYER_TWO_KEYS: ControlScheme = ControlScheme {
    up: Key::Up,
    down: Key::Down,
    left: Key::Left,
    right: Key::Right,
    fire: Key::Enter,
};

pub const ACTIVATE_KEY: Key = Key::Tab;
pub const QUIT_KEY: Key = Key::Esc;
pub const HITBOX_KEY: Key = Key::F(1);

/// Holdable movement and fire for `player`, with release handlers that
/// re-center the ship or cut the flame, and opposing-key chords.
pub fn bind_scheme(controller: &mut Controller, scheme: &ControlScheme, player: PlayerId) {
    let stop_thrust = Some(Action::StopThrust(player));
    let stop_moving = Some(Action::StopMoving(player));

    controller.register(scheme.up, Action::Move(player, Direction::Up), stop_thrust, true);
    controller.register(scheme.down, Action::Move(player, Direction::Down), stop_thrust, true);
    controller.register(scheme.left, Action::Move(player, Direction::Left), stop_moving, true);
    controller.register(scheme.right, Action::Move(player, Direction::Right), stop_moving, true);
    controller.register(scheme.fire, Action::Shoot(player), None, true);

    controller.register_chord(scheme.left, scheme.right, Action::StopMoving(player));
    controller.register_chord(scheme.up, scheme.down, Action::StopThrust(player));
}

pub fn pause_scheme(controller: &mut Controller, scheme: &ControlScheme) {
    for key in scheme.keys() {
        controller.pause(key);
    }
}

pub fn unpause_scheme(controller: &mut Controller, scheme: &ControlScheme) {
    for key in scheme.keys() {
        controller.unpause(key);
    }
}

/// Full binding table. Player two's keys start paused until `ACTIVATE_KEY`;
/// with `two_player` off they are not bound at all.
pub fn default_controller(two_player: bool, skins: u8) -> Controller {
    let mut controller = Controller::new();

    controller.register(QUIT_KEY, Action::Quit, None, false);
    controller.register(HITBOX_KEY, Action::ToggleHitboxes, None, false);
    for skin in 0..skins.min(9) {
        let digit = char::from(b'1' + skin);
        let action = Action::ChangeSkin(PlayerId::One, skin);
        controller.register(Key::Char(digit), action, None, false);
    }

    bind_scheme(&mut controller, &PLAYER_ONE_KEYS, PlayerId::One);

    if two_player {
        bind_scheme(&mut controller, &PLAYER_TWO_KEYS, PlayerId::Two);
        pause_scheme(&mut controller, &PLAYER_TWO_KEYS);
        controller.register(ACTIVATE_KEY, Action::ActivatePlayerTwo, None, false);
    }

    controller
}

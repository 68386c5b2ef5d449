/// One play session: the world, the binding table that drives it, and the
/// bits of state that live outside the simulation (score clock, stored high
/// score, chosen music track).

use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::compute::{TickOutcome, World};
use crate::config::Config;
use crate::error::GameError;
use crate::input::{self, Action, Controller, InputFrame, PLAYER_TWO_KEYS};

#[derive(Debug)]
pub struct Session {
    pub world: World,
    pub controller: Controller,
    pub started_at: u64,
    /// High score read at startup.
    pub high_score: u64,
    pub music: Option<PathBuf>,
}

impl Session {
    /// Bare session with no stored high score and no music.
    pub fn new(config: Config, now: u64, rng: &mut impl Rng) -> Self {
        let controller = input::default_controller(config.session.two_player, config.player.skins);
        Self {
            world: World::new(config, now, rng),
            controller,
            started_at: now,
            high_score: 0,
            music: None,
        }
    }

    /// Full startup: reads the high score and picks a music track. Any
    /// failure here stops the session from starting.
    pub fn start(config: Config, now: u64, rng: &mut impl Rng) -> Result<Self, GameError> {
        let high_score = load_high_score(&config.session.high_score_path)?;
        let music = match &config.session.music_dir {
            Some(dir) => Some(pick_music(dir, rng)?),
            None => None,
        };
        if let Some(track) = &music {
            log::info!("music: {}", track.display());
        }

        let mut session = Self::new(config, now, rng);
        session.high_score = high_score;
        session.music = music;
        log::info!("session started, high score {}", high_score);
        Ok(session)
    }

    /// Tenths of a second since the session began.
    pub fn score(&self, now: u64) -> u64 {
        now.saturating_sub(self.started_at) / 100
    }

    pub fn score_label(&self, now: u64) -> String {
        let score = self.score(now);
        format!("SCORE: {}  HI: {}", score, score.max(self.high_score))
    }

    /// Dispatch this tick's input, then advance the world.
    pub fn step(&mut self, input: &InputFrame, now: u64, rng: &mut impl Rng) -> TickOutcome {
        for action in self.controller.process(input) {
            if !self.apply(action, now) {
                log::info!("quit requested");
                return TickOutcome::Quit;
            }
        }
        self.world.tick(now, rng)
    }

    /// Apply one action. Returns `false` when the action ends the session.
    pub fn apply(&mut self, action: Action, now: u64) -> bool {
        log::trace!("{:?}", action);
        match action {
            Action::Move(id, direction) => self.world.move_player(id, direction, now),
            Action::StopMoving(id) => self.world.stop_moving(id),
            Action::StopThrust(id) => self.world.stop_thrust(id),
            Action::Shoot(id) => {
                self.world.shoot(id, now);
            }
            Action::ChangeSkin(id, skin) => self.world.change_skin(id, skin),
            Action::ActivatePlayerTwo => {
                if self.world.activate_player_two() {
                    input::unpause_scheme(&mut self.controller, &PLAYER_TWO_KEYS);
                }
            }
            Action::ToggleHitboxes => {
                self.world.show_hitboxes = !self.world.show_hitboxes;
                if !self.world.show_hitboxes {
                    self.world.hitboxes.clear();
                }
            }
            Action::Quit => return false,
        }
        true
    }

    /// Orderly end of session. Writes the high score back only when that is
    /// enabled and it was beaten. Returns the final score.
    pub fn finish(&self, now: u64) -> Result<u64, GameError> {
        let score = self.score(now);
        let config = &self.world.config.session;
        if config.persist_high_score && score > self.high_score {
            save_high_score(&config.high_score_path, score)?;
            log::info!("new high score {} saved", score);
        }
        log::info!("session over, score {}", score);
        Ok(score)
    }
}

// ── High-score persistence ────────────────────────────────────────────────────

/// A missing file counts as zero; anything unparsable is an error.
pub fn load_high_score(path: &Path) -> Result<u64, GameError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::warn!("no high score at {}, starting from 0", path.display());
            return Ok(0);
        }
        Err(e) => return Err(e.into()),
    };
    contents
        .trim()
        .parse()
        .map_err(|source| GameError::HighScore {
            path: path.to_path_buf(),
            source,
        })
}

pub fn save_high_score(path: &Path, score: u64) -> Result<(), GameError> {
    std::fs::write(path, score.to_string())?;
    Ok(())
}

// ── Music ─────────────────────────────────────────────────────────────────────

/// One regular file from `dir`, chosen at random.
pub fn pick_music(dir: &Path, rng: &mut impl Rng) -> Result<PathBuf, GameError> {
    let mut tracks = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            tracks.push(path);
        }
    }
    tracks.sort();
    tracks
        .choose(rng)
        .cloned()
        .ok_or_else(|| GameError::EmptyMusicDir(dir.to_path_buf()))
}

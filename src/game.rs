//! Host-facing game session
//!
//! Owns the simulation state and the collaborators around it. The host calls
//! [`Game::step`] once per frame with the current key snapshot; the session
//! turns key edges into session commands, ticks the simulation, routes its
//! events to audio and the leaderboard, then draws.

use std::path::PathBuf;

use crate::assets::{HelpText, verify_sounds};
use crate::audio::{AudioBackend, AudioManager};
use crate::consts::SIM_DT;
use crate::error::Result;
use crate::highscores::{Leaderboard, LeaderboardEntry};
use crate::renderer::{Canvas, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Pressed state of every key the game reads, sampled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub shield: bool,
    pub pause: bool,
    pub restart: bool,
    pub quit: bool,
    pub volume_up: bool,
    pub volume_down: bool,
}

impl InputSnapshot {
    /// Held keys that steer the player
    pub fn controls(&self) -> TickInput {
        TickInput {
            rotate_left: self.rotate_left,
            rotate_right: self.rotate_right,
            thrust: self.thrust,
            fire: self.fire,
            shield: self.shield,
        }
    }
}

/// Asks the player for a leaderboard name. `None` means they declined.
pub trait NamePrompt {
    fn ask_name(&mut self, score: u64) -> Option<String>;
}

/// Prompt that always declines
#[derive(Debug, Default)]
pub struct NoPrompt;

impl NamePrompt for NoPrompt {
    fn ask_name(&mut self, _score: u64) -> Option<String> {
        None
    }
}

/// A running game session
pub struct Game {
    state: GameState,
    audio: AudioManager,
    leaderboard: Leaderboard,
    scores_path: PathBuf,
    help: HelpText,
    paused: bool,
    running: bool,
    prev_input: InputSnapshot,
}

impl Game {
    /// Load startup assets and open in attract mode. Any failure here is fatal.
    pub fn setup(settings: &Settings, backend: Box<dyn AudioBackend>) -> Result<Self> {
        verify_sounds(backend.as_ref())?;
        let help = HelpText::load(&settings.help_path())?;
        let scores_path = settings.scores_path();
        let leaderboard = Leaderboard::load(&scores_path)?;
        let audio = AudioManager::new(backend, settings.master_volume);

        let seed = settings.effective_seed();
        let state = GameState::with_area(seed, settings.play_width, settings.play_height);
        log::info!(
            "Session ready: {}x{} play area, seed {}",
            settings.play_width,
            settings.play_height,
            seed
        );
        Ok(Self::from_parts(state, audio, leaderboard, help, scores_path))
    }

    /// Assemble a session from ready-made parts and enter attract mode
    pub fn from_parts(
        mut state: GameState,
        audio: AudioManager,
        leaderboard: Leaderboard,
        help: HelpText,
        scores_path: PathBuf,
    ) -> Self {
        state.game_over();
        let mut game = Self {
            state,
            audio,
            leaderboard,
            scores_path,
            help,
            paused: false,
            running: true,
            prev_input: InputSnapshot::default(),
        };
        // Nothing to register from the attract-mode game over
        for event in game.state.drain_events() {
            if let GameEvent::Sound(command) = event {
                game.audio.dispatch(command);
            }
        }
        game
    }

    /// Run one frame
    pub fn step(
        &mut self,
        input: &InputSnapshot,
        canvas: &mut dyn Canvas,
        prompt: &mut dyn NamePrompt,
    ) {
        if !self.running {
            return;
        }
        if input.quit {
            log::info!("Quit requested");
            self.running = false;
            return;
        }

        let prev = self.prev_input;
        self.prev_input = *input;
        if input.restart && !prev.restart {
            self.restart();
        }
        if input.pause && !prev.pause {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
        }
        if input.volume_up && !prev.volume_up {
            self.audio.increase_volume();
        }
        if input.volume_down && !prev.volume_down {
            self.audio.decrease_volume();
        }

        if self.paused {
            return;
        }

        tick(&mut self.state, &input.controls(), SIM_DT);
        self.dispatch_events(prompt);
        draw_frame(canvas, &self.state, &self.help, &self.leaderboard);
    }

    /// Start a fresh run
    pub fn restart(&mut self) {
        self.paused = false;
        self.state.restart();
    }

    fn dispatch_events(&mut self, prompt: &mut dyn NamePrompt) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Sound(command) => self.audio.dispatch(command),
                GameEvent::GameOver { score, .. } => self.register_score(score, prompt),
                GameEvent::FragmentDestroyed { class, pos } => {
                    log::debug!("{:?} fragment destroyed at ({:.0}, {:.0})", class, pos.x, pos.y);
                }
                _ => {}
            }
        }
    }

    /// Offer a qualifying score to the leaderboard
    fn register_score(&mut self, score: u64, prompt: &mut dyn NamePrompt) {
        if !self.leaderboard.qualifies(score) {
            return;
        }
        let Some(name) = prompt.ask_name(score) else {
            log::info!("Leaderboard entry declined");
            return;
        };

        let entry = LeaderboardEntry::new(&name, score);
        if let Err(e) = Leaderboard::append_to(&self.scores_path, &entry) {
            log::error!("Could not save best score: {}", e);
        }
        log::info!("Best score registered: {} {}", entry.name, entry.score);
        self.leaderboard.insert(entry);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn audio(&self) -> &AudioManager {
        &self.audio
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

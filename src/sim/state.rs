//! Game state and core simulation types
//!
//! One `GameState` value owns every actor of a run. It is created at setup,
//! passed by reference into each tick and never shared.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::craft::Craft;
use super::fragment::{Fragment, FragmentClass};
use super::projectile::Projectile;
use super::spawner::HostileSpawner;
use super::wave;
use crate::audio::{Sound, SoundCommand};
use crate::consts::*;

/// Handle (and role) of one of the three craft in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CraftId {
    Player,
    SmallHostile,
    BigHostile,
}

impl CraftId {
    pub const ALL: [CraftId; 3] = [CraftId::Player, CraftId::SmallHostile, CraftId::BigHostile];
    pub const HOSTILES: [CraftId; 2] = [CraftId::BigHostile, CraftId::SmallHostile];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            CraftId::Player => 0,
            CraftId::SmallHostile => 1,
            CraftId::BigHostile => 2,
        }
    }

    #[inline]
    pub fn is_hostile(self) -> bool {
        self != CraftId::Player
    }

    /// Characteristic size (collision radius for shots)
    pub fn size(self) -> f32 {
        match self {
            CraftId::Player | CraftId::SmallHostile => SHIP_SIZE,
            CraftId::BigHostile => BIG_HOSTILE_SIZE,
        }
    }

    /// Points for shooting this craft down
    pub fn kill_score(self) -> u64 {
        match self {
            CraftId::Player => 0,
            CraftId::SmallHostile => SMALL_HOSTILE_SCORE,
            CraftId::BigHostile => BIG_HOSTILE_SCORE,
        }
    }

    /// Half-width of the aiming error cone
    pub fn inaccuracy(self) -> f32 {
        match self {
            CraftId::Player => 0.0,
            CraftId::SmallHostile => SMALL_HOSTILE_INACCURACY,
            CraftId::BigHostile => BIG_HOSTILE_INACCURACY,
        }
    }

    /// Ambient loop played while a hostile is on screen
    pub fn loop_sound(self) -> Option<Sound> {
        match self {
            CraftId::Player => None,
            CraftId::SmallHostile => Some(Sound::SaucerSmall),
            CraftId::BigHostile => Some(Sound::SaucerBig),
        }
    }
}

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (attract mode)
    GameOver,
}

/// Screens rotated while the game is over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplashScreen {
    Title,
    Help,
    Leaderboard,
}

impl SplashScreen {
    pub fn next(self) -> Self {
        match self {
            SplashScreen::Title => SplashScreen::Help,
            SplashScreen::Help => SplashScreen::Leaderboard,
            SplashScreen::Leaderboard => SplashScreen::Title,
        }
    }
}

/// Something that happened during a tick, for the host to react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Sound(SoundCommand),
    FragmentDestroyed { class: FragmentClass, pos: Vec2 },
    CraftDestroyed(CraftId),
    HostileSpawned(CraftId),
    BonusLife { lives: u32 },
    LevelStarted(u32),
    PlayerRespawned,
    GameOver { score: u64, level: u32 },
}

/// Monotonic entity ID source
#[derive(Debug, Clone)]
pub struct EntityIds {
    next_id: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl EntityIds {
    /// Allocate a new entity ID
    pub fn next(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Play area
    pub width: f32,
    pub height: f32,
    pub level: u32,
    pub lives: u32,
    pub score: u64,
    /// Next bonus is due at `BONUS_POINTS * bonus_count`
    pub bonus_count: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Fixed roster, indexed by [`CraftId::index`]
    pub crafts: [Craft; 3],
    pub fragments: Vec<Fragment>,
    pub projectiles: Vec<Projectile>,
    pub ids: EntityIds,
    pub spawner: HostileSpawner,
    /// Ticks until the player may fire again
    pub player_shot_cooldown: u32,
    /// Ticks since the last hostile fire check
    pub hostile_shot_ticks: u32,
    pub splash: SplashScreen,
    pub splash_ticks: u32,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run on the default play area
    pub fn new(seed: u64) -> Self {
        Self::with_area(seed, PLAY_WIDTH, PLAY_HEIGHT)
    }

    /// Create a new run on a `width` x `height` play area, ready to play level 1
    pub fn with_area(seed: u64, width: f32, height: f32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawner = HostileSpawner::new(&mut rng);
        let mut state = Self {
            seed,
            rng,
            width,
            height,
            level: START_LEVEL,
            lives: MAX_LIVES,
            score: START_SCORE,
            bonus_count: BONUS_COUNTER,
            time_ticks: 0,
            phase: GamePhase::Playing,
            crafts: [
                Craft::new(CraftId::Player),
                Craft::new(CraftId::SmallHostile),
                Craft::new(CraftId::BigHostile),
            ],
            fragments: Vec::new(),
            projectiles: Vec::new(),
            ids: EntityIds::default(),
            spawner,
            player_shot_cooldown: 0,
            hostile_shot_ticks: 0,
            splash: SplashScreen::Title,
            splash_ticks: 0,
            events: Vec::new(),
        };
        state.restart();
        state.events.clear();
        state
    }

    /// Reset every actor and counter and start again from level 1
    pub fn restart(&mut self) {
        self.sound(SoundCommand::StopAll);

        let center = self.center();
        for id in CraftId::ALL {
            let craft = &mut self.crafts[id.index()];
            craft.reset(&mut self.events);
            if id == CraftId::Player {
                craft.place(center, PLAYER_START_HEADING);
                craft.visible = true;
            } else {
                craft.park();
            }
        }

        self.lives = MAX_LIVES;
        self.level = START_LEVEL;
        self.score = START_SCORE;
        self.bonus_count = BONUS_COUNTER;
        self.phase = GamePhase::Playing;
        self.player_shot_cooldown = 0;
        self.hostile_shot_ticks = 0;
        self.spawner = HostileSpawner::new(&mut self.rng);
        self.splash = SplashScreen::Title;
        self.splash_ticks = 0;
        self.projectiles.clear();

        let count = self.level * FRAGMENTS_PER_LEVEL;
        wave::build_fragments(self, count);
        log::info!("Run started (seed {}, {} fragments)", self.seed, self.fragments.len());
        self.emit(GameEvent::LevelStarted(self.level));
    }

    /// Center of the play area (player spawn point)
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    #[inline]
    pub fn craft(&self, id: CraftId) -> &Craft {
        &self.crafts[id.index()]
    }

    #[inline]
    pub fn craft_mut(&mut self, id: CraftId) -> &mut Craft {
        &mut self.crafts[id.index()]
    }

    #[inline]
    pub fn player(&self) -> &Craft {
        self.craft(CraftId::Player)
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut Craft {
        self.craft_mut(CraftId::Player)
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn sound(&mut self, command: SoundCommand) {
        self.events.push(GameEvent::Sound(command));
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate a projectile for `owner` and arm it at the owner's position
    pub fn fire(&mut self, owner: CraftId, vel: Vec2) {
        let id = self.ids.next();
        let mut projectile = Projectile::new(id, owner);
        projectile.arm(self.craft(owner).pos, vel);
        self.projectiles.push(projectile);
        self.sound(SoundCommand::once(Sound::ShipFire));
    }

    pub fn add_score(&mut self, points: u64) {
        self.score += points;
    }

    /// Take one life from the player, ending the run when none remain
    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 && !self.is_game_over() {
            self.game_over();
        }
    }

    /// End the run: hide every craft and start the attract loop
    pub fn game_over(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.splash = SplashScreen::Title;
        self.splash_ticks = 0;
        for craft in self.crafts.iter_mut() {
            craft.deactivate(&mut self.events);
        }
        self.sound(SoundCommand::looped(Sound::Theme));
        log::info!("Game over at level {} with score {}", self.level, self.score);
        self.emit(GameEvent::GameOver {
            score: self.score,
            level: self.level,
        });
    }

    /// Number of fragments still in play
    pub fn fragments_alive(&self) -> usize {
        self.fragments.iter().filter(|f| f.alive).count()
    }
}

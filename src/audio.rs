//! Audio seam
//!
//! The simulation only names sounds; playback belongs to an [`AudioBackend`]
//! supplied by the host. [`AudioManager`] sits in between and owns the master
//! volume and the set of currently looping sounds.

use crate::consts::{START_VOLUME, VOLUME_STEP};

/// Logical sound identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sound {
    /// Extra life awarded
    Bonus,
    /// Player shield raised
    Shield,
    /// Any craft fires
    ShipFire,
    /// Fragment destroyed - large
    BangLarge,
    /// Fragment destroyed - medium
    BangMedium,
    /// Fragment destroyed - small
    BangSmall,
    /// Big hostile on screen (looped)
    SaucerBig,
    /// Small hostile on screen (looped)
    SaucerSmall,
    /// Player thrust
    ShipThrust,
    /// Any craft explodes
    ShipExplosion,
    /// Attract-mode theme (looped while the game is over)
    Theme,
}

impl Sound {
    /// Every sound the game can request, in load order
    pub const ALL: [Sound; 11] = [
        Sound::Bonus,
        Sound::Shield,
        Sound::ShipFire,
        Sound::BangLarge,
        Sound::BangMedium,
        Sound::BangSmall,
        Sound::SaucerBig,
        Sound::SaucerSmall,
        Sound::ShipThrust,
        Sound::ShipExplosion,
        Sound::Theme,
    ];

    /// Stable name used by backends to locate the sample
    pub fn name(self) -> &'static str {
        match self {
            Sound::Bonus => "bonus",
            Sound::Shield => "shield",
            Sound::ShipFire => "ship_fire",
            Sound::BangLarge => "bang_large",
            Sound::BangMedium => "bang_medium",
            Sound::BangSmall => "bang_small",
            Sound::SaucerBig => "saucer_big",
            Sound::SaucerSmall => "saucer_small",
            Sound::ShipThrust => "ship_thrust",
            Sound::ShipExplosion => "ship_explosion",
            Sound::Theme => "theme",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Sound::ALL.iter().copied().find(|s| s.name() == name)
    }
}

/// A request produced by the simulation for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCommand {
    Play { sound: Sound, looping: bool },
    Stop(Sound),
    StopAll,
}

impl SoundCommand {
    pub fn once(sound: Sound) -> Self {
        SoundCommand::Play {
            sound,
            looping: false,
        }
    }

    pub fn looped(sound: Sound) -> Self {
        SoundCommand::Play {
            sound,
            looping: true,
        }
    }
}

/// Host audio device. Every call is fire-and-forget.
pub trait AudioBackend {
    fn play(&mut self, sound: Sound, looping: bool);
    fn stop(&mut self, sound: Sound);
    fn set_volume(&mut self, volume: f32);

    /// Whether the backend has a sample for `sound` (checked once at startup)
    fn is_loaded(&self, _sound: Sound) -> bool {
        true
    }
}

/// Backend that plays nothing, for headless runs
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioBackend for NullAudio {
    fn play(&mut self, sound: Sound, looping: bool) {
        log::trace!("play {} (loop: {})", sound.name(), looping);
    }

    fn stop(&mut self, sound: Sound) {
        log::trace!("stop {}", sound.name());
    }

    fn set_volume(&mut self, _volume: f32) {}
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Box<dyn AudioBackend>,
    master_volume: f32,
    looping: Vec<Sound>,
}

impl AudioManager {
    pub fn new(mut backend: Box<dyn AudioBackend>, master_volume: f32) -> Self {
        let master_volume = master_volume.clamp(0.0, 1.0);
        backend.set_volume(master_volume);
        Self {
            backend,
            master_volume,
            looping: Vec::new(),
        }
    }

    /// Manager over [`NullAudio`] at the default volume
    pub fn silent() -> Self {
        Self::new(Box::new(NullAudio), START_VOLUME)
    }

    pub fn backend(&self) -> &dyn AudioBackend {
        self.backend.as_ref()
    }

    /// Play a sound, optionally looping until stopped
    pub fn play(&mut self, sound: Sound, looping: bool) {
        if looping {
            if self.looping.contains(&sound) {
                return;
            }
            self.looping.push(sound);
        }
        self.backend.play(sound, looping);
    }

    pub fn stop(&mut self, sound: Sound) {
        self.looping.retain(|s| *s != sound);
        self.backend.stop(sound);
    }

    /// Stop every sound the game knows about
    pub fn stop_all(&mut self) {
        self.looping.clear();
        for sound in Sound::ALL {
            self.backend.stop(sound);
        }
    }

    /// Apply one simulation request
    pub fn dispatch(&mut self, command: SoundCommand) {
        match command {
            SoundCommand::Play { sound, looping } => self.play(sound, looping),
            SoundCommand::Stop(sound) => self.stop(sound),
            SoundCommand::StopAll => self.stop_all(),
        }
    }

    pub fn is_looping(&self, sound: Sound) -> bool {
        self.looping.contains(&sound)
    }

    pub fn master_volume(&self) -> f32 {
        self.master_volume
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(self.master_volume);
    }

    pub fn increase_volume(&mut self) {
        self.set_master_volume(self.master_volume + VOLUME_STEP);
    }

    pub fn decrease_volume(&mut self) {
        self.set_master_volume(self.master_volume - VOLUME_STEP);
    }
}

//! # Game State Module
//!
//! Central game state management and the per-frame update pipeline.
//!
//! [`GameState`] owns everything a session needs: the current grid, the
//! entity registry, session counters, timing gates, the input state and the
//! injected randomness and clock. The host calls [`GameState::advance`] once
//! per frame and draws from [`GameState::snapshot`].

use crate::game::{
    fire, move_enemies, move_player, resolve_contacts, step_projectiles, swing, Clock,
    Direction, EntityId, EntityRegistry, Enemy, Grid, Player, Position, Projectile,
    SwingEffect, SystemClock, TimingConfig, UpdateGates,
};
use crate::generation::{GenerationConfig, Generator, LevelRequest, RoomCorridorGenerator};
use crate::input::{Action, InputState};
use crate::utils::{create_rng, RandomSource};
use crate::{KrawlError, KrawlResult};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Session status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Idle, waiting for a begin action
    Start,
    /// Simulation active
    Running,
    /// Player died, waiting for a restart action
    GameOver,
}

/// What removed an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KillCause {
    Melee,
    Projectile,
}

/// Observable changes produced by a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new run began from the start screen
    SessionStarted { difficulty: u32 },
    /// A freshly generated level is now in play
    LevelStarted {
        level: u32,
        difficulty: u32,
        enemies: usize,
    },
    /// The player changed tile
    PlayerMoved { from: Position, to: Position },
    /// A melee swing was made at `target`
    Swing { target: Position },
    /// A shot left the player
    ProjectileFired {
        position: Position,
        direction: Direction,
        ammo_left: u32,
    },
    /// A projectile hit a wall or left the grid
    ProjectileExpired { position: Position },
    /// An enemy was removed by the player
    EnemySlain {
        enemy: EntityId,
        position: Position,
        cause: KillCause,
    },
    /// An enemy touched the player
    PlayerHit { enemy: EntityId, hp_left: u32 },
    /// Every enemy on the level is gone
    LevelCleared { level: u32 },
    /// The last level of a tier was cleared
    DifficultyIncreased { difficulty: u32 },
    /// The player ran out of hit points
    GameOver { level: u32, difficulty: u32 },
    /// The session went back to the start screen
    ReturnedToStart,
}

impl GameEvent {
    /// Session-level transitions, as opposed to per-entity detail.
    pub fn is_milestone(&self) -> bool {
        matches!(
            self,
            GameEvent::SessionStarted { .. }
                | GameEvent::LevelStarted { .. }
                | GameEvent::LevelCleared { .. }
                | GameEvent::DifficultyIncreased { .. }
                | GameEvent::GameOver { .. }
                | GameEvent::ReturnedToStart
        )
    }

    /// Player-facing message for the HUD, if the event deserves one.
    pub fn message(&self) -> Option<String> {
        match self {
            GameEvent::LevelStarted {
                level,
                difficulty,
                enemies,
            } => Some(format!(
                "Level {} (difficulty {}): {} enemies lurk here",
                level, difficulty, enemies
            )),
            GameEvent::EnemySlain { cause, .. } => Some(match cause {
                KillCause::Melee => "You cut down an enemy".to_string(),
                KillCause::Projectile => "Your shot finds its mark".to_string(),
            }),
            GameEvent::PlayerHit { hp_left, .. } => Some(format!("You are hit! HP {}", hp_left)),
            GameEvent::LevelCleared { level } => Some(format!("Level {} cleared", level)),
            GameEvent::DifficultyIncreased { difficulty } => Some(format!(
                "The dungeon grows harsher (difficulty {})",
                difficulty
            )),
            GameEvent::GameOver { level, .. } => Some(format!("You died on level {}", level)),
            _ => None,
        }
    }
}

/// Game statistics tracking player progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatistics {
    /// Runs started from the start screen
    pub runs_started: u32,
    /// Levels cleared across all runs
    pub levels_cleared: u32,
    /// Enemies slain with a swing
    pub melee_kills: u32,
    /// Enemies slain with a projectile
    pub ranged_kills: u32,
    /// Swings made
    pub swings: u32,
    /// Projectiles fired
    pub shots_fired: u32,
    /// Hit points lost
    pub damage_taken: u32,
    /// Runs that ended in death
    pub deaths: u32,
    /// Tiles walked
    pub steps_taken: u64,
    /// Highest level reached
    pub max_level_reached: u32,
}

impl GameStatistics {
    /// Creates new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates statistics based on a game event.
    pub fn update_from_event(&mut self, event: &GameEvent) {
        match event {
            GameEvent::SessionStarted { .. } => self.runs_started += 1,
            GameEvent::LevelStarted { level, .. } => {
                self.max_level_reached = self.max_level_reached.max(*level);
            }
            GameEvent::PlayerMoved { from, to } => {
                self.steps_taken += from.manhattan_distance(*to) as u64;
            }
            GameEvent::Swing { .. } => self.swings += 1,
            GameEvent::ProjectileFired { .. } => self.shots_fired += 1,
            GameEvent::EnemySlain { cause, .. } => match cause {
                KillCause::Melee => self.melee_kills += 1,
                KillCause::Projectile => self.ranged_kills += 1,
            },
            GameEvent::PlayerHit { .. } => self.damage_taken += 1,
            GameEvent::LevelCleared { .. } => self.levels_cleared += 1,
            GameEvent::GameOver { .. } => self.deaths += 1,
            _ => {}
        }
    }

    /// Total enemies slain by any means.
    pub fn total_kills(&self) -> u32 {
        self.melee_kills + self.ranged_kills
    }
}

/// Tunable rules of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Dungeon generation settings
    pub generation: GenerationConfig,
    /// Update intervals
    pub timing: TimingConfig,
    /// Player hit points at the start of every level
    pub starting_hp: u32,
    /// Ranged ammo at the start of every level
    pub starting_ammo: u32,
    /// Levels per difficulty tier
    pub max_level: u32,
    /// Ticks a swing marker stays visible
    pub swing_duration_ticks: u32,
}

impl GameConfig {
    /// Creates the default rules.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::GameConfig;
    ///
    /// let config = GameConfig::new();
    /// assert_eq!(config.starting_hp, 3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        use crate::config;
        Self {
            generation: GenerationConfig::new(),
            timing: TimingConfig::new(),
            starting_hp: config::DEFAULT_PLAYER_HEALTH,
            starting_ammo: config::STARTING_AMMO,
            max_level: config::MAX_LEVEL,
            swing_duration_ticks: config::SWING_DURATION_TICKS,
        }
    }

    /// Creates rules for tests: the small 20x15 grid, default everything else.
    pub fn for_testing() -> Self {
        Self {
            generation: GenerationConfig::for_testing(),
            ..Self::new()
        }
    }

    /// Checks that the rules describe a playable game.
    pub fn validate(&self) -> KrawlResult<()> {
        self.generation.validate()?;
        if self.starting_hp == 0 {
            return Err(KrawlError::InvalidConfig(
                "starting_hp must be at least 1".to_string(),
            ));
        }
        if self.max_level == 0 {
            return Err(KrawlError::InvalidConfig(
                "max_level must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses and validates rules from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> KrawlResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads rules from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> KrawlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serializes the rules as pretty-printed JSON.
    pub fn to_json(&self) -> KrawlResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only view of everything a presentation layer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub level: u32,
    pub difficulty: u32,
    pub ammo: u32,
    pub grid: Grid,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub swing: Option<SwingEffect>,
}

/// Central game state containing all session data.
///
/// Randomness and time are injected so tests can substitute scripted values
/// and a manual clock.
#[derive(Debug)]
pub struct GameState<R = StdRng, C = SystemClock> {
    config: GameConfig,
    generator: RoomCorridorGenerator,
    grid: Grid,
    registry: EntityRegistry,
    status: GameStatus,
    level: u32,
    difficulty: u32,
    ammo: u32,
    gates: UpdateGates,
    input: InputState,
    statistics: GameStatistics,
    tick: u64,
    rng: R,
    clock: C,
}

impl GameState<StdRng, SystemClock> {
    /// Creates a game on the wall clock with a seeded generator.
    ///
    /// # Examples
    ///
    /// ```
    /// use dunjy_krawl::{GameConfig, GameState, GameStatus};
    ///
    /// let game = GameState::with_seed(GameConfig::new(), 12345).unwrap();
    /// assert_eq!(game.status(), GameStatus::Start);
    /// assert_eq!(game.level(), 1);
    /// ```
    pub fn with_seed(config: GameConfig, seed: u64) -> KrawlResult<Self> {
        Self::new(config, create_rng(seed), SystemClock)
    }
}

impl<R: RandomSource, C: Clock> GameState<R, C> {
    /// Creates a session in the `Start` state with level 1 already generated
    /// so the start screen has something to show.
    pub fn new(config: GameConfig, rng: R, clock: C) -> KrawlResult<Self> {
        config.validate()?;
        let generator = RoomCorridorGenerator::new();
        let gates = UpdateGates::new(&config.timing);
        let starting_hp = config.starting_hp;
        let starting_ammo = config.starting_ammo;

        let mut state = Self {
            config,
            generator,
            grid: Grid::new(0, 0),
            registry: EntityRegistry::new(Position::origin(), starting_hp, &[]),
            status: GameStatus::Start,
            level: 1,
            difficulty: 1,
            ammo: starting_ammo,
            gates,
            input: InputState::new(),
            statistics: GameStatistics::new(),
            tick: 0,
            rng,
            clock,
        };
        state.load_level()?;
        Ok(state)
    }

    /// Runs one frame of the game.
    ///
    /// Order: the swing marker counts down, queued actions are applied in
    /// arrival order, then, while running, gated movement, projectile flight,
    /// contact damage and the win/lose checks.
    pub fn advance(&mut self) -> KrawlResult<Vec<GameEvent>> {
        self.tick += 1;
        self.registry.tick_swing();

        let mut events = Vec::new();
        for action in self.input.drain_actions() {
            self.handle_action(action, &mut events)?;
        }

        if self.status == GameStatus::Running {
            self.run_simulation(&mut events)?;
        }

        for event in &events {
            self.statistics.update_from_event(event);
            if event.is_milestone() {
                info!("{:?}", event);
            } else {
                debug!("{:?}", event);
            }
        }

        Ok(events)
    }

    /// Captures the current frame for rendering. Pure: repeated calls without
    /// an intervening `advance` return equal snapshots.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            level: self.level,
            difficulty: self.difficulty,
            ammo: self.ammo,
            grid: self.grid.clone(),
            player: self.registry.player.clone(),
            enemies: self.registry.enemies.clone(),
            projectiles: self.registry.projectiles.clone(),
            swing: self.registry.swing.clone(),
        }
    }

    /// Input state written by the host each frame.
    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    /// Direct access to the entities, for scripted scenarios and debugging.
    pub fn registry_mut(&mut self) -> &mut EntityRegistry {
        &mut self.registry
    }

    pub fn statistics(&self) -> &GameStatistics {
        &self.statistics
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Number of `advance` calls so far.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Running
    }

    fn handle_action(&mut self, action: Action, events: &mut Vec<GameEvent>) -> KrawlResult<()> {
        match (self.status, action) {
            (GameStatus::Start, Action::Begin) => self.begin_session(events)?,
            (GameStatus::GameOver, Action::Restart) => {
                self.status = GameStatus::Start;
                events.push(GameEvent::ReturnedToStart);
            }
            (GameStatus::Running, Action::Melee) => {
                events.extend(swing(&mut self.registry, self.config.swing_duration_ticks));
            }
            (GameStatus::Running, Action::Fire) => {
                let aim = self.input.aim();
                events.extend(fire(&mut self.registry, &self.grid, aim, &mut self.ammo));
            }
            (status, action) => trace!("Ignoring {:?} while {:?}", action, status),
        }
        Ok(())
    }

    fn begin_session(&mut self, events: &mut Vec<GameEvent>) -> KrawlResult<()> {
        self.level = 1;
        self.status = GameStatus::Running;
        events.push(GameEvent::SessionStarted {
            difficulty: self.difficulty,
        });
        events.push(self.load_level()?);
        Ok(())
    }

    /// Generates the dungeon for the current level and difficulty and
    /// repopulates it. Player health, ammo and the gates start fresh.
    fn load_level(&mut self) -> KrawlResult<GameEvent> {
        let request = LevelRequest::new(self.level, self.difficulty);
        let dungeon = self
            .generator
            .generate(&self.config.generation, request, &mut self.rng)?;

        self.registry = EntityRegistry::new(
            dungeon.player_spawn,
            self.config.starting_hp,
            &dungeon.enemy_spawns,
        );
        self.grid = dungeon.grid;
        self.ammo = self.config.starting_ammo;
        self.gates.reset();

        Ok(GameEvent::LevelStarted {
            level: self.level,
            difficulty: self.difficulty,
            enemies: self.registry.enemies.len(),
        })
    }

    fn run_simulation(&mut self, events: &mut Vec<GameEvent>) -> KrawlResult<()> {
        let now = self.clock.now();

        if self.gates.player.try_pass(now) {
            events.extend(move_player(
                &mut self.registry.player,
                self.input.held(),
                &self.grid,
            ));
        }

        if self.gates.enemies.try_pass(now) {
            move_enemies(&mut self.registry.enemies, &self.grid, &mut self.rng);
        }

        if self.gates.projectiles.try_pass(now) {
            events.extend(step_projectiles(&mut self.registry, &self.grid));
        }

        events.extend(resolve_contacts(&mut self.registry));

        if !self.registry.player.is_alive() {
            self.status = GameStatus::GameOver;
            events.push(GameEvent::GameOver {
                level: self.level,
                difficulty: self.difficulty,
            });
        } else if self.registry.enemies.is_empty() {
            self.complete_level(events)?;
        }

        Ok(())
    }

    fn complete_level(&mut self, events: &mut Vec<GameEvent>) -> KrawlResult<()> {
        events.push(GameEvent::LevelCleared { level: self.level });
        self.level += 1;

        if self.level > self.config.max_level {
            self.level = 1;
            self.difficulty += 1;
            self.status = GameStatus::Start;
            events.push(GameEvent::DifficultyIncreased {
                difficulty: self.difficulty,
            });
            events.push(GameEvent::ReturnedToStart);
        } else {
            events.push(self.load_level()?);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ManualClock;
    use crate::utils::ScriptedRandom;
    use std::time::Duration;

    type TestGame = GameState<StdRng, ManualClock>;

    fn new_game() -> TestGame {
        GameState::new(GameConfig::for_testing(), create_rng(12345), ManualClock::new()).unwrap()
    }

    fn running_game() -> TestGame {
        let mut game = new_game();
        game.input_mut().push_action(Action::Begin);
        game.advance().unwrap();
        assert_eq!(game.status(), GameStatus::Running);
        game
    }

    /// Parks every enemy far from the player so nothing moves into contact.
    fn isolate_player(game: &mut TestGame) {
        let player = game.registry().player.position;
        let floor: Vec<Position> = game.grid().floor_positions();
        let far = floor
            .into_iter()
            .max_by_key(|pos| pos.manhattan_distance(player))
            .unwrap();
        for enemy in game.registry_mut().enemies.iter_mut() {
            enemy.position = far;
        }
    }

    #[test]
    fn test_game_state_creation() {
        let game = new_game();
        assert_eq!(game.status(), GameStatus::Start);
        assert_eq!(game.level(), 1);
        assert_eq!(game.difficulty(), 1);
        assert_eq!(game.ammo(), 5);
        assert_eq!(game.tick_count(), 0);
        assert!(game.grid().is_floor(game.registry().player.position));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig {
            starting_hp: 0,
            ..GameConfig::for_testing()
        };
        let result = GameState::new(config, create_rng(1), ManualClock::new());
        assert!(matches!(result, Err(KrawlError::InvalidConfig(_))));
    }

    #[test]
    fn test_begin_starts_running() {
        let mut game = new_game();
        game.input_mut().push_action(Action::Begin);
        let events = game.advance().unwrap();

        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.level(), 1);
        assert_eq!(events[0], GameEvent::SessionStarted { difficulty: 1 });
        assert!(matches!(events[1], GameEvent::LevelStarted { level: 1, .. }));
        assert_eq!(game.statistics().runs_started, 1);
    }

    #[test]
    fn test_start_ignores_gameplay_actions() {
        let mut game = new_game();
        let before = game.snapshot();
        game.input_mut().push_action(Action::Melee);
        game.input_mut().push_action(Action::Fire);
        game.input_mut().push_action(Action::Restart);

        assert!(game.advance().unwrap().is_empty());
        assert_eq!(game.snapshot(), before);
    }

    #[test]
    fn test_running_ignores_begin() {
        let mut game = running_game();
        isolate_player(&mut game);
        game.registry_mut().player.hp = 2;

        game.input_mut().push_action(Action::Begin);
        game.advance().unwrap();
        // A second begin would have regenerated the level and restored hp.
        assert_eq!(game.registry().player.hp, 2);
    }

    #[test]
    fn test_swing_marker_counts_down_in_advance() {
        let mut game = running_game();
        isolate_player(&mut game);
        game.input_mut().push_action(Action::Melee);
        game.advance().unwrap();
        assert_eq!(game.snapshot().swing.map(|s| s.remaining), Some(10));

        game.advance().unwrap();
        assert_eq!(game.snapshot().swing.map(|s| s.remaining), Some(9));
    }

    #[test]
    fn test_contact_ends_game() {
        let mut game = running_game();
        let player = game.registry().player.position;
        game.registry_mut().player.hp = 1;
        game.registry_mut().enemies.push(Enemy::new(player));

        let events = game.advance().unwrap();
        assert_eq!(game.status(), GameStatus::GameOver);
        assert_eq!(game.registry().player.hp, 0);
        assert!(events
            .iter()
            .any(|event| matches!(event, GameEvent::GameOver { level: 1, difficulty: 1 })));
        assert_eq!(game.statistics().deaths, 1);
    }

    #[test]
    fn test_game_over_freezes_simulation() {
        let mut game = running_game();
        let player = game.registry().player.position;
        game.registry_mut().player.hp = 1;
        game.registry_mut().enemies.push(Enemy::new(player));
        game.advance().unwrap();

        // Another enemy on the player's tile must not be processed any more.
        game.registry_mut().enemies.push(Enemy::new(player));
        let frozen = game.snapshot();
        game.clock().advance(Duration::from_secs(1));
        game.advance().unwrap();
        assert_eq!(game.snapshot(), frozen);
        assert_eq!(game.registry().player.hp, 0);
    }

    #[test]
    fn test_restart_returns_to_start_keeping_progress() {
        let mut game = running_game();
        let player = game.registry().player.position;
        game.registry_mut().player.hp = 1;
        game.registry_mut().enemies.push(Enemy::new(player));
        game.advance().unwrap();

        game.input_mut().push_action(Action::Restart);
        let events = game.advance().unwrap();
        assert_eq!(events, vec![GameEvent::ReturnedToStart]);
        assert_eq!(game.status(), GameStatus::Start);
        assert_eq!(game.difficulty(), 1);
    }

    #[test]
    fn test_level_clear_regenerates() {
        let mut game = running_game();
        game.registry_mut().enemies.clear();
        game.ammo = 1;

        let events = game.advance().unwrap();
        assert_eq!(game.status(), GameStatus::Running);
        assert_eq!(game.level(), 2);
        assert_eq!(game.ammo(), 5);
        assert_eq!(game.registry().enemies.len(), 3);
        assert!(events.contains(&GameEvent::LevelCleared { level: 1 }));
    }

    #[test]
    fn test_clearing_final_level_raises_difficulty() {
        let mut game = running_game();
        game.level = game.config().max_level;
        game.registry_mut().enemies.clear();

        let events = game.advance().unwrap();
        assert_eq!(game.status(), GameStatus::Start);
        assert_eq!(game.difficulty(), 2);
        assert!(events.contains(&GameEvent::DifficultyIncreased { difficulty: 2 }));
        // The start screen shows the tier's first level, not one past the last.
        assert_eq!(game.level(), 1);
        assert_eq!(game.snapshot().level, 1);

        game.input_mut().push_action(Action::Begin);
        game.advance().unwrap();
        assert_eq!(game.level(), 1);
        assert_eq!(game.difficulty(), 2);
        // Difficulty 2 adds one enemy on level 1.
        assert_eq!(game.registry().enemies.len(), 3);
    }

    #[test]
    fn test_player_moves_on_gate() {
        let mut game = GameState::new(
            GameConfig {
                generation: GenerationConfig {
                    max_rooms: 1,
                    ..GenerationConfig::for_testing()
                },
                ..GameConfig::for_testing()
            },
            // Room 5x5 at (3, 3); every enemy roll afterwards is North.
            ScriptedRandom::new([5, 5, 3, 3]),
            ManualClock::new(),
        )
        .unwrap();
        game.input_mut().push_action(Action::Begin);
        // Begin regenerates the same room from the extended script.
        game.rng.extend([5, 5, 3, 3]);
        game.advance().unwrap();

        let start = game.registry().player.position;
        assert_eq!(start, Position::new(5, 5));
        game.input_mut().press(Direction::East);

        // The player gate opened on the begin tick, so 119 ms is too early.
        game.clock().advance(Duration::from_millis(119));
        game.advance().unwrap();
        assert_eq!(game.registry().player.position, start);

        game.clock().advance(Duration::from_millis(1));
        let events = game.advance().unwrap();
        assert_eq!(game.registry().player.position, Position::new(6, 5));
        assert!(events.contains(&GameEvent::PlayerMoved {
            from: start,
            to: Position::new(6, 5)
        }));
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let game = running_game();
        assert_eq!(game.snapshot(), game.snapshot());
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = GameConfig::new();
        let json = config.to_json().unwrap();
        assert_eq!(GameConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "starting_ammo": 9 }"#).unwrap();
        assert_eq!(config.starting_ammo, 9);
        assert_eq!(config.starting_hp, 3);
        assert_eq!(config.generation, GenerationConfig::new());
    }

    #[test]
    fn test_bad_config_json_is_serde_error() {
        assert!(matches!(
            GameConfig::from_json("{ not json"),
            Err(KrawlError::Serde(_))
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "max_level": 0 }"#),
            Err(KrawlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_statistics_update() {
        let mut stats = GameStatistics::new();
        stats.update_from_event(&GameEvent::PlayerMoved {
            from: Position::new(1, 1),
            to: Position::new(2, 2),
        });
        stats.update_from_event(&GameEvent::EnemySlain {
            enemy: crate::new_entity_id(),
            position: Position::new(3, 3),
            cause: KillCause::Projectile,
        });
        stats.update_from_event(&GameEvent::LevelStarted {
            level: 4,
            difficulty: 1,
            enemies: 5,
        });
        assert_eq!(stats.steps_taken, 2);
        assert_eq!(stats.ranged_kills, 1);
        assert_eq!(stats.total_kills(), 1);
        assert_eq!(stats.max_level_reached, 4);
    }

    #[test]
    fn test_event_messages() {
        assert!(GameEvent::ReturnedToStart.message().is_none());
        assert!(GameEvent::ReturnedToStart.is_milestone());
        let hit = GameEvent::PlayerHit {
            enemy: crate::new_entity_id(),
            hp_left: 2,
        };
        assert_eq!(hit.message().as_deref(), Some("You are hit! HP 2"));
        assert!(!hit.is_milestone());
    }
}

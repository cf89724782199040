use glam::Vec2;

use crate::api::aim::launch_velocity;
use crate::api::config::{ConfigError, TableConfig, TunableChange, Tunables};
use crate::api::types::{BallId, Group};
use crate::components::table::TableGeometry;
use crate::core::ball_set::BallSet;
use crate::core::physics::{Integrator, PhysicsEvent, MIN_SPEED};
use crate::core::rack::rack_balls;
use crate::core::rng::Rng;
use crate::input::queue::{Command, CommandQueue};
use crate::rules::fouls::group_cleared;
use crate::rules::mode::{GameMode, GameState, MatchState};
use crate::rules::placement::{check_placement, respot_position};
use crate::rules::referee::{judge, ShotOutcome};
use crate::rules::shot::ShotTracker;

/// The whole table: geometry, balls, rules state and per-frame events.
///
/// Owned by the frame loop. Input reaches it through the entry points below
/// (or as [`Command`]s drained once per frame), never mid-step.
pub struct Table {
    geometry: TableGeometry,
    balls: BallSet,
    integrator: Integrator,
    tracker: ShotTracker,
    game: MatchState,
    tunables: Tunables,
    rng: Rng,
    /// Physics events from the most recent update.
    events: Vec<PhysicsEvent>,
    /// Result of the last cue placement check.
    placement_valid: bool,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let geometry = TableGeometry::from_config(&config);
        let mut rng = Rng::new(config.seed);
        let balls = BallSet::from_balls(rack_balls(GameMode::FreePlay, &geometry, &mut rng));
        Self {
            geometry,
            balls,
            integrator: Integrator::new(config.ball_restitution),
            tracker: ShotTracker::new(),
            game: MatchState::new(),
            tunables: config.tunables.clamped(),
            rng,
            events: Vec::with_capacity(64),
            placement_valid: false,
        }
    }

    /// Build a table from a JSON [`TableConfig`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(Self::new(TableConfig::from_json(json)?))
    }

    // -- Entry points --

    /// Rack for `mode` and hand the break to player one.
    pub fn select_mode(&mut self, mode: GameMode) {
        self.balls.replace(rack_balls(mode, &self.geometry, &mut self.rng));
        self.game.start(mode);
        self.tracker = ShotTracker::new();
        self.events.clear();
        self.placement_valid = self.cue_placement_ok();
        log::info!("new rack: {:?}", mode);
    }

    /// Rack again in the current mode.
    pub fn restart(&mut self) {
        if self.game.state == GameState::ModeSelect {
            log::warn!("restart ignored: no mode selected");
            return;
        }
        self.select_mode(self.game.mode);
    }

    /// Launch the cue ball. Returns false if the strike was ignored.
    ///
    /// Allowed while playing with every ball at rest, or while placing the
    /// cue ball if its current position is valid (placing is then confirmed).
    pub fn strike(&mut self, velocity: Vec2) -> bool {
        if !velocity.is_finite() || velocity.length_squared() <= f32::EPSILON {
            return false;
        }
        if !self.balls.is_active(BallId::CUE) {
            return false;
        }
        match self.game.state {
            GameState::Playing => {
                if self.tracker.in_progress() || self.balls.any_moving(MIN_SPEED) {
                    log::warn!("strike ignored: balls still moving");
                    return false;
                }
            }
            GameState::Breaking | GameState::BallInHand if self.placement_valid => {
                self.set_state(GameState::Playing);
            }
            state if state.is_over() => {
                log::info!("strike ignored: rack is over, restart to play again");
                return false;
            }
            state => {
                log::warn!("strike ignored in {:?}", state);
                return false;
            }
        }

        let max_power = self.tunables.max_power;
        if let Some(cue) = self.balls.cue_mut() {
            cue.vel = velocity.clamp_length_max(max_power);
        }
        self.tracker.reset_shot();
        true
    }

    /// Strike from an aim drag, using the current power tunables.
    pub fn strike_drag(&mut self, drag: Vec2) -> bool {
        match launch_velocity(drag, &self.tunables) {
            Some(velocity) => self.strike(velocity),
            None => false,
        }
    }

    /// Move the cue ball while it is being placed. Returns whether the spot is legal.
    pub fn propose_cue_position(&mut self, pos: Vec2) -> bool {
        if !self.game.state.is_placing() || !pos.is_finite() {
            return false;
        }
        let result = check_placement(pos, &self.geometry, &self.balls, self.game.kitchen_only());
        if let Err(e) = &result {
            log::debug!("cue placement rejected: {}", e);
        }
        if let Some(cue) = self.balls.cue_mut() {
            cue.place(pos);
        }
        self.placement_valid = result.is_ok();
        self.placement_valid
    }

    /// Accept the cue ball where it is. Only succeeds if the last proposal was valid.
    pub fn confirm_placement(&mut self) -> bool {
        if !self.game.state.is_placing() || !self.placement_valid {
            return false;
        }
        self.set_state(GameState::Playing);
        true
    }

    pub fn set_tunable(&mut self, change: TunableChange) {
        self.tunables.apply(change);
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Strike { vx, vy } => {
                self.strike(Vec2::new(vx, vy));
            }
            Command::ProposeCue { x, y } => {
                self.propose_cue_position(Vec2::new(x, y));
            }
            Command::ConfirmPlacement => {
                self.confirm_placement();
            }
            Command::SelectMode(mode) => self.select_mode(mode),
            Command::Restart => self.restart(),
            Command::SetTunable(change) => self.set_tunable(change),
        }
    }

    /// Apply every queued command.
    pub fn process(&mut self, commands: &mut CommandQueue) {
        for command in commands.drain() {
            self.apply(command);
        }
    }

    /// One display frame: pending commands first, then physics and rules.
    pub fn frame(&mut self, commands: &mut CommandQueue, dt: f32) {
        self.process(commands);
        self.update(dt);
    }

    /// Advance physics by `dt` and judge the shot once everything has stopped.
    pub fn update(&mut self, dt: f32) {
        self.events.clear();
        if self.game.state != GameState::Playing {
            return;
        }

        self.integrator.step_into(
            self.balls.as_mut_slice(),
            &self.geometry,
            &self.tunables,
            dt,
            &mut self.events,
        );
        for event in &self.events {
            if let PhysicsEvent::Pocketed { ball, pocket } = event {
                log::info!("ball {} pocketed in {}", ball.0, pocket);
            }
            self.tracker.record(event);
        }

        if self.tracker.in_progress() && !self.balls.any_moving(MIN_SPEED) {
            self.finish_shot();
        }
    }

    fn finish_shot(&mut self) {
        let Some(shot) = self.tracker.finish() else {
            return;
        };
        let outcome = judge(&shot, &self.game, &self.balls);
        self.apply_outcome(outcome);
    }

    fn apply_outcome(&mut self, outcome: ShotOutcome) {
        if outcome.is_foul() && self.game.mode.config().check_scratch {
            log::info!(
                "foul by player {}: {:?}{}",
                self.game.player.number(),
                outcome.foul,
                if outcome.scratch { " (scratch)" } else { "" }
            );
        }

        if outcome.rerack {
            let breaker = self.game.player;
            log::info!("8-ball down on the break, re-racking");
            self.select_mode(self.game.mode);
            self.game.player = breaker;
            return;
        }

        self.game.last_foul = outcome.foul;
        self.game.last_scratch = outcome.scratch;
        // A fouled break is taken again, and the retake is still a break.
        self.game.is_break_shot = self.game.is_break_shot && outcome.next_state == GameState::Breaking;
        if let Some(group) = outcome.assigned {
            self.game.assign_groups(group);
        }

        if let Some(winner) = outcome.winner {
            self.game.winner = Some(winner);
            self.set_state(outcome.next_state);
            log::info!("player {} wins", winner.number());
            return;
        }

        if outcome.turn_passes {
            self.game.switch_turn();
            log::info!("turn passes to player {}", self.game.player.number());
        }
        if outcome.respot_cue {
            self.respot_cue();
        }
        self.set_state(outcome.next_state);
        self.placement_valid = self.game.state.is_placing() && self.cue_placement_ok();
    }

    /// Put the cue ball back behind the head string, on the spot if it is free.
    pub fn respot_cue(&mut self) {
        let pos = respot_position(&self.geometry, &self.balls);
        if let Some(cue) = self.balls.cue_mut() {
            cue.place(pos);
        }
    }

    fn set_state(&mut self, state: GameState) {
        if self.game.state != state {
            log::info!("{:?} -> {:?}", self.game.state, state);
            self.game.state = state;
        }
    }

    fn cue_placement_ok(&self) -> bool {
        self.balls.cue().is_some_and(|cue| {
            cue.active
                && check_placement(cue.pos, &self.geometry, &self.balls, self.game.kitchen_only()).is_ok()
        })
    }

    // -- Reads --

    /// Ball the shooter should aim at, for the HUD.
    pub fn target_ball(&self) -> Option<BallId> {
        match self.game.mode {
            GameMode::FreePlay => None,
            GameMode::NineBall => self.balls.lowest_active_object(),
            GameMode::EightBall => {
                let group = self.game.shooter_group()?;
                self.lowest_in_group(group).or_else(|| {
                    (group_cleared(group, &self.balls) && self.balls.is_active(BallId::EIGHT))
                        .then_some(BallId::EIGHT)
                })
            }
        }
    }

    fn lowest_in_group(&self, group: Group) -> Option<BallId> {
        self.balls.active().map(|b| b.id).filter(|id| group.contains(*id)).min()
    }

    pub fn geometry(&self) -> &TableGeometry {
        &self.geometry
    }

    pub fn balls(&self) -> &BallSet {
        &self.balls
    }

    pub fn game(&self) -> &MatchState {
        &self.game
    }

    pub fn state(&self) -> GameState {
        self.game.state
    }

    pub fn tunables(&self) -> &Tunables {
        &self.tunables
    }

    pub fn events(&self) -> &[PhysicsEvent] {
        &self.events
    }

    pub fn placement_valid(&self) -> bool {
        self.placement_valid
    }

    pub fn shot_in_progress(&self) -> bool {
        self.tracker.in_progress()
    }

    pub fn is_moving(&self) -> bool {
        self.balls.any_moving(MIN_SPEED)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new(TableConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Player;
    use crate::rules::fouls::Foul;

    const DT: f32 = 1.0 / 60.0;

    /// Table in `mode`, past the break, player one to shoot.
    fn mid_game(mode: GameMode) -> Table {
        let mut table = Table::default();
        table.select_mode(mode);
        table.game.state = GameState::Playing;
        table.game.is_break_shot = false;
        table
    }

    /// Replay a shot from recorded events, then let the table judge it.
    fn play_events(table: &mut Table, events: &[PhysicsEvent]) {
        table.tracker.reset_shot();
        for event in events {
            if let PhysicsEvent::Pocketed { ball, .. } = event {
                table.balls.get_mut(*ball).unwrap().pocket();
            }
            table.tracker.record(event);
        }
        table.update(DT);
    }

    fn run_until_settled(table: &mut Table) {
        for _ in 0..2000 {
            table.update(DT);
            if !table.shot_in_progress() {
                return;
            }
        }
        panic!("shot never settled");
    }

    #[test]
    fn scratch_into_corner_gives_ball_in_hand_to_opponent() {
        let mut table = mid_game(GameMode::EightBall);
        table.balls.cue_mut().unwrap().place(Vec2::new(50.0, 50.0));

        assert!(table.strike(Vec2::new(-700.0, -700.0)));
        run_until_settled(&mut table);

        assert_eq!(table.state(), GameState::BallInHand);
        assert_eq!(table.game().player, Player::Two);
        assert!(table.game().last_scratch);
        let cue = table.balls().cue().unwrap();
        assert!(cue.active, "cue ball should be back on the table");
        assert!(table.placement_valid());

        assert!(table.game().kitchen_only());
        assert!(!table.propose_cue_position(Vec2::new(450.0, 120.0)), "scratch placement stays behind the line");
        assert!(!table.confirm_placement());
        assert!(table.propose_cue_position(Vec2::new(150.0, 120.0)));
        assert!(table.confirm_placement());
    }

    #[test]
    fn scratch_on_the_break_returns_to_kitchen() {
        let mut table = Table::default();
        table.select_mode(GameMode::NineBall);
        assert!(table.propose_cue_position(Vec2::new(50.0, 50.0)));
        assert!(table.strike(Vec2::new(-700.0, -700.0)));
        run_until_settled(&mut table);

        assert_eq!(table.state(), GameState::Breaking);
        assert_eq!(table.game().player, Player::Two);
        assert!(table.game().kitchen_only());
        assert!(table.game().is_break_shot, "the retaken break is still a break");
    }

    #[test]
    fn nine_ball_win_when_nine_drops_legally() {
        let mut table = mid_game(GameMode::NineBall);
        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId::CUE, b: BallId(1) },
                PhysicsEvent::Contact { a: BallId(1), b: BallId::NINE },
                PhysicsEvent::Pocketed { ball: BallId::NINE, pocket: 3 },
            ],
        );
        assert_eq!(table.state(), GameState::Won);
        assert_eq!(table.game().winner, Some(Player::One));
    }

    #[test]
    fn nine_ball_hitting_higher_ball_first_is_wrong_ball() {
        let mut table = mid_game(GameMode::NineBall);
        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId(3), b: BallId::CUE },
                PhysicsEvent::Contact { a: BallId(3), b: BallId(1) },
                PhysicsEvent::Pocketed { ball: BallId(1), pocket: 0 },
            ],
        );
        assert_eq!(table.game().last_foul, Some(Foul::WrongBall));
        assert_eq!(table.state(), GameState::BallInHand);
        assert_eq!(table.game().player, Player::Two);
    }

    #[test]
    fn eight_ball_groups_lock_in() {
        let mut table = mid_game(GameMode::EightBall);
        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId::CUE, b: BallId(3) },
                PhysicsEvent::Pocketed { ball: BallId(3), pocket: 1 },
            ],
        );
        assert_eq!(table.game().groups, [Some(Group::Solids), Some(Group::Stripes)]);
        assert_eq!(table.game().player, Player::One, "legal pocket keeps the turn");
        assert_eq!(table.target_ball(), Some(BallId(1)));

        // Shooter drops an opponent ball: no reassignment, turn passes.
        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId::CUE, b: BallId(5) },
                PhysicsEvent::Pocketed { ball: BallId(12), pocket: 2 },
            ],
        );
        assert_eq!(table.game().groups, [Some(Group::Solids), Some(Group::Stripes)]);
        assert_eq!(table.game().player, Player::Two);
        assert_eq!(table.target_ball(), Some(BallId(9)));

        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId::CUE, b: BallId(10) },
                PhysicsEvent::Pocketed { ball: BallId(10), pocket: 4 },
            ],
        );
        assert_eq!(table.game().groups, [Some(Group::Solids), Some(Group::Stripes)]);
        assert_eq!(table.game().player, Player::Two);
    }

    #[test]
    fn eight_on_the_break_reracks() {
        let mut table = Table::default();
        table.select_mode(GameMode::EightBall);
        table.game.state = GameState::Playing;
        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId::CUE, b: BallId(1) },
                PhysicsEvent::Pocketed { ball: BallId::EIGHT, pocket: 5 },
            ],
        );
        assert_eq!(table.state(), GameState::Breaking);
        assert!(table.game().is_break_shot);
        assert!(table.balls().is_active(BallId::EIGHT));
        assert_eq!(table.balls().active().count(), 16);
    }

    #[test]
    fn strike_gating() {
        let mut table = Table::default();
        assert!(!table.strike(Vec2::new(300.0, 0.0)), "no strikes before a mode is chosen");

        table.select_mode(GameMode::EightBall);
        assert!(!table.strike(Vec2::ZERO));
        assert!(!table.propose_cue_position(Vec2::new(400.0, 225.0)));
        assert!(!table.strike(Vec2::new(300.0, 0.0)), "invalid placement blocks the break");
        assert!(!table.confirm_placement());

        assert!(table.propose_cue_position(Vec2::new(150.0, 225.0)));
        assert!(table.strike(Vec2::new(5000.0, 0.0)));
        assert_eq!(table.state(), GameState::Playing);
        let speed = table.balls().cue().unwrap().vel.length();
        assert!((speed - table.tunables().max_power).abs() < 0.01, "strike not capped: {}", speed);
        assert!(!table.strike(Vec2::new(300.0, 0.0)), "balls are still rolling");
    }

    #[test]
    fn confirm_then_strike() {
        let mut table = Table::default();
        table.select_mode(GameMode::NineBall);
        assert!(table.placement_valid());
        assert!(table.confirm_placement());
        assert_eq!(table.state(), GameState::Playing);
        assert!(table.strike_drag(Vec2::new(40.0, 0.0)));
        assert!(!table.strike_drag(Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn physics_only_runs_while_playing() {
        let mut table = Table::default();
        table.select_mode(GameMode::FreePlay);
        table.balls.get_mut(BallId(4)).unwrap().vel = Vec2::new(200.0, 0.0);
        let before = table.balls().get(BallId(4)).unwrap().pos;
        table.update(DT);
        assert_eq!(table.balls().get(BallId(4)).unwrap().pos, before);
    }

    #[test]
    fn free_play_scratch_respots_without_penalty() {
        let mut table = mid_game(GameMode::FreePlay);
        table.balls.cue_mut().unwrap().place(Vec2::new(50.0, 50.0));
        assert!(table.strike(Vec2::new(-700.0, -700.0)));
        run_until_settled(&mut table);

        assert_eq!(table.state(), GameState::Playing);
        assert_eq!(table.game().player, Player::One);
        assert_eq!(table.balls().cue().unwrap().pos, table.geometry().cue_spot);
    }

    #[test]
    fn commands_apply_in_order() {
        let mut table = Table::default();
        let mut queue = CommandQueue::new();
        queue.push(Command::SelectMode(GameMode::NineBall));
        queue.push(Command::SetTunable(TunableChange::GravityEnabled(false)));
        queue.push(Command::ProposeCue { x: 120.0, y: 200.0 });
        queue.push(Command::ConfirmPlacement);
        table.frame(&mut queue, DT);

        assert!(queue.is_empty());
        assert_eq!(table.game().mode, GameMode::NineBall);
        assert!(!table.tunables().gravity_enabled);
        assert_eq!(table.state(), GameState::Playing);
        assert_eq!(table.balls().cue().unwrap().pos, Vec2::new(120.0, 200.0));
    }

    #[test]
    fn restart_after_a_loss() {
        let mut table = mid_game(GameMode::EightBall);
        play_events(
            &mut table,
            &[
                PhysicsEvent::Contact { a: BallId::CUE, b: BallId(2) },
                PhysicsEvent::Pocketed { ball: BallId::EIGHT, pocket: 0 },
            ],
        );
        assert_eq!(table.state(), GameState::Lost);
        assert_eq!(table.game().winner, Some(Player::Two));
        assert!(!table.strike(Vec2::new(300.0, 0.0)));

        table.restart();
        assert_eq!(table.state(), GameState::Breaking);
        assert!(table.game().winner.is_none());
        assert_eq!(table.balls().active().count(), 16);
    }

    #[test]
    fn from_json_uses_config() {
        let table = Table::from_json(r#"{ "seed": 7, "tunables": { "max_power": 800.0 } }"#).unwrap();
        assert_eq!(table.tunables().max_power, 800.0);
        assert!(Table::from_json("not json").is_err());
    }
}

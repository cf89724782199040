use pool_engine::bridge::snapshot::aim_json;
use pool_engine::rules::placement::is_valid_placement;
use pool_engine::{
    launch_velocity, BallBuffer, Command, CommandQueue, ConfigError, FrameClock, GameMode,
    Table, TableConfig, TableSnapshot, TunableChange,
};
use glam::Vec2;

/// Owns the table and everything the browser loop needs around it.
///
/// The `#[wasm_bindgen]` exports in `lib.rs` keep one of these in a
/// `thread_local!`, because wasm-bindgen cannot export it directly.
/// Input is queued and applied at the start of the next frame.
pub struct TableRunner {
    table: Table,
    commands: CommandQueue,
    clock: FrameClock,
    ball_buffer: BallBuffer,
}

impl TableRunner {
    pub fn new(config: TableConfig) -> Self {
        let table = Table::new(config);
        let mut ball_buffer = BallBuffer::new();
        ball_buffer.rebuild(table.balls());
        Self {
            table,
            commands: CommandQueue::new(),
            clock: FrameClock::new(),
            ball_buffer,
        }
    }

    /// Build from a JSON config. An empty string means the default table.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::new(TableConfig::default()));
        }
        Ok(Self::new(TableConfig::from_json(json)?))
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Run one frame with an explicit delta in seconds.
    pub fn tick(&mut self, dt: f32) {
        self.table.frame(&mut self.commands, dt);
        self.ball_buffer.rebuild(self.table.balls());
    }

    /// Run one frame from a display timestamp in milliseconds.
    pub fn frame(&mut self, now_ms: f64) {
        let dt = self.clock.tick(now_ms);
        self.tick(dt);
    }

    pub fn select_mode(&mut self, index: u32) -> bool {
        match GameMode::from_index(index) {
            Some(mode) => {
                self.push(Command::SelectMode(mode));
                true
            }
            None => {
                log::warn!("unknown game mode {}", index);
                false
            }
        }
    }

    /// Queue a strike for an aim drag. Returns false if the drag is too short to shoot.
    pub fn strike(&mut self, dx: f32, dy: f32) -> bool {
        match launch_velocity(Vec2::new(dx, dy), self.table.tunables()) {
            Some(v) => {
                self.push(Command::Strike { vx: v.x, vy: v.y });
                true
            }
            None => false,
        }
    }

    /// Queue a cue move and report whether the spot is legal right now.
    pub fn propose_cue(&mut self, x: f32, y: f32) -> bool {
        let valid = self.is_valid_placement(x, y);
        self.push(Command::ProposeCue { x, y });
        valid
    }

    pub fn is_valid_placement(&self, x: f32, y: f32) -> bool {
        let game = self.table.game();
        game.state.is_placing()
            && is_valid_placement(Vec2::new(x, y), self.table.geometry(), self.table.balls(), game.kitchen_only())
    }

    pub fn set_tunable(&mut self, change: TunableChange) {
        self.push(Command::SetTunable(change));
    }

    pub fn snapshot_json(&self) -> String {
        TableSnapshot::capture(&self.table).to_json()
    }

    pub fn aim_json(&self, dx: f32, dy: f32) -> String {
        aim_json(&self.table, Vec2::new(dx, dy))
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    // ---- Pointer accessors for direct memory reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.ball_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.ball_buffer.instance_count()
    }

    pub fn world_width(&self) -> f32 {
        self.table.geometry().bounds.width()
    }

    pub fn world_height(&self) -> f32 {
        self.table.geometry().bounds.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pool_engine::GameState;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn empty_config_is_default_table() {
        let runner = TableRunner::from_json("").unwrap();
        assert_eq!(runner.world_width(), 800.0);
        assert_eq!(runner.world_height(), 450.0);
        assert!(TableRunner::from_json("{ nope").is_err());
    }

    #[test]
    fn commands_wait_for_the_next_frame() {
        let mut runner = TableRunner::new(TableConfig::default());
        assert!(runner.select_mode(2));
        assert_eq!(runner.table().state(), GameState::ModeSelect);
        runner.tick(DT);
        assert_eq!(runner.table().state(), GameState::Breaking);
        assert_eq!(runner.instance_count(), 10);
        assert!(!runner.select_mode(9));
    }

    #[test]
    fn placement_and_strike_through_the_queue() {
        let mut runner = TableRunner::new(TableConfig::default());
        runner.select_mode(1);
        runner.tick(DT);

        assert!(!runner.propose_cue(500.0, 225.0), "break must start from the kitchen");
        assert!(runner.propose_cue(150.0, 200.0));
        assert!(!runner.strike(0.5, 0.0));
        assert!(runner.strike(60.0, 0.0));
        runner.tick(DT);

        assert_eq!(runner.table().state(), GameState::Playing);
        assert!(runner.table().shot_in_progress());
        assert!(runner.snapshot_json().contains("\"state\":\"playing\""));
    }

    #[test]
    fn frame_uses_timestamps() {
        let mut runner = TableRunner::new(TableConfig::default());
        runner.select_mode(0);
        runner.frame(1000.0);
        assert_eq!(runner.table().state(), GameState::Breaking);
        runner.frame(1016.0);
        assert!(runner.aim_json(0.0, 10.0).contains("power"));
    }
}

pub mod runner;

pub use runner::TableRunner;

use std::cell::RefCell;

use pool_engine::{Command, TunableChange};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<TableRunner>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut TableRunner) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Table not initialized. Call game_init() first.");
        f(runner)
    })
}

/// Create the table. `config_json` may be empty for the default table.
#[wasm_bindgen]
pub fn game_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let runner = TableRunner::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });

    log::info!("pool: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn game_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

/// Frame driven by `requestAnimationFrame` timestamps (ms).
#[wasm_bindgen]
pub fn game_frame(now_ms: f64) {
    with_runner(|r| r.frame(now_ms));
}

// ---- Input ----

#[wasm_bindgen]
pub fn game_select_mode(index: u32) -> bool {
    with_runner(|r| r.select_mode(index))
}

#[wasm_bindgen]
pub fn game_restart() {
    with_runner(|r| r.push(Command::Restart));
}

#[wasm_bindgen]
pub fn game_strike(dx: f32, dy: f32) -> bool {
    with_runner(|r| r.strike(dx, dy))
}

#[wasm_bindgen]
pub fn game_propose_cue(x: f32, y: f32) -> bool {
    with_runner(|r| r.propose_cue(x, y))
}

#[wasm_bindgen]
pub fn game_is_valid_placement(x: f32, y: f32) -> bool {
    with_runner(|r| r.is_valid_placement(x, y))
}

#[wasm_bindgen]
pub fn game_confirm_placement() {
    with_runner(|r| r.push(Command::ConfirmPlacement));
}

// ---- Tunables ----

#[wasm_bindgen]
pub fn game_set_high_speed_friction(value: f32) {
    with_runner(|r| r.set_tunable(TunableChange::HighSpeedFriction(value)));
}

#[wasm_bindgen]
pub fn game_set_low_speed_friction(value: f32) {
    with_runner(|r| r.set_tunable(TunableChange::LowSpeedFriction(value)));
}

#[wasm_bindgen]
pub fn game_set_max_power(value: f32) {
    with_runner(|r| r.set_tunable(TunableChange::MaxPower(value)));
}

#[wasm_bindgen]
pub fn game_set_power_scale(value: f32) {
    with_runner(|r| r.set_tunable(TunableChange::PowerScale(value)));
}

#[wasm_bindgen]
pub fn game_set_gravity(enabled: bool) {
    with_runner(|r| r.set_tunable(TunableChange::GravityEnabled(enabled)));
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn game_snapshot() -> String {
    with_runner(|r| r.snapshot_json())
}

#[wasm_bindgen]
pub fn game_aim(dx: f32, dy: f32) -> String {
    with_runner(|r| r.aim_json(dx, dy))
}

#[wasm_bindgen]
pub fn get_instances_ptr() -> *const f32 {
    with_runner(|r| r.instances_ptr())
}

#[wasm_bindgen]
pub fn get_instance_count() -> u32 {
    with_runner(|r| r.instance_count())
}

#[wasm_bindgen]
pub fn get_world_width() -> f32 {
    with_runner(|r| r.world_width())
}

#[wasm_bindgen]
pub fn get_world_height() -> f32 {
    with_runner(|r| r.world_height())
}

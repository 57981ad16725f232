//! Facade tests that need a JS host; run with `wasm-pack test --node`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use rebound_engine::World;

#[wasm_bindgen_test]
fn unknown_preset_is_an_error() {
    let err = World::from_preset("nope", 800.0, 600.0).err().unwrap();
    assert_eq!(err.as_string().unwrap(), "unknown preset `nope`");
}

#[wasm_bindgen_test]
fn invalid_viewport_is_an_error() {
    assert!(World::new(0.0, 600.0).is_err());
}

#[wasm_bindgen_test]
fn render_calls_back_once_per_body() {
    let mut world = World::from_config("drift", r#"{"seed": 1}"#, 1280.0, 720.0).unwrap();
    world.start();
    let seen = js_sys::Array::new();
    let push = js_sys::Function::new_with_args("x, y, r, style, speed", "this.push([x, y, r, style, speed]);");
    let bound = push.bind(&seen);
    let drawn = world.render(&bound).unwrap();
    assert_eq!(drawn, world.body_count());
    assert_eq!(seen.length(), world.body_count());
}

#[wasm_bindgen_test]
fn run_frame_invokes_scheduler_while_running() {
    let mut world = World::from_config("drift", r#"{"seed": 2}"#, 1280.0, 720.0).unwrap();
    world.start();
    let counter = js_sys::Array::new();
    let render = js_sys::Function::new_no_args("");
    let schedule = js_sys::Function::new_no_args("this.push(1);").bind(&counter);

    assert!(world.run_frame(&render, &schedule).unwrap());
    assert!(world.run_frame(&render, &schedule).unwrap());
    world.stop();
    assert!(!world.run_frame(&render, &schedule).unwrap());
    assert_eq!(counter.length(), 2);
}

#[wasm_bindgen_test]
fn render_errors_propagate() {
    let mut world = World::from_config("drift", r#"{"seed": 3}"#, 1280.0, 720.0).unwrap();
    world.start();
    let throwing = js_sys::Function::new_no_args("throw new Error('boom');");
    let err: JsValue = world.render(&throwing).err().unwrap();
    assert!(err.is_object());
}

#[wasm_bindgen_test]
fn stopped_world_rejects_resize() {
    let mut world = World::new(800.0, 600.0).unwrap();
    world.start();
    world.stop();
    let err = world.resize(400.0, 300.0).err().unwrap();
    assert_eq!(err.as_string().unwrap(), "simulation is stopped");
}

//! Test suite for the Web and headless browsers.

#![cfg(target_arch = "wasm32")]

extern crate wasm_bindgen_test;
use particle_field::config::FieldConfig;
use particle_field::renderer::RenderBackend;
use particle_field::ParticleField;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlCanvasElement;

wasm_bindgen_test_configure!(run_in_browser);

fn canvas() -> HtmlCanvasElement {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.create_element("canvas").ok())
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .expect("failed to create canvas")
}

fn seeded_field(config: &FieldConfig) -> ParticleField {
    let mut field = ParticleField::with_seed(canvas(), false, config, 17);
    field.resize_to(240, 160);
    field
}

#[wasm_bindgen_test]
fn fills_the_canvas_with_default_particles() {
    let mut field = seeded_field(&FieldConfig::default());

    assert!(field.is_attached());
    assert_eq!(field.particle_count(), 600);

    let stats = field.tick().unwrap();
    assert_eq!(stats.resting + stats.flying + stats.returning + stats.settled, 600);
}

#[wasm_bindgen_test]
fn pointer_disperses_and_release_brings_everything_home() {
    let mut field = seeded_field(&FieldConfig::default().with_particle_count(200));

    field.set_pointer(120.0, 80.0);
    let stats = field.tick().unwrap();
    assert!(stats.triggered > 0);
    assert!(field.dispersed_count() > 0);

    field.pointer_left();
    for _ in 0..500 {
        field.tick().unwrap();
    }
    assert_eq!(field.dispersed_count(), 0);
}

#[wasm_bindgen_test]
fn pixel_backend_draws_a_frame() {
    let mut field = seeded_field(&FieldConfig::default().with_particle_count(50));
    field.set_backend(RenderBackend::PixelBuffer);

    assert!(field.tick().is_ok());
    assert_eq!(field.particle_count(), 50);
}

#[wasm_bindgen_test]
fn theme_flip_keeps_the_field_running() {
    let mut field = seeded_field(&FieldConfig::default());
    field.tick().unwrap();

    field.set_dark_mode(true);

    assert!(field.dark_mode());
    assert_eq!(field.particle_count(), 600);
    assert!(field.tick().is_ok());
}

#[wasm_bindgen_test]
fn resize_to_same_size_keeps_particles() {
    let mut field = seeded_field(&FieldConfig::default());
    assert!(!field.resize_to(240, 160));
    assert!(field.resize_to(300, 160));
    assert_eq!(field.particle_count(), 600);
}

#[wasm_bindgen_test]
fn teardown_stops_everything() {
    let mut field = seeded_field(&FieldConfig::default());
    field.tick().unwrap();

    field.teardown();

    assert!(!field.is_attached());
    assert_eq!(field.particle_count(), 0);
    assert_eq!(field.tick().unwrap().resting, 0);
    assert!(!field.resize_to(100, 100));
}

#[wasm_bindgen_test]
fn canvas_without_2d_context_is_inert() {
    let canvas = canvas();
    let _bitmap = canvas.get_context("bitmaprenderer");

    let mut field = ParticleField::with_seed(canvas, true, &FieldConfig::default(), 3);
    field.set_pointer(10.0, 10.0);

    assert!(!field.is_attached());
    assert!(!field.resize_to(100, 100));
    assert_eq!(field.tick().unwrap().triggered, 0);
}

#[wasm_bindgen_test]
fn detached_canvas_has_no_layout_size() {
    // Not in the document, so there is nothing to size the field from yet
    let mut field = ParticleField::with_seed(canvas(), false, &FieldConfig::default(), 5);
    assert_eq!(field.particle_count(), 0);
    assert!(!field.fit_to_layout());
    assert_eq!(field.tick().unwrap().resting, 0);
}

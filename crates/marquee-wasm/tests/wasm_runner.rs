#![forbid(unsafe_code)]
#![cfg(target_arch = "wasm32")]

//! Smoke tests for the exported runners.
//!
//! Run:
//!   wasm-pack test --node crates/marquee-wasm

use marquee_wasm::{CarouselRunner, PageRunner};
use wasm_bindgen_test::wasm_bindgen_test;

#[wasm_bindgen_test]
fn runner_mounts_and_steps() {
    let mut runner = CarouselRunner::new(5, false, None, 0.0);
    assert!(runner.is_mounted());
    assert!(runner.drain_patches().length() > 0);
    assert_eq!(runner.next_deadline_ms(), Some(4200.0));

    let outcome = runner.push_encoded_input(r#"{"kind":"key","key":"ArrowRight"}"#, 16.0);
    assert_eq!(outcome, "consumed");
    assert_eq!(runner.active_index(), Some(1));
    assert!(runner.drain_patches().length() > 0);
}

#[wasm_bindgen_test]
fn runner_without_items_is_inert() {
    let mut runner = CarouselRunner::new(0, false, None, 0.0);
    assert!(!runner.is_mounted());
    assert!(runner.mount_error().is_some());
    assert_eq!(runner.drain_patches().length(), 0);
    assert_eq!(runner.destroy().length(), 0);
}

#[wasm_bindgen_test]
fn page_runner_drives_helpers() {
    let mut page = PageRunner::new(false, 2, true, 3, 1);
    assert!(page.nav_toggle());
    assert_eq!(page.nav_aria_expanded(), "true");
    assert!(page.nav_key("Escape"));

    let batch = r#"[{"target":1,"isIntersecting":true,"intersectionRatio":0.5}]"#;
    assert_eq!(page.observe_reveal(batch).ok(), Some(vec![1]));
    assert_eq!(page.observe_sections(batch).ok(), Some(Some(1)));
    assert!(page.observe_reveal("nope").is_err());

    assert!(page.hero_request());
    assert!(page.hero_frame(800.0, 0.0, 600.0).is_some());
    assert!(page.tilt_frame(0, 0.0, 0.0, 100.0, 100.0).is_undefined());
}

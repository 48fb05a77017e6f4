// Copyright 2026 the Linger Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Long press and long hover on a simulated toolbar.
//!
//! Replays a short input trace against two widgets and prints what each
//! recognizer reported. Set `RUST_LOG=trace` to watch timers being armed,
//! cancelled and delivered.
//!
//! Run:
//! - `cargo run -p linger_demos --example press_and_hover`

use core::time::Duration;

use linger_demos::{DemoHost, Pointer, Step};
use linger_gesture::long_hover::HoverInput;
use linger_gesture::long_press::{LongPressConfig, PressInput};
use tracing_subscriber::EnvFilter;

const SAVE: u32 = 1;
const DELETE: u32 = 2;

fn at(at: u64, node: u32) -> Pointer {
    Pointer { at, node }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let mut host = DemoHost::new();
    host.add_widget(SAVE, LongPressConfig::default(), Duration::from_millis(1_000));
    // Destructive action: ask for a deliberate hold.
    host.add_widget(
        DELETE,
        LongPressConfig::new().with_delay(Duration::from_millis(800)),
        Duration::from_millis(500),
    );

    let script = [
        // Quick tap on save: a click.
        Step::Press(at(0, SAVE), PressInput::TouchStart),
        Step::NativeTouchEnd(at(120, SAVE), 0),
        Step::Press(at(120, SAVE), PressInput::TouchEnd),
        // Hold save: long press at 1_300, no click on release.
        Step::Press(at(1_000, SAVE), PressInput::MouseDown),
        Step::Press(at(1_450, SAVE), PressInput::MouseUp),
        // Hover delete long enough to show its tooltip, then press and slide off.
        Step::Hover(at(2_000, DELETE), HoverInput::MouseEnter),
        Step::Press(at(2_600, DELETE), PressInput::MouseDown),
        Step::Press(at(2_900, DELETE), PressInput::MouseLeave),
        Step::Hover(at(2_900, DELETE), HoverInput::MouseLeave),
        // Pinch on save: the second finger keeps its default.
        Step::Press(at(4_000, SAVE), PressInput::TouchStart),
        Step::NativeTouchEnd(at(4_050, SAVE), 2),
        Step::Press(at(4_100, SAVE), PressInput::TouchEnd),
    ];
    host.run(&script, 5_000);

    for observed in host.observed() {
        println!("{observed:?}");
    }
}

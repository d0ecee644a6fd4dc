//! Types a sentence into whichever window has focus after a short pause.
//!
//! Run with `RUST_LOG=input_synth=debug` to follow target resolution and
//! delivery.

use ::std::{thread, time::Duration};
use ::tracing::{error, info};
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[cfg(windows)]
fn run() -> ::input_synth::errors::Result<()> {
    use ::input_synth::{
        input::{
            keyboard::{InputKey, Keyboard},
            mouse::{Pointer, ScrollKind, WHEEL_DELTA},
        },
        platform::Win32,
        Builder,
    };

    let dispatcher = Builder::new()
        .with_foreground_fallback(true)
        .with_press_delay(Duration::from_millis(20))
        .build(Win32);

    let keyboard = Keyboard::new(&dispatcher);
    let delivered = keyboard.type_text("Hello, Redmond! Typed by input-synth.")?;
    info!(?delivered, "Typed sentence");
    keyboard.key_press(&[InputKey::Enter])?;

    Pointer::new(&dispatcher).scroll(ScrollKind::MouseScrollDown, WHEEL_DELTA)?;
    Ok(())
}

#[cfg(not(windows))]
fn run() -> ::input_synth::errors::Result<()> {
    use ::input_synth::{
        input::keyboard::Keyboard, platform::RecordingPlatform, Dispatcher,
    };

    let dispatcher = Dispatcher::new(RecordingPlatform::new());
    Keyboard::new(&dispatcher).type_text("Hello, Redmond!")?;
    for record in dispatcher.platform().injected() {
        info!(?record, "Would inject");
    }
    Ok(())
}

pub fn main() {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    info!("Focus the target window, typing starts in 3 seconds");
    thread::sleep(Duration::from_secs(3));

    if let Err(err) = run() {
        error!(%err, "Failed to synthesize input");
    }
}

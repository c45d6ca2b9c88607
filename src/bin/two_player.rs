//! Two controllers, two balls. Start to play, Back to reset, A to recolour.

use color_eyre::{eyre::eyre, Result};
use gamepad_normalize::controller::{init_gilrs, ControllerAdapter, GilrsSource, Platform};
use gamepad_normalize::demo::{Ball, FrameInput, Game};
use gamepad_normalize::ControllerSettings;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    setup()?;

    let settings = ControllerSettings::load_default()?;
    let layout = match settings.layout {
        Some(layout) => layout,
        None => Platform::current()?.layout(),
    };

    let mut gilrs = init_gilrs()?;
    let mut controllers = Vec::new();
    for index in 0..2 {
        let source = GilrsSource::open(&gilrs, index, layout)
            .map_err(|e| eyre!("Two-player mode needs two gamepads: {}", e))?;
        let layout = source.layout();
        controllers.push(ControllerAdapter::with_layout(
            source,
            layout,
            Some(settings.dead_zone),
        )?);
    }
    info!(
        "Controllers {} and {} ready",
        controllers[0].id(),
        controllers[1].id()
    );

    let mut game = Game::new(vec![Ball::new(250, 290), Ball::new(330, 290)]);
    let mut was_playing = false;
    let mut last_positions = Vec::new();

    loop {
        while gilrs.next_event().is_some() {}

        let inputs: Vec<FrameInput> = controllers
            .iter_mut()
            .map(|controller| {
                controller.source_mut().refresh(&gilrs);
                FrameInput {
                    buttons: controller.buttons(),
                    left_stick: controller.left_stick(),
                }
            })
            .collect();
        game.step(&inputs);

        if game.playing != was_playing {
            info!("{}", if game.playing { "Game started" } else { "Game reset" });
            was_playing = game.playing;
        }
        let positions: Vec<_> = game.balls.iter().map(|b| (b.x, b.y, b.color)).collect();
        if positions != last_positions {
            info!("Balls: {:?}", positions);
            last_positions = positions;
        }

        std::thread::sleep(Duration::from_millis(settings.poll_interval_ms));
    }
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();
    Ok(())
}

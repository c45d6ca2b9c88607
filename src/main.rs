use color_eyre::{eyre::eyre, Result};
use gamepad_normalize::controller::{
    init_gilrs, gamepad_count, ControllerAdapter, ControllerState, GilrsSource, Platform,
};
use gamepad_normalize::ControllerSettings;
use gilrs::EventType;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    setup()?;

    let settings = ControllerSettings::load_default()?;
    info!("Starting visualizer with settings: {:?}", settings);

    let mut gilrs = init_gilrs()?;
    info!("{} gamepad(s) connected", gamepad_count(&gilrs));

    let layout = match settings.layout {
        Some(layout) => layout,
        None => Platform::current()?.layout(),
    };
    let source = GilrsSource::open(&gilrs, settings.device_index, layout)
        .map_err(|e| eyre!("Failed to open gamepad {}: {}", settings.device_index, e))?;

    let layout = source.layout();
    let mut controller = ControllerAdapter::with_layout(source, layout, Some(settings.dead_zone))?;

    let mut last = ControllerState::default();
    loop {
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::Connected => info!("Gamepad {} connected", event.id),
                EventType::Disconnected => warn!("Gamepad {} disconnected", event.id),
                _ => {}
            }
        }
        controller.source_mut().refresh(&gilrs);

        let state = controller.state();
        if state != last {
            print_state(&state);
            last = state;
        }

        std::thread::sleep(Duration::from_millis(settings.poll_interval_ms));
    }
}

fn print_state(state: &ControllerState) {
    let b = &state.buttons;
    let pad = state.pad.buttons();
    info!(
        "A:{} B:{} X:{} Y:{} LB:{} RB:{} Back:{} Start:{} Guide:{} LS:{} RS:{}",
        b.a as u8,
        b.b as u8,
        b.x as u8,
        b.y as u8,
        b.left_bumper as u8,
        b.right_bumper as u8,
        b.back as u8,
        b.start as u8,
        b.guide as u8,
        b.left_stick as u8,
        b.right_stick as u8
    );
    info!(
        "Left stick: ({:.2}, {:.2}) Right stick: ({:.2}, {:.2}) Triggers: {:.2}",
        state.left_stick.x,
        state.left_stick.y,
        state.right_stick.x,
        state.right_stick.y,
        state.triggers
    );
    info!(
        "D-pad up:{} right:{} down:{} left:{}",
        pad.up as u8, pad.right as u8, pad.down as u8, pad.left as u8
    );
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

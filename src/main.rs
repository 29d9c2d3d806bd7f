//! Juice Breakout entry point
//!
//! Runs a headless session: the paddle sweeps back and forth under a
//! scripted cursor while effects are written to the log.
//!
//! Usage: `juice-breakout [off|motion|full] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use juice_breakout::settings::JuicePreset;
    use juice_breakout::sim::{LogSink, PaletteKind, Stepper, TickInput};
    use juice_breakout::{Session, Settings, Tuning};

    env_logger::init();
    log::info!("Juice Breakout (headless) starting...");

    let mut args = std::env::args().skip(1);
    let preset = match args.next() {
        Some(name) => JuicePreset::from_str(&name).unwrap_or_else(|| {
            log::warn!("Unknown preset '{name}', using Full");
            JuicePreset::Full
        }),
        None => JuicePreset::Full,
    };
    let frames: u32 = args.next().and_then(|n| n.parse().ok()).unwrap_or(1800);

    let mut session = Session::new();
    let game = match session.start(Settings::from_preset(preset), Tuning::default()) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Failed to start: {e}");
            return;
        }
    };
    log::info!("Preset {} for {frames} frames", preset.as_str());

    const FRAME_DT: f32 = 1.0 / 60.0;
    let palettes = [
        PaletteKind::NoColor,
        PaletteKind::Color,
        PaletteKind::BlockHues,
    ];
    let half_width = game.tuning().field.width / 2.0;

    let mut stepper = Stepper::new();
    let mut sink = LogSink;
    let mut broken = 0;

    for frame in 0..frames {
        let t = frame as f32 * FRAME_DT;
        let input = TickInput {
            // Track the ball loosely so rallies last
            cursor_x: game
                .balls
                .first()
                .map(|ball| ball.pos.x + (t * 1.7).sin() * 0.5)
                .or(Some((t * 0.8).sin() * half_width)),
            // Respawn when the field is cleared
            reset_blocks: game.blocks.iter().all(|b| !b.is_visible()),
            // Cycle palettes every ten seconds
            palette: Some(palettes[(frame / 600) as usize % palettes.len()]),
        };
        if input.reset_blocks {
            broken += game.blocks.len();
            log::info!("Field cleared at frame {frame}");
        }

        stepper.advance(game, &input, FRAME_DT);
        game.dispatch_effects(&mut sink);
    }

    let remaining = game.blocks.iter().filter(|b| b.is_collidable()).count();
    log::info!(
        "Final score {} ({} fields cleared, {remaining} blocks standing)",
        game.score(),
        broken / game.blocks.len().max(1)
    );

    session.end();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page; nothing to run here
}

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use raylib::prelude::*;

mod audio;
mod camera;
mod cli;
mod config;
mod constants;
mod ending;
mod engine;
mod input;
mod player;
mod reel;
mod slide;
mod state;
mod texture_loader;
mod timeline;

use crate::audio::{AudioTrack, MusicTrack, SilentTrack};
use crate::cli::Args;
use crate::config::PlayerConfig;
use crate::constants::*;
use crate::engine::Engine;
use crate::player::Player;
use crate::reel::engine::ReelEngine;
use crate::slide::load_slides;

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => PlayerConfig::load_from(path)?,
        None => PlayerConfig::default(),
    };

    let slides = load_slides(&args.source)?;
    if slides.is_empty() {
        warn!("No slides in {}, the reel will open on its ending", args.source.display());
    }

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Film Reel")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Audio: any failure just means a silent reel ---
    let audio = match RaylibAudio::init_audio_device() {
        Ok(audio) => Some(audio),
        Err(e) => {
            warn!("No audio device: {:?}", e);
            None
        }
    };
    let track: Box<dyn AudioTrack + '_> = match (&audio, &args.music) {
        (Some(audio), Some(path)) => match audio.new_music(&path.to_string_lossy()) {
            Ok(music) => Box::new(MusicTrack::new(music)),
            Err(e) => {
                warn!("Could not load music {}: {:?}", path.display(), e);
                Box::new(SilentTrack)
            }
        },
        _ => Box::new(SilentTrack),
    };

    let clock_start = rl.get_time();
    let now_ms = |rl: &RaylibHandle| ((rl.get_time() - clock_start) * 1000.0).max(0.0) as u64;

    let player = Player::mount(slides, config, track, args.muted, now_ms(&rl))
        .view_only(args.view_only)
        .on_close(|| info!("Reel dismissed"));
    info!("View only: {}", player.is_view_only());

    let mut engine = ReelEngine::new(player);
    if !engine.initialize(&mut rl, &thread) {
        warn!("Some slides could not be loaded and show a placeholder");
    }

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let now = now_ms(&rl);
        if !engine.render_frame(now, dt, &mut rl, &thread) {
            break;
        }
    }

    // Window closed or Esc: same teardown as the close button
    engine.close();
    Ok(())
}

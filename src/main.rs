//! Sky Hop entry point
//!
//! Runs the game loop headless with a logging frontend and a simple
//! autopilot steering toward the next platform up. Pass a settings JSON
//! path as the first argument to override tuning.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use sky_hop::audio::{MusicCue, MusicDirector, SoundEffect, effect_volume, music_volume};
    use sky_hop::consts::TICK_PERIOD;
    use sky_hop::session::TickResult;
    use sky_hop::sim::GamePhase;
    use sky_hop::{Command, Frontend, LoopHandle, Session, Settings, Viewport};

    /// Games to play before exiting
    const GAMES: u32 = 3;
    /// Hard stop for the whole demo
    const TIME_LIMIT: Duration = Duration::from_secs(60);
    /// Pause once per game after this many frames
    const PAUSE_AT_FRAME: u32 = 300;

    /// Logs what a real frontend would draw and play
    struct LogFrontend {
        viewport: Viewport,
        sfx_volume: f32,
        music_volume: f32,
        music: MusicDirector,
        latest: Arc<Mutex<Option<TickResult>>>,
    }

    impl Frontend for LogFrontend {
        fn viewport_size(&self) -> Option<Viewport> {
            Some(self.viewport)
        }

        fn present(&mut self, frame: &TickResult) {
            for effect in SoundEffect::from_events(&frame.events) {
                log::debug!(
                    "sfx {:?} rate={} volume={:.2} at screen y={:.0}",
                    effect,
                    effect.playback_rate(),
                    self.sfx_volume,
                    frame.to_screen_y(frame.player.bottom())
                );
            }
            if frame.events.any() {
                log::trace!(
                    "{} of {} platforms on screen",
                    frame.visible_platforms().count(),
                    frame.platforms.len()
                );
            }
            match self.music.update(frame) {
                Some(MusicCue::Pause) => log::info!("music paused"),
                Some(cue) => log::info!("music {:?} at volume {:.2}", cue, self.music_volume),
                None => {}
            }

            if let Ok(mut latest) = self.latest.lock() {
                *latest = Some(frame.clone());
            }
        }
    }

    /// Horizontal velocity the autopilot wants this frame
    fn desired_velocity(frame: &TickResult, max_speed: f32) -> f32 {
        let player = &frame.player;
        let center = player.pos.x + player.size.x / 2.0;
        let feet = player.bottom();

        let target = frame
            .visible_platforms()
            .filter(|p| p.pos.y < feet && feet - p.pos.y < 600.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|p| p.pos.x + p.size.x / 2.0);

        match target {
            Some(x) => ((x - center) * 0.05).clamp(-max_speed, max_speed),
            None => 0.0,
        }
    }

    fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> std::io::Result<()> {
        let settings = std::env::args()
            .nth(1)
            .map(|path| Settings::load(path))
            .unwrap_or_default();
        let seed = settings.seed.unwrap_or_else(time_seed);
        log::info!("Sky Hop (headless) starting with seed {seed}");

        let viewport = Viewport::new(1080.0, 1920.0);
        let latest = Arc::new(Mutex::new(None));
        let frontend = LogFrontend {
            viewport,
            sfx_volume: effect_volume(&settings),
            music_volume: music_volume(&settings),
            music: MusicDirector::new(),
            latest: Arc::clone(&latest),
        };

        let session = Session::new(&settings, seed);
        let handle = LoopHandle::spawn(session, frontend)?;

        let accel = settings.tuning.move_acceleration;
        let max_speed = settings.tuning.max_move_speed;
        let resume_delay = Duration::from_millis(settings.resume_delay_ms);

        // Drag anchor, well away from the pause button
        let mut pointer_x = viewport.width / 2.0;
        let pointer_y = viewport.height * 0.8;
        handle.send(Command::PointerDown {
            x: pointer_x,
            y: pointer_y,
        });

        let started = SystemTime::now();
        let mut games = 0;
        let mut frames_this_game = 0;
        let mut best = 0;
        let mut awaiting_reset = false;

        loop {
            thread::sleep(TICK_PERIOD);
            if started.elapsed().map(|e| e > TIME_LIMIT).unwrap_or(true) {
                log::info!("Time limit reached");
                break;
            }

            let Some(frame) = latest.lock().ok().and_then(|f| f.clone()) else {
                continue;
            };

            match frame.phase {
                GamePhase::Running => {
                    awaiting_reset = false;
                    frames_this_game += 1;
                    if frames_this_game == PAUSE_AT_FRAME {
                        handle.send(Command::Pause);
                        handle.send(Command::ResumeAfter(resume_delay));
                        continue;
                    }

                    let dv = desired_velocity(&frame, max_speed) - frame.player.vel.x;
                    if accel > 0.0 && dv.abs() > 0.1 {
                        pointer_x += dv / accel;
                        handle.send(Command::PointerMove {
                            x: pointer_x,
                            y: pointer_y,
                        });
                    }
                }
                GamePhase::Paused => {}
                GamePhase::GameOver if awaiting_reset => {}
                GamePhase::GameOver => {
                    games += 1;
                    best = best.max(frame.score);
                    log::info!(
                        "Game {games} over: score {} difficulty {:.1}",
                        frame.score,
                        frame.difficulty_factor
                    );
                    if games >= GAMES {
                        break;
                    }
                    awaiting_reset = true;
                    frames_this_game = 0;
                    handle.send(Command::Reset);
                    handle.send(Command::PointerDown {
                        x: pointer_x,
                        y: pointer_y,
                    });
                }
            }
        }

        match handle.shutdown() {
            Ok(_frontend) => log::info!("Shut down cleanly, best score {best}"),
            Err(_) => log::error!("Game loop panicked"),
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::io::Result<()> {
    env_logger::init();
    headless::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts embed the library directly on the web
}

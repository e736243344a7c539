//! Fixed-cadence game loop
//!
//! The loop thread is the only writer of the session. Hosts send `Command`s
//! over a channel; they are applied between ticks, never mid-tick. Each
//! iteration the frontend receives one complete frame.
//!
//! Shutting down joins the loop thread before handing the frontend back, so
//! a frontend's audio and graphics resources are released only after the
//! loop can no longer touch them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::Viewport;
use crate::consts::TICK_PERIOD;
use crate::session::{Session, TickResult};
use crate::sim::GamePhase;

/// Host-side requests, applied between ticks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    Pause,
    /// Resume right away
    Resume,
    /// Resume once the delay has elapsed (pause menu "back to game")
    ResumeAfter(Duration),
    Reset,
}

/// The rendering/audio side of the game
pub trait Frontend: Send + 'static {
    /// Current surface size; `None` until the surface has been laid out
    fn viewport_size(&self) -> Option<Viewport>;

    /// Draw one frame and react to its events
    fn present(&mut self, frame: &TickResult);
}

/// One-shot timer that resumes a paused game
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumeAlarm {
    remaining: Option<Duration>,
}

impl ResumeAlarm {
    pub fn arm(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_armed(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance by `dt`; returns true exactly once, when the alarm fires
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) if left <= dt => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}

/// Loop state owned by the simulation thread
pub struct GameLoop<F: Frontend> {
    session: Session,
    frontend: F,
    alarm: ResumeAlarm,
    commands: Receiver<Command>,
}

impl<F: Frontend> GameLoop<F> {
    pub fn new(session: Session, frontend: F, commands: Receiver<Command>) -> Self {
        Self {
            session,
            frontend,
            alarm: ResumeAlarm::default(),
            commands,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn frontend(&self) -> &F {
        &self.frontend
    }

    pub fn alarm(&self) -> ResumeAlarm {
        self.alarm
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::PointerDown { x, y } => self.session.pointer_down(x, y),
            Command::PointerMove { x, y } => self.session.pointer_move(x, y),
            Command::Pause => {
                self.session.pause();
            }
            Command::Resume => {
                self.alarm.cancel();
                self.session.resume();
            }
            Command::ResumeAfter(delay) => {
                if self.session.phase() == Some(GamePhase::Paused) {
                    log::debug!("Resuming in {delay:?}");
                    self.alarm.arm(delay);
                }
            }
            Command::Reset => {
                self.alarm.cancel();
                self.session.reset();
            }
        }
    }

    /// One loop iteration: viewport, commands, alarm, tick, present.
    ///
    /// The viewport goes first so commands queued before the surface was
    /// sized land on a live game. `elapsed` is the wall time since the
    /// previous iteration.
    pub fn step(&mut self, elapsed: Duration) {
        self.session.set_viewport(self.frontend.viewport_size());

        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
        }

        if self.alarm.advance(elapsed) {
            self.session.resume();
        }

        if let Some(frame) = self.session.tick() {
            self.frontend.present(&frame);
        }
    }

    /// Run at the fixed cadence until `running` clears, then give back the frontend
    pub fn run(mut self, running: Arc<AtomicBool>) -> F {
        let mut last = Instant::now();
        while running.load(Ordering::Acquire) {
            let start = Instant::now();
            self.step(start - last);
            last = start;

            if let Some(rest) = TICK_PERIOD.checked_sub(start.elapsed()) {
                thread::sleep(rest);
            }
        }
        log::info!("Game loop stopped");
        self.frontend
    }
}

/// Host handle to a running loop thread
pub struct LoopHandle<F: Frontend> {
    commands: Sender<Command>,
    running: Arc<AtomicBool>,
    thread: JoinHandle<F>,
}

impl<F: Frontend> LoopHandle<F> {
    /// Start the loop thread
    pub fn spawn(session: Session, frontend: F) -> std::io::Result<Self> {
        let (commands, receiver) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let game_loop = GameLoop::new(session, frontend, receiver);

        let flag = Arc::clone(&running);
        let thread = thread::Builder::new()
            .name("sky-hop-sim".into())
            .spawn(move || game_loop.run(flag))?;

        log::info!("Game loop started");
        Ok(Self {
            commands,
            running,
            thread,
        })
    }

    /// Queue a command for the next iteration
    pub fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::warn!("Game loop gone; dropped {command:?}");
        }
    }

    /// Stop the loop, wait for it, and return the frontend
    pub fn shutdown(self) -> thread::Result<F> {
        self.running.store(false, Ordering::Release);
        self.thread.join()
    }
}

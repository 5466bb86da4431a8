//! Brick Breaker headless runner
//!
//! Drives the simulation from a fixed-timestep accumulator with an autopilot
//! paddle, logs gameplay events and prints the final snapshot as JSON.
//!
//! Usage: `brick-breaker [settings.json] [seed] [full|keep]`

use brick_breaker::{RestartPolicy, Settings};
use brick_breaker::consts::*;
use brick_breaker::sim::{GameEvent, GamePhase, GameSession, TickInput, tick};

/// Frame time of the pretend display (deliberately not a multiple of SIM_DT)
const FRAME_DT: f32 = 1.0 / 45.0;
/// Give up after this many frames (10 minutes of play)
const MAX_FRAMES: u32 = 45 * 60 * 10;
/// Rounds to play through before stopping after a win
const MAX_ROUNDS: u32 = 3;

/// Host-side state around the session
struct Game {
    session: GameSession,
    accumulator: f32,
    input: TickInput,
}

impl Game {
    fn new(session: GameSession) -> Self {
        Self {
            session,
            accumulator: 0.0,
            input: TickInput::default(),
        }
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.input.pointer_x = autopilot_target(&self.session);
            tick(&mut self.session, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.restart = false;

            for event in &self.session.events {
                log_event(event);
            }
        }
    }
}

/// Track the ball, wandering across the paddle so the deflection varies
fn autopilot_target(session: &GameSession) -> Option<f32> {
    let ball = &session.ball;
    let t = session.time_ticks as f32 * 0.013;
    let wander = (t.sin() * 0.6 + (t * 2.3).sin() * 0.3) * session.paddle.width / 2.0;

    // Lead the ball a little while it falls
    let lead = if ball.vel.y > 0.0 { ball.vel.x * 4.0 } else { 0.0 };
    Some(ball.pos.x + lead + wander)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::BrickDestroyed { index, points } => {
            log::debug!("Brick {} destroyed (+{})", index, points)
        }
        GameEvent::LifeLost { lives } => log::info!("Ball lost, {} lives left", lives),
        GameEvent::GameOver { score } => log::info!("GAME OVER - score {}", score),
        GameEvent::Win { score } => log::info!("YOU WIN - score {}", score),
        GameEvent::Restarted { round } => log::info!("Restarted (round {})", round),
        other => log::trace!("{:?}", other),
    }
}

fn main() {
    env_logger::init();
    log::info!("Brick Breaker (headless) starting...");

    let mut args = std::env::args().skip(1);
    let mut settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Invalid seed: {}", e);
            std::process::exit(1);
        }
        None => 0x5EED,
    };
    if let Some(arg) = args.next() {
        match RestartPolicy::from_str(&arg) {
            Some(policy) => settings.win_restart = policy,
            None => {
                log::error!("Unknown restart policy: {} (expected full or keep)", arg);
                std::process::exit(1);
            }
        }
    }
    log::info!("Win restart policy: {}", settings.win_restart.as_str());

    let session = match GameSession::new(settings, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Cannot start session: {}", e);
            std::process::exit(1);
        }
    };

    let mut game = Game::new(session);
    let mut frames = 0;
    while frames < MAX_FRAMES {
        if !game.session.is_running() {
            // Play on into another round only after a win that keeps progress
            let next_round = game.session.phase == GamePhase::Win
                && game.session.settings.win_restart == RestartPolicy::KeepProgress
                && game.session.round < MAX_ROUNDS;
            if !next_round {
                break;
            }
            game.input.restart = true;
        }
        game.update(FRAME_DT);
        frames += 1;
    }

    let session = &game.session;
    log::info!(
        "Stopped after {} frames ({} ticks): phase={} score={} lives={} bricks left={}",
        frames,
        session.time_ticks,
        session.phase.as_str(),
        session.score,
        session.lives,
        session.grid.remaining()
    );

    match session.snapshot().to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize snapshot: {}", e),
    }
}

//! Hop Arcade entry point
//!
//! Native: headless demo that plays a scripted run and logs what happens.
//! Web: exports a `WebGame` handle the page drives from requestAnimationFrame.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use hop_arcade::persistence::{HighScoreStore, LocalStorageStore};
    use hop_arcade::sim::GameState;
    use hop_arcade::view::{FrameSnapshot, Renderer};
    use hop_arcade::{GameLoop, InputEvent, InputQueue, SimulationConfig};

    /// Keeps the latest frame as JSON for the page's canvas code
    #[derive(Default)]
    struct JsonRenderer {
        frame: String,
    }

    impl Renderer for JsonRenderer {
        fn render(&mut self, frame: &FrameSnapshot) {
            match serde_json::to_string(frame) {
                Ok(json) => self.frame = json,
                Err(e) => log::warn!("Failed to serialize frame: {}", e),
            }
        }
    }

    /// Game handle exported to JavaScript. Timestamps are milliseconds.
    #[wasm_bindgen]
    pub struct WebGame {
        state: GameState,
        game_loop: GameLoop,
        input: InputQueue,
        renderer: JsonRenderer,
    }

    #[wasm_bindgen]
    impl WebGame {
        #[wasm_bindgen(constructor)]
        pub fn new() -> WebGame {
            let config = SimulationConfig {
                seed: js_sys::Date::now() as u64,
                ..SimulationConfig::default()
            };
            log::info!("Game initialized with seed: {}", config.seed);
            let store = HighScoreStore::new(Box::new(LocalStorageStore::new()));
            WebGame {
                game_loop: GameLoop::new(&config),
                state: GameState::new(config, store),
                input: InputQueue::new(),
                renderer: JsonRenderer::default(),
            }
        }

        pub fn start(&mut self, now_ms: f64) {
            self.game_loop.start(now_ms / 1000.0);
        }

        pub fn pause(&mut self) {
            self.game_loop.suspend(&mut self.state, &mut self.input);
        }

        pub fn resume(&mut self, now_ms: f64) {
            self.game_loop.resume(now_ms / 1000.0);
        }

        pub fn stop(&mut self) {
            self.game_loop.stop();
        }

        pub fn touch_start(&mut self, x: f32, y: f32) {
            self.input.push(InputEvent::TouchStart { x, y });
        }

        pub fn touch_end(&mut self) {
            self.input.push(InputEvent::TouchEnd);
        }

        /// Run one frame; returns the frame as JSON
        pub fn frame(&mut self, now_ms: f64) -> String {
            if let Some(events) = self.game_loop.frame(
                now_ms / 1000.0,
                &mut self.state,
                &mut self.input,
                &mut self.renderer,
            ) {
                for event in events {
                    log::debug!("{:?}", event);
                }
            }
            self.renderer.frame.clone()
        }

        pub fn score(&self) -> u64 {
            self.state.score.score
        }

        pub fn high_score(&self) -> u64 {
            self.state.score.high_score
        }
    }

    impl Default for WebGame {
        fn default() -> Self {
            Self::new()
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {}", e).into());
        }
        log::info!("Hop Arcade starting...");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use hop_arcade::leaderboard::{FriendScore, Leaderboard};
    use hop_arcade::persistence::{HighScoreStore, JsonFileStore};
    use hop_arcade::sim::{GameEvent, GameState, PlayerState, SessionPhase};
    use hop_arcade::view::{FrameSnapshot, Renderer};
    use hop_arcade::{ConfigError, GameLoop, InputEvent, InputQueue, SimulationConfig};

    const FRAME: f64 = 1.0 / 60.0;
    /// Hold durations (seconds) for the scripted run
    const SCRIPT: [f64; 8] = [0.3, 0.35, 0.45, 0.3, 0.5, 0.4, 0.6, 0.35];

    /// Logs a line every second of frames
    #[derive(Default)]
    struct LogRenderer {
        frames: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &FrameSnapshot) {
            self.frames += 1;
            if self.frames % 60 == 0 {
                log::trace!(
                    "frame {}: {:?} score {} camera ({:.0}, {:.0}) {} platforms visible",
                    self.frames,
                    frame.phase,
                    frame.score,
                    frame.camera_position.x,
                    frame.camera_position.y,
                    frame.platforms.len()
                );
            }
        }
    }

    struct Demo {
        state: GameState,
        game_loop: GameLoop,
        input: InputQueue,
        renderer: LogRenderer,
        now: f64,
    }

    impl Demo {
        fn step(&mut self) {
            self.now += FRAME;
            let events = self
                .game_loop
                .frame(self.now, &mut self.state, &mut self.input, &mut self.renderer)
                .unwrap_or_default();
            for event in events {
                report(&event);
            }
        }

        fn hold(&mut self, seconds: f64) {
            self.input.push(InputEvent::TouchStart { x: 0.0, y: 0.0 });
            let frames = (seconds / FRAME).round() as u32;
            for _ in 0..frames {
                self.step();
            }
            self.input.push(InputEvent::TouchEnd);
            self.step();
        }

        /// Run until the player can charge again or the session ends
        fn settle(&mut self) {
            for _ in 0..600 {
                if self.state.phase != SessionPhase::Playing
                    || self.state.player.state == PlayerState::Idle
                {
                    return;
                }
                self.step();
            }
        }
    }

    fn report(event: &GameEvent) {
        match event {
            GameEvent::Landed {
                index,
                zone,
                points,
                combo,
                ..
            } => println!("  landed on #{index}: {zone:?} +{points} (combo {combo})"),
            GameEvent::SpecialBonus { points, .. } => println!("  special bonus +{points}"),
            GameEvent::NewHighScore { score } => println!("  new high score {score}"),
            GameEvent::GameOver { score, high_score } => {
                println!("  game over: score {score}, best {high_score}")
            }
            other => log::debug!("{:?}", other),
        }
    }

    fn load_config() -> Result<SimulationConfig, ConfigError> {
        match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading config from {}", path);
                SimulationConfig::load(path)
            }
            None => Ok(SimulationConfig::default()),
        }
    }

    fn store_path() -> PathBuf {
        std::env::args()
            .nth(2)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("hop-arcade").join("store.json"))
    }

    pub fn run() {
        let config = match load_config() {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        };
        let store = HighScoreStore::new(Box::new(JsonFileStore::new(store_path())));

        let mut demo = Demo {
            game_loop: GameLoop::new(&config),
            state: GameState::new(config, store),
            input: InputQueue::new(),
            renderer: LogRenderer::default(),
            now: 0.0,
        };
        demo.game_loop.start(demo.now);

        // Tap to leave READY
        demo.input.push(InputEvent::TouchStart { x: 0.0, y: 0.0 });
        demo.input.push(InputEvent::TouchEnd);
        demo.step();

        for (i, seconds) in SCRIPT.iter().enumerate() {
            if demo.state.phase != SessionPhase::Playing {
                break;
            }
            println!("jump {} (hold {:.2}s)", i + 1, seconds);
            demo.hold(*seconds);
            demo.settle();
        }
        demo.game_loop.stop();

        let score = demo.state.score.score;
        println!(
            "final score {} (best {}), {} frames",
            score,
            demo.state.score.high_score,
            demo.game_loop.frames()
        );

        let board = Leaderboard::from_scores(vec![
            FriendScore::new("ada", 42),
            FriendScore::new("lin", 17),
            FriendScore::new("sam", 8),
            FriendScore::new("kit", 0),
        ]);
        match board.rank_of(score) {
            Some(rank) => println!("would rank #{} among friends", rank),
            None => println!("not on the friends board yet"),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Hop Arcade (native) starting...");
    demo::run();
}

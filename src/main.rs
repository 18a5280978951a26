//! Square Jumper entry point
//!
//! Web: drives the session from `requestAnimationFrame` and hands each
//! snapshot to the page as JSON. Native: runs a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use square_jumper::input::{Key, bind};
    use square_jumper::{Session, Tuning};

    /// Page-side hook receiving snapshot JSON every frame
    const FRAME_HOOK: &str = "squareJumperFrame";

    struct Game {
        session: Session,
        last_time: f64,
        /// A frame callback is scheduled
        looping: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                session: Session::with_tuning(load_tuning(), seed),
                last_time: 0.0,
                looping: false,
            }
        }

        /// Elapsed since the previous frame (None on the first frame)
        fn elapsed(&mut self, time: f64) -> Option<f64> {
            let elapsed = (self.last_time > 0.0).then(|| time - self.last_time);
            self.last_time = time;
            elapsed
        }

        /// Send the current snapshot to the presentation layer
        fn publish(&self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let Ok(hook) = js_sys::Reflect::get(&window, &JsValue::from_str(FRAME_HOOK)) else {
                return;
            };
            let Some(hook) = hook.dyn_ref::<js_sys::Function>() else {
                return;
            };
            match self.session.snapshot_json() {
                Ok(json) => {
                    let _ = hook.call1(&JsValue::NULL, &JsValue::from_str(&json));
                }
                Err(e) => log::warn!("Snapshot serialization failed: {e}"),
            }
        }
    }

    /// Tuning overrides from `?tuning=<json>` in the page URL
    fn load_tuning() -> Tuning {
        let search = web_sys::window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let Ok(params) = web_sys::UrlSearchParams::new_with_str(&search) else {
            return Tuning::default();
        };
        match params.get("tuning") {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Square Jumper initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_auto_pause(game.clone());
        game.borrow().publish();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let key = Key::from_code(&event.code());
            if key == Key::Space {
                // Keep the page from scrolling
                event.prevent_default();
            }
            let command = {
                let g = game.borrow();
                bind(key, g.session.phase())
            };
            if let Some(command) = command {
                game.borrow_mut().session.dispatch(command);
                ensure_loop(game.clone());
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Pause when the tab is hidden
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(move || {
            let hidden = web_sys::window()
                .and_then(|w| w.document())
                .map(|d| d.visibility_state() == web_sys::VisibilityState::Hidden)
                .unwrap_or(false);
            let mut g = game.borrow_mut();
            if hidden && g.session.phase() == square_jumper::sim::GamePhase::Running {
                g.session.toggle_pause();
                log::info!("Auto-paused (tab hidden)");
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Start the frame loop if the session wants frames and none is scheduled
    fn ensure_loop(game: Rc<RefCell<Game>>) {
        let start = {
            let mut g = game.borrow_mut();
            let start = g.session.wants_frames() && !g.looping;
            if start {
                g.looping = true;
                g.last_time = 0.0;
            }
            start
        };
        if start {
            request_animation_frame(game);
        } else {
            game.borrow().publish();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            let elapsed = g.elapsed(time);
            let before = g.session.snapshot().tick;
            // Paused frames carry the last tick's events; only new ticks go out
            if g.session.advance(elapsed).tick != before {
                g.publish();
            }
            g.looping = g.session.wants_frames();
            g.looping
        };
        // Over: stop requesting frames until the next start/reset
        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use square_jumper::sim::{GamePhase, Hazard, WorldState};
    use square_jumper::{Session, Tuning};

    /// Jump when the player sinks below the opening of the next obstacle
    /// (or below mid-field when the next hazard has no opening)
    pub fn should_jump(world: &WorldState, tuning: &Tuning) -> bool {
        let ahead = world
            .hazards
            .iter()
            .find(|h| h.trailing_edge(tuning) >= tuning.player_x);
        let target = match ahead {
            Some(Hazard::Gap(gap)) => gap.gap_center(tuning),
            _ => tuning.playfield_height / 2.0,
        };
        world.player.velocity >= 0.0 && world.player.y + tuning.player_size / 2.0 > target
    }

    pub fn run(seed: u64, max_ticks: u64, tuning: Tuning) -> u64 {
        let mut session = Session::with_tuning(tuning, seed);
        session.start();

        let mut ticks = 0;
        while ticks < max_ticks && session.phase() == GamePhase::Running {
            if should_jump(session.snapshot(), session.tuning()) {
                session.jump();
            }
            session.advance(None);
            ticks += 1;
        }

        let world = session.snapshot();
        log::info!(
            "Finished after {} ticks: phase {:?}, score {}",
            ticks,
            world.phase,
            world.score
        );
        world.score
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use square_jumper::sim::{GapObstacle, Player};

        #[test]
        fn test_autopilot_aims_for_gap() {
            let tuning = Tuning::default();
            let mut world = WorldState::new(&tuning, GamePhase::Running);
            world.hazards.push(Hazard::Gap(GapObstacle {
                id: 1,
                x: 300.0,
                gap_top: 300.0,
                scored: false,
            }));
            // Gap centre at 375: a player centred at 265 waits
            assert!(!should_jump(&world, &tuning));
            world.player = Player { y: 370.0, velocity: 1.0 };
            assert!(should_jump(&world, &tuning));
            world.player.velocity = -2.0;
            assert!(!should_jump(&world, &tuning));
        }

        #[test]
        fn test_autopilot_outlives_free_fall() {
            let mut session = Session::new(4);
            session.start();
            for _ in 0..60 {
                if should_jump(session.snapshot(), session.tuning()) {
                    session.jump();
                }
                session.advance(None);
            }
            // Free fall would have hit the floor after 30 ticks
            assert_eq!(session.phase(), GamePhase::Running);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Square Jumper (native) starting headless autopilot run...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    let max_ticks = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60);

    let tuning = match std::env::var("SQUARE_JUMPER_TUNING") {
        Ok(path) => match std::fs::read_to_string(&path) {
            Ok(json) => square_jumper::Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {path}: {e}");
                square_jumper::Tuning::default()
            }
        },
        Err(_) => square_jumper::Tuning::default(),
    };

    let score = headless::run(seed, max_ticks, tuning);
    println!("seed {seed}: score {score}");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

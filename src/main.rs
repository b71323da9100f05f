//! Frogger entry point
//!
//! Handles platform-specific initialization and runs the event loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use frogger::platform::web::SvgView;
    use frogger::render::{Frame, RenderSink};
    use frogger::{Game, Level, Settings};

    /// Game plus its view, shared by the timer and the key listeners
    struct App {
        game: Game,
        view: SvgView,
        /// `setInterval` handle, cleared when the simulation halts
        timer: Option<i32>,
    }

    impl App {
        /// Fold everything queued so far and render each state
        fn drain(&mut self) {
            if self.game.halted().is_some() {
                return;
            }
            if let Err(e) = self.game.pump(&mut self.view) {
                log::error!("Simulation halted: {e}");
                if let (Some(handle), Some(window)) = (self.timer.take(), web_sys::window()) {
                    window.clear_interval_with_handle(handle);
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let settings = Settings::load();
        if console_log::init_with_level(settings.log_level.to_level()).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("Frogger starting (log level {})...", settings.log_level.as_str());

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let game = match Game::new(Level::classic(), &settings) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot start: {e}");
                return;
            }
        };

        let mut view = match SvgView::mount(&document, &game.level().shapes) {
            Ok(view) => view,
            Err(e) => {
                log::error!("Cannot build the playfield: {e:?}");
                return;
            }
        };
        view.present(&Frame::project(game.state()));

        let app = Rc::new(RefCell::new(App {
            game,
            view,
            timer: None,
        }));

        setup_input_handlers(&window, &document, app.clone());
        start_clock(&window, app, settings.tick_period_ms);

        log::info!("Frogger running!");
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        document: &web_sys::Document,
        app: Rc<RefCell<App>>,
    ) {
        // Key down: at most one move per physical press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                app.game.key_down(&event.code(), event.repeat());
                app.drain();
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key_up(&event.code());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events will not arrive
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.blur();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn start_clock(window: &web_sys::Window, app: Rc<RefCell<App>>, period_ms: u32) {
        let handle = app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut app = handle.borrow_mut();
            app.game.tick();
            app.drain();
        });
        let callback: &js_sys::Function = closure.as_ref().unchecked_ref();
        let period = i32::try_from(period_ms).unwrap_or(i32::MAX);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(callback, period) {
            Ok(id) => app.borrow_mut().timer = Some(id),
            Err(e) => log::error!("Failed to start the tick timer: {e:?}"),
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use frogger::Settings;

    let settings = Settings::load();
    env_logger::Builder::new()
        .filter_level(settings.log_level.to_level().to_level_filter())
        .parse_default_env()
        .init();
    log::info!("Frogger (native) starting...");
    log::info!("Native mode is a headless scripted run - use `trunk serve` for the web version");

    if let Err(e) = headless::run(&settings) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use frogger::render::LogSink;
    use frogger::{Game, Level, Settings, SimError};

    /// Ticks between scripted key presses
    const TICKS_PER_PRESS: usize = 40;

    /// Walk up to the bank, wait, then try the river
    const SCRIPT: &[&str] = &[
        "ArrowLeft",
        "ArrowUp",
        "ArrowUp",
        "ArrowUp",
        "ArrowUp",
        "ArrowUp",
        "ArrowUp",
    ];

    pub fn run(settings: &Settings) -> Result<(), SimError> {
        let mut game = Game::new(Level::classic(), settings)?;
        let mut sink = LogSink::default();

        for code in SCRIPT {
            game.key_down(code, false);
            game.key_up(code);
            for _ in 0..TICKS_PER_PRESS {
                game.tick();
            }
            game.pump(&mut sink)?;
        }

        let state = game.state();
        log::info!(
            "Headless run done after {} frames: player {:?}, score {}, high score {}",
            sink.frames,
            state.player.pos,
            state.score,
            state.high_score
        );
        Ok(())
    }
}

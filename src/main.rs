//! Friends Snake entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, TouchEvent};

    use friends_snake::audio::{AudioManager, SoundEffect};
    use friends_snake::consts::TILE;
    use friends_snake::platform::{
        BrowserClock, Command, Presenter, command_for_key, direction_for_swipe,
    };
    use friends_snake::renderer::CanvasRenderer;
    use friends_snake::sim::{GameEvent, GamePhase, GameState, Hud, Snapshot};
    use friends_snake::{Session, Settings};

    /// Renderer, HUD and audio behind the session
    struct DomPresenter {
        document: Document,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        settings: Settings,
    }

    impl DomPresenter {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    impl Presenter for DomPresenter {
        fn present(&mut self, snapshot: &Snapshot<'_>, hud: &Hud, status: &str) {
            if let Some(renderer) = &self.renderer {
                renderer.render(snapshot);
            }
            self.set_text("score", &hud.score.to_string());
            self.set_text("speedLevel", &hud.speed_level.to_string());
            self.set_text("len", &hud.length.to_string());
            self.set_text("status", status);
        }

        fn events(&mut self, events: &[GameEvent]) {
            for effect in events.iter().filter_map(SoundEffect::for_event) {
                self.audio.play(effect);
            }
        }
    }

    type Game = Session<BrowserClock, DomPresenter>;

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            return;
        }

        log::info!("Friends Snake starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed);

        let canvas: Option<HtmlCanvasElement> = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into().ok());
        let renderer = canvas.as_ref().and_then(|canvas| {
            canvas.set_width((f64::from(state.grid.cols) * TILE) as u32);
            canvas.set_height((f64::from(state.grid.rows) * TILE) as u32);
            CanvasRenderer::new(canvas)
        });
        if renderer.is_none() {
            log::warn!("No 2D canvas - rendering disabled");
        }

        let settings = Settings::load();
        sync_toggles(&document, &settings);
        let presenter = DomPresenter {
            document: document.clone(),
            renderer,
            audio: AudioManager::new(settings.clone()),
            settings,
        };

        let game = Rc::new(RefCell::new(Session::new(
            state,
            BrowserClock::default(),
            presenter,
        )));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        if let Some(canvas) = &canvas {
            setup_touch(canvas, game.clone());
        }
        setup_buttons(&document, game.clone());
        setup_audio_toggles(&document, game.clone());
        setup_auto_pause(&document, game.clone());

        request_animation_frame(game);
        log::info!("Friends Snake running!");
    }

    fn sync_toggles(document: &Document, settings: &Settings) {
        for (id, checked) in [
            ("musicToggle", settings.music_enabled),
            ("sfxToggle", settings.sfx_enabled),
        ] {
            if let Some(input) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            {
                input.set_checked(checked);
            }
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let Some(command) = command_for_key(&event.key()) else {
                return;
            };
            event.prevent_default();
            let mut g = game.borrow_mut();
            g.presenter_mut().audio.ensure_started();
            match command {
                Command::Steer(dir) => g.steer(dir),
                Command::TogglePause => {
                    if let Err(e) = g.toggle_pause() {
                        log::debug!("{}", e);
                    }
                }
                Command::ToggleAutopilot => {
                    let enabled = !g.autopilot();
                    g.set_autopilot(enabled);
                }
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let touch_start: Rc<RefCell<Option<(f64, f64)>>> = Rc::new(RefCell::new(None));

        // Touch start: remember where the swipe began
        {
            let touch_start = touch_start.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    *touch_start.borrow_mut() =
                        Some((f64::from(touch.client_x()), f64::from(touch.client_y())));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end: steer along the dominant swipe axis
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let Some((sx, sy)) = touch_start.borrow_mut().take() else {
                    return;
                };
                if let Some(touch) = event.changed_touches().get(0) {
                    let dx = f64::from(touch.client_x()) - sx;
                    let dy = f64::from(touch.client_y()) - sy;
                    game.borrow_mut().steer(direction_for_swipe(dx, dy));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        // Start: fresh board, running
        if let Some(btn) = document.get_element_by_id("startBtn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.presenter_mut().audio.ensure_started();
                g.restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pause / resume
        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Err(e) = game.borrow_mut().toggle_pause() {
                    log::debug!("{}", e);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_audio_toggles(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["musicToggle", "sfxToggle"] {
            let Some(input) = document
                .get_element_by_id(id)
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                continue;
            };
            let game = game.clone();
            let input_clone = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                let presenter = g.presenter_mut();
                let mut settings = presenter.settings.clone();
                if id == "musicToggle" {
                    settings.music_enabled = input_clone.checked();
                } else {
                    settings.sfx_enabled = input_clone.checked();
                }
                settings.save();
                presenter.audio.apply_settings(settings.clone());
                presenter.settings = settings;
            });
            let _ =
                input.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(document: &Document, game: Rc<RefCell<Game>>) {
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if g.state().phase == GamePhase::Running && g.pause().is_ok() {
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame();
            g.presenter_mut().audio.update_music();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

/// Drive an autopilot session until game over or the frame budget runs out
#[cfg(not(target_arch = "wasm32"))]
fn run_demo<C: friends_snake::platform::Clock>(
    mut session: friends_snake::Session<C, friends_snake::platform::NullPresenter>,
    mut wait_frame: impl FnMut(&mut C),
) {
    use friends_snake::sim::GamePhase;

    // Five minutes of 60 Hz frames
    const MAX_FRAMES: u32 = 5 * 60 * 60;

    session.set_autopilot(true);
    if let Err(e) = session.start() {
        log::error!("{}", e);
        return;
    }

    let mut frames = 0;
    while frames < MAX_FRAMES && session.state().phase == GamePhase::Running {
        wait_frame(session.clock_mut());
        session.frame();
        frames += 1;
    }

    let state = session.state();
    let hud = state.hud();
    println!(
        "seed {}: {} after {} ticks - score {}, length {}, speed {}",
        state.seed,
        session.status(),
        state.time_ticks,
        hud.score,
        hud.length,
        hud.speed_level
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use friends_snake::Session;
    use friends_snake::platform::{ManualClock, NullPresenter, SystemClock};
    use friends_snake::sim::GameState;

    const FRAME_MS: u64 = 16;

    env_logger::init();
    log::info!("Friends Snake (native) starting...");
    log::info!("Native mode runs an autopilot demo - run with `trunk serve` for the web version");

    // Usage: friends-snake [seed] [--realtime]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let realtime = args.iter().any(|a| a == "--realtime");
    let seed = args
        .iter()
        .find_map(|a| a.parse::<u64>().ok())
        .unwrap_or(42);
    let state = GameState::new(seed);

    if realtime {
        log::info!("Playing in real time");
        let session = Session::new(state, SystemClock::default(), NullPresenter);
        run_demo(session, |_| {
            std::thread::sleep(std::time::Duration::from_millis(FRAME_MS));
        });
    } else {
        let session = Session::new(state, ManualClock::new(0), NullPresenter);
        run_demo(session, |clock| clock.advance(FRAME_MS));
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

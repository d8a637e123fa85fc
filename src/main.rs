//! Wall Climber entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

    use wall_climber::platform::{Command, command_for_key};
    use wall_climber::renderer::{SceneRenderer, SpriteAssets, SpriteRenderer, VectorRenderer};
    use wall_climber::sim::{GameEvent, GameSession, Side};
    use wall_climber::{RenderStyle, Settings};

    /// Longest frame delta fed to the session (ms)
    const MAX_FRAME_MS: f64 = 250.0;

    type Renderer = Box<dyn SceneRenderer<Error = JsValue>>;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        renderer: Renderer,
        settings: Settings,
        last_time: f64,
    }

    impl Game {
        /// Apply a player command right away
        fn command(&mut self, command: Command) {
            command.send(&mut self.session);
        }

        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;
            self.session.advance(dt);
        }

        fn render(&mut self) {
            let snapshot = self.session.snapshot();
            if let Err(e) = self.renderer.render(&snapshot) {
                log::warn!("Render error: {:?}", e);
            }
        }

        /// Push session events and the countdown into the DOM
        fn update_hud(&mut self, document: &Document) {
            for event in self.session.drain_events() {
                match event {
                    GameEvent::Climbed { score } => set_text(document, "score", score),
                    GameEvent::GameOver { final_score } => {
                        set_text(document, "finalScore", final_score);
                        set_hidden(document, "gameOver", false);
                        log::info!("Game over, final score {}", final_score);
                    }
                    GameEvent::Restarted => {
                        set_text(document, "score", 0);
                        set_hidden(document, "gameOver", true);
                    }
                    GameEvent::DayNightToggled { is_day } => {
                        // Remember the theme for the next visit
                        self.settings.start_in_day = is_day;
                        self.settings.save();
                    }
                    GameEvent::Slipped { pressed } => log::debug!("Slipped reaching {:?}", pressed),
                    GameEvent::TimedOut => log::debug!("Turn timed out"),
                    GameEvent::ScrollFinished => {}
                }
            }

            if let Some(fill) = element::<HtmlElement>(document, "timerFill") {
                let width = format!("{}%", self.session.timer().fraction() * 100.0);
                let _ = fill.style().set_property("width", &width);
            }
        }
    }

    fn element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
        document.get_element_by_id(id)?.dyn_into::<T>().ok()
    }

    fn set_text(document: &Document, id: &str, value: u32) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Build the renderer for the configured style, falling back to vector
    /// drawing when the sprite images can't be decoded
    async fn build_renderer(
        ctx: CanvasRenderingContext2d,
        settings: &mut Settings,
    ) -> Renderer {
        let (w, h) = (settings.viewport_width as f64, settings.viewport_height as f64);
        if settings.style == RenderStyle::Sprite {
            match SpriteAssets::load().await {
                Ok(assets) => {
                    settings.frames_per_row = assets.grid().cols;
                    return Box::new(SpriteRenderer::new(ctx, w, h, assets));
                }
                Err(e) => {
                    log::warn!("Sprite assets unavailable ({:?}), using vector style", e);
                    settings.style = RenderStyle::Vector;
                }
            }
        }
        Box::new(VectorRenderer::new(ctx, w, h, settings.hold_spacing))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Wall Climber starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement =
            element(&document, "gameCanvas").ok_or("no gameCanvas element")?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let mut settings =
            Settings::load().with_viewport(canvas.width() as f32, canvas.height() as f32);
        if let Err(e) = settings.validate() {
            log::warn!("Invalid settings ({}), using defaults", e);
            settings = Settings::default()
                .with_viewport(canvas.width() as f32, canvas.height() as f32);
        }

        let renderer = build_renderer(ctx, &mut settings).await;

        let seed = js_sys::Date::now() as u64;
        let session = GameSession::with_seed(settings.clone(), seed);
        log::info!("Session seeded with {}, {} style", seed, settings.style.as_str());

        let game = Rc::new(RefCell::new(Game {
            session,
            renderer,
            settings,
            last_time: 0.0,
        }));

        setup_keyboard(game.clone())?;
        setup_buttons(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Wall Climber running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if let Some(command) = command_for_key(&event.key()) {
                game.borrow_mut().command(command);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let buttons = [
            ("leftBtn", Command::Move(Side::Left)),
            ("rightBtn", Command::Move(Side::Right)),
            ("restartBtn", Command::Restart),
        ];

        for (id, command) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{} button", id);
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().command(command);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use wall_climber::platform::Command;
    use wall_climber::sim::{GameSession, TickInput, TurnPhase, tick};
    use wall_climber::{RenderStyle, Settings};

    env_logger::init();
    log::info!("Wall Climber (native) starting...");
    log::info!("Native mode runs a headless autoplay demo - use `trunk serve` for the web version");

    let style = std::env::args()
        .nth(1)
        .and_then(|arg| RenderStyle::from_str(&arg))
        .unwrap_or_default();
    let mut session = GameSession::with_seed(Settings::from_style(style), 42);
    let mut input = TickInput::default();
    let dt = 1000.0 / 60.0;
    let turns = 20;

    // Climb correctly for a while, then reach for the wrong side
    for frame in 0..100_000 {
        if session.is_game_over() {
            break;
        }
        if session.accepts_input() {
            let active = session.holds().active().side;
            let side = if session.score() < turns {
                active
            } else {
                active.opposite()
            };
            Command::Move(side).apply(&mut input);
        }
        tick(&mut session, &input, dt);
        input.clear();

        for event in session.drain_events() {
            log::debug!("frame {}: {:?}", frame, event);
        }
    }

    if session.phase() != TurnPhase::GameOver {
        log::warn!("Autoplay stopped before the run ended");
    }
    println!(
        "Autoplay ({}) finished with score {}",
        style.as_str(),
        session.final_score().unwrap_or(0)
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

//! Wall Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use wall_pong::bootstrap::{BootError, RetryPolicy, error_banner_html};
    use wall_pong::consts::{BANNER_TEXT, VIEWPORT_HEIGHT, VIEWPORT_WIDTH};
    use wall_pong::renderer::{RenderState, scene_vertices};
    use wall_pong::sim::{GameEvent, InputState, autopilot};
    use wall_pong::{GameConfig, GameScene, SceneRunner};

    /// Game instance holding all state
    struct Game {
        runner: SceneRunner<GameScene>,
        render_state: RenderState,
        /// Keys currently held
        input: InputState,
        /// Idle/demo mode - autopilot drives the paddle
        idle_mode: bool,
        last_time: f64,
        /// Last score text written to the DOM
        shown_score: String,
    }

    impl Game {
        /// Simulate one frame
        fn update(&mut self, delta_ms: f32) {
            let input = if self.idle_mode {
                match self.runner.state() {
                    Some(state) => autopilot(state, self.runner.physics()).unwrap_or_default(),
                    None => InputState::IDLE,
                }
            } else {
                self.input
            };

            match self.runner.frame(delta_ms, &input) {
                Ok(events) => {
                    for event in events {
                        let GameEvent::PaddleHit { score, velocity } = event;
                        log::debug!("Hit #{} - ball speed {:.1}", score, velocity.length());
                    }
                }
                Err(e) => log::error!("Frame failed: {}", e),
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(state) = self.runner.state() else {
                return;
            };
            let vertices = match scene_vertices(state, self.runner.physics()) {
                Ok(v) => v,
                Err(e) => {
                    log::error!("Failed to build frame: {}", e);
                    return;
                }
            };

            match self.render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let (w, h) = self.render_state.size;
                    self.render_state.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update the scoreboard in the DOM when the text changed
        fn update_hud(&mut self) {
            let Some(state) = self.runner.state() else {
                return;
            };
            if state.score_text == self.shown_score {
                return;
            }

            let el = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("score"));
            if let Some(el) = el {
                el.set_text_content(Some(&state.score_text));
                self.shown_score = state.score_text.clone();
            }
        }
    }

    /// Resolve after `ms` milliseconds
    async fn sleep_ms(ms: i32) {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            let scheduled = web_sys::window().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
                    .ok()
            });
            if scheduled.is_none() {
                let _ = resolve.call0(&JsValue::NULL);
            }
        });
        let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
    }

    /// Replace the game container's contents with an error panel
    fn show_error(err: &BootError) {
        let container = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("game-container"));
        if let Some(container) = container {
            container.set_inner_html(&error_banner_html(err));
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Wall Pong starting...");

        if let Err(e) = start().await {
            log::error!("Error creating game: {}", e);
            show_error(&e);
        }
    }

    async fn start() -> Result<(), BootError> {
        let window = web_sys::window().ok_or(BootError::NoWindow)?;
        let document = window.document().ok_or(BootError::NoDocument)?;

        let config = GameConfig::load();

        let canvas: HtmlCanvasElement = RetryPolicy::default()
            .poll("canvas", || document.get_element_by_id("canvas"), sleep_ms)
            .await?
            .dyn_into()
            .map_err(|_| BootError::NotACanvas("canvas"))?;

        // Fixed logical viewport, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (VIEWPORT_WIDTH as f64 * dpr) as u32;
        let height = (VIEWPORT_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| BootError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| BootError::Adapter(e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width, height, config.viewport()).await?;

        let mut runner = SceneRunner::for_game(config);
        runner.boot()?;

        if let Some(el) = document.get_element_by_id("banner") {
            el.set_text_content(Some(BANNER_TEXT));
        }

        let game = Rc::new(RefCell::new(Game {
            runner,
            render_state,
            input: InputState::IDLE,
            idle_mode: false,
            last_time: 0.0,
            shown_score: String::new(),
        }));

        setup_input_handlers(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Wall Pong running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), BootError> {
        let window = web_sys::window().ok_or(BootError::NoWindow)?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                if g.input.set_key(&key, true) {
                    event.prevent_default();
                } else if key == "i" || key == "I" {
                    g.idle_mode = !g.idle_mode;
                    log::info!("Idle mode: {}", g.idle_mode);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.set_key(&event.key(), false) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - key up events are lost, release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input = InputState::IDLE;
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No window, game loop stopped");
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

            // Elapsed ms since the previous frame
            let delta_ms = if g.last_time > 0.0 {
                (time - g.last_time) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(delta_ms);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Frames simulated by the native headless run (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u32 = 60 * 60;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wall Pong (native) starting...");
    log::info!("Native mode runs headless - use `trunk serve` for the web version");

    match run_headless(HEADLESS_FRAMES) {
        Ok(score) => println!("Autopilot scored {} in {} frames", score, HEADLESS_FRAMES),
        Err(e) => {
            log::error!("Headless run failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Run the simulation with the autopilot at a fixed 60 Hz frame rate
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(frames: u32) -> Result<u32, wall_pong::BootError> {
    use wall_pong::sim::{GameEvent, autopilot};
    use wall_pong::{GameConfig, SceneRunner};

    let config = GameConfig::load();
    config.validate()?;

    let mut runner = SceneRunner::for_game(config);
    runner.boot()?;

    let delta_ms = 1000.0 / 60.0;
    for frame in 0..frames {
        let input = match runner.state() {
            Some(state) => autopilot(state, runner.physics())?,
            None => break,
        };
        for event in runner.frame(delta_ms, &input)? {
            let GameEvent::PaddleHit { score, velocity } = event;
            log::info!(
                "Frame {}: hit #{}, ball speed {:.1}",
                frame,
                score,
                velocity.length()
            );
        }
    }

    Ok(runner.state().map(|s| s.score).unwrap_or(0))
}

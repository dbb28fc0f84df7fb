//! Shuttle Court entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, KeyboardEvent};

    use glam::Vec2;
    use shuttle_court::audio::{AudioManager, SoundEffect};
    use shuttle_court::consts::*;
    use shuttle_court::draw::{TextAnchor, draw_match};
    use shuttle_court::input::Controls;
    use shuttle_court::renderer::{FrameBuilder, RenderState, TextLabel, court_to_ndc};
    use shuttle_court::settings::Settings;
    use shuttle_court::sim::{MatchEvent, MatchState, tick};

    /// Game instance holding all state
    struct Game {
        state: MatchState,
        settings: Settings,
        controls: Controls,
        frame: FrameBuilder,
        render_state: Option<RenderState>,
        audio: AudioManager,
        accumulator: f32,
        last_time: f64,
        /// Canvas size in CSS pixels, for laying out text
        css_size: (f32, f32),
        /// Last HUD markup written, to skip redundant DOM updates
        hud_html: String,
        quit: bool,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: MatchState::with_settings(seed, &settings),
                audio: AudioManager::new(&settings),
                settings,
                controls: Controls::default(),
                frame: FrameBuilder::new(),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                css_size: (COURT_WIDTH, COURT_HEIGHT),
                hud_html: String::new(),
                quit: false,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.controls.take_input();
                for event in tick(&mut self.state, &input) {
                    if let Some(effect) = SoundEffect::for_event(&event) {
                        self.audio.play(effect);
                    }
                    if event == MatchEvent::QuitRequested {
                        self.quit = true;
                    }
                }
                self.accumulator -= SIM_DT;
                substeps += 1;

                if self.quit {
                    return;
                }
            }

            // Fell too far behind; drop the backlog rather than fast-forward
            if substeps == MAX_SUBSTEPS {
                self.accumulator = 0.0;
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.frame.clear();
            draw_match(&self.state, &self.settings, &mut self.frame);

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.frame) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Lay the frame's text labels over the canvas
        fn update_hud(&mut self, hud: &Element) {
            let html = hud_markup(self.frame.labels(), self.css_size);
            if html != self.hud_html {
                hud.set_inner_html(&html);
                self.hud_html = html;
            }
        }
    }

    /// Absolutely positioned spans, one per label, in CSS pixels of the canvas
    fn hud_markup(labels: &[TextLabel], css_size: (f32, f32)) -> String {
        let viewport = (css_size.0.max(1.0) as u32, css_size.1.max(1.0) as u32);
        // CSS pixels per court unit (uniform after letterboxing)
        let px_per_unit = (court_to_ndc(Vec2::ZERO, viewport).y
            - court_to_ndc(Vec2::new(0.0, 1.0), viewport).y)
            * css_size.1
            / 2.0;

        let mut html = String::new();
        for label in labels {
            let ndc = court_to_ndc(label.pos, viewport);
            let left = (ndc.x + 1.0) / 2.0 * css_size.0;
            let top = (1.0 - ndc.y) / 2.0 * css_size.1;
            let shift = match label.style.anchor {
                TextAnchor::Start => "0%",
                TextAnchor::Middle => "-50%",
                TextAnchor::End => "-100%",
            };
            let [r, g, b, a] = label.style.color;
            let _ = write!(
                html,
                "<span style=\"left:{left:.1}px;top:{top:.1}px;font-size:{:.1}px;\
                 transform:translateX({shift});color:rgba({},{},{},{a})\">{}</span>",
                label.style.size.height() * px_per_unit,
                (r * 255.0) as u8,
                (g * 255.0) as u8,
                (b * 255.0) as u8,
                escape_html(&label.text),
            );
        }
        html
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    /// Size the canvas backing store to its CSS box at device pixel ratio
    fn fit_canvas(canvas: &HtmlCanvasElement) -> ((u32, u32), (f32, f32)) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let client_w = canvas.client_width().max(1);
        let client_h = canvas.client_height().max(1);
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        ((width, height), (client_w as f32, client_h as f32))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Shuttle Court starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let hud = document.get_element_by_id("hud").expect("no hud");

        let ((width, height), css_size) = fit_canvas(&canvas);

        // Initialize game
        let settings = Settings::load();
        // Store the sanitized copy so every field is present for hand edits
        settings.save();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        game.borrow_mut().css_size = css_size;

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game, hud);

        log::info!("Shuttle Court running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.controls.key_down(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    g.audio.resume();
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
                if game.borrow_mut().controls.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: key-up events are lost while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().controls.release_all();
                log::info!("Released keys (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let ((width, height), css_size) = fit_canvas(&canvas);
            let mut g = game.borrow_mut();
            g.css_size = css_size;
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, hud: Element) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, hud, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, hud: Element, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);

            if g.quit {
                hud.set_inner_html("<span class=\"farewell\">Thanks for playing!</span>");
                log::info!("Game stopped");
                return;
            }

            g.render();
            g.update_hud(&hud);
        }

        request_animation_frame(game, hud);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Shuttle Court (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the playable web version");

    let settings = shuttle_court::Settings::load();
    let seed = settings.seed.unwrap_or_else(seed_from_clock);
    demo_rally(seed, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Serve once with nobody at the rackets and report how the rally plays out
#[cfg(not(target_arch = "wasm32"))]
fn demo_rally(seed: u64, settings: &shuttle_court::Settings) {
    use shuttle_court::consts::FPS;
    use shuttle_court::draw::draw_match;
    use shuttle_court::renderer::FrameBuilder;
    use shuttle_court::sim::{MatchEvent, MatchState, TickInput, tick};

    println!("\nDemo rally (seed {seed})");
    let mut state = MatchState::with_settings(seed, settings);
    let serve = TickInput {
        serve: true,
        ..Default::default()
    };
    let mut input = serve;

    // Ten seconds of play is far longer than any unreturned serve
    for _ in 0..FPS * 10 {
        let events = tick(&mut state, &input);
        input = TickInput::default();

        for event in &events {
            println!("  frame {:>4}: {:?}", state.frame, event);
        }
        if events
            .iter()
            .any(|e| matches!(e, MatchEvent::PointScored { .. }))
        {
            break;
        }
    }

    let mut frame = FrameBuilder::new();
    draw_match(&state, settings, &mut frame);
    let (left, right) = state.scores();
    println!("Score: Left {left} - Right {right}");
    println!(
        "Final frame: {} vertices, {} text labels",
        frame.vertices().len(),
        frame.labels().len()
    );
}

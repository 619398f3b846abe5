//! Flappy Zolder entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlInputElement, KeyboardEvent, TouchEvent};

    use flappy_zolder::consts::{FIELD_HEIGHT, FIELD_WIDTH};
    use flappy_zolder::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use flappy_zolder::platform::{AnimationFrameScheduler, InputEvent};
    use flappy_zolder::renderer::skin::{CHARACTERS, PALETTE};
    use flappy_zolder::renderer::{RenderState, SkinId, SpriteRenderer};
    use flappy_zolder::{GameDriver, Phase, Settings, Tuning};

    type Store = Box<dyn KeyValueStore>;

    /// Game instance holding all state
    struct Game {
        driver: GameDriver<Store, AnimationFrameScheduler>,
        renderer: SpriteRenderer,
        /// Shares the driver's request flag
        scheduler: AnimationFrameScheduler,
        settings: Settings,
        settings_store: Store,
        /// Character highlighted in the menu
        selected: Option<SkinId>,
        /// Phase the DOM was last synced to
        shown_phase: Phase,
    }

    impl Game {
        fn frame(&mut self) {
            self.driver.on_frame(&mut self.renderer);
            self.sync_dom();
        }

        fn select(&mut self, name: &str) {
            self.selected = Some(SkinId::new(name));
            self.settings.last_character = Some(name.to_string());
            if let Err(e) = self.settings.save(&mut self.settings_store) {
                log::warn!("Could not save settings: {}", e);
            }
        }

        fn set_sprites(&mut self, enabled: bool) {
            log::info!("Sprites {}", if enabled { "on" } else { "off" });
            self.settings.sprites = enabled;
            self.renderer.set_sprites_enabled(enabled);
            if let Err(e) = self.settings.save(&mut self.settings_store) {
                log::warn!("Could not save settings: {}", e);
            }
        }

        /// Bring overlays in line with the driver's phase
        fn sync_dom(&mut self) {
            let Some(document) = page_document() else {
                return;
            };
            let phase = self.driver.phase();

            if let Some(el) = document.get_element_by_id("score") {
                let text = match phase {
                    Phase::Idle | Phase::Running => {
                        format!("Score: {}", self.driver.state().score)
                    }
                    Phase::Menu | Phase::Terminal { .. } => String::new(),
                };
                el.set_text_content(Some(&text));
            }

            if phase == self.shown_phase {
                return;
            }
            log::debug!("DOM phase {:?} -> {:?}", self.shown_phase, phase);

            match phase {
                Phase::Menu => {
                    set_hidden(&document, "leaderboard-modal", true);
                    set_hidden(&document, "gameCanvas", true);
                    set_hidden(&document, "character-select", false);
                }
                Phase::Idle | Phase::Running => {
                    set_hidden(&document, "leaderboard-modal", true);
                    set_hidden(&document, "character-select", true);
                    set_hidden(&document, "gameCanvas", false);
                }
                Phase::Terminal { prompt } => self.show_leaderboard(&document, prompt),
            }
            self.shown_phase = phase;
        }

        fn show_leaderboard(&self, document: &Document, prompt: bool) {
            if let Some(list) = document.get_element_by_id("leaderboard-list") {
                list.set_inner_html("");
                for entry in self.driver.leaderboard_top() {
                    if let Ok(li) = document.create_element("li") {
                        li.set_text_content(Some(&format!("{}: {}", entry.name, entry.score)));
                        let _ = list.append_child(&li);
                    }
                }
            }
            if let (Some(el), Some(summary)) = (
                document.get_element_by_id("final-score"),
                self.driver.last_summary(),
            ) {
                el.set_text_content(Some(&format!("Your Score: {}", summary.score)));
            }
            set_hidden(document, "highscore-form", !prompt);
            set_hidden(document, "leaderboard-modal", false);

            if prompt {
                if let Some(input) = document
                    .get_element_by_id("player-name")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                {
                    input.set_value("");
                    let _ = input.focus();
                }
            }
        }
    }

    fn page_document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// LocalStorage, or memory when the browser refuses it
    fn open_store() -> Store {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    fn hex_css(rgb: u32) -> String {
        format!("#{:06x}", rgb)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Flappy Zolder starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution; the field maps onto it whole
        let dpr = window.device_pixel_ratio();
        let width = (FIELD_WIDTH as f64 * dpr) as u32;
        let height = (FIELD_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let gpu = RenderState::new(surface, &adapter, width, height, (FIELD_WIDTH, FIELD_HEIGHT))
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get device: {}", e)))?;

        let settings_store = open_store();
        let settings = Settings::load(&settings_store);

        let scheduler = AnimationFrameScheduler::new();
        let seed = js_sys::Date::now() as u64;
        let driver = GameDriver::new(Tuning::default(), open_store(), scheduler.clone(), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let game = Rc::new(RefCell::new(Game {
            driver,
            renderer: SpriteRenderer::new(gpu, settings.sprites),
            scheduler,
            selected: None,
            settings,
            settings_store,
            shown_phase: Phase::Menu,
        }));

        log::info!("Game initialized with seed: {}", seed);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        setup_character_grid(&document, game.clone())?;
        setup_start_button(&document, game.clone())?;
        setup_sprites_toggle(&document, game.clone())?;
        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_leaderboard_buttons(&document, game.clone())?;

        log::info!("Flappy Zolder running!");
        Ok(())
    }

    fn setup_character_grid(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(grid) = document.get_element_by_id("character-grid") else {
            return Ok(());
        };
        grid.set_inner_html("");

        let preselect = game.borrow().settings.last_character.clone();
        for (idx, &name) in CHARACTERS.iter().enumerate() {
            let option = document.create_element("div")?;
            option.set_class_name("character-option");
            option.set_text_content(Some(name));
            option.set_attribute("title", name)?;
            option.set_attribute(
                "style",
                &format!("background: {}", hex_css(PALETTE[idx % PALETTE.len()])),
            )?;

            let game = game.clone();
            let this = option.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                highlight(&this);
                game.borrow_mut().select(name);
            });
            option.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();

            grid.append_child(&option)?;

            if preselect.as_deref() == Some(name) {
                highlight(&option);
                game.borrow_mut().selected = Some(SkinId::new(name));
            }
        }
        Ok(())
    }

    fn setup_sprites_toggle(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(toggle) = document
            .get_element_by_id("sprites-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return Ok(());
        };
        toggle.set_checked(game.borrow().settings.sprites);

        let this = toggle.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().set_sprites(this.checked());
        });
        toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Mark one grid entry selected and enable the start button
    fn highlight(option: &Element) {
        let Some(document) = page_document() else {
            return;
        };
        if let Ok(all) = document.query_selector_all(".character-option") {
            for i in 0..all.length() {
                if let Some(el) = all.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                    let _ = el.class_list().remove_1("selected");
                }
            }
        }
        let _ = option.class_list().add_1("selected");
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let _ = btn.remove_attribute("disabled");
        }
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("start-btn") else {
            return Ok(());
        };
        if game.borrow().selected.is_none() {
            btn.set_attribute("disabled", "")?;
        }
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let skin = game.borrow().selected.clone();
            if let Some(skin) = skin {
                game.borrow_mut().driver.push(InputEvent::SelectCharacter(skin));
                pump(game.clone());
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() != "Space" && event.key() != " " {
                    return;
                }
                let tap = game.borrow().driver.tap_event();
                if let Some(input) = tap {
                    event.prevent_default();
                    game.borrow_mut().driver.push(input);
                    pump(game.clone());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let tap = game.borrow().driver.tap_event();
                if let Some(input) = tap {
                    game.borrow_mut().driver.push(input);
                    pump(game.clone());
                }
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_leaderboard_buttons(
        document: &Document,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id("save-score-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let name = page_document()
                    .and_then(|d| d.get_element_by_id("player-name"))
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                game.borrow_mut().driver.push(InputEvent::SubmitName(name));
                pump(game.clone());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("close-leaderboard") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().driver.push(InputEvent::DismissLeaderboard);
                pump(game.clone());
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Hand a pending frame request to requestAnimationFrame
    fn pump(game: Rc<RefCell<Game>>) {
        if !game.borrow().scheduler.take_request() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game.borrow_mut().frame();
            pump(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
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
mod headless {
    use flappy_zolder::persistence::MemoryStore;
    use flappy_zolder::platform::{InputEvent, ManualScheduler};
    use flappy_zolder::renderer::{RenderTarget, SkinId};
    use flappy_zolder::sim::SimulationState;
    use flappy_zolder::{GameDriver, Phase, Tuning};

    /// Counts frames instead of drawing them
    #[derive(Default)]
    struct FrameCounter {
        frames: u64,
    }

    impl RenderTarget for FrameCounter {
        fn render(&mut self, state: &SimulationState, _skin: Option<&SkinId>) {
            self.frames += 1;
            if self.frames % 600 == 0 {
                log::debug!("frame {}: score {}", self.frames, state.score);
            }
        }
    }

    /// Flap when falling below the middle of the next gap
    fn should_flap(state: &SimulationState) -> bool {
        let t = &state.tuning;
        let left = t.avatar_x - t.avatar_size / 2.0;
        let Some(next) = state
            .obstacles
            .iter()
            .find(|o| o.trailing_edge(t.obstacle_width) > left)
        else {
            return false;
        };
        let target = next.gap_top + t.gap_size / 2.0 + t.avatar_size / 2.0;
        state.avatar.velocity >= 0.0 && state.avatar.y > target
    }

    /// Play one autopiloted round through the driver
    pub fn run(seed: u64) -> Result<(), flappy_zolder::tuning::TuningError> {
        let mut driver =
            GameDriver::new(Tuning::default(), MemoryStore::new(), ManualScheduler::new(), seed)?;
        let mut target = FrameCounter::default();

        driver.push(InputEvent::SelectCharacter(SkinId::new("Sam")));
        driver.push(InputEvent::Flap);

        while driver.scheduler_mut().take_request() {
            driver.on_frame(&mut target);
            if driver.phase() == Phase::Running && should_flap(driver.state()) {
                driver.push(InputEvent::Flap);
            }
        }

        if let Some(summary) = driver.last_summary() {
            log::info!(
                "Autopilot finished: {:?} with score {} after {} frames",
                summary.outcome,
                summary.score,
                target.frames
            );
        }

        if driver.phase() == (Phase::Terminal { prompt: true }) {
            driver.push(InputEvent::SubmitName("Autopilot".to_string()));
            while driver.scheduler_mut().take_request() {
                driver.on_frame(&mut target);
            }
        }

        for (rank, entry) in driver.leaderboard_top().iter().enumerate() {
            log::info!("{:>2}. {}: {}", rank + 1, entry.name, entry.score);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Flappy Zolder (native) starting...");
    log::info!("Native mode runs a headless round - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0)
        });

    if let Err(e) = headless::run(seed) {
        log::error!("Cannot start: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

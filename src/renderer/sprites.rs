//! Sprite loading for the web build
//!
//! Images load asynchronously through `<img>` elements. Until a sprite is
//! decoded the resolver sees it as missing and falls through to the next
//! skin source, so a frame never waits on the network.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::RenderTarget;
use super::pipeline::RenderState;
use super::scene::build_scene;
use super::skin::{BASE_PIPE_DOWN, BASE_PIPE_UP, SkinId, SkinResolver, SpriteId, SpriteLookup};
use crate::sim::SimulationState;

enum Slot {
    Loading(HtmlImageElement),
    Ready(SpriteId),
    Missing,
}

/// Image path to GPU texture cache
#[derive(Default)]
pub struct SpriteCache {
    slots: HashMap<String, Slot>,
}

impl SpriteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start loading `path` unless it is already known
    pub fn request(&mut self, path: &str) {
        if self.slots.contains_key(path) {
            return;
        }
        let slot = match HtmlImageElement::new() {
            Ok(img) => {
                img.set_src(path);
                Slot::Loading(img)
            }
            Err(e) => {
                log::warn!("Cannot create image for {}: {:?}", path, e);
                Slot::Missing
            }
        };
        self.slots.insert(path.to_string(), slot);
    }

    /// Upload every image that finished loading since the last poll
    pub fn poll(&mut self, gpu: &mut RenderState) {
        for (path, slot) in self.slots.iter_mut() {
            let Slot::Loading(img) = slot else {
                continue;
            };
            if !img.complete() {
                continue;
            }
            *slot = match decode(img) {
                Some((width, height, rgba)) => {
                    log::info!("Loaded sprite {} ({}x{})", path, width, height);
                    Slot::Ready(gpu.upload_sprite(width, height, &rgba))
                }
                None => {
                    log::info!("Sprite {} unavailable, falling back", path);
                    Slot::Missing
                }
            };
        }
    }
}

impl SpriteLookup for SpriteCache {
    fn sprite(&self, path: &str) -> Option<SpriteId> {
        match self.slots.get(path) {
            Some(Slot::Ready(id)) => Some(*id),
            _ => None,
        }
    }
}

/// Read a loaded image's pixels through a scratch 2D canvas
fn decode(img: &HtmlImageElement) -> Option<(u32, u32, Vec<u8>)> {
    let (width, height) = (img.natural_width(), img.natural_height());
    if width == 0 || height == 0 {
        // Broken images report complete with no size
        return None;
    }

    let document = web_sys::window()?.document()?;
    let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
    ctx.draw_image_with_html_image_element(img, 0.0, 0.0).ok()?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .ok()?;
    Some((width, height, data.data().0))
}

/// WebGPU render target with lazily loaded skins
pub struct SpriteRenderer {
    pub gpu: RenderState,
    cache: SpriteCache,
    resolver: SkinResolver,
    requested_skin: Option<SkinId>,
}

impl SpriteRenderer {
    pub fn new(gpu: RenderState, sprites_enabled: bool) -> Self {
        let mut cache = SpriteCache::new();
        if sprites_enabled {
            cache.request(BASE_PIPE_UP);
            cache.request(BASE_PIPE_DOWN);
        }
        Self {
            gpu,
            cache,
            resolver: SkinResolver { sprites_enabled },
            requested_skin: None,
        }
    }

    /// Switch between sprite skins and solid shapes
    pub fn set_sprites_enabled(&mut self, enabled: bool) {
        self.resolver.sprites_enabled = enabled;
        // Forget the last request so the next frame asks for this skin's sprites
        self.requested_skin = None;
        if enabled {
            self.cache.request(BASE_PIPE_UP);
            self.cache.request(BASE_PIPE_DOWN);
        }
    }

    fn request_skin(&mut self, skin: Option<&SkinId>) {
        if !self.resolver.sprites_enabled || skin == self.requested_skin.as_ref() {
            return;
        }
        if let Some(skin) = skin {
            for path in skin.sprite_paths() {
                self.cache.request(&path);
            }
        }
        self.requested_skin = skin.cloned();
    }
}

impl RenderTarget for SpriteRenderer {
    fn render(&mut self, state: &SimulationState, skin: Option<&SkinId>) {
        self.request_skin(skin);
        self.cache.poll(&mut self.gpu);

        let look = self.resolver.resolve(skin, &self.cache);
        let scene = build_scene(state, &look);

        match self.gpu.render(&scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let (w, h) = self.gpu.size;
                self.gpu.resize(w, h);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

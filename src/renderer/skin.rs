//! Character skins
//!
//! A skin decides how the avatar and obstacles look. Three sources are tried
//! in a fixed order for each element:
//!
//! 1. [`CustomSkin`] - the character's own sprites
//! 2. [`BaseSkin`] - the shared obstacle sprites (there is no shared avatar)
//! 3. [`SolidSkin`] - flat shapes in the character's palette colour
//!
//! Sprites that are missing or still loading are skipped, so the solid source
//! always ends the chain.

use super::vertex::colors;

/// Selectable characters, in menu order
pub const CHARACTERS: [&str; 28] = [
    "Sam", "Sara", "PH", "Assie", "Barend", "Carlijn", "Daniel", "David", "Elke", "Frans", "Vief",
    "Jorik", "Siebe", "Jeroen", "Isa", "Laure", "Sebas", "Megan", "Leah", "Sil", "Janne", "Hannah",
    "Robin", "Lars", "Sanne", "Klara", "Martin", "Joel",
];

/// One colour per character (sRGB hex)
pub const PALETTE: [u32; 28] = [
    0xffb300, 0xe53935, 0x1e88e5, 0x43a047, 0x8e24aa, 0xf4511e, 0x00acc1, 0xc0ca33, 0x6d4c41,
    0xd81b60, 0x3949ab, 0x00897b, 0xfbc02d, 0x5e35b1, 0x039be5, 0x7cb342, 0xf06292, 0xffa726,
    0x8d6e63, 0x00bcd4, 0xc62828, 0x9ccc65, 0xff7043, 0xab47bc, 0x26a69a, 0xec407a, 0xbdbdbd,
    0x789262,
];

/// Obstacles use the colour this many palette slots after the character's
const OBSTACLE_PALETTE_OFFSET: usize = 7;

/// Colours for skins outside the roster
const DEFAULT_AVATAR: u32 = 0xffeb3b;
const DEFAULT_OBSTACLE: u32 = 0x388e3c;
const AVATAR_OUTLINE: u32 = 0x333333;

/// Shared obstacle sprites
pub const BASE_PIPE_UP: &str = "pipes/pipeUp.png";
pub const BASE_PIPE_DOWN: &str = "pipes/pipeDown.png";

/// Identifies a character skin
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SkinId(String);

impl SkinId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Position in [`CHARACTERS`], if this is a roster character
    pub fn roster_index(&self) -> Option<usize> {
        CHARACTERS.iter().position(|c| *c == self.0)
    }

    pub fn avatar_sprite_path(&self) -> String {
        format!("character_styles/{}/bird.png", self.0)
    }

    pub fn obstacle_sprite_path(&self) -> String {
        format!("character_styles/{}/pipe.png", self.0)
    }

    /// Every sprite this skin may draw, for preloading
    pub fn sprite_paths(&self) -> Vec<String> {
        vec![
            self.avatar_sprite_path(),
            self.obstacle_sprite_path(),
            BASE_PIPE_UP.to_string(),
            BASE_PIPE_DOWN.to_string(),
        ]
    }

    pub fn avatar_color(&self) -> [f32; 4] {
        match self.roster_index() {
            Some(i) => colors::hex(PALETTE[i % PALETTE.len()]),
            None => colors::hex(DEFAULT_AVATAR),
        }
    }

    pub fn obstacle_color(&self) -> [f32; 4] {
        match self.roster_index() {
            Some(i) => colors::hex(PALETTE[(i + OBSTACLE_PALETTE_OFFSET) % PALETTE.len()]),
            None => colors::hex(DEFAULT_OBSTACLE),
        }
    }
}

impl std::fmt::Display for SkinId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Handle to an uploaded sprite texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteId(pub u32);

/// Sprites that are loaded and ready to draw
pub trait SpriteLookup {
    /// The sprite for an asset path, `None` if missing or not loaded yet
    fn sprite(&self, path: &str) -> Option<SpriteId>;
}

/// How the avatar is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AvatarLook {
    Sprite(SpriteId),
    /// Filled circle with an outline
    Disc { fill: [f32; 4], outline: [f32; 4] },
}

/// How one obstacle segment is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentLook {
    Sprite(SpriteId),
    Solid([f32; 4]),
}

/// How obstacles are drawn. Sprite tops are mirrored vertically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstacleLook {
    pub top: SegmentLook,
    pub bottom: SegmentLook,
}

/// Which source produced a look
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinTier {
    Custom,
    Base,
    Solid,
}

/// One source of looks in the fallback chain
pub trait SkinSource: Sync {
    fn tier(&self) -> SkinTier;
    fn avatar(&self, skin: Option<&SkinId>, sprites: &dyn SpriteLookup) -> Option<AvatarLook>;
    fn obstacle(&self, skin: Option<&SkinId>, sprites: &dyn SpriteLookup) -> Option<ObstacleLook>;
}

/// The character's own sprites
pub struct CustomSkin;

impl SkinSource for CustomSkin {
    fn tier(&self) -> SkinTier {
        SkinTier::Custom
    }

    fn avatar(&self, skin: Option<&SkinId>, sprites: &dyn SpriteLookup) -> Option<AvatarLook> {
        let id = sprites.sprite(&skin?.avatar_sprite_path())?;
        Some(AvatarLook::Sprite(id))
    }

    fn obstacle(&self, skin: Option<&SkinId>, sprites: &dyn SpriteLookup) -> Option<ObstacleLook> {
        let id = sprites.sprite(&skin?.obstacle_sprite_path())?;
        Some(ObstacleLook {
            top: SegmentLook::Sprite(id),
            bottom: SegmentLook::Sprite(id),
        })
    }
}

/// Shared obstacle sprites; needs both halves loaded
pub struct BaseSkin;

impl SkinSource for BaseSkin {
    fn tier(&self) -> SkinTier {
        SkinTier::Base
    }

    fn avatar(&self, _skin: Option<&SkinId>, _sprites: &dyn SpriteLookup) -> Option<AvatarLook> {
        None
    }

    fn obstacle(&self, _skin: Option<&SkinId>, sprites: &dyn SpriteLookup) -> Option<ObstacleLook> {
        let top = sprites.sprite(BASE_PIPE_DOWN)?;
        let bottom = sprites.sprite(BASE_PIPE_UP)?;
        Some(ObstacleLook {
            top: SegmentLook::Sprite(top),
            bottom: SegmentLook::Sprite(bottom),
        })
    }
}

/// Flat colours, always available
pub struct SolidSkin;

impl SolidSkin {
    pub fn avatar_look(skin: Option<&SkinId>) -> AvatarLook {
        let fill = skin.map_or(colors::hex(DEFAULT_AVATAR), SkinId::avatar_color);
        AvatarLook::Disc {
            fill,
            outline: colors::hex(AVATAR_OUTLINE),
        }
    }

    pub fn obstacle_look(skin: Option<&SkinId>) -> ObstacleLook {
        let color = skin.map_or(colors::hex(DEFAULT_OBSTACLE), SkinId::obstacle_color);
        ObstacleLook {
            top: SegmentLook::Solid(color),
            bottom: SegmentLook::Solid(color),
        }
    }
}

impl SkinSource for SolidSkin {
    fn tier(&self) -> SkinTier {
        SkinTier::Solid
    }

    fn avatar(&self, skin: Option<&SkinId>, _sprites: &dyn SpriteLookup) -> Option<AvatarLook> {
        Some(Self::avatar_look(skin))
    }

    fn obstacle(&self, skin: Option<&SkinId>, _sprites: &dyn SpriteLookup) -> Option<ObstacleLook> {
        Some(Self::obstacle_look(skin))
    }
}

/// Looks for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedSkin {
    pub avatar: AvatarLook,
    pub avatar_tier: SkinTier,
    pub obstacle: ObstacleLook,
    pub obstacle_tier: SkinTier,
}

/// Walks the source chain in priority order
#[derive(Debug, Clone, Copy)]
pub struct SkinResolver {
    /// When false only the solid source is consulted
    pub sprites_enabled: bool,
}

impl Default for SkinResolver {
    fn default() -> Self {
        Self {
            sprites_enabled: true,
        }
    }
}

static FULL_CHAIN: [&dyn SkinSource; 3] = [&CustomSkin, &BaseSkin, &SolidSkin];
static SOLID_CHAIN: [&dyn SkinSource; 1] = [&SolidSkin];

impl SkinResolver {
    fn chain(&self) -> &'static [&'static dyn SkinSource] {
        if self.sprites_enabled {
            &FULL_CHAIN
        } else {
            &SOLID_CHAIN
        }
    }

    pub fn resolve(&self, skin: Option<&SkinId>, sprites: &dyn SpriteLookup) -> ResolvedSkin {
        let chain = self.chain();

        let (avatar, avatar_tier) = chain
            .iter()
            .find_map(|s| s.avatar(skin, sprites).map(|look| (look, s.tier())))
            .unwrap_or_else(|| (SolidSkin::avatar_look(skin), SkinTier::Solid));

        let (obstacle, obstacle_tier) = chain
            .iter()
            .find_map(|s| s.obstacle(skin, sprites).map(|look| (look, s.tier())))
            .unwrap_or_else(|| (SolidSkin::obstacle_look(skin), SkinTier::Solid));

        ResolvedSkin {
            avatar,
            avatar_tier,
            obstacle,
            obstacle_tier,
        }
    }
}

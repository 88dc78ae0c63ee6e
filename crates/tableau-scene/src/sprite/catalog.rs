use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::rc::Rc;

use glam::Vec2;
use serde::Deserialize;
use tableau_engine::coords::Rect;
use tableau_engine::paint::Color;

use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../../assets/sprite_types.json");

/// One step of an animation: which sheet cell to show, and for how long.
#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
pub struct AnimationFrame {
    pub index: u32,
    pub duration_ms: f32,
}

/// Shared descriptor for every sprite of one type: sheet layout, default size
/// and named animations.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteType {
    id: String,
    sheet: Option<String>,
    columns: u32,
    size: Vec2,
    tint: Color,
    animations: BTreeMap<String, Vec<AnimationFrame>>,
}

impl SpriteType {
    /// Builds a validated descriptor.
    ///
    /// Rejects zero columns, non-positive sizes, empty animations and frames
    /// without a positive duration.
    pub fn new(
        id: impl Into<String>,
        columns: u32,
        size: Vec2,
        animations: BTreeMap<String, Vec<AnimationFrame>>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();

        if columns == 0 {
            return Err(CatalogError::invalid(&id, "sheet needs at least one column"));
        }
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(CatalogError::invalid(&id, format!("bad sprite size {size}")));
        }
        if animations.is_empty() {
            return Err(CatalogError::invalid(&id, "no animations"));
        }
        for (state, frames) in &animations {
            if frames.is_empty() {
                return Err(CatalogError::invalid(&id, format!("animation {state} has no frames")));
            }
            if frames.iter().any(|f| !(f.duration_ms > 0.0 && f.duration_ms.is_finite())) {
                return Err(CatalogError::invalid(
                    &id,
                    format!("animation {state} has a frame without a positive duration"),
                ));
            }
        }

        Ok(Self {
            id,
            sheet: None,
            columns,
            size,
            tint: Color::WHITE,
            animations,
        })
    }

    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = Some(sheet.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sheet image this type was authored against. Loading it is up to the host.
    pub fn sheet(&self) -> Option<&str> {
        self.sheet.as_deref()
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Default sprite dimensions, also the size of one sheet cell.
    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn tint(&self) -> Color {
        self.tint
    }

    pub fn animation(&self, state: &str) -> Option<&[AnimationFrame]> {
        self.animations.get(state).map(Vec::as_slice)
    }

    pub fn states(&self) -> impl Iterator<Item = &str> {
        self.animations.keys().map(String::as_str)
    }

    /// `(column, row)` of a frame index in the sheet.
    pub fn cell(&self, index: u32) -> [u32; 2] {
        [index % self.columns, index / self.columns]
    }

    /// Pixel rectangle of a frame index in the sheet.
    pub fn frame_rect(&self, index: u32) -> Rect {
        let [col, row] = self.cell(index);
        Rect::new(
            col as f32 * self.size.x,
            row as f32 * self.size.y,
            self.size.x,
            self.size.y,
        )
    }
}

/// Sprite types keyed by string id.
#[derive(Debug, Clone, Default)]
pub struct SpriteCatalog {
    types: HashMap<String, Rc<SpriteType>>,
}

#[derive(Deserialize)]
struct CatalogFile {
    sprite_types: Vec<SpriteTypeDesc>,
}

#[derive(Deserialize)]
struct SpriteTypeDesc {
    id: String,
    #[serde(default)]
    sheet: Option<String>,
    columns: u32,
    sprite_width: f32,
    sprite_height: f32,
    #[serde(default)]
    tint: Option<[u8; 4]>,
    animations: BTreeMap<String, Vec<AnimationFrame>>,
}

impl SpriteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog shipped with the crate: `red_circle_man` and
    /// `multi_color_block`, each with `FORWARD` and `REVERSE` animations.
    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_CATALOG).expect("built-in sprite catalog is valid")
    }

    pub fn from_json_str(src: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(src)?;
        let mut catalog = Self::new();

        for desc in file.sprite_types {
            let mut ty = SpriteType::new(
                desc.id,
                desc.columns,
                Vec2::new(desc.sprite_width, desc.sprite_height),
                desc.animations,
            )?;
            if let Some([r, g, b, a]) = desc.tint {
                ty = ty.with_tint(Color::from_srgb_u8(r, g, b, a));
            }
            if let Some(sheet) = desc.sheet {
                ty = ty.with_sheet(sheet);
            }
            catalog.insert(ty)?;
        }

        log::debug!("sprite catalog loaded: {} types", catalog.len());
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&src)
    }

    /// Registers a type; ids must be unique.
    pub fn insert(&mut self, ty: SpriteType) -> Result<Rc<SpriteType>, CatalogError> {
        if self.types.contains_key(ty.id()) {
            return Err(CatalogError::Duplicate(ty.id().to_string()));
        }
        let ty = Rc::new(ty);
        self.types.insert(ty.id().to_string(), Rc::clone(&ty));
        Ok(ty)
    }

    pub fn get(&self, id: &str) -> Option<Rc<SpriteType>> {
        self.types.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{StempelError, StempelResult};

/// Families tried, in order, when resolving the arc-text face from installed fonts.
pub const DEFAULT_FONT_FAMILIES: &[&str] = &[
    "Arial",
    "Liberation Sans",
    "Helvetica",
    "DejaVu Sans",
    "Noto Sans",
];

/// Where the bold face used for arc text comes from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FontSource {
    /// A font file on disk.
    Path {
        /// TrueType/OpenType file.
        path: PathBuf,
        /// Face index inside a collection file.
        #[serde(default)]
        index: u32,
    },
    /// The boldest-matching face of the first installed family in `families`, falling back to the
    /// generic sans-serif family.
    System {
        /// Family names in preference order.
        families: Vec<String>,
    },
}

impl Default for FontSource {
    fn default() -> Self {
        Self::System {
            families: DEFAULT_FONT_FAMILIES
                .iter()
                .map(|s| (*s).to_owned())
                .collect(),
        }
    }
}

/// A resolved bold face: raw bytes plus the family name Parley registered for them.
///
/// Cheap to clone; Parley and the rasterizer share one copy of the bytes.
#[derive(Clone)]
pub struct BoldFont {
    blob: vello_cpu::peniko::Blob<u8>,
    index: u32,
    family_name: String,
    data: vello_cpu::peniko::FontData,
}

impl std::fmt::Debug for BoldFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoldFont")
            .field("family_name", &self.family_name)
            .field("index", &self.index)
            .field("len", &self.blob.len())
            .finish()
    }
}

impl BoldFont {
    /// Resolve and parse the face described by `source`.
    pub fn load(source: &FontSource) -> StempelResult<Self> {
        match source {
            FontSource::Path { path, index } => {
                let bytes = std::fs::read(path).map_err(|e| {
                    StempelError::font(format!("failed to read font '{}': {e}", path.display()))
                })?;
                Self::from_bytes(bytes, *index)
            }
            FontSource::System { families } => {
                let (bytes, index) = query_system_font(families)?;
                Self::from_bytes(bytes, index)
            }
        }
    }

    /// Parse a face from raw font bytes.
    pub fn from_bytes(bytes: Vec<u8>, index: u32) -> StempelResult<Self> {
        let blob = vello_cpu::peniko::Blob::from(bytes);
        let mut font_ctx = parley::FontContext::default();
        let family_name = register_family(&mut font_ctx, &blob)?;
        let data = vello_cpu::peniko::FontData::new(blob.clone(), index);
        Ok(Self {
            blob,
            index,
            family_name,
            data,
        })
    }

    /// Family name reported by the font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub(crate) fn font_data(&self) -> &vello_cpu::peniko::FontData {
        &self.data
    }
}

fn query_system_font(families: &[String]) -> StempelResult<(Vec<u8>, u32)> {
    use usvg::fontdb;

    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let query_families: Vec<fontdb::Family<'_>> = families
        .iter()
        .map(|name| fontdb::Family::Name(name.as_str()))
        .chain(std::iter::once(fontdb::Family::SansSerif))
        .collect();
    let query = fontdb::Query {
        families: &query_families,
        weight: fontdb::Weight::BOLD,
        stretch: fontdb::Stretch::Normal,
        style: fontdb::Style::Normal,
    };

    let id = db.query(&query).ok_or_else(|| {
        StempelError::font(format!(
            "no installed font matches {families:?} (searched {} faces)",
            db.len()
        ))
    })?;
    if let Some(face) = db.face(id) {
        tracing::debug!(
            family = face.families.first().map(|(name, _)| name.as_str()).unwrap_or(""),
            weight = face.weight.0,
            "resolved system font"
        );
    }

    db.with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| StempelError::font("installed font data is not readable"))
}

fn register_family(
    font_ctx: &mut parley::FontContext,
    blob: &vello_cpu::peniko::Blob<u8>,
) -> StempelResult<String> {
    let families = font_ctx.collection.register_fonts(blob.clone(), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| StempelError::font("no font families registered from font bytes"))?;

    Ok(font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| StempelError::font("registered font family has no name"))?
        .to_string())
}

/// Parley brush placeholder; arc text picks its color when glyphs are painted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct GlyphBrush;

/// Single-line shaper bound to one [`BoldFont`].
///
/// Holds Parley's font and layout contexts, so one shaper serves one render call at a time;
/// create a new one per request.
pub struct TextShaper {
    font: BoldFont,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<GlyphBrush>,
}

impl TextShaper {
    /// Build a shaper with fresh Parley contexts and `font` registered.
    pub fn new(font: &BoldFont) -> StempelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        register_family(&mut font_ctx, &font.blob)?;
        Ok(Self {
            font: font.clone(),
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
        })
    }

    /// Font this shaper lays text out with.
    pub fn font(&self) -> &BoldFont {
        &self.font
    }

    /// Advance width of `text` at `size_px`, trailing whitespace included.
    pub fn measure(&mut self, text: &str, size_px: f32) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        f64::from(self.layout_line(text, size_px).full_width())
    }

    /// Shape `text` as a single unbroken line.
    ///
    /// `size_px` must be finite and positive.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
    ) -> parley::Layout<GlyphBrush> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Single(parley::style::FontFamily::Named(
                std::borrow::Cow::Owned(self.font.family_name.clone()),
            )),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(GlyphBrush));

        let mut layout: parley::Layout<GlyphBrush> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;

//! Stempel renders round official seals with text curved along two arcs, and QR watermarks with
//! such a seal centered over the code.
//!
//! The public API is session-oriented:
//!
//! - Build a [`StampConfig`] (or load one from JSON)
//! - Create a [`Stamper`], which resolves the font and lazily caches the base seal
//! - Call [`Stamper::generate_stamp`] or [`Stamper::generate_watermark`]
//!
//! The layout and drawing steps underneath ([`compute_angles`], [`plan_arc_text`],
//! [`compose_stamp`], [`compose_watermark`], [`encode_qr`]) are exported for callers that need
//! finer control.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod compose;
mod config;
mod foundation;
mod geometry;
mod render;

pub use crate::foundation::core::{Affine, Point, RasterImage, Rect, Vec2};
pub use crate::foundation::error::{StempelError, StempelResult};

pub use crate::assets::color::Rgba8;
pub use crate::assets::font::{BoldFont, DEFAULT_FONT_FAMILIES, FontSource, TextShaper};
pub use crate::assets::seal::{DEFAULT_SEAL_WIDTH_PX, SealCache, load_base_seal};
pub use crate::compose::request::{
    DocumentStampRequest, StampRequest, WatermarkRequest, format_indonesian_date,
};
pub use crate::compose::session::Stamper;
pub use crate::compose::stamp::{compose_stamp, reverse_chars, stamp_arc_specs};
pub use crate::compose::watermark::compose_watermark;
pub use crate::config::StampConfig;
pub use crate::geometry::arc::{
    ARC_SLACK, AngleRange, ArcSpec, BOTTOM_ANCHOR_DEG, MAX_ARC_DEG, MAX_FONT_PX, TOP_ANCHOR_DEG,
    arc_progress, compute_angles, font_size_for_radius,
};
pub use crate::render::arc_text::{ArcTextPlan, GlyphPlacement, draw_arc_text, plan_arc_text};
pub use crate::render::qr::{ErrorCorrection, QrMatrix, encode_qr};
pub use crate::render::surface::Surface;

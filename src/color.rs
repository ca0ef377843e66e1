//! RGBA colors and named-color resolution
//!
//! Control point files may name a color instead of spelling out its four
//! channels. Resolution goes through a [`NamedColors`] capability handed to
//! the parser, usually a [`ColorDirectory`] rooted in the current level.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::blend::LinearSum;
use crate::consts::COLOR_DIRECTORY_NAME;
use crate::parse::TokenStream;

/// Four independent channels, conceptually in [0,1] but never clamped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with alpha multiplied by `alpha_scale`
    pub fn faded(self, alpha_scale: f32) -> Self {
        Self {
            a: self.a * alpha_scale,
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl LinearSum for Color {
    fn linear_sum(&self, other: &Self, weight: f64) -> Self {
        let w = weight as f32;
        Self {
            r: other.r + (self.r - other.r) * w,
            g: other.g + (self.g - other.g) * w,
            b: other.b + (self.b - other.b) * w,
            a: other.a + (self.a - other.a) * w,
        }
    }
}

/// Resolves color names found in control point streams
pub trait NamedColors {
    /// `None` when the name is unknown or its definition is malformed
    fn color(&self, name: &str) -> Option<Color>;
}

/// Resolver that knows no names
#[derive(Debug, Clone, Copy, Default)]
pub struct NoNamedColors;

impl NamedColors for NoNamedColors {
    fn color(&self, _name: &str) -> Option<Color> {
        None
    }
}

impl NamedColors for HashMap<String, Color> {
    fn color(&self, name: &str) -> Option<Color> {
        self.get(name).copied()
    }
}

/// One file per color name, each holding exactly four float tokens
#[derive(Debug, Clone)]
pub struct ColorDirectory {
    root: PathBuf,
}

impl ColorDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The `colors` directory of a level
    pub fn for_level(level_dir: &Path) -> Self {
        Self::new(level_dir.join(COLOR_DIRECTORY_NAME))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl NamedColors for ColorDirectory {
    fn color(&self, name: &str) -> Option<Color> {
        if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
            log::warn!("Rejecting color name {name:?}");
            return None;
        }

        let path = self.root.join(name);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::debug!("No color file {}: {}", path.display(), e);
                return None;
            }
        };

        parse_color_file(&contents)
    }
}

/// A color file must contain exactly four float tokens
fn parse_color_file(contents: &str) -> Option<Color> {
    if contents.split_whitespace().count() != 4 {
        return None;
    }
    let mut tokens = TokenStream::new(contents);
    Some(Color::new(
        tokens.read_f32()?,
        tokens.read_f32()?,
        tokens.read_f32()?,
        tokens.read_f32()?,
    ))
}

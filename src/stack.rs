//! Puzzle configuration, stack construction and the win condition.
//!
//! A [`Puzzle`] fixes the stack height and the color palette; a [`Stack`]
//! is the ordered sequence of layers being solved. Both are validated up
//! front so the solver never has to deal with malformed instances.

use std::str::FromStr;

use thiserror::Error;

use crate::cube::{Color, Face, Layer};

/// Errors surfaced while configuring a puzzle or building its stack.
///
/// These are all synchronous and recoverable: fix the input and retry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// With fewer (or more) palette colors than layers, no lateral side can
    /// show each color exactly once, so the instance is rejected up front.
    #[error("palette has {palette} colors but the stack is {height} layers tall")]
    PaletteMismatch { palette: usize, height: usize },
    #[error("color '{0}' appears more than once in the palette")]
    DuplicateColor(Color),
    #[error("expected {expected} layers, got {got}")]
    WrongLayerCount { expected: usize, got: usize },
    #[error("layer '{0}' must name exactly six face colors")]
    MalformedLayer(String),
    #[error("layer {layer} shows color '{color}' which is not in the palette")]
    UnknownColor { layer: usize, color: Color },
}

impl FromStr for Layer {
    type Err = ConfigError;

    /// Parses six face colors in Right, Left, Top, Bottom, Back, Front
    /// order, e.g. `"RWWBGR"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors: Vec<Color> = s.chars().map(Color).collect();
        let faces: [Color; 6] = colors
            .try_into()
            .map_err(|_| ConfigError::MalformedLayer(s.to_string()))?;
        Ok(Layer::new(faces))
    }
}

/// Puzzle configuration: stack height plus the color palette.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    height: usize,
    palette: Vec<Color>,
}

impl Puzzle {
    /// Creates a configuration, rejecting palettes whose size does not
    /// match the stack height and palettes with repeated colors.
    pub fn new(height: usize, palette: Vec<Color>) -> Result<Self, ConfigError> {
        if palette.len() != height {
            return Err(ConfigError::PaletteMismatch {
                palette: palette.len(),
                height,
            });
        }
        for (index, &color) in palette.iter().enumerate() {
            if palette[..index].contains(&color) {
                return Err(ConfigError::DuplicateColor(color));
            }
        }
        Ok(Self { height, palette })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// Builds the starting stack from per-layer face colors.
    ///
    /// Checks the layer count and that every color shown is drawn from the
    /// palette. Repeated colors within one layer are fine; real cubes have
    /// them.
    pub fn stack(&self, layers: Vec<Layer>) -> Result<Stack, ConfigError> {
        if layers.len() != self.height {
            return Err(ConfigError::WrongLayerCount {
                expected: self.height,
                got: layers.len(),
            });
        }
        for (index, layer) in layers.iter().enumerate() {
            for &color in layer.colors() {
                if !self.palette.contains(&color) {
                    return Err(ConfigError::UnknownColor {
                        layer: index,
                        color,
                    });
                }
            }
        }
        Ok(Stack { layers })
    }

    /// Whether every lateral side of the stack shows each palette color
    /// exactly once. Top and Bottom faces never count.
    pub fn is_solved(&self, stack: &Stack) -> bool {
        Face::LATERAL.iter().all(|&face| {
            self.palette.iter().all(|&color| {
                stack
                    .layers
                    .iter()
                    .filter(|layer| layer.color(face) == color)
                    .count()
                    == 1
            })
        })
    }
}

/// An ordered stack of cube layers.
///
/// The layer order is fixed for the lifetime of the stack; solving only
/// changes each layer's orientation. Equality is bit-for-bit over the
/// face mappings, which is what the solver's restore guarantee is stated
/// in terms of.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    layers: Vec<Layer>,
}

impl Stack {
    pub fn height(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub(crate) fn layer_mut(&mut self, index: usize) -> &mut Layer {
        &mut self.layers[index]
    }
}

/// Palette of the classic four-cube instance.
pub const CLASSIC_PALETTE: &str = "RGWB";

/// The classic four-cube instance, face order Right, Left, Top, Bottom,
/// Back, Front per layer.
pub const CLASSIC_LAYERS: [&str; 4] = ["RWWBGR", "GWBRBW", "BBRGWG", "RRGWRB"];

/// Builds the classic puzzle and its starting stack.
pub fn classic() -> (Puzzle, Stack) {
    let palette = CLASSIC_PALETTE.chars().map(Color).collect();
    let puzzle = Puzzle::new(CLASSIC_LAYERS.len(), palette).expect("classic palette matches height");
    let layers = CLASSIC_LAYERS
        .iter()
        .map(|spec| spec.parse().expect("classic layers are well formed"))
        .collect();
    let stack = puzzle.stack(layers).expect("classic stack is valid");
    (puzzle, stack)
}

/// Formats a stack as a face table, top layer first.
pub fn format_stack(stack: &Stack) -> String {
    let mut out = String::from("layer   R  L  T  B  Bk  F\n");
    for (index, layer) in stack.layers().iter().enumerate().rev() {
        let c = layer.colors();
        out.push_str(&format!(
            "{:>5}   {}  {}  {}  {}  {}   {}\n",
            index, c[0], c[1], c[2], c[3], c[4], c[5]
        ));
    }
    out
}

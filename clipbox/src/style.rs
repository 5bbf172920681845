//! Visual styles for the rendered plane and corner proxies

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Linear RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);

    /// Create a color from components
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Components as an array
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

/// Fill and outline of a plane proxy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaneStyle {
    pub fill: Color,
    pub outline: Color,
    pub outline_width: f32,
}

impl PlaneStyle {
    pub const fn new(fill: Color, outline: Color, outline_width: f32) -> Self {
        Self {
            fill,
            outline,
            outline_width,
        }
    }
}

/// Appearance of a corner point proxy
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PointStyle {
    pub color: Color,
    pub pixel_size: f32,
}

/// Every style the editors switch between
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EditorStyle {
    /// Resting plane
    pub plane: PlaneStyle,
    /// Plane of a hovered or grabbed box
    pub highlighted_plane: PlaneStyle,
    /// Hovered plane in plane mode
    pub hovered_plane: PlaneStyle,
    /// Grabbed plane in plane mode
    pub picked_plane: PlaneStyle,
    /// Resting corner
    pub point: PointStyle,
    /// Hovered or grabbed corner
    pub highlighted_point: PointStyle,
}

impl Default for EditorStyle {
    fn default() -> Self {
        let translucent_white = Color::WHITE.with_alpha(0.1);
        let translucent_cyan = Color::CYAN.with_alpha(0.1);
        Self {
            plane: PlaneStyle::new(translucent_white, Color::WHITE, 1.0),
            highlighted_plane: PlaneStyle::new(translucent_cyan, Color::CYAN, 1.0),
            hovered_plane: PlaneStyle::new(translucent_cyan, Color::CYAN, 5.0),
            picked_plane: PlaneStyle::new(translucent_white, Color::CYAN, 5.0),
            point: PointStyle {
                color: Color::WHITE,
                pixel_size: 10.0,
            },
            highlighted_point: PointStyle {
                color: Color::BLUE,
                pixel_size: 10.0,
            },
        }
    }
}

/// Highlight state of a single proxy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Highlight {
    #[default]
    None,
    /// Pointer is over the proxy (or over the box it belongs to)
    Hovered,
    /// Proxy is being dragged, or is adjacent to a dragged corner
    Picked,
}

impl EditorStyle {
    /// Style of a box face for a highlight state
    pub fn box_plane(&self, highlight: Highlight) -> PlaneStyle {
        match highlight {
            Highlight::None => self.plane,
            Highlight::Hovered | Highlight::Picked => self.highlighted_plane,
        }
    }

    /// Style of a free plane for a highlight state
    pub fn free_plane(&self, highlight: Highlight) -> PlaneStyle {
        match highlight {
            Highlight::None => self.plane,
            Highlight::Hovered => self.hovered_plane,
            Highlight::Picked => self.picked_plane,
        }
    }

    /// Style of a corner point for a highlight state
    pub fn corner(&self, highlight: Highlight) -> PointStyle {
        match highlight {
            Highlight::None => self.point,
            Highlight::Hovered | Highlight::Picked => self.highlighted_point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_styles() {
        let style = EditorStyle::default();
        assert_eq!(style.box_plane(Highlight::None).fill, Color::WHITE.with_alpha(0.1));
        assert_eq!(style.box_plane(Highlight::Hovered).outline, Color::CYAN);
        assert_eq!(style.free_plane(Highlight::Picked).outline_width, 5.0);
        assert_eq!(style.corner(Highlight::Picked).color, Color::BLUE);
        assert_eq!(style.corner(Highlight::None).pixel_size, 10.0);
    }

    #[test]
    fn test_color_conversions() {
        let color = Color::from([0.25, 0.5, 0.75, 1.0]);
        assert_eq!(color, Color::rgb(0.25, 0.5, 0.75));
        assert_eq!(color.with_alpha(0.0).to_array(), [0.25, 0.5, 0.75, 0.0]);
    }
}

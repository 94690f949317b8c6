//! Layout constants and colours for the scene, loadable from JSON.

use serde::Deserialize;

use crate::canvas::{Color, Pen, Style};
use crate::errors::ConfigError;

/// Pens and brushes used by the scene builder.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Link capsules.
    pub link: Style,
    /// Ordinary nodes.
    pub node: Style,
    /// Pinned and roller support glyphs.
    pub support: Style,
    /// Node labels; only the pen colour is used.
    pub label: Style,
    /// Grid background rectangle.
    pub grid_fill: Style,
    /// Grid lines.
    pub grid_lines: Style,
}

impl Default for Palette {
    fn default() -> Self {
        let grid_pen = Pen::new(Color::rgba(99, 192, 228, 50), 1.0);
        Self {
            link: Style::new(Pen::new(Color::rgb(255, 165, 0), 1.0), Color::rgba(255, 149, 0, 64)),
            node: Style::new(Pen::new(Color::rgb(0, 0, 128), 1.0), Color::rgba(255, 255, 0, 100)),
            support: Style::new(Pen::new(Color::BLACK, 1.0), Color::rgba(215, 215, 215, 128)),
            label: Style::stroke(Pen::new(Color::rgb(128, 0, 128), 1.0)),
            grid_fill: Style::new(grid_pen, Color::rgba(203, 245, 151, 128)),
            grid_lines: Style::stroke(grid_pen),
        }
    }
}

/// Sizes and spacings of the scene layout, in scene units.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Padding added around the node bounding box for the grid.
    pub grid_margin: f64,
    /// Distance between grid lines.
    pub grid_spacing: f64,
    /// Corner radius of link capsules.
    pub link_radius: f64,
    /// Diameter of ordinary node markers.
    pub node_size: f64,
    /// Distance from a node to the centre of its label.
    pub label_offset: f64,
    /// Half-width of the support base and diameter of its pivot.
    pub support_width: f64,
    /// Height of the support glyph.
    pub support_height: f64,
    /// How far below the glyph top the roller's pivot sits.
    pub roller_lift: f64,
    /// Gap between the roller base and its foundation.
    pub foundation_gap: f64,
    /// Horizontal pitch of foundation hatching.
    pub hatch_pitch: f64,
    /// Half-extent of the hatching as a multiple of `support_width`.
    pub hatch_span: f64,
    /// Pens and brushes.
    pub palette: Palette,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grid_margin: 50.0,
            grid_spacing: 10.0,
            link_radius: 3.0,
            node_size: 4.0,
            label_offset: 15.0,
            support_width: 10.0,
            support_height: 18.0,
            roller_lift: 12.0,
            foundation_gap: 4.0,
            hatch_pitch: 6.0,
            hatch_span: 1.2,
            palette: Palette::default(),
        }
    }
}

impl SceneConfig {
    /// Decode a configuration from JSON; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed documents and the validation
    /// errors of [`SceneConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use trussview::SceneConfig;
    ///
    /// let config = SceneConfig::from_json(r#"{ "grid_spacing": 25.0 }"#).expect("valid");
    /// assert_eq!(config.grid_spacing, 25.0);
    /// assert_eq!(config.grid_margin, 50.0);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every loop in the layout advances and no size is negative.
    ///
    /// # Errors
    ///
    /// Returns the first offending setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.grid_spacing > 0.0) {
            return Err(ConfigError::NonPositiveGridSpacing(self.grid_spacing));
        }
        if !(self.hatch_pitch > 0.0) {
            return Err(ConfigError::NonPositiveHatchPitch(self.hatch_pitch));
        }
        let sizes = [
            ("grid_margin", self.grid_margin),
            ("link_radius", self.link_radius),
            ("node_size", self.node_size),
            ("support_width", self.support_width),
            ("support_height", self.support_height),
            ("foundation_gap", self.foundation_gap),
            ("hatch_span", self.hatch_span),
        ];
        for (name, value) in sizes {
            if value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        SceneConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn zero_spacing_is_rejected() {
        let error = SceneConfig::from_json(r#"{ "grid_spacing": 0 }"#).expect_err("zero spacing");
        assert!(matches!(error, ConfigError::NonPositiveGridSpacing(_)));
    }

    #[test]
    fn negative_sizes_are_rejected() {
        let error = SceneConfig::from_json(r#"{ "node_size": -1 }"#).expect_err("negative size");
        assert!(matches!(error, ConfigError::Negative { name: "node_size", .. }));
    }

    #[test]
    fn palette_overrides_merge_with_defaults() {
        let config = SceneConfig::from_json(
            r#"{
                "palette": {
                    "link": { "pen": null, "brush": { "r": 1, "g": 2, "b": 3, "a": 4 } }
                }
            }"#,
        )
        .expect("palette override");
        assert_eq!(config.palette.link.pen, None);
        assert_eq!(config.palette.link.brush, Some(Color::rgba(1, 2, 3, 4)));
        assert_eq!(config.palette.node, Palette::default().node);
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            SceneConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }
}

#![warn(clippy::all)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod analysis;
pub mod canvas;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod geometry;
mod log;
pub mod model;
pub mod parser;
pub mod report;
pub mod scene;
pub mod sinks;

pub use analysis::{calc_link_values, calc_support_reactions, derive};
pub use canvas::{
    Canvas, Color, ItemId, PathCommand, Pen, Point, RecordingCanvas, SceneItem, SceneRect, Shape,
    Style, TextSize,
};
pub use config::{Palette, SceneConfig};
pub use controller::TrussController;
pub use errors::{ConfigError, ImportError};
pub use events::{handle_pointer_event, EventOutcome, PointerEventKind};
pub use geometry::{position, Position, Rectangle};
pub use model::{Link, LinkMaterial, Material, Node, SupportKind, TrussModel};
pub use parser::parse_lines;
pub use report::{render_report, LongestLinkFields};
pub use scene::{SceneBuilder, SceneHandles, SceneTransform};
pub use sinks::{DisplaySinks, LongestLinkSinks, ScalarSink, SharedOutputs, TextSink};

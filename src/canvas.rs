//! Abstract drawing surface the scene builder renders into.
//!
//! Scene coordinates grow to the right and downwards. A [`Canvas`] only needs to
//! store what it is given; hit-testing and hover delivery belong to the host.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Opacity, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Colour with explicit opacity.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
}

/// Outline settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    /// Stroke colour.
    pub color: Color,
    /// Stroke width in scene units.
    pub width: f64,
}

impl Pen {
    /// Pen of the given colour and width.
    #[must_use]
    pub const fn new(color: Color, width: f64) -> Self {
        Self { color, width }
    }
}

/// Outline and fill of an item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Outline, `None` for no outline.
    pub pen: Option<Pen>,
    /// Fill colour, `None` for no fill.
    pub brush: Option<Color>,
}

impl Style {
    /// Outline and fill.
    #[must_use]
    pub const fn new(pen: Pen, brush: Color) -> Self {
        Self {
            pen: Some(pen),
            brush: Some(brush),
        }
    }

    /// Outline only.
    #[must_use]
    pub const fn stroke(pen: Pen) -> Self {
        Self {
            pen: Some(pen),
            brush: None,
        }
    }
}

/// Point in scene coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Point at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Rectangle in scene coordinates given by its top-left corner and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct SceneRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Horizontal size.
    pub width: f64,
    /// Vertical size.
    pub height: f64,
}

impl SceneRect {
    /// Rectangle from corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest rectangle containing every point, `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| {
            (
                Point::new(min.x.min(p.x), min.y.min(p.y)),
                Point::new(max.x.max(p.x), max.y.max(p.y)),
            )
        });
        Some(Self::new(min.x, min.y, max.x - min.x, max.y - min.y))
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle containing both.
    #[must_use]
    pub fn union(&self, other: &SceneRect) -> SceneRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        SceneRect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

/// One step of a painter path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum PathCommand {
    /// Start a new sub-path.
    MoveTo(Point),
    /// Straight segment from the current point.
    LineTo(Point),
    /// Close the current sub-path.
    Close,
    /// Ellipse inscribed in a rectangle, as its own sub-path.
    Ellipse(SceneRect),
}

impl PathCommand {
    /// Points that bound this command.
    fn extent(&self) -> Vec<Point> {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => vec![p],
            PathCommand::Close => Vec::new(),
            PathCommand::Ellipse(r) => {
                vec![Point::new(r.x, r.y), Point::new(r.right(), r.bottom())]
            }
        }
    }
}

/// Bounding box of a path, `None` when it has no points.
#[must_use]
pub fn path_bounds(path: &[PathCommand]) -> Option<SceneRect> {
    SceneRect::from_points(path.iter().flat_map(PathCommand::extent))
}

/// Measured extent of a text item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TextSize {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

/// Handle to an item on a canvas.
///
/// Identifiers are never reused by a canvas, even across [`Canvas::clear`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(pub u64);

/// Drawing surface capability set used by the scene builder.
pub trait Canvas {
    /// Remove every item.
    fn clear(&mut self);
    /// Add an axis aligned rectangle.
    fn add_rect(&mut self, rect: SceneRect, style: &Style, tooltip: Option<&str>) -> ItemId;
    /// Add a straight line.
    fn add_line(&mut self, from: Point, to: Point, style: &Style, tooltip: Option<&str>) -> ItemId;
    /// Add an ellipse inscribed in `rect`.
    fn add_ellipse(&mut self, rect: SceneRect, style: &Style, tooltip: Option<&str>) -> ItemId;
    /// Add a painter path.
    fn add_path(&mut self, path: &[PathCommand], style: &Style, tooltip: Option<&str>) -> ItemId;
    /// Add text with its top-left corner at `at`; the pen colour is the text colour.
    fn add_text(&mut self, at: Point, text: &str, style: &Style, tooltip: Option<&str>) -> ItemId;
    /// Size `text` would occupy.
    fn measure_text(&self, text: &str) -> TextSize;
    /// Zoom to fit `bounds` and centre on it.
    fn fit_and_center(&mut self, bounds: SceneRect);
}

impl<C: Canvas + ?Sized> Canvas for Rc<RefCell<C>> {
    fn clear(&mut self) {
        self.borrow_mut().clear();
    }
    fn add_rect(&mut self, rect: SceneRect, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.borrow_mut().add_rect(rect, style, tooltip)
    }
    fn add_line(&mut self, from: Point, to: Point, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.borrow_mut().add_line(from, to, style, tooltip)
    }
    fn add_ellipse(&mut self, rect: SceneRect, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.borrow_mut().add_ellipse(rect, style, tooltip)
    }
    fn add_path(&mut self, path: &[PathCommand], style: &Style, tooltip: Option<&str>) -> ItemId {
        self.borrow_mut().add_path(path, style, tooltip)
    }
    fn add_text(&mut self, at: Point, text: &str, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.borrow_mut().add_text(at, text, style, tooltip)
    }
    fn measure_text(&self, text: &str) -> TextSize {
        self.borrow().measure_text(text)
    }
    fn fit_and_center(&mut self, bounds: SceneRect) {
        self.borrow_mut().fit_and_center(bounds);
    }
}

/// Geometry of a recorded item.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Rectangle item.
    Rect {
        /// Placement.
        rect: SceneRect,
    },
    /// Line item.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
    },
    /// Ellipse item.
    Ellipse {
        /// Bounding rectangle.
        rect: SceneRect,
    },
    /// Path item.
    Path {
        /// Path commands.
        commands: Vec<PathCommand>,
    },
    /// Text item.
    Text {
        /// Top-left corner.
        at: Point,
        /// Content.
        text: String,
    },
}

/// Item stored by a [`RecordingCanvas`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SceneItem {
    /// Handle returned when the item was added.
    pub id: ItemId,
    /// Geometry.
    pub shape: Shape,
    /// Outline and fill.
    pub style: Style,
    /// Hover text.
    pub tooltip: Option<String>,
}

/// In-memory [`Canvas`] that keeps every item it is given.
///
/// Text is measured with a fixed advance per character, which keeps layouts
/// deterministic without a font engine.
#[derive(Clone, Debug, Serialize)]
pub struct RecordingCanvas {
    /// Items in insertion order.
    pub items: Vec<SceneItem>,
    /// Last rectangle passed to [`Canvas::fit_and_center`].
    pub fitted: Option<SceneRect>,
    /// Advance of one character.
    pub char_width: f64,
    /// Height of one line of text.
    pub line_height: f64,
    #[serde(skip)]
    next_id: u64,
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingCanvas {
    /// Empty canvas with a 7×16 text metric.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            fitted: None,
            char_width: 7.0,
            line_height: 16.0,
            next_id: 0,
        }
    }

    /// Item with the given handle, if it is still on the canvas.
    #[must_use]
    pub fn item(&self, id: ItemId) -> Option<&SceneItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Every tooltip in insertion order.
    pub fn tooltips(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| item.tooltip.as_deref())
    }

    fn push(&mut self, shape: Shape, style: &Style, tooltip: Option<&str>) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.items.push(SceneItem {
            id,
            shape,
            style: *style,
            tooltip: tooltip.map(str::to_string),
        });
        id
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.items.clear();
        self.fitted = None;
    }

    fn add_rect(&mut self, rect: SceneRect, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.push(Shape::Rect { rect }, style, tooltip)
    }

    fn add_line(&mut self, from: Point, to: Point, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.push(Shape::Line { from, to }, style, tooltip)
    }

    fn add_ellipse(&mut self, rect: SceneRect, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.push(Shape::Ellipse { rect }, style, tooltip)
    }

    fn add_path(&mut self, path: &[PathCommand], style: &Style, tooltip: Option<&str>) -> ItemId {
        self.push(
            Shape::Path {
                commands: path.to_vec(),
            },
            style,
            tooltip,
        )
    }

    fn add_text(&mut self, at: Point, text: &str, style: &Style, tooltip: Option<&str>) -> ItemId {
        self.push(
            Shape::Text {
                at,
                text: text.to_string(),
            },
            style,
            tooltip,
        )
    }

    fn measure_text(&self, text: &str) -> TextSize {
        TextSize {
            width: self.char_width * text.chars().count() as f64,
            height: self.line_height,
        }
    }

    fn fit_and_center(&mut self, bounds: SceneRect) {
        self.fitted = Some(bounds);
    }
}

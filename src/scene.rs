//! Maps a derived [`TrussModel`] onto a [`Canvas`].
//!
//! Every build clears the canvas and draws, in order: the background grid, one
//! capsule per resolved link, one glyph per node and one label per node. Model
//! coordinates are recentred on the node bounding box and the y axis is flipped
//! so that "up" in the input is "up" on screen.

use std::f64::consts::PI;

use nalgebra::Vector2;

use crate::canvas::{path_bounds, Canvas, ItemId, PathCommand, Point, SceneRect, Style};
use crate::config::SceneConfig;
use crate::errors::ConfigError;
use crate::geometry::{Position, Rectangle};
use crate::log::debug;
use crate::model::{fmt_opt, Link, Node, SupportKind, TrussModel};

/// Segments used for each rounded end of a link capsule.
const CAPSULE_ARC_SEGMENTS: usize = 8;

/// Upper bound on grid lines per axis and on hatch strokes per glyph.
const MAX_REPEATED_STROKES: usize = 2_000;

/// Model → scene coordinate mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneTransform {
    /// Model x that lands on the scene origin.
    pub center_x: f64,
    /// Model y that lands on the scene origin.
    pub center_y: f64,
}

impl SceneTransform {
    /// Transform centring `rect` on the origin.
    #[must_use]
    pub fn centered_on(rect: &Rectangle) -> Self {
        Self {
            center_x: rect.center_x(),
            center_y: rect.center_y(),
        }
    }

    /// Scene point for a model position.
    ///
    /// # Examples
    /// ```
    /// use trussview::{position, Rectangle, SceneTransform};
    ///
    /// let t = SceneTransform::centered_on(&Rectangle::new(10.0, 0.0, 0.0, 20.0));
    /// let p = t.apply(position(20.0, 10.0));
    /// assert_eq!((p.x, p.y), (10.0, -5.0));
    /// ```
    #[must_use]
    pub fn apply(&self, position: Position) -> Point {
        Point::new(position.x - self.center_x, -(position.y - self.center_y))
    }
}

/// Canvas items drawn for one link.
#[derive(Clone, Debug, PartialEq)]
pub struct LinkGraphic {
    /// Link name.
    pub name: String,
    /// Capsule path.
    pub item: ItemId,
}

/// Canvas items drawn for one node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGraphic {
    /// Node name.
    pub name: String,
    /// Marker or support glyph.
    pub glyph: ItemId,
    /// Text label below the glyph.
    pub label: ItemId,
}

/// Handles from a single build. A rebuild replaces the whole set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneHandles {
    /// Build counter, starting at 1 for the first build.
    pub generation: u64,
    /// Background rectangle and grid lines.
    pub grid: Vec<ItemId>,
    /// One entry per drawn link, in model order.
    pub links: Vec<LinkGraphic>,
    /// One entry per node, in model order.
    pub nodes: Vec<NodeGraphic>,
    /// Rectangle passed to [`Canvas::fit_and_center`].
    pub bounds: Option<SceneRect>,
}

/// Forwards items to the canvas while tracking their combined extent.
struct Emitter<'c> {
    canvas: &'c mut dyn Canvas,
    bounds: Option<SceneRect>,
}

impl<'c> Emitter<'c> {
    fn include(&mut self, rect: Option<SceneRect>) {
        if let Some(rect) = rect {
            self.bounds = Some(match self.bounds {
                Some(bounds) => bounds.union(&rect),
                None => rect,
            });
        }
    }

    fn rect(&mut self, rect: SceneRect, style: &Style) -> ItemId {
        self.include(Some(rect));
        self.canvas.add_rect(rect, style, None)
    }

    fn line(&mut self, from: Point, to: Point, style: &Style) -> ItemId {
        self.include(SceneRect::from_points([from, to]));
        self.canvas.add_line(from, to, style, None)
    }

    fn ellipse(&mut self, rect: SceneRect, style: &Style, tooltip: &str) -> ItemId {
        self.include(Some(rect));
        self.canvas.add_ellipse(rect, style, Some(tooltip))
    }

    fn path(&mut self, path: &[PathCommand], style: &Style, tooltip: &str) -> ItemId {
        self.include(path_bounds(path));
        self.canvas.add_path(path, style, Some(tooltip))
    }

    /// Text centred on `center` using the canvas' own metrics.
    fn centered_text(&mut self, center: Point, text: &str, style: &Style) -> ItemId {
        let size = self.canvas.measure_text(text);
        let at = Point::new(center.x - size.width / 2.0, center.y - size.height / 2.0);
        self.include(Some(SceneRect::new(at.x, at.y, size.width, size.height)));
        self.canvas.add_text(at, text, style, None)
    }
}

/// Rebuilds the scene for a model and keeps the handles of the latest build.
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    config: SceneConfig,
    handles: SceneHandles,
}

impl SceneBuilder {
    /// Builder with the given layout settings.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] of [`SceneConfig::validate`].
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            handles: SceneHandles::default(),
        })
    }

    /// Layout settings in use.
    #[must_use]
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Handles from the most recent build.
    #[must_use]
    pub fn handles(&self) -> &SceneHandles {
        &self.handles
    }

    /// Clear `canvas` and draw the whole model onto it.
    ///
    /// Refreshes the model's cached bounding rectangle on the way.
    pub fn build(&mut self, model: &mut TrussModel, canvas: &mut dyn Canvas) -> &SceneHandles {
        canvas.clear();
        let rect = model.update_bounding_rect();
        let transform = SceneTransform::centered_on(&rect);
        let mut out = Emitter {
            canvas,
            bounds: None,
        };

        let mut handles = SceneHandles {
            generation: self.handles.generation + 1,
            ..SceneHandles::default()
        };
        handles.grid = self.draw_grid(&mut out, rect.padded(self.config.grid_margin));
        handles.links = self.draw_links(&mut out, model, transform);
        handles.nodes = self.draw_nodes(&mut out, model, transform);

        if let Some(bounds) = out.bounds {
            out.canvas.fit_and_center(bounds);
        }
        handles.bounds = out.bounds;
        self.handles = handles;
        &self.handles
    }

    fn draw_grid(&self, out: &mut Emitter<'_>, padded: Rectangle) -> Vec<ItemId> {
        let palette = &self.config.palette;
        let spacing = self.config.grid_spacing;
        let width = padded.width().abs();
        let height = padded.height().abs();
        let (left, right) = (-width / 2.0, width / 2.0);
        let (top, bottom) = (-height / 2.0, height / 2.0);

        let background = SceneRect::new(left, top, width, height);
        let mut items = vec![out.rect(background, &palette.grid_fill)];
        if !(spacing > 0.0) {
            return items;
        }
        let columns = (0_u32..)
            .map(|i| left + f64::from(i) * spacing)
            .take_while(|&x| x <= right)
            .take(MAX_REPEATED_STROKES);
        for x in columns {
            let (from, to) = (Point::new(x, top), Point::new(x, bottom));
            items.push(out.line(from, to, &palette.grid_lines));
        }
        let rows = (0_u32..)
            .map(|i| bottom - f64::from(i) * spacing)
            .take_while(|&y| y >= top)
            .take(MAX_REPEATED_STROKES);
        for y in rows {
            let (from, to) = (Point::new(left, y), Point::new(right, y));
            items.push(out.line(from, to, &palette.grid_lines));
        }
        items
    }

    fn draw_links(
        &self,
        out: &mut Emitter<'_>,
        model: &TrussModel,
        transform: SceneTransform,
    ) -> Vec<LinkGraphic> {
        let mut graphics = Vec::with_capacity(model.links.len());
        for link in &model.links {
            let Some((start, end)) = model.endpoints(link) else {
                debug!(link = %link.name, "link not drawn, endpoint unresolved");
                continue;
            };
            let path = capsule_path(
                transform.apply(start.position),
                transform.apply(end.position),
                self.config.link_radius,
            );
            let tooltip = link_tooltip(link, start, end);
            graphics.push(LinkGraphic {
                name: link.name.clone(),
                item: out.path(&path, &self.config.palette.link, &tooltip),
            });
        }
        graphics
    }

    fn draw_nodes(
        &self,
        out: &mut Emitter<'_>,
        model: &TrussModel,
        transform: SceneTransform,
    ) -> Vec<NodeGraphic> {
        let palette = &self.config.palette;
        model
            .nodes
            .iter()
            .map(|node| {
                let at = transform.apply(node.position);
                let tooltip = node_tooltip(node, model);
                let glyph = match node.support() {
                    Some(kind) => {
                        debug!(
                            node = %node.name,
                            reaction = model.reaction(kind),
                            "drawing support"
                        );
                        let path = match kind {
                            SupportKind::Pinned => self.pinned_support(at),
                            SupportKind::Roller => self.roller_support(at),
                        };
                        out.path(&path, &palette.support, &tooltip)
                    }
                    None => {
                        let size = self.config.node_size;
                        let rect = SceneRect::new(at.x - size / 2.0, at.y - size / 2.0, size, size);
                        out.ellipse(rect, &palette.node, &tooltip)
                    }
                };
                let label_center = Point::new(at.x, at.y + self.config.label_offset);
                NodeGraphic {
                    name: node.name.clone(),
                    glyph,
                    label: out.centered_text(label_center, &node.name, &palette.label),
                }
            })
            .collect()
    }

    /// Pivot circle on the node, triangle down to the base and hatched ground.
    fn pinned_support(&self, at: Point) -> Vec<PathCommand> {
        let w = self.config.support_width;
        let h = self.config.support_height;
        let r = w / 2.0;
        let mut path = vec![PathCommand::Ellipse(SceneRect::new(at.x - r, at.y - r, w, w))];
        push_triangle(&mut path, at, Point::new(at.x, at.y + h), w);
        self.push_hatching(&mut path, at.x, at.y + h, at.y + h + h / 4.0);
        path
    }

    /// Pivot circle above a triangular base that stands clear of a hatched foundation.
    fn roller_support(&self, at: Point) -> Vec<PathCommand> {
        let w = self.config.support_width;
        let h = self.config.support_height;
        let r = w / 2.0;
        let top = at.y - h + self.config.roller_lift;
        let mut path = vec![PathCommand::Ellipse(SceneRect::new(at.x - r, top, w, w))];
        push_triangle(&mut path, Point::new(at.x, top + h / 2.0), Point::new(at.x, top + h), w);
        let foundation_top = top + h + self.config.foundation_gap;
        self.push_hatching(&mut path, at.x, foundation_top, foundation_top + h / 4.0);
        path
    }

    /// Slanted strokes from `(x, bottom)` to `(x + pitch, top)` across the glyph.
    fn push_hatching(&self, path: &mut Vec<PathCommand>, center_x: f64, top: f64, bottom: f64) {
        let pitch = self.config.hatch_pitch;
        let half = self.config.support_width * self.config.hatch_span;
        let (start, end) = (center_x - half, center_x + half);
        if !(pitch > 0.0) {
            return;
        }
        let strokes = (0_u32..)
            .map(|i| start + f64::from(i) * pitch)
            .take_while(|&x| x + pitch < end)
            .take(MAX_REPEATED_STROKES);
        for x in strokes {
            path.push(PathCommand::MoveTo(Point::new(x, bottom)));
            path.push(PathCommand::LineTo(Point::new(x + pitch, top)));
        }
    }
}

/// Closed triangle with its apex at `apex` and a base of half-width `half` through `base`.
fn push_triangle(path: &mut Vec<PathCommand>, apex: Point, base: Point, half: f64) {
    path.push(PathCommand::MoveTo(Point::new(base.x - half, base.y)));
    path.push(PathCommand::LineTo(apex));
    path.push(PathCommand::LineTo(Point::new(base.x + half, base.y)));
    path.push(PathCommand::Close);
}

/// Outline of a thick line from `a` to `b` with semicircular ends of `radius`.
///
/// Coincident endpoints produce a circle.
#[must_use]
pub fn capsule_path(a: Point, b: Point, radius: f64) -> Vec<PathCommand> {
    let start = Vector2::new(a.x, a.y);
    let end = Vector2::new(b.x, b.y);
    let delta = end - start;
    let length = delta.norm();
    if length <= f64::EPSILON {
        let r = radius;
        return vec![PathCommand::Ellipse(SceneRect::new(a.x - r, a.y - r, 2.0 * r, 2.0 * r))];
    }
    let along = delta / length;
    let normal = Vector2::new(-along.y, along.x);
    let heading = normal.y.atan2(normal.x);

    let mut path = vec![PathCommand::MoveTo(scene_point(start + radius * normal))];
    path.push(PathCommand::LineTo(scene_point(end + radius * normal)));
    path.extend(half_circle(end, radius, heading));
    path.push(PathCommand::LineTo(scene_point(start - radius * normal)));
    path.extend(half_circle(start, radius, heading + PI));
    path.push(PathCommand::Close);
    path
}

/// Clockwise (on screen) half circle starting at `from_angle`, excluding its first point.
fn half_circle(
    center: Vector2<f64>,
    radius: f64,
    from_angle: f64,
) -> impl Iterator<Item = PathCommand> {
    (1..=CAPSULE_ARC_SEGMENTS).map(move |i| {
        let t = from_angle - PI * i as f64 / CAPSULE_ARC_SEGMENTS as f64;
        PathCommand::LineTo(scene_point(center + radius * Vector2::new(t.cos(), t.sin())))
    })
}

fn scene_point(v: Vector2<f64>) -> Point {
    Point::new(v.x, v.y)
}

/// Hover text for a link; coordinates are the untransformed model values.
#[must_use]
pub fn link_tooltip(link: &Link, start: &Node, end: &Node) -> String {
    let displayed_weight = if link.has_single_support_end() {
        link.weight.map(|w| w / 2.0)
    } else {
        link.weight
    };
    format!(
        "Link: {}\n\
         Start: ({:.3}, {:.3}) [{}]\n\
         End: ({:.3}, {:.3}) [{}]\n\
         Length: {} m\n\
         Angle: {}°\n\
         Width: {} m\n\
         Thickness: {} m\n\
         Material: {}\n\
         Displayed Weight: {} N",
        link.name,
        start.position.x,
        start.position.y,
        link.node1,
        end.position.x,
        end.position.y,
        link.node2,
        fmt_opt(link.length, 3),
        fmt_opt(link.angle_rad.map(f64::to_degrees), 2),
        fmt_opt(link.width, 3),
        fmt_opt(link.thickness, 3),
        link.material_label(),
        fmt_opt(displayed_weight, 2),
    )
}

/// Hover text for a node; supports also show their vertical reaction.
#[must_use]
pub fn node_tooltip(node: &Node, model: &TrussModel) -> String {
    match node.support() {
        Some(kind) => format!(
            "Node: {}\nVertical Reaction: {:.2} N",
            node.name,
            model.reaction(kind)
        ),
        None => format!("Node: {}", node.name),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::analysis::derive;
    use crate::canvas::{RecordingCanvas, Shape};
    use crate::parser::parse_lines;

    fn derived(lines: &[&str]) -> TrussModel {
        let mut model = parse_lines(lines.iter().copied()).expect("valid description");
        derive(&mut model);
        model
    }

    fn bridge() -> TrussModel {
        derived(&[
            "node, left, 0, 0",
            "node, right, 40, 0",
            "node, top, 20, 10",
            "link, L1, left, right, 0.1, 0.1, steel",
            "link, L2, left, top, 0.1, 0.1, steel",
            "link, L3, top, right",
            "link, L4, top, ghost",
        ])
    }

    fn build(model: &mut TrussModel) -> (SceneBuilder, RecordingCanvas) {
        let mut builder = SceneBuilder::default();
        let mut canvas = RecordingCanvas::new();
        builder.build(model, &mut canvas);
        (builder, canvas)
    }

    #[test]
    fn transform_recenters_and_flips() {
        let mut model = bridge();
        let (builder, canvas) = build(&mut model);
        assert_eq!(model.rect, Rectangle::new(10.0, 0.0, 0.0, 40.0));

        let left = &builder.handles().nodes[0];
        let Some(Shape::Path { commands }) = canvas.item(left.glyph).map(|i| &i.shape) else {
            panic!("left support is a path");
        };
        // The triangle apex of the pinned glyph sits on the node.
        assert_eq!(commands[2], PathCommand::LineTo(Point::new(-20.0, 5.0)));

        let top = &builder.handles().nodes[2];
        let Some(Shape::Ellipse { rect }) = canvas.item(top.glyph).map(|i| &i.shape) else {
            panic!("ordinary node is an ellipse");
        };
        assert_eq!(rect.center(), Point::new(0.0, -5.0));
        assert_eq!(rect.width, 4.0);
    }

    #[test]
    fn grid_covers_padded_box() {
        let mut model = bridge();
        let (builder, canvas) = build(&mut model);
        let handles = builder.handles();
        let Some(Shape::Rect { rect }) = canvas.item(handles.grid[0]).map(|i| &i.shape) else {
            panic!("grid starts with the background");
        };
        assert_eq!(*rect, SceneRect::new(-70.0, -55.0, 140.0, 110.0));
        // 140 wide → 15 vertical lines, 110 high → 12 horizontal lines.
        assert_eq!(handles.grid.len(), 1 + 15 + 12);
        let Some(Shape::Line { from, to }) = canvas.item(handles.grid[16]).map(|i| &i.shape) else {
            panic!("first horizontal line");
        };
        assert_eq!((from.y, to.y), (55.0, 55.0));
    }

    #[test]
    fn empty_model_still_draws_a_grid() {
        let mut model = TrussModel::new();
        let (builder, canvas) = build(&mut model);
        assert_eq!(builder.handles().grid.len(), 1 + 11 + 11);
        assert!(builder.handles().nodes.is_empty());
        assert_eq!(canvas.fitted, Some(SceneRect::new(-50.0, -50.0, 100.0, 100.0)));
    }

    #[test]
    fn unresolved_links_are_not_drawn() {
        let mut model = bridge();
        let (builder, _) = build(&mut model);
        let names: Vec<_> = builder.handles().links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["L1", "L2", "L3"]);
    }

    #[test]
    fn link_tooltip_halves_weight_for_single_support() {
        let model = bridge();
        let left = model.node("left").expect("left");
        let right = model.node("right").expect("right");
        let top = model.node("top").expect("top");

        let both = link_tooltip(&model.links[0], left, right);
        let weight = model.links[0].weight.expect("derived");
        assert!(both.ends_with(&format!("Displayed Weight: {weight:.2} N")));

        let single = link_tooltip(&model.links[1], left, top);
        let weight = model.links[1].weight.expect("derived");
        assert!(single.ends_with(&format!("Displayed Weight: {:.2} N", weight / 2.0)));
        assert!(single.starts_with(
            "Link: L2\nStart: (0.000, 0.000) [left]\nEnd: (20.000, 10.000) [top]\n"
        ));
        assert!(single.contains("Angle: 26.57°"));

        let bare = link_tooltip(&model.links[2], top, right);
        assert!(bare.contains(
            "Width: N/A m\nThickness: N/A m\nMaterial: N/A\nDisplayed Weight: 0.00 N"
        ));
    }

    #[test]
    fn support_tooltips_show_reactions() {
        let model = bridge();
        let left = model.node("left").expect("left");
        let tip = node_tooltip(left, &model);
        assert_eq!(tip, format!("Node: left\nVertical Reaction: {:.2} N", model.left_reaction));
        let top = model.node("top").expect("top");
        assert_eq!(node_tooltip(top, &model), "Node: top");
    }

    #[test]
    fn labels_are_centered_below_nodes() {
        let mut model = bridge();
        let (builder, canvas) = build(&mut model);
        let top = &builder.handles().nodes[2];
        let Some(Shape::Text { at, text }) = canvas.item(top.label).map(|i| &i.shape) else {
            panic!("label is text");
        };
        assert_eq!(text, "top");
        assert_relative_eq!(at.x, -10.5);
        assert_relative_eq!(at.y, -5.0 + 15.0 - 8.0);
    }

    #[test]
    fn roller_hatching_spans_the_glyph() {
        let builder = SceneBuilder::default();
        let path = builder.roller_support(Point::new(0.0, 0.0));
        let strokes: Vec<_> = path
            .iter()
            .filter_map(|c| match c {
                PathCommand::MoveTo(p) => Some(p.x),
                _ => None,
            })
            .skip(1)
            .collect();
        // Hatching runs from -12 while x + 6 < 12.
        assert_eq!(strokes, [-12.0, -6.0, 0.0]);
        assert_eq!(path[0], PathCommand::Ellipse(SceneRect::new(-5.0, -6.0, 10.0, 10.0)));
    }

    #[test]
    fn capsule_is_closed_and_rounded() {
        let path = capsule_path(Point::new(0.0, 0.0), Point::new(10.0, 0.0), 3.0);
        assert_eq!(path.len(), 1 + 1 + CAPSULE_ARC_SEGMENTS + 1 + CAPSULE_ARC_SEGMENTS + 1);
        let bounds = path_bounds(&path).expect("points");
        assert_relative_eq!(bounds.x, -3.0, epsilon = 1.0e-9);
        assert_relative_eq!(bounds.right(), 13.0, epsilon = 1.0e-9);
        assert_relative_eq!(bounds.height, 6.0, epsilon = 1.0e-9);
        assert_eq!(
            capsule_path(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 3.0),
            vec![PathCommand::Ellipse(SceneRect::new(-2.0, -2.0, 6.0, 6.0))]
        );
    }

    #[test]
    fn rebuild_is_deterministic_and_bumps_generation() {
        let mut model = bridge();
        let mut builder = SceneBuilder::default();
        let mut canvas = RecordingCanvas::new();
        builder.build(&mut model, &mut canvas);
        let snapshot = |canvas: &RecordingCanvas| -> Vec<_> {
            canvas
                .items
                .iter()
                .map(|item| (item.shape.clone(), item.tooltip.clone()))
                .collect()
        };
        let first_shapes = snapshot(&canvas);
        let first = builder.handles().clone();

        builder.build(&mut model, &mut canvas);
        let second_shapes = snapshot(&canvas);
        assert_eq!(first_shapes, second_shapes);
        assert_eq!(builder.handles().generation, first.generation + 1);
        assert!(canvas.item(first.nodes[0].glyph).is_none());
        assert_eq!(builder.handles().bounds, first.bounds);
    }

    #[test]
    fn unbounded_extent_keeps_stroke_count_bounded() {
        let mut model = TrussModel::new();
        model.nodes.push(Node::new("A", crate::geometry::position(f64::INFINITY, 0.0)));
        model.nodes.push(Node::new("B", crate::geometry::position(0.0, 0.0)));
        let (builder, canvas) = build(&mut model);
        assert!(builder.handles().grid.len() <= 1 + 2 * MAX_REPEATED_STROKES);
        assert!(canvas.items.len() < 3 * MAX_REPEATED_STROKES);
    }

    #[test]
    fn builder_rejects_invalid_config() {
        let config = SceneConfig {
            grid_spacing: 0.0,
            ..SceneConfig::default()
        };
        assert!(matches!(
            SceneBuilder::new(config),
            Err(ConfigError::NonPositiveGridSpacing(_))
        ));
        let tiny = SceneConfig {
            grid_spacing: 1.0e-9,
            ..SceneConfig::default()
        };
        let mut builder = SceneBuilder::new(tiny).expect("positive spacing is valid");
        let mut canvas = RecordingCanvas::new();
        builder.build(&mut bridge(), &mut canvas);
        assert!(builder.handles().grid.len() <= 1 + 2 * MAX_REPEATED_STROKES);
    }

    #[test]
    fn fit_covers_every_item() {
        let mut model = bridge();
        let (builder, canvas) = build(&mut model);
        let fitted = canvas.fitted.expect("fit requested");
        assert_eq!(Some(fitted), builder.handles().bounds);
        // The grid background is the outermost item for this model.
        assert_eq!(fitted, SceneRect::new(-70.0, -55.0, 140.0, 110.0));
    }
}

//! Domain entities describing a truss: material, nodes, links and the owning model.

use std::fmt;

use serde::Serialize;

use crate::geometry::{Position, Rectangle};

/// Name of the pinned support node.
pub const LEFT_SUPPORT: &str = "left";
/// Name of the roller support node.
pub const RIGHT_SUPPORT: &str = "right";

/// Density of structural steel in kilograms per cubic metre.
pub const STEEL_DENSITY: f64 = 7850.0;
/// Density of aluminium in kilograms per cubic metre, used for every other material.
pub const ALUMINUM_DENSITY: f64 = 2700.0;

/// Material properties shared by the whole truss.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Material {
    /// Ultimate tensile strength.
    pub uts: Option<f64>,
    /// Yield strength.
    pub ys: Option<f64>,
    /// Modulus of elasticity.
    pub elastic_modulus: Option<f64>,
    /// Static factor of safety.
    pub static_factor: Option<f64>,
}

/// Which support a node stands for, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SupportKind {
    /// Pinned support, named `left`.
    Pinned,
    /// Roller support, named `right`.
    Roller,
}

impl SupportKind {
    /// Classify a node name, ignoring case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case(LEFT_SUPPORT) {
            Some(SupportKind::Pinned)
        } else if name.eq_ignore_ascii_case(RIGHT_SUPPORT) {
            Some(SupportKind::Roller)
        } else {
            None
        }
    }
}

/// Returns `true` for the reserved support names `left` and `right` in any case.
#[must_use]
pub fn is_support_name(name: &str) -> bool {
    SupportKind::from_name(name).is_some()
}

/// A named point in the plane.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Node {
    /// Identifier used by links.
    pub name: String,
    /// Location of the node.
    pub position: Position,
}

impl Node {
    /// Create a node.
    pub fn new(name: impl Into<String>, position: Position) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }

    /// Support role of this node, if any.
    #[must_use]
    pub fn support(&self) -> Option<SupportKind> {
        SupportKind::from_name(&self.name)
    }
}

/// Material assigned to a link.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum LinkMaterial {
    /// Free-form material name from the input file, e.g. `steel`.
    Named(String),
    /// Explicit material properties.
    Properties(Material),
}

impl LinkMaterial {
    /// Density in kilograms per cubic metre.
    ///
    /// Only the name `steel` (any case) is recognised; everything else is aluminium.
    #[must_use]
    pub fn density(&self) -> f64 {
        match self {
            LinkMaterial::Named(name) if name.eq_ignore_ascii_case("steel") => STEEL_DENSITY,
            _ => ALUMINUM_DENSITY,
        }
    }
}

impl fmt::Display for LinkMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkMaterial::Named(name) => f.write_str(name),
            LinkMaterial::Properties(material) => write!(
                f,
                "uts={}, ys={}, E={}",
                or_na(material.uts),
                or_na(material.ys),
                or_na(material.elastic_modulus)
            ),
        }
    }
}

/// A structural member between two nodes, referenced by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Link {
    /// Identifier of the link.
    pub name: String,
    /// Name of the start node.
    pub node1: String,
    /// Name of the end node.
    pub node2: String,
    /// Distance between the nodes, once derived.
    pub length: Option<f64>,
    /// Direction from node1 to node2 in radians, once derived.
    pub angle_rad: Option<f64>,
    /// Material of the member.
    pub material: Option<LinkMaterial>,
    /// Cross-section width.
    pub width: Option<f64>,
    /// Cross-section thickness.
    pub thickness: Option<f64>,
    /// Self weight in newtons, once derived.
    pub weight: Option<f64>,
}

impl Link {
    /// Create a bare link with only its name and endpoints.
    pub fn new(
        name: impl Into<String>,
        node1: impl Into<String>,
        node2: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            node1: node1.into(),
            node2: node2.into(),
            ..Self::default()
        }
    }

    /// Attach cross-section and material data.
    #[must_use]
    pub fn with_section(mut self, width: f64, thickness: f64, material: LinkMaterial) -> Self {
        self.width = Some(width);
        self.thickness = Some(thickness);
        self.material = Some(material);
        self
    }

    /// Density used for the weight estimate; unset materials count as aluminium.
    #[must_use]
    pub fn density(&self) -> f64 {
        self.material
            .as_ref()
            .map_or(ALUMINUM_DENSITY, LinkMaterial::density)
    }

    /// Returns `true` when exactly one endpoint is a support node.
    #[must_use]
    pub fn has_single_support_end(&self) -> bool {
        is_support_name(&self.node1) ^ is_support_name(&self.node2)
    }

    /// Multi-line description of every property of the link.
    ///
    /// # Examples
    /// ```
    /// use trussview::Link;
    ///
    /// let text = Link::new("L1", "A", "B").properties_string();
    /// assert!(text.starts_with("Link: L1\nNodes: A to B\n"));
    /// assert!(text.contains("Width: N/A"));
    /// ```
    #[must_use]
    pub fn properties_string(&self) -> String {
        format!(
            "Link: {}\n\
             Nodes: {} to {}\n\
             Length: {}\n\
             Angle: {} rad\n\
             Material: {}\n\
             Width: {}\n\
             Thickness: {}\n\
             Weight: {} N",
            self.name,
            self.node1,
            self.node2,
            fmt_opt(self.length, 2),
            fmt_opt(self.angle_rad, 2),
            self.material_label(),
            fmt_opt(self.width, 3),
            fmt_opt(self.thickness, 3),
            fmt_opt(self.weight, 2),
        )
    }

    /// Material as displayed in reports and tooltips.
    #[must_use]
    pub fn material_label(&self) -> String {
        self.material
            .as_ref()
            .map_or_else(|| NOT_AVAILABLE.to_string(), ToString::to_string)
    }
}

/// Placeholder shown for values that are not set.
pub const NOT_AVAILABLE: &str = "N/A";

/// Format an optional value with a fixed number of decimals, or `N/A`.
#[must_use]
pub fn fmt_opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(
        || NOT_AVAILABLE.to_string(),
        |v| format!("{v:.decimals$}"),
    )
}

/// Render an optional value with its default formatting, or `N/A`.
pub(crate) fn or_na(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| v.to_string())
}

/// Container for everything imported from one truss description.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct TrussModel {
    /// Optional title shown in the report.
    pub title: Option<String>,
    /// Nodes in input order.
    pub nodes: Vec<Node>,
    /// Links in input order.
    pub links: Vec<Link>,
    /// Material shared by the truss.
    pub material: Material,
    /// Bounding box cached by [`TrussModel::update_bounding_rect`].
    pub rect: Rectangle,
    /// Vertical reaction at the `left` support.
    pub left_reaction: f64,
    /// Vertical reaction at the `right` support.
    pub right_reaction: f64,
}

impl TrussModel {
    /// Create an empty model.
    ///
    /// # Examples
    /// ```
    /// use trussview::TrussModel;
    ///
    /// let model = TrussModel::new();
    /// assert!(model.nodes.is_empty());
    /// assert_eq!(model.left_reaction, 0.0);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// First node with exactly this name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.name == name)
    }

    /// Both endpoint nodes of a link, when they resolve.
    #[must_use]
    pub fn endpoints(&self, link: &Link) -> Option<(&Node, &Node)> {
        Some((self.node(&link.node1)?, self.node(&link.node2)?))
    }

    /// First node acting as the given support, matching its name in any case.
    #[must_use]
    pub fn support_node(&self, kind: SupportKind) -> Option<&Node> {
        self.nodes.iter().find(|node| node.support() == Some(kind))
    }

    /// The `left` and `right` nodes, when both exist.
    #[must_use]
    pub fn support_nodes(&self) -> Option<(&Node, &Node)> {
        Some((
            self.support_node(SupportKind::Pinned)?,
            self.support_node(SupportKind::Roller)?,
        ))
    }

    /// Reaction force for a support kind.
    #[must_use]
    pub fn reaction(&self, support: SupportKind) -> f64 {
        match support {
            SupportKind::Pinned => self.left_reaction,
            SupportKind::Roller => self.right_reaction,
        }
    }

    /// Bounding box of every node position, without touching the cache.
    #[must_use]
    pub fn bounding_rect(&self) -> Rectangle {
        Rectangle::enclosing(self.nodes.iter().map(|node| node.position))
    }

    /// Recompute the cached bounding box and return it.
    pub fn update_bounding_rect(&mut self) -> Rectangle {
        self.rect = self.bounding_rect();
        self.rect
    }

    /// Longest link by derived length; links with a length beat links without one.
    #[must_use]
    pub fn longest_link(&self) -> Option<&Link> {
        let mut links = self.links.iter();
        let first = links.next()?;
        Some(links.fold(first, |longest, link| match (longest.length, link.length) {
            (None, Some(_)) => link,
            (Some(current), Some(candidate)) if candidate > current => link,
            _ => longest,
        }))
    }
}

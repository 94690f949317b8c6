//! Line-oriented reader for truss description files.
//!
//! Each meaningful line is a comma separated record whose first field selects the
//! record kind by prefix:
//!
//! ```text
//! # comment
//! title, Bridge over the creek
//! material, 400, 250, 200e9
//! static, 2.0
//! node, left, 0, 0
//! node, right, 10, 0
//! link, L1, left, right, 0.1, 0.1, steel
//! ```
//!
//! Blank lines, comments, short lines and unknown record kinds are skipped.

use crate::errors::ImportError;
use crate::geometry::position;
use crate::log::debug;
use crate::model::{Link, LinkMaterial, Node, TrussModel};

/// Number of fields at which a `link` record carries section and material data.
const FULL_LINK_FIELDS: usize = 7;

/// Build a fresh [`TrussModel`] from the lines of a description file.
///
/// # Errors
///
/// Returns [`ImportError`] on the first numeric field that fails to parse or on
/// a record that is missing a required field. No model is produced in that case.
///
/// # Examples
/// ```
/// use trussview::parse_lines;
///
/// let model = parse_lines(["node, A, 0, 0", "node, B, 3, 4", "link, L1, A, B"])
///     .expect("valid description");
/// assert_eq!(model.nodes.len(), 2);
/// assert_eq!(model.links[0].node2, "B");
/// ```
pub fn parse_lines<I, S>(lines: I) -> Result<TrussModel, ImportError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut model = TrussModel::new();
    for (idx, raw) in lines.into_iter().enumerate() {
        let line = raw.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let record = Record::new(idx + 1, line);
        if record.fields.len() < 2 {
            continue;
        }
        record.apply(&mut model)?;
    }
    debug!(
        nodes = model.nodes.len(),
        links = model.links.len(),
        "parsed truss description"
    );
    Ok(model)
}

/// One split and trimmed input line.
struct Record<'a> {
    /// 1-based line number.
    line: usize,
    /// Trimmed comma separated fields.
    fields: Vec<&'a str>,
}

impl<'a> Record<'a> {
    fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            fields: text.split(',').map(str::trim).collect(),
        }
    }

    /// Dispatch on the record keyword and update the model.
    fn apply(&self, model: &mut TrussModel) -> Result<(), ImportError> {
        let key = self.fields[0].to_lowercase();
        if key.starts_with("material") {
            model.material.uts = Some(self.number("material", 1, "uts")?);
            model.material.ys = Some(self.number("material", 2, "ys")?);
            model.material.elastic_modulus = Some(self.number("material", 3, "E")?);
        } else if key.starts_with("static") {
            model.material.static_factor = Some(self.number("static", 1, "factor")?);
        } else if key.starts_with("node") {
            let name = self.text("node", 1, "name")?;
            let x = self.number("node", 2, "x")?;
            let y = self.number("node", 3, "y")?;
            model.nodes.push(Node::new(name, position(x, y)));
        } else if key.starts_with("link") {
            model.links.push(self.link()?);
        } else if key.starts_with("title") {
            model.title = Some(self.fields[1..].join(", "));
        }
        Ok(())
    }

    fn link(&self) -> Result<Link, ImportError> {
        let link = Link::new(
            self.text("link", 1, "name")?,
            self.text("link", 2, "node1")?,
            self.text("link", 3, "node2")?,
        );
        if self.fields.len() < FULL_LINK_FIELDS {
            return Ok(link);
        }
        let width = self.number("link", 4, "width")?;
        let thickness = self.number("link", 5, "thickness")?;
        let material = LinkMaterial::Named(self.fields[6].to_string());
        Ok(link.with_section(width, thickness, material))
    }

    fn text(
        &self,
        record: &'static str,
        idx: usize,
        field: &'static str,
    ) -> Result<&'a str, ImportError> {
        self.fields
            .get(idx)
            .copied()
            .ok_or(ImportError::MissingField {
                line: self.line,
                record,
                field,
            })
    }

    /// Finite floating point field; `inf` and `NaN` are rejected.
    fn number(
        &self,
        record: &'static str,
        idx: usize,
        field: &'static str,
    ) -> Result<f64, ImportError> {
        let value = self.text(record, idx, field)?;
        value
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| ImportError::InvalidNumber {
                line: self.line,
                record,
                field,
                value: value.to_string(),
            })
    }
}

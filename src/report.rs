//! Plain-text design report and longest-link summary.

use std::fmt::Write;

use crate::model::{fmt_opt, or_na, Link, TrussModel, NOT_AVAILABLE};

/// Column headings of the link table.
const LINK_TABLE_HEADER: &str = "Link\t(1)\t(2)\tLength\tAngle\tMaterial\tWidth\tThickness\tWeight";

/// Render the textual design report of a derived truss.
///
/// The header lists the title and the shared material, followed by one tab
/// separated row per link. Values that were never set print as `N/A`.
#[must_use]
pub fn render_report(model: &TrussModel) -> String {
    let mut output = String::new();
    let material = &model.material;

    output.push_str("Truss Design Report\n");
    writeln!(
        &mut output,
        "Title: {}",
        model.title.as_deref().unwrap_or(NOT_AVAILABLE)
    )
    .expect("writing to string cannot fail");
    writeln!(&mut output, "Static Factor: {}", or_na(material.static_factor))
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Ultimate Strength: {}", or_na(material.uts))
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Yield Strength: {}", or_na(material.ys))
        .expect("writing to string cannot fail");
    writeln!(&mut output, "Modulus E: {}\n", or_na(material.elastic_modulus))
        .expect("writing to string cannot fail");

    output.push_str(LINK_TABLE_HEADER);
    output.push('\n');
    for link in &model.links {
        writeln!(&mut output, "{}", link_row(link)).expect("writing to string cannot fail");
    }
    output
}

/// One tab separated report row.
fn link_row(link: &Link) -> String {
    [
        link.name.clone(),
        link.node1.clone(),
        link.node2.clone(),
        fmt_opt(link.length, 2),
        fmt_opt(link.angle_rad, 2),
        link.material_label(),
        or_na(link.width),
        or_na(link.thickness),
        fmt_opt(link.weight, 2),
    ]
    .join("\t")
}

/// The four fields describing the longest link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LongestLinkFields {
    /// Link name.
    pub name: String,
    /// Start node name.
    pub node1: String,
    /// End node name.
    pub node2: String,
    /// Length with two decimals, or `N/A`.
    pub length: String,
}

impl LongestLinkFields {
    /// Fields for the longest link of `model`, `None` when it has no links.
    #[must_use]
    pub fn from_model(model: &TrussModel) -> Option<Self> {
        model.longest_link().map(|link| Self {
            name: link.name.clone(),
            node1: link.node1.clone(),
            node2: link.node2.clone(),
            length: fmt_opt(link.length, 2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::derive;
    use crate::parser::parse_lines;

    fn model() -> TrussModel {
        let mut model = parse_lines([
            "title, Test bridge",
            "material, 400, 250, 200000",
            "static, 2",
            "node, left, 0, 0",
            "node, right, 10, 0",
            "node, top, 5, 5",
            "link, L1, left, right, 0.1, 0.1, steel",
            "link, L2, left, top",
            "link, L3, top, nowhere",
        ])
        .expect("valid description");
        derive(&mut model);
        model
    }

    #[test]
    fn formats_header_and_rows() {
        let report = render_report(&model());
        let lines: Vec<_> = report.lines().collect();
        assert_eq!(
            &lines[..7],
            [
                "Truss Design Report",
                "Title: Test bridge",
                "Static Factor: 2",
                "Ultimate Strength: 400",
                "Yield Strength: 250",
                "Modulus E: 200000",
                "",
            ]
        );
        assert_eq!(lines[7], LINK_TABLE_HEADER);
        assert_eq!(lines[8], "L1\tleft\tright\t10.00\t0.00\tsteel\t0.1\t0.1\t7700.85");
        assert_eq!(lines[9], "L2\tleft\ttop\t7.07\t0.79\tN/A\tN/A\tN/A\t0.00");
        assert_eq!(lines[10], "L3\ttop\tnowhere\tN/A\tN/A\tN/A\tN/A\tN/A\tN/A");
    }

    #[test]
    fn empty_model_reports_not_available() {
        let report = render_report(&TrussModel::new());
        assert!(report.contains("Title: N/A\nStatic Factor: N/A\n"));
        assert!(report.ends_with(&format!("{LINK_TABLE_HEADER}\n")));
    }

    #[test]
    fn longest_link_fields() {
        let fields = LongestLinkFields::from_model(&model()).expect("links present");
        assert_eq!(
            fields,
            LongestLinkFields {
                name: "L1".into(),
                node1: "left".into(),
                node2: "right".into(),
                length: "10.00".into(),
            }
        );
        assert!(LongestLinkFields::from_model(&TrussModel::new()).is_none());
    }
}

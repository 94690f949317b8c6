//! Link geometry, self weight and simplified support reactions.
//!
//! This is not a structural solve: every link contributes its weight at its
//! midpoint and the two supports share the total like a simply supported beam.

use uom::si::acceleration::meter_per_second_squared;
use uom::si::f64::{Acceleration, Force, Length, MassDensity, Volume};
use uom::si::force::newton;
use uom::si::length::meter;
use uom::si::mass_density::kilogram_per_cubic_meter;

use crate::log::debug;
use crate::model::{Link, TrussModel};

/// Standard gravity in metres per second squared.
pub const GRAVITY: f64 = 9.81;

/// Supports closer together than this are treated as a single point.
const DEGENERATE_SPAN: f64 = 1.0e-9;

/// Self weight in newtons of a prismatic member.
///
/// Lengths are taken as metres and the density as kilograms per cubic metre.
///
/// # Examples
/// ```
/// use trussview::analysis::member_weight;
///
/// let weight = member_weight(10.0, 0.1, 0.1, 7850.0);
/// assert!((weight - 7700.85).abs() < 1e-6);
/// ```
#[must_use]
pub fn member_weight(length: f64, width: f64, thickness: f64, density: f64) -> f64 {
    let volume: Volume = Length::new::<meter>(length)
        * Length::new::<meter>(width)
        * Length::new::<meter>(thickness);
    let weight: Force = MassDensity::new::<kilogram_per_cubic_meter>(density)
        * volume
        * Acceleration::new::<meter_per_second_squared>(GRAVITY);
    weight.get::<newton>()
}

/// Compute length, angle and weight of every link whose endpoints resolve.
///
/// Links with a dangling node name keep whatever values they had. Running this
/// twice on an unchanged model gives identical results.
pub fn calc_link_values(model: &mut TrussModel) {
    let derived: Vec<Option<(f64, f64)>> = model
        .links
        .iter()
        .map(|link| {
            let (start, end) = model.endpoints(link)?;
            let length = start.position.distance_to(end.position);
            Some((length, (end.position - start.position).angle_rad()))
        })
        .collect();

    for (link, values) in model.links.iter_mut().zip(derived) {
        let Some((length, angle)) = values else {
            debug!(link = %link.name, "skipping link with unresolved endpoint");
            continue;
        };
        link.length = Some(length);
        link.angle_rad = Some(angle);
        link.weight = Some(member_weight(
            length,
            link.width.unwrap_or(0.0),
            link.thickness.unwrap_or(0.0),
            link.density(),
        ));
    }
}

/// Total self weight of all links; links without a weight count as zero.
#[must_use]
pub fn total_weight(model: &TrussModel) -> f64 {
    model.links.iter().map(link_weight).sum()
}

fn link_weight(link: &Link) -> f64 {
    link.weight.unwrap_or(0.0)
}

/// Split the total self weight between the `left` and `right` supports.
///
/// Nothing changes when either support node is missing.
pub fn calc_support_reactions(model: &mut TrussModel) {
    let Some((left, right)) = model.support_nodes() else {
        debug!("support nodes missing, reactions left unchanged");
        return;
    };
    let x_left = left.position.x;
    let span = right.position.x - x_left;

    let total = total_weight(model);
    let (left_reaction, right_reaction) = if total <= 0.0 {
        (0.0, 0.0)
    } else if span.abs() < DEGENERATE_SPAN {
        (total, 0.0)
    } else {
        let moment: f64 = model
            .links
            .iter()
            .filter_map(|link| {
                let (start, end) = model.endpoints(link)?;
                let midpoint = 0.5 * (start.position.x + end.position.x);
                Some(midpoint * link_weight(link))
            })
            .sum();
        let x_cg = moment / total;
        let right_reaction = total * (x_cg - x_left) / span;
        (total - right_reaction, right_reaction)
    };

    debug!(left = left_reaction, right = right_reaction, "support reactions");
    model.left_reaction = left_reaction;
    model.right_reaction = right_reaction;
}

/// Derive link values and then support reactions.
pub fn derive(model: &mut TrussModel) {
    calc_link_values(model);
    calc_support_reactions(model);
}

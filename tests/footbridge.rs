#![warn(clippy::pedantic)]

use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use trussview::analysis::member_weight;
use trussview::{
    ImportError, PointerEventKind, RecordingCanvas, Shape, SharedOutputs, SupportKind,
    TrussController,
};

const FOOTBRIDGE: &str = include_str!("../demos/footbridge.truss");

struct Fixture {
    controller: TrussController,
    outputs: SharedOutputs,
    canvas: Rc<RefCell<RecordingCanvas>>,
}

fn imported_footbridge() -> Fixture {
    let outputs = SharedOutputs::default();
    let canvas = Rc::new(RefCell::new(RecordingCanvas::new()));
    let mut controller = TrussController::default();
    controller.set_display_sinks(outputs.sinks(Rc::clone(&canvas)));
    controller
        .import_from_lines(FOOTBRIDGE.lines())
        .expect("footbridge description is valid");
    Fixture {
        controller,
        outputs,
        canvas,
    }
}

fn strut_weight() -> f64 {
    member_weight(41.0_f64.sqrt(), 0.05, 0.05, 2700.0)
}

#[test]
fn reactions_balance_self_weight() {
    let fixture = imported_footbridge();
    let model = fixture.controller.model();

    let deck = member_weight(10.0, 0.1, 0.1, 7850.0);
    let strut = strut_weight();
    assert_relative_eq!(deck, 7700.85, epsilon = 1e-6);

    let left = model.reaction(SupportKind::Pinned);
    let right = model.reaction(SupportKind::Roller);
    assert_relative_eq!(left + right, deck + strut, epsilon = 1e-9);
    assert_relative_eq!(right, 0.5 * deck + 0.25 * strut, epsilon = 1e-9);
    assert!(left > right, "strut sits over the left half");
}

#[test]
fn report_and_longest_link_are_displayed() {
    let fixture = imported_footbridge();
    let report = fixture.outputs.report.borrow();
    assert!(report.starts_with("Truss Design Report\nTitle: Footbridge\nStatic Factor: 2\n"));
    assert!(report.contains("L1\tleft\tright\t10.00\t0.00\tsteel\t0.1\t0.1\t7700.85"));
    assert!(report.contains("L3\ttop\tright\t6.40\t-0.67\tN/A\tN/A\tN/A\t0.00"));

    assert_eq!(*fixture.outputs.link_name.borrow(), "L1");
    assert_eq!(*fixture.outputs.node1.borrow(), "left");
    assert_eq!(*fixture.outputs.node2.borrow(), "right");
    assert_eq!(*fixture.outputs.length.borrow(), "10.00");
}

#[test]
fn tooltips_halve_links_with_one_support_end() {
    let fixture = imported_footbridge();
    let canvas = fixture.canvas.borrow();
    let handles = fixture.controller.scene_handles();

    let tooltip = |name: &str| {
        let graphic = handles
            .links
            .iter()
            .find(|graphic| graphic.name == name)
            .expect("link was drawn");
        canvas
            .item(graphic.item)
            .and_then(|item| item.tooltip.clone())
            .expect("links carry a tooltip")
    };

    assert!(tooltip("L1").ends_with("Displayed Weight: 7700.85 N"));
    assert!(tooltip("L2").ends_with(&format!("Displayed Weight: {:.2} N", strut_weight() / 2.0)));
    assert!(tooltip("L3").ends_with("Displayed Weight: 0.00 N"));

    let model = fixture.controller.model();
    let left = canvas
        .item(handles.nodes[0].glyph)
        .and_then(|item| item.tooltip.as_deref())
        .expect("nodes carry a tooltip");
    assert_eq!(
        left,
        format!(
            "Node: left\nVertical Reaction: {:.2} N",
            model.reaction(SupportKind::Pinned)
        )
    );
}

#[test]
fn reimport_rebuilds_identical_scene() {
    let mut fixture = imported_footbridge();
    let first: Vec<_> = fixture
        .canvas
        .borrow()
        .items
        .iter()
        .map(|item| (item.shape.clone(), item.tooltip.clone()))
        .collect();

    fixture
        .controller
        .import_from_lines(FOOTBRIDGE.lines())
        .expect("footbridge description is valid");
    let second: Vec<_> = fixture
        .canvas
        .borrow()
        .items
        .iter()
        .map(|item| (item.shape.clone(), item.tooltip.clone()))
        .collect();

    assert_eq!(first, second);
    assert_eq!(fixture.controller.scene_handles().generation, 2);
    assert!(matches!(first[0].0, Shape::Rect { .. }));
}

#[test]
fn bad_record_leaves_display_untouched() {
    let mut fixture = imported_footbridge();
    let report = fixture.outputs.report.borrow().clone();

    let error = fixture
        .controller
        .import_from_lines(["node, left, 0, 0", "link, L9, left"])
        .expect_err("link without end node");
    assert!(matches!(error, ImportError::MissingField { line: 2, .. }));
    assert_eq!(*fixture.outputs.report.borrow(), report);
    assert_eq!(fixture.controller.model().title.as_deref(), Some("Footbridge"));
}

#[test]
fn pointer_moves_report_model_coordinates() {
    let fixture = imported_footbridge();
    let outcome = fixture
        .controller
        .handle_pointer_event(true, PointerEventKind::Moved, 12.5, -3.25);
    assert!(!outcome.consumed);
    assert_eq!(outcome.message.as_deref(), Some("Mouse: x=12.50, y=3.25"));

    let ignored = fixture
        .controller
        .handle_pointer_event(false, PointerEventKind::Moved, 1.0, 1.0);
    assert_eq!(ignored.message, None);
}

#[test]
fn recorded_scene_serializes_to_json() {
    let fixture = imported_footbridge();
    let value = serde_json::to_value(&*fixture.canvas.borrow()).expect("scene serializes");
    let items = value["items"].as_array().expect("items array");
    assert_eq!(items.len(), fixture.canvas.borrow().items.len());
    assert_eq!(items[0]["shape"]["kind"], "rect");
}

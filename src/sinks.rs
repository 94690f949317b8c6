//! Output widgets the controller writes to, abstracted as sinks.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::Canvas;

/// Multi-line text output such as a report pane.
pub trait TextSink {
    /// Replace the displayed text.
    fn set_text(&mut self, text: &str);
}

/// Single-value output such as a line edit.
pub trait ScalarSink {
    /// Replace the displayed value.
    fn set_value(&mut self, value: &str);
}

impl TextSink for String {
    fn set_text(&mut self, text: &str) {
        self.clear();
        self.push_str(text);
    }
}

impl ScalarSink for String {
    fn set_value(&mut self, value: &str) {
        self.clear();
        self.push_str(value);
    }
}

impl<T: TextSink + ?Sized> TextSink for Rc<RefCell<T>> {
    fn set_text(&mut self, text: &str) {
        self.borrow_mut().set_text(text);
    }
}

impl<T: ScalarSink + ?Sized> ScalarSink for Rc<RefCell<T>> {
    fn set_value(&mut self, value: &str) {
        self.borrow_mut().set_value(value);
    }
}

/// Four fields showing the longest link.
pub struct LongestLinkSinks {
    /// Link name.
    pub name: Box<dyn ScalarSink>,
    /// Start node name.
    pub node1: Box<dyn ScalarSink>,
    /// End node name.
    pub node2: Box<dyn ScalarSink>,
    /// Link length.
    pub length: Box<dyn ScalarSink>,
}

/// Everything the controller renders into.
pub struct DisplaySinks {
    /// Design report text.
    pub report: Box<dyn TextSink>,
    /// Longest link fields.
    pub longest_link: LongestLinkSinks,
    /// Drawing surface for the scene.
    pub canvas: Box<dyn Canvas>,
}

/// Shared handles to in-memory sinks, useful for headless hosts and tests.
#[derive(Clone, Debug, Default)]
pub struct SharedOutputs {
    /// Report text.
    pub report: Rc<RefCell<String>>,
    /// Longest link name.
    pub link_name: Rc<RefCell<String>>,
    /// Longest link start node.
    pub node1: Rc<RefCell<String>>,
    /// Longest link end node.
    pub node2: Rc<RefCell<String>>,
    /// Longest link length.
    pub length: Rc<RefCell<String>>,
}

impl SharedOutputs {
    /// Sinks writing into these buffers and drawing onto `canvas`.
    pub fn sinks(&self, canvas: impl Canvas + 'static) -> DisplaySinks {
        DisplaySinks {
            report: Box::new(Rc::clone(&self.report)),
            longest_link: LongestLinkSinks {
                name: Box::new(Rc::clone(&self.link_name)),
                node1: Box::new(Rc::clone(&self.node1)),
                node2: Box::new(Rc::clone(&self.node2)),
                length: Box::new(Rc::clone(&self.length)),
            },
            canvas: Box::new(canvas),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;

    #[test]
    fn string_sinks_replace_content() {
        let mut text = String::from("old");
        TextSink::set_text(&mut text, "new");
        assert_eq!(text, "new");
        ScalarSink::set_value(&mut text, "1.00");
        assert_eq!(text, "1.00");
    }

    #[test]
    fn shared_outputs_observe_writes() {
        let outputs = SharedOutputs::default();
        let mut sinks = outputs.sinks(RecordingCanvas::new());
        sinks.report.set_text("report");
        sinks.longest_link.length.set_value("3.00");
        assert_eq!(*outputs.report.borrow(), "report");
        assert_eq!(*outputs.length.borrow(), "3.00");
    }
}

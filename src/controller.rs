//! Ties the parser, the derivation and the scene builder to the display sinks.

use crate::analysis::derive;
use crate::config::SceneConfig;
use crate::errors::{ConfigError, ImportError};
use crate::events::{handle_pointer_event, EventOutcome, PointerEventKind};
use crate::log::{debug, warn};
use crate::model::TrussModel;
use crate::parser::parse_lines;
use crate::report::{render_report, LongestLinkFields};
use crate::scene::{SceneBuilder, SceneHandles};
use crate::sinks::DisplaySinks;

/// Owns the current model and redraws the attached sinks after every import.
///
/// # Examples
/// ```
/// use trussview::{RecordingCanvas, SharedOutputs, TrussController};
///
/// let outputs = SharedOutputs::default();
/// let mut controller = TrussController::default();
/// controller.set_display_sinks(outputs.sinks(RecordingCanvas::new()));
/// controller
///     .import_from_lines(["node, left, 0, 0", "node, right, 4, 0", "link, L1, left, right"])
///     .expect("valid description");
/// assert_eq!(*outputs.link_name.borrow(), "L1");
/// assert_eq!(*outputs.length.borrow(), "4.00");
/// ```
#[derive(Default)]
pub struct TrussController {
    model: TrussModel,
    scene: SceneBuilder,
    sinks: Option<DisplaySinks>,
}

impl TrussController {
    /// Controller drawing with the given layout settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when `config` fails [`SceneConfig::validate`].
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            model: TrussModel::new(),
            scene: SceneBuilder::new(config)?,
            sinks: None,
        })
    }

    /// Attach the report, longest-link and canvas outputs.
    pub fn set_display_sinks(&mut self, sinks: DisplaySinks) {
        self.sinks = Some(sinks);
    }

    /// The model from the last successful import.
    #[must_use]
    pub fn model(&self) -> &TrussModel {
        &self.model
    }

    /// Canvas handles from the last scene build.
    #[must_use]
    pub fn scene_handles(&self) -> &SceneHandles {
        self.scene.handles()
    }

    /// Replace the model with one parsed from `lines`, derive it and redraw.
    ///
    /// # Errors
    ///
    /// Returns the [`ImportError`] of the first bad record. The previous model and
    /// everything already displayed are kept in that case.
    pub fn import_from_lines<I, S>(&mut self, lines: I) -> Result<(), ImportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut model = parse_lines(lines).map_err(|error| {
            warn!(%error, "import failed, keeping previous model");
            error
        })?;
        derive(&mut model);
        self.model = model;
        self.display_report();
        self.draw_truss();
        Ok(())
    }

    /// Describe a pointer event; see [`handle_pointer_event`].
    #[must_use]
    pub fn handle_pointer_event(
        &self,
        is_ours: bool,
        kind: PointerEventKind,
        x: f64,
        y: f64,
    ) -> EventOutcome {
        handle_pointer_event(is_ours, kind, x, y)
    }

    fn display_report(&mut self) {
        let Some(sinks) = self.sinks.as_mut() else {
            debug!("no display sinks attached, report skipped");
            return;
        };
        sinks.report.set_text(&render_report(&self.model));
        if let Some(fields) = LongestLinkFields::from_model(&self.model) {
            let longest = &mut sinks.longest_link;
            longest.name.set_value(&fields.name);
            longest.node1.set_value(&fields.node1);
            longest.node2.set_value(&fields.node2);
            longest.length.set_value(&fields.length);
        }
    }

    fn draw_truss(&mut self) {
        let Some(sinks) = self.sinks.as_mut() else {
            debug!("no display sinks attached, scene skipped");
            return;
        };
        self.scene.build(&mut self.model, sinks.canvas.as_mut());
    }
}

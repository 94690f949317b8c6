use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use trussview::{RecordingCanvas, SceneConfig, SharedOutputs, TrussController};

/// Print the design report of a truss description file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Truss description to import.
    input: PathBuf,
    /// JSON file overriding scene layout settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Also print the recorded scene as JSON.
    #[arg(long)]
    scene_json: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SceneConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => SceneConfig::default(),
    };

    // The host owns the canvas; the controller only draws into it.
    let canvas = Rc::new(RefCell::new(RecordingCanvas::new()));
    let outputs = SharedOutputs::default();
    let mut controller = TrussController::new(config)?;
    controller.set_display_sinks(outputs.sinks(Rc::clone(&canvas)));

    let text = std::fs::read_to_string(&args.input)?;
    controller.import_from_lines(text.lines())?;

    println!("{}", outputs.report.borrow());
    println!(
        "Longest link: {} ({} -> {}), length {}",
        outputs.link_name.borrow(),
        outputs.node1.borrow(),
        outputs.node2.borrow(),
        outputs.length.borrow()
    );
    let model = controller.model();
    println!(
        "Reactions: left {:.2} N, right {:.2} N",
        model.left_reaction, model.right_reaction
    );

    if args.scene_json {
        println!("{}", serde_json::to_string_pretty(&*canvas.borrow())?);
    }

    Ok(())
}

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;
use tracing::{debug, warn};

use medview_core::annotation::TextPrompt;
use medview_core::calibration::Calibration;
use medview_core::config::ViewerConfig;
use medview_core::geometry::Point;
use medview_core::intensity::{Modality, Rescale};
use medview_core::session::{
    InputEvent, SliceSource, ViewerCommand, ViewerEvent, ViewerSession,
};

use crate::source::{DicomSeries, SyntheticSeries};
use crate::summary::print_session_summary;

#[derive(Args)]
pub struct ReplayArgs {
    /// TOML script of input events and commands
    pub script: PathBuf,

    /// DICOM files to load instead of the script's synthetic series
    #[arg(long, num_args = 1..)]
    pub dicom: Vec<PathBuf>,

    /// Viewer config (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Export the measurement report here when the script ends (.json or text)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print cursor readouts and transform updates
    #[arg(long)]
    pub trace: bool,
}

#[derive(Deserialize)]
struct Script {
    #[serde(default)]
    series: SyntheticSettings,
    /// Surface size used by fit-to-view.
    #[serde(default = "default_view")]
    view: [f64; 2],
    /// Answers handed out, in order, each time the text tool asks.
    #[serde(default)]
    text: Vec<String>,
    #[serde(default, rename = "step")]
    steps: Vec<Step>,
}

#[derive(Deserialize)]
#[serde(default)]
struct SyntheticSettings {
    slices: usize,
    width: usize,
    height: usize,
    spacing: Vec<f64>,
    modality: String,
    slope: f64,
    intercept: f64,
}

impl Default for SyntheticSettings {
    fn default() -> Self {
        Self {
            slices: 1,
            width: 256,
            height: 256,
            spacing: vec![1.0, 1.0],
            modality: "CT".to_string(),
            slope: 1.0,
            intercept: -1024.0,
        }
    }
}

impl SyntheticSettings {
    fn build(&self) -> SyntheticSeries {
        SyntheticSeries {
            len: self.slices,
            width: self.width,
            height: self.height,
            calibration: Calibration::from_values(&self.spacing),
            modality: Modality::from_code(&self.modality),
            rescale: Rescale {
                slope: self.slope,
                intercept: self.intercept,
            },
        }
    }
}

fn default_view() -> [f64; 2] {
    [800.0, 600.0]
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Step {
    Command(ViewerCommand),
    Event(InputEvent),
    /// Let virtual time pass so that due cine ticks fire.
    Wait { wait_ms: u64 },
    Export { export: PathBuf },
}

/// Text prompt fed from the script's queued answers.
struct QueuedText(VecDeque<String>);

impl TextPrompt for QueuedText {
    fn request_text(&mut self, at: Point) -> Option<String> {
        let answer = self.0.pop_front();
        debug!(?at, ?answer, "Text requested");
        answer
    }
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let contents = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let script: Script = toml::from_str(&contents).context("Invalid replay script")?;

    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ViewerConfig::default(),
    };

    let mut source: Box<dyn SliceSource> = if args.dicom.is_empty() {
        Box::new(script.series.build())
    } else {
        Box::new(DicomSeries::open(&args.dicom)?)
    };

    let mut session = ViewerSession::new(config);
    session.set_view_size(script.view[0], script.view[1]);
    let mut prompt = QueuedText(script.text.into());
    let mut now = Instant::now();

    let events = session.load_series(source.len());
    apply(&mut session, source.as_mut(), events, args.trace)?;

    for step in script.steps {
        let events = match step {
            Step::Command(command) => match session.execute(command, now) {
                Ok(events) => events,
                Err(e) => {
                    warn!("{e}");
                    println!("Error: {e}");
                    continue;
                }
            },
            Step::Event(event) => session.handle_event(event, &mut prompt),
            Step::Wait { wait_ms } => {
                now += Duration::from_millis(wait_ms);
                session.poll_cine(now)
            }
            Step::Export { export } => {
                export_report(&session, &export);
                continue;
            }
        };
        apply(&mut session, source.as_mut(), events, args.trace)?;
    }

    print_session_summary(&session);

    if let Some(ref path) = args.output {
        export_report(&session, path);
    }
    Ok(())
}

/// Print the events and decode whatever slice they moved to.
fn apply(
    session: &mut ViewerSession,
    source: &mut dyn SliceSource,
    events: Vec<ViewerEvent>,
    trace: bool,
) -> Result<()> {
    let mut slice_moved = false;
    for event in &events {
        match event {
            ViewerEvent::MeasurementCompleted(_) => {}
            ViewerEvent::CursorReadout(_) | ViewerEvent::TransformChanged(_) if !trace => {}
            ViewerEvent::SliceChanged { .. } => {
                slice_moved = true;
                println!("{event}");
            }
            _ => println!("{event}"),
        }
    }
    if slice_moved {
        session
            .decode_current(source)
            .context("Failed to decode slice")?;
    }
    Ok(())
}

/// Export failures are shown and leave the session as it was.
fn export_report(session: &ViewerSession, path: &Path) {
    match session.export_report(path) {
        Ok((_, status)) => println!("{status}"),
        Err(e) => println!("Error exporting report: {e}"),
    }
}

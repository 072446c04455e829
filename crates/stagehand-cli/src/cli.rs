//! Command-line interface for the stagehand utility
//!
//! Reads diagram markup, prints its layout or reveal state for a frame as
//! JSON. Flowcharts take their node boxes from a pre-rendered SVG.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::warn;

use stagehand::core::logging::init_logging;
use stagehand::prelude::*;
use stagehand::sequencer::SequenceEntry;

/// Stagehand - lay out and time Mermaid-style diagrams for animation
#[derive(Parser)]
#[command(name = "stagehand")]
#[command(about = "Turn Mermaid-style diagrams into frame-timed layouts")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect the diagram dialect of the input
    Detect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Print the laid out diagram as JSON
    Layout {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the JSON (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendered SVG supplying flowchart node boxes
        #[arg(short, long)]
        geometry: Option<PathBuf>,
    },

    /// Print the reveal state of one animation frame as JSON
    Frame {
        /// Input file containing the diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Rendered SVG supplying flowchart node boxes
        #[arg(short, long)]
        geometry: Option<PathBuf>,

        /// Frame to query
        #[arg(short, long, default_value_t = 0)]
        frame: u64,

        /// Frames between consecutive reveals
        #[arg(long, default_value_t = AnimationConfig::default().frames_per_element)]
        frames_per_element: u32,
    },

    /// Show supported diagram types
    Types {
        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// JSON body of the `frame` command
#[derive(Debug, Serialize)]
pub struct FrameReport<'a> {
    pub dialect: DiagramDialect,
    pub total_frames: u64,
    pub entries: &'a [SequenceEntry],
    #[serde(flatten)]
    pub state: FrameState,
}

/// Main CLI application
pub struct StagehandApp {
    orchestrator: Orchestrator,
}

impl StagehandApp {
    /// Create a new application instance with every dialect registered
    pub fn new() -> Self {
        Self {
            orchestrator: Orchestrator::with_default_detectors(),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("STAGEHAND_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("STAGEHAND_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Stagehand v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Detect { input } => self.detect_command(input, cli.verbose),
            Commands::Layout {
                input,
                output,
                geometry,
            } => {
                let json = self.layout_json(input, geometry, cli.verbose)?;
                self.write_output(output, &json)
            }
            Commands::Frame {
                input,
                geometry,
                frame,
                frames_per_element,
            } => {
                let json = self.frame_json(
                    input,
                    geometry,
                    frame,
                    AnimationConfig::new(frames_per_element),
                    cli.verbose,
                )?;
                self.write_output(None, &json)
            }
            Commands::Types { json } => self.types_command(json, cli.verbose),
        }
    }

    /// Handle the detect command
    fn detect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.orchestrator.detect_diagram_type(&content) {
            Ok(dialect) => {
                println!("{}", dialect);
                Ok(())
            }
            Err(e) => {
                eprintln!("Could not detect diagram type: {}", e);
                Err(e)
            }
        }
    }

    /// Lay out the input and serialize it
    pub fn layout_json(
        &self,
        input: Option<PathBuf>,
        geometry: Option<PathBuf>,
        verbose: bool,
    ) -> Result<String> {
        let diagram = self.parse_input(input, geometry, verbose)?;
        Ok(serde_json::to_string_pretty(&diagram)?)
    }

    /// Lay out the input and serialize its reveal state at `frame`
    pub fn frame_json(
        &self,
        input: Option<PathBuf>,
        geometry: Option<PathBuf>,
        frame: u64,
        config: AnimationConfig,
        verbose: bool,
    ) -> Result<String> {
        let diagram = self.parse_input(input, geometry, verbose)?;
        let sequencer = Sequencer::new(&diagram, config);

        if verbose {
            let progress = sequencer.progress(frame);
            eprintln!("Frame {}: {}/{} visible", frame, progress.visible, progress.total);
        }

        let report = FrameReport {
            dialect: diagram.dialect(),
            total_frames: sequencer.total_frames(),
            entries: sequencer.entries(),
            state: sequencer.frame(frame),
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }

    fn parse_input(
        &self,
        input: Option<PathBuf>,
        geometry: Option<PathBuf>,
        verbose: bool,
    ) -> Result<ParsedDiagram> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let geometry = match geometry {
            Some(path) => self.load_geometry(path)?,
            None => None,
        };

        let diagram = self.orchestrator.parse(&content, geometry.as_ref());
        if !diagram.is_supported() {
            return Err(anyhow!("Unsupported diagram type"));
        }
        Ok(diagram)
    }

    /// Read an SVG file; undecodable markup gives no geometry
    fn load_geometry(&self, path: PathBuf) -> Result<Option<FlowchartGeometry>> {
        let source = SvgGeometrySource::from_path(&path)
            .map_err(|e| anyhow!("Failed to read geometry file '{}': {}", path.display(), e))?;

        match source.geometry() {
            Ok(geometry) => Ok(Some(geometry)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable geometry");
                Ok(None)
            }
        }
    }

    /// Handle the types command
    fn types_command(&self, json: bool, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing supported diagram types");
        }

        let supported = DiagramDialect::supported();

        if json {
            let types: Vec<_> = supported
                .iter()
                .map(|dialect| {
                    serde_json::json!({
                        "name": dialect.to_string(),
                        "description": dialect.description(),
                    })
                })
                .collect();
            let body = serde_json::json!({
                "supported_types": types,
                "total": supported.len(),
            });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            println!("Supported diagram types:");
            for dialect in supported {
                println!("  {:<10} - {}", dialect.to_string(), dialect.description());
            }
            println!();
            println!("Total: {} diagram types supported", supported.len());
        }

        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                println!("{}", content);
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for StagehandApp {
    fn default() -> Self {
        Self::new()
    }
}

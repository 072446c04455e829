//! Parse sessions with supersede-on-new-input semantics
//!
//! Flowcharts need geometry from an asynchronous renderer. A session issues a
//! ticket at the start of every parse; when a newer parse starts before an
//! older one's render completes, the older result is discarded instead of
//! overwriting the newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, span, warn, Instrument, Level};

use crate::core::{DiagramDialect, GeometrySource};
use crate::plugins::orchestrator::{Orchestrator, ParsedDiagram};

/// Generation marker for one parse attempt
#[derive(Debug, Clone)]
pub struct ParseTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl ParseTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether no newer parse has started since this ticket was issued
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// Result of one parse attempt
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    Ready(ParsedDiagram),
    /// A newer parse started while this one was waiting on geometry
    Superseded,
}

impl ParseOutcome {
    pub fn into_diagram(self) -> Option<ParsedDiagram> {
        match self {
            ParseOutcome::Ready(diagram) => Some(diagram),
            ParseOutcome::Superseded => None,
        }
    }
}

/// Runs parses against one geometry source
pub struct DiagramSession<G: GeometrySource> {
    orchestrator: Orchestrator,
    source: G,
    latest: Arc<AtomicU64>,
}

impl<G: GeometrySource> DiagramSession<G> {
    pub fn new(source: G) -> Self {
        Self::with_orchestrator(Orchestrator::with_default_detectors(), source)
    }

    pub fn with_orchestrator(orchestrator: Orchestrator, source: G) -> Self {
        Self {
            orchestrator,
            source,
            latest: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start a new parse attempt, superseding every earlier ticket
    pub fn begin(&self) -> ParseTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        ParseTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Classify and lay out `input`.
    ///
    /// Flowcharts await one geometry render; a render failure yields an empty
    /// flowchart. The outcome is [`ParseOutcome::Superseded`] when another
    /// parse began while this one was suspended.
    pub async fn parse(&self, input: &str) -> ParseOutcome {
        let ticket = self.begin();
        let span = span!(Level::INFO, "session_parse", generation = ticket.generation());

        async {
            let dialect = self.orchestrator.classify(input);
            if dialect != DiagramDialect::Flowchart {
                return ParseOutcome::Ready(self.orchestrator.parse_as(dialect, input, None));
            }

            let geometry = match self.source.render(input).await {
                Ok(geometry) => {
                    debug!(node_count = geometry.nodes.len(), "Geometry received");
                    Some(geometry)
                }
                Err(err) => {
                    warn!(error = %err, "Geometry render failed, flowchart will be empty");
                    None
                }
            };

            if !ticket.is_current() {
                info!("Discarding superseded parse result");
                return ParseOutcome::Superseded;
            }

            ParseOutcome::Ready(self.orchestrator.parse_as(dialect, input, geometry.as_ref()))
        }
        .instrument(span)
        .await
    }
}

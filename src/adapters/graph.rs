//! Graph adapter: hands the series to the plotting collaborator.
//!
//! Writes the plot as a gnuplot data file (minutes vs °F, with the trace
//! colour in the header) at the configured image path.  The display
//! collaborator turns that file into the on-screen graph.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use log::debug;

use crate::app::ports::{GraphError, GraphPort, TraceColour};
use crate::recording::Sample;

pub struct PlotFileGraph {
    path: PathBuf,
}

impl PlotFileGraph {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl GraphPort for PlotFileGraph {
    fn render_graph(
        &mut self,
        samples: &[Sample],
        colour: TraceColour,
    ) -> Result<PathBuf, GraphError> {
        if samples.is_empty() {
            return Err(GraphError::EmptySeries);
        }
        let colour = match colour {
            TraceColour::Red => "red",
            TraceColour::Blue => "blue",
        };

        let mut out = BufWriter::new(File::create(&self.path).map_err(GraphError::Io)?);
        writeln!(out, "# title: Temperature vs Time").map_err(GraphError::Io)?;
        writeln!(out, "# colour: {}", colour).map_err(GraphError::Io)?;
        writeln!(out, "# x: Time (min)  y: Temperature (F)").map_err(GraphError::Io)?;
        for s in samples {
            writeln!(out, "{:.3} {:.2}", s.elapsed_minutes(), s.temp_f).map_err(GraphError::Io)?;
        }
        out.flush().map_err(GraphError::Io)?;

        debug!("graph: {} points to {}", samples.len(), self.path.display());
        Ok(self.path.clone())
    }
}

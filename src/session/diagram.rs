//! Shear and moment diagram data
//!
//! Stations are independent, so they are evaluated in parallel. At every
//! support, point load and point moment two samples are emitted at the same x:
//! the left limit followed by the right limit, so a plot draws the jump as a
//! vertical segment.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io;
use std::path::Path;

use crate::physics::{InternalForceEvaluator, Side};
use crate::types::*;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagramSample {
    #[serde(rename = "x_m")]
    pub x: f64,
    #[serde(rename = "shear_kn")]
    pub shear: f64,
    #[serde(rename = "moment_kn_m")]
    pub moment: f64,
}

#[derive(Debug, Clone, Copy)]
enum Station {
    Regular(f64),
    Jump(f64, Side),
}

/// Sample V and M at `points` evenly spaced stations plus both sides of
/// every discontinuity, ordered by x
pub fn sample_diagrams(evaluator: &InternalForceEvaluator<'_>, points: usize) -> Vec<DiagramSample> {
    let length = evaluator.section().length();
    let jumps = evaluator.discontinuities();
    let points = points.max(2);
    let step = length / (points - 1) as f64;

    let mut stations: Vec<Station> = (0..points)
        .map(|i| (step * i as f64).min(length))
        .filter(|x| jumps.iter().all(|j| (j - x).abs() > POSITION_TOLERANCE))
        .map(Station::Regular)
        .collect();
    for &x in &jumps {
        stations.push(Station::Jump(x, Side::Left));
        stations.push(Station::Jump(x, Side::Right));
    }
    // Stable sort keeps each left limit ahead of its right limit
    stations.sort_by(|a, b| station_x(a).total_cmp(&station_x(b)));

    log::debug!("Sampling diagrams at {} stations ({} jumps)", stations.len(), jumps.len());

    stations
        .par_iter()
        .map(|station| match *station {
            Station::Regular(x) => DiagramSample {
                x,
                shear: evaluator.shear_raw(x, Side::Left),
                moment: evaluator.moment_raw(x, Side::Left, Side::Right),
            },
            Station::Jump(x, side) => DiagramSample {
                x,
                shear: evaluator.shear_raw(x, side),
                moment: evaluator.moment_raw(x, side, side),
            },
        })
        .collect()
}

fn station_x(station: &Station) -> f64 {
    match *station {
        Station::Regular(x) | Station::Jump(x, _) => x,
    }
}

/// Write samples as CSV with a header row
pub fn write_diagram_csv<W: io::Write>(writer: W, samples: &[DiagramSample]) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for sample in samples {
        csv_writer.serialize(sample)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn save_diagram_csv(path: impl AsRef<Path>, samples: &[DiagramSample]) -> Result<(), csv::Error> {
    write_diagram_csv(File::create(path)?, samples)
}

/// Read samples back from CSV written by [`write_diagram_csv`]
pub fn read_diagram_csv<R: io::Read>(reader: R) -> Result<Vec<DiagramSample>, csv::Error> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let samples = csv_reader.deserialize().collect::<Result<Vec<DiagramSample>, _>>()?;
    Ok(samples)
}

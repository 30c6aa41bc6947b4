//! JSON-lines persistence of network lists.
//!
//! Every line holds one self-contained record `{"nodes": N, "edges": [[source, destination,
//! interaction, gate], ...]}` (see [`Network`]). The order of lines is insignificant, blank
//! lines are skipped and an empty file is an empty list.

use crate::error::SearchError;
use crate::model::Network;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Write networks as JSON lines, returning the number of written records.
pub fn write_networks<'a, W, I>(mut writer: W, networks: I) -> Result<usize, SearchError>
where
    W: Write,
    I: IntoIterator<Item = &'a Network>,
{
    let mut count = 0;
    for network in networks {
        serde_json::to_writer(&mut writer, network)?;
        writeln!(writer)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// Read networks from JSON lines. Malformed records are reported with their line number.
pub fn read_networks<R: BufRead>(reader: R) -> Result<Vec<Network>, SearchError> {
    read_records(reader, None)
}

/// Create (or truncate) `path` and write networks into it.
pub fn write_networks_file<'a, I>(path: &Path, networks: I) -> Result<usize, SearchError>
where
    I: IntoIterator<Item = &'a Network>,
{
    write_networks(BufWriter::new(File::create(path)?), networks)
}

pub fn read_networks_file(path: &Path) -> Result<Vec<Network>, SearchError> {
    read_records(BufReader::new(File::open(path)?), Some(path))
}

/// Write network groups as `<group>:<json>` lines, groups numbered from zero.
pub fn write_groups<W: Write>(mut writer: W, groups: &[Vec<Network>]) -> Result<(), SearchError> {
    for (index, group) in groups.iter().enumerate() {
        for network in group {
            write!(writer, "{index}:")?;
            serde_json::to_writer(&mut writer, network)?;
            writeln!(writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn read_records<R: BufRead>(reader: R, path: Option<&Path>) -> Result<Vec<Network>, SearchError> {
    let mut result = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let network = serde_json::from_str::<Network>(&line).map_err(|e| SearchError::Record {
            path: path.map(Path::to_path_buf),
            line: index + 1,
            message: e.to_string(),
        })?;
        result.push(network);
    }
    Ok(result)
}

//! Reading and writing mesh snapshots.
//!
//! A snapshot is a text table: one header line, then one line per vertex
//! in creation-id order holding six comma-separated integers
//! `a,b,m,kind,k,n`. The format round-trips bit-exactly — numerators are
//! written in full decimal — so saving a loaded mesh reproduces the input
//! byte for byte.
//!
//! Diamond-kite snapshots may elide degree-3 vertices that are implied by
//! a degree-6 neighbor; [`load_diamond_snapshot`] runs the repair pass
//! that recreates them after loading.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use num_bigint::BigInt;
use tiling_refine::{DiamondMesh, KiteMesh};
use tiling_types::{LatticeValue, VertexRegistry};
use tracing::debug;

use crate::error::{SnapshotError, SnapshotResult};

/// Column header written in front of every snapshot.
const HEADER: &str = "a,b,m,kind,k,n";

/// One parsed snapshot line.
#[derive(Debug, Clone)]
pub struct SnapshotRecord {
    /// Numerator of the rational part.
    pub a: BigInt,
    /// Numerator of the `ω` part.
    pub b: BigInt,
    /// Scale exponent.
    pub m: u32,
    /// Vertex kind (degree or type code).
    pub kind: u8,
    /// Orientation index.
    pub k: u8,
    /// Refinement level.
    pub n: u32,
}

impl SnapshotRecord {
    /// The record's lattice coordinate.
    #[must_use]
    pub fn coord(&self) -> LatticeValue {
        LatticeValue::new(self.a.clone(), self.b.clone(), self.m)
    }
}

/// Write a registry as a snapshot table.
///
/// # Errors
///
/// Any I/O error from `writer`.
pub fn write_snapshot<W: Write>(registry: &VertexRegistry, mut writer: W) -> SnapshotResult<()> {
    writeln!(writer, "{HEADER}")?;
    for v in registry {
        let coord = v.coord();
        writeln!(
            writer,
            "{},{},{},{},{},{}",
            coord.a(),
            coord.b(),
            coord.m(),
            v.kind,
            v.k,
            v.n
        )?;
    }
    Ok(())
}

/// Save a registry as a snapshot file.
///
/// # Errors
///
/// Any I/O error while creating or writing the file.
pub fn save_snapshot<P: AsRef<Path>>(registry: &VertexRegistry, path: P) -> SnapshotResult<()> {
    let file = File::create(path)?;
    write_snapshot(registry, BufWriter::new(file))
}

/// Parse a snapshot into records, skipping the header line.
///
/// # Errors
///
/// [`SnapshotError::MalformedLine`] for any data line that does not hold
/// exactly six parseable integers.
pub fn read_snapshot<R: BufRead>(reader: R) -> SnapshotResult<Vec<SnapshotRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            continue;
        }
        records.push(parse_line(&line, idx + 1)?);
    }
    Ok(records)
}

fn parse_line(line: &str, number: usize) -> SnapshotResult<SnapshotRecord> {
    let malformed = || SnapshotError::MalformedLine { line: number };
    let fields: Vec<&str> = line.trim().split(',').collect();
    if fields.len() != 6 {
        return Err(malformed());
    }
    Ok(SnapshotRecord {
        a: fields[0].parse().map_err(|_| malformed())?,
        b: fields[1].parse().map_err(|_| malformed())?,
        m: fields[2].parse().map_err(|_| malformed())?,
        kind: fields[3].parse().map_err(|_| malformed())?,
        k: fields[4].parse().map_err(|_| malformed())?,
        n: fields[5].parse().map_err(|_| malformed())?,
    })
}

/// Rebuild a diamond-kite mesh from a snapshot, repairing implied
/// vertices.
///
/// # Errors
///
/// [`SnapshotError::MalformedLine`] on bad input;
/// [`SnapshotError::Repair`] if the loaded registry is not internally
/// consistent.
pub fn read_diamond<R: BufRead>(reader: R) -> SnapshotResult<DiamondMesh> {
    let mut mesh = DiamondMesh::new();
    for rec in read_snapshot(reader)? {
        mesh.insert_vertex(rec.coord(), rec.kind, rec.k, rec.n);
    }
    let added = mesh.add_implied_neighbors()?;
    debug!(
        "loaded diamond snapshot: {} vertices ({} repaired)",
        mesh.vertices().len(),
        added
    );
    Ok(mesh)
}

/// Load a diamond-kite mesh from a snapshot file.
///
/// # Errors
///
/// See [`read_diamond`], plus any file I/O error.
pub fn load_diamond_snapshot<P: AsRef<Path>>(path: P) -> SnapshotResult<DiamondMesh> {
    read_diamond(BufReader::new(File::open(path)?))
}

/// Rebuild a kite-fractal mesh from a snapshot.
///
/// Kite snapshots are complete; no repair pass is needed.
///
/// # Errors
///
/// [`SnapshotError::MalformedLine`] on bad input, or a file I/O error.
pub fn read_kite<R: BufRead>(reader: R) -> SnapshotResult<KiteMesh> {
    let mut mesh = KiteMesh::new();
    for rec in read_snapshot(reader)? {
        mesh.insert_vertex(rec.coord(), rec.kind, rec.k, rec.n);
    }
    debug!("loaded kite snapshot: {} vertices", mesh.vertices().len());
    Ok(mesh)
}

/// Load a kite-fractal mesh from a snapshot file.
///
/// # Errors
///
/// See [`read_kite`].
pub fn load_kite_snapshot<P: AsRef<Path>>(path: P) -> SnapshotResult<KiteMesh> {
    read_kite(BufReader::new(File::open(path)?))
}

//! Snapshot round-trip guarantees.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use tiling_io::{read_diamond, read_kite, write_snapshot};
use tiling_refine::{hex_base_mesh, kite_base_mesh, UniformDepth};

#[test]
fn diamond_snapshot_round_trips_byte_exactly() {
    let mut mesh = hex_base_mesh(2);
    mesh.refine(&mut UniformDepth::new(2), 2).unwrap();

    let mut first = Vec::new();
    write_snapshot(mesh.vertices(), &mut first).unwrap();

    let reloaded = read_diamond(first.as_slice()).unwrap();
    assert_eq!(reloaded.vertices().len(), mesh.vertices().len());

    let mut second = Vec::new();
    write_snapshot(reloaded.vertices(), &mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn kite_snapshot_round_trips_byte_exactly() {
    let mut mesh = kite_base_mesh().unwrap();
    mesh.refine(1).unwrap();

    let mut first = Vec::new();
    write_snapshot(mesh.vertices(), &mut first).unwrap();

    let reloaded = read_kite(first.as_slice()).unwrap();
    let mut second = Vec::new();
    write_snapshot(reloaded.vertices(), &mut second).unwrap();
    assert_eq!(first, second);
}

#[test]
fn elided_degree_three_vertices_are_repaired() {
    // a degree-6 vertex and its opposite ring; the six degree-3 star
    // vertices are implied and left out of the file
    let data = "\
a,b,m,kind,k,n
0,0,0,6,0,0
2,2,1,3,0,0
-2,4,1,3,0,0
-4,2,1,3,0,0
-2,-2,1,3,0,0
2,-4,1,3,0,0
4,-2,1,3,0,0
";
    let mesh = read_diamond(data.as_bytes()).unwrap();
    assert_eq!(mesh.vertices().len(), 13);

    // the repaired star resolves and carries the implied tags
    let root = mesh.vertices().ids().next().unwrap();
    let star = mesh.star(root).unwrap();
    assert_eq!(star.len(), 6);
    for (i, wid) in star.into_iter().enumerate() {
        let w = &mesh.vertices()[wid];
        assert_eq!(w.kind, 3);
        assert_eq!(usize::from(w.k), (6 + 2 * i) % 12);
        assert_eq!(w.n, 0);
    }
}

#[test]
fn reloading_a_snapshot_preserves_every_tag() {
    let mut mesh = hex_base_mesh(3);
    mesh.refine(&mut UniformDepth::new(1), 1).unwrap();

    let mut buf = Vec::new();
    write_snapshot(mesh.vertices(), &mut buf).unwrap();
    let reloaded = read_diamond(buf.as_slice()).unwrap();

    for (orig, back) in mesh.vertices().iter().zip(reloaded.vertices()) {
        assert_eq!(orig.id(), back.id());
        assert_eq!(orig.coord(), back.coord());
        assert_eq!(orig.kind, back.kind);
        assert_eq!(orig.k, back.k);
        assert_eq!(orig.n, back.n);
    }
}

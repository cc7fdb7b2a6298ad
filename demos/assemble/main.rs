//! Assembles a few hand-made multipolygon relations and prints the result.
//!
//! Usage:
//! ```text
//! cargo run --example assemble                           # debug trace of the assembler
//! RUST_LOG=osm_area=warn cargo run --example assemble    # results only
//! ```

use osm_area::{Assembler, AssemblerConfig, AreaError, Location, NodeRef, Relation, Way};

/// Builds a way from `(lon, lat)` pairs. Nodes at the same location get the
/// same id, like shared nodes in OSM data.
fn way(id: i64, coords: &[(f64, f64)]) -> Result<Way, AreaError> {
    let nodes = coords
        .iter()
        .map(|&(lon, lat)| {
            let location = Location::from_degrees(lon, lat)?;
            let node_id = i64::from(location.x()) * 1_000_000_000 + i64::from(location.y());
            Ok(NodeRef::new(node_id, location))
        })
        .collect::<Result<Vec<_>, AreaError>>()?;
    Ok(Way::new(id, nodes))
}

fn sample_relations() -> Result<Vec<(Relation, Vec<Way>)>, AreaError> {
    let park = Relation::new(100)
        .with_tag("type", "multipolygon")
        .with_tag("leisure", "park");
    let park_ways = vec![
        way(1, &[(13.40, 52.50), (13.42, 52.50), (13.42, 52.52)])?,
        way(2, &[(13.42, 52.52), (13.40, 52.52), (13.40, 52.50)])?,
        way(
            3,
            &[
                (13.405, 52.505),
                (13.410, 52.505),
                (13.410, 52.510),
                (13.405, 52.510),
                (13.405, 52.505),
            ],
        )?,
    ];

    let broken = Relation::new(200)
        .with_tag("type", "multipolygon")
        .with_tag("natural", "water");
    let broken_ways = vec![way(
        4,
        &[
            (13.50, 52.50),
            (13.52, 52.52),
            (13.52, 52.50),
            (13.50, 52.52),
            (13.50, 52.50),
        ],
    )?];

    Ok(vec![(park, park_ways), (broken, broken_ways)])
}

fn main() -> Result<(), AreaError> {
    // Default: WARN for everything, DEBUG for the assembler.
    // Override with RUST_LOG env var (e.g. RUST_LOG=osm_area=warn).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("osm_area=debug".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let relations = sample_relations()?;
    let mut assembler = Assembler::new(
        AssemblerConfig::default()
            .with_remember_problems(true)
            .with_debug(true),
    );
    let areas = assembler.assemble_all(
        relations
            .iter()
            .map(|(relation, ways)| (relation, ways.as_slice())),
    )?;

    for area in &areas {
        let (outer, inner) = area.num_rings();
        println!(
            "area {} (relation {}): valid={} outer={outer} inner={inner}",
            area.id,
            area.orig_id(),
            area.is_valid(),
        );
    }
    for problem in assembler.problems() {
        println!("problem: {problem}");
    }
    Ok(())
}

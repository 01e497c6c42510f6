//! Gevers dysbiosis index over a small in-memory table.
//!
//! Builds a sparse table of five OTUs across four samples, scores every
//! sample and prints the per-sample scores and a summary.

use dysbiosis_index::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let table = create_example_table()?;
    println!(
        "Table: {} observations x {} samples\n",
        table.n_observations(),
        table.n_samples()
    );

    let results: IndexResultSet = IndexConfig::gevers_2014().compute(&table)?.collect();

    println!("sample_id\tscore");
    for s in results.sorted_by_score() {
        println!("{}\t{:.4}", s.sample_id, s.score);
    }
    println!();
    print!("{}", results.summary());

    Ok(())
}

fn create_example_table() -> Result<AbundanceTable> {
    let lineages = [
        "k__Bacteria; p__Proteobacteria; c__Gammaproteobacteria; o__Enterobacteriales; f__Enterobacteriaceae",
        "k__Bacteria; p__Firmicutes; c__Negativicutes; o__Selenomonadales; f__Veillonellaceae",
        "k__Bacteria; p__Bacteroidetes; c__Bacteroidia; o__Bacteroidales; f__Bacteroidaceae",
        "k__Bacteria; p__Firmicutes; c__Clostridia; o__Clostridiales; f__Lachnospiraceae",
        "k__Bacteria; p__Tenericutes; c__Mollicutes; o__RF39; f__",
    ];

    // (observation, sample, count); S4 has no decreased taxa and scores NaN
    let triplets = [
        (0, 0, 120.0),
        (0, 1, 15.0),
        (0, 3, 40.0),
        (1, 0, 30.0),
        (1, 2, 5.0),
        (2, 0, 20.0),
        (2, 1, 300.0),
        (2, 2, 80.0),
        (3, 1, 150.0),
        (3, 2, 60.0),
        (4, 0, 10.0),
        (4, 3, 25.0),
    ];

    AbundanceTable::from_triplets(
        &triplets,
        (0..lineages.len()).map(|i| format!("OTU_{}", i + 1)).collect(),
        (1..=4).map(|i| format!("S{}", i)).collect(),
        lineages
            .iter()
            .map(|l| ObservationMetadata::new().with_lineage("taxonomy", l))
            .collect(),
    )
}

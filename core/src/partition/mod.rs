//! Partitioning of patient ids into test/validation/train subsets.

use crate::error::{BratsError, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// File the test ids are written to
pub const TEST_IDS_FILENAME: &str = "test_ids.txt";

/// File the validation ids are written to
pub const VALIDATION_IDS_FILENAME: &str = "validation_ids.txt";

/// Disjoint test/validation/train split of the patient ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    /// Held-out test ids
    pub test: Vec<String>,
    /// Held-out validation ids
    pub validation: Vec<String>,
    /// Remaining training ids; defined residually and never persisted
    pub train: Vec<String>,
}

/// Plans a random partition of `all_ids`
///
/// Shuffles a copy of the ids uniformly, takes the first `test_count` as
/// the test set and the next `validation_count` as the validation set; the
/// remainder is the train set. Passing a `seed` makes the partition
/// reproducible; without one a fresh entropy-seeded generator is used and
/// identical inputs may partition differently on every run.
///
/// # Errors
///
/// Returns [`BratsError::InsufficientIds`], before any file I/O, when
/// `test_count + validation_count` exceeds the number of ids.
pub fn plan_partition(
    all_ids: &[String],
    test_count: usize,
    validation_count: usize,
    seed: Option<u64>,
) -> Result<Partition> {
    let held_out = test_count + validation_count;
    if held_out > all_ids.len() {
        return Err(BratsError::InsufficientIds {
            requested: held_out,
            available: all_ids.len(),
        });
    }

    let mut ids = all_ids.to_vec();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    ids.shuffle(&mut rng);

    let train = ids.split_off(held_out);
    let validation = ids.split_off(test_count);
    let test = ids;
    debug!(
        "planned partition: {} test, {} validation, {} train",
        test.len(),
        validation.len(),
        train.len()
    );
    Ok(Partition {
        test,
        validation,
        train,
    })
}

/// Writes the held-out id lists under `output_dir`
///
/// Creates the output directory if absent (an existing directory is not
/// an error) and overwrites [`TEST_IDS_FILENAME`] and
/// [`VALIDATION_IDS_FILENAME`] from any previous run, newline-delimited.
/// The train ids are residual and deliberately not persisted; reading the
/// lists back is the loader's concern.
pub fn write_partition(partition: &Partition, output_dir: &Path) -> Result<()> {
    fs::create_dir_all(output_dir)?;

    let test_path = output_dir.join(TEST_IDS_FILENAME);
    fs::write(&test_path, partition.test.join("\n"))?;
    let validation_path = output_dir.join(VALIDATION_IDS_FILENAME);
    fs::write(&validation_path, partition.validation.join("\n"))?;

    info!(
        "wrote {} test ids and {} validation ids under {}",
        partition.test.len(),
        partition.validation.len(),
        output_dir.display()
    );
    Ok(())
}

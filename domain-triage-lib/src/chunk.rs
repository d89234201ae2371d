//! Chunk selection for split sweeps.
//!
//! Large candidate lists are swept in parallel by independent processes,
//! each taking one contiguous chunk of the sorted, deduplicated input.
//! The split is pure arithmetic over the slice: given the same input and
//! chunk count, every invocation sees the same partition, so per-chunk
//! result files line up run after run.

use crate::error::TriageError;

/// Select one chunk of a domain list.
///
/// The list is divided into `count` contiguous chunks that cover it
/// exactly; when the length doesn't divide evenly, the leading chunks
/// take one extra domain each. Chunks can be empty when `count` exceeds
/// the list length.
///
/// # Arguments
///
/// * `domains` - The full (sorted, deduplicated) candidate list
/// * `index` - Zero-based chunk to select
/// * `count` - Total number of chunks the list is being split into
///
/// # Errors
///
/// Returns `TriageError::ChunkError` when `count` is zero or `index`
/// is out of range.
pub fn chunk_slice(
    domains: &[String],
    index: usize,
    count: usize,
) -> Result<&[String], TriageError> {
    if count == 0 {
        return Err(TriageError::chunk(index, count, "chunk count must be at least 1"));
    }
    if index >= count {
        return Err(TriageError::chunk(
            index,
            count,
            "chunk index must be less than chunk count",
        ));
    }

    let base = domains.len() / count;
    let remainder = domains.len() % count;

    // Chunks [0, remainder) hold base+1 domains, the rest hold base
    let start = index * base + index.min(remainder);
    let size = base + usize::from(index < remainder);

    Ok(&domains[start..start + size])
}

/// Build the per-chunk result file name consumed by the merge step.
///
/// `chunk_file_name("active", 2, 8)` yields `active.part-2of8.txt`,
/// matching the `--chunk-index 2 --chunk-count 8` invocation that
/// produced it.
pub fn chunk_file_name(stem: &str, index: usize, count: usize) -> String {
    format!("{}.part-{}of{}.txt", stem, index, count)
}

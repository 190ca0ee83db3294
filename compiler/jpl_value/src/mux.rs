//! Cartesian multiplexing over candidate lists.

/// Call `f` once for every combination of one element from each list and
/// concatenate the results.
///
/// Combinations are visited in row-major order with the last list varying
/// fastest. No lists means a single call with an empty slice; any empty list
/// means no calls. The first error aborts the remaining combinations.
pub fn mux<T, R, E>(
    lists: &[Vec<T>],
    mut f: impl FnMut(&[&T]) -> Result<Vec<R>, E>,
) -> Result<Vec<R>, E> {
    if lists.iter().any(Vec::is_empty) {
        return Ok(Vec::new());
    }

    let mut indices = vec![0usize; lists.len()];
    let mut out = Vec::new();
    loop {
        let row: Vec<&T> = lists
            .iter()
            .zip(&indices)
            .map(|(list, &i)| &list[i])
            .collect();
        out.extend(f(&row)?);

        let mut advanced = false;
        for slot in (0..lists.len()).rev() {
            indices[slot] += 1;
            if indices[slot] < lists[slot].len() {
                advanced = true;
                break;
            }
            indices[slot] = 0;
        }
        if !advanced {
            return Ok(out);
        }
    }
}

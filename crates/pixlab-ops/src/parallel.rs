//! Row-parallel dispatch using Rayon.
//!
//! Filters write their output one row at a time. [`for_each_row`] hands each
//! row slice to exactly one task, so the parallel and serial paths compute
//! the same values in the same order within a row.
//!
//! Without the `parallel` feature the `parallel` flag is ignored and rows are
//! processed sequentially.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calls `f(y, row)` for every `row_len`-sized row of `dst`.
pub fn for_each_row<T, F>(dst: &mut [T], row_len: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    if row_len == 0 {
        return;
    }

    #[cfg(feature = "parallel")]
    {
        if parallel {
            dst.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| f(y, row));
            return;
        }
    }

    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for (y, row) in dst.chunks_mut(row_len).enumerate() {
        f(y, row);
    }
}

/// Builds a `len`-sample buffer by filling it row by row.
pub fn collect_rows<T, F>(len: usize, row_len: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send + Default + Clone,
    F: Fn(usize, &mut [T]) + Sync + Send,
{
    let mut dst = vec![T::default(); len];
    for_each_row(&mut dst, row_len, parallel, f);
    dst
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_row_visited_once() {
        let rows = collect_rows::<usize, _>(12, 4, true, |y, row| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = y * 10 + x;
            }
        });
        assert_eq!(rows, vec![0, 1, 2, 3, 10, 11, 12, 13, 20, 21, 22, 23]);
    }

    #[test]
    fn test_serial_matches_parallel() {
        let f = |y: usize, row: &mut [f64]| {
            for (x, v) in row.iter_mut().enumerate() {
                *v = ((x * 31 + y * 17) as f64).sqrt();
            }
        };
        let a = collect_rows(64 * 9, 64, true, f);
        let b = collect_rows(64 * 9, 64, false, f);
        assert_eq!(a, b);
    }
}

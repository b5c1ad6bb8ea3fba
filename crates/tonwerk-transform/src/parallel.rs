// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Row-parallel helpers. Every output pixel is written exactly once from
// read-only inputs, so rows can be sharded across the rayon pool with no
// synchronisation beyond the final join.

use rayon::prelude::*;
use tonwerk_core::Raster;

/// Minimum number of output samples before work is split across threads.
pub(crate) const PARALLEL_THRESHOLD: usize = 30_000;

/// Fill `out` row by row. `fill(y, row)` receives the row index and the
/// mutable row slice of length `width`.
pub(crate) fn fill_rows<T, F>(out: &mut [T], width: usize, fill: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if out.len() >= PARALLEL_THRESHOLD {
        out.par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| fill(y, row));
    } else {
        for (y, row) in out.chunks_mut(width).enumerate() {
            fill(y, row);
        }
    }
}

/// Apply `f` to every sample of `src`, writing into a freshly allocated
/// raster of the same shape.
pub(crate) fn map_raster<T, U, F>(src: &Raster<T>, f: F) -> Raster<U>
where
    T: Copy + Sync,
    U: Copy + Send + Default,
    F: Fn(T) -> U + Sync,
{
    let mut out = src.blank_like(U::default());
    fill_rows(out.samples_mut(), src.width(), |y, row| {
        for (dst, &sample) in row.iter_mut().zip(src.row(y)) {
            *dst = f(sample);
        }
    });
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rows_visits_every_row_once_sequential() {
        let mut buf = vec![0usize; 4 * 3];
        fill_rows(&mut buf, 4, |y, row| row.iter_mut().for_each(|v| *v += y + 1));
        assert_eq!(buf, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3]);
    }

    #[test]
    fn fill_rows_parallel_path_matches_row_index() {
        let width = 300;
        let height = PARALLEL_THRESHOLD / width + 1;
        let mut buf = vec![0usize; width * height];
        fill_rows(&mut buf, width, |y, row| row.iter_mut().for_each(|v| *v = y));
        for (y, row) in buf.chunks(width).enumerate() {
            assert!(row.iter().all(|&v| v == y));
        }
    }

    #[test]
    fn map_raster_preserves_shape() {
        let src = Raster::from_fn(7, 5, |x, y| (x * y) as u8).unwrap();
        let out = map_raster(&src, |s| u16::from(s) * 2);
        assert!(out.same_shape(&src));
        assert_eq!(out.get(6, 4), 48);
    }
}

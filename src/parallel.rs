//! Parallel vs sequential fan-out over a slice.
//!
//! The `cfg(feature = "parallel")` switch lives here so phase code in the
//! market engine stays free of it. Output order always matches input order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Maps `f` over `slice`, on rayon when enabled and `sequential` is false.
pub(crate) fn map_slice<T, F, R>(slice: &[T], f: F, sequential: bool) -> Vec<R>
where
    T: Sync,
    F: Fn(&T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if sequential {
            slice.iter().map(f).collect()
        } else {
            slice.par_iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = sequential;
        slice.iter().map(f).collect()
    }
}

/// Like [`map_slice`], passing each element's index alongside it.
pub(crate) fn map_indexed<T, F, R>(slice: &[T], f: F, sequential: bool) -> Vec<R>
where
    T: Sync,
    F: Fn(usize, &T) -> R + Sync + Send,
    R: Send,
{
    #[cfg(feature = "parallel")]
    {
        if sequential {
            slice.iter().enumerate().map(|(i, x)| f(i, x)).collect()
        } else {
            slice.par_iter().enumerate().map(|(i, x)| f(i, x)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let _ = sequential;
        slice.iter().enumerate().map(|(i, x)| f(i, x)).collect()
    }
}

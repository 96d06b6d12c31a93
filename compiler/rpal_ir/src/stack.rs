//! Stack guard for walks whose depth follows the program.
//!
//! The tree reader, standardizer and generator recurse once per tree level,
//! and runtime values recurse once per nested tuple or captured closure when
//! they are compared, rendered or freed. All of them call through here so a
//! deep `where` chain or a list built by recursion runs on heap-allocated
//! stack segments instead of aborting the process.

/// Call `f` on the current stack if at least `MARGIN` bytes are left,
/// otherwise on a fresh `SEGMENT`-byte segment.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    const MARGIN: usize = 96 * 1024;
    const SEGMENT: usize = 2 * 1024 * 1024;

    stacker::maybe_grow(MARGIN, SEGMENT, f)
}

/// `stacker` cannot switch stacks on wasm32.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::ensure_sufficient_stack;

    /// A tree shaped like `tau(tau(tau(...)))`, as nested boxes.
    enum Nest {
        Leaf,
        Inner(Box<Nest>),
    }

    fn depth_of(nest: &Nest) -> usize {
        ensure_sufficient_stack(|| match nest {
            Nest::Leaf => 0,
            Nest::Inner(inner) => depth_of(inner) + 1,
        })
    }

    #[test]
    fn deep_walks_complete() {
        let mut nest = Nest::Leaf;
        for _ in 0..100_000 {
            nest = Nest::Inner(Box::new(nest));
        }
        assert_eq!(depth_of(&nest), 100_000);

        // Freeing the boxes recursively would overflow; unwind by hand.
        while let Nest::Inner(inner) = nest {
            nest = *inner;
        }
    }

    #[test]
    fn results_pass_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("underflow"));
        assert_eq!(result, Err("underflow"));
    }
}

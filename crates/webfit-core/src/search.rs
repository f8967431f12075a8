//! Quality search: the highest ladder quality whose encoding fits the budget.
//!
//! The search is generic over the encoder so it can be driven by libwebp in
//! the pipeline and by a size model in tests. Only the most recent encoding
//! (and, for bisection, the best fit so far) is kept in memory.

use tracing::debug;

use crate::config::{ConfigError, SearchStrategy};

/// The encoding chosen by [`search_quality`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Encoded bytes at `quality`.
    pub bytes: Vec<u8>,
    /// Quality the bytes were encoded at.
    pub quality: u8,
    /// False when no ladder quality fit and the lowest one was returned.
    pub budget_met: bool,
    /// Number of encoder invocations.
    pub attempts: u32,
}

/// Search `ladder` (highest quality first) for the best encoding under `budget`.
///
/// With [`SearchStrategy::Linear`] each quality is tried in order and the
/// first fit wins. With [`SearchStrategy::Bisect`] the ladder is binary
/// searched on the assumption that size does not grow as quality drops.
///
/// When nothing fits, the encoding at the last ladder quality is returned
/// with `budget_met = false`. This is not an error.
///
/// # Errors
///
/// Propagates the first encoder error. Returns `ConfigError::EmptyLadder`
/// (converted into `E`) when `ladder` is empty.
pub fn search_quality<F, E>(
    ladder: &[u8],
    budget: usize,
    strategy: SearchStrategy,
    encode: F,
) -> Result<SearchOutcome, E>
where
    F: FnMut(u8) -> Result<Vec<u8>, E>,
    E: From<ConfigError>,
{
    if ladder.is_empty() {
        return Err(ConfigError::EmptyLadder.into());
    }

    let outcome = match strategy {
        SearchStrategy::Linear => linear(ladder, budget, encode)?,
        SearchStrategy::Bisect => bisect(ladder, budget, encode)?,
    };

    if !outcome.budget_met {
        debug!(
            quality = outcome.quality,
            size = outcome.bytes.len(),
            budget,
            "Quality floor reached without meeting the byte budget"
        );
    }

    Ok(outcome)
}

fn linear<F, E>(ladder: &[u8], budget: usize, mut encode: F) -> Result<SearchOutcome, E>
where
    F: FnMut(u8) -> Result<Vec<u8>, E>,
    E: From<ConfigError>,
{
    let mut attempts = 0;
    let mut last: Option<(u8, Vec<u8>)> = None;

    for &quality in ladder {
        let bytes = encode(quality)?;
        attempts += 1;
        debug!(quality, size = bytes.len(), "Encoded attempt");

        if bytes.len() <= budget {
            return Ok(SearchOutcome {
                bytes,
                quality,
                budget_met: true,
                attempts,
            });
        }
        last = Some((quality, bytes));
    }

    let (quality, bytes) = last.ok_or(ConfigError::EmptyLadder)?;
    Ok(SearchOutcome {
        bytes,
        quality,
        budget_met: false,
        attempts,
    })
}

fn bisect<F, E>(ladder: &[u8], budget: usize, mut encode: F) -> Result<SearchOutcome, E>
where
    F: FnMut(u8) -> Result<Vec<u8>, E>,
    E: From<ConfigError>,
{
    let mut attempts = 0;
    // Invariant: every index below `lo` overflows, `hi` fits (or is past the end).
    let (mut lo, mut hi) = (0usize, ladder.len());
    let mut best: Option<Vec<u8>> = None;
    let mut lowest: Option<Vec<u8>> = None;

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let quality = ladder[mid];
        let bytes = encode(quality)?;
        attempts += 1;
        debug!(quality, size = bytes.len(), "Encoded attempt");

        if bytes.len() <= budget {
            best = Some(bytes);
            hi = mid;
        } else {
            if mid == ladder.len() - 1 {
                lowest = Some(bytes);
            }
            lo = mid + 1;
        }
    }

    if let Some(bytes) = best {
        return Ok(SearchOutcome {
            bytes,
            quality: ladder[hi],
            budget_met: true,
            attempts,
        });
    }

    let quality = ladder[ladder.len() - 1];
    let bytes = match lowest {
        Some(bytes) => bytes,
        None => {
            attempts += 1;
            encode(quality)?
        }
    };
    Ok(SearchOutcome {
        bytes,
        quality,
        budget_met: false,
        attempts,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::config::OptimizeConfig;
    use proptest::prelude::*;

    proptest! {
        /// Property: Linear search returns the highest fitting quality, or the lowest on exhaustion.
        #[test]
        fn prop_linear_returns_highest_fit(
            budget in 1usize..=200_000,
            scale in 1usize..=2000,
        ) {
            let ladder = OptimizeConfig::default().ladder();
            let size = |q: u8| q as usize * scale;
            let outcome = search_quality(&ladder, budget, SearchStrategy::Linear, |q| {
                Ok::<_, ConfigError>(vec![0u8; size(q)])
            }).unwrap();

            match ladder.iter().copied().find(|&q| size(q) <= budget) {
                Some(expected) => {
                    prop_assert_eq!(outcome.quality, expected);
                    prop_assert!(outcome.budget_met);
                }
                None => {
                    prop_assert_eq!(outcome.quality, 7);
                    prop_assert!(!outcome.budget_met);
                }
            }
            prop_assert!((5..=95).contains(&outcome.quality));
            prop_assert_eq!((95 - outcome.quality) % 2, 0);
        }

        /// Property: Bisection agrees with the linear scan when size is monotone in quality.
        #[test]
        fn prop_bisect_agrees_with_linear(
            budget in 1usize..=200_000,
            scale in 1usize..=2000,
            base in 0usize..=5000,
        ) {
            let ladder = OptimizeConfig::default().ladder();
            let encode = |q: u8| Ok::<_, ConfigError>(vec![0u8; base + q as usize * scale]);

            let linear = search_quality(&ladder, budget, SearchStrategy::Linear, encode).unwrap();
            let bisect = search_quality(&ladder, budget, SearchStrategy::Bisect, encode).unwrap();

            prop_assert_eq!(linear.quality, bisect.quality);
            prop_assert_eq!(linear.budget_met, bisect.budget_met);
            prop_assert!(bisect.attempts <= linear.attempts.max(7));
        }
    }
}

use rand::Rng;

use crate::error::{Error, Result};
use crate::mapping::{BandTable, DrawKind};
use crate::state::DrawSource;

/// Largest customer count a single run accepts.
pub const MAX_CUSTOMERS: usize = 100_000;

/// The two random-number sequences that drive one queue run.
///
/// Construction validates everything up front, so a stream that exists is
/// always exactly `len()` long with every draw inside its domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomNumberStream {
    iat_draws: Vec<u32>,
    st_draws: Vec<u32>,
    iat_source: DrawSource,
    st_source: DrawSource,
}

impl RandomNumberStream {
    /// Uses the supplied sequences where given and draws the rest from `rng`,
    /// inter-arrival draws first.
    pub fn new<R: Rng>(
        n: usize,
        rn_iat: Option<&[u32]>,
        rn_st: Option<&[u32]>,
        rng: &mut R,
    ) -> Result<Self> {
        if n == 0 || n > MAX_CUSTOMERS {
            return Err(Error::InvalidCount {
                count: n,
                max: MAX_CUSTOMERS,
            });
        }
        if let Some(draws) = rn_iat {
            validate(DrawKind::InterArrival, n, draws)?;
        }
        if let Some(draws) = rn_st {
            validate(DrawKind::Service, n, draws)?;
        }

        let (iat_draws, iat_source) = match rn_iat {
            Some(draws) => (draws.to_vec(), DrawSource::Supplied),
            None => (
                generate(DrawKind::InterArrival, n, rng),
                DrawSource::Generated,
            ),
        };
        let (st_draws, st_source) = match rn_st {
            Some(draws) => (draws.to_vec(), DrawSource::Supplied),
            None => (generate(DrawKind::Service, n, rng), DrawSource::Generated),
        };

        Ok(Self {
            iat_draws,
            st_draws,
            iat_source,
            st_source,
        })
    }

    pub fn len(&self) -> usize {
        self.iat_draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.iat_draws.is_empty()
    }

    pub fn iat_draws(&self) -> &[u32] {
        &self.iat_draws
    }

    pub fn st_draws(&self) -> &[u32] {
        &self.st_draws
    }

    pub fn iat_source(&self) -> DrawSource {
        self.iat_source
    }

    pub fn st_source(&self) -> DrawSource {
        self.st_source
    }

    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.iat_draws
            .iter()
            .copied()
            .zip(self.st_draws.iter().copied())
    }
}

fn validate(kind: DrawKind, n: usize, draws: &[u32]) -> Result<()> {
    if draws.len() != n {
        return Err(Error::LengthMismatch {
            stream: kind,
            expected: n,
            actual: draws.len(),
        });
    }
    let table = BandTable::for_kind(kind);
    draws.iter().try_for_each(|&rn| table.check(rn))
}

fn generate<R: Rng>(kind: DrawKind, n: usize, rng: &mut R) -> Vec<u32> {
    let table = BandTable::for_kind(kind);
    let (min, max) = (table.min, table.max());
    (0..n).map(|_| rng.gen_range(min..=max)).collect()
}

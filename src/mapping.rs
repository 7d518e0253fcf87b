//! Fixed empirical distributions that turn a uniform integer draw into a
//! discretized inter-arrival or service time.
//!
//! Each table is a piecewise-constant inverse CDF: a sorted list of
//! `(inclusive upper bound, value)` bands covering the whole domain.

use std::fmt;

use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DrawKind {
    InterArrival,
    Service,
}

impl fmt::Display for DrawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawKind::InterArrival => write!(f, "IAT"),
            DrawKind::Service => write!(f, "ST"),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Band {
    pub upper: u32,
    pub value: u64,
}

const fn band(upper: u32, value: u64) -> Band {
    Band { upper, value }
}

const INTER_ARRIVAL_BANDS: [Band; 8] = [
    band(125, 1),
    band(250, 2),
    band(375, 3),
    band(500, 4),
    band(625, 5),
    band(750, 6),
    band(875, 7),
    band(1000, 8),
];

const SERVICE_BANDS: [Band; 6] = [
    band(29, 1),
    band(49, 2),
    band(59, 3),
    band(64, 4),
    band(74, 5),
    band(100, 6),
];

pub const INTER_ARRIVAL: BandTable = BandTable {
    kind: DrawKind::InterArrival,
    min: 1,
    bands: &INTER_ARRIVAL_BANDS,
};

pub const SERVICE: BandTable = BandTable {
    kind: DrawKind::Service,
    min: 1,
    bands: &SERVICE_BANDS,
};

#[derive(Clone, Copy, Debug)]
pub struct BandTable {
    pub kind: DrawKind,
    pub min: u32,
    pub bands: &'static [Band],
}

impl BandTable {
    pub fn for_kind(kind: DrawKind) -> &'static BandTable {
        match kind {
            DrawKind::InterArrival => &INTER_ARRIVAL,
            DrawKind::Service => &SERVICE,
        }
    }

    /// Largest accepted draw; the last band's upper bound.
    pub fn max(&self) -> u32 {
        self.bands.last().map(|band| band.upper).unwrap_or(self.min)
    }

    pub fn contains(&self, rn: u32) -> bool {
        (self.min..=self.max()).contains(&rn)
    }

    pub fn check(&self, rn: u32) -> Result<()> {
        if self.contains(rn) {
            Ok(())
        } else {
            Err(Error::Domain {
                stream: self.kind,
                value: rn,
                min: self.min,
                max: self.max(),
            })
        }
    }

    pub fn map(&self, rn: u32) -> Result<u64> {
        self.check(rn)?;
        self.bands
            .iter()
            .find(|band| rn <= band.upper)
            .map(|band| band.value)
            .ok_or_else(|| Error::Domain {
                stream: self.kind,
                value: rn,
                min: self.min,
                max: self.max(),
            })
    }

    /// Each band with its lower bound and the probability of a uniform draw
    /// landing in it.
    pub fn ranges(&self) -> Vec<(u32, u32, u64, f64)> {
        let span = f64::from(self.max() - self.min + 1);
        let mut lower = self.min;
        self.bands
            .iter()
            .map(|band| {
                let width = band.upper - lower + 1;
                let entry = (lower, band.upper, band.value, f64::from(width) / span);
                lower = band.upper + 1;
                entry
            })
            .collect()
    }
}

pub fn map_inter_arrival(rn: u32) -> Result<u64> {
    INTER_ARRIVAL.map(rn)
}

pub fn map_service_time(rn: u32) -> Result<u64> {
    SERVICE.map(rn)
}

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::mapping::{map_inter_arrival, map_service_time};
use crate::models::QueueConfig;
use crate::state::{seed_label, CustomerRecord, RunMetadata, SimulationResult};
use crate::stream::RandomNumberStream;
use crate::summary::compute_summary;

pub struct SimulationEngine {
    pub config: QueueConfig,
    pub rng: StdRng,
}

impl SimulationEngine {
    pub fn new(config: QueueConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn run(&mut self) -> Result<SimulationResult> {
        let stream = RandomNumberStream::new(
            self.config.customers,
            self.config.rn_iat.as_deref(),
            self.config.rn_st.as_deref(),
            &mut self.rng,
        )?;
        log::debug!(
            "queue run: customers={} rn_iat={} rn_st={} seed={}",
            stream.len(),
            stream.iat_source(),
            stream.st_source(),
            seed_label(self.config.seed)
        );

        let records = simulate_stream(&stream)?;
        let summary = compute_summary(&records)?;
        log::info!(
            "queue run complete: customers={} horizon_end={} utilization={:.4}",
            records.len(),
            summary.horizon_end,
            summary.utilization
        );

        Ok(SimulationResult {
            metadata: RunMetadata {
                customers: records.len(),
                seed: seed_label(self.config.seed),
                rn_iat: stream.iat_source(),
                rn_st: stream.st_source(),
            },
            records,
            summary,
        })
    }
}

pub fn run_simulation(config: &QueueConfig) -> Result<SimulationResult> {
    let mut engine = SimulationEngine::new(config.clone());
    engine.run()
}

/// Validates the inputs, fills in any missing draws from `rng`, and runs the
/// recurrence. Nothing is computed unless every check passes.
pub fn simulate_queue<R: Rng>(
    n: usize,
    rn_iat: Option<&[u32]>,
    rn_st: Option<&[u32]>,
    rng: &mut R,
) -> Result<Vec<CustomerRecord>> {
    let stream = RandomNumberStream::new(n, rn_iat, rn_st, rng)?;
    simulate_stream(&stream)
}

/// Single forward pass over the stream. The only state carried between
/// customers is the previous service end time.
pub fn simulate_stream(stream: &RandomNumberStream) -> Result<Vec<CustomerRecord>> {
    let mut records = Vec::with_capacity(stream.len());
    let mut arrival_time = 0u64;
    let mut previous_end: Option<u64> = None;

    for (idx, (rn_iat, rn_st)) in stream.pairs().enumerate() {
        let mapped_iat = map_inter_arrival(rn_iat)?;
        let service_time = map_service_time(rn_st)?;

        let record = match previous_end {
            None => CustomerRecord {
                cust_index: idx + 1,
                rn_iat,
                inter_arrival_time: 0,
                arrival_time: 0,
                rn_st,
                service_time,
                service_start_time: 0,
                wait_time: 0,
                service_end_time: service_time,
                time_in_system: service_time,
                server_idle_time: 0,
            },
            Some(prev_end) => {
                arrival_time += mapped_iat;
                let service_start_time = prev_end.max(arrival_time);
                let wait_time = service_start_time - arrival_time;
                CustomerRecord {
                    cust_index: idx + 1,
                    rn_iat,
                    inter_arrival_time: mapped_iat,
                    arrival_time,
                    rn_st,
                    service_time,
                    service_start_time,
                    wait_time,
                    service_end_time: service_start_time + service_time,
                    time_in_system: service_time + wait_time,
                    server_idle_time: service_start_time.saturating_sub(prev_end),
                }
            }
        };

        previous_end = Some(record.service_end_time);
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::state::DrawSource;

    fn column(records: &[CustomerRecord], f: impl Fn(&CustomerRecord) -> u64) -> Vec<u64> {
        records.iter().map(f).collect()
    }

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn back_to_back_customers_never_wait_or_idle() {
        let records =
            simulate_queue(3, Some(&[1, 1, 1][..]), Some(&[1, 1, 1][..]), &mut seeded()).unwrap();

        assert_eq!(column(&records, |r| r.inter_arrival_time), vec![0, 1, 1]);
        assert_eq!(column(&records, |r| r.arrival_time), vec![0, 1, 2]);
        assert_eq!(column(&records, |r| r.service_time), vec![1, 1, 1]);
        assert_eq!(column(&records, |r| r.service_start_time), vec![0, 1, 2]);
        assert_eq!(column(&records, |r| r.wait_time), vec![0, 0, 0]);
        assert_eq!(column(&records, |r| r.service_end_time), vec![1, 2, 3]);
        assert_eq!(column(&records, |r| r.server_idle_time), vec![0, 0, 0]);

        let summary = compute_summary(&records).unwrap();
        assert_eq!(summary.utilization, 1.0);
        assert_eq!(summary.horizon_end, 3);
    }

    #[test]
    fn late_arrival_leaves_server_idle() {
        let records = simulate_queue(
            2,
            Some(&[500, 1000][..]),
            Some(&[1, 100][..]),
            &mut seeded(),
        )
        .unwrap();

        assert_eq!(column(&records, |r| r.inter_arrival_time), vec![0, 8]);
        assert_eq!(column(&records, |r| r.arrival_time), vec![0, 8]);
        assert_eq!(column(&records, |r| r.service_time), vec![1, 6]);
        assert_eq!(column(&records, |r| r.service_start_time), vec![0, 8]);
        assert_eq!(column(&records, |r| r.wait_time), vec![0, 0]);
        assert_eq!(column(&records, |r| r.service_end_time), vec![1, 14]);
        assert_eq!(column(&records, |r| r.server_idle_time), vec![0, 7]);

        let summary = compute_summary(&records).unwrap();
        assert_eq!(summary.utilization, 0.5);
        assert_eq!(summary.horizon_end, 14);
    }

    #[test]
    fn busy_server_makes_customers_wait() {
        let records = simulate_queue(
            3,
            Some(&[900, 1, 1][..]),
            Some(&[100, 100, 1][..]),
            &mut seeded(),
        )
        .unwrap();

        assert_eq!(column(&records, |r| r.arrival_time), vec![0, 1, 2]);
        assert_eq!(column(&records, |r| r.service_start_time), vec![0, 6, 12]);
        assert_eq!(column(&records, |r| r.wait_time), vec![0, 5, 10]);
        assert_eq!(column(&records, |r| r.time_in_system), vec![6, 11, 11]);
        assert_eq!(column(&records, |r| r.service_end_time), vec![6, 12, 13]);
    }

    #[test]
    fn single_customer_has_no_wait_or_idle() {
        let records = simulate_queue(1, Some(&[777][..]), Some(&[70][..]), &mut seeded()).unwrap();
        assert_eq!(records.len(), 1);
        let only = &records[0];
        assert_eq!(only.cust_index, 1);
        assert_eq!(only.inter_arrival_time, 0);
        assert_eq!(only.wait_time, 0);
        assert_eq!(only.server_idle_time, 0);
        assert_eq!(only.service_time, 5);
        assert_eq!(only.service_end_time, 5);
        assert_eq!(only.time_in_system, 5);
    }

    #[test]
    fn length_mismatch_produces_no_records() {
        let result = simulate_queue(5, Some(&[1, 2, 3, 4][..]), None, &mut seeded());
        assert!(matches!(result, Err(Error::LengthMismatch { .. })));
    }

    #[test]
    fn zero_customers_fails() {
        let result = simulate_queue(0, None, None, &mut seeded());
        assert!(matches!(result, Err(Error::InvalidCount { count: 0, .. })));
    }

    #[test]
    fn generated_runs_satisfy_queue_invariants() {
        for seed in 0..25u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let records = simulate_queue(200, None, None, &mut rng).unwrap();

            let first = &records[0];
            assert_eq!(first.inter_arrival_time, 0);
            assert_eq!(first.arrival_time, 0);
            assert_eq!(first.wait_time, 0);
            assert_eq!(first.server_idle_time, 0);

            for pair in records.windows(2) {
                let (prev, cur) = (&pair[0], &pair[1]);
                assert!(cur.arrival_time >= prev.arrival_time);
                assert_eq!(cur.arrival_time, prev.arrival_time + cur.inter_arrival_time);
                assert_eq!(
                    cur.service_start_time,
                    prev.service_end_time.max(cur.arrival_time)
                );
                assert_eq!(cur.wait_time, cur.service_start_time - cur.arrival_time);
                assert_eq!(cur.service_end_time, cur.service_start_time + cur.service_time);
                assert_eq!(cur.time_in_system, cur.service_time + cur.wait_time);
                assert!(!(cur.wait_time > 0 && cur.server_idle_time > 0));
            }

            let summary = compute_summary(&records).unwrap();
            assert!((0.0..=1.0).contains(&summary.utilization));
            assert_eq!(summary.horizon_end, records[199].service_end_time);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let config = QueueConfig {
            customers: 50,
            rn_iat: None,
            rn_st: None,
            seed: Some(9),
        };
        let a = run_simulation(&config).unwrap();
        let b = run_simulation(&config).unwrap();
        assert_eq!(a.records, b.records);
        assert_eq!(a.metadata.seed, "seeded(9)");
        assert_eq!(a.metadata.rn_iat, DrawSource::Generated);
    }

    #[test]
    fn run_reports_supplied_streams() {
        let config = QueueConfig {
            customers: 2,
            rn_iat: Some(vec![500, 1000]),
            rn_st: Some(vec![1, 100]),
            seed: None,
        };
        let result = run_simulation(&config).unwrap();
        assert_eq!(result.metadata.customers, 2);
        assert_eq!(result.metadata.seed, "entropy");
        assert_eq!(result.metadata.rn_iat, DrawSource::Supplied);
        assert_eq!(result.metadata.rn_st, DrawSource::Supplied);
        assert_eq!(result.summary.total_idle_time, 7);
    }
}

use crate::error::{Error, Result};
use crate::state::{CustomerRecord, SummaryStatistics};

pub fn compute_summary(records: &[CustomerRecord]) -> Result<SummaryStatistics> {
    let last = records.last().ok_or(Error::EmptyInput)?;

    let total_wait: u64 = records.iter().map(|record| record.wait_time).sum();
    let maximum_wait = records
        .iter()
        .map(|record| record.wait_time)
        .max()
        .unwrap_or(0);
    let total_idle_time: u64 = records.iter().map(|record| record.server_idle_time).sum();
    let total_service_time: u64 = records.iter().map(|record| record.service_time).sum();

    let busy_and_idle = total_service_time + total_idle_time;
    let utilization = if busy_and_idle == 0 {
        0.0
    } else {
        total_service_time as f64 / busy_and_idle as f64
    };

    Ok(SummaryStatistics {
        average_wait: total_wait as f64 / records.len() as f64,
        maximum_wait,
        total_idle_time,
        total_service_time,
        utilization,
        horizon_end: last.service_end_time,
    })
}

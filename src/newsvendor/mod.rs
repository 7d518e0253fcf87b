//! Newsvendor Monte Carlo: each simulated day draws a day type, then a
//! demand level conditioned on that type, and books the profit of a fixed
//! order against it. Days are independent; the only running value is the
//! cumulative profit.

mod cdf;

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::models::NewsvendorConfig;
use crate::state::{
    seed_label, DayRecord, DayTypeProfit, NewsvendorMetadata, NewsvendorResult, NewsvendorSummary,
};

pub use cdf::CumulativeTable;

/// Longest horizon a single run accepts.
pub const MAX_DAYS: usize = 100_000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Prices {
    pub selling: f64,
    pub cost: f64,
    pub salvage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DailyOutcome {
    pub sold: u32,
    pub unsold: u32,
    pub unmet: u32,
    pub revenue: f64,
    pub cost: f64,
    pub salvage: f64,
    pub lost_profit: f64,
    pub profit: f64,
}

/// Books one day. Lost profit is always reported; it only reduces `profit`
/// when `include_lost_profit` is set.
pub fn daily_outcome(
    demand: u32,
    order_quantity: u32,
    prices: Prices,
    include_lost_profit: bool,
) -> DailyOutcome {
    let sold = demand.min(order_quantity);
    let unsold = order_quantity.saturating_sub(demand);
    let unmet = demand.saturating_sub(order_quantity);

    let revenue = f64::from(sold) * prices.selling;
    let cost = f64::from(order_quantity) * prices.cost;
    let salvage = f64::from(unsold) * prices.salvage;
    let lost_profit = f64::from(unmet) * (prices.selling - prices.cost);

    let mut profit = revenue + salvage - cost;
    if include_lost_profit {
        profit -= lost_profit;
    }

    DailyOutcome {
        sold,
        unsold,
        unmet,
        revenue,
        cost,
        salvage,
        lost_profit,
        profit,
    }
}

struct Tables {
    day_types: CumulativeTable<usize>,
    demand: Vec<CumulativeTable<u32>>,
}

fn build_tables(config: &NewsvendorConfig) -> Result<Tables> {
    let day_types = CumulativeTable::new(
        "day type",
        config
            .day_types
            .iter()
            .enumerate()
            .map(|(idx, day_type)| (idx, day_type.probability)),
    )?;
    let demand = config
        .day_types
        .iter()
        .map(|day_type| {
            CumulativeTable::new(
                &format!("{} demand", day_type.name),
                config
                    .demand_levels
                    .iter()
                    .copied()
                    .zip(day_type.demand.iter().copied()),
            )
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Tables { day_types, demand })
}

pub fn validate_config(config: &NewsvendorConfig) -> Result<()> {
    if config.days == 0 || config.days > MAX_DAYS {
        return Err(Error::InvalidNewsvendor(format!(
            "days must be between 1 and {} (got {})",
            MAX_DAYS, config.days
        )));
    }
    if config.order_quantity == 0 {
        return Err(Error::InvalidNewsvendor(
            "order quantity must be greater than 0".to_string(),
        ));
    }
    for (name, price) in [
        ("selling price", config.selling_price),
        ("cost price", config.cost_price),
        ("salvage price", config.salvage_price),
    ] {
        if !price.is_finite() || price < 0.0 {
            return Err(Error::InvalidNewsvendor(format!(
                "{} must be >= 0 (got {})",
                name, price
            )));
        }
    }

    if config.demand_levels.is_empty() {
        return Err(Error::InvalidNewsvendor(
            "demand levels must not be empty".to_string(),
        ));
    }
    if config
        .demand_levels
        .windows(2)
        .any(|pair| pair[0] >= pair[1])
    {
        return Err(Error::InvalidNewsvendor(
            "demand levels must be strictly ascending".to_string(),
        ));
    }

    if config.day_types.is_empty() {
        return Err(Error::InvalidNewsvendor(
            "day types must not be empty".to_string(),
        ));
    }
    let mut names = HashSet::new();
    for day_type in &config.day_types {
        if day_type.name.trim().is_empty() {
            return Err(Error::InvalidNewsvendor(
                "day type names must not be empty".to_string(),
            ));
        }
        if !names.insert(day_type.name.as_str()) {
            return Err(Error::InvalidNewsvendor(format!(
                "duplicate day type '{}'",
                day_type.name
            )));
        }
        if day_type.demand.len() != config.demand_levels.len() {
            return Err(Error::InvalidNewsvendor(format!(
                "day type '{}' has {} demand probabilities for {} demand levels",
                day_type.name,
                day_type.demand.len(),
                config.demand_levels.len()
            )));
        }
    }

    Ok(())
}

/// Runs every day against `rng`, drawing the day type then the demand.
pub fn simulate_days<R: Rng>(config: &NewsvendorConfig, rng: &mut R) -> Result<Vec<DayRecord>> {
    validate_config(config)?;
    let tables = build_tables(config)?;
    let prices = Prices {
        selling: config.selling_price,
        cost: config.cost_price,
        salvage: config.salvage_price,
    };

    let mut days = Vec::with_capacity(config.days);
    let mut cumulative_profit = 0.0;
    for day in 1..=config.days {
        let random_for_type: f64 = rng.gen();
        let type_idx = tables.day_types.sample(random_for_type);
        let random_for_demand: f64 = rng.gen();
        let demand = tables.demand[type_idx].sample(random_for_demand);

        let outcome = daily_outcome(
            demand,
            config.order_quantity,
            prices,
            config.include_lost_profit,
        );
        cumulative_profit += outcome.profit;

        days.push(DayRecord {
            day,
            random_for_type,
            day_type: config.day_types[type_idx].name.clone(),
            random_for_demand,
            demand,
            ordered: config.order_quantity,
            sold: outcome.sold,
            unsold: outcome.unsold,
            unmet: outcome.unmet,
            revenue: outcome.revenue,
            cost: outcome.cost,
            salvage: outcome.salvage,
            lost_profit: outcome.lost_profit,
            daily_profit: outcome.profit,
            cumulative_profit,
        });
    }

    Ok(days)
}

/// Aggregates the day table. `day_type_order` fixes the order of the
/// per-type breakdown; types that never occurred are left out.
pub fn compute_newsvendor_summary(
    days: &[DayRecord],
    day_type_order: &[String],
) -> Result<NewsvendorSummary> {
    if days.is_empty() {
        return Err(Error::EmptyInput);
    }

    let profits: Vec<f64> = days.iter().map(|day| day.daily_profit).collect();
    let count = days.len() as f64;
    let total_demand: f64 = days.iter().map(|day| f64::from(day.demand)).sum();
    let stockouts = days.iter().filter(|day| day.unmet > 0).count();
    let scraps = days.iter().filter(|day| day.unsold > 0).count();

    let by_day_type = day_type_order
        .iter()
        .filter_map(|name| {
            let group: Vec<f64> = days
                .iter()
                .filter(|day| &day.day_type == name)
                .map(|day| day.daily_profit)
                .collect();
            if group.is_empty() {
                return None;
            }
            Some(DayTypeProfit {
                name: name.clone(),
                mean: mean(&group),
                std: sample_std(&group),
                count: group.len(),
                sum: group.iter().sum(),
            })
        })
        .collect();

    Ok(NewsvendorSummary {
        average_daily_profit: mean(&profits),
        std_daily_profit: sample_std(&profits),
        total_profit: profits.iter().sum(),
        average_demand: total_demand / count,
        stockout_rate: stockouts as f64 / count,
        scrap_rate: scraps as f64 / count,
        by_day_type,
    })
}

pub fn run_newsvendor(config: &NewsvendorConfig) -> Result<NewsvendorResult> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::debug!(
        "newsvendor run: days={} order_quantity={} include_lost_profit={} seed={}",
        config.days,
        config.order_quantity,
        config.include_lost_profit,
        seed_label(config.seed)
    );

    let days = simulate_days(config, &mut rng)?;
    let order: Vec<String> = config
        .day_types
        .iter()
        .map(|day_type| day_type.name.clone())
        .collect();
    let summary = compute_newsvendor_summary(&days, &order)?;
    log::info!(
        "newsvendor run complete: days={} total_profit={:.2}",
        days.len(),
        summary.total_profit
    );

    Ok(NewsvendorResult {
        metadata: NewsvendorMetadata {
            days: days.len(),
            order_quantity: config.order_quantity,
            include_lost_profit: config.include_lost_profit,
            seed: seed_label(config.seed),
        },
        days,
        summary,
    })
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values);
    let squares: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

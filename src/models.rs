use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct QueueConfig {
    pub customers: usize,
    #[serde(default)]
    pub rn_iat: Option<Vec<u32>>,
    #[serde(default)]
    pub rn_st: Option<Vec<u32>>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct NewsvendorConfig {
    #[serde(default = "default_days")]
    pub days: usize,
    #[serde(default = "default_order_quantity")]
    pub order_quantity: u32,
    #[serde(default = "default_selling_price")]
    pub selling_price: f64,
    #[serde(default = "default_cost_price")]
    pub cost_price: f64,
    #[serde(default = "default_salvage_price")]
    pub salvage_price: f64,
    #[serde(default = "default_include_lost_profit")]
    pub include_lost_profit: bool,
    #[serde(default = "default_newsvendor_seed")]
    pub seed: Option<u64>,
    #[serde(default = "default_demand_levels")]
    pub demand_levels: Vec<u32>,
    #[serde(default = "default_day_types")]
    pub day_types: Vec<DayTypeConfig>,
}

/// One column of the demand table: how likely this kind of day is, and the
/// demand distribution given that day, aligned with `demand_levels`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct DayTypeConfig {
    pub name: String,
    pub probability: f64,
    pub demand: Vec<f64>,
}

impl Default for NewsvendorConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
            order_quantity: default_order_quantity(),
            selling_price: default_selling_price(),
            cost_price: default_cost_price(),
            salvage_price: default_salvage_price(),
            include_lost_profit: default_include_lost_profit(),
            seed: default_newsvendor_seed(),
            demand_levels: default_demand_levels(),
            day_types: default_day_types(),
        }
    }
}

fn default_days() -> usize {
    1000
}

/// Newsvendor runs are reproducible unless a different seed is given.
fn default_newsvendor_seed() -> Option<u64> {
    Some(42)
}

fn default_order_quantity() -> u32 {
    70
}

fn default_selling_price() -> f64 {
    0.50
}

fn default_cost_price() -> f64 {
    0.33
}

fn default_salvage_price() -> f64 {
    0.05
}

fn default_include_lost_profit() -> bool {
    true
}

fn default_demand_levels() -> Vec<u32> {
    vec![40, 50, 60, 70, 80, 90, 100]
}

fn default_day_types() -> Vec<DayTypeConfig> {
    vec![
        DayTypeConfig {
            name: "Good".to_string(),
            probability: 0.35,
            demand: vec![0.03, 0.05, 0.15, 0.20, 0.35, 0.15, 0.07],
        },
        DayTypeConfig {
            name: "Fair".to_string(),
            probability: 0.45,
            demand: vec![0.10, 0.18, 0.40, 0.20, 0.08, 0.04, 0.00],
        },
        DayTypeConfig {
            name: "Poor".to_string(),
            probability: 0.20,
            demand: vec![0.44, 0.22, 0.16, 0.12, 0.06, 0.00, 0.00],
        },
    ]
}

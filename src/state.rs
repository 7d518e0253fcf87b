use serde::Serialize;

pub const RECORD_COLUMNS: [&str; 11] = [
    "Cust",
    "RN_IAT",
    "IAT",
    "Arrival",
    "RN_ST",
    "ST",
    "TSB",
    "Wait",
    "TSE",
    "TimeInSystem",
    "ServerIdle",
];

pub const DAY_COLUMNS: [&str; 15] = [
    "Day",
    "Random for Type",
    "Type of Day",
    "Random for Demand",
    "Demand",
    "Ordered",
    "Sold",
    "Unsold",
    "Unmet",
    "Revenue",
    "Cost",
    "Salvage",
    "Lost Profit",
    "Daily Profit",
    "Cumulative Profit",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomerRecord {
    #[serde(rename = "Cust")]
    pub cust_index: usize,
    #[serde(rename = "RN_IAT")]
    pub rn_iat: u32,
    #[serde(rename = "IAT")]
    pub inter_arrival_time: u64,
    #[serde(rename = "Arrival")]
    pub arrival_time: u64,
    #[serde(rename = "RN_ST")]
    pub rn_st: u32,
    #[serde(rename = "ST")]
    pub service_time: u64,
    #[serde(rename = "TSB")]
    pub service_start_time: u64,
    #[serde(rename = "Wait")]
    pub wait_time: u64,
    #[serde(rename = "TSE")]
    pub service_end_time: u64,
    #[serde(rename = "TimeInSystem")]
    pub time_in_system: u64,
    #[serde(rename = "ServerIdle")]
    pub server_idle_time: u64,
}

impl CustomerRecord {
    /// Values in `RECORD_COLUMNS` order.
    pub fn values(&self) -> [u64; 11] {
        [
            self.cust_index as u64,
            u64::from(self.rn_iat),
            self.inter_arrival_time,
            self.arrival_time,
            u64::from(self.rn_st),
            self.service_time,
            self.service_start_time,
            self.wait_time,
            self.service_end_time,
            self.time_in_system,
            self.server_idle_time,
        ]
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub average_wait: f64,
    pub maximum_wait: u64,
    pub total_idle_time: u64,
    pub total_service_time: u64,
    pub utilization: f64,
    pub horizon_end: u64,
}

impl SummaryStatistics {
    /// Labelled summary rows as shown to users.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Average waiting time", format!("{:.2}", self.average_wait)),
            ("Maximum waiting time", self.maximum_wait.to_string()),
            ("Total server idle time", self.total_idle_time.to_string()),
            (
                "Server utilization (%)",
                format!("{:.2}%", self.utilization * 100.0),
            ),
            ("Simulation horizon end", self.horizon_end.to_string()),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DrawSource {
    Supplied,
    Generated,
}

impl std::fmt::Display for DrawSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawSource::Supplied => write!(f, "supplied"),
            DrawSource::Generated => write!(f, "generated"),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetadata {
    pub customers: usize,
    pub seed: String,
    pub rn_iat: DrawSource,
    pub rn_st: DrawSource,
}

#[derive(Clone, Debug, Serialize)]
pub struct SimulationResult {
    pub metadata: RunMetadata,
    pub records: Vec<CustomerRecord>,
    pub summary: SummaryStatistics,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayRecord {
    #[serde(rename = "Day")]
    pub day: usize,
    #[serde(rename = "Random for Type")]
    pub random_for_type: f64,
    #[serde(rename = "Type of Day")]
    pub day_type: String,
    #[serde(rename = "Random for Demand")]
    pub random_for_demand: f64,
    #[serde(rename = "Demand")]
    pub demand: u32,
    #[serde(rename = "Ordered")]
    pub ordered: u32,
    #[serde(rename = "Sold")]
    pub sold: u32,
    #[serde(rename = "Unsold")]
    pub unsold: u32,
    #[serde(rename = "Unmet")]
    pub unmet: u32,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Cost")]
    pub cost: f64,
    #[serde(rename = "Salvage")]
    pub salvage: f64,
    #[serde(rename = "Lost Profit")]
    pub lost_profit: f64,
    #[serde(rename = "Daily Profit")]
    pub daily_profit: f64,
    #[serde(rename = "Cumulative Profit")]
    pub cumulative_profit: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayTypeProfit {
    pub name: String,
    pub mean: f64,
    pub std: Option<f64>,
    pub count: usize,
    pub sum: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewsvendorSummary {
    pub average_daily_profit: f64,
    pub std_daily_profit: Option<f64>,
    pub total_profit: f64,
    pub average_demand: f64,
    pub stockout_rate: f64,
    pub scrap_rate: f64,
    pub by_day_type: Vec<DayTypeProfit>,
}

impl NewsvendorSummary {
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            (
                "Average daily profit",
                format!("{:.2}", self.average_daily_profit),
            ),
            ("Total profit", format!("{:.2}", self.total_profit)),
            (
                "Std dev of daily profit",
                format_optional(self.std_daily_profit),
            ),
            ("Average demand", format!("{:.2}", self.average_demand)),
            (
                "Stockout rate",
                format!("{:.1}%", self.stockout_rate * 100.0),
            ),
            (
                "Scrap (unsold) rate",
                format!("{:.1}%", self.scrap_rate * 100.0),
            ),
        ]
    }
}

pub(crate) fn format_optional(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{:.2}", value),
        None => "n/a".to_string(),
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct NewsvendorMetadata {
    pub days: usize,
    pub order_quantity: u32,
    pub include_lost_profit: bool,
    pub seed: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct NewsvendorResult {
    pub metadata: NewsvendorMetadata,
    pub days: Vec<DayRecord>,
    pub summary: NewsvendorSummary,
}

pub(crate) fn seed_label(seed: Option<u64>) -> String {
    match seed {
        Some(seed) => format!("seeded({})", seed),
        None => "entropy".to_string(),
    }
}

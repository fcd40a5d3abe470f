use std::collections::{BTreeMap, VecDeque};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Purchase;

/// How many recent operations are kept when `METRICS_CAPACITY` is unset.
pub const DEFAULT_CAPACITY: usize = 1_024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
    Purchase,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Purchase => "purchase",
        }
    }
}

/// One handled store call.
#[derive(Debug, Clone, Serialize)]
pub struct OperationRecord {
    pub at: DateTime<Utc>,
    pub operation: Operation,
    pub status: u16,
    pub item_id: Option<i64>,
    pub elapsed_us: u64,
}

/// Running sales figures for one item id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ItemSales {
    pub item_id: i64,
    pub purchases: u64,
    pub units_sold: i64,
    pub revenue: f64,
    /// Purchases refused for insufficient stock.
    pub stock_outs: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub total_operations: u64,
    /// Response status counts per operation.
    pub statuses: BTreeMap<Operation, BTreeMap<u16, u64>>,
    pub sales: Vec<ItemSales>,
    pub recent_capacity: usize,
    pub recent_len: usize,
}

/// Request counters plus a ring of the latest operations. Memory is bounded
/// by `capacity` for the ring; counters are keyed by operation/status and by
/// item id.
#[derive(Debug)]
pub struct InventoryMetrics {
    capacity: usize,
    recent: VecDeque<OperationRecord>,
    total_operations: u64,
    statuses: BTreeMap<Operation, BTreeMap<u16, u64>>,
    sales: BTreeMap<i64, ItemSales>,
}

impl Default for InventoryMetrics {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl InventoryMetrics {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            recent: VecDeque::with_capacity(capacity),
            total_operations: 0,
            statuses: BTreeMap::new(),
            sales: BTreeMap::new(),
        }
    }

    pub fn record(
        &mut self,
        operation: Operation,
        status: u16,
        item_id: Option<i64>,
        elapsed: Duration,
    ) {
        if self.recent.len() == self.capacity {
            self.recent.pop_front();
        }
        self.recent.push_back(OperationRecord {
            at: Utc::now(),
            operation,
            status,
            item_id,
            elapsed_us: elapsed.as_micros() as u64,
        });

        self.total_operations += 1;
        *self
            .statuses
            .entry(operation)
            .or_default()
            .entry(status)
            .or_default() += 1;
    }

    pub fn record_sale(&mut self, purchase: &Purchase) {
        let sales = self.sales_for(purchase.item_id);
        sales.purchases += 1;
        sales.units_sold += purchase.quantity;
        sales.revenue += purchase.total_price;
    }

    pub fn record_stock_out(&mut self, item_id: i64) {
        self.sales_for(item_id).stock_outs += 1;
    }

    fn sales_for(&mut self, item_id: i64) -> &mut ItemSales {
        self.sales.entry(item_id).or_insert_with(|| ItemSales {
            item_id,
            ..ItemSales::default()
        })
    }

    pub fn recent(&self) -> impl Iterator<Item = &OperationRecord> {
        self.recent.iter()
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_operations: self.total_operations,
            statuses: self.statuses.clone(),
            sales: self.sales.values().cloned().collect(),
            recent_capacity: self.capacity,
            recent_len: self.recent.len(),
        }
    }

    /// Returns how many recent records were dropped.
    pub fn clear(&mut self) -> usize {
        let dropped = self.recent.len();
        self.recent.clear();
        self.total_operations = 0;
        self.statuses.clear();
        self.sales.clear();
        dropped
    }

    /// The recent-operation ring as CSV, oldest first.
    pub fn recent_csv(&self) -> anyhow::Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.write_record(["at", "operation", "status", "item_id", "elapsed_us"])?;

        for r in self.recent() {
            wtr.write_record([
                r.at.to_rfc3339(),
                r.operation.as_str().to_string(),
                r.status.to_string(),
                r.item_id.map(|id| id.to_string()).unwrap_or_default(),
                r.elapsed_us.to_string(),
            ])?;
        }

        Ok(String::from_utf8(wtr.into_inner()?)?)
    }
}

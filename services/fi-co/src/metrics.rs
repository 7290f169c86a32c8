//! 成本核算指标

use metrics::{counter, histogram};

/// 重估结果计数：created / approved / rejected / synced / sync_failed
pub fn record_revaluation(outcome: &'static str) {
    counter!("costing_revaluations_total", "outcome" => outcome).increment(1);
}

/// 批量更新逐条结果计数：updated / failed
pub fn record_mass_update_records(outcome: &'static str, count: u64) {
    if count > 0 {
        counter!("costing_mass_update_records_total", "outcome" => outcome).increment(count);
    }
}

pub fn record_mass_update_duration(seconds: f64) {
    histogram!("costing_mass_update_duration_seconds").record(seconds);
}

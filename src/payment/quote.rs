// src/payment/quote.rs
use serde::Serialize;
use thiserror::Error;

use crate::types::Consultant;

pub const PLATFORM_FEE_PERCENT: u64 = 10;
pub const DEFAULT_PROJECT_TITLE: &str = "New Project";
pub const DEFAULT_ESTIMATED_HOURS: u32 = 40;
pub const MAX_ESTIMATED_HOURS: u32 = 10_000;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("Engagement of {hourly_rate} x {estimated_hours} hours exceeds the billable maximum")]
    TooLarge { hourly_rate: u32, estimated_hours: u32 },
}

/// Platform fee on `total`, rounded half up to a whole unit.
pub fn platform_fee(total: u64) -> u64 {
    // At most total / 10 + 1, so the narrowing never truncates.
    ((u128::from(total) * u128::from(PLATFORM_FEE_PERCENT) + 50) / 100) as u64
}

/// A prospective hire. Only the rate and the hours are stored; every amount
/// is derived from them on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Engagement {
    pub consultant_id: u32,
    pub consultant_name: String,
    pub project_title: String,
    hourly_rate: u32,
    estimated_hours: u32,
}

impl Engagement {
    /// Fails when the grand total would not fit in a `u64`.
    pub fn new(
        consultant: &Consultant,
        project_title: impl Into<String>,
        estimated_hours: u32,
    ) -> Result<Self, QuoteError> {
        let total = u64::from(consultant.hourly_rate) * u64::from(estimated_hours);
        if total.checked_add(platform_fee(total)).is_none() {
            return Err(QuoteError::TooLarge {
                hourly_rate: consultant.hourly_rate,
                estimated_hours,
            });
        }

        Ok(Self {
            consultant_id: consultant.id,
            consultant_name: consultant.name.clone(),
            project_title: project_title.into(),
            hourly_rate: consultant.hourly_rate,
            estimated_hours,
        })
    }

    pub fn hourly_rate(&self) -> u32 {
        self.hourly_rate
    }

    pub fn estimated_hours(&self) -> u32 {
        self.estimated_hours
    }

    pub fn total_amount(&self) -> u64 {
        u64::from(self.hourly_rate) * u64::from(self.estimated_hours)
    }

    pub fn platform_fee(&self) -> u64 {
        platform_fee(self.total_amount())
    }

    pub fn grand_total(&self) -> u64 {
        self.total_amount() + self.platform_fee()
    }

    pub fn breakdown(&self) -> CostBreakdown {
        CostBreakdown {
            consultant_id: self.consultant_id,
            consultant_name: self.consultant_name.clone(),
            project_title: self.project_title.clone(),
            hourly_rate: self.hourly_rate,
            estimated_hours: self.estimated_hours,
            total_amount: self.total_amount(),
            platform_fee: self.platform_fee(),
            grand_total: self.grand_total(),
        }
    }
}

/// Read-only snapshot of an engagement's cost, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub consultant_id: u32,
    pub consultant_name: String,
    pub project_title: String,
    pub hourly_rate: u32,
    pub estimated_hours: u32,
    pub total_amount: u64,
    pub platform_fee: u64,
    pub grand_total: u64,
}

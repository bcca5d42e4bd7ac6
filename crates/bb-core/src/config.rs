//! Simulation parameters.
//!
//! `SimConfig` is the flat parameter record supplied by whatever front end
//! collects the inputs.  It is passed by value into the simulation builder;
//! nothing reads parameters from global state.

use crate::{ConfigError, Stage};

/// Top-level simulation configuration.
///
/// Times share one unit throughout; the defaults are in minutes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Clock value of the end-of-simulation event.
    pub horizon: f64,

    /// Mean of the exponential interarrival time.
    pub mean_interarrival: f64,

    /// Share of arrivals with expired invoices (routed to the update desk).
    pub proportion_expired: f64,

    /// Number of cash counters.
    pub counter_count: u32,
    /// Lower bound of the uniform counter service time.
    pub counter_service_min: f64,
    /// Upper bound of the uniform counter service time.
    pub counter_service_max: f64,

    /// Number of update-desk servers.
    pub update_desk_count: u32,
    /// Share of update-desk customers who continue to the report desk.
    pub proportion_to_report: f64,
    /// Mean of the exponential update-desk service time.
    pub update_service_mean: f64,

    /// Number of report-desk servers.
    pub report_desk_count: u32,
    /// Mean of the normal report-desk service time.
    pub report_service_mean: f64,
    /// Standard deviation of the normal report-desk service time.
    pub report_service_stdev: f64,

    /// Seed for the run's uniform source.  The same seed always produces the
    /// same state vector.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            horizon:              50_000.0,
            mean_interarrival:    60.0,
            proportion_expired:   0.4,
            counter_count:        4,
            counter_service_min:  25.0,
            counter_service_max:  30.0,
            update_desk_count:    1,
            proportion_to_report: 0.75,
            update_service_mean:  40.0,
            report_desk_count:    1,
            report_service_mean:  20.0,
            report_service_stdev: 2.0,
            seed:                 42,
        }
    }
}

impl SimConfig {
    /// Check every parameter.  Returns the first problem found.
    ///
    /// The horizon may be `0` (the run then processes only the first arrival);
    /// every other time parameter must be strictly positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let times = [
            ("horizon",              self.horizon),
            ("mean_interarrival",    self.mean_interarrival),
            ("counter_service_min",  self.counter_service_min),
            ("counter_service_max",  self.counter_service_max),
            ("update_service_mean",  self.update_service_mean),
            ("report_service_mean",  self.report_service_mean),
            ("report_service_stdev", self.report_service_stdev),
        ];
        for (field, value) in times {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
            let allowed = if field == "horizon" { value >= 0.0 } else { value > 0.0 };
            if !allowed {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        for (field, value) in [
            ("proportion_expired",   self.proportion_expired),
            ("proportion_to_report", self.proportion_to_report),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProportionOutOfRange { field, value });
            }
        }

        for stage in Stage::ALL {
            if self.server_count(stage) == 0 {
                return Err(ConfigError::NoServers(stage));
            }
        }

        if self.counter_service_min > self.counter_service_max {
            return Err(ConfigError::InvertedRange {
                min: self.counter_service_min,
                max: self.counter_service_max,
            });
        }
        Ok(())
    }

    /// Configured capacity of `stage`.
    #[inline]
    pub fn server_count(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Counter    => self.counter_count,
            Stage::UpdateDesk => self.update_desk_count,
            Stage::ReportDesk => self.report_desk_count,
        }
    }
}

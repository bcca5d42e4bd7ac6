//! Customer routing through the branch.
//!
//! A route is decided once, at arrival, by up to two Bernoulli draws, and the
//! customer carries it for the rest of its visit:
//!
//! ```text
//! u1 >= p_expired                        → Pay:              counter
//! u1 <  p_expired, u2 >= p_to_report     → Update:           update desk → counter
//! u1 <  p_expired, u2 <  p_to_report     → UpdateThenReport: update desk → report desk
//! ```
//!
//! `u2` is only drawn when `u1` sends the customer to the update desk.

use bb_core::{Stage, UniformSource};

const PAY: &[Stage] = &[Stage::Counter];
const UPDATE: &[Stage] = &[Stage::UpdateDesk, Stage::Counter];
const UPDATE_THEN_REPORT: &[Stage] = &[Stage::UpdateDesk, Stage::ReportDesk];

/// The ordered list of stages one customer visits.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Route {
    Pay,
    Update,
    UpdateThenReport,
}

impl Route {
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Route::Pay              => PAY,
            Route::Update           => UPDATE,
            Route::UpdateThenReport => UPDATE_THEN_REPORT,
        }
    }

    /// The stage a new arrival joins.
    #[inline]
    pub fn first_stage(self) -> Stage {
        self.stages()[0]
    }

    /// The stage visited after `stage`, or `None` when finishing `stage`
    /// means leaving the branch.
    pub fn after(self, stage: Stage) -> Option<Stage> {
        let stages = self.stages();
        let pos = stages.iter().position(|&s| s == stage)?;
        stages.get(pos + 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Pay              => "pay",
            Route::Update           => "update",
            Route::UpdateThenReport => "update+report",
        }
    }
}

/// The uniforms behind one routing decision.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDraw {
    pub rnd_expired: f64,
    /// Only drawn for customers sent to the update desk.
    pub rnd_report:  Option<f64>,
    pub route:       Route,
}

/// Decide a new arrival's route.
pub fn draw_route<S: UniformSource>(
    source:               &mut S,
    proportion_expired:   f64,
    proportion_to_report: f64,
) -> RouteDraw {
    let rnd_expired = source.next_uniform();
    if rnd_expired >= proportion_expired {
        return RouteDraw { rnd_expired, rnd_report: None, route: Route::Pay };
    }

    let rnd_report = source.next_uniform();
    let route = if rnd_report < proportion_to_report {
        Route::UpdateThenReport
    } else {
        Route::Update
    };
    RouteDraw { rnd_expired, rnd_report: Some(rnd_report), route }
}

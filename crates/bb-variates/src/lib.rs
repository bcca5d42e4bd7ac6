//! `bb-variates` — random-variate generation for the bank-branch simulation.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`generators`]  | `exponential`, `uniform`, `normal` and their return types |
//! | [`service`]     | `ServiceTime` (per-stage sampler), `NormalPairCache`, `ServiceDraw` |
//!
//! Every generator returns the uniform(s) it consumed alongside the derived
//! sample, so the state vector can show both.

pub mod generators;
pub mod service;


pub use generators::{exponential, normal, uniform, NormalPair, Variate};
pub use service::{CachedNormal, NormalPairCache, ServiceDraw, ServiceTime};

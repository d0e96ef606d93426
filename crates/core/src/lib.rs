//! Pure domain logic for contractor attribution and billing-period
//! derivation.
//!
//! Everything in this crate is I/O-free: the db crate feeds it rows loaded
//! from Postgres, the api crate feeds it parsed request input. The modules
//! mirror the engine's components:
//!
//! - [`hierarchy`] -- the fixed two-level company graph
//! - [`attribution`] -- resolving a project to its billed main contractor
//! - [`lifecycle`] -- the write-time "every project has a company" guard
//! - [`timeline`] -- first-activity derivation from documents and photos
//! - [`period`] -- inclusive calendar-date billing periods and company filters
//! - [`cache`] -- the lazily backfilled `started_at` value, made explicit
//! - [`billing`] -- per-contractor aggregation with explicit zero rows

pub mod attribution;
pub mod billing;
pub mod cache;
pub mod error;
pub mod hierarchy;
pub mod lifecycle;
pub mod period;
pub mod timeline;
pub mod types;

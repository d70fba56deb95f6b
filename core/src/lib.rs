//! Synchronous client core for the Oura Ring v2 API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Any `HttpGetter` can execute
//! the round-trip between the two.
//!
//! # Design
//! - `OuraClient` is stateless; it holds only its `ClientConfig`.
//! - Parsing runs in one direction: envelope classification
//!   (`envelope::classify`), then a two-pass decode (`decode`), with temporal
//!   fields going through `temporal`.
//! - Every operation fails with a single `OuraError`: transport, API, or
//!   decode.

pub mod client;
pub mod config;
pub mod decode;
pub mod envelope;
pub mod error;
pub mod http;
pub mod temporal;
pub mod types;

pub use client::OuraClient;
pub use config::ClientConfig;
pub use decode::{decode_record, Presence, Record};
pub use error::{ConfigError, OuraError, Result, TransportError};
pub use http::{HttpGetter, HttpRequest, HttpResponse};
pub use temporal::{CalendarDate, OffsetTimestamp, TemporalError};
pub use types::{
    ActivityContributors, DailyActivityRecord, DateRange, MetSeries, OptimalBedtime, Page,
    PersonalInfoRecord, SleepContributors, SleepSessionRecord, SleepTimeRecord,
};

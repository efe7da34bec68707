//! Walletlens - account asset summaries.
//!
//! Summarizes what an address holds: its native balance, a fixed set of
//! tracked tokens and up to a dozen NFTs, priced in fiat with a total.
//! Summaries are read through an expiring cache and every returned summary
//! can be recorded to a queryable history.
//!
//! # Architecture
//!
//! The crate is laid out hexagonally:
//!
//! - [`domain`] - Subjects, assets, summaries, money arithmetic
//! - [`port`] - Traits for upstream data, cache and history
//! - [`application`] - Summary aggregation, history recording, account queries
//! - [`adapter`] - Alchemy client, in-memory cache, SQLite history, CLI
//! - [`infrastructure`] - Configuration, logging and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use walletlens::domain::Subject;
//! use walletlens::infrastructure::bootstrap::build_account_service;
//! use walletlens::infrastructure::config::Config;
//!
//! # async fn demo() -> walletlens::error::Result<()> {
//! let config = Config::load("walletlens.toml")?;
//! let service = build_account_service(&config)?;
//! let subject = Subject::parse("0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045")?;
//! let summary = service.query(&subject).await?;
//! println!("{}", summary.total_value());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;

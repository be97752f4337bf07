//! # Rowcheck Validator
//!
//! Validation engine for pipe-delimited record files. This crate provides:
//!
//! - Per-row classification against a compiled rule set
//! - Record sources and sinks (pipe-delimited files, in-memory lists)
//! - The run orchestrator that routes rows and counts failures
//!
//! ## Example
//!
//! ```rust
//! use rowcheck_core::RuleSetBuilder;
//! use rowcheck_validator::{RowOutcome, RowValidator};
//!
//! let rule_set = RuleSetBuilder::new("codes")
//!     .length(0, true, 4, 6, false)
//!     .blocklist(1, ["N/A"], true)
//!     .build()
//!     .unwrap();
//!
//! let validator = RowValidator::new(&rule_set);
//! assert_eq!(validator.validate(&["1234", "ok"][..]), RowOutcome::Accepted);
//! assert_eq!(
//!     validator.validate(&["12", "ok"][..]),
//!     RowOutcome::RejectedFieldFailed(0)
//! );
//! ```

mod dialect;
mod error;
mod record;
mod row;
mod runner;

pub use dialect::*;
pub use error::*;
pub use record::*;
pub use row::*;
pub use runner::*;

//! # rowcheck core
//!
//! Rule model for validating delimited records before downstream ingestion.
//!
//! ## Key Concepts
//!
//! - **FieldRule**: one typed check for one field position (blocklist, regex,
//!   length range, ABA checksum)
//! - **RuleSet**: the rules for one record type, keyed by position, plus the
//!   number of fields every record must have
//! - **RuleCatalog**: the named rule sets a run can select from
//! - **Definitions**: the serialisable catalog format the above are compiled from
//!
//! ## Example
//!
//! ```rust
//! use rowcheck_core::{FieldRule, RuleSetBuilder};
//!
//! let rule_set = RuleSetBuilder::new("bank")
//!     .rule(0, FieldRule::aba_checksum(true, false))
//!     .build()
//!     .unwrap();
//!
//! let rule = rule_set.for_position(0).unwrap();
//! assert!(rule.check("490000018"));
//! assert!(!rule.check("490000019"));
//! ```

pub mod builder;
pub mod catalog;
pub mod definition;
pub mod error;
pub mod rule;
pub mod rule_set;

pub use builder::*;
pub use catalog::*;
pub use definition::*;
pub use error::*;
pub use rule::*;
pub use rule_set::*;

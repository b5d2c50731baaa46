//! Structural audits of dispatchers.
//!
//! The engine never validates its rules while dispatching. Audits are an
//! opt-in pass, run at setup time or in tests, that report shadowed keys,
//! empty modes and missing fallbacks. Checks accumulate ALL issues with
//! Stillwater's `Validation` instead of stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use statable::audit::{AuditBuilder, AuditIssue};
//! use statable::dispatch::{Factor, Dispatcher};
//!
//! struct Lamp;
//!
//! let mut dispatcher: Dispatcher<Lamp, u8> = Dispatcher::new(0);
//! dispatcher.register(Factor::when(|_: &Lamp| true, |_: &mut Lamp| {}).labeled("on"));
//! dispatcher.register(Factor::when(|_: &Lamp| true, |_: &mut Lamp| {}).labeled("on"));
//!
//! let rules = AuditBuilder::new().deny_duplicates().require_default().build();
//! let issues = rules.check(&dispatcher.summary()).unwrap_err();
//!
//! assert_eq!(issues.len(), 2);
//! assert!(issues.contains(&AuditIssue::MissingDefault));
//! ```

pub mod builder;
pub mod issues;
pub mod rules;
pub mod summary;

pub use builder::AuditBuilder;
pub use issues::AuditIssue;
pub use rules::{AuditCheck, AuditRules};
pub use summary::{DispatchSummary, RuleSummary};

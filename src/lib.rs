//! apm-errors - error capabilities and an in-process error collector
//!
//! Errors opt into up to three independent capabilities: a stack trace
//! ([`StackTracer`]), an aggregation class ([`ErrorClasser`]) and extra
//! attributes ([`ErrorAttributer`]). The [`ErrorCollector`] probes each one
//! separately and substitutes defaults for whatever an error does not provide.
//!
//! ```
//! use apm_errors::{AgentConfig, ErrorCollector, StandardError};
//!
//! let collector = ErrorCollector::new(AgentConfig::default()).unwrap();
//! collector
//!     .notice_error(
//!         &StandardError::new("payment declined")
//!             .with_class("PaymentDeclined")
//!             .with_attribute("amount_cents", 1299),
//!     )
//!     .unwrap();
//!
//! let harvest = collector.harvest();
//! assert_eq!(harvest.events[0].class, "PaymentDeclined");
//! ```

// Core modules
pub mod attributes;
pub mod capabilities;
pub mod config;
pub mod error;

// Main functionality modules
pub mod class;
pub mod collector;
pub mod event;
pub mod probe;
pub mod stack;
pub mod standard;

// Re-export main types for convenience
pub use attributes::{
    validate_attributes, AttributeError, AttributeValidator, AttributeValue, Attributes,
    DefaultAttributeValidator,
};
pub use capabilities::{ErrorAttributer, ErrorClasser, Noticeable, Plain, StackTracer};
pub use class::{ClassPolicy, FullTypeName, ShortTypeName};
pub use collector::{ErrorCollector, ErrorCollectorBuilder, NoticeOutcome, HIGH_SECURITY_MESSAGE};
pub use config::{AgentConfig, AgentConfigBuilder, ClassNaming, InvalidAttributePolicy};
pub use error::{ApmError, Result, ResultExt};
pub use event::{ErrorEvent, Harvest, ERROR_EVENT_TYPE};
pub use probe::{probe, NoticedError};
pub use stack::{Frame, StackTrace, Traced};
pub use standard::StandardError;

//! Optional capabilities an error value can expose to the collector.
//!
//! Each capability is its own narrow trait, so an error type opts into exactly
//! the facets it can provide. [`Noticeable`] is the minimal contract the
//! collector accepts: a displayable `std::error::Error` plus one query per
//! capability, each answering `None` unless the type overrides it.

use crate::attributes::Attributes;
use std::borrow::Cow;
use std::fmt;

/// Provides the program counters of the call stack at construction time.
///
/// Innermost frame first, matching [`crate::StackTrace::capture`].
pub trait StackTracer {
    fn stack_trace(&self) -> Cow<'_, [usize]>;
}

/// Provides the label errors are aggregated by.
///
/// The same logical failure should always report the same class. An empty
/// class means "no custom classification".
pub trait ErrorClasser {
    fn error_class(&self) -> Cow<'_, str>;
}

/// Provides extra diagnostic attributes.
///
/// Values are validated later by the collector's attribute rules.
pub trait ErrorAttributer {
    fn error_attributes(&self) -> Cow<'_, Attributes>;
}

/// An error the collector can notice.
pub trait Noticeable: std::error::Error {
    fn as_stack_tracer(&self) -> Option<&dyn StackTracer> {
        None
    }

    fn as_error_classer(&self) -> Option<&dyn ErrorClasser> {
        None
    }

    fn as_error_attributer(&self) -> Option<&dyn ErrorAttributer> {
        None
    }

    /// Runtime type name, the input to the default class policy
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Adapter that lets any `std::error::Error` be noticed without implementing
/// a capability. The reported type name is that of `E`.
///
/// For trait objects (`dyn Error`) only the static type is known, so the
/// derived class is the trait object's name.
#[derive(Debug)]
pub struct Plain<'a, E: ?Sized>(pub &'a E);

impl<E: fmt::Display + ?Sized> fmt::Display for Plain<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<E: std::error::Error + ?Sized> std::error::Error for Plain<'_, E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl<E: std::error::Error + ?Sized> Noticeable for Plain<'_, E> {
    fn type_name(&self) -> &'static str {
        std::any::type_name::<E>()
    }
}

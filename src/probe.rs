use crate::attributes::Attributes;
use crate::capabilities::Noticeable;
use crate::class::ClassPolicy;
use crate::stack::StackTrace;
use serde::Serialize;

/// What the collector learned about an error.
///
/// Every field is filled: capabilities the error lacks are replaced by their
/// defaults (empty trace, policy-derived class, no attributes).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoticedError {
    pub message: String,
    pub class: String,
    pub stack_trace: StackTrace,
    pub attributes: Attributes,
    pub type_name: &'static str,
}

/// Resolve each capability of `err` independently.
///
/// An empty class from a classer falls back to the derived default, the same
/// as no classer at all.
pub fn probe(err: &dyn Noticeable, policy: &dyn ClassPolicy) -> NoticedError {
    let type_name = err.type_name();

    let stack_trace = err
        .as_stack_tracer()
        .map(|tracer| StackTrace::from(tracer.stack_trace().into_owned()))
        .unwrap_or_default();

    let class = err
        .as_error_classer()
        .map(|classer| classer.error_class().into_owned())
        .filter(|class| !class.is_empty())
        .unwrap_or_else(|| policy.default_class(type_name));

    let attributes = err
        .as_error_attributer()
        .map(|attributer| attributer.error_attributes().into_owned())
        .unwrap_or_default();

    NoticedError {
        message: err.to_string(),
        class,
        stack_trace,
        attributes,
        type_name,
    }
}

use crate::capabilities::{ErrorAttributer, ErrorClasser, Noticeable, StackTracer};
use serde::Serialize;
use std::borrow::Cow;
use std::ffi::c_void;
use std::fmt;
use std::ops::Deref;

/// Upper bound on frames recorded by [`StackTrace::capture`]
pub const MAX_STACK_FRAMES: usize = 100;

/// Program counters of a call stack, innermost frame first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StackTrace(Vec<usize>);

/// A symbolized stack frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frame {
    pub pc: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl StackTrace {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Record the current call stack
    pub fn capture() -> Self {
        let mut pcs = Vec::with_capacity(32);
        backtrace::trace(|frame| {
            pcs.push(frame.ip() as usize);
            pcs.len() < MAX_STACK_FRAMES
        });
        Self(pcs)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbolize every program counter. Frames without debug info keep only
    /// their `pc`.
    pub fn resolve(&self) -> Vec<Frame> {
        self.0
            .iter()
            .map(|&pc| {
                let mut frame = Frame {
                    pc,
                    function: None,
                    file: None,
                    line: None,
                };
                backtrace::resolve(pc as *mut c_void, |symbol| {
                    if frame.function.is_some() {
                        return;
                    }
                    frame.function = symbol.name().map(|name| name.to_string());
                    frame.file = symbol.filename().map(|path| path.display().to_string());
                    frame.line = symbol.lineno();
                });
                frame
            })
            .collect()
    }
}

impl Deref for StackTrace {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for StackTrace {
    fn from(pcs: Vec<usize>) -> Self {
        Self(pcs)
    }
}

impl From<&[usize]> for StackTrace {
    fn from(pcs: &[usize]) -> Self {
        Self(pcs.to_vec())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.function, &self.file, self.line) {
            (Some(func), Some(file), Some(line)) => write!(f, "{func}\n\t{file}:{line}"),
            (Some(func), _, _) => f.write_str(func),
            _ => write!(f, "{:#x}", self.pc),
        }
    }
}

/// Wraps a noticeable error with the stack captured when it was wrapped.
///
/// Class and attributes still come from the inner error, so wrapping only
/// adds the stack trace capability.
#[derive(Debug)]
pub struct Traced<E> {
    inner: E,
    stack: StackTrace,
}

impl<E: Noticeable> Traced<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            stack: StackTrace::capture(),
        }
    }

    pub fn with_stack(inner: E, stack: StackTrace) -> Self {
        Self { inner, stack }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn into_inner(self) -> E {
        self.inner
    }
}

impl<E: fmt::Display> fmt::Display for Traced<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl<E: Noticeable> std::error::Error for Traced<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.inner.source()
    }
}

impl<E> StackTracer for Traced<E> {
    fn stack_trace(&self) -> Cow<'_, [usize]> {
        Cow::Borrowed(self.stack.as_slice())
    }
}

impl<E: Noticeable> Noticeable for Traced<E> {
    fn as_stack_tracer(&self) -> Option<&dyn StackTracer> {
        Some(self)
    }

    fn as_error_classer(&self) -> Option<&dyn ErrorClasser> {
        self.inner.as_error_classer()
    }

    fn as_error_attributer(&self) -> Option<&dyn ErrorAttributer> {
        self.inner.as_error_attributer()
    }

    fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }
}

impl StackTracer for StackTrace {
    fn stack_trace(&self) -> Cow<'_, [usize]> {
        Cow::Borrowed(self.as_slice())
    }
}

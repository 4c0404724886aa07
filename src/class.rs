//! Default class derivation for errors that do not classify themselves.

use crate::config::types::ClassNaming;

/// Derives an aggregation class from a runtime type name
pub trait ClassPolicy: Send + Sync {
    fn default_class(&self, type_name: &str) -> String;
}

/// Uses the type name as is, e.g. `std::io::error::Error`
#[derive(Debug, Clone, Copy, Default)]
pub struct FullTypeName;

/// Strips module paths, including inside generic arguments:
/// `alloc::boxed::Box<std::io::error::Error>` becomes `Box<Error>`.
/// Compiler-generated segments such as `{{closure}}` keep the named item
/// that owns them, so `my_app::handler::{{closure}}` becomes
/// `handler::{{closure}}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortTypeName;

impl ClassPolicy for FullTypeName {
    fn default_class(&self, type_name: &str) -> String {
        type_name.to_string()
    }
}

impl ClassPolicy for ShortTypeName {
    fn default_class(&self, type_name: &str) -> String {
        let mut out = String::with_capacity(type_name.len());
        let mut path = String::new();

        for ch in type_name.chars() {
            if ch.is_alphanumeric() || ch == '_' || ch == ':' {
                path.push(ch);
            } else if ch == '{' && path.ends_with("::") {
                out.push_str(last_segment(path.trim_end_matches("::")));
                out.push_str("::");
                path.clear();
                out.push(ch);
            } else {
                out.push_str(last_segment(&path));
                path.clear();
                out.push(ch);
            }
        }
        out.push_str(last_segment(&path));
        out
    }
}

impl<F> ClassPolicy for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn default_class(&self, type_name: &str) -> String {
        self(type_name)
    }
}

impl ClassNaming {
    pub fn policy(self) -> Box<dyn ClassPolicy> {
        match self {
            ClassNaming::Full => Box::new(FullTypeName),
            ClassNaming::Short => Box::new(ShortTypeName),
        }
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

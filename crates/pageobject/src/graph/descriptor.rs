// Type descriptors - structural identity for page and control types
//
// A descriptor is the base type identity plus its ordered generic
// arguments, parsed from the compiler-provided type name. Two descriptors
// are equal when base and arguments are equal, so `C<i32>` and `C<String>`
// are distinct keys while two lookups of `C<i32>` always agree.

use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Structural identity of a page, control or interface type.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeDescriptor {
    base: Arc<str>,
    args: Arc<[TypeDescriptor]>,
}

impl TypeDescriptor {
    /// Descriptor of `T`. Works for trait objects (`dyn I`) too.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self::parse(std::any::type_name::<T>())
    }

    /// Builds a descriptor from an explicit base and argument list.
    pub fn new(base: impl Into<Arc<str>>, args: Vec<TypeDescriptor>) -> Self {
        Self {
            base: base.into(),
            args: args.into(),
        }
    }

    /// Parses a fully qualified type name such as `app::C<alloc::string::String>`.
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        match split_generic(name) {
            Some((base, args)) => Self::new(
                base.trim(),
                args.into_iter().map(TypeDescriptor::parse).collect(),
            ),
            None => Self::new(name, Vec::new()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn args(&self) -> &[TypeDescriptor] {
        &self.args
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn is_generic(&self) -> bool {
        !self.args.is_empty()
    }

    /// True for trait-object descriptors, which always denote interfaces.
    pub fn is_trait_object(&self) -> bool {
        self.base.starts_with("dyn ")
    }

    /// Fully qualified name, module paths included.
    pub fn full_name(&self) -> String {
        if self.args.is_empty() {
            return self.base.to_string();
        }
        let args: Vec<String> = self.args.iter().map(TypeDescriptor::full_name).collect();
        format!("{}<{}>", self.base, args.join(", "))
    }

    /// Same base with a different argument list.
    pub fn with_args(&self, args: Vec<TypeDescriptor>) -> Self {
        Self {
            base: Arc::clone(&self.base),
            args: args.into(),
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&strip_paths(&self.base))?;
        if self.args.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", arg)?;
        }
        f.write_str(">")
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDescriptor({})", self.full_name())
    }
}

impl Serialize for TypeDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Matches descriptors either exactly or by open generic shape.
///
/// `Open` stands for a generic type with unbound parameters (`C<_>`): it
/// matches every closed instantiation with the same base and arity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypePattern {
    Exact(TypeDescriptor),
    Open { base: Arc<str>, arity: usize },
}

impl TypePattern {
    pub fn exact<T: ?Sized + 'static>() -> Self {
        TypePattern::Exact(TypeDescriptor::of::<T>())
    }

    /// Open shape of the generic type `W`, e.g. `TypePattern::open::<C<()>>()`
    /// for `C<_>`. The witness arguments are discarded.
    pub fn open<W: ?Sized + 'static>() -> Self {
        Self::open_from(&TypeDescriptor::of::<W>())
    }

    /// Open shape of `descriptor`; non-generic descriptors stay exact.
    pub fn open_from(descriptor: &TypeDescriptor) -> Self {
        if descriptor.is_generic() {
            TypePattern::Open {
                base: Arc::clone(&descriptor.base),
                arity: descriptor.arity(),
            }
        } else {
            TypePattern::Exact(descriptor.clone())
        }
    }

    pub fn matches(&self, descriptor: &TypeDescriptor) -> bool {
        match self {
            TypePattern::Exact(exact) => exact == descriptor,
            TypePattern::Open { base, arity } => {
                *base == descriptor.base && *arity == descriptor.arity()
            }
        }
    }

    pub fn as_exact(&self) -> Option<&TypeDescriptor> {
        match self {
            TypePattern::Exact(exact) => Some(exact),
            TypePattern::Open { .. } => None,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, TypePattern::Open { .. })
    }
}

impl From<TypeDescriptor> for TypePattern {
    fn from(descriptor: TypeDescriptor) -> Self {
        TypePattern::Exact(descriptor)
    }
}

impl fmt::Display for TypePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypePattern::Exact(exact) => write!(f, "{}", exact),
            TypePattern::Open { base, arity } => {
                let holes = vec!["_"; *arity];
                write!(f, "{}<{}>", strip_paths(base), holes.join(", "))
            }
        }
    }
}

impl Serialize for TypePattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Splits `base<a, b>` into `base` and its top-level arguments.
fn split_generic(name: &str) -> Option<(&str, Vec<&str>)> {
    if !name.ends_with('>') {
        return None;
    }
    let open = first_top_level_angle(name)?;
    let inner = &name[open + 1..name.len() - 1];
    Some((&name[..open], split_top_level(inner)))
}

fn first_top_level_angle(name: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in name.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '<' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

fn split_top_level(inner: &str) -> Vec<&str> {
    let bytes = inner.as_bytes();
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'<' | b'(' | b'[' => depth += 1,
            // `->` in fn signatures is not a closing bracket
            b'>' if i > 0 && bytes[i - 1] == b'-' => {}
            b'>' | b')' | b']' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                parts.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    let last = inner[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

/// Drops module prefixes: `dyn app::IA + core::marker::Send` -> `dyn IA + Send`.
fn strip_paths(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment_start = 0;
    let mut chars = name.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if c == ':' && name[i..].starts_with("::") {
            out.truncate(segment_start);
            chars.next();
            continue;
        }
        out.push(c);
        if !(c.is_alphanumeric() || c == '_') {
            segment_start = out.len();
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    struct C<T>(T);
    #[allow(dead_code)]
    struct F<T, U>(T, U);
    trait Marker {}

    #[test]
    fn test_closed_generics_are_distinct() {
        let c_int = TypeDescriptor::of::<C<i32>>();
        let c_string = TypeDescriptor::of::<C<String>>();
        assert_ne!(c_int, c_string);
        assert_eq!(c_int, TypeDescriptor::of::<C<i32>>());
        assert_eq!(c_int.base(), c_string.base());
        assert_eq!(c_int.arity(), 1);
        assert_eq!(c_int.to_string(), "C<i32>");
        assert_eq!(c_string.to_string(), "C<String>");
    }

    #[test]
    fn test_parse_nested_arguments() {
        let d = TypeDescriptor::parse("app::F<app::C<alloc::vec::Vec<u8>>, (i32, u8)>");
        assert_eq!(d.base(), "app::F");
        assert_eq!(d.arity(), 2);
        assert_eq!(d.args()[0].base(), "app::C");
        assert_eq!(d.args()[0].args()[0].base(), "alloc::vec::Vec");
        assert_eq!(d.args()[1].base(), "(i32, u8)");
        assert_eq!(d.to_string(), "F<C<Vec<u8>>, (i32, u8)>");
    }

    #[test]
    fn test_parse_fn_arrow_inside_arguments() {
        let d = TypeDescriptor::parse("app::C<alloc::boxed::Box<dyn core::ops::Fn(i32) -> i32>>");
        assert_eq!(d.arity(), 1);
        assert_eq!(d.args()[0].arity(), 1);
        assert_eq!(d.args()[0].args()[0].base(), "dyn core::ops::Fn(i32) -> i32");
    }

    #[test]
    fn test_trait_objects() {
        let d = TypeDescriptor::of::<dyn Marker>();
        assert!(d.is_trait_object());
        assert_eq!(d.to_string(), "dyn Marker");
        assert!(!TypeDescriptor::of::<C<u8>>().is_trait_object());
    }

    #[test]
    fn test_open_pattern_matches_every_instantiation() {
        let open = TypePattern::open::<C<()>>();
        assert!(open.is_open());
        assert!(open.matches(&TypeDescriptor::of::<C<i32>>()));
        assert!(open.matches(&TypeDescriptor::of::<C<String>>()));
        assert!(!open.matches(&TypeDescriptor::of::<F<i32, i32>>()));
        assert_eq!(open.to_string(), "C<_>");

        let exact = TypePattern::exact::<C<i32>>();
        assert!(exact.matches(&TypeDescriptor::of::<C<i32>>()));
        assert!(!exact.matches(&TypeDescriptor::of::<C<u8>>()));
        assert_eq!(TypePattern::open::<F<(), ()>>().to_string(), "F<_, _>");
    }
}

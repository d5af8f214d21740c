//! Null-tolerant configuration handle.
//!
//! # Responsibilities
//! - Wrap an optional borrowed node of the configuration tree
//! - Descend by field name without ever failing
//! - Read typed scalars, falling back to the caller's default
//!
//! # Design Decisions
//! - Handles are `Copy` and borrow the tree; they never extend its lifetime
//! - Absence and type mismatch both collapse to the default
//! - No coercion between scalar types (a `"1"` string is not an integer)

use std::any::Any;
use std::fmt;
use std::time::Duration;

use super::reflect::{Reflect, Scalar};

/// A handle that is either present (points at a node) or absent.
#[derive(Clone, Copy)]
pub struct SafeAccess<'a> {
    node: Option<&'a dyn Reflect>,
}

impl<'a> SafeAccess<'a> {
    /// Wrap a node. An unset optional yields an absent handle.
    pub fn new(node: &'a dyn Reflect) -> Self {
        Self { node: node.resolve() }
    }

    /// A handle that points at nothing.
    pub fn absent() -> Self {
        Self { node: None }
    }

    /// Descend into a named field (or map key).
    pub fn field(self, name: &str) -> Self {
        Self {
            node: self
                .node
                .and_then(|n| n.field(name))
                .and_then(|child| child.resolve()),
        }
    }

    /// Descend along a dotted path, e.g. `"Monitoring.Metrics.Endpoint"`.
    pub fn path(self, dotted: &str) -> Self {
        dotted
            .split('.')
            .filter(|segment| !segment.is_empty())
            .fold(self, |handle, segment| handle.field(segment))
    }

    /// The wrapped node, if present.
    pub fn value(self) -> Option<&'a dyn Reflect> {
        self.node
    }

    /// The wrapped node downcast to a concrete type.
    pub fn value_as<T: Any>(self) -> Option<&'a T> {
        self.node.and_then(|n| n.as_any().downcast_ref::<T>())
    }

    pub fn is_present(self) -> bool {
        self.node.is_some()
    }

    pub fn is_absent(self) -> bool {
        self.node.is_none()
    }

    /// Scalar at this handle, if it is a leaf.
    pub fn scalar(self) -> Option<Scalar<'a>> {
        self.node.and_then(|n| n.scalar())
    }

    pub fn bool(self, default: bool) -> bool {
        match self.scalar() {
            Some(Scalar::Bool(v)) => v,
            _ => default,
        }
    }

    pub fn int(self, default: i64) -> i64 {
        match self.scalar() {
            Some(Scalar::Int(v)) => v,
            _ => default,
        }
    }

    /// Non-negative integer read. Negative values fall back to `default`.
    pub fn uint(self, default: u64) -> u64 {
        match self.scalar() {
            Some(Scalar::Int(v)) => u64::try_from(v).unwrap_or(default),
            _ => default,
        }
    }

    pub fn float(self, default: f64) -> f64 {
        match self.scalar() {
            Some(Scalar::Float(v)) => v,
            _ => default,
        }
    }

    /// String read. Borrows from the tree when present, so no allocation.
    pub fn string<'b>(self, default: &'b str) -> &'b str
    where
        'a: 'b,
    {
        match self.scalar() {
            Some(Scalar::Str(v)) => v,
            _ => default,
        }
    }

    pub fn string_or_empty(self) -> &'a str {
        self.string("")
    }

    pub fn duration(self, default: Duration) -> Duration {
        match self.scalar() {
            Some(Scalar::Duration(v)) => v,
            _ => default,
        }
    }

    /// Shorthand for `field("Enabled").bool(default)`.
    pub fn enabled(self, default: bool) -> bool {
        self.field("Enabled").bool(default)
    }
}

impl Default for SafeAccess<'_> {
    fn default() -> Self {
        Self::absent()
    }
}

impl<'a, T: Reflect> From<&'a T> for SafeAccess<'a> {
    fn from(node: &'a T) -> Self {
        Self::new(node)
    }
}

impl fmt::Debug for SafeAccess<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node {
            Some(n) => write!(f, "SafeAccess({})", n.type_name()),
            None => write!(f, "SafeAccess(absent)"),
        }
    }
}

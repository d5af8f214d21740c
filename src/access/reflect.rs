//! Field-table reflection over configuration records.
//!
//! # Responsibilities
//! - Give every configuration node a uniform, object-safe surface
//! - Publish a static name → child table for records
//! - Report scalar leaves with their dynamic type
//!
//! # Design Decisions
//! - Record tables are emitted by `reflect_record!`, no runtime reflection
//! - `Option::None` resolves to "no node"; `Some(v)` is transparent
//! - String-keyed maps answer `field` by key lookup
//! - All integer widths report `Scalar::Int`; floats report `Scalar::Float`

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

/// A scalar leaf value borrowed from the configuration tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(&'a str),
    Duration(Duration),
}

/// A node of the configuration tree.
pub trait Reflect: Any {
    /// Diagnostic name of the node's concrete type.
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Child node by public field name (or map key).
    fn field(&self, _name: &str) -> Option<&dyn Reflect> {
        None
    }

    /// Scalar value if this node is a leaf.
    fn scalar(&self) -> Option<Scalar<'_>> {
        None
    }

    /// The node that actually exists behind this one, if any.
    ///
    /// Wrappers such as `Option` override this so that an unset optional
    /// section is indistinguishable from a missing one.
    fn resolve(&self) -> Option<&dyn Reflect>;

    fn as_any(&self) -> &dyn Any;
}

/// Emit a `Reflect` implementation for a record from its field table.
///
/// ```ignore
/// reflect_record!(Database {
///     "Enabled" => enabled,
///     "TablePrefix" => table_prefix,
/// });
/// ```
#[macro_export]
macro_rules! reflect_record {
    ($ty:ty { $($name:literal => $field:ident),* $(,)? }) => {
        impl $crate::access::Reflect for $ty {
            fn type_name(&self) -> &'static str {
                stringify!($ty)
            }

            fn field(&self, name: &str) -> Option<&dyn $crate::access::Reflect> {
                match name {
                    $($name => Some(&self.$field),)*
                    _ => None,
                }
            }

            fn resolve(&self) -> Option<&dyn $crate::access::Reflect> {
                Some(self)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }
        }
    };
}

macro_rules! reflect_int {
    ($($t:ty),*) => {
        $(
            impl Reflect for $t {
                fn scalar(&self) -> Option<Scalar<'_>> {
                    i64::try_from(*self).ok().map(Scalar::Int)
                }

                fn resolve(&self) -> Option<&dyn Reflect> {
                    Some(self)
                }

                fn as_any(&self) -> &dyn Any {
                    self
                }
            }
        )*
    };
}

reflect_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl Reflect for bool {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Bool(*self))
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for f32 {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Float(f64::from(*self)))
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for f64 {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Float(*self))
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for String {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Str(self.as_str()))
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Reflect for Duration {
    fn scalar(&self) -> Option<Scalar<'_>> {
        Some(Scalar::Duration(*self))
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for Option<T> {
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        self.as_ref().and_then(|v| v.field(name))
    }

    fn scalar(&self) -> Option<Scalar<'_>> {
        self.as_ref().and_then(|v| v.scalar())
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        self.as_ref().and_then(|v| v.resolve())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for BTreeMap<String, T> {
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        self.get(name).map(|v| v as &dyn Reflect)
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<T: Reflect> Reflect for HashMap<String, T> {
    fn field(&self, name: &str) -> Option<&dyn Reflect> {
        self.get(name).map(|v| v as &dyn Reflect)
    }

    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// Sequences are opaque leaves: reachable through `value`, never a scalar.
impl<T: Reflect> Reflect for Vec<T> {
    fn resolve(&self) -> Option<&dyn Reflect> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Gauge {
        enabled: bool,
        label: String,
        nested: Option<Inner>,
    }

    struct Inner {
        level: u8,
    }

    reflect_record!(Gauge {
        "Enabled" => enabled,
        "Label" => label,
        "Nested" => nested,
    });

    reflect_record!(Inner { "Level" => level });

    #[test]
    fn test_record_table_lookup() {
        let gauge = Gauge {
            enabled: true,
            label: "edge".into(),
            nested: Some(Inner { level: 3 }),
        };

        assert_eq!(gauge.field("Enabled").and_then(|f| f.scalar()), Some(Scalar::Bool(true)));
        assert_eq!(gauge.field("Label").and_then(|f| f.scalar()), Some(Scalar::Str("edge")));
        assert!(gauge.field("enabled").is_none()); // Case sensitive
        assert!(gauge.field("Missing").is_none());

        let level = gauge
            .field("Nested")
            .and_then(|n| n.field("Level"))
            .and_then(|l| l.scalar());
        assert_eq!(level, Some(Scalar::Int(3)));
        assert_eq!(gauge.type_name(), "Gauge");
    }

    #[test]
    fn test_none_resolves_to_nothing() {
        let unset: Option<Inner> = None;
        assert!(unset.resolve().is_none());

        let set = Some(Inner { level: 1 });
        assert!(set.resolve().is_some());
    }

    #[test]
    fn test_integer_widths() {
        assert_eq!(7u16.scalar(), Some(Scalar::Int(7)));
        assert_eq!((-2i32).scalar(), Some(Scalar::Int(-2)));
        assert_eq!(u64::MAX.scalar(), None);
        assert_eq!(1.5f32.scalar(), Some(Scalar::Float(1.5)));
    }

    #[test]
    fn test_map_lookup_by_key() {
        let mut map = BTreeMap::new();
        map.insert("daily".to_string(), true);
        assert_eq!(map.field("daily").and_then(|v| v.scalar()), Some(Scalar::Bool(true)));
        assert!(map.field("weekly").is_none());
    }
}

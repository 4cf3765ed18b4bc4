//! Value object trait: equality by value, not identity.

/// A self-validating, immutable wrapper around a primitive.
///
/// Value objects have **no identity**: two instances holding the same primitive
/// are equal. The only way to obtain one is through its validating constructor,
/// so holding a value object proves the wrapped primitive is valid. There is no
/// mutation API; a "changed" value is a newly constructed instance.
///
/// ```ignore
/// let a = CourseName::new("Rust Basics")?;
/// let b = CourseName::new("Rust Basics")?;
/// assert_eq!(a, b);
/// assert_eq!(a.value(), "Rust Basics");
/// ```
pub trait ValueObject: Clone + Eq + core::fmt::Debug {
    /// Underlying primitive representation.
    type Primitive: ?Sized;

    /// Read-only access to the wrapped primitive.
    fn value(&self) -> &Self::Primitive;
}

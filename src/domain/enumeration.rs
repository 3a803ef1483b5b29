// src/domain/enumeration.rs
//
// Closed-set identity values.
//
// Area and station kinds are fixed at build time. They are modelled as
// typed values rather than strings so that the internal vocabulary and the
// code vocabulary of each external service cannot drift apart.

/// A closed set of values with a stable integer identity and display name.
///
/// Equality and ordering of implementors follow `id()`.
pub trait Enumeration: Sized + Copy + 'static {
    fn id(&self) -> i32;

    fn name(&self) -> &'static str;

    /// Every value of the set, in identity order.
    fn all() -> &'static [Self];

    fn from_id(id: i32) -> Option<Self> {
        Self::all().iter().copied().find(|value| value.id() == id)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|value| value.name() == name)
    }
}

/// A closed set whose values map one-to-one onto an external short code.
pub trait CodeIdentified: Sized + Copy + 'static {
    /// The code the external service uses for this value.
    fn code_id(&self) -> &'static str;

    fn variants() -> &'static [Self];

    /// Reverse lookup. Empty or unknown codes yield `None`.
    fn from_code_id(code: &str) -> Option<Self> {
        if code.is_empty() {
            return None;
        }
        Self::variants()
            .iter()
            .copied()
            .find(|value| value.code_id() == code)
    }
}

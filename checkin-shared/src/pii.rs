use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Contact details (email, phone) of a booking holder.
///
/// `Debug` and `Display` print a fixed mask so a booking can go through
/// `tracing::info!("{:?}", booking)` without leaking the value. Serialization
/// is transparent: API responses carry the real value.
#[derive(Clone, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Masked<T>(pub T);

impl<T> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }

    /// Borrow the unmasked value, e.g. for search matching.
    pub fn expose(&self) -> &T {
        &self.0
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Masked(value)
    }
}

use serde::{Deserialize, Deserializer, Serialize};

/// Represents optional field semantics in PUT/PATCH requests.
///
/// - `Unchanged` → key absent from the body (needs `#[serde(default)]` on the struct)
/// - `SetToNull` → key present with `null`
/// - `SetToValue` → key present with a value
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub enum OptionField<T> {
    #[default]
    Unchanged,
    SetToNull,
    SetToValue(T),
}

impl<'de, T> Deserialize<'de> for OptionField<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present, so `None` means an explicit null.
        Ok(match Option::<T>::deserialize(deserializer)? {
            None => OptionField::SetToNull,
            Some(value) => OptionField::SetToValue(value),
        })
    }
}

// ---------------------- Helpers ----------------------

impl<T> OptionField<T> {
    /// `None` when unchanged, `Some(None)` for an explicit null.
    pub fn into_option(self) -> Option<Option<T>> {
        match self {
            Self::Unchanged => None,
            Self::SetToNull => Some(None),
            Self::SetToValue(v) => Some(Some(v)),
        }
    }

    /// Converts the inner value of `SetToValue`, keeping the other states.
    pub fn try_map_value<U, E, F>(self, f: F) -> Result<OptionField<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(match self {
            Self::Unchanged => OptionField::Unchanged,
            Self::SetToNull => OptionField::SetToNull,
            Self::SetToValue(v) => OptionField::SetToValue(f(v)?),
        })
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }

    pub fn is_set_to_null(&self) -> bool {
        matches!(self, Self::SetToNull)
    }
}

pub type PatchString = OptionField<String>;
pub type PatchVec<T> = OptionField<Vec<T>>;

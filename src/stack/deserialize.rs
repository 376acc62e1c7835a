// ABOUTME: Custom serde deserializers for stack documents.
// ABOUTME: Treats an explicit null the same as an absent field.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default, so `tags: ~` behaves like no `tags` key.
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let opt = Option::<T>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

pub mod account;
pub mod chore;
pub mod household;
pub mod money;
pub mod notification;
pub mod review;
pub mod transaction;

pub use account::*;
pub use chore::*;
pub use household::*;
pub use money::*;
pub use notification::*;
pub use review::*;
pub use transaction::*;

use serde::{Deserialize, Deserializer};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

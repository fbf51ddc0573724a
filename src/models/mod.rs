//! Data models for the Rota 67 web service.
//!
//! Article types mirror the CMS (Strapi v5 flat) JSON shape; generation types
//! mirror the webhook and the public `/api/news-generator` contract.

mod article;
mod generation;

pub use article::*;
pub use generation::*;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

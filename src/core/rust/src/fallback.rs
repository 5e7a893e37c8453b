/* src/core/rust/src/fallback.rs */

use std::future::Future;

use crate::errors::SourceError;
use crate::runtime::BoxFuture;

type AttemptFn<'a, T> = Box<dyn FnOnce() -> BoxFuture<'a, Result<T, SourceError>> + Send + 'a>;

/// One labelled attempt in an ordered fallback chain.
pub struct Tier<'a, T> {
  label: &'static str,
  attempt: AttemptFn<'a, T>,
}

impl<'a, T: Send + 'a> Tier<'a, T> {
  pub fn new<F, Fut>(label: &'static str, attempt: F) -> Self
  where
    F: FnOnce() -> Fut + Send + 'a,
    Fut: Future<Output = Result<T, SourceError>> + Send + 'a,
  {
    let attempt: AttemptFn<'a, T> =
      Box::new(move || -> BoxFuture<'a, Result<T, SourceError>> { Box::pin(attempt()) });
    Self { label, attempt }
  }

  pub fn label(&self) -> &'static str {
    self.label
  }
}

/// Run tiers left to right, one at a time, and return the first success
/// together with the label of the tier that produced it.
pub async fn first_success<T>(tiers: Vec<Tier<'_, T>>) -> Option<(&'static str, T)> {
  for tier in tiers {
    let label = tier.label;
    match (tier.attempt)().await {
      Ok(value) => {
        tracing::debug!(tier = label, "source succeeded");
        return Some((label, value));
      }
      Err(e) => {
        let reason = if e.is_unavailable() { "unavailable" } else { "invalid" };
        tracing::warn!(tier = label, reason, error = %e, "source failed, falling through");
      }
    }
  }
  None
}

/// A tier that runs `attempt`, and on failure runs it exactly once more with
/// no delay in between.
pub fn retry_once<'a, T, F, Fut>(label: &'static str, attempt: F) -> Tier<'a, T>
where
  T: Send + 'a,
  F: Fn() -> Fut + Send + 'a,
  Fut: Future<Output = Result<T, SourceError>> + Send + 'a,
{
  Tier::new(label, move || async move {
    match attempt().await {
      Ok(value) => Ok(value),
      Err(e) => {
        tracing::warn!(tier = label, error = %e, "first attempt failed, retrying once");
        attempt().await
      }
    }
  })
}

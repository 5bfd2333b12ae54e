use std::fmt::Display;

/// A locally projected value waiting for the store to confirm it.
///
/// Show `projected()` right away, then hand the store's answer to
/// [`Tentative::reconcile`]. On failure the previous value comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tentative<T> {
    previous: T,
    projected: T,
}

impl<T> Tentative<T> {
    pub fn new(previous: T, projected: T) -> Self {
        Self {
            previous,
            projected,
        }
    }

    pub fn previous(&self) -> &T {
        &self.previous
    }

    pub fn projected(&self) -> &T {
        &self.projected
    }

    /// The authoritative value: the store's on success, `previous` on failure.
    pub fn reconcile<E: Display>(self, outcome: Result<T, E>) -> T {
        match outcome {
            Ok(confirmed) => confirmed,
            Err(e) => {
                log::warn!("store rejected tentative update, rolling back: {}", e);
                self.previous
            }
        }
    }
}

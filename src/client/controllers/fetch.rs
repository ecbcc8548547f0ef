use chrono::{DateTime, Utc};

use crate::client::services::api_client::ApiError;

/// Reactive state for one remote resource. Mutated only by the owning
/// [`FetchController`]; read by the views.
#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<ApiError>,
    pub last_fetched_at: Option<DateTime<Utc>>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
            last_fetched_at: None,
        }
    }
}

/// Generic per-resource fetch controller. Every fetch gets a sequence
/// ticket; a resolution carrying a stale ticket is discarded, so the
/// displayed data always belongs to the most recently issued request
/// ("last request wins").
#[derive(Debug)]
pub struct FetchController<T> {
    state: FetchState<T>,
    seq: u64,
}

impl<T> Default for FetchController<T> {
    fn default() -> Self {
        Self {
            state: FetchState::default(),
            seq: 0,
        }
    }
}

impl<T> FetchController<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a fetch: enters `loading`, clears any prior error so a stale
    /// error is never displayed alongside a spinner, and returns the ticket
    /// the resolution must present.
    pub fn begin(&mut self) -> u64 {
        self.seq += 1;
        self.state.loading = true;
        self.state.error = None;
        self.seq
    }

    /// Applies a resolution. Returns false (and changes nothing) when the
    /// ticket is stale, i.e. a newer fetch was issued in the meantime.
    /// On error the data is cleared entirely: no partial results.
    pub fn complete(&mut self, ticket: u64, result: Result<T, ApiError>) -> bool {
        if ticket != self.seq {
            return false;
        }
        self.state.loading = false;
        match result {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
                self.state.last_fetched_at = Some(Utc::now());
            }
            Err(err) => {
                self.state.data = None;
                self.state.error = Some(err);
            }
        }
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    /// True when this source has never been activated (used to auto-fetch
    /// on first view activation).
    pub fn is_untouched(&self) -> bool {
        self.seq == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn err(status: u16, message: &str) -> ApiError {
        ApiError {
            message: message.to_string(),
            status,
            payload: Value::Null,
        }
    }

    #[test]
    fn first_fetch_resolves_normally() {
        let mut ctl = FetchController::<u32>::new();
        assert!(ctl.is_untouched());
        let t = ctl.begin();
        assert!(ctl.is_loading());
        assert!(ctl.complete(t, Ok(7)));
        assert_eq!(ctl.state().data, Some(7));
        assert!(!ctl.is_loading());
        assert!(ctl.state().last_fetched_at.is_some());
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let mut ctl = FetchController::<u32>::new();
        let first = ctl.begin();
        let second = ctl.begin();

        // the newer request resolves first
        assert!(ctl.complete(second, Ok(2)));
        // the older one arrives late and must not overwrite
        assert!(!ctl.complete(first, Ok(1)));
        assert_eq!(ctl.state().data, Some(2));
    }

    #[test]
    fn stale_resolution_while_newer_in_flight_keeps_loading() {
        let mut ctl = FetchController::<u32>::new();
        let first = ctl.begin();
        let _second = ctl.begin();

        assert!(!ctl.complete(first, Ok(1)));
        assert!(ctl.is_loading());
        assert_eq!(ctl.state().data, None);
    }

    #[test]
    fn error_clears_data_entirely() {
        let mut ctl = FetchController::<u32>::new();
        let t = ctl.begin();
        ctl.complete(t, Ok(5));

        let t = ctl.begin();
        ctl.complete(t, Err(err(500, "boom")));
        assert_eq!(ctl.state().data, None);
        assert_eq!(ctl.state().error.as_ref().unwrap().message, "boom");
    }

    #[test]
    fn refresh_clears_prior_error() {
        let mut ctl = FetchController::<u32>::new();
        let t = ctl.begin();
        ctl.complete(t, Err(err(500, "boom")));
        assert!(ctl.state().error.is_some());

        ctl.begin();
        assert!(ctl.state().error.is_none());
        assert!(ctl.is_loading());
    }

    #[test]
    fn error_round_trips_unchanged_through_state() {
        let original = ApiError {
            message: "quota exceeded".to_string(),
            status: 429,
            payload: serde_json::json!({"error": "quota exceeded", "retry_after": 30}),
        };
        let mut ctl = FetchController::<u32>::new();
        let t = ctl.begin();
        ctl.complete(t, Err(original.clone()));
        assert_eq!(ctl.state().error.as_ref().unwrap(), &original);
    }
}

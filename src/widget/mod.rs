//! Fetch cycle controller: settings → request → transport → render → view.

use crate::client::HttpTransport;
use crate::context::SessionContext;
use crate::error::{FetchError, Result};
use crate::render::render;
use crate::request::{build_for_session, validate_endpoint};
use crate::settings::{SettingsStore, WidgetSettings};
use crate::view::{DisplayInstructions, ViewState};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub struct Widget {
    transport: HttpTransport,
    store: Arc<dyn SettingsStore>,
    session: SessionContext,
    state: Mutex<ViewState>,
    in_flight: AtomicBool,
}

/// Releases admission when a trigger ends, including when its future is
/// dropped mid-await. A cycle abandoned in `Loading` falls back to `Idle`.
struct InFlight<'a> {
    flag: &'a AtomicBool,
    state: &'a Mutex<ViewState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Ok(mut guard) = self.state.lock()
            && guard.is_loading()
        {
            tracing::debug!("fetch cycle abandoned, view back to idle");
            *guard = ViewState::Idle;
        }
        self.flag.store(false, Ordering::Release);
    }
}

impl Widget {
    pub fn new(
        transport: HttpTransport,
        store: Arc<dyn SettingsStore>,
        session: SessionContext,
    ) -> Self {
        Self {
            transport,
            store,
            session,
            state: Mutex::new(ViewState::Idle),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn state(&self) -> ViewState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_default()
    }

    fn set_state(&self, next: ViewState) {
        if let Ok(mut guard) = self.state.lock() {
            let from = guard.to_string();
            tracing::debug!(%from, to = %next, "view transition");
            *guard = next;
        }
    }

    pub fn settings(&self) -> Result<WidgetSettings> {
        WidgetSettings::load(self.store.as_ref())
    }

    /// Persist edited fields immediately.
    pub fn update_settings(&self, settings: &WidgetSettings) -> Result<()> {
        settings.save(self.store.as_ref())
    }

    /// Run one fetch cycle and return what the display should now show.
    ///
    /// Only [`FetchError::Busy`] is returned as an error: every other failure
    /// lands in [`ViewState::Error`] and the widget stays usable.
    pub async fn trigger(&self) -> Result<DisplayInstructions> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("trigger rejected, request already in flight");
            return Err(FetchError::Busy);
        }
        let _in_flight = InFlight {
            flag: &self.in_flight,
            state: &self.state,
        };

        let next = match self.fetch_and_render().await {
            Ok(markup) => ViewState::Success(markup),
            Err(e) => {
                tracing::warn!(error = %e, "fetch cycle failed");
                ViewState::Error(e.user_message())
            }
        };
        self.set_state(next);
        Ok(self.state().display())
    }

    async fn fetch_and_render(&self) -> Result<String> {
        let settings = self.settings()?;
        validate_endpoint(&settings.endpoint)?;

        self.set_state(ViewState::Loading);

        let credential = Some(settings.credential.as_str());
        let spec = build_for_session(&settings.endpoint, &settings.method, credential, &self.session)?;
        let value = self.transport.execute(&spec).await?;
        let markup = render(&value, 0);

        // Fields may have been edited while the request was in flight.
        let store = self.store.as_ref();
        if let Err(e) = WidgetSettings::load(store).and_then(|current| current.save(store)) {
            tracing::warn!(error = %e, "failed to persist settings after successful fetch");
        }
        Ok(markup)
    }
}

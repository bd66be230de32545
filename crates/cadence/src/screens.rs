//! Headless screen models.
//!
//! Screens only ever talk to the bus. They hold no loop handle, so they can
//! be mounted before the loop exists and keep working after it is dropped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cadence_core::{DispatchError, EventBus, Login, RequestTogglePlay, TogglePlay};

/// Landing screen with a single login button.
#[derive(Debug)]
pub struct LandingScreen {
    bus: EventBus,
    visible: Arc<AtomicBool>,
}

impl LandingScreen {
    /// Shows the screen and starts listening for `login`.
    #[must_use]
    pub fn mount(bus: &EventBus) -> Self {
        let visible = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&visible);
        bus.on(move |_: &Login| {
            if flag.swap(false, Ordering::AcqRel) {
                tracing::debug!("landing screen removed");
            }
        });

        Self {
            bus: bus.clone(),
            visible,
        }
    }

    /// Presses the login button.
    ///
    /// # Errors
    ///
    /// Returns whatever the `login` dispatch returns.
    pub fn login(&self) -> Result<(), DispatchError> {
        self.bus.fire(Login)
    }

    /// Whether the screen is still shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Acquire)
    }
}

/// Play/pause toggle of the game screen.
///
/// The icon follows `togglePlay`, never its own presses: a press that the loop
/// ignores leaves the icon unchanged.
#[derive(Debug)]
pub struct PlayButton {
    bus: EventBus,
    playing: Arc<AtomicBool>,
}

impl PlayButton {
    /// Mounts the button, initially showing "paused".
    #[must_use]
    pub fn mount(bus: &EventBus) -> Self {
        let playing = Arc::new(AtomicBool::new(false));
        let icon = Arc::clone(&playing);
        bus.on(move |toggle: &TogglePlay| {
            icon.store(toggle.play, Ordering::Release);
        });

        Self {
            bus: bus.clone(),
            playing,
        }
    }

    /// Asks the loop to enter the state opposite to the one shown.
    ///
    /// # Errors
    ///
    /// Returns whatever the `requestTogglePlay` dispatch returns.
    pub fn press(&self) -> Result<(), DispatchError> {
        let play = !self.is_playing();
        tracing::debug!(play, "play button pressed");
        self.bus.fire(RequestTogglePlay { play })
    }

    /// Whether the last `togglePlay` said the loop is running.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

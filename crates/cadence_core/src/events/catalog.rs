//! # Event Catalog
//!
//! The closed set of events the bus knows about.
//!
//! Kinds, payload shapes and registry slots are generated from the single
//! `event_catalog!` invocation at the bottom of this file. Adding an event
//! means adding one line there plus its payload struct; the enum, the
//! registry slot and the [`Event`] impl cannot drift apart.

use std::fmt;

use super::registry::ListenerList;

/// A payload type that can travel over the bus.
///
/// Implemented only by the payloads in this catalog: the slot accessors need
/// the private fields of [`Registry`], so the trait is closed to the outside.
pub trait Event: fmt::Debug + Send + Sync + Sized + 'static {
    /// The kind this payload belongs to.
    const KIND: EventKind;

    /// Listener list for this kind.
    #[doc(hidden)]
    fn slot(registry: &Registry) -> &ListenerList<Self>;

    /// Mutable listener list for this kind.
    #[doc(hidden)]
    fn slot_mut(registry: &mut Registry) -> &mut ListenerList<Self>;
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Payload of `loop`: one accepted tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopTick {
    /// Milliseconds since the previous accepted tick.
    pub delta: f64,
}

/// Payload of `togglePlay`: authoritative play/pause notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TogglePlay {
    /// `true` once the loop is running, `false` once it paused.
    pub play: bool,
}

/// Payload of `requestTogglePlay`: ask the loop to enter a state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTogglePlay {
    /// Requested state.
    pub play: bool,
}

/// Payload of `login`: the user asked to log in from the landing screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Login;

// =============================================================================
// CATALOG
// =============================================================================

macro_rules! event_catalog {
    ($(
        $(#[$meta:meta])*
        $variant:ident($payload:ty) => $slot:ident, $name:literal;
    )+) => {
        /// Closed set of event kinds known to the bus.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum EventKind {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl EventKind {
            /// Every kind, in declaration order.
            pub const ALL: &'static [EventKind] = &[$(EventKind::$variant),+];

            /// Wire name of the kind.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(EventKind::$variant => $name,)+
                }
            }
        }

        /// Listener lists for every kind.
        ///
        /// One slot per kind exists from construction on; slots are never
        /// removed. Owned by an [`EventBus`](super::EventBus).
        #[derive(Default)]
        pub struct Registry {
            $($slot: ListenerList<$payload>,)+
        }

        impl Registry {
            /// Number of listeners currently registered for `kind`.
            #[must_use]
            pub fn listener_count(&self, kind: EventKind) -> usize {
                match kind {
                    $(EventKind::$variant => self.$slot.len(),)+
                }
            }
        }

        $(
            impl Event for $payload {
                const KIND: EventKind = EventKind::$variant;

                #[inline]
                fn slot(registry: &Registry) -> &ListenerList<Self> {
                    &registry.$slot
                }

                #[inline]
                fn slot_mut(registry: &mut Registry) -> &mut ListenerList<Self> {
                    &mut registry.$slot
                }
            }
        )+
    };
}

event_catalog! {
    /// Fired by the loop on every accepted tick.
    Loop(LoopTick) => on_loop, "loop";
    /// Fired by the loop on every play/pause transition.
    TogglePlay(TogglePlay) => on_toggle_play, "togglePlay";
    /// Fired by any consumer that wants the loop to play or pause.
    RequestTogglePlay(RequestTogglePlay) => on_request_toggle_play, "requestTogglePlay";
    /// Fired by the landing screen's login button.
    Login(Login) => on_login, "login";
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind.as_str(), &self.listener_count(*kind));
        }
        map.finish()
    }
}

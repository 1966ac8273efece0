//! Stack-based screen state machine.
//!
//! Every accepted trigger moves to exactly one target screen and rewrites the
//! back stack according to the transition's [`Eviction`]. Triggers that are
//! not listed for the current screen are refused without touching state.

use shared::{
    error::NavigationError,
    screen::{Screen, Transition, Trigger},
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::checkout::CheckoutFlow;

pub const ENTRY_SCREEN: Screen = Screen::Splash;

/// How a transition rewrites history before the target becomes current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    /// Current screen is pushed so back navigation can return to it.
    None,
    /// Current screen is dropped instead of pushed.
    Current,
    /// History is unwound through the most recent entry for the screen
    /// (inclusive) and the current screen is dropped.
    UpToInclusive(Screen),
}

/// The transition table. `None` means the trigger is not valid on `from`.
pub fn route(from: Screen, trigger: &Trigger) -> Option<(Screen, Eviction)> {
    let step = match (from, trigger) {
        (Screen::Splash, Trigger::SplashTimeout) => (Screen::Login, Eviction::Current),

        (Screen::Login, Trigger::SubmitCredentials(_)) => (Screen::Home, Eviction::Current),
        (Screen::Login, Trigger::OpenSignup) => (Screen::Signup, Eviction::Current),

        (Screen::Signup, Trigger::SubmitSignup(_)) => (Screen::Home, Eviction::Current),
        (Screen::Signup, Trigger::BackToLogin) => (Screen::Login, Eviction::Current),

        (Screen::Home, Trigger::SelectRestaurant(restaurant_id)) => {
            (Screen::Menu(*restaurant_id), Eviction::None)
        }
        (Screen::Home, Trigger::OpenCart) => (Screen::Cart, Eviction::None),
        (Screen::Home, Trigger::OpenProfile) => (Screen::Profile, Eviction::None),
        (Screen::Home, Trigger::OpenOrderHistory) => (Screen::OrderHistory, Eviction::None),

        (Screen::Menu(_), Trigger::OpenCart) => (Screen::Cart, Eviction::None),

        (Screen::Cart, Trigger::Checkout) => (Screen::Checkout, Eviction::None),

        (Screen::Checkout, Trigger::ChooseCash) => (Screen::CashPayment, Eviction::None),
        (Screen::Checkout, Trigger::ChooseCard) => (Screen::CardPayment, Eviction::None),

        (Screen::CashPayment | Screen::CardPayment, Trigger::ConfirmPayment(_)) => {
            (Screen::Success, Eviction::None)
        }

        (Screen::Success, Trigger::GoHome) => {
            (Screen::Home, Eviction::UpToInclusive(Screen::Home))
        }

        _ => return None,
    };
    Some(step)
}

#[derive(Debug)]
pub struct Navigator {
    current: Screen,
    history: Vec<Screen>,
    screen_tx: watch::Sender<Screen>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        let (screen_tx, _) = watch::channel(ENTRY_SCREEN);
        Self {
            current: ENTRY_SCREEN,
            history: Vec::new(),
            screen_tx,
        }
    }

    pub fn current(&self) -> Screen {
        self.current
    }

    /// Prior screens, oldest first.
    pub fn history(&self) -> &[Screen] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.screen_tx.subscribe()
    }

    pub fn dispatch(&mut self, trigger: &Trigger) -> Result<Transition, NavigationError> {
        let from = self.current;
        let Some((to, eviction)) = route(from, trigger) else {
            let err = NavigationError::InvalidTrigger {
                screen: from,
                trigger: trigger.name(),
            };
            warn!(screen = %from, trigger = trigger.name(), "rejected navigation trigger");
            return Err(err);
        };

        match eviction {
            Eviction::None => self.history.push(from),
            Eviction::Current => {
                debug!(evicted = %from, "dropped current screen from history");
            }
            Eviction::UpToInclusive(anchor) => {
                match self.history.iter().rposition(|screen| *screen == anchor) {
                    Some(index) => self.history.truncate(index),
                    None => self.history.clear(),
                }
                debug!(anchor = %anchor, "unwound history to a fresh root");
            }
        }

        Ok(self.enter(from, to, Some(trigger.name())))
    }

    /// Pops one history entry and restores it unchanged.
    pub fn back(&mut self) -> Result<Transition, NavigationError> {
        let from = self.current;
        let Some(to) = self.history.pop() else {
            warn!(screen = %from, "back navigation with empty history");
            return Err(NavigationError::NoPriorEntry { screen: from });
        };
        Ok(self.enter(from, to, None))
    }

    /// Restricted view for the payment sequence; `None` outside of it.
    pub fn checkout(&mut self) -> Option<CheckoutFlow<'_>> {
        if self.current.is_checkout_step() {
            Some(CheckoutFlow::new(self))
        } else {
            None
        }
    }

    fn enter(&mut self, from: Screen, to: Screen, trigger: Option<&'static str>) -> Transition {
        self.current = to;
        self.screen_tx.send_replace(to);
        let transition = Transition {
            from,
            to,
            trigger,
            history_depth: self.history.len(),
        };
        info!(
            from = %from,
            to = %to,
            trigger = trigger.unwrap_or("back"),
            history_depth = transition.history_depth,
            "navigated"
        );
        transition
    }
}

#[cfg(test)]
#[path = "tests/navigator_tests.rs"]
mod tests;

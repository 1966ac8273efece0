//! Payment sequence: Checkout, then cash or card entry, then Success and back
//! to a fresh Home.
//!
//! Payment details are carried through untouched. Card number, expiry and CVV
//! are never read, so empty or garbage input still confirms.

use serde::{Deserialize, Serialize};
use shared::{
    error::NavigationError,
    screen::{PaymentDetails, Screen, Transition, Trigger},
};
use tracing::info;

use crate::navigator::Navigator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
}

impl PaymentMethod {
    fn trigger(self) -> Trigger {
        match self {
            PaymentMethod::Cash => Trigger::ChooseCash,
            PaymentMethod::Card => Trigger::ChooseCard,
        }
    }
}

pub struct CheckoutFlow<'a> {
    navigator: &'a mut Navigator,
}

impl<'a> CheckoutFlow<'a> {
    pub(crate) fn new(navigator: &'a mut Navigator) -> Self {
        Self { navigator }
    }

    pub fn step(&self) -> Screen {
        self.navigator.current()
    }

    pub fn choose(&mut self, method: PaymentMethod) -> Result<Transition, NavigationError> {
        self.navigator.dispatch(&method.trigger())
    }

    pub fn confirm(&mut self, details: PaymentDetails) -> Result<Transition, NavigationError> {
        let method = details.method();
        let transition = self.navigator.dispatch(&Trigger::ConfirmPayment(details))?;
        info!(method, "payment confirmed");
        Ok(transition)
    }

    pub fn go_home(&mut self) -> Result<Transition, NavigationError> {
        self.navigator.dispatch(&Trigger::GoHome)
    }
}

#[cfg(test)]
#[path = "tests/checkout_tests.rs"]
mod tests;

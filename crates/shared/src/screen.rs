use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::RestaurantId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "restaurant_id", rename_all = "snake_case")]
pub enum Screen {
    Splash,
    Login,
    Signup,
    Home,
    Menu(RestaurantId),
    Cart,
    Profile,
    OrderHistory,
    Checkout,
    CashPayment,
    CardPayment,
    Success,
}

impl Screen {
    pub fn is_checkout_step(&self) -> bool {
        matches!(
            self,
            Screen::Checkout | Screen::CashPayment | Screen::CardPayment | Screen::Success
        )
    }

    pub fn title(&self) -> String {
        match self {
            Screen::Splash => "QuickBite".to_string(),
            Screen::Login => "Login".to_string(),
            Screen::Signup => "Sign Up".to_string(),
            Screen::Home => "Restaurants".to_string(),
            Screen::Menu(restaurant_id) => format!("Menu for Restaurant {restaurant_id}"),
            Screen::Cart => "Your Cart".to_string(),
            Screen::Profile => "Your Profile".to_string(),
            Screen::OrderHistory => "Order History".to_string(),
            Screen::Checkout => "Choose Payment Method".to_string(),
            Screen::CashPayment => "Pay with Cash".to_string(),
            Screen::CardPayment => "Pay with Card".to_string(),
            Screen::Success => "Order Successful!".to_string(),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Splash => f.write_str("splash"),
            Screen::Login => f.write_str("login"),
            Screen::Signup => f.write_str("signup"),
            Screen::Home => f.write_str("home"),
            Screen::Menu(restaurant_id) => write!(f, "menu/{restaurant_id}"),
            Screen::Cart => f.write_str("cart"),
            Screen::Profile => f.write_str("profile"),
            Screen::OrderHistory => f.write_str("order_history"),
            Screen::Checkout => f.write_str("checkout"),
            Screen::CashPayment => f.write_str("cash_payment"),
            Screen::CardPayment => f.write_str("card_payment"),
            Screen::Success => f.write_str("success"),
        }
    }
}

/// Login form contents. Accepted as-is; nothing checks them.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("confirm_password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetails {
    pub card_number: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "details", rename_all = "snake_case")]
pub enum PaymentDetails {
    Cash,
    Card(CardDetails),
}

impl PaymentDetails {
    pub fn method(&self) -> &'static str {
        match self {
            PaymentDetails::Cash => "cash",
            PaymentDetails::Card(_) => "card",
        }
    }
}

/// User-initiated (or timer-initiated) navigation actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Trigger {
    SplashTimeout,
    SubmitCredentials(Credentials),
    OpenSignup,
    SubmitSignup(SignupForm),
    BackToLogin,
    SelectRestaurant(RestaurantId),
    /// Cart icon on Home, "view cart" on a menu.
    OpenCart,
    OpenProfile,
    OpenOrderHistory,
    Checkout,
    ChooseCash,
    ChooseCard,
    ConfirmPayment(PaymentDetails),
    GoHome,
}

impl Trigger {
    pub fn name(&self) -> &'static str {
        match self {
            Trigger::SplashTimeout => "splash_timeout",
            Trigger::SubmitCredentials(_) => "submit_credentials",
            Trigger::OpenSignup => "open_signup",
            Trigger::SubmitSignup(_) => "submit_signup",
            Trigger::BackToLogin => "back_to_login",
            Trigger::SelectRestaurant(_) => "select_restaurant",
            Trigger::OpenCart => "open_cart",
            Trigger::OpenProfile => "open_profile",
            Trigger::OpenOrderHistory => "open_order_history",
            Trigger::Checkout => "checkout",
            Trigger::ChooseCash => "choose_cash",
            Trigger::ChooseCard => "choose_card",
            Trigger::ConfirmPayment(_) => "confirm_payment",
            Trigger::GoHome => "go_home",
        }
    }
}

/// Result of an accepted navigation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Screen,
    pub to: Screen,
    /// `None` for back navigation.
    pub trigger: Option<&'static str>,
    pub history_depth: usize,
}

use shared::{
    domain::RestaurantId,
    screen::{CardDetails, Credentials, PaymentDetails, SignupForm},
};

use super::*;

fn logged_in() -> Navigator {
    let mut nav = Navigator::new();
    nav.dispatch(&Trigger::SplashTimeout).expect("timeout");
    nav.dispatch(&Trigger::SubmitCredentials(Credentials::default()))
        .expect("login");
    nav
}

#[test]
fn starts_on_splash_with_no_history() {
    let nav = Navigator::new();
    assert_eq!(nav.current(), Screen::Splash);
    assert!(nav.history().is_empty());
    assert!(!nav.can_go_back());
}

#[test]
fn splash_timeout_evicts_splash() {
    let mut nav = Navigator::new();
    let transition = nav.dispatch(&Trigger::SplashTimeout).expect("timeout");
    assert_eq!(transition.from, Screen::Splash);
    assert_eq!(transition.to, Screen::Login);
    assert_eq!(transition.history_depth, 0);

    let err = nav.back().expect_err("splash must be unreachable");
    assert_eq!(err, NavigationError::NoPriorEntry { screen: Screen::Login });
    assert_eq!(nav.current(), Screen::Login);
}

#[test]
fn auth_screens_are_a_one_way_gate() {
    let mut nav = Navigator::new();
    nav.dispatch(&Trigger::SplashTimeout).expect("timeout");
    nav.dispatch(&Trigger::OpenSignup).expect("signup");
    assert!(nav.history().is_empty());

    nav.dispatch(&Trigger::BackToLogin).expect("back to login");
    assert_eq!(nav.current(), Screen::Login);
    assert!(nav.history().is_empty());

    nav.dispatch(&Trigger::OpenSignup).expect("signup again");
    nav.dispatch(&Trigger::SubmitSignup(SignupForm::default()))
        .expect("signup submit");
    assert_eq!(nav.current(), Screen::Home);
    assert!(nav.back().is_err());
}

#[test]
fn login_accepts_any_credentials() {
    let mut nav = Navigator::new();
    nav.dispatch(&Trigger::SplashTimeout).expect("timeout");
    nav.dispatch(&Trigger::SubmitCredentials(Credentials {
        email: "not an email".into(),
        password: String::new(),
    }))
    .expect("login");
    assert_eq!(nav.current(), Screen::Home);
}

#[test]
fn browse_transitions_push_and_back_restores() {
    let mut nav = logged_in();
    nav.dispatch(&Trigger::SelectRestaurant(RestaurantId(3)))
        .expect("menu");
    nav.dispatch(&Trigger::OpenCart).expect("cart");
    assert_eq!(nav.history(), &[Screen::Home, Screen::Menu(RestaurantId(3))]);

    let transition = nav.back().expect("back to menu");
    assert_eq!(transition.to, Screen::Menu(RestaurantId(3)));
    assert_eq!(transition.trigger, None);
    nav.back().expect("back to home");
    assert_eq!(nav.current(), Screen::Home);
    assert!(nav.back().is_err());
}

#[test]
fn home_icons_open_their_screens() {
    for (trigger, expected) in [
        (Trigger::OpenCart, Screen::Cart),
        (Trigger::OpenProfile, Screen::Profile),
        (Trigger::OpenOrderHistory, Screen::OrderHistory),
    ] {
        let mut nav = logged_in();
        nav.dispatch(&trigger).expect("icon");
        assert_eq!(nav.current(), expected);
        assert_eq!(nav.history(), &[Screen::Home]);
    }
}

#[test]
fn invalid_trigger_leaves_state_unchanged() {
    let mut nav = logged_in();
    nav.dispatch(&Trigger::OpenProfile).expect("profile");
    let history_before = nav.history().to_vec();

    let err = nav.dispatch(&Trigger::Checkout).expect_err("not from profile");
    assert_eq!(
        err,
        NavigationError::InvalidTrigger {
            screen: Screen::Profile,
            trigger: "checkout",
        }
    );
    assert_eq!(nav.current(), Screen::Profile);
    assert_eq!(nav.history(), history_before.as_slice());
}

#[test]
fn splash_rejects_everything_but_timeout() {
    let mut nav = Navigator::new();
    for trigger in [
        Trigger::SubmitCredentials(Credentials::default()),
        Trigger::OpenCart,
        Trigger::GoHome,
        Trigger::ConfirmPayment(PaymentDetails::Cash),
    ] {
        assert!(nav.dispatch(&trigger).is_err());
        assert_eq!(nav.current(), Screen::Splash);
    }
}

#[test]
fn checkout_is_reachable_without_cart_contents() {
    let mut nav = logged_in();
    nav.dispatch(&Trigger::OpenCart).expect("cart");
    nav.dispatch(&Trigger::Checkout).expect("checkout");
    assert_eq!(nav.current(), Screen::Checkout);
}

#[test]
fn success_go_home_leaves_fresh_root() {
    let mut nav = logged_in();
    nav.dispatch(&Trigger::SelectRestaurant(RestaurantId(3)))
        .expect("menu");
    nav.dispatch(&Trigger::OpenCart).expect("cart");
    nav.dispatch(&Trigger::Checkout).expect("checkout");
    nav.dispatch(&Trigger::ChooseCard).expect("card");
    nav.dispatch(&Trigger::ConfirmPayment(PaymentDetails::Card(
        CardDetails::default(),
    )))
    .expect("confirm");
    assert_eq!(nav.current(), Screen::Success);
    assert_eq!(nav.history().len(), 5);

    let transition = nav.dispatch(&Trigger::GoHome).expect("home");
    assert_eq!(transition.to, Screen::Home);
    assert_eq!(transition.history_depth, 0);
    assert!(nav.history().is_empty());
    assert!(nav.back().is_err());
}

#[test]
fn back_navigation_can_revisit_payment_choice() {
    let mut nav = logged_in();
    nav.dispatch(&Trigger::OpenCart).expect("cart");
    nav.dispatch(&Trigger::Checkout).expect("checkout");
    nav.dispatch(&Trigger::ChooseCash).expect("cash");
    nav.back().expect("back to checkout");
    nav.dispatch(&Trigger::ChooseCard).expect("card");
    assert_eq!(nav.current(), Screen::CardPayment);
}

#[test]
fn unwind_without_anchor_clears_history() {
    let mut nav = Navigator::new();
    nav.current = Screen::Success;
    nav.history = vec![Screen::Cart, Screen::Checkout, Screen::CashPayment];

    nav.dispatch(&Trigger::GoHome).expect("home");
    assert_eq!(nav.current(), Screen::Home);
    assert!(nav.history().is_empty());
}

#[test]
fn subscribers_observe_every_transition() {
    let mut nav = Navigator::new();
    let mut screens = nav.subscribe();
    assert_eq!(*screens.borrow(), Screen::Splash);

    nav.dispatch(&Trigger::SplashTimeout).expect("timeout");
    assert!(screens.has_changed().expect("sender alive"));
    assert_eq!(*screens.borrow_and_update(), Screen::Login);

    assert!(nav.dispatch(&Trigger::GoHome).is_err());
    assert!(!screens.has_changed().expect("sender alive"));
}

#[test]
fn route_table_rejects_cart_from_profile() {
    assert!(route(Screen::Profile, &Trigger::OpenCart).is_none());
    assert_eq!(
        route(Screen::Menu(RestaurantId(1)), &Trigger::OpenCart),
        Some((Screen::Cart, Eviction::None))
    );
}

#[test]
fn route_table_accepts_exactly_the_listed_pairs() {
    let screens = [
        Screen::Splash,
        Screen::Login,
        Screen::Signup,
        Screen::Home,
        Screen::Menu(RestaurantId(2)),
        Screen::Cart,
        Screen::Profile,
        Screen::OrderHistory,
        Screen::Checkout,
        Screen::CashPayment,
        Screen::CardPayment,
        Screen::Success,
    ];
    let triggers = [
        Trigger::SplashTimeout,
        Trigger::SubmitCredentials(Credentials::default()),
        Trigger::OpenSignup,
        Trigger::SubmitSignup(SignupForm::default()),
        Trigger::BackToLogin,
        Trigger::SelectRestaurant(RestaurantId(2)),
        Trigger::OpenCart,
        Trigger::OpenProfile,
        Trigger::OpenOrderHistory,
        Trigger::Checkout,
        Trigger::ChooseCash,
        Trigger::ChooseCard,
        Trigger::ConfirmPayment(PaymentDetails::Cash),
        Trigger::GoHome,
    ];

    let mut accepted = Vec::new();
    for screen in screens {
        for trigger in &triggers {
            if let Some((to, _)) = route(screen, trigger) {
                accepted.push((screen, trigger.name(), to));
            }
        }
    }

    let menu = Screen::Menu(RestaurantId(2));
    let expected = vec![
        (Screen::Splash, "splash_timeout", Screen::Login),
        (Screen::Login, "submit_credentials", Screen::Home),
        (Screen::Login, "open_signup", Screen::Signup),
        (Screen::Signup, "submit_signup", Screen::Home),
        (Screen::Signup, "back_to_login", Screen::Login),
        (Screen::Home, "select_restaurant", menu),
        (Screen::Home, "open_cart", Screen::Cart),
        (Screen::Home, "open_profile", Screen::Profile),
        (Screen::Home, "open_order_history", Screen::OrderHistory),
        (menu, "open_cart", Screen::Cart),
        (Screen::Cart, "checkout", Screen::Checkout),
        (Screen::Checkout, "choose_cash", Screen::CashPayment),
        (Screen::Checkout, "choose_card", Screen::CardPayment),
        (Screen::CashPayment, "confirm_payment", Screen::Success),
        (Screen::CardPayment, "confirm_payment", Screen::Success),
        (Screen::Success, "go_home", Screen::Home),
    ];
    assert_eq!(accepted.len(), 16);
    assert_eq!(accepted, expected);
}

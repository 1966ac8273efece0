use std::time::Duration;

use shared::{
    error::RejectionCode,
    screen::{CardDetails, Credentials},
};

use super::*;

fn settings() -> SessionSettings {
    SessionSettings {
        splash_delay_ms: 2000,
        event_capacity: 64,
    }
}

fn start_session() -> OrderSession {
    OrderSession::start(&settings(), Arc::new(StaticCatalog::new()))
}

async fn wait_for_splash() {
    tokio::time::sleep(Duration::from_millis(2001)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn splash_times_out_into_login() {
    let session = start_session();
    assert_eq!(session.current_screen().await, Screen::Splash);
    assert!(session.splash_pending().await);

    tokio::time::sleep(Duration::from_millis(1500)).await;
    assert_eq!(session.current_screen().await, Screen::Splash);

    wait_for_splash().await;
    assert_eq!(session.current_screen().await, Screen::Login);
    assert!(!session.splash_pending().await);

    let err = session.back().await.expect_err("splash evicted");
    assert_eq!(err.code(), RejectionCode::NoPriorEntry);
}

#[tokio::test(start_paused = true)]
async fn splash_timeout_fires_exactly_once() {
    let session = start_session();
    let mut events = session.subscribe_events();

    wait_for_splash().await;
    session
        .dispatch(Trigger::SubmitCredentials(Credentials::default()))
        .await
        .expect("login");
    tokio::time::sleep(Duration::from_secs(30)).await;

    let mut navigations = 0;
    while let Ok(event) = events.try_recv() {
        match event {
            SessionEvent::Navigated(_) => navigations += 1,
            other => panic!("unexpected event: {other:?}"),
        }
    }
    assert_eq!(navigations, 2);
    assert_eq!(session.current_screen().await, Screen::Home);
}

#[tokio::test(start_paused = true)]
async fn dropped_session_never_fires_timeout() {
    let session = start_session();
    let mut screens = session.subscribe_screen();
    drop(session);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(*screens.borrow_and_update(), Screen::Splash);
}

#[tokio::test(start_paused = true)]
async fn shutdown_cancels_pending_timeout() {
    let session = start_session();
    session.shutdown().await;
    assert!(!session.splash_pending().await);

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.current_screen().await, Screen::Splash);
}

#[tokio::test(start_paused = true)]
async fn manual_timeout_cancels_scheduled_one() {
    let session = start_session();
    session
        .dispatch(Trigger::SplashTimeout)
        .await
        .expect("manual timeout");
    assert!(!session.splash_pending().await);
    session.dispatch(Trigger::OpenSignup).await.expect("signup");

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(session.current_screen().await, Screen::Signup);
}

#[tokio::test(start_paused = true)]
async fn rejected_trigger_is_reported_not_fatal() {
    let session = start_session();
    let mut events = session.subscribe_events();

    let err = session
        .dispatch(Trigger::Checkout)
        .await
        .expect_err("checkout from splash");
    assert_eq!(
        err,
        NavigationError::InvalidTrigger {
            screen: Screen::Splash,
            trigger: "checkout",
        }
    );
    assert_eq!(session.current_screen().await, Screen::Splash);

    match events.try_recv().expect("rejection event") {
        SessionEvent::TriggerRejected(rejection) => {
            assert_eq!(rejection.code, RejectionCode::InvalidTrigger);
            assert_eq!(rejection.screen, Screen::Splash);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn checkout_steps_outside_sequence_are_rejected() {
    let session = start_session();
    wait_for_splash().await;

    let err = session
        .confirm_payment(PaymentDetails::Cash)
        .await
        .expect_err("not at checkout");
    assert_eq!(
        err,
        NavigationError::InvalidTrigger {
            screen: Screen::Login,
            trigger: "confirm_payment",
        }
    );
    assert!(session.return_home().await.is_err());
    assert_eq!(session.current_screen().await, Screen::Login);
}

#[tokio::test(start_paused = true)]
async fn cart_scenario_merges_repeat_adds() {
    let session = start_session();
    let mut cart_rx = session.subscribe_cart();
    let pizza = session
        .find_menu_item(RestaurantId(1), 6)
        .expect("margherita");

    session.add_to_cart(&pizza, 2, "").await;
    session.add_to_cart(&pizza, 1, "extra cheese").await;

    let contents = session.cart_contents().await;
    assert_eq!(contents.len(), 1);
    assert_eq!(contents[0].quantity, 3);
    assert_eq!(contents[0].customization, "extra cheese");
    assert_eq!(session.cart_total().await, Decimal::new(2997, 2));

    assert!(cart_rx.has_changed().expect("cart alive"));
    assert_eq!(cart_rx.borrow_and_update()[0].quantity, 3);
}

#[tokio::test(start_paused = true)]
async fn dialog_input_coerces_quantity() {
    let session = start_session();
    let fries = session.find_menu_item(RestaurantId(2), 14).expect("fries");

    session.add_to_cart_from_input(&fries, "lots", "").await;
    session.add_to_cart_from_input(&fries, "2", "salted").await;

    let contents = session.cart_contents().await;
    assert_eq!(contents[0].quantity, 3);
    assert_eq!(session.cart_total().await, Decimal::new(699 * 3, 2));
}

#[tokio::test(start_paused = true)]
async fn cart_events_skip_absent_removals() {
    let session = start_session();
    let mut events = session.subscribe_events();
    let beer = session.find_menu_item(RestaurantId(1), 20).expect("beer");

    session.add_to_cart(&beer, 1, "").await;
    assert!(!session.remove_from_cart(MenuItemId(404)).await);
    assert!(session.remove_from_cart(MenuItemId(20)).await);

    let mut updates = Vec::new();
    while let Ok(SessionEvent::CartUpdated { lines, total }) = events.try_recv() {
        updates.push((lines, total));
    }
    assert_eq!(
        updates,
        vec![(1, Decimal::new(599, 2)), (0, Decimal::ZERO)]
    );
}

#[tokio::test(start_paused = true)]
async fn sessions_are_independent() {
    let first = start_session();
    let second = start_session();
    assert_ne!(first.id(), second.id());

    let cake = first.find_menu_item(RestaurantId(5), 17).expect("cake");
    first.add_to_cart(&cake, 1, "").await;
    wait_for_splash().await;
    first
        .dispatch(Trigger::SubmitCredentials(Credentials::default()))
        .await
        .expect("login");

    assert!(second.cart_contents().await.is_empty());
    assert_eq!(second.current_screen().await, Screen::Login);
    assert_eq!(first.current_screen().await, Screen::Home);
}

#[tokio::test(start_paused = true)]
async fn full_order_round_trip_ends_on_fresh_home() {
    let session = start_session();
    let mut screens = session.subscribe_screen();
    wait_for_splash().await;

    session
        .dispatch(Trigger::SubmitCredentials(Credentials::default()))
        .await
        .expect("login");
    session
        .dispatch(Trigger::SelectRestaurant(RestaurantId(3)))
        .await
        .expect("menu");
    session.dispatch(Trigger::OpenCart).await.expect("cart");
    session.dispatch(Trigger::Checkout).await.expect("checkout");
    session
        .choose_payment(PaymentMethod::Card)
        .await
        .expect("card");
    session
        .confirm_payment(PaymentDetails::Card(CardDetails::default()))
        .await
        .expect("confirm");
    assert_eq!(session.current_screen().await, Screen::Success);

    let transition = session.return_home().await.expect("home");
    assert_eq!(transition.history_depth, 0);
    assert!(session.history().await.is_empty());
    assert!(!session.can_go_back().await);
    assert!(session.back().await.is_err());
    assert_eq!(*screens.borrow_and_update(), Screen::Home);
}

#[tokio::test(start_paused = true)]
async fn catalog_passthroughs() {
    let session = start_session();
    assert_eq!(session.restaurants("").len(), 5);
    assert_eq!(session.restaurants("burg").len(), 1);
    assert!(session.menu(RestaurantId(77)).is_empty());
}

//! Order session controller: cart aggregation plus the screen state machine
//! that a presentation layer drives.

use std::sync::Arc;

use rust_decimal::Decimal;
use shared::{
    domain::{CartLine, MenuItem, MenuItemId, Restaurant, RestaurantId, SessionId},
    error::{NavigationError, Rejection},
    screen::{PaymentDetails, Screen, Transition, Trigger},
};
use tokio::sync::{broadcast, watch, Mutex};
use tracing::{info, info_span, warn, Span};

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod navigator;
pub mod timer;

pub use cart::{parse_quantity, CartStore};
pub use catalog::{search_restaurants, CatalogProvider, StaticCatalog};
pub use checkout::{CheckoutFlow, PaymentMethod};
pub use config::{load_settings, SessionSettings, MAX_EVENT_CAPACITY};
pub use navigator::Navigator;
pub use timer::OneShotTimer;

const SPLASH_TIMER_LABEL: &str = "splash";

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Navigated(Transition),
    TriggerRejected(Rejection),
    CartUpdated { lines: usize, total: Decimal },
}

/// One user's session: its own cart, navigator and splash timer.
///
/// Sessions share nothing but the catalog. Dropping a session before the
/// splash delay elapses guarantees the timeout never fires.
pub struct OrderSession {
    id: SessionId,
    span: Span,
    catalog: Arc<dyn CatalogProvider>,
    navigator: Arc<Mutex<Navigator>>,
    cart: Mutex<CartStore>,
    splash_timer: Mutex<Option<OneShotTimer>>,
    screen_rx: watch::Receiver<Screen>,
    cart_rx: watch::Receiver<Vec<CartLine>>,
    events: broadcast::Sender<SessionEvent>,
}

impl OrderSession {
    /// Builds the cart store and navigator in `Splash` and arms the splash
    /// timeout. Must be called from within a tokio runtime.
    pub fn start(settings: &SessionSettings, catalog: Arc<dyn CatalogProvider>) -> Self {
        let id = SessionId::new();
        let span = info_span!("order_session", session_id = %id);
        let capacity = settings.event_capacity.clamp(1, MAX_EVENT_CAPACITY);
        let (events, _) = broadcast::channel(capacity);

        let navigator = Navigator::new();
        let screen_rx = navigator.subscribe();
        let navigator = Arc::new(Mutex::new(navigator));

        let cart = CartStore::new();
        let cart_rx = cart.subscribe();

        let splash_timer = {
            let navigator = Arc::clone(&navigator);
            let events = events.clone();
            let span = span.clone();
            OneShotTimer::schedule(SPLASH_TIMER_LABEL, settings.splash_delay(), move || {
                async move {
                    let mut nav = navigator.lock().await;
                    let outcome = span.in_scope(|| nav.dispatch(&Trigger::SplashTimeout));
                    publish_outcome(&events, &outcome);
                }
            })
        };

        span.in_scope(|| {
            info!(
                splash_delay_ms = settings.splash_delay_ms,
                "order session started"
            )
        });

        Self {
            id,
            span,
            catalog,
            navigator,
            cart: Mutex::new(cart),
            splash_timer: Mutex::new(Some(splash_timer)),
            screen_rx,
            cart_rx,
            events,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub async fn current_screen(&self) -> Screen {
        self.navigator.lock().await.current()
    }

    pub async fn history(&self) -> Vec<Screen> {
        self.navigator.lock().await.history().to_vec()
    }

    pub async fn can_go_back(&self) -> bool {
        self.navigator.lock().await.can_go_back()
    }

    pub async fn dispatch(&self, trigger: Trigger) -> Result<Transition, NavigationError> {
        let mut nav = self.navigator.lock().await;
        let outcome = self.span.in_scope(|| nav.dispatch(&trigger));
        self.settle(outcome).await
    }

    pub async fn back(&self) -> Result<Transition, NavigationError> {
        let mut nav = self.navigator.lock().await;
        let outcome = self.span.in_scope(|| nav.back());
        self.settle(outcome).await
    }

    pub async fn choose_payment(
        &self,
        method: PaymentMethod,
    ) -> Result<Transition, NavigationError> {
        let trigger_name = match method {
            PaymentMethod::Cash => Trigger::ChooseCash.name(),
            PaymentMethod::Card => Trigger::ChooseCard.name(),
        };
        self.with_checkout(trigger_name, |flow| flow.choose(method))
            .await
    }

    /// Details are forwarded without inspection; any input confirms.
    pub async fn confirm_payment(
        &self,
        details: PaymentDetails,
    ) -> Result<Transition, NavigationError> {
        self.with_checkout("confirm_payment", |flow| flow.confirm(details))
            .await
    }

    pub async fn return_home(&self) -> Result<Transition, NavigationError> {
        self.with_checkout(Trigger::GoHome.name(), |flow| flow.go_home())
            .await
    }

    pub fn restaurants(&self, query: &str) -> Vec<Restaurant> {
        search_restaurants(self.catalog.as_ref(), query)
    }

    pub fn menu(&self, restaurant_id: RestaurantId) -> Vec<MenuItem> {
        self.catalog.list_menu_items(restaurant_id)
    }

    pub fn find_menu_item(&self, restaurant_id: RestaurantId, item_id: i64) -> Option<MenuItem> {
        self.catalog.find_menu_item(restaurant_id, item_id)
    }

    pub async fn add_to_cart(&self, item: &MenuItem, quantity: i64, customization: &str) {
        let (lines, total) = {
            let mut cart = self.cart.lock().await;
            self.span
                .in_scope(|| cart.add_to_cart(item, quantity, customization));
            (cart.len(), cart.cart_total())
        };
        let _ = self.events.send(SessionEvent::CartUpdated { lines, total });
    }

    /// Dialog entry point: quantity text is coerced, never rejected.
    pub async fn add_to_cart_from_input(
        &self,
        item: &MenuItem,
        quantity_text: &str,
        customization: &str,
    ) {
        let quantity = i64::from(parse_quantity(quantity_text));
        self.add_to_cart(item, quantity, customization).await;
    }

    pub async fn remove_from_cart(&self, line_id: MenuItemId) -> bool {
        let (removed, lines, total) = {
            let mut cart = self.cart.lock().await;
            let removed = self.span.in_scope(|| cart.remove_from_cart(line_id));
            (removed, cart.len(), cart.cart_total())
        };
        if removed {
            let _ = self.events.send(SessionEvent::CartUpdated { lines, total });
        }
        removed
    }

    pub async fn cart_contents(&self) -> Vec<CartLine> {
        self.cart.lock().await.cart_contents()
    }

    pub async fn cart_total(&self) -> Decimal {
        self.cart.lock().await.cart_total()
    }

    pub async fn splash_pending(&self) -> bool {
        self.splash_timer
            .lock()
            .await
            .as_ref()
            .is_some_and(OneShotTimer::is_pending)
    }

    /// Cancels any outstanding deferred work. Further navigation still works.
    pub async fn shutdown(&self) {
        if let Some(mut timer) = self.splash_timer.lock().await.take() {
            timer.cancel();
        }
        self.span.in_scope(|| info!("order session shut down"));
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    /// Latest-value view of the current screen, already marked as seen.
    pub fn subscribe_screen(&self) -> watch::Receiver<Screen> {
        let mut rx = self.screen_rx.clone();
        rx.borrow_and_update();
        rx
    }

    /// Latest-value view of the cart contents, already marked as seen.
    pub fn subscribe_cart(&self) -> watch::Receiver<Vec<CartLine>> {
        let mut rx = self.cart_rx.clone();
        rx.borrow_and_update();
        rx
    }

    async fn with_checkout<F>(
        &self,
        trigger: &'static str,
        step: F,
    ) -> Result<Transition, NavigationError>
    where
        F: FnOnce(&mut CheckoutFlow<'_>) -> Result<Transition, NavigationError>,
    {
        let mut nav = self.navigator.lock().await;
        let screen = nav.current();
        let outcome = self.span.in_scope(|| match nav.checkout() {
            Some(mut flow) => step(&mut flow),
            None => {
                warn!(%screen, trigger, "checkout step outside payment sequence");
                Err(NavigationError::InvalidTrigger { screen, trigger })
            }
        });
        self.settle(outcome).await
    }

    /// Runs while the navigator lock is held, so a pending splash timeout
    /// cannot race a transition that already left `Splash`.
    async fn settle(
        &self,
        outcome: Result<Transition, NavigationError>,
    ) -> Result<Transition, NavigationError> {
        if let Ok(transition) = &outcome {
            if transition.from == Screen::Splash {
                if let Some(mut timer) = self.splash_timer.lock().await.take() {
                    timer.cancel();
                }
            }
        }
        publish_outcome(&self.events, &outcome);
        outcome
    }
}

fn publish_outcome(
    events: &broadcast::Sender<SessionEvent>,
    outcome: &Result<Transition, NavigationError>,
) {
    let event = match outcome {
        Ok(transition) => SessionEvent::Navigated(transition.clone()),
        Err(err) => SessionEvent::TriggerRejected(Rejection::from(err)),
    };
    let _ = events.send(event);
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;

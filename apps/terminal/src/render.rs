//! Text rendering for each screen. Form contents live here, not in the core.

use std::fmt::Write as _;

use client_core::{cart::cart_total_of, OrderSession};
use rust_decimal::Decimal;
use shared::screen::{CardDetails, Screen};

#[derive(Debug, Clone)]
pub struct UiState {
    pub search_query: String,
    pub card_form: CardDetails,
    pub profile_name: String,
    pub profile_address: String,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            search_query: String::new(),
            card_form: CardDetails::default(),
            profile_name: "John Doe".to_string(),
            profile_address: "123 Main St".to_string(),
        }
    }
}

pub fn money(value: Decimal) -> String {
    format!("${value:.2}")
}

pub async fn render_screen(session: &OrderSession, screen: Screen, ui: &UiState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", screen.title());

    match screen {
        Screen::Splash => {
            out.push_str("loading...\n");
        }
        Screen::Login => {
            out.push_str("login <email> <password>   or   signup\n");
        }
        Screen::Signup => {
            out.push_str("register <email>   or   to-login\n");
        }
        Screen::Home => {
            let restaurants = session.restaurants(&ui.search_query);
            if !ui.search_query.is_empty() {
                let _ = writeln!(out, "search: \"{}\"", ui.search_query);
            }
            if restaurants.is_empty() {
                out.push_str("No restaurants match.\n");
            }
            for restaurant in restaurants {
                let _ = writeln!(
                    out,
                    "  [{}] {} - {} ({})",
                    restaurant.id, restaurant.name, restaurant.address, restaurant.cuisine
                );
            }
            out.push_str("open <id> | cart | profile | history\n");
        }
        Screen::Menu(restaurant_id) => {
            let items = session.menu(restaurant_id);
            if items.is_empty() {
                out.push_str("No menu items for this restaurant.\n");
            }
            for item in items {
                let _ = writeln!(out, "  [{}] {}  {}", item.id, item.name, money(item.price));
                let _ = writeln!(out, "      {}", item.description);
            }
            out.push_str("add <item-id> [qty] [customization] | cart | back\n");
        }
        Screen::Cart => {
            let lines = session.cart_contents().await;
            if lines.is_empty() {
                out.push_str("Your cart is empty.\n");
            }
            for line in &lines {
                let _ = writeln!(
                    out,
                    "  [{}] {} x{}  {}",
                    line.id,
                    line.name,
                    line.quantity,
                    money(line.subtotal())
                );
                if !line.customization.is_empty() {
                    let _ = writeln!(out, "      customization: {}", line.customization);
                }
            }
            let _ = writeln!(out, "total: {}", money(cart_total_of(&lines)));
            out.push_str("remove <item-id> | checkout | back\n");
        }
        Screen::Profile => {
            let _ = writeln!(out, "name: {}", ui.profile_name);
            let _ = writeln!(out, "address: {}", ui.profile_address);
            out.push_str("name <text> | address <text> | back\n");
        }
        Screen::OrderHistory => {
            out.push_str("No past orders yet.\nback\n");
        }
        Screen::Checkout => {
            out.push_str("cash | card\n");
        }
        Screen::CashPayment => {
            out.push_str("pay\n");
        }
        Screen::CardPayment => {
            let _ = writeln!(
                out,
                "card number: {}\nexpiry: {}\ncvv: {}",
                masked(&ui.card_form.card_number),
                ui.card_form.expiry_date,
                if ui.card_form.cvv.is_empty() { "" } else { "***" }
            );
            out.push_str("card <number> <expiry> <cvv> | pay\n");
        }
        Screen::Success => {
            out.push_str("home\n");
        }
    }

    out
}

fn masked(card_number: &str) -> String {
    let digits: Vec<char> = card_number.chars().collect();
    if digits.len() <= 4 {
        return card_number.to_string();
    }
    let tail: String = digits[digits.len() - 4..].iter().collect();
    format!("{}{tail}", "*".repeat(digits.len() - 4))
}

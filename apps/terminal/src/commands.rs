//! Typed user input, parsed from one line of terminal text.

use shared::{
    domain::{MenuItemId, RestaurantId},
    screen::{CardDetails, Credentials, SignupForm},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    Login(Credentials),
    OpenSignup,
    Register(SignupForm),
    BackToLogin,
    Search(String),
    Open(RestaurantId),
    Add {
        item_id: i64,
        quantity_text: String,
        customization: String,
    },
    Remove(MenuItemId),
    Cart,
    Profile,
    ProfileName(String),
    ProfileAddress(String),
    History,
    Checkout,
    Cash,
    Card(Option<CardDetails>),
    Pay,
    Home,
    Back,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Command(UserCommand),
    Empty,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  login [email] [password]     sign in (any input is accepted)
  signup | register [email]    open sign-up / submit it
  to-login                     back to the login screen
  search <text>                filter restaurants on Home
  open <restaurant-id>         show a restaurant's menu
  add <item-id> [qty] [notes]  add a menu item to the cart
  remove <item-id>             drop a cart line
  cart | profile | history     open those screens
  name <text> | address <text> edit the profile fields
  checkout | cash | card       walk the payment sequence
  card <number> <expiry> <cvv> fill the card form
  pay                          confirm payment
  home                         return home after a successful order
  back | help | quit";

pub fn parse_command(line: &str) -> ParseOutcome {
    let line = line.trim();
    let Some((verb, rest)) = split_word(line) else {
        return ParseOutcome::Empty;
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "login" => {
            let (email, rest) = split_word(rest).unwrap_or_default();
            UserCommand::Login(Credentials {
                email: email.to_string(),
                password: rest.to_string(),
            })
        }
        "signup" => UserCommand::OpenSignup,
        "register" => UserCommand::Register(SignupForm {
            email: rest.to_string(),
            ..SignupForm::default()
        }),
        "to-login" => UserCommand::BackToLogin,
        "search" => UserCommand::Search(rest.to_string()),
        "open" => match rest.parse::<i64>() {
            Ok(id) => UserCommand::Open(RestaurantId(id)),
            Err(_) => return ParseOutcome::Unknown(line.to_string()),
        },
        "add" => {
            let Some((item, rest)) = split_word(rest) else {
                return ParseOutcome::Unknown(line.to_string());
            };
            let Ok(item_id) = item.parse::<i64>() else {
                return ParseOutcome::Unknown(line.to_string());
            };
            let (quantity_text, customization) = split_word(rest).unwrap_or_default();
            UserCommand::Add {
                item_id,
                quantity_text: quantity_text.to_string(),
                customization: customization.to_string(),
            }
        }
        "remove" => match rest.parse::<i64>() {
            Ok(id) => UserCommand::Remove(MenuItemId(id)),
            Err(_) => return ParseOutcome::Unknown(line.to_string()),
        },
        "cart" => UserCommand::Cart,
        "profile" => UserCommand::Profile,
        "name" if !rest.is_empty() => UserCommand::ProfileName(rest.to_string()),
        "address" if !rest.is_empty() => UserCommand::ProfileAddress(rest.to_string()),
        "history" => UserCommand::History,
        "checkout" => UserCommand::Checkout,
        "cash" => UserCommand::Cash,
        "card" => {
            let fields: Vec<&str> = rest.split_whitespace().collect();
            if fields.is_empty() {
                UserCommand::Card(None)
            } else {
                UserCommand::Card(Some(CardDetails {
                    card_number: fields.first().copied().unwrap_or_default().to_string(),
                    expiry_date: fields.get(1).copied().unwrap_or_default().to_string(),
                    cvv: fields.get(2).copied().unwrap_or_default().to_string(),
                }))
            }
        }
        "pay" | "confirm" => UserCommand::Pay,
        "home" => UserCommand::Home,
        "back" => UserCommand::Back,
        "help" | "?" => UserCommand::Help,
        "quit" | "exit" => UserCommand::Quit,
        _ => return ParseOutcome::Unknown(line.to_string()),
    };

    ParseOutcome::Command(command)
}

fn split_word(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => Some((word, rest.trim())),
        None => Some((input, "")),
    }
}

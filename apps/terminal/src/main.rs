use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::load_settings_from, load_settings, OrderSession, PaymentMethod, SessionEvent,
    StaticCatalog,
};
use shared::screen::{CardDetails, PaymentDetails, Screen, Trigger};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::broadcast::error::RecvError,
};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{parse_command, ParseOutcome, UserCommand, HELP};
use render::{render_screen, UiState};

#[derive(Parser, Debug)]
#[command(name = "quickbite", about = "QuickBite storefront in the terminal")]
struct Args {
    /// Settings file; defaults to ./quickbite.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    splash_delay_ms: Option<u64>,
    /// Print every session event as a JSON line on stderr.
    #[arg(long)]
    trace_events: bool,
}

enum Flow {
    Continue,
    Rerender,
    Quit,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    };
    if let Some(delay) = args.splash_delay_ms {
        settings.splash_delay_ms = delay;
    }

    let session = OrderSession::start(&settings, Arc::new(StaticCatalog::new()));
    let mut screens = session.subscribe_screen();
    let mut events = session.subscribe_events();
    let mut ui = UiState::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let initial = *screens.borrow();
    print!("{}", render_screen(&session, initial, &ui).await);

    loop {
        tokio::select! {
            changed = screens.changed() => {
                if changed.is_err() {
                    break;
                }
                let screen = *screens.borrow_and_update();
                print!("{}", render_screen(&session, screen, &ui).await);
            }
            event = events.recv(), if args.trace_events => {
                match event {
                    Ok(event) => trace_event(&event)?,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "event trace fell behind");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read from stdin")? else {
                    break;
                };
                match handle_line(&session, &mut ui, &line).await {
                    Flow::Continue => {}
                    Flow::Rerender => {
                        let screen = session.current_screen().await;
                        print!("{}", render_screen(&session, screen, &ui).await);
                    }
                    Flow::Quit => break,
                }
            }
        }
    }

    session.shutdown().await;
    Ok(())
}

fn trace_event(event: &SessionEvent) -> Result<()> {
    let json = match event {
        SessionEvent::Navigated(transition) => serde_json::json!({
            "event": "navigated",
            "transition": transition,
        }),
        SessionEvent::TriggerRejected(rejection) => serde_json::json!({
            "event": "trigger_rejected",
            "rejection": rejection,
        }),
        SessionEvent::CartUpdated { lines, total } => serde_json::json!({
            "event": "cart_updated",
            "lines": lines,
            "total": total.to_string(),
        }),
    };
    eprintln!("{}", serde_json::to_string(&json)?);
    Ok(())
}

async fn handle_line(session: &OrderSession, ui: &mut UiState, line: &str) -> Flow {
    let command = match parse_command(line) {
        ParseOutcome::Command(command) => command,
        ParseOutcome::Empty => return Flow::Continue,
        ParseOutcome::Unknown(input) => {
            println!("unknown command: {input}\n{HELP}");
            return Flow::Continue;
        }
    };

    let screen = session.current_screen().await;
    let outcome = match command {
        UserCommand::Login(credentials) => {
            session.dispatch(Trigger::SubmitCredentials(credentials)).await
        }
        UserCommand::OpenSignup => session.dispatch(Trigger::OpenSignup).await,
        UserCommand::Register(form) => session.dispatch(Trigger::SubmitSignup(form)).await,
        UserCommand::BackToLogin => session.dispatch(Trigger::BackToLogin).await,
        UserCommand::Search(query) => {
            ui.search_query = query;
            return rerender_on(screen, Screen::Home);
        }
        UserCommand::Open(restaurant_id) => {
            session
                .dispatch(Trigger::SelectRestaurant(restaurant_id))
                .await
        }
        UserCommand::Add {
            item_id,
            quantity_text,
            customization,
        } => {
            let Screen::Menu(restaurant_id) = screen else {
                println!("open a restaurant menu before adding items");
                return Flow::Continue;
            };
            let Some(item) = session.find_menu_item(restaurant_id, item_id) else {
                println!("no item {item_id} on this menu");
                return Flow::Continue;
            };
            session
                .add_to_cart_from_input(&item, &quantity_text, &customization)
                .await;
            println!("added {} to cart", item.name);
            return Flow::Continue;
        }
        UserCommand::Remove(line_id) => {
            if !session.remove_from_cart(line_id).await {
                println!("item {line_id} is not in the cart");
            }
            return rerender_on(screen, Screen::Cart);
        }
        UserCommand::Cart => session.dispatch(Trigger::OpenCart).await,
        UserCommand::Profile => session.dispatch(Trigger::OpenProfile).await,
        UserCommand::ProfileName(name) => {
            ui.profile_name = name;
            return rerender_on(screen, Screen::Profile);
        }
        UserCommand::ProfileAddress(address) => {
            ui.profile_address = address;
            return rerender_on(screen, Screen::Profile);
        }
        UserCommand::History => session.dispatch(Trigger::OpenOrderHistory).await,
        UserCommand::Checkout => session.dispatch(Trigger::Checkout).await,
        UserCommand::Cash => session.choose_payment(PaymentMethod::Cash).await,
        UserCommand::Card(details) => {
            if let Some(details) = details {
                ui.card_form = details;
            }
            if screen == Screen::CardPayment {
                return Flow::Rerender;
            }
            session.choose_payment(PaymentMethod::Card).await
        }
        UserCommand::Pay => {
            let details = if screen == Screen::CashPayment {
                PaymentDetails::Cash
            } else {
                PaymentDetails::Card(ui.card_form.clone())
            };
            session.confirm_payment(details).await
        }
        UserCommand::Home => session.return_home().await,
        UserCommand::Back => session.back().await,
        UserCommand::Help => {
            println!("{HELP}");
            return Flow::Continue;
        }
        UserCommand::Quit => return Flow::Quit,
    };

    match outcome {
        Ok(transition) if transition.to == Screen::Success => {
            ui.card_form = CardDetails::default();
        }
        Ok(_) => {}
        Err(err) => println!("! {err}"),
    }
    Flow::Continue
}

fn rerender_on(current: Screen, shown_on: Screen) -> Flow {
    if current == shown_on {
        Flow::Rerender
    } else {
        Flow::Continue
    }
}

//! # Customer Session
//!
//! One conversation at the counter, start to receipt.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  welcome                                                                │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  name ◄──── invalid (letters and spaces only)                          │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  anything available? ── no ──► "Sorry, ..." ──► NothingAvailable       │
//! │     │ yes                                                               │
//! │     ▼                                                                   │
//! │  menu ◄──── invalid choice / bad quantity / "No items selected"        │
//! │     │ Done                                                              │
//! │     ▼                                                                   │
//! │  payment ◄── invalid method                                            │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  checkout ── stock moved ──► back to menu with a fresh snapshot        │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  receipt ──► Completed(order)                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! End of input at any prompt ends the session as `Abandoned` without
//! touching the store.

use tracing::{debug, warn};

use till_core::availability::{list_available_items, AvailableItem};
use till_core::reservation::remaining_after;
use till_core::validation::{
    normalize_customer_name, parse_menu_choice, parse_payment_method, parse_quantity,
};
use till_core::{Inventory, Order, PaymentMethod, Selection, MAX_ITEM_QUANTITY};
use till_store::{CheckoutRequest, Store};

use crate::config::TillConfig;
use crate::error::AppResult;
use crate::prompt::Prompt;
use crate::receipt::{render_receipt, RULE};

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Completed(Order),
    /// Nothing on the menu could be assembled.
    NothingAvailable,
    /// Input ended before checkout.
    Abandoned,
}

/// A menu line: the item and how many more of it fit in this cart.
struct MenuEntry {
    item: AvailableItem,
    cap: u32,
}

pub struct Session<'a, P> {
    store: &'a Store,
    config: &'a TillConfig,
    prompt: P,
}

impl<'a, P: Prompt> Session<'a, P> {
    pub fn new(store: &'a Store, config: &'a TillConfig, prompt: P) -> Self {
        Session {
            store,
            config,
            prompt,
        }
    }

    pub fn into_prompt(self) -> P {
        self.prompt
    }

    pub fn run(&mut self) -> AppResult<SessionOutcome> {
        self.welcome()?;

        let Some(customer_name) = self.ask_name()? else {
            return Ok(SessionOutcome::Abandoned);
        };
        debug!(customer = %customer_name, "Customer identified");

        loop {
            let snapshot = self.store.inventory().snapshot()?;
            if list_available_items(self.store.catalog(), &snapshot).is_empty() {
                self.prompt
                    .say("Sorry, no items are available at the moment.")?;
                return Ok(SessionOutcome::NothingAvailable);
            }

            let Some(selection) = self.choose_items(&snapshot)? else {
                return Ok(SessionOutcome::Abandoned);
            };
            let Some(payment_method) = self.ask_payment_method()? else {
                return Ok(SessionOutcome::Abandoned);
            };

            let request = CheckoutRequest {
                customer_name: customer_name.clone(),
                selection,
                payment_method,
            };

            match self.store.checkout(&request, &self.config.discounts) {
                Ok(order) => {
                    for line in render_receipt(&order, self.config) {
                        self.prompt.say(&line)?;
                    }
                    self.prompt.say("Thank you for your order!")?;
                    return Ok(SessionOutcome::Completed(order));
                }
                Err(err) => match err.as_core() {
                    Some(reason) => {
                        warn!(error = %reason, "Checkout rejected, restarting selection");
                        self.prompt.say(&format!(
                            "Your order could not be placed: {}. Please choose again.",
                            reason
                        ))?;
                    }
                    None => return Err(err.into()),
                },
            }
        }
    }

    fn welcome(&mut self) -> AppResult<()> {
        self.prompt.say(RULE)?;
        self.prompt
            .say(&format!("Welcome to {}!", self.config.store.name))?;
        self.prompt.say(RULE)?;
        Ok(())
    }

    fn ask_name(&mut self) -> AppResult<Option<String>> {
        loop {
            let Some(input) = self.prompt.ask("Please enter your full name: ")? else {
                return Ok(None);
            };
            match normalize_customer_name(&input) {
                Ok(name) => return Ok(Some(name)),
                Err(err) => self.prompt.say(&format!("Invalid name: {}", err))?,
            }
        }
    }

    /// Fills a cart against `snapshot`. `None` if input ends.
    fn choose_items(&mut self, snapshot: &Inventory) -> AppResult<Option<Selection>> {
        let catalog = self.store.catalog();
        let mut cart = Selection::new();

        loop {
            let remaining = remaining_after(catalog, snapshot, &cart)?;
            let menu: Vec<MenuEntry> = list_available_items(catalog, &remaining)
                .into_iter()
                .map(|item| {
                    let headroom = MAX_ITEM_QUANTITY.saturating_sub(cart.quantity_of(&item.name));
                    let cap = item.quantity_cap().min(headroom);
                    MenuEntry { item, cap }
                })
                .filter(|entry| entry.cap > 0)
                .collect();

            self.show_menu(&menu)?;
            let done = menu.len() + 1;

            let Some(input) = self.prompt.ask("Enter your choice: ")? else {
                return Ok(None);
            };
            let choice = match parse_menu_choice(&input, done) {
                Ok(choice) => choice,
                Err(err) => {
                    self.prompt.say(&format!("Invalid choice: {}", err))?;
                    continue;
                }
            };

            if choice == done {
                if cart.is_empty() {
                    self.prompt.say("No items selected")?;
                    continue;
                }
                return Ok(Some(cart));
            }

            let entry = &menu[choice - 1];
            let question = format!(
                "Enter quantity for {} (Max: {}): ",
                entry.item.name, entry.cap
            );
            let Some(input) = self.prompt.ask(&question)? else {
                return Ok(None);
            };
            match parse_quantity(&input, entry.cap) {
                Ok(quantity) => {
                    cart.add(&entry.item.name, quantity);
                    self.prompt
                        .say(&format!("Added {} x {}", entry.item.name, quantity))?;
                }
                Err(err) => self.prompt.say(&err.to_string())?,
            }
        }
    }

    fn show_menu(&mut self, menu: &[MenuEntry]) -> AppResult<()> {
        self.prompt.say("")?;
        self.prompt.say("Available items:")?;
        for (index, entry) in menu.iter().enumerate() {
            let mut line = format!(
                "{}. {}: {}",
                index + 1,
                entry.item.name,
                self.config.format_currency(entry.item.price)
            );
            if let Some(discount) = entry.item.discount.filter(|d| !d.is_zero()) {
                line.push_str(&format!(" (Discount: {})", discount));
            }
            line.push_str(&format!(" (Max: {})", entry.cap));
            self.prompt.say(&line)?;
        }
        self.prompt.say(&format!("{}. Done", menu.len() + 1))?;
        Ok(())
    }

    fn ask_payment_method(&mut self) -> AppResult<Option<PaymentMethod>> {
        loop {
            let Some(input) = self
                .prompt
                .ask("Select payment method (1. card, 2. cash): ")?
            else {
                return Ok(None);
            };
            match parse_payment_method(&input) {
                Ok(method) => return Ok(Some(method)),
                Err(err) => self.prompt.say(&err.to_string())?,
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

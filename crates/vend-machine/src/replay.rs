//! # Scripted Purchases
//!
//! Parses and runs a list of buyer actions against one session, the way a
//! technician tests a freshly loaded machine.
//!
//! ## Step Syntax
//! ```text
//! insert:<cents>    drop one coin, e.g. insert:500
//! buy:<name>        withdraw a product by name, e.g. buy:coke
//! cancel            return the deposit as coins
//! ```

use std::fmt;
use std::str::FromStr;

use vend_core::{Change, Money, ProductId, VendError, Vended};

use crate::error::MachineError;
use crate::machine::Machine;

// =============================================================================
// Steps
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Insert(Money),
    Buy(String),
    Cancel,
}

impl FromStr for Step {
    type Err = MachineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| MachineError::InvalidStep {
            step: s.to_string(),
            reason: reason.to_string(),
        };

        let (action, arg) = match s.trim().split_once(':') {
            Some((action, arg)) => (action.trim(), Some(arg.trim())),
            None => (s.trim(), None),
        };

        match (action.to_lowercase().as_str(), arg) {
            ("insert", Some(cents)) => cents
                .parse::<i64>()
                .map(|c| Step::Insert(Money::from_cents(c)))
                .map_err(|_| invalid("coin must be a whole number of cents")),
            ("buy", Some(name)) if !name.is_empty() => Ok(Step::Buy(name.to_string())),
            ("cancel", None) => Ok(Step::Cancel),
            ("insert", None) => Err(invalid("missing coin value")),
            ("buy", _) => Err(invalid("missing product name")),
            _ => Err(invalid("expected insert:<cents>, buy:<name> or cancel")),
        }
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// What the machine did in response to one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Coin taken; carries the deposit afterwards.
    Accepted { deposit: Money },
    Vended(Vended),
    Refunded(Change),
    Refused(VendError),
}

impl Outcome {
    pub fn is_refused(&self) -> bool {
        matches!(self, Outcome::Refused(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Accepted { deposit } => write!(f, "accepted, deposit {}", deposit),
            Outcome::Vended(vended) if vended.change.is_empty() => {
                write!(f, "vended {}, no change", vended.product)
            }
            Outcome::Vended(vended) => {
                write!(f, "vended {}, change {}", vended.product, vended.change)
            }
            Outcome::Refunded(change) if change.is_empty() => write!(f, "nothing to refund"),
            Outcome::Refunded(change) => write!(f, "refunded {}", change),
            Outcome::Refused(err) => write!(f, "refused: {}", err),
        }
    }
}

// =============================================================================
// Replay
// =============================================================================

/// Runs `steps` in order through a single session of `machine`.
///
/// Refusals do not stop the replay; the session stays usable after every
/// `VendError`.
pub fn replay(machine: &Machine, steps: &[Step]) -> Vec<Outcome> {
    let mut session = machine.session();

    steps
        .iter()
        .map(|step| match step {
            Step::Insert(coin) => match session.insert_coin(*coin) {
                Ok(()) => Outcome::Accepted {
                    deposit: session.deposit(),
                },
                Err(err) => Outcome::Refused(err),
            },
            Step::Buy(name) => {
                // Unknown names get an id no product has, so they are refused
                // exactly like a missing product.
                let id = machine.product_id(name).unwrap_or_else(ProductId::new);
                match session.withdraw_product(&id) {
                    Ok(vended) => Outcome::Vended(vended),
                    Err(err) => Outcome::Refused(err),
                }
            }
            Step::Cancel => match session.cancel() {
                Ok(change) => Outcome::Refunded(change),
                Err(err) => Outcome::Refused(err),
            },
        })
        .collect()
}

//! Installment-description parser
//!
//! Turns free-text Portuguese payment-plan descriptions into structured
//! [`Installment`] records. Parsing is a cascade of independent matchers:
//!
//! 1. `lines` - one installment per "parcela" line (the common case)
//! 2. `summary` - "N parcelas de R$ X ... vencível a primeira DD/MM/AAAA"
//! 3. `catalogue` - fixed phrasings from older spreadsheets, accumulated
//!
//! The first stage that produces records wins. Nothing here returns an error:
//! a description no stage understands becomes [`ParseOutcome::NotRecognized`].

pub mod catalogue;
pub mod display;
pub mod line;
mod model;
pub mod schedule;
pub mod summary;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use display::format_installment;
pub use model::{Installment, InstallmentAmount, ParseOutcome, PaymentStatus};

/// A named matcher: returns `None` when its phrasing is absent
#[derive(Clone, Copy)]
pub struct Matcher {
    pub name: &'static str,
    pub run: fn(&str) -> Option<Vec<Installment>>,
}

impl Matcher {
    pub const fn new(name: &'static str, run: fn(&str) -> Option<Vec<Installment>>) -> Self {
        Self { name, run }
    }
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher").field("name", &self.name).finish()
    }
}

fn match_catalogue_deduped(text: &str) -> Option<Vec<Installment>> {
    let found = catalogue::run_catalogue(text, true);
    if found.is_empty() {
        None
    } else {
        Some(found)
    }
}

/// Cascade stages in priority order
pub const CASCADE: &[Matcher] = &[
    Matcher::new("lines", line::match_lines),
    Matcher::new("summary", summary::match_summary),
    Matcher::new("catalogue", match_catalogue_deduped),
];

/// How a description is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// First stage with results wins
    #[default]
    Cascade,
    /// Only the phrase catalogue, accumulating every match without de-duplication
    Legacy,
}

impl ParseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::Cascade => "cascade",
            ParseMode::Legacy => "legacy",
        }
    }
}

impl std::str::FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cascade" => Ok(ParseMode::Cascade),
            "legacy" => Ok(ParseMode::Legacy),
            other => Err(format!("Unknown parser mode '{}'. Use cascade or legacy", other)),
        }
    }
}

/// Parse a description with the default cascade.
///
/// # Examples
/// ```
/// use acordos::installments::{analyze_installments, ParseOutcome};
///
/// let outcome = analyze_installments("1ª parcela de R$ 500,00 até 10/01/2025");
/// assert_eq!(outcome.installments().len(), 1);
///
/// assert_eq!(analyze_installments("pagamento a combinar"), ParseOutcome::NotRecognized);
/// ```
pub fn analyze_installments(text: &str) -> ParseOutcome {
    analyze_installments_with(text, ParseMode::Cascade)
}

/// Parse a description in the given mode.
pub fn analyze_installments_with(text: &str, mode: ParseMode) -> ParseOutcome {
    if text.trim().is_empty() {
        return ParseOutcome::NotRecognized;
    }

    match mode {
        ParseMode::Cascade => {
            for matcher in CASCADE {
                if let Some(found) = (matcher.run)(text) {
                    debug!("Stage '{}' recognized {} installment(s)", matcher.name, found.len());
                    return ParseOutcome::from_installments(found);
                }
            }
            debug!("No stage recognized description");
            ParseOutcome::NotRecognized
        }
        ParseMode::Legacy => ParseOutcome::from_installments(catalogue::run_catalogue(text, false)),
    }
}

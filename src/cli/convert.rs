use super::ui;
use crate::core::{
    Conversion, ConversionFailed, Currency, CurrencyRateProvider, conversion, parse_amount,
};
use tracing::error;

pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount!";
pub const CONVERSION_FAILED_MESSAGE: &str = "Conversion failed";

/// What the user sees after a conversion attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    InvalidAmount,
    Failed,
    Converted(Conversion),
}

impl From<Result<Conversion, ConversionFailed>> for Outcome {
    fn from(result: Result<Conversion, ConversionFailed>) -> Self {
        match result {
            Ok(conversion) => Outcome::Converted(conversion),
            Err(ConversionFailed) => Outcome::Failed,
        }
    }
}

impl Outcome {
    pub fn headline(&self) -> String {
        match self {
            Outcome::InvalidAmount => INVALID_AMOUNT_MESSAGE.to_string(),
            Outcome::Failed => CONVERSION_FAILED_MESSAGE.to_string(),
            Outcome::Converted(c) => format!("Converted Amount: {} {}", c.converted, c.to),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Outcome::InvalidAmount | Outcome::Failed => {
                ui::style_text(&self.headline(), ui::StyleType::Error)
            }
            Outcome::Converted(c) => {
                format!(
                    "{}\n\n{}",
                    ui::style_text(&self.headline(), ui::StyleType::Success),
                    details_table(c)
                )
            }
        }
    }
}

fn with_symbol(value: f64, code: &str) -> String {
    match Currency::from_code(code) {
        Some(currency) => format!("{value:.2} {}", currency.symbol),
        None => format!("{value:.2} {code}"),
    }
}

fn details_table(c: &Conversion) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(&format!("Amount ({})", c.from)),
        ui::header_cell(&format!("Rate ({}/{})", c.to, c.from)),
        ui::header_cell(&format!("Result ({})", c.to)),
    ]);
    table.add_row(vec![
        ui::number_cell(with_symbol(c.amount, &c.from)),
        ui::number_cell(format!("{:.6}", c.rate)),
        ui::number_cell(with_symbol(c.converted, &c.to)),
    ]);
    table.to_string()
}

/// Validates the amount text, then converts it. No rate is requested for
/// an invalid amount.
pub async fn convert_text(
    provider: &dyn CurrencyRateProvider,
    amount_text: &str,
    from: Currency,
    to: Currency,
) -> Outcome {
    let amount = match parse_amount(amount_text) {
        Ok(amount) => amount,
        Err(e) => {
            error!(error = %e, "Invalid number format.");
            return Outcome::InvalidAmount;
        }
    };

    let pb = ui::new_spinner(&format!("Fetching {} → {} rate...", from.code, to.code));
    let result = conversion::convert(provider, amount, from.code, to.code).await;
    pb.finish_and_clear();

    result.into()
}

pub async fn run(
    provider: &dyn CurrencyRateProvider,
    amount_text: &str,
    from: Currency,
    to: Currency,
) {
    let outcome = convert_text(provider, amount_text, from, to).await;
    println!("{}", outcome.display());
}

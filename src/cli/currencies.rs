use super::ui;
use crate::core::Currency;
use comfy_table::Cell;

/// Renders the supported currencies as a table.
pub fn render() -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Symbol"),
    ]);

    for currency in Currency::SUPPORTED {
        table.add_row(vec![
            Cell::new(currency.code),
            Cell::new(currency.name),
            Cell::new(currency.symbol),
        ]);
    }

    format!(
        "{}\n\n{table}",
        ui::style_text("Supported currencies", ui::StyleType::Title)
    )
}

pub fn run() {
    println!("{}", render());
}

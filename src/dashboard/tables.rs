//! Table view of the loaded transactions.

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    database_id::TransactionId,
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, risk_badge},
    transaction::Transaction,
};

const OCCURRED_AT_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

const TABLE_HIGHLIGHTED_ROW_STYLE: &str =
    "bg-blue-50 border-b dark:bg-blue-900/40 dark:border-gray-700";
const TABLE_AMOUNT_CELL_STYLE: &str = "px-6 py-4 text-right whitespace-nowrap";

/// Renders the loaded transactions in ID order.
///
/// The row for `highlighted_id`, if any, is highlighted so the analyst can
/// find the transaction they just updated.
pub(super) fn transactions_table(
    transactions: &[Transaction],
    highlighted_id: Option<TransactionId>,
) -> Markup {
    html! {
        section id="transactions" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Transactions" }

            div class="relative overflow-x-auto shadow-md rounded"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "ID" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Time" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Card Type" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "City" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Risk Level" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Comment" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            (transaction_row(transaction, highlighted_id == Some(transaction.id)))
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction, is_highlighted: bool) -> Markup {
    let row_style = if is_highlighted {
        TABLE_HIGHLIGHTED_ROW_STYLE
    } else {
        TABLE_ROW_STYLE
    };
    let occurred_at = transaction
        .occurred_at
        .format(OCCURRED_AT_FORMAT)
        .unwrap_or_else(|_| transaction.occurred_at.to_string());

    html! {
        tr class=(row_style) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.id) }
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (occurred_at) }
            td class=(TABLE_AMOUNT_CELL_STYLE) { (format_currency(transaction.amount)) }
            td class=(TABLE_CELL_STYLE) { (transaction.card_type) }
            td class=(TABLE_CELL_STYLE) { (transaction.city) }
            td class=(TABLE_CELL_STYLE) { (risk_badge(transaction.risk_level)) }
            td class=(TABLE_CELL_STYLE) { (transaction.comment.as_deref().unwrap_or_default()) }
        }
    }
}

//! The forms for filtering the dashboard and labelling a transaction.

use maud::{Markup, html};

use crate::{
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_RADIO_GROUP_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    risk::{RiskChoice, RiskFilter},
    transaction::Transaction,
};

/// A form that reloads the dashboard with the selected risk filter.
pub(super) fn risk_filter_form(active_filter: RiskFilter) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            class="w-full mb-4 flex items-center gap-4"
        {
            label for="risk-filter" class=(FORM_LABEL_STYLE) { "Risk level" }

            select
                id="risk-filter"
                name="risk"
                onchange="this.form.submit()"
                class={(FORM_TEXT_INPUT_STYLE) " max-w-xs"}
            {
                @for filter in RiskFilter::OPTIONS {
                    option
                        value=(filter.as_query_value())
                        selected[filter == active_filter]
                    {
                        (filter.label())
                    }
                }
            }

            noscript
            {
                button type="submit" class="px-4 py-2 bg-blue-500 text-white rounded" { "Apply" }
            }
        }
    }
}

/// A form for setting the risk level and comment of one of `transactions`.
///
/// Only the loaded transactions can be picked. The active filter is sent
/// along so the dashboard keeps it after the update.
pub(super) fn risk_update_form(transactions: &[Transaction], active_filter: RiskFilter) -> Markup {
    let spinner = loading_spinner();

    html! {
        section id="risk-update" class="w-full mb-8"
        {
            h2 class="text-xl font-semibold mb-4" { "Update Risk Level" }

            form
                hx-post=(endpoints::RISK_UPDATE_API)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="space-y-4 bg-gray-50 dark:bg-gray-800 p-4 rounded-lg"
            {
                input type="hidden" name="filter" value=(active_filter.as_query_value());

                div
                {
                    label for="transaction-id" class=(FORM_LABEL_STYLE) { "Transaction" }

                    select
                        id="transaction-id"
                        name="transaction_id"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for transaction in transactions {
                            option value=(transaction.id)
                            {
                                (transaction.id) " - " (transaction.card_type) ", " (transaction.city)
                            }
                        }
                    }
                }

                fieldset
                {
                    legend class=(FORM_LABEL_STYLE) { "Risk level" }

                    div class=(FORM_RADIO_GROUP_STYLE)
                    {
                        @for (index, choice) in RiskChoice::OPTIONS.into_iter().enumerate() {
                            @let id = format!("risk-level-{}", choice.as_form_value());

                            div
                            {
                                input
                                    type="radio"
                                    id=(id)
                                    name="risk_level"
                                    value=(choice.as_form_value())
                                    checked[index == 0]
                                    required
                                    class=(FORM_RADIO_INPUT_STYLE);

                                label for=(id) class=(FORM_RADIO_LABEL_STYLE) { (choice.label()) }
                            }
                        }
                    }
                }

                div
                {
                    label for="comment" class=(FORM_LABEL_STYLE) { "Comment" }

                    textarea
                        id="comment"
                        name="comment"
                        rows="3"
                        placeholder="Leave empty to remove the comment"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {}
                }

                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE)
                {
                    span class="htmx-indicator" { (spinner) }
                    "Update"
                }
            }
        }
    }
}

#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_submit_button_with_text, assert_hx_endpoint, assert_radio_values,
    assert_select_values, must_get_form,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, text_of};
pub(crate) use http::{assert_content_type, assert_status_ok};

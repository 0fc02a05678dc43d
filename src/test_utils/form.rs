use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_post = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_post, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {hx_post:?}"
    );
}

/// Assert the form has a select named `name` whose options have `values`, in order.
#[track_caller]
pub(crate) fn assert_select_values(form: &ElementRef<'_>, name: &str, values: &[&str]) {
    let selector = Selector::parse(&format!("select[name='{name}']")).unwrap();
    let select = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No select found with name \"{name}\""));

    let got_values: Vec<_> = select
        .select(&Selector::parse("option").unwrap())
        .map(|option| option.value().attr("value").unwrap_or_default())
        .collect();

    assert_eq!(
        got_values, values,
        "want select {name} with options {values:?}, got {got_values:?}"
    );
}

/// Assert the form has radio inputs named `name` with `values`, in order, and
/// exactly one of them checked.
#[track_caller]
pub(crate) fn assert_radio_values(form: &ElementRef<'_>, name: &str, values: &[&str]) {
    let selector = Selector::parse(&format!("input[type='radio'][name='{name}']")).unwrap();
    let radios: Vec<_> = form.select(&selector).collect();

    let got_values: Vec<_> = radios
        .iter()
        .map(|radio| radio.value().attr("value").unwrap_or_default())
        .collect();
    assert_eq!(
        got_values, values,
        "want radio inputs {name} with values {values:?}, got {got_values:?}"
    );

    let checked_count = radios
        .iter()
        .filter(|radio| radio.value().attr("checked").is_some())
        .count();
    assert_eq!(checked_count, 1, "want exactly one {name} radio input checked");
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button").unwrap())
        .next()
        .expect("No button found");

    assert_eq!(
        submit_button.value().attr("type").unwrap_or_default(),
        "submit",
        "want submit button with type=\"submit\""
    );
    let got_text = submit_button.text().collect::<Vec<_>>().join("");
    let got_text = got_text.trim();
    assert_eq!(text, got_text);
}

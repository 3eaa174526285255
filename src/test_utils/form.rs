use scraper::{ElementRef, Html, Selector};

#[track_caller]
pub(crate) fn must_get_form(html: &Html) -> ElementRef<'_> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(element: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let hx_attribute = element
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        hx_attribute, endpoint,
        "want element with attribute {attribute}=\"{endpoint}\", got {hx_attribute:?}"
    );
}

/// Assert that `form` has an input named `name` of type `type_`, returning its
/// value attribute.
#[track_caller]
pub(crate) fn assert_form_input<'a>(form: &ElementRef<'a>, name: &str, type_: &str) -> &'a str {
    for input in form.select(&Selector::parse("input").unwrap()) {
        let input_name = input.value().attr("name").unwrap_or_default();

        if input_name == name {
            let input_type = input.value().attr("type").unwrap_or_default();

            assert_eq!(
                input_type, type_,
                "want input with type \"{type_}\", got {input_type:?}"
            );

            return input.value().attr("value").unwrap_or_default();
        }
    }

    panic!("No input found with name \"{name}\" and type \"{type_}\"");
}

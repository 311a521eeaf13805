//! Detail page extraction.
//!
//! A detail page is a Drupal node whose contact fields are rendered as
//! `div.field--name-<field>` blocks. [`FieldLocator`] is the lookup seam:
//! [`HtmlFieldLocator`] answers it from a parsed page, and [`extract_detail`]
//! turns whatever it answers into a [`DetailRecord`], filling gaps with
//! [`UNKNOWN`].

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use statedocs_shared::{DetailRecord, UNKNOWN};

/// The logical fields looked up on a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    Name,
    Street,
    City,
    Zip,
    Abbreviation,
    Website,
    Phone,
}

impl DetailField {
    pub const ALL: [DetailField; 7] = [
        Self::Name,
        Self::Street,
        Self::City,
        Self::Zip,
        Self::Abbreviation,
        Self::Website,
        Self::Phone,
    ];

    /// Class carried by the `div` wrapping this field.
    pub fn class_marker(self) -> &'static str {
        match self {
            Self::Name => "field--name-field-state-contact-label2",
            Self::Street => "field--name-field-ed-contact-street",
            Self::City => "field--name-field-ed-contact-city",
            Self::Zip => "field--name-field-ed-contact-zip",
            Self::Abbreviation => "field--name-field-ed-state-abbreviation",
            Self::Website => "field--name-field-ed-contact-website",
            Self::Phone => "field--name-field-ed-state-contact-phone",
        }
    }
}

/// Locate one field in a document.
pub trait FieldLocator {
    /// The field's normalized value, or `None` when the page does not carry it.
    fn locate(&self, field: DetailField) -> Option<String>;
}

// ---------------------------------------------------------------------------
// HTML locator
// ---------------------------------------------------------------------------

static FIELD_SELECTORS: LazyLock<Vec<(DetailField, Selector)>> = LazyLock::new(|| {
    DetailField::ALL
        .iter()
        .map(|field| {
            let css = format!("div.{}", field.class_marker());
            let sel = Selector::parse(&css).expect("valid field selector");
            (*field, sel)
        })
        .collect()
});

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("valid anchor selector"));

static FIELD_ITEM_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.field__item").expect("valid field item selector"));

/// [`FieldLocator`] over a parsed detail page.
pub struct HtmlFieldLocator<'a> {
    doc: &'a Html,
}

impl<'a> HtmlFieldLocator<'a> {
    pub fn new(doc: &'a Html) -> Self {
        Self { doc }
    }

    fn container(&self, field: DetailField) -> Option<ElementRef<'a>> {
        let (_, sel) = FIELD_SELECTORS.iter().find(|(f, _)| *f == field)?;
        self.doc.select(sel).next()
    }
}

impl FieldLocator for HtmlFieldLocator<'_> {
    fn locate(&self, field: DetailField) -> Option<String> {
        let container = self.container(field)?;

        let value = match field {
            // The link target, not the link text.
            DetailField::Website => container
                .select(&ANCHOR_SELECTOR)
                .next()?
                .value()
                .attr("href")?
                .trim()
                .to_string(),
            DetailField::Phone => normalized_text(container.select(&FIELD_ITEM_SELECTOR).next()?),
            _ => normalized_text(container),
        };

        (!value.is_empty()).then_some(value)
    }
}

/// Element text with whitespace runs collapsed and ends trimmed.
fn normalized_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

// ---------------------------------------------------------------------------
// Record building
// ---------------------------------------------------------------------------

/// Build a [`DetailRecord`] from whatever the locator can find.
///
/// The address is all-or-nothing: street, city, and zip must all be present,
/// otherwise it stays [`UNKNOWN`].
pub fn extract_detail(locator: &dyn FieldLocator) -> DetailRecord {
    let or_unknown = |field| locator.locate(field).unwrap_or_else(|| UNKNOWN.to_string());

    let address = match (
        locator.locate(DetailField::Street),
        locator.locate(DetailField::City),
        locator.locate(DetailField::Zip),
    ) {
        (Some(street), Some(city), Some(zip)) => format!("{street}, {city}, {zip}"),
        _ => UNKNOWN.to_string(),
    };

    DetailRecord {
        full_name: or_unknown(DetailField::Name),
        address,
        state_abbr: or_unknown(DetailField::Abbreviation),
        website: or_unknown(DetailField::Website),
        phone: or_unknown(DetailField::Phone),
    }
}

/// Parse a detail page and extract its record.
pub fn parse_detail(html: &str) -> DetailRecord {
    let doc = Html::parse_document(html);
    extract_detail(&HtmlFieldLocator::new(&doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapLocator(HashMap<DetailField, &'static str>);

    impl FieldLocator for MapLocator {
        fn locate(&self, field: DetailField) -> Option<String> {
            self.0.get(&field).map(|v| v.to_string())
        }
    }

    fn locator(fields: &[(DetailField, &'static str)]) -> MapLocator {
        MapLocator(fields.iter().copied().collect())
    }

    fn load_fixture(name: &str) -> String {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures/html")
            .join(name);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("missing fixture: {}", path.display()))
    }

    #[test]
    fn full_locator_fills_every_field() {
        let record = extract_detail(&locator(&[
            (DetailField::Name, "Ohio Department of Education"),
            (DetailField::Street, "25 South Front Street"),
            (DetailField::City, "Columbus"),
            (DetailField::Zip, "43215"),
            (DetailField::Abbreviation, "OH"),
            (DetailField::Website, "https://education.ohio.gov"),
            (DetailField::Phone, "877-644-6338"),
        ]));

        assert_eq!(record.full_name, "Ohio Department of Education");
        assert_eq!(record.address, "25 South Front Street, Columbus, 43215");
        assert_eq!(record.state_abbr, "OH");
        assert_eq!(record.website, "https://education.ohio.gov");
        assert_eq!(record.phone, "877-644-6338");
    }

    #[test]
    fn partial_address_is_discarded() {
        let record = extract_detail(&locator(&[
            (DetailField::Zip, "43215"),
            (DetailField::Abbreviation, "OH"),
            (DetailField::Phone, "877-644-6338"),
        ]));

        assert_eq!(record.address, UNKNOWN);
        assert_eq!(record.full_name, UNKNOWN);
        assert_eq!(record.website, UNKNOWN);
        assert_eq!(record.state_abbr, "OH");
        assert_eq!(record.phone, "877-644-6338");
    }

    #[test]
    fn empty_locator_is_all_unknown() {
        let record = extract_detail(&locator(&[]));
        assert_eq!(record, DetailRecord::default());
    }

    #[test]
    fn html_fixture_extracts_all_fields() {
        let record = parse_detail(&load_fixture("state-contact-ohio.html"));

        assert_eq!(record.full_name, "Ohio Department of Education and Workforce");
        assert_eq!(record.address, "25 South Front Street, Columbus, 43215-4183");
        assert_eq!(record.state_abbr, "OH");
        // href, not the visible "Visit website" text
        assert_eq!(record.website, "https://education.ohio.gov/");
        // the field__item, not the "Phone" label
        assert_eq!(record.phone, "(877) 644-6338");
    }

    #[test]
    fn html_fixture_with_missing_street_and_city() {
        let record = parse_detail(&load_fixture("state-contact-partial.html"));

        assert_eq!(record.address, UNKNOWN);
        assert_eq!(record.state_abbr, "AK");
        assert_eq!(record.website, UNKNOWN);
        assert_eq!(record.phone, "(907) 465-2800");
        assert_eq!(record.full_name, "Alaska Department of Education and Early Development");
    }

    #[test]
    fn website_without_anchor_is_unknown() {
        let html = r#"<div class="field--name-field-ed-contact-website">education.ohio.gov</div>"#;
        assert_eq!(parse_detail(html).website, UNKNOWN);
    }

    #[test]
    fn text_whitespace_is_collapsed() {
        let html = r#"<div class="field--name-field-state-contact-label2">
            Ohio   Department
            of Education
        </div>"#;
        assert_eq!(parse_detail(html).full_name, "Ohio Department of Education");
    }

    #[test]
    fn empty_field_counts_as_missing() {
        let html = r#"<div class="field--name-field-ed-state-abbreviation">   </div>"#;
        assert_eq!(parse_detail(html).state_abbr, UNKNOWN);
    }
}

use quick_xml::{
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
    Writer,
};

use super::{Canteen, Error};

const VERSION: &str = "2.1";
const NAMESPACE: &str = "http://openmensa.org/open-mensa-v2";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const SCHEMA_LOCATION: &str =
    "http://openmensa.org/open-mensa-v2 http://openmensa.org/open-mensa-v2.xsd";

type XmlWriter = Writer<Vec<u8>>;

pub(super) fn render(canteen: &Canteen) -> Result<String, Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    write(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    start(
        &mut writer,
        "openmensa",
        &[
            ("version", VERSION),
            ("xmlns", NAMESPACE),
            ("xmlns:xsi", XSI_NAMESPACE),
            ("xsi:schemaLocation", SCHEMA_LOCATION),
        ],
    )?;
    start(&mut writer, "canteen", &[])?;
    for (date, categories) in &canteen.days {
        let date = date.format("%Y-%m-%d").to_string();
        start(&mut writer, "day", &[("date", date.as_str())])?;
        for category in categories {
            start(&mut writer, "category", &[("name", category.name.as_str())])?;
            for meal in &category.meals {
                start(&mut writer, "meal", &[])?;
                text_element(&mut writer, "name", &[], &meal.name)?;
                for note in &meal.notes {
                    text_element(&mut writer, "note", &[], note)?;
                }
                for (tier, cents) in &meal.prices {
                    text_element(&mut writer, "price", &[("role", tier.role())], &cents.to_string())?;
                }
                end(&mut writer, "meal")?;
            }
            end(&mut writer, "category")?;
        }
        end(&mut writer, "day")?;
    }
    end(&mut writer, "canteen")?;
    end(&mut writer, "openmensa")?;

    let mut xml = String::from_utf8(writer.into_inner()).map_err(|e| Error::Xml(e.to_string()))?;
    xml.push('\n');
    Ok(xml)
}

fn write(writer: &mut XmlWriter, event: Event<'_>) -> Result<(), Error> {
    writer
        .write_event(event)
        .map_err(|e| Error::Xml(e.to_string()))
}

fn start(writer: &mut XmlWriter, tag: &str, attributes: &[(&str, &str)]) -> Result<(), Error> {
    let element = BytesStart::new(tag).with_attributes(attributes.iter().copied());
    write(writer, Event::Start(element))
}

fn end(writer: &mut XmlWriter, tag: &str) -> Result<(), Error> {
    write(writer, Event::End(BytesEnd::new(tag)))
}

fn text_element(
    writer: &mut XmlWriter,
    tag: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<(), Error> {
    start(writer, tag, attributes)?;
    write(writer, Event::Text(BytesText::new(text)))?;
    end(writer, tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::{PriceTier, Prices};
    use chrono::NaiveDate;

    fn curry_canteen() -> Canteen {
        let mut canteen = Canteen::new();
        canteen
            .add_meal(
                NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
                "Hauptgericht",
                "Gemüsecurry",
                &Prices::from([
                    (PriceTier::Other, "4,80 €".to_owned()),
                    (PriceTier::Student, "3,50 €".to_owned()),
                ]),
                vec!["mit Reis".into(), "G) Gluten".into()],
            )
            .unwrap();
        canteen
    }

    fn position(xml: &str, needle: &str) -> usize {
        xml.find(needle)
            .unwrap_or_else(|| panic!("{needle:?} missing from\n{xml}"))
    }

    #[test]
    fn test_feed_structure() {
        let xml = curry_canteen().to_xml().unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<openmensa version="2.1" xmlns="http://openmensa.org/open-mensa-v2""#));
        let in_order = [
            "<canteen>",
            r#"<day date="2023-04-01">"#,
            r#"<category name="Hauptgericht">"#,
            "<meal>",
            "<name>Gemüsecurry</name>",
            "<note>mit Reis</note>",
            "<note>G) Gluten</note>",
            r#"<price role="student">3.50</price>"#,
            r#"<price role="other">4.80</price>"#,
            "</meal>",
            "</category>",
            "</day>",
            "</canteen>",
            "</openmensa>",
        ];
        let positions: Vec<_> = in_order.iter().map(|n| position(&xml, n)).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{xml}");
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let mut canteen = Canteen::new();
        canteen
            .add_meal(
                NaiveDate::from_ymd_opt(2023, 4, 3).unwrap(),
                "Pasta & \"Co\"",
                "Nudeln <hausgemacht>",
                &Prices::new(),
                vec![],
            )
            .unwrap();
        let xml = canteen.to_xml().unwrap();
        assert!(xml.contains(r#"<category name="Pasta &amp; &quot;Co&quot;">"#), "{xml}");
        assert!(xml.contains("<name>Nudeln &lt;hausgemacht&gt;</name>"), "{xml}");
    }

    #[test]
    fn test_empty_canteen() {
        let xml = Canteen::new().to_xml().unwrap();
        assert!(xml.contains("<canteen>"));
        assert!(!xml.contains("<day"));
    }
}

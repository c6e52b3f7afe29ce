//! Hidden WebForms state fields that must be echoed back on every POST.

use scraper::{Html, Selector};

use crate::Error;

pub const VIEWSTATE: &str = "__VIEWSTATE";
pub const VIEWSTATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";
pub const EVENT_VALIDATION: &str = "__EVENTVALIDATION";

/// The token bundle a WebForms page hands out on GET and expects back on POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenBundle {
    pub viewstate: String,
    pub viewstate_generator: String,
    pub event_validation: String,
}

impl TokenBundle {
    /// Reads all three hidden inputs out of a form page.
    ///
    /// Fails with [`Error::MissingToken`] naming the first absent field, so a
    /// submission is never attempted with a partial bundle.
    pub fn from_html(html: &str) -> Result<Self, Error> {
        let document = Html::parse_document(html);
        Ok(Self {
            viewstate: hidden_value(&document, VIEWSTATE)?,
            viewstate_generator: hidden_value(&document, VIEWSTATE_GENERATOR)?,
            event_validation: hidden_value(&document, EVENT_VALIDATION)?,
        })
    }

    /// Form pairs for the POST body, in the order the page declares them.
    pub fn to_fields(&self) -> Vec<(String, String)> {
        vec![
            (VIEWSTATE.to_string(), self.viewstate.clone()),
            (VIEWSTATE_GENERATOR.to_string(), self.viewstate_generator.clone()),
            (EVENT_VALIDATION.to_string(), self.event_validation.clone()),
        ]
    }
}

fn hidden_value(document: &Html, name: &'static str) -> Result<String, Error> {
    let selector = Selector::parse(&format!("input[name=\"{}\"]", name))
        .map_err(|e| Error::Parse(format!("bad selector for {}: {}", name, e)))?;
    document
        .select(&selector)
        .find_map(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or(Error::MissingToken(name))
}

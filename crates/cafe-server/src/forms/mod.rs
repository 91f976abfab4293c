//! Cafe submission form
//!
//! Raw form values are trimmed, checked with `validator`, and converted into a
//! `NewCafe`. Failures are reported per field so the form can be re-rendered.

pub mod csrf;

use cafe_types::{title_case, Choice, NewCafe};
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Key used for errors that belong to the whole form rather than one field
pub const FORM_ERROR_KEY: &str = "csrf_token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Url,
    Choice,
}

/// Form fields in display order: (name, label, kind)
pub const FORM_FIELDS: [(&str, &str, FieldKind); 10] = [
    ("name", "Cafe name", FieldKind::Text),
    ("map_url", "Map URL", FieldKind::Url),
    ("img_url", "Img URL", FieldKind::Url),
    ("location", "Location", FieldKind::Text),
    ("seats", "Seats", FieldKind::Text),
    ("has_toilet", "Has toilet?", FieldKind::Choice),
    ("has_wifi", "Has Wifi?", FieldKind::Choice),
    ("has_sockets", "Has Sockets?", FieldKind::Choice),
    ("can_take_calls", "Can take calls?", FieldKind::Choice),
    ("coffee_price", "Coffee price", FieldKind::Text),
];

/// Raw values posted by the add form
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct CafeForm {
    #[validate(
        custom(function = "required"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub name: String,

    #[validate(
        custom(function = "required"),
        url(message = "Invalid URL."),
        custom(function = "web_url"),
        length(max = 500, message = "Field cannot be longer than 500 characters.")
    )]
    pub map_url: String,

    #[validate(
        custom(function = "required"),
        url(message = "Invalid URL."),
        custom(function = "web_url"),
        length(max = 500, message = "Field cannot be longer than 500 characters.")
    )]
    pub img_url: String,

    #[validate(
        custom(function = "required"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub location: String,

    #[validate(
        custom(function = "required"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub seats: String,

    #[validate(custom(function = "yes_or_no"))]
    pub has_toilet: String,

    #[validate(custom(function = "yes_or_no"))]
    pub has_wifi: String,

    #[validate(custom(function = "yes_or_no"))]
    pub has_sockets: String,

    #[validate(custom(function = "yes_or_no"))]
    pub can_take_calls: String,

    #[validate(
        custom(function = "required"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub coffee_price: String,

    pub csrf_token: String,
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(REQUIRED_MESSAGE)));
    }
    Ok(())
}

/// Links are rendered into pages, so only `http(s)://host` is accepted.
fn web_url(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    let invalid = || ValidationError::new("url").with_message(Cow::Borrowed("Invalid URL."));
    let parsed = url::Url::parse(value).map_err(|_| invalid())?;
    let has_host = parsed.host_str().is_some_and(|h| !h.is_empty());
    if !matches!(parsed.scheme(), "http" | "https") || !has_host {
        return Err(invalid());
    }
    Ok(())
}

fn yes_or_no(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(REQUIRED_MESSAGE)));
    }
    value
        .parse::<Choice>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("choice").with_message(Cow::Borrowed("Not a valid choice.")))
}

/// First violation message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &str, message: impl Into<String>) {
        self.0.insert(field.to_string(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.insert(field, message);
        errors
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut out = FieldErrors::default();
        for (field, field_errors) in errors.field_errors() {
            // An empty value also fails `url`; report it as missing.
            let chosen = field_errors
                .iter()
                .find(|e| e.code == "required")
                .or_else(|| field_errors.first());

            if let Some(err) = chosen {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({}).", err.code));
                out.insert(&field, message);
            }
        }
        out
    }
}

impl CafeForm {
    /// Raw value of a form field by name.
    pub fn value(&self, field: &str) -> &str {
        match field {
            "name" => &self.name,
            "map_url" => &self.map_url,
            "img_url" => &self.img_url,
            "location" => &self.location,
            "seats" => &self.seats,
            "has_toilet" => &self.has_toilet,
            "has_wifi" => &self.has_wifi,
            "has_sockets" => &self.has_sockets,
            "can_take_calls" => &self.can_take_calls,
            "coffee_price" => &self.coffee_price,
            "csrf_token" => &self.csrf_token,
            _ => "",
        }
    }

    fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            map_url: self.map_url.trim().to_string(),
            img_url: self.img_url.trim().to_string(),
            location: self.location.trim().to_string(),
            seats: self.seats.trim().to_string(),
            has_toilet: self.has_toilet.trim().to_string(),
            has_wifi: self.has_wifi.trim().to_string(),
            has_sockets: self.has_sockets.trim().to_string(),
            can_take_calls: self.can_take_calls.trim().to_string(),
            coffee_price: self.coffee_price.trim().to_string(),
            csrf_token: self.csrf_token.clone(),
        }
    }

    /// Validate and convert into a record ready for storage. `name` and
    /// `location` are title-cased.
    pub fn to_new_cafe(&self) -> Result<NewCafe, FieldErrors> {
        let form = self.trimmed();
        form.validate().map_err(|e| FieldErrors::from(&e))?;

        Ok(NewCafe {
            name: title_case(&form.name),
            map_url: form.map_url,
            img_url: form.img_url,
            location: title_case(&form.location),
            seats: form.seats,
            has_toilet: parse_choice("has_toilet", &form.has_toilet)?,
            has_wifi: parse_choice("has_wifi", &form.has_wifi)?,
            has_sockets: parse_choice("has_sockets", &form.has_sockets)?,
            can_take_calls: parse_choice("can_take_calls", &form.can_take_calls)?,
            coffee_price: Some(form.coffee_price),
        })
    }
}

fn parse_choice(field: &str, value: &str) -> Result<bool, FieldErrors> {
    value
        .parse::<Choice>()
        .map(bool::from)
        .map_err(|e| FieldErrors::single(field, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> CafeForm {
        CafeForm {
            name: "blue bottle".to_string(),
            map_url: "https://maps.example/1".to_string(),
            img_url: "https://img.example/1".to_string(),
            location: "soho".to_string(),
            seats: "10-20".to_string(),
            has_toilet: "Yes".to_string(),
            has_wifi: "Yes".to_string(),
            has_sockets: "No".to_string(),
            can_take_calls: "No".to_string(),
            coffee_price: "£3".to_string(),
            csrf_token: String::new(),
        }
    }

    #[test]
    fn test_valid_form_converts() {
        let cafe = valid_form().to_new_cafe().unwrap();

        assert_eq!(cafe.name, "Blue Bottle");
        assert_eq!(cafe.location, "Soho");
        assert_eq!(cafe.seats, "10-20");
        assert!(cafe.has_toilet);
        assert!(cafe.has_wifi);
        assert!(!cafe.has_sockets);
        assert!(!cafe.can_take_calls);
        assert_eq!(cafe.coffee_price.as_deref(), Some("£3"));
    }

    #[test]
    fn test_choices_map_both_ways() {
        let mut form = valid_form();
        form.has_toilet = "No".to_string();
        form.has_sockets = "Yes".to_string();

        let cafe = form.to_new_cafe().unwrap();
        assert!(!cafe.has_toilet);
        assert!(cafe.has_sockets);
    }

    #[test]
    fn test_empty_name_required() {
        let mut form = valid_form();
        form.name = "   ".to_string();

        let errors = form.to_new_cafe().unwrap_err();
        assert_eq!(errors.get("name"), Some(REQUIRED_MESSAGE));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut form = valid_form();
        form.map_url = "not-a-url".to_string();

        let errors = form.to_new_cafe().unwrap_err();
        assert_eq!(errors.get("map_url"), Some("Invalid URL."));
        assert_eq!(errors.get("img_url"), None);
    }

    #[test]
    fn test_non_web_schemes_rejected() {
        for bad in [
            "javascript:alert(document.cookie)",
            "foo:bar",
            "mailto:x@example.com",
            "data:text/html,hi",
            "ftp://files.example/1",
        ] {
            let mut form = valid_form();
            form.img_url = bad.to_string();

            let errors = form.to_new_cafe().unwrap_err();
            assert_eq!(errors.get("img_url"), Some("Invalid URL."), "{bad}");
        }
    }

    #[test]
    fn test_http_and_https_accepted() {
        let mut form = valid_form();
        form.map_url = "http://maps.example/1?q=soho".to_string();
        form.img_url = "HTTPS://IMG.EXAMPLE/1".to_string();

        assert!(form.to_new_cafe().is_ok());
    }

    #[test]
    fn test_empty_url_reported_as_required() {
        let mut form = valid_form();
        form.img_url = String::new();

        let errors = form.to_new_cafe().unwrap_err();
        assert_eq!(errors.get("img_url"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_invalid_choice_rejected() {
        let mut form = valid_form();
        form.has_wifi = "yes please".to_string();
        form.can_take_calls = String::new();

        let errors = form.to_new_cafe().unwrap_err();
        assert_eq!(errors.get("has_wifi"), Some("Not a valid choice."));
        assert_eq!(errors.get("can_take_calls"), Some(REQUIRED_MESSAGE));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = CafeForm::default().to_new_cafe().unwrap_err();

        for (field, _, _) in FORM_FIELDS {
            assert_eq!(errors.get(field), Some(REQUIRED_MESSAGE), "field {field}");
        }
    }

    #[test]
    fn test_too_long_name_rejected() {
        let mut form = valid_form();
        form.name = "x".repeat(251);

        let errors = form.to_new_cafe().unwrap_err();
        assert_eq!(
            errors.get("name"),
            Some("Field cannot be longer than 250 characters.")
        );
    }

    #[test]
    fn test_values_are_trimmed() {
        let mut form = valid_form();
        form.seats = "  20-30 ".to_string();
        form.map_url = " https://maps.example/2 ".to_string();

        let cafe = form.to_new_cafe().unwrap();
        assert_eq!(cafe.seats, "20-30");
        assert_eq!(cafe.map_url, "https://maps.example/2");
    }
}

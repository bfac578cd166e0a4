use serde::Deserialize;

use crate::error::{AppError, AppResult, ValidationMessages};

#[derive(Debug, Deserialize)]
pub struct ActorPayload {
    pub first_name: String,
    pub last_name: String,
}

impl ActorPayload {
    pub fn validate(&self) -> AppResult<()> {
        let mut messages = ValidationMessages::new();
        check_max_len(&mut messages, "first_name", &self.first_name, 255);
        check_max_len(&mut messages, "last_name", &self.last_name, 255);
        finish(messages)
    }
}

#[derive(Debug, Deserialize)]
pub struct FilmPayload {
    pub title: String,
    pub description: String,
    pub release_year: i32,
    pub length: i32,
}

impl FilmPayload {
    pub fn validate(&self) -> AppResult<()> {
        let mut messages = ValidationMessages::new();
        check_max_len(&mut messages, "title", &self.title, 128);
        finish(messages)
    }
}

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

impl CategoryPayload {
    pub fn validate(&self) -> AppResult<()> {
        let mut messages = ValidationMessages::new();
        check_max_len(&mut messages, "name", &self.name, 255);
        finish(messages)
    }
}

fn check_max_len(messages: &mut ValidationMessages, field: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        messages
            .entry(field.to_string())
            .or_default()
            .push(format!("Longer than maximum length {max}."));
    }
}

fn finish(messages: ValidationMessages) -> AppResult<()> {
    if messages.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(messages))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_payload_within_limits() {
        let payload = ActorPayload {
            first_name: "PENELOPE".to_string(),
            last_name: "GUINESS".to_string(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn oversized_fields_collect_per_field_messages() {
        let payload = ActorPayload {
            first_name: "x".repeat(256),
            last_name: "y".repeat(300),
        };
        let err = payload.validate().unwrap_err();
        let AppError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(
            messages["first_name"],
            vec!["Longer than maximum length 255.".to_string()]
        );
        assert!(messages.contains_key("last_name"));
    }

    #[test]
    fn film_title_limit_is_128() {
        let payload = FilmPayload {
            title: "t".repeat(129),
            description: "fine".to_string(),
            release_year: 2006,
            length: 86,
        };
        let err = payload.validate().unwrap_err();
        let AppError::Validation(messages) = err else {
            panic!("expected validation error");
        };
        assert_eq!(messages["title"], vec!["Longer than maximum length 128.".to_string()]);
    }
}

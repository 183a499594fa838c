//! Form binding and validation for post and comment submissions.
//!
//! Forms arrive URL-encoded. Every field defaults to empty so a missing field
//! surfaces as a field error instead of a rejected request.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::{Validate, ValidationErrors};

use crate::models::PostDraft;

const IMAGE_EXTENSIONS: [&str; 5] = [".gif", ".jpg", ".jpeg", ".png", ".webp"];

/// Field name -> messages, ordered for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                form_errors.add(&field.to_string(), message);
            }
        }
        form_errors
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 10000, message = "This field is required."))]
    pub text: String,
    /// Group id as submitted; empty means "no group"
    #[serde(default)]
    pub group: Option<String>,
    /// Reference to an uploaded image
    #[serde(default)]
    #[validate(length(max = 255, message = "Image reference is too long."))]
    pub image: Option<String>,
}

impl PostForm {
    /// Form pre-filled from stored values, as shown on the edit page.
    pub fn from_values(text: &str, group_id: Option<i64>, image: Option<&str>) -> Self {
        Self {
            text: text.to_string(),
            group: group_id.map(|id| id.to_string()),
            image: image.map(str::to_string),
        }
    }

    /// Trim whitespace and collapse empty optional fields.
    pub fn normalized(mut self) -> Self {
        self.text = self.text.trim().to_string();
        self.group = self
            .group
            .map(|g| g.trim().to_string())
            .filter(|g| !g.is_empty());
        self.image = self
            .image
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty());
        self
    }

    /// Field-level checks that need no database access.
    ///
    /// Group existence is checked by the caller against the store.
    pub fn clean(&self) -> Result<PostDraft, FormErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FormErrors::default(),
            Err(e) => FormErrors::from(e),
        };

        let group_id = match self.group.as_deref() {
            None => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("group", "Select a valid choice.");
                    None
                }
            },
        };

        if let Some(image) = self.image.as_deref() {
            let lower = image.to_ascii_lowercase();
            if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                errors.add(
                    "image",
                    "Upload a valid image. The file you uploaded was either not an image or a corrupted image.",
                );
            }
        }

        if errors.is_empty() {
            Ok(PostDraft {
                text: self.text.clone(),
                group_id,
                image: self.image.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000, message = "This field is required."))]
    pub text: String,
}

impl CommentForm {
    pub fn normalized(mut self) -> Self {
        self.text = self.text.trim().to_string();
        self
    }

    pub fn clean(&self) -> Result<String, FormErrors> {
        self.validate()
            .map(|()| self.text.clone())
            .map_err(FormErrors::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post_form(text: &str, group: Option<&str>, image: Option<&str>) -> PostForm {
        PostForm {
            text: text.to_string(),
            group: group.map(str::to_string),
            image: image.map(str::to_string),
        }
        .normalized()
    }

    #[test]
    fn test_valid_post_form() {
        let draft = post_form("  Hello world  ", Some("3"), Some("posts/cat.GIF"))
            .clean()
            .unwrap();
        assert_eq!(draft.text, "Hello world");
        assert_eq!(draft.group_id, Some(3));
        assert_eq!(draft.image.as_deref(), Some("posts/cat.GIF"));
    }

    #[test]
    fn test_blank_text_is_required() {
        let errors = post_form("   ", None, None).clean().unwrap_err();
        assert_eq!(errors.field("text"), ["This field is required."]);
    }

    #[test]
    fn test_empty_group_means_no_group() {
        let draft = post_form("text", Some(""), Some("")).clean().unwrap();
        assert_eq!(draft.group_id, None);
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_bad_group_and_image_are_reported_together() {
        let errors = post_form("text", Some("music"), Some("notes.txt"))
            .clean()
            .unwrap_err();
        assert_eq!(errors.field("group"), ["Select a valid choice."]);
        assert_eq!(errors.field("image").len(), 1);
        assert!(errors.field("text").is_empty());
    }

    #[test]
    fn test_comment_form() {
        let ok = CommentForm {
            text: " nice post ".to_string(),
        }
        .normalized();
        assert_eq!(ok.clean().unwrap(), "nice post");

        let blank = CommentForm {
            text: "\n".to_string(),
        }
        .normalized();
        assert!(!blank.clean().unwrap_err().is_empty());
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let form: PostForm = serde_json::from_str("{}").unwrap();
        assert!(form.text.is_empty());
        assert!(form.group.is_none());
    }
}

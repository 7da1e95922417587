//! DTOs for the form-driven management endpoint (`POST /`).

use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::{Validate, ValidationError};

use super::link_view::LinkView;
use crate::error::AppError;
use crate::utils::url_validator::validate_target_url;

/// Raw form body. The `intent` field selects the action.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation error rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ManagementForm {
    pub intent: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "targetUrl")]
    pub target_url: Option<String>,
}

/// Longest accepted link name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Name must be non-empty and at most [`MAX_NAME_LENGTH`] characters.
fn validate_link_name(name: &str) -> Result<(), ValidationError> {
    let (code, message) = if name.is_empty() {
        ("required", "Name is required".to_string())
    } else if name.chars().count() > MAX_NAME_LENGTH {
        (
            "length",
            format!("Name must be at most {MAX_NAME_LENGTH} characters"),
        )
    } else {
        return Ok(());
    };

    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    Err(error)
}

/// Input for creating a link.
#[derive(Debug, Validate)]
pub struct CreateLinkInput {
    #[validate(custom(function = "validate_link_name"))]
    pub name: String,

    #[validate(custom(function = "validate_target_url"))]
    pub target_url: String,
}

impl CreateLinkInput {
    pub fn new(name: &str, target_url: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            target_url: target_url.trim().to_string(),
        }
    }
}

/// Input for replacing a link's target.
#[derive(Debug, Validate)]
pub struct UpdateLinkInput {
    #[validate(range(min = 1, message = "Link id must be a positive integer"))]
    pub id: i64,

    #[validate(custom(function = "validate_target_url"))]
    pub target_url: String,
}

impl UpdateLinkInput {
    pub fn new(id: i64, target_url: &str) -> Self {
        Self {
            id,
            target_url: target_url.trim().to_string(),
        }
    }
}

/// A validated management action.
#[derive(Debug)]
pub enum ManagementAction {
    Create(CreateLinkInput),
    Update(UpdateLinkInput),
    Delete { id: i64 },
}

impl TryFrom<ManagementForm> for ManagementAction {
    type Error = AppError;

    /// Dispatches on `intent` and validates the fields that action needs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a missing or unknown intent, a
    /// missing field, a non-numeric id or an invalid URL.
    fn try_from(form: ManagementForm) -> Result<Self, Self::Error> {
        let target_url = form.target_url.as_deref().unwrap_or_default();

        match form.intent.as_deref().map(str::trim) {
            Some("create") => {
                let input = CreateLinkInput::new(form.name.as_deref().unwrap_or_default(), target_url);
                input.validate()?;
                Ok(ManagementAction::Create(input))
            }
            Some("update") => {
                let input = UpdateLinkInput::new(parse_id(form.id.as_deref())?, target_url);
                input.validate()?;
                Ok(ManagementAction::Update(input))
            }
            Some("delete") => Ok(ManagementAction::Delete {
                id: parse_id(form.id.as_deref())?,
            }),
            other => Err(AppError::bad_request(
                "Invalid action",
                json!({ "intent": other }),
            )),
        }
    }
}

/// Parses the form `id` field as a positive link id.
pub fn parse_id(raw: Option<&str>) -> Result<i64, AppError> {
    let raw = raw.map(str::trim).filter(|id| !id.is_empty()).ok_or_else(|| {
        AppError::bad_request("Link id is required", json!({ "field": "id" }))
    })?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::bad_request(
            "Link id must be a positive integer",
            json!({ "field": "id", "value": raw }),
        )),
    }
}

/// Response for every successful management action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<LinkView>,

    /// PNG of the short URL as a `data:` URL. Set only on create.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code_image: Option<String>,
}

impl ActionResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            link: None,
            qr_code_image: None,
        }
    }

    pub fn with_link(link: LinkView) -> Self {
        Self {
            link: Some(link),
            ..Self::ok()
        }
    }
}

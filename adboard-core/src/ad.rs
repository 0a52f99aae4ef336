//! Ad record and the validated payloads that create or modify it
//!
//! `NewAd` and `AdPatch` can only be built through validation, so a store
//! never sees a title that breaks the length rule.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::validation::{
    check_max_len, check_title, FieldReader, ValidationErrors, DESCRIPTION_MAX_LEN,
};

/// Store-assigned ad identifier (`SERIAL` column).
pub type AdId = i32;

/// A persisted ad
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ad {
    pub id: AdId,
    pub title: String,
    pub description: String,
    pub owner: String,
    pub create_time: DateTime<Utc>,
}

/// Validated input for creating an ad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAd {
    title: String,
    description: String,
    owner: String,
}

impl NewAd {
    /// Validate a create payload.
    ///
    /// `title`, `description` and `owner` must all be present strings.
    /// Unknown keys are ignored.
    ///
    /// # Example
    /// ```
    /// use adboard_core::NewAd;
    /// use serde_json::json;
    ///
    /// let ad = NewAd::from_json(&json!({
    ///     "title": "hello!", "description": "d", "owner": "o"
    /// })).unwrap();
    /// assert_eq!(ad.title(), "hello!");
    ///
    /// assert!(NewAd::from_json(&json!({"title": "hello"})).is_err());
    /// ```
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(body)?;

        let title = reader.required("title");
        let title = reader.check(title, check_title);
        let description = reader.required("description");
        let description = reader.check(description, |d| {
            check_max_len("description", d, DESCRIPTION_MAX_LEN)
        });
        let owner = reader.required("owner");

        reader.finish()?;
        match (title, description, owner) {
            (Some(title), Some(description), Some(owner)) => Ok(Self {
                title,
                description,
                owner,
            }),
            // finish() already reported whichever field is missing
            _ => Err(ValidationErrors::new()),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Build the persisted record once the store has assigned identity.
    pub fn into_ad(self, id: AdId, create_time: DateTime<Utc>) -> Ad {
        Ad {
            id,
            title: self.title,
            description: self.description,
            owner: self.owner,
            create_time,
        }
    }
}

/// Validated partial update; absent fields stay untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdPatch {
    title: Option<String>,
    description: Option<String>,
    owner: Option<String>,
}

impl AdPatch {
    /// Validate a partial-update payload.
    ///
    /// Every field is optional and `null` means "not supplied". A supplied
    /// title must still satisfy the length rule.
    pub fn from_json(body: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(body)?;

        let title = reader.optional("title");
        let title = reader.check(title, check_title);
        let description = reader.optional("description");
        let description = reader.check(description, |d| {
            check_max_len("description", d, DESCRIPTION_MAX_LEN)
        });
        let owner = reader.optional("owner");

        reader.finish()?;
        Ok(Self {
            title,
            description,
            owner,
        })
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.owner.is_none()
    }

    /// Merge the supplied fields into `ad`. `id` and `create_time` are never touched.
    pub fn apply(self, ad: &mut Ad) {
        let Self {
            title,
            description,
            owner,
        } = self;

        if let Some(title) = title {
            ad.title = title;
        }
        if let Some(description) = description {
            ad.description = description;
        }
        if let Some(owner) = owner {
            ad.owner = owner;
        }
    }
}

//! Contact and company list management.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use mailflow_core::{ContactId, Timestamp};
use serde::{Deserialize, Serialize};

/// A contact as returned by the platform API.
#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    /// Contact id
    pub id: ContactId,
    /// Email address
    pub email: String,
    /// First name, if known
    #[serde(default)]
    pub first_name: Option<String>,
    /// Last name, if known
    #[serde(default)]
    pub last_name: Option<String>,
    /// Company name, if known
    #[serde(default)]
    pub company: Option<String>,
    /// Creation time
    pub created_at: Timestamp,
}

/// A company record.
#[derive(Debug, Clone, Deserialize)]
pub struct Company {
    /// Company id
    pub id: ContactId,
    /// Company name
    pub name: String,
    /// Web domain, if known
    #[serde(default)]
    pub domain: Option<String>,
    /// Creation time
    pub created_at: Timestamp,
}

/// Payload for creating a contact.
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    /// Email address
    pub email: String,
    /// First name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl NewContact {
    /// Create a contact payload with the given email address.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            first_name: None,
            last_name: None,
            company: None,
        }
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    /// Set the company name.
    #[must_use]
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }
}

/// One page of contacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactPage {
    /// Contacts on this page
    pub contacts: Vec<Contact>,
    /// Page number, 1-based
    pub page: u32,
    /// Total number of pages
    pub total_pages: u32,
}

/// One page of companies.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyPage {
    /// Companies on this page
    pub companies: Vec<Company>,
    /// Page number, 1-based
    pub page: u32,
    /// Total number of pages
    pub total_pages: u32,
}

impl ApiClient {
    /// List contacts, one page at a time.
    pub async fn list_contacts(&self, page: u32) -> Result<ContactPage> {
        self.get_json(&format!("/contacts?page={page}")).await
    }

    /// Create a contact.
    ///
    /// # Errors
    /// Returns [`ApiError::InvalidRequest`] if the email address is empty
    /// or has no `@`.
    pub async fn create_contact(&self, contact: &NewContact) -> Result<Contact> {
        if !contact.email.contains('@') {
            return Err(ApiError::InvalidRequest(format!(
                "invalid email address: '{}'",
                contact.email
            )));
        }
        self.post_json("/contacts", contact).await
    }

    /// Delete a contact.
    pub async fn delete_contact(&self, id: ContactId) -> Result<()> {
        self.delete(&format!("/contacts/{id}")).await
    }

    /// List companies, one page at a time.
    pub async fn list_companies(&self, page: u32) -> Result<CompanyPage> {
        self.get_json(&format!("/companies?page={page}")).await
    }
}

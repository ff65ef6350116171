//! Repair ticket types.
//!
//! A [`NewTicket`] is a validated submission that has not been stored yet;
//! a [`Ticket`] is the immutable record read back from the store.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::TicketId;

/// Text shown wherever a ticket has no loaner tag.
pub const LOANER_TAG_PLACEHOLDER: &str = "None";

/// Required fields of a repair request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketField {
    Name,
    Email,
    AssetTag,
    Building,
    Problem,
}

impl TicketField {
    /// Form field name as submitted by the intake form.
    #[must_use]
    pub const fn form_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::AssetTag => "asset_tag",
            Self::Building => "building",
            Self::Problem => "problem",
        }
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_name())
    }
}

/// Errors that can occur when building a [`NewTicket`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TicketFieldError {
    /// A required field was absent or blank after trimming.
    #[error("missing required field: {0}")]
    Missing(TicketField),
}

/// A validated repair request, ready to be stored.
///
/// ## Constraints
///
/// - Every field is trimmed of surrounding whitespace
/// - `name`, `email`, `asset_tag`, `building` and `problem` are non-empty
/// - `loaner_tag` is `None` when absent or blank
///
/// ## Examples
///
/// ```
/// use helpdesk_core::NewTicket;
///
/// let ticket = NewTicket::new("  A. Lee ", "a@x.com", "LAP-42", Some(" "), "Hall 3", "Won't power on")
///     .expect("valid ticket");
/// assert_eq!(ticket.name(), "A. Lee");
/// assert_eq!(ticket.loaner_tag(), None);
///
/// assert!(NewTicket::new("", "a@x.com", "LAP-42", None, "Hall 3", "Broken").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawNewTicket")]
pub struct NewTicket {
    name: String,
    email: String,
    asset_tag: String,
    loaner_tag: Option<String>,
    building: String,
    problem: String,
}

impl NewTicket {
    /// Build a ticket from raw form input.
    ///
    /// # Errors
    ///
    /// Returns [`TicketFieldError::Missing`] naming the first required field
    /// that is empty after trimming, in form order.
    pub fn new(
        name: &str,
        email: &str,
        asset_tag: &str,
        loaner_tag: Option<&str>,
        building: &str,
        problem: &str,
    ) -> Result<Self, TicketFieldError> {
        Ok(Self {
            name: required(TicketField::Name, name)?,
            email: required(TicketField::Email, email)?,
            asset_tag: required(TicketField::AssetTag, asset_tag)?,
            loaner_tag: loaner_tag
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned),
            building: required(TicketField::Building, building)?,
            problem: required(TicketField::Problem, problem)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub fn asset_tag(&self) -> &str {
        &self.asset_tag
    }

    #[must_use]
    pub fn loaner_tag(&self) -> Option<&str> {
        self.loaner_tag.as_deref()
    }

    #[must_use]
    pub fn building(&self) -> &str {
        &self.building
    }

    #[must_use]
    pub fn problem(&self) -> &str {
        &self.problem
    }

    /// Attach the store-assigned ID, producing the stored record.
    #[must_use]
    pub fn into_ticket(self, id: TicketId) -> Ticket {
        Ticket {
            id,
            name: self.name,
            email: self.email,
            asset_tag: self.asset_tag,
            loaner_tag: self.loaner_tag,
            building: self.building,
            problem: self.problem,
        }
    }
}

/// Unvalidated wire form of a [`NewTicket`]; deserialization goes through
/// [`NewTicket::new`].
#[derive(Deserialize)]
struct RawNewTicket {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    asset_tag: String,
    #[serde(default)]
    loaner_tag: Option<String>,
    #[serde(default)]
    building: String,
    #[serde(default)]
    problem: String,
}

impl TryFrom<RawNewTicket> for NewTicket {
    type Error = TicketFieldError;

    fn try_from(raw: RawNewTicket) -> Result<Self, Self::Error> {
        Self::new(
            &raw.name,
            &raw.email,
            &raw.asset_tag,
            raw.loaner_tag.as_deref(),
            &raw.building,
            &raw.problem,
        )
    }
}

/// A stored repair ticket.
///
/// Tickets are never updated or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub name: String,
    pub email: String,
    pub asset_tag: String,
    pub loaner_tag: Option<String>,
    pub building: String,
    pub problem: String,
}

impl Ticket {
    /// Loaner tag for display, falling back to [`LOANER_TAG_PLACEHOLDER`].
    #[must_use]
    pub fn loaner_tag_display(&self) -> &str {
        self.loaner_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
            .unwrap_or(LOANER_TAG_PLACEHOLDER)
    }
}

fn required(field: TicketField, value: &str) -> Result<String, TicketFieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TicketFieldError::Missing(field));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> NewTicket {
        NewTicket::new(
            " A. Lee ",
            "a@x.com\n",
            "\tLAP-42",
            Some("  LN-7 "),
            "Hall 3",
            "  Won't power on  ",
        )
        .unwrap()
    }

    #[test]
    fn test_new_ticket_trims_every_field() {
        let ticket = sample();
        assert_eq!(ticket.name(), "A. Lee");
        assert_eq!(ticket.email(), "a@x.com");
        assert_eq!(ticket.asset_tag(), "LAP-42");
        assert_eq!(ticket.loaner_tag(), Some("LN-7"));
        assert_eq!(ticket.building(), "Hall 3");
        assert_eq!(ticket.problem(), "Won't power on");
    }

    #[test]
    fn test_new_ticket_blank_loaner_tag_is_absent() {
        let ticket = NewTicket::new("A", "a@x.com", "T", Some("   "), "B", "P").unwrap();
        assert_eq!(ticket.loaner_tag(), None);

        let ticket = NewTicket::new("A", "a@x.com", "T", None, "B", "P").unwrap();
        assert_eq!(ticket.loaner_tag(), None);
    }

    #[test]
    fn test_new_ticket_rejects_blank_required_fields() {
        let cases = [
            (TicketField::Name, NewTicket::new(" ", "e", "t", None, "b", "p")),
            (TicketField::Email, NewTicket::new("n", "", "t", None, "b", "p")),
            (TicketField::AssetTag, NewTicket::new("n", "e", "\n", None, "b", "p")),
            (TicketField::Building, NewTicket::new("n", "e", "t", None, "", "p")),
            (TicketField::Problem, NewTicket::new("n", "e", "t", None, "b", "  ")),
        ];

        for (field, result) in cases {
            assert_eq!(result, Err(TicketFieldError::Missing(field)));
        }
    }

    #[test]
    fn test_missing_field_error_names_form_field() {
        let err = TicketFieldError::Missing(TicketField::AssetTag);
        assert_eq!(err.to_string(), "missing required field: asset_tag");
    }

    #[test]
    fn test_deserialize_runs_validation() {
        let ticket: NewTicket = serde_json::from_str(
            r#"{"name":" A. Lee ","email":"a@x.com","asset_tag":"LAP-42","loaner_tag":"","building":"Hall 3","problem":"Dead"}"#,
        )
        .unwrap();
        assert_eq!(ticket.name(), "A. Lee");
        assert_eq!(ticket.loaner_tag(), None);

        let blank = serde_json::from_str::<NewTicket>(
            r#"{"name":"   ","email":"a@x.com","asset_tag":"LAP-42","building":"Hall 3","problem":"Dead"}"#,
        );
        assert!(blank.is_err());

        let missing = serde_json::from_str::<NewTicket>(r#"{"name":"A. Lee"}"#);
        assert!(missing.is_err());
    }

    #[test]
    fn test_into_ticket_keeps_values() {
        let ticket = sample().into_ticket(TicketId::new(3));
        assert_eq!(ticket.id, TicketId::new(3));
        assert_eq!(ticket.name, "A. Lee");
        assert_eq!(ticket.loaner_tag_display(), "LN-7");
    }

    #[test]
    fn test_loaner_tag_display_placeholder() {
        let mut ticket = sample().into_ticket(TicketId::new(1));
        ticket.loaner_tag = None;
        assert_eq!(ticket.loaner_tag_display(), LOANER_TAG_PLACEHOLDER);

        ticket.loaner_tag = Some(String::new());
        assert_eq!(ticket.loaner_tag_display(), "None");
    }
}

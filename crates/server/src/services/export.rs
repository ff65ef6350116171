//! CSV export of stored tickets.
//!
//! Shared by the admin download and `helpdesk-cli export`.

use std::fmt::Write;

use helpdesk_core::Ticket;

/// Download filename for the admin export.
pub const EXPORT_FILENAME: &str = "tickets.csv";

/// Header row, in column order.
pub const EXPORT_HEADER: [&str; 7] = [
    "ID",
    "Name",
    "Email",
    "Asset Tag",
    "Loaner Tag",
    "Building",
    "Problem",
];

/// Serialize tickets as CSV, one row per ticket in the given order.
///
/// Rows end in CRLF; an absent loaner tag is an empty cell.
#[must_use]
pub fn tickets_to_csv(tickets: &[Ticket]) -> String {
    let mut csv = EXPORT_HEADER.join(",");
    csv.push_str("\r\n");

    for t in tickets {
        let _ = write!(
            csv,
            "{},{},{},{},{},{},{}\r\n",
            t.id,
            csv_field(&t.name),
            csv_field(&t.email),
            csv_field(&t.asset_tag),
            csv_field(t.loaner_tag.as_deref().unwrap_or("")),
            csv_field(&t.building),
            csv_field(&t.problem),
        );
    }

    csv
}

/// Quote a field when it contains a delimiter, quote, or line break (RFC 4180).
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpdesk_core::TicketId;

    fn ticket(id: i64, problem: &str, loaner_tag: Option<&str>) -> Ticket {
        Ticket {
            id: TicketId::new(id),
            name: "A. Lee".to_string(),
            email: "a@x.com".to_string(),
            asset_tag: format!("LAP-{id}"),
            loaner_tag: loaner_tag.map(str::to_string),
            building: "Hall 3".to_string(),
            problem: problem.to_string(),
        }
    }

    #[test]
    fn test_empty_export_is_header_only() {
        assert_eq!(
            tickets_to_csv(&[]),
            "ID,Name,Email,Asset Tag,Loaner Tag,Building,Problem\r\n"
        );
    }

    #[test]
    fn test_one_row_per_ticket_in_given_order() {
        let csv = tickets_to_csv(&[
            ticket(2, "No sound", Some("LN-5")),
            ticket(1, "Cracked screen", None),
        ]);
        let lines: Vec<&str> = csv.split("\r\n").filter(|l| !l.is_empty()).collect();

        assert_eq!(
            lines,
            [
                "ID,Name,Email,Asset Tag,Loaner Tag,Building,Problem",
                "2,A. Lee,a@x.com,LAP-2,LN-5,Hall 3,No sound",
                "1,A. Lee,a@x.com,LAP-1,,Hall 3,Cracked screen",
            ]
        );
    }

    #[test]
    fn test_fields_with_delimiters_are_quoted() {
        let csv = tickets_to_csv(&[ticket(7, "Keys \"E\", \"R\" stuck\nsince Monday", None)]);
        assert!(csv.ends_with(",\"Keys \"\"E\"\", \"\"R\"\" stuck\nsince Monday\"\r\n"));
    }

    #[test]
    fn test_csv_field_plain_values_unchanged() {
        assert_eq!(csv_field("Hall 3"), "Hall 3");
        assert_eq!(csv_field("a,b"), "\"a,b\"");
    }
}

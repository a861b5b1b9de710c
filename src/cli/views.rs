use chrono::{DateTime, Utc};
use colored::Colorize;

use keywiz::core::models::certificate_record::{CertificateRecord, EntryDetail, EntryListing};
use keywiz::core::models::navigation::{NavigationSignal, View, WindowScope};

use crate::cli::output;

/// What a view is asked to show.
pub enum ViewContent<'a> {
    /// Nothing is loaded; prompt for a keystore.
    Prompt,
    Listing(&'a EntryListing),
    Entry(&'a EntryDetail),
}

const ALIAS_WIDTH: usize = 16;
const NAME_WIDTH: usize = 28;

/// Render `content` in the view named by `signal`.
///
/// Fixed-size views truncate long names into columns; resizable ones print
/// them whole. Secondary views are indented under the primary output.
pub fn render(signal: NavigationSignal, content: ViewContent<'_>) {
    match (signal.target_view, content) {
        (View::KeystoreLoad, _) | (_, ViewContent::Prompt) => {
            println!();
            println!("  Usage: keywiz list <keystore> --password <password>");
            println!("  The password can also come from KEYWIZ_PASSWORD.");
        }
        (View::KeystoreDetails, ViewContent::Listing(listing)) => {
            render_listing(listing, signal.resizable)
        }
        (View::EntryDetail, ViewContent::Entry(detail)) => {
            render_entry(detail, indent(signal.window_scope))
        }
        (View::KeystoreDetails, ViewContent::Entry(detail)) => render_entry(detail, ""),
        (View::EntryDetail, ViewContent::Listing(listing)) => render_listing(listing, true),
    }
}

fn indent(scope: WindowScope) -> &'static str {
    match scope {
        WindowScope::Primary => "",
        WindowScope::Secondary => "    ",
    }
}

fn render_listing(listing: &EntryListing, resizable: bool) {
    if listing.is_empty() {
        output::warning("Keystore is empty");
    } else if listing.records.is_empty() {
        output::warning("No certificate entries");
    } else {
        println!(
            "  {}",
            table_row(&["Alias", "Subject", "Issuer", "Valid from", "Valid until"], resizable).bold()
        );
        for record in &listing.records {
            println!("  {}", table_row(&record_columns(record), resizable));
        }
    }

    for skipped in &listing.skipped {
        output::warning(&format!("'{}' skipped ({})", skipped.alias, skipped.kind));
    }
}

fn record_columns(record: &CertificateRecord) -> [String; 5] {
    [
        record.alias.clone(),
        record.subject.clone(),
        record.issuer.clone(),
        record.valid_from(),
        record.valid_until(),
    ]
}

fn table_row<S: AsRef<str>>(columns: &[S], resizable: bool) -> String {
    if resizable {
        return columns.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("  ");
    }
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let width = match i {
                0 => ALIAS_WIDTH,
                1 | 2 => NAME_WIDTH,
                _ => CertificateRecord::TIMESTAMP_FORMAT.len() + 2,
            };
            format!("{:<width$}", fit(c.as_ref(), width))
        })
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Cut `value` to `width` characters, marking the cut with `…`.
fn fit(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn render_entry(detail: &EntryDetail, pad: &str) {
    let record = &detail.record;
    println!("{pad}  {}", format!("[{}]", record.alias).bold());
    output::field(pad, "Subject", &record.subject);
    output::field(pad, "Issuer", &record.issuer);
    output::field(pad, "Valid from", &record.valid_from());
    output::field(pad, "Valid until", &record.valid_until());
    output::field(pad, "Status", validity_status(record, Utc::now()));
    output::field(pad, "Serial", &detail.serial);
    output::field(pad, "SHA-256", &detail.sha256_fingerprint);
    if let Some(created) = detail.created_at {
        output::field(
            pad,
            "Created",
            &created.format(CertificateRecord::TIMESTAMP_FORMAT).to_string(),
        );
    }
}

fn validity_status(record: &CertificateRecord, now: DateTime<Utc>) -> &'static str {
    if record.is_valid_at(now) {
        "valid"
    } else if now < record.not_before {
        "not yet valid"
    } else {
        "expired"
    }
}

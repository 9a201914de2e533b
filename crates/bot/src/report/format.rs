//! Format — deterministic, total rendering of container state.
//!
//! Nothing here can fail: missing fields were already normalised to empty
//! strings when the summaries were built.

use crate::docker::inventory::ContainerSummary;

/// Reply to `/list` when the runtime has no containers.
pub const EMPTY_LISTING: &str = "Nessun container trovato.";

/// Periodic report sent when the runtime could not be queried.
pub const UNAVAILABLE_REPORT: &str = "Docker non disponibile / permessi mancanti";

const REPORT_HEADER: &str = "Report container:";
const REPORT_EMPTY: &str = "Nessun container";

/// `name (shortId) — image — status`
pub fn format_line(summary: &ContainerSummary) -> String {
    format!(
        "{} ({}) — {} — {}",
        summary.name, summary.short_id, summary.image, summary.status
    )
}

/// One line per container, in the order given. The runtime's enumeration
/// order is authoritative, so no sorting happens here.
pub fn format_listing(summaries: &[ContainerSummary]) -> String {
    if summaries.is_empty() {
        return EMPTY_LISTING.to_string();
    }
    summaries.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

/// Two-line count summary.
///
/// Callers derive both numbers from one snapshot so `running <= total`;
/// the formatter prints whatever it is given.
pub fn format_counts(running: usize, total: usize) -> String {
    format!("Container totali: {}\nIn esecuzione: {}", total, running)
}

/// Body of the periodic broadcast.
pub fn format_report(summaries: &[ContainerSummary]) -> String {
    if summaries.is_empty() {
        return format!("{}\n{}", REPORT_HEADER, REPORT_EMPTY);
    }
    format!("{}\n{}", REPORT_HEADER, format_listing(summaries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::inventory::ContainerStatus;

    fn web() -> ContainerSummary {
        ContainerSummary::new("abc123456789ffff", "web", "nginx", ContainerStatus::Running)
    }

    fn db() -> ContainerSummary {
        ContainerSummary::new("def987654321aaaa", "db", "postgres:16", ContainerStatus::Exited)
    }

    #[test]
    fn test_listing_empty_is_sentinel() {
        assert_eq!(format_listing(&[]), EMPTY_LISTING);
    }

    #[test]
    fn test_listing_single_line() {
        assert_eq!(format_listing(&[web()]), "web (abc123456789) — nginx — running");
    }

    #[test]
    fn test_listing_line_count_matches_input() {
        for n in 1..6 {
            let input: Vec<_> = (0..n).map(|_| web()).collect();
            assert_eq!(format_listing(&input).lines().count(), n);
        }
    }

    #[test]
    fn test_listing_keeps_input_order() {
        let text = format_listing(&[db(), web()]);
        let lines: Vec<_> = text.lines().collect();
        assert!(lines[0].starts_with("db "));
        assert!(lines[1].starts_with("web "));
    }

    #[test]
    fn test_listing_with_blank_fields() {
        let blank = ContainerSummary::new("", "", "", ContainerStatus::Unknown);
        assert_eq!(format_listing(&[blank]), " () —  — unknown");
    }

    #[test]
    fn test_counts_template() {
        assert_eq!(format_counts(1, 3), "Container totali: 3\nIn esecuzione: 1");
    }

    #[test]
    fn test_counts_does_not_enforce_ordering() {
        assert_eq!(format_counts(5, 2), "Container totali: 2\nIn esecuzione: 5");
    }

    #[test]
    fn test_report_has_header() {
        let text = format_report(&[web(), db()]);
        assert!(text.starts_with("Report container:\n"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_report_empty() {
        assert_eq!(format_report(&[]), "Report container:\nNessun container");
    }
}

//! Catalog reports.
//!
//! A [`Report`] is a header row plus string rows built from a catalog for
//! one [`View`]. [`render`] draws it as a table for the terminal and
//! [`export::write_csv`] writes it as CSV.

pub mod export;

use std::cmp::Ordering;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use movielst_common::{Catalog, MetadataRecord};

/// Which columns a report shows and what it sorts by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum View {
    /// Title, genre, ratings, runtime and year
    #[default]
    Default,
    Genre,
    /// IMDb rating
    Imdb,
    /// Rotten Tomatoes rating
    Tomato,
    Cast,
    Director,
    Year,
    Runtime,
    Awards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Ascending,
    Descending,
}

impl Order {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Order::Ascending => ordering,
            Order::Descending => ordering.reverse(),
        }
    }
}

impl View {
    /// Ratings list best first; everything else ascending.
    pub fn default_order(self) -> Order {
        match self {
            View::Imdb | View::Tomato => Order::Descending,
            _ => Order::Ascending,
        }
    }

    fn headers(self) -> &'static [&'static str] {
        match self {
            View::Default => &["TITLE", "GENRE", "IMDB", "RUNTIME", "TOMATO", "YEAR"],
            View::Genre => &["TITLE", "GENRE"],
            View::Imdb => &["TITLE", "IMDB RATING"],
            View::Tomato => &["TITLE", "TOMATO RATING"],
            View::Cast => &["TITLE", "CAST"],
            View::Director => &["TITLE", "DIRECTOR(S)"],
            View::Year => &["TITLE", "YEAR", "RELEASED"],
            View::Runtime => &["TITLE", "RUNTIME"],
            View::Awards => &["TITLE", "AWARDS"],
        }
    }

    fn row(self, record: &MetadataRecord) -> Vec<String> {
        let title = record.title.clone();
        match self {
            View::Default => vec![
                title,
                record.genre.clone(),
                record.imdb_rating().to_string(),
                record.runtime.clone(),
                record.rotten_tomatoes().to_string(),
                record.year.clone(),
            ],
            View::Genre => vec![title, record.genre.clone()],
            View::Imdb => vec![title, record.imdb_rating().to_string()],
            View::Tomato => vec![title, record.rotten_tomatoes().to_string()],
            View::Cast => vec![title, record.actors.clone()],
            View::Director => vec![title, record.director.clone()],
            View::Year => vec![title, record.year.clone(), record.released.clone()],
            View::Runtime => vec![title, record.runtime.clone()],
            View::Awards => vec![title, record.awards.clone()],
        }
    }

    /// Numeric sort key for views that sort by a number.
    fn numeric_key(self, record: &MetadataRecord) -> Option<Option<f64>> {
        match self {
            View::Imdb => Some(leading_number(record.imdb_rating())),
            View::Tomato => Some(leading_number(record.rotten_tomatoes())),
            View::Year => Some(leading_number(&record.year)),
            View::Runtime => Some(leading_number(&record.runtime)),
            _ => None,
        }
    }
}

/// A rendered-to-strings report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Build the rows of `view` over `catalog`, sorted in `order`.
///
/// Numeric views sort by value with unknown values always last; text views
/// sort by title, case-insensitively.
pub fn build(catalog: &Catalog, view: View, order: Order) -> Report {
    let mut records: Vec<&MetadataRecord> = catalog.iter().collect();

    records.sort_by(|a, b| {
        let primary = match (view.numeric_key(a), view.numeric_key(b)) {
            (Some(x), Some(y)) => compare_numeric(x, y, order),
            _ => order.apply(compare_titles(a, b)),
        };
        primary.then_with(|| compare_titles(a, b))
    });

    Report {
        headers: view.headers().iter().map(|h| h.to_string()).collect(),
        rows: records.into_iter().map(|r| view.row(r)).collect(),
    }
}

/// Draw a report as a bordered table.
pub fn render(report: &Report) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(report.headers.clone());
    for row in &report.rows {
        table.add_row(row.clone());
    }

    table.to_string()
}

fn compare_titles(a: &MetadataRecord, b: &MetadataRecord) -> Ordering {
    a.title.to_lowercase().cmp(&b.title.to_lowercase())
}

fn compare_numeric(a: Option<f64>, b: Option<f64>, order: Order) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => order.apply(x.total_cmp(&y)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `"8.8"` -> 8.8, `"87%"` -> 87, `"148 min"` -> 148, `"-"` -> None.
fn leading_number(text: &str) -> Option<f64> {
    let end = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use movielst_common::{Rating, NOT_AVAILABLE};

    fn movie(title: &str, imdb: &str, tomato: Option<&str>, runtime: &str) -> MetadataRecord {
        let mut record = MetadataRecord::new(title);
        record.imdb_rating = imdb.into();
        record.runtime = runtime.into();
        record.genre = "Drama".into();
        if let Some(value) = tomato {
            record.ratings.push(Rating {
                source: "Rotten Tomatoes".into(),
                value: value.into(),
            });
        }
        record
    }

    fn catalog() -> Catalog {
        vec![
            movie("heat", "8.3", Some("83%"), "170 min"),
            movie("Alien", "8.5", Some("98%"), "117 min"),
            movie("Cats", NOT_AVAILABLE, None, NOT_AVAILABLE),
            movie("Inception", "8.8", Some("87%"), "148 min"),
        ]
        .into_iter()
        .collect()
    }

    fn titles(report: &Report) -> Vec<&str> {
        report.rows.iter().map(|r| r[0].as_str()).collect()
    }

    #[test]
    fn test_default_view_sorted_by_title() {
        let report = build(&catalog(), View::Default, Order::Ascending);
        assert_eq!(
            report.headers,
            vec!["TITLE", "GENRE", "IMDB", "RUNTIME", "TOMATO", "YEAR"]
        );
        assert_eq!(titles(&report), vec!["Alien", "Cats", "heat", "Inception"]);
        assert_eq!(report.rows[1][4], NOT_AVAILABLE);
    }

    #[test]
    fn test_imdb_descending_unknown_last() {
        let report = build(&catalog(), View::Imdb, View::Imdb.default_order());
        assert_eq!(titles(&report), vec!["Inception", "Alien", "heat", "Cats"]);
    }

    #[test]
    fn test_imdb_ascending_unknown_still_last() {
        let report = build(&catalog(), View::Imdb, Order::Ascending);
        assert_eq!(titles(&report), vec!["heat", "Alien", "Inception", "Cats"]);
    }

    #[test]
    fn test_tomato_sorts_numerically() {
        let report = build(&catalog(), View::Tomato, Order::Descending);
        assert_eq!(titles(&report), vec!["Alien", "Inception", "heat", "Cats"]);
        assert_eq!(report.rows[0][1], "98%");
    }

    #[test]
    fn test_runtime_sorts_by_minutes() {
        let report = build(&catalog(), View::Runtime, Order::Ascending);
        assert_eq!(titles(&report), vec!["Alien", "Inception", "heat", "Cats"]);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("8.8"), Some(8.8));
        assert_eq!(leading_number("87%"), Some(87.0));
        assert_eq!(leading_number("148 min"), Some(148.0));
        assert_eq!(leading_number("2010–2012"), Some(2010.0));
        assert_eq!(leading_number(NOT_AVAILABLE), None);
    }

    #[test]
    fn test_render_contains_cells() {
        let report = build(&catalog(), View::Genre, Order::Ascending);
        let text = render(&report);
        assert!(text.contains("TITLE"));
        assert!(text.contains("Inception"));
        assert!(text.contains("Drama"));
    }

    #[test]
    fn test_empty_catalog() {
        let report = build(&Catalog::new(), View::Cast, Order::Ascending);
        assert!(report.rows.is_empty());
        assert_eq!(report.headers, vec!["TITLE", "CAST"]);
    }
}

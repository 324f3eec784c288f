use crate::discovery::Provenance;
use crate::pricing::ChartData;
use crate::service::DiscoveryReport;
use crate::utils::format::{format_price, truncate_string};
use crate::utils::time_format::format_datetime;
use colored::*;

const LABEL_WIDTH: usize = 28;

pub struct OutputStyle;

impl OutputStyle {
    pub fn domain(text: &str) -> ColoredString {
        text.bright_green()
    }

    pub fn price(text: &str) -> ColoredString {
        text.bright_yellow()
    }

    pub fn title(text: &str) -> ColoredString {
        text.bright_blue().bold()
    }

    pub fn header(text: &str) -> ColoredString {
        text.bold()
    }

    pub fn label(text: &str) -> ColoredString {
        text.cyan()
    }

    pub fn success(text: &str) -> ColoredString {
        text.green()
    }

    pub fn error(text: &str) -> ColoredString {
        text.red()
    }

    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    pub fn muted(text: &str) -> ColoredString {
        text.dimmed()
    }

    pub fn header_separator() -> String {
        "═".repeat(50)
    }

    pub fn print_header(title: &str) {
        println!("{}", Self::title(title));
        println!("{}", Self::header_separator());
    }

    pub fn print_field_colored(label: &str, value: &str, color_fn: impl Fn(&str) -> ColoredString) {
        println!("{:>12}: {}", Self::label(label), color_fn(value));
    }
}

pub struct DisplayFormatter;

impl DisplayFormatter {
    pub fn print_discovery(report: &DiscoveryReport) {
        OutputStyle::print_header("🔎 Competitor Discovery");
        OutputStyle::print_field_colored("Domain", report.domain.as_str(), OutputStyle::domain);
        if !report.business_type.is_empty() {
            OutputStyle::print_field_colored("Business", &report.business_type, OutputStyle::header);
        }
        OutputStyle::print_field_colored("Catalog", &report.product_catalog_url, OutputStyle::muted);
        OutputStyle::print_field_colored(
            "Discovered",
            &format_datetime(&report.discovered_at),
            OutputStyle::muted,
        );
        println!();

        if report.candidates.is_empty() {
            println!("{}", OutputStyle::muted("No competitors found"));
            return;
        }

        for (i, candidate) in report.candidates.iter().enumerate() {
            let source = match candidate.provenance {
                Provenance::Search => "search",
                Provenance::Suggestion => "suggested",
            };
            println!(
                "{:>3}. {} {}",
                i + 1,
                OutputStyle::domain(&candidate.domain),
                OutputStyle::muted(&format!("({})", source))
            );
        }
    }

    pub fn print_chart(chart: &ChartData) {
        OutputStyle::print_header("📈 Weekly Price Trends");
        println!("{}", OutputStyle::header(&Self::chart_header(chart)));

        for series in &chart.datasets {
            let label = format!(
                "{:<width$}",
                truncate_string(&series.label, LABEL_WIDTH),
                width = LABEL_WIDTH
            );
            let points = series
                .data
                .iter()
                .map(|p| format!("{:>10}", format_price(*p)))
                .collect::<String>();
            println!("{}{}", OutputStyle::domain(&label), OutputStyle::price(&points));
        }
    }

    fn chart_header(chart: &ChartData) -> String {
        let mut header = format!("{:<width$}", "Series", width = LABEL_WIDTH);
        for label in &chart.labels {
            header.push_str(&format!("{:>10}", label));
        }
        header
    }
}

pub fn print_success(message: &str) {
    println!("✅ {}", OutputStyle::success(message));
}

pub fn print_warning(message: &str) {
    println!("⚠️  {}", OutputStyle::warning(message));
}

use clap::{Parser, Subcommand};
use unicode_width::UnicodeWidthStr;

use crate::models::Rubro;

#[derive(Parser)]
#[command(name = "rubros")]
#[command(about = "Terminal CRUD screen for Rubro (category) records")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the Rubro service (overrides RUBROS_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Launch the interactive table (default)
    Tui,

    /// Fetch and print all rubros, then exit
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

/// Pad or truncate `s` to exactly `width` terminal columns
fn fit(s: &str, width: usize) -> String {
    if s.width() <= width {
        return format!("{}{}", s, " ".repeat(width - s.width()));
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width.saturating_sub(3) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    used += 3;
    format!("{}{}", out, " ".repeat(width.saturating_sub(used)))
}

/// Render rubros as an aligned plain-text table
pub fn format_rubro_table(rubros: &[Rubro]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<6} {} {} {}\n",
        "Id",
        fit("Nombre del Rubro", 30),
        fit("Rubro Padre", 24),
        "Estado de Rubro"
    ));
    out.push_str(&"-".repeat(80));
    out.push('\n');

    for rubro in rubros {
        out.push_str(&format!(
            "{:<6} {} {} {}\n",
            rubro.id,
            fit(&rubro.denominacion, 30),
            fit(&rubro.rubro_padre, 24),
            rubro.estado_rubro
        ));
    }

    out.push_str(&format!("\nTotal: {} rubros\n", rubros.len()));
    out
}

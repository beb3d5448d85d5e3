use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tabled::{settings::Style, Table, Tabled};
use uuid::Uuid;

use invrep::config::{self, config_dir, load_config, CONFIG_TEMPLATE};
use invrep::error::{ReportError, Result};
use invrep::report::{
    fmt, generate_reports, load_report, save_report, HeaderField, ItemField, ReportStore, Unit,
};

#[derive(Parser)]
#[command(name = "invrep")]
#[command(version, about = "Inventory report generator", long_about = None)]
struct Cli {
    /// Path to config directory (default: ~/.invrep or XDG config)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with the organization template
    Init,

    /// Create a new report file with one blank item row
    New {
        /// Report file to create (TOML)
        file: PathBuf,
    },

    /// Preview a report's items and totals in the terminal
    Show {
        /// Report file
        file: PathBuf,
    },

    /// Update header fields of a report
    Set {
        /// Report file
        file: PathBuf,

        #[command(flatten)]
        fields: HeaderFlags,
    },

    /// Append an item row, optionally populating its fields
    AddItem {
        /// Report file
        file: PathBuf,

        #[command(flatten)]
        fields: ItemFlags,
    },

    /// Update fields of an existing item row
    EditItem {
        /// Report file
        file: PathBuf,

        /// 1-based row index from 'show'
        index: usize,

        #[command(flatten)]
        fields: ItemFlags,
    },

    /// Remove an item row (the last row cannot be removed)
    RemoveItem {
        /// Report file
        file: PathBuf,

        /// 1-based row index from 'show'
        index: usize,
    },

    /// Generate the PDF and spreadsheet artifacts
    Generate {
        /// Report file
        file: PathBuf,

        /// Custom output directory (default: [output] dir from config.toml)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Open the generated PDF with the system default viewer
        #[arg(long)]
        open: bool,
    },
}

#[derive(Args)]
struct HeaderFlags {
    /// Buyer name (required before generation)
    #[arg(long)]
    buyer_name: Option<String>,

    #[arg(long)]
    supplier_name: Option<String>,

    #[arg(long)]
    file_no: Option<String>,

    #[arg(long)]
    invoice_no: Option<String>,

    #[arg(long)]
    lc_number: Option<String>,

    /// Display format, e.g. 01-Jan-2025
    #[arg(long)]
    invoice_date: Option<String>,

    /// Display format, e.g. 01-Jan-2025; also drives the artifact filename
    #[arg(long)]
    billing_date: Option<String>,
}

impl HeaderFlags {
    fn into_updates(self) -> Vec<HeaderField> {
        let mut updates = Vec::new();
        if let Some(v) = self.buyer_name {
            updates.push(HeaderField::BuyerName(v));
        }
        if let Some(v) = self.supplier_name {
            updates.push(HeaderField::SupplierName(v));
        }
        if let Some(v) = self.file_no {
            updates.push(HeaderField::FileNo(v));
        }
        if let Some(v) = self.invoice_no {
            updates.push(HeaderField::InvoiceNo(v));
        }
        if let Some(v) = self.lc_number {
            updates.push(HeaderField::LcNumber(v));
        }
        if let Some(v) = self.invoice_date {
            updates.push(HeaderField::InvoiceDate(v));
        }
        if let Some(v) = self.billing_date {
            updates.push(HeaderField::BillingDate(v));
        }
        updates
    }
}

#[derive(Args)]
struct ItemFlags {
    #[arg(long)]
    fabric_code: Option<String>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    hs_code: Option<String>,

    #[arg(long)]
    rcvd_date: Option<String>,

    #[arg(long)]
    challan_no: Option<String>,

    #[arg(long)]
    pi_number: Option<String>,

    /// Unit of measure
    #[arg(long, value_enum)]
    unit: Option<Unit>,

    #[arg(long)]
    invoice_qty: Option<f64>,

    #[arg(long)]
    rcvd_qty: Option<f64>,

    #[arg(long)]
    unit_price: Option<f64>,

    #[arg(long)]
    appstreme_no: Option<String>,
}

impl ItemFlags {
    fn into_updates(self) -> Vec<ItemField> {
        let mut updates = Vec::new();
        if let Some(v) = self.fabric_code {
            updates.push(ItemField::FabricCode(v));
        }
        if let Some(v) = self.description {
            updates.push(ItemField::Description(v));
        }
        if let Some(v) = self.color {
            updates.push(ItemField::Color(v));
        }
        if let Some(v) = self.hs_code {
            updates.push(ItemField::HsCode(v));
        }
        if let Some(v) = self.rcvd_date {
            updates.push(ItemField::RcvdDate(v));
        }
        if let Some(v) = self.challan_no {
            updates.push(ItemField::ChallanNo(v));
        }
        if let Some(v) = self.pi_number {
            updates.push(ItemField::PiNumber(v));
        }
        if let Some(v) = self.unit {
            updates.push(ItemField::Unit(v));
        }
        if let Some(v) = self.invoice_qty {
            updates.push(ItemField::InvoiceQty(v));
        }
        if let Some(v) = self.rcvd_qty {
            updates.push(ItemField::RcvdQty(v));
        }
        if let Some(v) = self.unit_price {
            updates.push(ItemField::UnitPrice(v));
        }
        if let Some(v) = self.appstreme_no {
            updates.push(ItemField::AppstremeNo(v));
        }
        updates
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::New { file } => cmd_new(&file),
        Commands::Show { file } => cmd_show(&file),
        Commands::Set { file, fields } => cmd_set(&file, fields),
        Commands::AddItem { file, fields } => cmd_add_item(&file, fields),
        Commands::EditItem {
            file,
            index,
            fields,
        } => cmd_edit_item(&file, index, fields),
        Commands::RemoveItem { file, index } => cmd_remove_item(&file, index),
        Commands::Generate {
            file,
            out_dir,
            open,
        } => cmd_generate(&cfg_dir, &file, out_dir, open),
    }
}

/// Initialize config directory with the organization template
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(ReportError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;
    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;

    println!("Initialized invrep config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your organization details:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!("  2. Start a report:                  invrep new report.toml");
    println!("  3. Fill it in:                      invrep set report.toml --buyer-name <NAME>");
    println!();
    println!("Then generate the artifacts:");
    println!("  invrep generate report.toml");

    Ok(())
}

/// Create a fresh report file
fn cmd_new(file: &Path) -> Result<()> {
    if file.exists() {
        return Err(ReportError::ReportFileExists(file.to_path_buf()));
    }

    let store = ReportStore::new();
    save_report(file, &store)?;

    println!("Created {}", file.display());
    println!("  Billing date preset to {}", store.header.billing_date);
    println!("  Edit it with 'invrep set' and 'invrep add-item', then 'invrep generate'");

    Ok(())
}

// Table row struct for tabled
#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "FABRIC CODE")]
    fabric_code: String,
    #[tabled(rename = "DESCRIPTION")]
    description: String,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "INV QTY")]
    invoice_qty: String,
    #[tabled(rename = "RCVD QTY")]
    rcvd_qty: String,
    #[tabled(rename = "UNIT PRICE")]
    unit_price: String,
    #[tabled(rename = "TOTAL")]
    total: String,
}

/// Append a merged totals footer to the rendered items table, reusing its
/// column borders so the summary reads as part of the table.
fn add_totals_footer(table: &str, invoice_qty: &str, rcvd_qty: &str, value: &str) -> String {
    let lines: Vec<&str> = table.lines().collect();
    if lines.len() < 4 {
        return table.to_string();
    }

    // Parse the top border to discover column widths
    let top = lines[0];
    let Some(inner) = top.strip_prefix('╭').and_then(|s| s.strip_suffix('╮')) else {
        return table.to_string();
    };

    let widths: Vec<usize> = inner.split('┬').map(|p| p.chars().count()).collect();
    if widths.len() != 8 {
        return table.to_string();
    }

    // Merge every column except the trailing TOTAL into one label cell
    let left_width = widths[..7].iter().sum::<usize>() + 6; // +6 for the six ┴ replaced
    let total_width = widths[7];

    let rows = [
        ("TOTAL INVOICE QTY", invoice_qty),
        ("TOTAL RCVD QTY", rcvd_qty),
        ("(=) TOTAL VALUE", value),
    ];

    // Strip the original bottom border and start building
    let mut out = lines[..lines.len() - 1].join("\n");
    out.push('\n');

    // First separator: merge the left columns, keep TOTAL
    out.push_str("├");
    for (idx, w) in widths[..7].iter().enumerate() {
        if idx > 0 {
            out.push('┴');
        }
        out.push_str(&"─".repeat(*w));
    }
    out.push_str(&format!("┼{}┤\n", "─".repeat(total_width)));

    // Summary rows with separators between them
    for (idx, (label, value)) in rows.iter().enumerate() {
        out.push_str(&format!(
            "│ {:>left$} │ {:>total$} │\n",
            label,
            value,
            left = left_width - 2,
            total = total_width - 2
        ));
        if idx < rows.len() - 1 {
            out.push_str(&format!(
                "├{}┼{}┤\n",
                "─".repeat(left_width),
                "─".repeat(total_width)
            ));
        }
    }

    // Bottom border
    out.push_str(&format!(
        "╰{}┴{}╯",
        "─".repeat(left_width),
        "─".repeat(total_width)
    ));

    out
}

/// Preview a report in the terminal
fn cmd_show(file: &Path) -> Result<()> {
    let store = load_report(file)?;
    let snapshot = store.snapshot();

    println!("Report {}", file.display());
    println!("  Buyer:    {}", snapshot.header.buyer_name);
    println!("  Supplier: {}", snapshot.header.supplier_name);
    println!("  Billing:  {}", snapshot.header.billing_date);
    println!();

    let rows: Vec<ItemRow> = snapshot
        .items
        .iter()
        .enumerate()
        .map(|(idx, item)| ItemRow {
            index: idx + 1,
            fabric_code: item.fabric_code.clone(),
            description: item.item_description.clone(),
            unit: item.unit.to_string(),
            invoice_qty: fmt::format_qty(item.invoice_qty),
            rcvd_qty: fmt::format_qty(item.rcvd_qty),
            unit_price: fmt::format_grouped_amount(item.unit_price),
            total: fmt::format_grouped_amount(item.line_total()),
        })
        .collect();

    let table = Table::new(rows).with(Style::rounded()).to_string();
    let table = add_totals_footer(
        &table,
        &fmt::format_qty(snapshot.totals.total_invoice_qty),
        &fmt::format_qty(snapshot.totals.total_rcvd_qty),
        &fmt::format_grouped_amount(snapshot.totals.total_value),
    );
    println!("{table}");

    println!();
    println!("Total: {} item(s)", snapshot.items.len());
    println!("Use the index with edit-item/remove-item (e.g., 'invrep edit-item {} 1 --invoice-qty 100')", file.display());

    Ok(())
}

/// Update header fields
fn cmd_set(file: &Path, fields: HeaderFlags) -> Result<()> {
    let mut store = load_report(file)?;

    let updates = fields.into_updates();
    if updates.is_empty() {
        return Err(ReportError::NoFieldsGiven);
    }

    let count = updates.len();
    for update in updates {
        store.set_header(update);
    }
    save_report(file, &store)?;

    println!("Updated {} header field(s) in {}", count, file.display());
    Ok(())
}

/// Resolve a 1-based row index from 'show' to the row's id.
fn resolve_item_id(store: &ReportStore, index: usize) -> Result<Uuid> {
    if index == 0 || index > store.items.len() {
        return Err(ReportError::InvalidItemIndex {
            index,
            count: store.items.len(),
        });
    }
    Ok(store.items[index - 1].id)
}

/// Append an item row
fn cmd_add_item(file: &Path, fields: ItemFlags) -> Result<()> {
    let mut store = load_report(file)?;

    let id = store.add_item();
    for update in fields.into_updates() {
        store.set_item(id, update);
    }
    save_report(file, &store)?;

    println!("Added item {} to {}", store.items.len(), file.display());
    Ok(())
}

/// Update fields on an existing item row
fn cmd_edit_item(file: &Path, index: usize, fields: ItemFlags) -> Result<()> {
    let mut store = load_report(file)?;
    let id = resolve_item_id(&store, index)?;

    let updates = fields.into_updates();
    if updates.is_empty() {
        return Err(ReportError::NoFieldsGiven);
    }

    let count = updates.len();
    for update in updates {
        store.set_item(id, update);
    }
    save_report(file, &store)?;

    println!("Updated {} field(s) on item {}", count, index);
    Ok(())
}

/// Remove an item row
fn cmd_remove_item(file: &Path, index: usize) -> Result<()> {
    let mut store = load_report(file)?;
    let id = resolve_item_id(&store, index)?;

    if !store.remove_item(id) {
        return Err(ReportError::LastItemRow);
    }
    save_report(file, &store)?;

    println!("Removed item {} from {}", index, file.display());
    Ok(())
}

/// Generate both artifacts from a report file
fn cmd_generate(cfg_dir: &Path, file: &Path, out_dir: Option<PathBuf>, open: bool) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(ReportError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let store = load_report(file)?;
    let snapshot = store.snapshot();

    let out_dir =
        out_dir.unwrap_or_else(|| config::resolve_output_dir(&config.output.dir, cfg_dir));

    let generated = generate_reports(&snapshot, &config.org, &out_dir)?;

    println!(
        "Generated inventory report for buyer '{}'",
        snapshot.header.buyer_name
    );
    println!("  Items:  {}", snapshot.items.len());
    println!(
        "  Value:  ${}",
        fmt::format_grouped_amount(snapshot.totals.total_value)
    );
    println!("  PDF:    {}", generated.pdf_path.display());
    println!("  Excel:  {}", generated.xlsx_path.display());

    if open {
        open_path(&generated.pdf_path)?;
    }

    Ok(())
}

fn open_path(pdf_path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReportError::Io)?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(pdf_path)
            .spawn()
            .map_err(ReportError::Io)?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", pdf_path.to_str().unwrap_or("")])
            .spawn()
            .map_err(ReportError::Io)?;
    }
    Ok(())
}

use super::aggregate::ClusterTotals;
use super::format::format_bytes;
use super::vendor::VendorVariant;
use super::InstallMetrics;

/// ANSI palette for terminal output, passed explicitly wherever color is
/// wanted. A disabled scheme emits no escape codes at all, so piped and
/// tested output stays byte-stable.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    enabled: bool,
}

impl ColorScheme {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    pub fn orange(&self, text: &str) -> String {
        self.paint("33", text)
    }

    pub fn lt_red(&self, text: &str) -> String {
        self.paint("91", text)
    }

    pub fn lt_green(&self, text: &str) -> String {
        self.paint("92", text)
    }
}

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Right,
}

struct Column {
    header: &'static str,
    width: usize,
    align: Align,
}

const REMOTE_COLUMNS: &[Column] = &[
    Column { header: "Install", width: 18, align: Align::Left },
    Column { header: "Multisite", width: 10, align: Align::Right },
    Column { header: "Production", width: 13, align: Align::Right },
    Column { header: "Prod DB", width: 12, align: Align::Right },
    Column { header: "Staging", width: 11, align: Align::Right },
    Column { header: "Stage DB", width: 11, align: Align::Right },
];

const COLOCATED_COLUMNS: &[Column] = &[
    Column { header: "Install", width: 18, align: Align::Left },
    Column { header: "Multisite", width: 10, align: Align::Right },
    Column { header: "Production", width: 13, align: Align::Right },
    Column { header: "Prod DB DU", width: 13, align: Align::Right },
    Column { header: "Prod DB", width: 12, align: Align::Right },
    Column { header: "Staging", width: 11, align: Align::Right },
    Column { header: "Staging DB", width: 13, align: Align::Right },
];

/// Table layout lookup, keyed by vendor variant. The on-disk database
/// column exists only where those files are locally addressable.
fn columns_for(vendor: VendorVariant) -> &'static [Column] {
    match vendor {
        VendorVariant::DbRemote => REMOTE_COLUMNS,
        VendorVariant::DbColocated => COLOCATED_COLUMNS,
    }
}

fn cell(column: &Column, value: &str) -> String {
    match column.align {
        Align::Left => format!("{value:<width$}", width = column.width),
        Align::Right => format!("{value:>width$}", width = column.width),
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn metric_cells(metrics: &InstallMetrics, vendor: VendorVariant) -> Vec<String> {
    let mut cells = vec![
        metrics.install_id.clone(),
        yes_no(metrics.is_multisite).to_string(),
        format_bytes(metrics.production_disk_bytes),
    ];
    if vendor == VendorVariant::DbColocated {
        cells.push(format_bytes(metrics.production_db_disk_bytes));
    }
    cells.push(format_bytes(metrics.production_db_data_bytes));
    cells.push(format_bytes(metrics.staging_disk_bytes));
    cells.push(format_bytes(metrics.staging_db_data_bytes));
    cells
}

fn totals_cells(totals: &ClusterTotals, vendor: VendorVariant) -> Vec<String> {
    let mut cells = vec![
        "Totals:".to_string(),
        String::new(),
        format_bytes(totals.production_disk_bytes),
    ];
    if vendor == VendorVariant::DbColocated {
        cells.push(format_bytes(totals.production_db_disk_bytes));
    }
    cells.push(format_bytes(totals.production_db_data_bytes));
    cells.push(format_bytes(totals.staging_disk_bytes));
    cells.push(format_bytes(totals.staging_db_data_bytes));
    cells
}

fn row(columns: &[Column], values: &[String], first_cell_color: Option<&dyn Fn(&str) -> String>) -> String {
    columns
        .iter()
        .zip(values.iter())
        .enumerate()
        .map(|(i, (column, value))| {
            let padded = cell(column, value);
            match (i, first_cell_color) {
                (0, Some(color)) => color(&padded),
                _ => padded,
            }
        })
        .collect()
}

/// Renders the full audit report: cluster header block, the per-install
/// table in caller-supplied order, the totals row, and the two summary
/// lines. Pure formatting; inputs are not mutated.
pub fn render(
    records: &[InstallMetrics],
    totals: &ClusterTotals,
    vendor: VendorVariant,
    pool_size: &str,
    cluster_id: &str,
    colors: &ColorScheme,
) -> String {
    let columns = columns_for(vendor);
    let header = row(columns, &columns.iter().map(|c| c.header.to_string()).collect::<Vec<_>>(), None);
    let rule = row(
        columns,
        &columns.iter().map(|c| "-".repeat(c.header.len())).collect::<Vec<_>>(),
        None,
    );

    let mut lines = Vec::with_capacity(records.len() + 8);
    lines.push(format!("{} {cluster_id}", colors.lt_green("Pod:")));
    lines.push(format!("{} {pool_size}", colors.lt_green("InnoDB Buffer Pool Size:")));
    lines.push(String::new());
    lines.push(colors.green(&header));
    lines.push(colors.green(&rule));

    let orange = |text: &str| colors.orange(text);
    for metrics in records {
        lines.push(row(columns, &metric_cells(metrics, vendor), Some(&orange)));
    }

    lines.push(colors.green(&rule));
    let green = |text: &str| colors.green(text);
    lines.push(row(columns, &totals_cells(totals, vendor), Some(&green)));
    lines.push(format!(
        "{} {}",
        colors.lt_green("Total diskusage:"),
        format_bytes(totals.combined_disk_bytes(vendor))
    ));
    lines.push(format!(
        "{} {}",
        colors.lt_green("Combined DB Size:"),
        format_bytes(totals.combined_db_bytes())
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

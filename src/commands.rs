use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use crate::config::Config;
use crate::format::format_brl;
use crate::services::analysis::{compute_delivery_time, mode_by_order_count, month_by_total_payment};
use crate::services::db_loader::{DbLoader, TableSource};
use crate::services::excel::{load_dataset, read_workbook};

pub fn run_tables(limit: usize) -> Result<()> {
    let _span = info_span!("tabelas", limit).entered();
    let config = Config::from_env().context("carregar configuracao do banco")?;
    let mut loader = DbLoader::connect(&config)?;
    let stdout = std::io::stdout();
    print_table_previews(&mut loader, limit, &mut stdout.lock())
}

/// Lists the expected tables and previews each one. A failing preview is
/// reported under its table name and the loop moves on.
pub fn print_table_previews<S, W>(source: &mut S, limit: usize, out: &mut W) -> Result<()>
where
    S: TableSource,
    W: Write,
{
    let tables = source.list_tables()?;
    if tables.is_empty() {
        writeln!(out, "Nenhuma das tabelas esperadas foi encontrada no banco.")?;
        return Ok(());
    }
    info!("Found {} expected tables", tables.len());

    writeln!(out, "Tabelas encontradas:")?;
    for name in &tables {
        writeln!(out, "- {}", name)?;
    }

    writeln!(out, "\nAmostra de dados:")?;
    for name in &tables {
        writeln!(out, "\nTabela: {}", name)?;
        match source.preview_table(name, limit) {
            Ok(df) => writeln!(out, "{}", df)?,
            Err(e) => {
                warn!("Failed to preview {}: {}", name, e);
                writeln!(out, "Erro ao ler dados: {}", e)?;
            }
        }
    }
    Ok(())
}

pub fn run_load(path: &Path, rows: usize) -> Result<()> {
    let df = load_dataset(path)?;
    println!("Linhas: {} | Colunas: {}", df.height(), df.width());
    println!("{}", df.head(Some(rows)));
    Ok(())
}

pub fn run_delivery_time(path: &Path) -> Result<()> {
    let df = read_workbook(path)?;
    let stats = compute_delivery_time(&df)?;

    println!("Tempo de entrega (da aprovacao ate a entrega):");
    println!("- Registros validos: {}", stats.valid_count);
    println!("- Media (dias): {}", stats.mean_days);
    println!("- Mediana (dias): {}", stats.median_days);
    Ok(())
}

pub fn run_monthly(path: &Path) -> Result<()> {
    let df = read_workbook(path)?;
    let orders = mode_by_order_count(&df)?;
    let payments = month_by_total_payment(&df)?;

    println!("Vendas por mes (maior quantidade de pedidos, independente do ano):");
    println!("- Mes (numero): {}", orders.month);
    println!("- Mes (nome): {}", orders.month_name());
    println!("- Quantidade de pedidos: {}", orders.count);

    println!("\nMes com maiores pagamentos (soma total, independente do ano):");
    println!("- Mes (numero): {}", payments.month);
    println!("- Mes (nome): {}", payments.month_name());
    println!("- Total de pagamentos: {}", format_brl(payments.total));
    Ok(())
}

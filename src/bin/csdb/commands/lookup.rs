use std::io::Write;

use anyhow::{Context, Result};

use chemsep_db::pipeline::read_json;
use chemsep_db::{BinaryInteractionRecord, InteractionTable};

use crate::cli::LookupArgs;
use crate::display::{Context as DisplayContext, Progress, print_interaction_record};
use crate::io::stdout;

pub fn run_lookup(args: &LookupArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 2);

    progress.step("Loading interaction records");
    let records: Vec<BinaryInteractionRecord> = read_json(&args.db)
        .with_context(|| format!("Failed to load interaction records: {}", args.db.display()))?;
    let table = InteractionTable::new(records);
    progress.complete_step(
        "Loading interaction records",
        &[format!("{} pairs", table.len())],
    );

    progress.step("Looking up pair");
    let record = table.find(&args.id_1, &args.id_2)?;
    progress.complete_step(
        "Looking up pair",
        &[format!("{} / {}", record.casn_1, record.casn_2)],
    );

    if ctx.interactive {
        print_interaction_record(record);
    }
    progress.finish("Lookup complete");

    let mut out = stdout();
    if args.json {
        serde_json::to_writer_pretty(&mut out, record).context("Failed to encode record")?;
        writeln!(out)?;
    } else {
        writeln!(out, "{}", record.k12)?;
    }
    out.flush()?;

    Ok(())
}

mod convert;
mod lookup;

use convert::{run_pipeline, run_stage};
use lookup::run_lookup;

use anyhow::Result;

use chemsep_db::Stage;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Run(args) => run_pipeline(&args, ctx),
        Command::Components(args) => run_stage(Stage::Components, &args, ctx),
        Command::Names(args) => run_stage(Stage::Names, &args, ctx),
        Command::Interactions(args) => run_stage(Stage::Interactions, &args, ctx),
        Command::Lookup(args) => run_lookup(&args, ctx),
    }
}

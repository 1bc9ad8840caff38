use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod display;
mod io;
mod util;

fn main() -> ExitCode {
    let cli = cli::parse();
    let ctx = display::Context::new(cli.command.quiet());

    display::init_logging(ctx);
    if ctx.interactive {
        display::print_banner();
    }

    if let Err(e) = commands::dispatch(cli.command, ctx) {
        display::print_error(&e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

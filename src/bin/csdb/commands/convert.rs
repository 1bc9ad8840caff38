use anyhow::{Context, Result};

use chemsep_db::io::{ParsedComponents, ParsedInteractions};
use chemsep_db::pipeline::{self, PipelineConfig};
use chemsep_db::{NameIndex, PipelineOutput, Stage};

use crate::cli::PipelineArgs;
use crate::config::build_pipeline_config;
use crate::display::{
    Context as DisplayContext, Progress, print_block_failures, print_component_summary,
    print_interaction_summary, print_name_summary, print_outputs,
};

pub fn run_pipeline(args: &PipelineArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_pipeline_config(args)?;
    let mut progress = Progress::new(ctx.interactive, 4);

    progress.step("Parsing component database");
    let components = pipeline::parse_components(&config)
        .with_context(|| stage_failed(Stage::Components))?;
    progress.complete_step("Parsing component database", &component_details(&components));

    progress.step("Building name index");
    let names = pipeline::build_name_index(&components.records);
    progress.complete_step("Building name index", &name_details(&names));

    progress.step("Parsing interaction parameters");
    let interactions = pipeline::parse_interactions(&config, &names.entries)
        .with_context(|| stage_failed(Stage::Interactions))?;
    progress.complete_step(
        "Parsing interaction parameters",
        &interaction_details(&interactions),
    );

    progress.step("Writing JSON outputs");
    let output = PipelineOutput {
        components,
        names,
        interactions,
    };
    pipeline::write_outputs(&config, &output).context("Failed to write pipeline outputs")?;
    progress.complete_step("Writing JSON outputs", &output_details(&config, &Stage::ALL));

    if ctx.interactive {
        print_component_summary(&output.components);
        print_block_failures(&output.components.failures);
        print_name_summary(&output.names);
        print_interaction_summary(&output.interactions);
        print_outputs(&config, &Stage::ALL);
    }

    progress.finish("Conversion complete");
    Ok(())
}

pub fn run_stage(stage: Stage, args: &PipelineArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_pipeline_config(args)?;
    let mut progress = Progress::new(ctx.interactive, 1);
    let description = stage_description(stage);

    progress.step(description);
    match stage {
        Stage::Components => {
            let parsed = pipeline::run_components(&config)
                .with_context(|| stage_failed(stage))?;
            progress.complete_step(description, &component_details(&parsed));
            if ctx.interactive {
                print_component_summary(&parsed);
                print_block_failures(&parsed.failures);
            }
        }
        Stage::Names => {
            let names = pipeline::run_names(&config).with_context(|| stage_failed(stage))?;
            progress.complete_step(description, &name_details(&names));
            if ctx.interactive {
                print_name_summary(&names);
            }
        }
        Stage::Interactions => {
            let parsed = pipeline::run_interactions(&config)
                .with_context(|| stage_failed(stage))?;
            progress.complete_step(description, &interaction_details(&parsed));
            if ctx.interactive {
                print_interaction_summary(&parsed);
            }
        }
    }

    if ctx.interactive {
        print_outputs(&config, &[stage]);
    }
    progress.finish("Stage complete");
    Ok(())
}

fn stage_failed(stage: Stage) -> String {
    let mut message = stage.to_string();
    if let Some(first) = message.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("{message} failed")
}

fn stage_description(stage: Stage) -> &'static str {
    match stage {
        Stage::Components => "Parsing component database",
        Stage::Names => "Building name index",
        Stage::Interactions => "Parsing interaction parameters",
    }
}

fn component_details(parsed: &ParsedComponents) -> Vec<String> {
    let mut details = vec![format!(
        "{} records from {} blocks",
        parsed.records.len(),
        parsed.block_count()
    )];
    if !parsed.failures.is_empty() {
        details.push(format!("{} malformed blocks skipped", parsed.failures.len()));
    }
    details
}

fn name_details(names: &NameIndex) -> Vec<String> {
    vec![format!(
        "{} entries, {} without CASN",
        names.len(),
        names.without_casn()
    )]
}

fn interaction_details(parsed: &ParsedInteractions) -> Vec<String> {
    vec![format!(
        "{} pairs, {} lines skipped",
        parsed.records.len(),
        parsed.skipped_lines
    )]
}

fn output_details(config: &PipelineConfig, stages: &[Stage]) -> Vec<String> {
    stages
        .iter()
        .map(|stage| stage.output_path(config).display().to_string())
        .collect()
}

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_trendqc::cli::{Cli, Commands, FormatArg, InputArgs};
use kira_trendqc::config::PipelineConfig;
use kira_trendqc::ctx::{Ctx, RunOptions};
use kira_trendqc::input::InputFormat;
use kira_trendqc::io::{self, ExportFormat, json_writer};
use kira_trendqc::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => {
            let options = RunOptions {
                declared_format: args.common.format.map(input_format),
                include_forecast: !args.no_forecast,
                include_visualizations: args.visualizations,
                export: args.export.map(export_format),
                category: args.category,
            };
            let mut ctx = build_ctx(&args.common, args.out, options)?;
            Pipeline::analyze().run(&mut ctx)?;
            print!("{}", io::summary::format_summary(&ctx));
            print!("{}", io::summary::format_warnings(&ctx.warnings));
        }
        Commands::Quick(args) => {
            let options = RunOptions {
                declared_format: args.common.format.map(input_format),
                include_forecast: false,
                category: args.category,
                ..RunOptions::default()
            };
            let mut ctx = build_ctx(&args.common, PathBuf::from("."), options)?;
            Pipeline::quick().run(&mut ctx)?;
            let report = json_writer::build_quick_report(&ctx);
            println!("{}", serde_json::to_string_pretty(&report)?);
            eprint!("{}", io::summary::format_warnings(&ctx.warnings));
        }
        Commands::Validate(args) => {
            let options = RunOptions {
                declared_format: args.common.format.map(input_format),
                ..RunOptions::default()
            };
            let mut ctx = build_ctx(&args.common, PathBuf::from("."), options)?;
            Pipeline::validate().run(&mut ctx)?;
            print!("{}", io::summary::format_validate_summary(&ctx));
            print!("{}", io::summary::format_warnings(&ctx.warnings));
        }
    }

    Ok(())
}

fn build_ctx(common: &InputArgs, out: PathBuf, options: RunOptions) -> Result<Ctx> {
    let config = match &common.config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let mut ctx = Ctx::new(common.input.clone(), out, options, config);
    ctx.threads = common.threads;
    Ok(ctx)
}

fn input_format(arg: FormatArg) -> InputFormat {
    match arg {
        FormatArg::Csv => InputFormat::Csv,
        FormatArg::Json => InputFormat::Json,
    }
}

fn export_format(arg: FormatArg) -> ExportFormat {
    match arg {
        FormatArg::Csv => ExportFormat::Csv,
        FormatArg::Json => ExportFormat::Json,
    }
}

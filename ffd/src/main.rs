use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, bail};
use clap::Parser as ClapParser;
use ffd::config::FFDConfig;
use ffd::io::cli::Cli;
use ffd::io::output::FFDOutput;
use ffd::{EPOCH, io, opt};
use itertools::Itertools;
use log::{error, info, warn};
use rayon::prelude::*;
use seampack::io::assembly::{PageAssembler, run_report};
use seampack::io::export::export_solution;
use seampack::io::import::DocumentImporter;
use seampack::io::svg::SvgPageAssembler;

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let mut config = match args.config_file {
        None => {
            warn!("[MAIN] No config file provided, use --config-file to provide a custom config");
            FFDConfig::default()
        }
        Some(config_file) => {
            let file = File::open(&config_file).with_context(|| {
                format!("could not open config file: {}", config_file.display())
            })?;
            let reader = BufReader::new(file);
            serde_json::from_reader(reader).context("incorrect config file format")?
        }
    };
    if let Some(paper) = args.paper {
        config.page.paper = paper;
    }
    if let Some(orientation) = args.orientation {
        config.page.orientation = orientation;
    }
    if let Some(allowance) = args.allowance {
        config.allowance_mm = allowance;
    }
    config.validate()?;

    info!("[MAIN] Successfully parsed FFDConfig: {config:?}");

    if !args.solution_folder.exists() {
        fs::create_dir_all(&args.solution_folder).with_context(|| {
            format!(
                "could not create solution folder: {}",
                args.solution_folder.display()
            )
        })?;
    }

    //every document is an independent unit of work
    let failures = args
        .input_file
        .par_iter()
        .filter_map(|input| {
            main_document(input, &config, &args.solution_folder)
                .map_err(|e| {
                    error!("[MAIN] {}: {e:#}", input.display());
                    input.display().to_string()
                })
                .err()
        })
        .collect::<Vec<_>>();

    info!(
        "[MAIN] processed {} document(s) in {:.3}s",
        args.input_file.len(),
        EPOCH.elapsed().as_secs_f64()
    );

    match failures.is_empty() {
        true => Ok(()),
        false => bail!("failed to process: {}", failures.iter().join(", ")),
    }
}

fn main_document(input: &Path, config: &FFDConfig, output_folder: &Path) -> Result<()> {
    let input_stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("invalid document name: {}", input.display()))?;

    let importer = DocumentImporter::new(config.outline_class.clone(), config.scale_factor)?;
    let doc = io::read_document(input, &importer)?;
    let run = opt::paginate(&doc, config)?;

    let report = run_report(&run.pieces.pieces, &run.pagination, run.errors());
    if let Some(report) = &report {
        warn!("[MAIN] {input_stem}: {report}");
    }

    {
        let output = FFDOutput {
            document: input_stem.to_string(),
            solution: export_solution(&run.pagination, run.errors()),
            config: config.clone(),
            report,
        };
        let solution_path = output_folder.join(format!("sol_{input_stem}.json"));
        io::write_json(&output, &solution_path)?;
    }

    {
        let assembler = SvgPageAssembler::new(config.page, config.svg_draw_options);
        let pages = assembler
            .assemble(&run.pieces.pieces, &run.pagination)
            .context("page assembly blocked")?;
        for (i, page) in pages.iter().enumerate() {
            let svg_path = output_folder.join(format!("sol_{input_stem}_{i}.svg"));
            io::write_svg(page, &svg_path)?;
        }
    }

    Ok(())
}

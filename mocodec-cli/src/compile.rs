use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use mocodec::{ByteOrder, Error, MoGenerator, MoLayout, TextDomain, formats::FormatType, load_domain};
use rayon::prelude::*;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    /// Exact output path; only valid with a single input.
    pub output: Option<PathBuf>,
    /// Directory that receives `<domain>.mo` (or the locale tree with `lang`).
    pub out_dir: Option<PathBuf>,
    /// Locale directory name; outputs go to `<out_dir>/<lang>/LC_MESSAGES/`.
    pub lang: Option<String>,
    /// Input format override; inferred from the extension otherwise.
    pub format: Option<FormatType>,
    pub byte_order: ByteOrder,
}

/// The result of compiling one input file.
#[derive(Debug)]
pub struct CompileOutcome {
    pub input: PathBuf,
    /// Where the MO file went (or would have gone); unknown when the input could not be read.
    pub output: Option<PathBuf>,
    pub result: Result<MoLayout, Error>,
}

/// An input whose domain loaded and whose output path is known.
struct Planned {
    domain: TextDomain,
    output: PathBuf,
}

/// Rejects option combinations that cannot produce one output per input.
pub fn validate_options(inputs: &[PathBuf], options: &CompileOptions) -> Result<(), String> {
    if inputs.is_empty() {
        return Err("At least one input file is required".to_string());
    }
    if options.output.is_some() && inputs.len() > 1 {
        return Err(format!(
            "--output names a single file but {} inputs were given; use --out-dir instead",
            inputs.len()
        ));
    }
    if options.output.is_some() && (options.out_dir.is_some() || options.lang.is_some()) {
        return Err("--output cannot be combined with --out-dir or --lang".to_string());
    }
    Ok(())
}

/// Where the MO file for `domain_name` goes under `options`.
///
/// Without an explicit `--output`, the domain name becomes a file name and
/// must therefore be a single plain path component.
pub fn output_path_for(domain_name: &str, options: &CompileOptions) -> Result<PathBuf, Error> {
    if let Some(output) = &options.output {
        return Ok(output.clone());
    }
    if domain_name.is_empty()
        || domain_name == "."
        || domain_name == ".."
        || domain_name.contains(['/', '\\'])
    {
        return Err(Error::DataMismatch(format!(
            "domain name {:?} cannot be used as a file name",
            domain_name
        )));
    }

    let mut path = options
        .out_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from("."));
    if let Some(lang) = &options.lang {
        path.push(lang);
        path.push("LC_MESSAGES");
    }
    path.push(format!("{}.mo", domain_name));
    Ok(path)
}

/// Compiles every input in parallel. Outcomes come back in input order.
///
/// All output paths are resolved before anything is written. Inputs that
/// resolve to the same path all fail and none of them is written.
pub fn compile_inputs(inputs: &[PathBuf], options: &CompileOptions) -> Vec<CompileOutcome> {
    let plans: Vec<Result<Planned, Error>> = inputs
        .par_iter()
        .map(|input| plan_one(input, options))
        .collect();

    let mut claims: HashMap<PathBuf, Vec<&Path>> = HashMap::new();
    for (input, plan) in inputs.iter().zip(&plans) {
        if let Ok(planned) = plan {
            claims
                .entry(planned.output.clone())
                .or_default()
                .push(input.as_path());
        }
    }

    let generator = MoGenerator::new().with_byte_order(options.byte_order);
    plans
        .into_par_iter()
        .zip(inputs.par_iter())
        .map(|(plan, input)| {
            let (output, result) = match plan {
                Err(e) => (None, Err(e)),
                Ok(planned) => {
                    let claimants = &claims[&planned.output];
                    let result = if claimants.len() > 1 {
                        Err(collision_error(&planned.output, claimants))
                    } else {
                        write_one(&generator, input, &planned)
                    };
                    (Some(planned.output), result)
                }
            };
            CompileOutcome {
                input: input.clone(),
                output,
                result,
            }
        })
        .collect()
}

fn plan_one(input: &Path, options: &CompileOptions) -> Result<Planned, Error> {
    let domain = load_domain(input, options.format)?;
    let output = output_path_for(domain.name(), options)?;
    Ok(Planned { domain, output })
}

fn write_one(generator: &MoGenerator, input: &Path, planned: &Planned) -> Result<MoLayout, Error> {
    debug!(input = %input.display(), output = %planned.output.display(), "compiling");
    ensure_parent_dir(&planned.output)?;
    generator.generate_file(&planned.domain, &planned.output)
}

fn collision_error(output: &Path, claimants: &[&Path]) -> Error {
    Error::DataMismatch(format!(
        "{} inputs would write {}: {}",
        claimants.len(),
        output.display(),
        claimants
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

fn ensure_parent_dir(path: &Path) -> Result<(), Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| Error::not_writable(parent, e))
        }
        _ => Ok(()),
    }
}

/// Run the compile command: print one line per input and return whether all succeeded.
pub fn run_compile_command(inputs: Vec<PathBuf>, options: CompileOptions) -> bool {
    if let Err(e) = validate_options(&inputs, &options) {
        eprintln!("Error: {}", e);
        return false;
    }

    let outcomes = compile_inputs(&inputs, &options);
    let mut ok = true;
    for outcome in outcomes {
        match (&outcome.result, &outcome.output) {
            (Ok(layout), Some(output)) => println!(
                "✅ {} -> {} ({} strings, {} bytes)",
                outcome.input.display(),
                output.display(),
                layout.count,
                layout.file_size
            ),
            (Err(e), _) => {
                ok = false;
                eprintln!("❌ {}", outcome.input.display());
                eprintln!("Error: {}", e);
            }
            (Ok(_), None) => {}
        }
    }
    ok
}

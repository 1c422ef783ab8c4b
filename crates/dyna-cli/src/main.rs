//! Inspects, checks and rewrites LS-DYNA keyword decks.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use dyna_card::Format;
use dyna_io::{DeckOptions, DeckReader, DeckWriter, Result};
use dyna_model::{KeywordRegistry, Model, ModelStatistics, PartId, SetId, ValidationReport};
use dyna_topology::{ElementManager, SetManager};
use log::{LevelFilter, info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Output extra/debug info while reading.
    #[arg(short, long, global = true)]
    verbose: bool,
    /// JSON file with reader and writer options.
    #[arg(long, global = true)]
    options: Option<PathBuf>,
    /// Field profile of the input deck. Overrides the options file.
    #[arg(short, long, global = true, value_enum)]
    format: Option<Profile>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print keyword and entity counts.
    Stats {
        file: PathBuf,
        /// Print the counts as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check ids and references. Exits with 1 when errors are found.
    Validate {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Rewrite a deck, optionally in another field profile.
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// Field profile of the written deck. Defaults to the options file.
        #[arg(long, value_enum)]
        to: Option<Profile>,
    },
    /// Add the external surface of some parts as a *SET_SEGMENT.
    Skin {
        input: PathBuf,
        output: PathBuf,
        /// Part to include; repeat for several. All parts when absent.
        #[arg(short, long = "part")]
        parts: Vec<PartId>,
        /// Id of the new set. Defaults to the next free set id.
        #[arg(long)]
        set_id: Option<SetId>,
        /// Only count elements alive at this time.
        #[arg(long)]
        time: Option<f64>,
        /// Also add a *SET_NODE_LIST with the surface nodes.
        #[arg(long)]
        node_set: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Profile {
    Standard,
    Large,
}

impl From<Profile> for Format {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Standard => Format::Standard,
            Profile::Large => Format::Large,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::builder().filter_level(level).init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let options = load_options(cli)?;
    match &cli.command {
        Command::Stats { file, json } => {
            let model = read_model(file, &options)?;
            println!("{}", stats(&model, *json)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { file, json } => {
            let model = read_model(file, &options)?;
            let report = ValidationReport::for_model(&model);
            if *json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else if report.is_clean() {
                println!("no problems found");
            } else {
                for message in &report.messages {
                    println!("{message}");
                }
            }
            Ok(if report.has_errors() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Convert { input, output, to } => {
            let model = read_model(input, &options)?;
            let mut write = options.write.clone();
            if let Some(to) = to {
                write.format = (*to).into();
            }
            convert(&model, output, input, write)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Skin {
            input,
            output,
            parts,
            set_id,
            time,
            node_set,
        } => {
            let mut model = read_model(input, &options)?;
            let sid = skin(&mut model, parts, *set_id, *time, *node_set);
            info!("added segment set {sid}");
            DeckWriter::default()
                .with_options(options.write.clone())
                .write_file(&model, output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_options(cli: &Cli) -> Result<DeckOptions> {
    let mut options = match &cli.options {
        Some(path) => DeckOptions::load(path)?,
        None => DeckOptions::default(),
    };
    if let Some(format) = cli.format {
        options.read.format = format.into();
    }
    Ok(options)
}

fn read_model(path: &Path, options: &DeckOptions) -> Result<Model> {
    info!("reading {}", path.display());
    let registry = KeywordRegistry::with_defaults();
    DeckReader::new(&registry)
        .with_options(options.read.clone())
        .read_file(path)
}

fn stats(model: &Model, json: bool) -> Result<String> {
    let stats = ModelStatistics::from_model(model);
    if json {
        Ok(serde_json::to_string_pretty(&stats)?)
    } else {
        Ok(stats.format())
    }
}

fn convert(
    model: &Model,
    output: &Path,
    input: &Path,
    options: dyna_io::WriteOptions,
) -> Result<()> {
    let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    DeckWriter::default()
        .with_options(options)
        .with_header([format!("converted from {} on {stamp}", input.display())])
        .write_file(model, output)
}

/// Adds the external surface as a new segment set and returns its id. The
/// node set, when requested, takes the next id after it.
fn skin(
    model: &mut Model,
    parts: &[PartId],
    set_id: Option<SetId>,
    time: Option<f64>,
    node_set: bool,
) -> SetId {
    let elements = ElementManager::from_model(model);
    let surface = match time {
        Some(t) => SetManager::external_surface_at(model, &elements, parts, t),
        None => SetManager::external_surface(model, &elements, parts),
    };
    if surface.is_empty() {
        warn!("no external faces found for parts {parts:?}");
    }

    let sid = set_id.unwrap_or_else(|| SetManager::next_free_set_id(model));
    SetManager::create_segment_set(model, sid, &surface);
    if node_set {
        let nodes = SetManager::nodes_of_segments(&surface);
        let nsid = SetManager::next_free_set_id(model);
        SetManager::create_node_set(model, nsid, &nodes);
    }
    sid
}

#[cfg(test)]
mod tests {
    use super::*;
    use dyna_model::keywords::{SetNodeList, SetSegment};

    const CUBE: &str = "\
*KEYWORD
*PART
cube
         1         1         1
*NODE
       1             0.0             0.0             0.0
       2             1.0             0.0             0.0
       3             1.0             1.0             0.0
       4             0.0             1.0             0.0
       5             0.0             0.0             1.0
       6             1.0             0.0             1.0
       7             1.0             1.0             1.0
       8             0.0             1.0             1.0
*ELEMENT_SOLID
       1       1       1       2       3       4       5       6       7       8
*END
";

    fn cube() -> Model {
        let registry = KeywordRegistry::with_defaults();
        DeckReader::new(&registry).read_str(CUBE).unwrap()
    }

    #[test]
    fn parses_global_flags_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "dyna-cli", "convert", "in.k", "out.k", "--to", "large", "-v", "--format", "standard",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, Some(Profile::Standard));
        match cli.command {
            Command::Convert { to, .. } => assert_eq!(to, Some(Profile::Large)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn skin_adds_segment_and_node_sets() {
        let mut model = cube();
        let sid = skin(&mut model, &[], None, None, true);
        assert_eq!(sid, 1);
        let set = model.first_of_type::<SetSegment>().unwrap();
        assert_eq!(set.segments.len(), 6);
        let nodes = model.first_of_type::<SetNodeList>().unwrap();
        assert_eq!(nodes.sid(), 2);
        assert_eq!(nodes.nodes.len(), 8);
    }

    #[test]
    fn stats_as_json() {
        let text = stats(&cube(), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["nodes"], 8);
        assert_eq!(value["elements"], 1);
    }

    #[test]
    fn convert_writes_a_stamped_large_deck() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("cube_large.k");
        let options = dyna_io::WriteOptions {
            format: Format::Large,
            ..Default::default()
        };
        convert(&cube(), &output, Path::new("cube.k"), options).unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("$ converted from cube.k on "));
        let registry = KeywordRegistry::with_defaults();
        let back = DeckReader::new(&registry)
            .with_options(dyna_io::ReadOptions {
                format: Format::Large,
                ..Default::default()
            })
            .read_str(&text)
            .unwrap();
        assert_eq!(back.len(), 3);
    }
}

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{ error, LevelFilter };
use obj2asset::{ convert_all, logger, Settings };

#[derive(Parser)]
#[command(name = "obj2asset")]
#[command(about = "Convert Wavefront OBJ meshes into .g assets", long_about = None)]
#[command(version)]
struct Cli {
    /// OBJ files to convert, each is written next to its input as `<name>.g`
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Scale factor applied to vertex positions
    #[arg(long, env = "SCALE", default_value_t = 1.0)]
    scale: f64,

    /// Continue with the remaining files after a failure
    #[arg(long)]
    keep_going: bool,

    /// Log debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn level(&self) -> LevelFilter {
        match (self.verbose, self.quiet) {
            (true, _) => LevelFilter::Debug,
            (_, true) => LevelFilter::Warn,
            _ => LevelFilter::Info,
        }
    }

    fn settings(&self) -> Settings {
        Settings {
            scale: self.scale,
            keep_going: self.keep_going,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logger::init(cli.level()) {
        eprintln!("Unable to install logger: {err}");
    }

    let settings = cli.settings();
    if let Err(err) = settings.validate() {
        error!("{err}");
        return ExitCode::FAILURE;
    }

    let outcome = convert_all(cli.files.as_slice(), &settings);
    if outcome.success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[cfg(test)]
mod test_cli {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_map_to_settings() {
        let cli = Cli::try_parse_from(["obj2asset", "--scale", "0.5", "--keep-going", "-v", "a.obj", "b.obj"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("a.obj"), PathBuf::from("b.obj")]);
        assert_eq!(cli.settings(), Settings { scale: 0.5, keep_going: true });
        assert_eq!(cli.level(), LevelFilter::Debug);
    }

    #[test]
    fn needs_at_least_one_file() {
        assert!(Cli::try_parse_from(["obj2asset"]).is_err());
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["obj2asset", "-v", "-q", "a.obj"]).is_err());
    }
}

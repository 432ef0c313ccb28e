use crate::defaults;
use clap::Args;
use popsimu_sim::analysis::PairSampling;
use popsimu_sim::sweep::{GenerationPlan, RunSettings};
use std::path::PathBuf;

/// Arguments for the `configs` command.
#[derive(Args, Debug)]
pub struct ConfigsArgs {
    /// Parameter file holding one or more parameter blocks (JSON, or YAML by extension)
    pub input: PathBuf,

    /// Where to write the generated configuration array (JSON)
    pub output: PathBuf,

    /// Number of copies of every configuration
    #[arg(short, long, default_value_t = defaults::REPLICATES)]
    pub replicates: usize,
}

/// Arguments for the `simulate` command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Workspace directory; the config and output paths are relative to it
    #[arg(short, long)]
    pub workspace: Option<PathBuf>,

    /// Parameter file (YAML array of parameter blocks, or JSON)
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    pub config: PathBuf,

    /// Prefix of the result file name
    #[arg(short, long, default_value = defaults::PREFIX)]
    pub prefix: String,

    /// Output directory inside the workspace
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Number of replicates per job
    #[arg(short = 'n', long, default_value_t = defaults::NUM_REP)]
    pub num_rep: usize,

    /// Generations between two measurements
    #[arg(short = 's', long, default_value_t = defaults::GEN_STEP)]
    pub gen_step: usize,

    /// Number of measurements per replicate
    #[arg(short = 't', long, default_value_t = defaults::GEN_TIME)]
    pub gen_time: usize,

    #[command(flatten)]
    pub execution: ExecutionArgs,
}

impl SimulateArgs {
    fn workspace(&self) -> PathBuf {
        self.workspace.clone().unwrap_or_default()
    }

    pub fn config_path(&self) -> PathBuf {
        self.workspace().join(&self.config)
    }

    /// `WORKSPACE/OUTDIR/PREFIX_res.json`
    pub fn output_path(&self) -> PathBuf {
        let mut dir = self.workspace();
        if let Some(outdir) = &self.outdir {
            dir.push(outdir);
        }
        dir.join(format!("{}{}", self.prefix, defaults::RESULT_SUFFIX))
    }

    pub fn plan(&self) -> GenerationPlan {
        GenerationPlan::new(self.num_rep, self.gen_step, self.gen_time)
    }
}

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Configuration array written by `configs`
    pub configs: PathBuf,

    /// Result file (newline-delimited JSON)
    pub output: PathBuf,

    #[command(flatten)]
    pub execution: ExecutionArgs,
}

/// Flags shared by every command that runs simulations.
#[derive(Args, Debug)]
pub struct ExecutionArgs {
    /// Master random seed (default: seeded from the OS)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of sequence pairs compared per measurement
    ///
    /// Populations with fewer pairs are compared exhaustively.
    #[arg(long, default_value_t = defaults::MAX_PAIRS)]
    pub max_pairs: usize,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl ExecutionArgs {
    pub fn settings(&self, threads: usize) -> RunSettings {
        RunSettings {
            threads,
            seed: self.seed,
            sampling: PairSampling::new(self.max_pairs),
        }
    }
}

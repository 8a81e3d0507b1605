use clap::Parser;

use flow_scenes::{
    config::{RunConfig, WindowConfig},
    corpus::CorpusSource,
    demos::{self, tour_model::MODEL_FILE},
};

/// Classroom scenes on a small wgpu renderer
#[derive(Debug, Parser)]
#[clap(name = "flow-scenes", about)]
struct Args {
    /// Name of the demo to run.
    #[clap(default_value = "spinning-cube")]
    demo: String,

    #[clap(long)]
    /// Print the available demos and exit.
    list: bool,

    #[clap(long)]
    /// URL or local path of the text the word scenes are populated from.
    corpus: Option<String>,

    #[clap(long, default_value = MODEL_FILE)]
    /// glTF file shown by tour-model, relative to ./assets or absolute.
    model: String,

    #[clap(long, default_value_t = 1280)]
    width: u32,

    #[clap(long, default_value_t = 720)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.list {
        for demo in demos::DEMOS {
            println!("{}", demo);
        }
        return Ok(());
    }

    let config = RunConfig {
        demo: args.demo,
        corpus: args
            .corpus
            .as_deref()
            .map(CorpusSource::parse)
            .unwrap_or_default(),
        model: args.model,
        window: WindowConfig {
            width: args.width,
            height: args.height,
            ..Default::default()
        },
    };
    demos::launch(&config)
}

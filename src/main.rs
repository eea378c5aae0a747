use clap::Parser;
use tracing_subscriber::EnvFilter;

use mazeweave::{
    app::{App, Frame, MazeRequest},
    generators::Generator,
    solvers::Route,
};

#[derive(Parser, Debug)]
#[clap(version, about, name = "mazeweave")]
struct Args {
    #[clap(short, long, default_value_t = 15, help = "Number of rows in the maze")]
    rows: usize,
    #[clap(short, long, default_value_t = 25, help = "Number of columns in the maze")]
    cols: usize,
    #[clap(
        short,
        long,
        help = "Generator key, see --list. Picked from a menu when omitted"
    )]
    generator: Option<Generator>,
    #[clap(short, long, help = "Seed for reproducible mazes")]
    seed: Option<u64>,
    #[clap(long, help = "Record a snapshot every N link changes, 0 for the final maze only")]
    snapshot_interval: Option<usize>,
    #[clap(long, help = "Cell size stored with the grid")]
    cell_size: Option<u16>,
    #[clap(long, value_parser = parse_route, default_value = "diagonal", help = "Route to solve: diagonal or anti-diagonal")]
    route: Route,
    #[clap(long, action, help = "Print the solved maze as text and quit")]
    print: bool,
    #[clap(long, action, help = "Print the generated grid as JSON and quit")]
    json: bool,
    #[clap(long, default_value = "info", help = "Log level used when RUST_LOG is not set")]
    log_level: String,
    #[clap(short, long, action, help = "List available generators and quit")]
    list: bool,
}

fn parse_route(key: &str) -> Result<Route, String> {
    Route::ALL
        .into_iter()
        .find(|route| route.key() == key)
        .ok_or_else(|| {
            let keys: Vec<_> = Route::ALL.iter().map(|route| route.key()).collect();
            format!("unknown route `{}`, expected one of: {}", key, keys.join(", "))
        })
}

fn print_generators() {
    for generator in Generator::ALL {
        println!("{} ({})", generator.display_name(), generator.key());
        for line in generator.info() {
            println!("    {}", line);
        }
        println!();
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    if args.list {
        print_generators();
        return Ok(());
    }

    let mut app = App::default();
    if let Some(interval) = args.snapshot_interval {
        app.snapshot_interval = interval;
    }
    if let Some(cell_size) = args.cell_size {
        app.cell_size = cell_size;
    }

    // The terminal belongs to the renderer, so logs go to a file
    let file_appender = tracing_appender::rolling::never(&app.log_dir, app.log_file_name);
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();

    let request = MazeRequest {
        rows: args.rows,
        cols: args.cols,
        generator: args.generator,
        seed: args.seed,
        route: args.route,
    };

    if args.print || args.json {
        let generator = args.generator.unwrap_or(Generator::RecurBacktrack);
        let Some((grid, path)) = app.compute(&request, generator) else {
            return Err(std::io::Error::other("maze generation failed"));
        };
        if args.json {
            let json = grid.to_json().map_err(std::io::Error::other)?;
            println!("{}", json);
        } else {
            print!("{}", Frame::new(&grid.create_snapshot(), &path).to_text());
        }
        return Ok(());
    }

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run(&mut stdout, request);
    App::restore_terminal(&mut stdout)?;
    if let Err(e) = &result {
        tracing::error!("[main] {}", e);
    }
    result
}

use mazeweave::{
    app::{App, GenerationJob},
    generators::Generator,
    maze::is_perfect_maze,
    solvers::{Route, solve_maze},
};

fn main() -> std::io::Result<()> {
    let app = App::default();

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let size = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(u8::MAX as usize);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok());

    let file_appender = tracing_appender::rolling::never(&app.log_dir, "profile.log");
    let (writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(writer)
        .init();

    for generator in Generator::ALL {
        let job = GenerationJob {
            rows: size,
            cols: size,
            cell_size: app.cell_size,
            generator,
            seed,
            snapshot_interval: 0,
        };
        let result = job.run();
        let path = solve_maze(&result.grid, Route::Diagonal);
        tracing::info!(
            "[profile] {} on {}x{}: {:?}, path length {}",
            generator,
            size,
            size,
            result.elapsed,
            path.len()
        );
        println!(
            "{:<24} {:>12?}  perfect: {}  path: {}",
            generator.display_name(),
            result.elapsed,
            is_perfect_maze(&result.grid),
            path.len()
        );
    }
    Ok(())
}

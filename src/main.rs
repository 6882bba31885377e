//Enable more cargo lint tests
#![warn(rust_2018_idioms)]
#![warn(clippy::disallowed_types)]

use log::{info, LevelFilter};
use simplelog::{Config, TermLogger, TerminalMode};

use rlenc::compression::compress::compress;
use rlenc::compression::decompress::{decompress, test_record};
use rlenc::tools::cli::{rlopts_init, Mode};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace. The -v flags narrow this down.
    if TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .is_err()
    {
        eprintln!("rlenc: could not start the logger");
    }

    let options = rlopts_init();

    //----- Figure how what we need to do and go do it
    let result = match options.op_mode {
        Mode::Encode => compress(&options).map(|_| ()),
        Mode::Decode => decompress(&options).map(|_| ()),
        Mode::Test => test_record(&options).map(|len| {
            println!("{}: ok ({} bytes)", options.file.display(), len);
        }),
    };

    if let Err(e) = result {
        eprintln!("rlenc: {}", e);
        std::process::exit(1);
    }
    info!("Done.\n");
}

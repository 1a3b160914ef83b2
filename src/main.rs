mod app;

use std::process;

use app::error::FormatError;

fn main() {
    if let Err(err) = app::run() {
        if let Some(FormatError::Timeout { path, .. }) = err.downcast_ref::<FormatError>() {
            eprintln!("Time expired when formatting file {}", path.display());
            process::exit(-1);
        }
        eprintln!("Error: {:#}", err);
        process::exit(1);
    }
}

//! rcheckin main entrypoint.

use rcheckin::run;
use rcheckin::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {e}"));
        std::process::exit(1);
    }
}

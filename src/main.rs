use streamconv::context::Environment;
use streamconv::status::ExitStatus;
use streamconv::signals;

/// Entry point - catches Ctrl+C and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    // First Ctrl+C raises a flag the copy loop unwinds on, a second one exits
    signals::install_handler();

    let args: Vec<String> = std::env::args().collect();
    let env = Environment::init();

    let status = streamconv::core::run(args, env);

    if signals::was_interrupted() {
        return ExitStatus::Interrupted;
    }

    status
}

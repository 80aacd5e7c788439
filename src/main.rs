use std::process::ExitCode;

fn main() -> ExitCode {
    launcher_remote_lib::run()
}

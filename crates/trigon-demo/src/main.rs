use std::process::ExitCode;

use trigon_engine::device::GpuInit;
use trigon_engine::logging::{LoggingConfig, init_logging};
use trigon_engine::window::{Runtime, RuntimeConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let outcome = Runtime::run(RuntimeConfig::default(), GpuInit::default());
    ExitCode::from(exit_status(&outcome))
}

/// Normal quit exits 0; any startup or fatal runtime error exits 1.
fn exit_status(outcome: &anyhow::Result<()>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err:#}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_quit_exits_zero() {
        assert_eq!(exit_status(&Ok(())), 0);
    }

    #[test]
    fn startup_failure_exits_non_zero() {
        let err = anyhow::anyhow!("no display")
            .context("failed to initialize the windowing platform");
        assert_ne!(exit_status(&Err(err)), 0);
    }
}
